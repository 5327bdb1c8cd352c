//! Bus and delay doubles shared by the driver tests

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// Register-file I2C device
///
/// A write sets the register pointer from its first byte and stores the
/// rest at consecutive addresses; reads return bytes from the pointer on.
/// When `responses` is non-empty, reads pop canned frames from it instead,
/// for command-based devices.
pub struct MockI2c {
    pub address: u8,
    pub regs: [u8; 256],
    pub writes: Vec<Vec<u8>>,
    pub responses: Vec<Vec<u8>>,
    pub fail: bool,
    ptr: u8,
}

impl MockI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            regs: [0; 256],
            writes: Vec::new(),
            responses: Vec::new(),
            fail: false,
            ptr: 0,
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail || address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push(bytes.to_vec());
                    if self.responses.is_empty() {
                        if let Some((reg, data)) = bytes.split_first() {
                            self.ptr = *reg;
                            for (i, b) in data.iter().enumerate() {
                                self.regs[self.ptr.wrapping_add(i as u8) as usize] = *b;
                            }
                        }
                    }
                }
                Operation::Read(buf) => {
                    if !self.responses.is_empty() {
                        let frame = self.responses.remove(0);
                        buf.copy_from_slice(&frame[..buf.len()]);
                    } else {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.regs[self.ptr.wrapping_add(i as u8) as usize];
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}
