//! DS3231 battery-backed real-time clock (I2C)
//!
//! Time registers 0x00-0x06 hold BCD seconds, minutes, hours, weekday,
//! date, month and two-digit year. The clock is always written in 24-hour
//! mode; 12-hour values written by other firmware are still decoded.
//!
//! Hand-written because the crates.io `ds323x` driver is blocking-only and
//! its async fork is only available from a path or git source.

use defmt_or_log as log;
use embedded_hal_async::i2c::I2c;
use meteoclock_core::model::DateTime;
use meteoclock_core::traits::Clock;

/// Fixed I2C address
pub const DS3231_ADDRESS: u8 = 0x68;

/// DS3231 register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const CONTROL: u8 = 0x0E;
    pub const STATUS: u8 = 0x0F;
}

const HOUR_12H: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const MONTH_CENTURY: u8 = 0x80;
/// Oscillator stop flag
const STATUS_OSF: u8 = 0x80;

/// Years representable with the two-digit year register
const BASE_YEAR: u16 = 2000;

/// DS3231 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds3231Error<E> {
    /// Bus error
    I2c(E),
    /// Registers hold a date/time outside calendar ranges
    InvalidDateTime,
    /// Year outside 2000-2099
    YearOutOfRange(u16),
}

fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}

/// Decode the seven time registers
pub fn decode(regs: &[u8; 7]) -> Option<DateTime> {
    let second = bcd_to_bin(regs[0] & 0x7F);
    let minute = bcd_to_bin(regs[1] & 0x7F);

    let hour = if regs[2] & HOUR_12H != 0 {
        let h12 = bcd_to_bin(regs[2] & 0x1F) % 12;
        if regs[2] & HOUR_PM != 0 {
            h12 + 12
        } else {
            h12
        }
    } else {
        bcd_to_bin(regs[2] & 0x3F)
    };

    // regs[3] holds the weekday, which is always derived from the date
    let day = bcd_to_bin(regs[4] & 0x3F);
    let month = bcd_to_bin(regs[5] & 0x1F);
    let year = BASE_YEAR + u16::from(bcd_to_bin(regs[6]));

    let datetime = DateTime::new(year, month, day, hour, minute, second);
    datetime.is_valid().then_some(datetime)
}

/// Encode a date/time into the seven time registers (24-hour mode)
pub fn encode(datetime: &DateTime) -> Option<[u8; 7]> {
    if !(BASE_YEAR..BASE_YEAR + 100).contains(&datetime.year) {
        return None;
    }

    Some([
        bin_to_bcd(datetime.second),
        bin_to_bcd(datetime.minute),
        bin_to_bcd(datetime.hour),
        datetime.weekday().number_from_monday(),
        bin_to_bcd(datetime.day),
        bin_to_bcd(datetime.month) & !MONTH_CENTURY,
        bin_to_bcd((datetime.year - BASE_YEAR) as u8),
    ])
}

/// DS3231 on an async I2C bus
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Probe the clock
    ///
    /// Returns whether the oscillator stopped since the time was last set,
    /// in which case the stored time is not trustworthy.
    pub async fn init(&mut self) -> Result<bool, Ds3231Error<I2C::Error>> {
        let status = self.read_reg(reg::STATUS).await?;
        let lost_power = status & STATUS_OSF != 0;
        if lost_power {
            log::warn!("DS3231 oscillator stopped, time needs setting");
        }
        Ok(lost_power)
    }

    async fn read_reg(&mut self, register: u8) -> Result<u8, Ds3231Error<I2C::Error>> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDRESS, &[register], &mut value)
            .await
            .map_err(Ds3231Error::I2c)?;
        Ok(value[0])
    }

    async fn write_reg(&mut self, register: u8, value: u8) -> Result<(), Ds3231Error<I2C::Error>> {
        self.i2c
            .write(DS3231_ADDRESS, &[register, value])
            .await
            .map_err(Ds3231Error::I2c)
    }
}

impl<I2C: I2c> Clock for Ds3231<I2C> {
    type Error = Ds3231Error<I2C::Error>;

    async fn now(&mut self) -> Result<DateTime, Self::Error> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDRESS, &[reg::SECONDS], &mut regs)
            .await
            .map_err(Ds3231Error::I2c)?;

        decode(&regs).ok_or(Ds3231Error::InvalidDateTime)
    }

    async fn set(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        if !datetime.is_valid() {
            return Err(Ds3231Error::InvalidDateTime);
        }
        let regs = encode(datetime).ok_or(Ds3231Error::YearOutOfRange(datetime.year))?;

        let mut frame = [0u8; 8];
        frame[0] = reg::SECONDS;
        frame[1..].copy_from_slice(&regs);
        self.i2c
            .write(DS3231_ADDRESS, &frame)
            .await
            .map_err(Ds3231Error::I2c)?;

        let status = self.read_reg(reg::STATUS).await?;
        if status & STATUS_OSF != 0 {
            self.write_reg(reg::STATUS, status & !STATUS_OSF).await?;
        }

        Ok(())
    }
}
