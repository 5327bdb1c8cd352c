//! BMP280 temperature and pressure sensor (I2C)
//!
//! Runs in normal mode with the sampling profile the panel was designed
//! around: temperature x2, pressure x16, IIR filter x16, 500 ms standby.
//! Readings are compensated with the factory trimming parameters using
//! the datasheet's floating point formulas.

use defmt_or_log as log;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use meteoclock_core::model::BarometricReading;
use meteoclock_core::traits::BarometricSensor;

/// Address with SDO tied low
pub const BMP280_ADDRESS: u8 = 0x76;
/// Address with SDO tied high
pub const BMP280_ADDRESS_ALT: u8 = 0x77;

/// Expected value of the chip id register
pub const CHIP_ID: u8 = 0x58;

/// BMP280 register addresses
pub mod reg {
    /// First trimming parameter (24 bytes, little endian)
    pub const CALIB: u8 = 0x88;
    pub const CHIP_ID: u8 = 0xD0;
    pub const RESET: u8 = 0xE0;
    pub const STATUS: u8 = 0xF3;
    pub const CTRL_MEAS: u8 = 0xF4;
    pub const CONFIG: u8 = 0xF5;
    /// Start of the pressure/temperature burst (6 bytes)
    pub const PRESS_MSB: u8 = 0xF7;
}

const RESET_WORD: u8 = 0xB6;
/// NVM copy in progress
const STATUS_IM_UPDATE: u8 = 0x01;

/// Oversampling setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    Skip = 0b000,
    X1 = 0b001,
    X2 = 0b010,
    X4 = 0b011,
    X8 = 0b100,
    X16 = 0b101,
}

/// IIR filter coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Filter {
    Off = 0b000,
    X2 = 0b001,
    X4 = 0b010,
    X8 = 0b011,
    X16 = 0b100,
}

/// Inactive time between measurements in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Standby {
    Ms0_5 = 0b000,
    Ms62_5 = 0b001,
    Ms125 = 0b010,
    Ms250 = 0b011,
    Ms500 = 0b100,
    Ms1000 = 0b101,
    Ms2000 = 0b110,
    Ms4000 = 0b111,
}

/// Power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Sleep = 0b00,
    Forced = 0b01,
    Normal = 0b11,
}

/// Measurement configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sampling {
    pub mode: Mode,
    pub temperature: Oversampling,
    pub pressure: Oversampling,
    pub filter: Filter,
    pub standby: Standby,
}

impl Sampling {
    /// Value for the ctrl_meas register
    pub fn ctrl_meas(&self) -> u8 {
        ((self.temperature as u8) << 5) | ((self.pressure as u8) << 2) | self.mode as u8
    }

    /// Value for the config register
    pub fn config(&self) -> u8 {
        ((self.standby as u8) << 5) | ((self.filter as u8) << 2)
    }
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            temperature: Oversampling::X2,
            pressure: Oversampling::X16,
            filter: Filter::X16,
            standby: Standby::Ms500,
        }
    }
}

/// BMP280 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp280Error<E> {
    /// Bus error
    I2c(E),
    /// Chip id register holds something other than a BMP280
    WrongChipId(u8),
    /// Read before `init`
    NotInitialized,
}

/// Factory trimming parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl Calibration {
    /// Parse the 24-byte block starting at [`reg::CALIB`]
    pub fn from_bytes(b: &[u8; 24]) -> Self {
        let u = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);
        let s = |i: usize| i16::from_le_bytes([b[i], b[i + 1]]);

        Self {
            dig_t1: u(0),
            dig_t2: s(2),
            dig_t3: s(4),
            dig_p1: u(6),
            dig_p2: s(8),
            dig_p3: s(10),
            dig_p4: s(12),
            dig_p5: s(14),
            dig_p6: s(16),
            dig_p7: s(18),
            dig_p8: s(20),
            dig_p9: s(22),
        }
    }

    /// Compensate raw ADC values
    ///
    /// Returns temperature in °C and pressure in Pa.
    pub fn compensate(&self, adc_t: i32, adc_p: i32) -> BarometricReading {
        let adc_t = f64::from(adc_t);
        let adc_p = f64::from(adc_p);
        let t1 = f64::from(self.dig_t1);
        let t2 = f64::from(self.dig_t2);
        let t3 = f64::from(self.dig_t3);

        let var1 = (adc_t / 16384.0 - t1 / 1024.0) * t2;
        let d = adc_t / 131072.0 - t1 / 8192.0;
        let var2 = d * d * t3;
        let t_fine = var1 + var2;
        let temperature_c = t_fine / 5120.0;

        let mut var1 = t_fine / 2.0 - 64000.0;
        let mut var2 = var1 * var1 * f64::from(self.dig_p6) / 32768.0;
        var2 += var1 * f64::from(self.dig_p5) * 2.0;
        var2 = var2 / 4.0 + f64::from(self.dig_p4) * 65536.0;
        var1 = (f64::from(self.dig_p3) * var1 * var1 / 524288.0 + f64::from(self.dig_p2) * var1)
            / 524288.0;
        var1 = (1.0 + var1 / 32768.0) * f64::from(self.dig_p1);

        let pressure_pa = if var1 == 0.0 {
            // Uncalibrated part; avoids a division by zero
            0.0
        } else {
            let mut p = 1048576.0 - adc_p;
            p = (p - var2 / 4096.0) * 6250.0 / var1;
            let var1 = f64::from(self.dig_p9) * p * p / 2147483648.0;
            let var2 = p * f64::from(self.dig_p8) / 32768.0;
            p + (var1 + var2 + f64::from(self.dig_p7)) / 16.0
        };

        BarometricReading {
            temperature_c: temperature_c as f32,
            pressure_pa: pressure_pa as f32,
        }
    }
}

/// Split the 6-byte burst into raw (temperature, pressure)
pub fn parse_burst(b: &[u8; 6]) -> (i32, i32) {
    let raw20 = |msb: u8, lsb: u8, xlsb: u8| {
        (i32::from(msb) << 12) | (i32::from(lsb) << 4) | (i32::from(xlsb) >> 4)
    };
    (raw20(b[3], b[4], b[5]), raw20(b[0], b[1], b[2]))
}

/// BMP280 on an async I2C bus
pub struct Bmp280<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    sampling: Sampling,
    calibration: Option<Calibration>,
}

impl<I2C, D> Bmp280<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            sampling: Sampling::default(),
            calibration: None,
        }
    }

    /// Use a different sampling profile; applied by `init`
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Verify the chip id, reset, load trimming data and start sampling
    pub async fn init(&mut self) -> Result<(), Bmp280Error<I2C::Error>> {
        let id = self.read_reg(reg::CHIP_ID).await?;
        if id != CHIP_ID {
            log::error!("BMP280 chip id mismatch: {:#x}", id);
            return Err(Bmp280Error::WrongChipId(id));
        }

        self.write_reg(reg::RESET, RESET_WORD).await?;
        self.delay.delay_ms(10).await;

        // Wait for the trimming data to be copied from NVM
        for _ in 0..10 {
            if self.read_reg(reg::STATUS).await? & STATUS_IM_UPDATE == 0 {
                break;
            }
            self.delay.delay_ms(5).await;
        }

        let mut calib = [0u8; 24];
        self.i2c
            .write_read(self.address, &[reg::CALIB], &mut calib)
            .await
            .map_err(Bmp280Error::I2c)?;
        self.calibration = Some(Calibration::from_bytes(&calib));

        // Config is only guaranteed to take effect outside normal mode
        self.write_reg(reg::CONFIG, self.sampling.config()).await?;
        self.write_reg(reg::CTRL_MEAS, self.sampling.ctrl_meas()).await?;

        log::info!("BMP280 ready");
        Ok(())
    }

    /// Read the latest compensated measurement
    pub async fn measure(&mut self) -> Result<BarometricReading, Bmp280Error<I2C::Error>> {
        let calibration = self.calibration.ok_or(Bmp280Error::NotInitialized)?;

        let mut burst = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::PRESS_MSB], &mut burst)
            .await
            .map_err(Bmp280Error::I2c)?;

        let (adc_t, adc_p) = parse_burst(&burst);
        Ok(calibration.compensate(adc_t, adc_p))
    }

    async fn read_reg(&mut self, register: u8) -> Result<u8, Bmp280Error<I2C::Error>> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut value)
            .await
            .map_err(Bmp280Error::I2c)?;
        Ok(value[0])
    }

    async fn write_reg(&mut self, register: u8, value: u8) -> Result<(), Bmp280Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .await
            .map_err(Bmp280Error::I2c)
    }
}

impl<I2C, D> BarometricSensor for Bmp280<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = Bmp280Error<I2C::Error>;

    async fn read(&mut self) -> Result<BarometricReading, Self::Error> {
        self.measure().await
    }
}
