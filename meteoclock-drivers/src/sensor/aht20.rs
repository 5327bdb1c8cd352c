//! AHT20 temperature and humidity sensor (I2C)
//!
//! Thin adapter over the async driver from `embedded-aht20`; the chip
//! protocol (calibration, busy polling, CRC) lives there.

use defmt_or_log as log;
use embedded_aht20::{Aht20 as Aht20Async, DEFAULT_I2C_ADDRESS};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use meteoclock_core::model::ClimateReading;
use meteoclock_core::traits::ClimateSensor;

/// Fixed I2C address
pub const AHT20_ADDRESS: u8 = DEFAULT_I2C_ADDRESS;

/// AHT20 errors
#[derive(Debug)]
pub enum Aht20Error<E: embedded_hal::i2c::Error> {
    /// Bus, checksum or calibration failure reported by the driver
    Device(embedded_aht20::Error<E>),
}

impl<E: embedded_hal::i2c::Error> From<embedded_aht20::Error<E>> for Aht20Error<E> {
    fn from(e: embedded_aht20::Error<E>) -> Self {
        Aht20Error::Device(e)
    }
}

/// AHT20 on an async I2C bus
pub struct Aht20<I2C, D> {
    inner: Aht20Async<I2C, D>,
}

impl<I2C, D> Aht20<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Probe and calibrate the sensor
    ///
    /// Fails if the sensor does not answer, which is how absence is
    /// detected at startup.
    pub async fn init(i2c: I2C, delay: D) -> Result<Self, Aht20Error<I2C::Error>> {
        let inner = Aht20Async::new(i2c, AHT20_ADDRESS, delay).await?;
        log::info!("AHT20 ready");
        Ok(Self { inner })
    }
}

impl<I2C, D> ClimateSensor for Aht20<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = Aht20Error<I2C::Error>;

    async fn read(&mut self) -> Result<ClimateReading, Self::Error> {
        let measurement = self.inner.measure().await?;
        Ok(ClimateReading {
            temperature_c: measurement.temperature.celsius(),
            relative_humidity: measurement.relative_humidity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockI2c, NoDelay};
    use embassy_futures::block_on;

    #[test]
    fn test_init_fails_when_absent() {
        let mut i2c = MockI2c::new(AHT20_ADDRESS);
        i2c.fail = true;

        assert!(block_on(Aht20::init(i2c, NoDelay)).is_err());
    }

    #[test]
    fn test_init_fails_at_wrong_address() {
        let i2c = MockI2c::new(AHT20_ADDRESS + 1);

        assert!(matches!(
            block_on(Aht20::init(i2c, NoDelay)),
            Err(Aht20Error::Device(_))
        ));
    }
}
