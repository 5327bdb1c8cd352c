//! Environmental sensor traits

use crate::model::{BarometricReading, ClimateReading};

/// Temperature/humidity sensor (sensor A)
pub trait ClimateSensor {
    /// Error type for sensor reads
    type Error: core::fmt::Debug;

    /// Take one temperature and relative humidity measurement
    async fn read(&mut self) -> Result<ClimateReading, Self::Error>;
}

/// Temperature/pressure sensor (sensor B)
pub trait BarometricSensor {
    /// Error type for sensor reads
    type Error: core::fmt::Debug;

    /// Take one temperature and absolute pressure measurement
    ///
    /// Pressure is reported in pascals; conversion to hPa and calibration
    /// happen when the snapshot is built.
    async fn read(&mut self) -> Result<BarometricReading, Self::Error>;
}
