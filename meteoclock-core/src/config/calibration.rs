//! Sensor calibration constants

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed corrections applied at acquisition time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationConfig {
    /// Added to the measured pressure after conversion to hPa
    pub pressure_offset_hpa: f32,
}

impl CalibrationConfig {
    /// Largest offset accepted by validation, hPa
    pub const MAX_PRESSURE_OFFSET_HPA: f32 = 50.0;

    /// Check that the offset is a plausible sensor correction
    pub fn is_valid(&self) -> bool {
        self.pressure_offset_hpa.is_finite()
            && self.pressure_offset_hpa.abs() <= Self::MAX_PRESSURE_OFFSET_HPA
    }
}
