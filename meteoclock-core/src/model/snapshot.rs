//! Sensor snapshot published by the acquisition activity

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::datetime::{DateTime, EditField};
use crate::config::CalibrationConfig;

/// Reading from the temperature/humidity sensor (sensor A)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Temperature in °C
    pub temperature_c: f32,
    /// Relative humidity in %
    pub relative_humidity: f32,
}

/// Reading from the temperature/pressure sensor (sensor B)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BarometricReading {
    /// Temperature in °C
    pub temperature_c: f32,
    /// Absolute pressure in Pa
    pub pressure_pa: f32,
}

/// Edit-mode status carried alongside the sensor values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditIndicator {
    pub editing: bool,
    /// Only meaningful while `editing` is set
    pub field: EditField,
}

impl EditIndicator {
    /// Indicator for the idle (not editing) state
    pub const IDLE: Self = Self {
        editing: false,
        field: EditField::Year,
    };

    /// Indicator while editing `field`
    pub const fn editing(field: EditField) -> Self {
        Self {
            editing: true,
            field,
        }
    }
}

/// Latest sensor values, clock time and edit indicator
///
/// Built whole by the acquisition activity and replaced whole on every
/// publish. The only in-place change ever made to a published snapshot is
/// [`SensorSnapshot::with_edit`] applied by the input activity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    /// Sensor A temperature, °C
    pub ambient_temperature: f32,
    /// Sensor A relative humidity, %
    pub ambient_humidity: f32,
    /// Sensor B temperature, °C
    pub aux_temperature: f32,
    /// Sensor B pressure, hPa with calibration offset applied
    pub pressure_hpa: f32,
    pub timestamp: DateTime,
    pub edit: EditIndicator,
}

impl SensorSnapshot {
    /// Build a snapshot from raw readings
    ///
    /// Converts pressure from Pa to hPa and applies the fixed calibration
    /// offset. The edit indicator starts out idle.
    pub fn from_readings(
        climate: ClimateReading,
        barometric: BarometricReading,
        timestamp: DateTime,
        calibration: &CalibrationConfig,
    ) -> Self {
        Self {
            ambient_temperature: climate.temperature_c,
            ambient_humidity: climate.relative_humidity,
            aux_temperature: barometric.temperature_c,
            pressure_hpa: barometric.pressure_pa / 100.0 + calibration.pressure_offset_hpa,
            timestamp,
            edit: EditIndicator::IDLE,
        }
    }

    /// Copy of this snapshot with only the edit indicator replaced
    pub fn with_edit(&self, edit: EditIndicator) -> Self {
        Self { edit, ..*self }
    }

    /// Whether `other` carries the same sensor and time values
    ///
    /// Compares everything except the edit indicator.
    pub fn same_readings(&self, other: &SensorSnapshot) -> bool {
        self.with_edit(EditIndicator::IDLE) == other.with_edit(EditIndicator::IDLE)
    }
}
