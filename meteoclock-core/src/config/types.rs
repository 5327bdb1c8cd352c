//! Configuration type definitions
//!
//! Defaults match the reference panel: 1 s acquisition, 50 ms button
//! polling, 100 ms rendering, 100 ms debounce and a 10 s edit timeout.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::CalibrationConfig;

/// Periods and timeouts of the three activities (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Sensor and clock sampling period
    pub acquisition_period_ms: u32,
    /// Button polling period
    pub input_period_ms: u32,
    /// Screen refresh period
    pub render_period_ms: u32,
    /// Minimum gap between two accepted presses of the same button
    pub debounce_ms: u32,
    /// Idle time after which edit mode is left
    pub edit_timeout_ms: u32,
}

impl TimingConfig {
    pub const DEFAULT: Self = Self {
        acquisition_period_ms: 1000,
        input_period_ms: 50,
        render_period_ms: 100,
        debounce_ms: 100,
        edit_timeout_ms: 10_000,
    };
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Clock editing limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditConfig {
    /// First year of the edit cycle
    pub year_min: u16,
    /// Last year of the edit cycle (wraps back to `year_min`)
    pub year_max: u16,
}

impl EditConfig {
    pub const DEFAULT_YEAR_MIN: u16 = 2025;
    pub const DEFAULT_YEAR_MAX: u16 = 2099;

    pub const DEFAULT: Self = Self {
        year_min: Self::DEFAULT_YEAR_MIN,
        year_max: Self::DEFAULT_YEAR_MAX,
    };
}

impl Default for EditConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Text grid used to place screen regions (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Left edge of every region
    pub origin_x: u16,
    /// Top edge of the first region
    pub origin_y: u16,
    /// Glyph cell width
    pub cell_width: u16,
    /// Glyph cell height
    pub cell_height: u16,
    /// Vertical distance between the tops of two consecutive regions
    pub line_pitch: u16,
    /// Region width in glyph cells
    pub columns: u16,
}

impl LayoutConfig {
    pub const DEFAULT: Self = Self {
        origin_x: 8,
        origin_y: 8,
        cell_width: 10,
        cell_height: 20,
        line_pitch: 30,
        columns: 24,
    };
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period or timeout is zero
    ZeroPeriod,
    /// Button polling is not the fastest activity
    InputNotFastest,
    /// Edit timeout does not exceed the debounce interval
    TimeoutTooShort,
    /// Year range empty or outside 2000-2099
    InvalidYearRange,
    /// Pressure offset not finite or implausibly large
    InvalidCalibration,
    /// Zero-sized glyph cell or overlapping regions
    InvalidLayout,
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    pub timing: TimingConfig,
    pub calibration: CalibrationConfig,
    pub edit: EditConfig,
    pub layout: LayoutConfig,
}

impl PanelConfig {
    /// Check the configuration for values the activities cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;

        if t.acquisition_period_ms == 0
            || t.input_period_ms == 0
            || t.render_period_ms == 0
            || t.debounce_ms == 0
            || t.edit_timeout_ms == 0
        {
            return Err(ConfigError::ZeroPeriod);
        }

        // Input must stay the most responsive activity
        if t.input_period_ms >= t.render_period_ms || t.input_period_ms >= t.acquisition_period_ms
        {
            return Err(ConfigError::InputNotFastest);
        }

        if t.edit_timeout_ms <= t.debounce_ms {
            return Err(ConfigError::TimeoutTooShort);
        }

        let e = &self.edit;
        if e.year_min > e.year_max || e.year_min < 2000 || e.year_max > 2099 {
            return Err(ConfigError::InvalidYearRange);
        }

        if !self.calibration.is_valid() {
            return Err(ConfigError::InvalidCalibration);
        }

        let l = &self.layout;
        if l.cell_width == 0 || l.cell_height == 0 || l.columns == 0 || l.line_pitch < l.cell_height
        {
            return Err(ConfigError::InvalidLayout);
        }

        Ok(())
    }
}
