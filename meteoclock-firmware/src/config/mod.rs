//! Build-time panel configuration
//!
//! `PANEL_CONFIG` is generated by build.rs from panel.toml, which has
//! already been validated by the time this compiles.

use embassy_time::Duration;
use meteoclock_core::config::{
    CalibrationConfig, EditConfig, LayoutConfig, PanelConfig, TimingConfig,
};

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));

/// Ticker period from a configured millisecond value
pub fn period(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}
