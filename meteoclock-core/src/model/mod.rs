//! Data model shared between the activities
//!
//! Everything here is a plain `Copy` value: snapshots are replaced
//! wholesale, never referenced across activities.

pub mod datetime;
pub mod snapshot;

pub use datetime::{DateTime, EditField, Weekday};
pub use snapshot::{BarometricReading, ClimateReading, EditIndicator, SensorSnapshot};
