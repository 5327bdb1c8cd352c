//! Configuration types
//!
//! Board-agnostic configuration structures. Values are fixed at build
//! time; nothing here is reconfigured while the panel runs.

pub mod calibration;
pub mod types;

pub use calibration::*;
pub use types::*;
