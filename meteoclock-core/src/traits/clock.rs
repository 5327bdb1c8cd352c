//! Battery-backed real-time clock trait

use crate::model::DateTime;

/// Real-time clock device
///
/// The clock is the authoritative time source. Implementations derive the
/// weekday from the date; callers never set it directly.
pub trait Clock {
    /// Error type for clock access
    type Error: core::fmt::Debug;

    /// Read the current date and time
    async fn now(&mut self) -> Result<DateTime, Self::Error>;

    /// Overwrite the current date and time
    async fn set(&mut self, datetime: &DateTime) -> Result<(), Self::Error>;
}
