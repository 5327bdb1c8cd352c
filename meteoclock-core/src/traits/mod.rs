//! Hardware abstraction traits
//!
//! These traits define the interface between the activities and the
//! hardware-specific drivers (sensors, RTC, display, buttons).

pub mod button;
pub mod clock;
pub mod display;
pub mod sensor;

pub use button::Button;
pub use clock::Clock;
pub use display::{Color, DisplayError, TextDisplay};
pub use sensor::{BarometricSensor, ClimateSensor};
