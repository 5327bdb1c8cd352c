//! Button drivers

pub mod button;

pub use button::ActiveLowButton;
