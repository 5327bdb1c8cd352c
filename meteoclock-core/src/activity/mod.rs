//! The three periodic activities
//!
//! Each activity exposes a single-cycle method; the firmware drives it
//! from a ticker at the configured period and priority:
//!
//! | Activity    | Priority | Shares                     |
//! |-------------|----------|----------------------------|
//! | Input       | high     | clock, snapshot slot       |
//! | Acquisition | medium   | clock, snapshot slot       |
//! | Render      | low      | display, cache, slot (read)|

pub mod acquisition;
pub mod input;
pub mod render;

#[cfg(test)]
pub(crate) mod mock;

pub use acquisition::AcquisitionActivity;
pub use input::InputActivity;
pub use render::RenderActivity;
