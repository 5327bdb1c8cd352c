//! Display drivers

pub mod panel;

pub use panel::GraphicsPanel;
