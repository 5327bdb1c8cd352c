//! Momentary push button trait

/// A push button sampled by polling
pub trait Button {
    /// Current level: `true` while the button is held down
    ///
    /// A read failure is reported as not pressed.
    fn is_pressed(&mut self) -> bool;
}
