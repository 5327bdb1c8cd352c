//! Push button wired to ground with a pull-up

use embedded_hal::digital::InputPin;
use meteoclock_core::traits::Button;

/// Button that reads low while pressed
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> Button for ActiveLowButton<P> {
    fn is_pressed(&mut self) -> bool {
        // A pin read error counts as released
        self.pin.is_low().unwrap_or(false)
    }
}
