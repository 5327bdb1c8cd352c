//! Polling-based debounce
//!
//! A press is accepted when the button reads as pressed on a poll and
//! strictly more than the threshold has elapsed since the previous
//! accepted press of the same button. Holding a button therefore repeats
//! at roughly the debounce interval (rounded up to the poll period).

/// Decide whether a sampled press is accepted
///
/// - `edge`: button sampled as pressed on this poll
/// - `last_accepted_ms`: time of the previous accepted press, if any
/// - `now_ms`: time of this poll
/// - `threshold_ms`: minimum gap, exclusive
///
/// Returns `(accepted, new_last_accepted_ms)`.
pub fn debounce(
    edge: bool,
    last_accepted_ms: Option<u64>,
    now_ms: u64,
    threshold_ms: u64,
) -> (bool, Option<u64>) {
    if !edge {
        return (false, last_accepted_ms);
    }

    let accepted = match last_accepted_ms {
        Some(last) => now_ms.saturating_sub(last) > threshold_ms,
        None => true,
    };

    if accepted {
        (true, Some(now_ms))
    } else {
        (false, last_accepted_ms)
    }
}

/// Per-button debounce state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    last_accepted_ms: Option<u64>,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            last_accepted_ms: None,
        }
    }

    /// Feed one poll sample; returns `true` if the press is accepted
    pub fn sample(&mut self, pressed: bool, now_ms: u64, threshold_ms: u64) -> bool {
        let (accepted, last) = debounce(pressed, self.last_accepted_ms, now_ms, threshold_ms);
        self.last_accepted_ms = last;
        accepted
    }

    /// Time of the last accepted press
    pub fn last_accepted_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }

    /// Whether at least `window_ms` has passed since the last accepted press
    ///
    /// A button that was never pressed counts as idle.
    pub fn idle_for(&self, window_ms: u64, now_ms: u64) -> bool {
        match self.last_accepted_ms {
            Some(last) => now_ms.saturating_sub(last) >= window_ms,
            None => true,
        }
    }
}
