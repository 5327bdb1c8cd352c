//! Clock edit state machine
//!
//! Owned by the input activity. Buttons are debounced into events, events
//! drive [`EditMode`] transitions, and transitions produce [`EditEffect`]s
//! the caller applies to the clock.

use heapless::Vec;

use super::debounce::Debouncer;
use crate::config::TimingConfig;
use crate::model::{EditField, EditIndicator};

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditMode {
    /// Normal display, buttons only open the editor
    #[default]
    Idle,
    /// A clock field is selected for editing
    Editing,
}

/// Debounced button events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditEvent {
    /// NAV accepted
    NavPressed,
    /// SET accepted
    SetPressed,
    /// Neither button accepted for the edit timeout
    Timeout,
}

/// Result of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditEffect {
    /// Editor opened with the first field selected
    Entered,
    /// Selection moved to this field
    FieldSelected(EditField),
    /// The clock should advance this field by one unit
    Increment(EditField),
    /// Editor closed after the timeout
    Exited,
}

/// Raw button levels from one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSample {
    pub nav: bool,
    pub set: bool,
}

/// Effects produced by one poll, in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    effects: Vec<EditEffect, 3>,
}

impl EditOutcome {
    fn push(&mut self, effect: EditEffect) {
        // At most one effect per NAV, SET and timeout step
        let _ = self.effects.push(effect);
    }

    pub fn effects(&self) -> &[EditEffect] {
        &self.effects
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Field the clock must be incremented on, if SET was applied
    pub fn increment(&self) -> Option<EditField> {
        self.effects.iter().find_map(|effect| match effect {
            EditEffect::Increment(field) => Some(*field),
            _ => None,
        })
    }
}

/// Edit state: mode, selected field and per-button debounce history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditState {
    mode: EditMode,
    field: EditField,
    nav: Debouncer,
    set: Debouncer,
}

impl EditState {
    pub const fn new() -> Self {
        Self {
            mode: EditMode::Idle,
            field: EditField::Year,
            nav: Debouncer::new(),
            set: Debouncer::new(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Selected field; only meaningful while editing
    pub fn field(&self) -> EditField {
        self.field
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    /// Indicator published alongside the sensor snapshot
    pub fn indicator(&self) -> EditIndicator {
        match self.mode {
            EditMode::Idle => EditIndicator::IDLE,
            EditMode::Editing => EditIndicator::editing(self.field),
        }
    }

    /// Apply one debounced event
    pub fn handle(&mut self, event: EditEvent) -> Option<EditEffect> {
        use EditEvent::*;
        use EditMode::*;

        match (self.mode, event) {
            (Idle, NavPressed) | (Idle, SetPressed) => {
                self.mode = Editing;
                self.field = EditField::Year;
                Some(EditEffect::Entered)
            }
            (Editing, NavPressed) => {
                self.field = self.field.next();
                Some(EditEffect::FieldSelected(self.field))
            }
            (Editing, SetPressed) => Some(EditEffect::Increment(self.field)),
            (Editing, Timeout) => {
                self.mode = Idle;
                self.field = EditField::Year;
                Some(EditEffect::Exited)
            }
            (Idle, Timeout) => None,
        }
    }

    /// Run one poll
    ///
    /// NAV is handled first, then SET, then the timeout check. SET only
    /// increments when editing was already active at the start of the
    /// poll, so the press that opens edit mode never changes the clock.
    pub fn poll(&mut self, sample: ButtonSample, now_ms: u64, timing: &TimingConfig) -> EditOutcome {
        let debounce_ms = u64::from(timing.debounce_ms);
        let timeout_ms = u64::from(timing.edit_timeout_ms);
        let was_editing = self.is_editing();
        let mut outcome = EditOutcome::default();

        if self.nav.sample(sample.nav, now_ms, debounce_ms) {
            if let Some(effect) = self.handle(EditEvent::NavPressed) {
                outcome.push(effect);
            }
        }

        let entered_by_nav = !was_editing && self.is_editing();
        if self.set.sample(sample.set, now_ms, debounce_ms) && !entered_by_nav {
            if let Some(effect) = self.handle(EditEvent::SetPressed) {
                outcome.push(effect);
            }
        }

        if self.is_editing()
            && self.nav.idle_for(timeout_ms, now_ms)
            && self.set.idle_for(timeout_ms, now_ms)
        {
            if let Some(effect) = self.handle(EditEvent::Timeout) {
                outcome.push(effect);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TIMING: TimingConfig = TimingConfig::DEFAULT;

    fn nav() -> ButtonSample {
        ButtonSample { nav: true, set: false }
    }

    fn set() -> ButtonSample {
        ButtonSample { nav: false, set: true }
    }

    fn none() -> ButtonSample {
        ButtonSample::default()
    }

    #[test]
    fn test_initial_state() {
        let state = EditState::new();
        assert_eq!(state.mode(), EditMode::Idle);
        assert_eq!(state.indicator(), EditIndicator::IDLE);
    }

    #[test]
    fn test_nav_enters_editing_at_year() {
        let mut state = EditState::new();
        let outcome = state.poll(nav(), 1_000, &TIMING);

        assert_eq!(outcome.effects(), &[EditEffect::Entered]);
        assert_eq!(state.mode(), EditMode::Editing);
        assert_eq!(state.field(), EditField::Year);
        assert_eq!(state.indicator(), EditIndicator::editing(EditField::Year));
    }

    #[test]
    fn test_set_enters_editing_without_increment() {
        let mut state = EditState::new();
        let outcome = state.poll(set(), 1_000, &TIMING);

        assert_eq!(outcome.effects(), &[EditEffect::Entered]);
        assert_eq!(outcome.increment(), None);
        assert!(state.is_editing());
    }

    #[test]
    fn test_set_increments_selected_field() {
        let mut state = EditState::new();
        state.poll(nav(), 0, &TIMING);
        state.poll(nav(), 200, &TIMING);
        assert_eq!(state.field(), EditField::Month);

        let outcome = state.poll(set(), 400, &TIMING);
        assert_eq!(outcome.increment(), Some(EditField::Month));
    }

    #[test]
    fn test_field_cycles_from_minute_to_year() {
        let mut state = EditState::new();
        let mut now = 0;
        state.poll(nav(), now, &TIMING);
        for _ in 0..4 {
            now += 200;
            state.poll(nav(), now, &TIMING);
        }
        assert_eq!(state.field(), EditField::Minute);

        now += 200;
        let outcome = state.poll(nav(), now, &TIMING);
        assert_eq!(state.field(), EditField::Year);
        assert_eq!(outcome.effects(), &[EditEffect::FieldSelected(EditField::Year)]);
    }

    #[test]
    fn test_bounced_press_ignored() {
        let mut state = EditState::new();
        state.poll(nav(), 0, &TIMING);
        let outcome = state.poll(nav(), 50, &TIMING);

        assert!(outcome.is_empty());
        assert_eq!(state.field(), EditField::Year);
    }

    #[test]
    fn test_nav_then_set_in_one_poll() {
        let mut state = EditState::new();
        let outcome = state.poll(ButtonSample { nav: true, set: true }, 0, &TIMING);

        assert_eq!(outcome.effects(), &[EditEffect::Entered]);
        assert_eq!(state.field(), EditField::Year);
        assert!(state.is_editing());
    }

    #[test]
    fn test_nav_and_set_while_editing() {
        let mut state = EditState::new();
        state.poll(nav(), 0, &TIMING);

        let outcome = state.poll(ButtonSample { nav: true, set: true }, 200, &TIMING);
        assert_eq!(
            outcome.effects(),
            &[
                EditEffect::FieldSelected(EditField::Month),
                EditEffect::Increment(EditField::Month)
            ]
        );
    }

    #[test]
    fn test_auto_exit_after_timeout() {
        let mut state = EditState::new();
        state.poll(nav(), 1_000, &TIMING);

        // Polled every 50 ms; must stay in editing until 10 s have passed
        let mut now = 1_000;
        while now + 50 < 11_000 {
            now += 50;
            assert!(state.poll(none(), now, &TIMING).is_empty(), "exited at {}", now);
            assert!(state.is_editing());
        }

        let outcome = state.poll(none(), 11_000, &TIMING);
        assert_eq!(outcome.effects(), &[EditEffect::Exited]);
        assert_eq!(state.mode(), EditMode::Idle);
        assert_eq!(state.indicator(), EditIndicator::IDLE);
    }

    #[test]
    fn test_timeout_waits_for_both_buttons() {
        let mut state = EditState::new();
        state.poll(nav(), 0, &TIMING);
        state.poll(set(), 5_000, &TIMING);

        // NAV idle for 10 s but SET only for 5 s
        assert!(state.poll(none(), 10_000, &TIMING).is_empty());
        assert!(state.is_editing());

        let outcome = state.poll(none(), 15_000, &TIMING);
        assert_eq!(outcome.effects(), &[EditEffect::Exited]);
    }

    #[test]
    fn test_timeout_ignored_when_idle() {
        let mut state = EditState::new();
        assert_eq!(state.handle(EditEvent::Timeout), None);
        assert!(state.poll(none(), 50_000, &TIMING).is_empty());
    }

    #[test]
    fn test_reentry_starts_at_year() {
        let mut state = EditState::new();
        state.poll(nav(), 0, &TIMING);
        state.poll(nav(), 200, &TIMING);
        state.poll(none(), 10_200, &TIMING);
        assert_eq!(state.mode(), EditMode::Idle);

        state.poll(nav(), 10_400, &TIMING);
        assert_eq!(state.field(), EditField::Year);
    }

    proptest! {
        #[test]
        fn prop_idle_indicator_never_editing(
            samples in prop::collection::vec((any::<bool>(), any::<bool>(), 1u64..3_000), 1..100)
        ) {
            let mut state = EditState::new();
            let mut now = 0;
            for (nav, set, gap) in samples {
                now += gap;
                state.poll(ButtonSample { nav, set }, now, &TIMING);

                let indicator = state.indicator();
                prop_assert_eq!(indicator.editing, state.is_editing());
                if !state.is_editing() {
                    prop_assert_eq!(indicator, EditIndicator::IDLE);
                }
            }
        }

        #[test]
        fn prop_at_most_one_increment_per_poll(
            samples in prop::collection::vec((any::<bool>(), any::<bool>(), 1u64..500), 1..100)
        ) {
            let mut state = EditState::new();
            let mut now = 0;
            for (nav, set, gap) in samples {
                now += gap;
                let outcome = state.poll(ButtonSample { nav, set }, now, &TIMING);
                let increments = outcome
                    .effects()
                    .iter()
                    .filter(|e| matches!(e, EditEffect::Increment(_)))
                    .count();
                prop_assert!(increments <= 1);
                if !set {
                    prop_assert_eq!(increments, 0);
                }
            }
        }

        #[test]
        fn prop_entering_never_increments(
            samples in prop::collection::vec((any::<bool>(), any::<bool>(), 1u64..12_000), 1..100)
        ) {
            let mut state = EditState::new();
            let mut now = 0;
            for (nav, set, gap) in samples {
                now += gap;
                let was_editing = state.is_editing();
                let outcome = state.poll(ButtonSample { nav, set }, now, &TIMING);
                if !was_editing {
                    prop_assert!(!outcome
                        .effects()
                        .iter()
                        .any(|e| matches!(e, EditEffect::Increment(_))));
                }
            }
        }
    }
}
