//! Input activity
//!
//! Polls the NAV and SET buttons, runs the edit state machine, writes
//! edited fields to the clock and mirrors the edit status into the
//! snapshot slot.

use defmt_or_log as log;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::config::{EditConfig, TimingConfig};
use crate::input::{ButtonSample, EditEffect, EditOutcome, EditState};
use crate::model::EditField;
use crate::sync::SnapshotSlot;
use crate::traits::{Button, Clock};

/// Button polling and clock editing
pub struct InputActivity<'a, M: RawMutex, P, C> {
    nav: P,
    set: P,
    clock: &'a Mutex<M, C>,
    slot: &'a SnapshotSlot<M>,
    state: EditState,
    timing: TimingConfig,
    edit: EditConfig,
}

impl<'a, M, P, C> InputActivity<'a, M, P, C>
where
    M: RawMutex,
    P: Button,
    C: Clock,
{
    pub fn new(
        nav: P,
        set: P,
        clock: &'a Mutex<M, C>,
        slot: &'a SnapshotSlot<M>,
        timing: TimingConfig,
        edit: EditConfig,
    ) -> Self {
        Self {
            nav,
            set,
            clock,
            slot,
            state: EditState::new(),
            timing,
            edit,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Run one poll at `now_ms`
    pub async fn poll(&mut self, now_ms: u64) -> EditOutcome {
        let sample = ButtonSample {
            nav: self.nav.is_pressed(),
            set: self.set.is_pressed(),
        };

        let outcome = self.state.poll(sample, now_ms, &self.timing);

        for effect in outcome.effects() {
            match effect {
                EditEffect::Entered => log::info!("Clock edit started"),
                EditEffect::FieldSelected(field) => {
                    log::debug!("Editing {}", field.label())
                }
                EditEffect::Increment(field) => self.increment_clock(*field).await,
                EditEffect::Exited => log::info!("Clock edit finished"),
            }
        }

        // Runs every poll so a fresh acquisition publish picks up the
        // indicator again within one input period
        self.slot.apply_edit(self.state.indicator());

        outcome
    }

    /// Advance one clock field, one lock per clock access
    ///
    /// An unreadable clock is edited from the last published time, or
    /// from the default time when nothing has been published yet.
    async fn increment_clock(&mut self, field: EditField) {
        let current = {
            let mut clock = self.clock.lock().await;
            clock.now().await
        };

        let current = match current {
            Ok(time) => time,
            Err(e) => {
                log::warn!(
                    "Clock read for edit failed: {:?}",
                    defmt_or_log::Debug2Format(&e)
                );
                self.slot.peek().map(|s| s.timestamp).unwrap_or_default()
            }
        };

        let next = current.increment(field, &self.edit);

        let written = {
            let mut clock = self.clock.lock().await;
            clock.set(&next).await
        };

        match written {
            Ok(()) => log::info!("Clock {} edited", field.label()),
            Err(e) => log::warn!(
                "Clock write for edit failed: {:?}",
                defmt_or_log::Debug2Format(&e)
            ),
        }
    }
}
