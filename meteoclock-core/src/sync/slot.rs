//! Single-slot snapshot channel
//!
//! Publishing replaces whatever is in the slot, read or not. Readers never
//! remove the value; each receiver tracks which publish it last saw.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::watch::{Receiver, Watch};

use crate::model::{EditIndicator, SensorSnapshot};

/// Maximum number of concurrent receivers
pub const SLOT_RECEIVERS: usize = 2;

/// Latest-wins slot holding at most one [`SensorSnapshot`]
pub struct SnapshotSlot<M: RawMutex> {
    watch: Watch<M, SensorSnapshot, SLOT_RECEIVERS>,
}

impl<M: RawMutex> SnapshotSlot<M> {
    pub const fn new() -> Self {
        Self {
            watch: Watch::new(),
        }
    }

    /// Overwrite the slot; never blocks
    pub fn publish(&self, snapshot: SensorSnapshot) {
        self.watch.sender().send(snapshot);
    }

    /// Copy of the current value without consuming it
    pub fn peek(&self) -> Option<SensorSnapshot> {
        self.watch.anon_receiver().try_get()
    }

    /// Replace only the edit indicator of the value in the slot
    ///
    /// Runs as one locked step so sensor fields are never torn. Does
    /// nothing if the slot is empty. Returns `true` if the indicator
    /// changed, in which case receivers see the value as fresh again.
    pub fn apply_edit(&self, edit: EditIndicator) -> bool {
        let changed = Cell::new(false);

        self.watch.sender().send_if_modified(|value| match value {
            Some(snapshot) if snapshot.edit != edit => {
                snapshot.edit = edit;
                changed.set(true);
                true
            }
            _ => false,
        });

        changed.get()
    }

    /// Register a receiver, `None` once all receiver slots are taken
    pub fn receiver(&self) -> Option<SnapshotReceiver<'_, M>> {
        self.watch
            .receiver()
            .map(|inner| SnapshotReceiver { inner })
    }
}

impl<M: RawMutex> Default for SnapshotSlot<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reading end of a [`SnapshotSlot`]
pub struct SnapshotReceiver<'a, M: RawMutex> {
    inner: Receiver<'a, M, SensorSnapshot, SLOT_RECEIVERS>,
}

impl<M: RawMutex> SnapshotReceiver<'_, M> {
    /// Current value, waiting only while the slot has never been filled
    pub async fn latest(&mut self) -> SensorSnapshot {
        self.inner.get().await
    }

    /// Unseen value if there is one; each publish is returned at most once
    pub fn try_fresh(&mut self) -> Option<SensorSnapshot> {
        self.inner.try_changed()
    }
}
