//! Synchronization between the activities
//!
//! Devices shared by more than one activity live behind an async
//! [`Mutex`]; sensor values travel through a [`SnapshotSlot`].

pub mod slot;

pub use slot::{SnapshotReceiver, SnapshotSlot, SLOT_RECEIVERS};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

/// Exclusive handle to a device or cache shared across priorities
pub type Shared<T> = Mutex<CriticalSectionRawMutex, T>;

/// Slot type used across interrupt executors
pub type SharedSlot = SnapshotSlot<CriticalSectionRawMutex>;
