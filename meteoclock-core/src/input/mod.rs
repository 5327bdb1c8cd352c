//! Button handling for clock editing
//!
//! Two buttons drive the editor: NAV opens edit mode and moves between
//! fields, SET opens edit mode and increments the selected field.
//! Everything here is pure logic over millisecond timestamps so it can be
//! tested without a scheduler.

pub mod debounce;
pub mod edit;

pub use debounce::{debounce, Debouncer};
pub use edit::{ButtonSample, EditEffect, EditEvent, EditMode, EditOutcome, EditState};
