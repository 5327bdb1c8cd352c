//! Board-agnostic core logic for the meteoclock instrument panel
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Data model (snapshot, date/time, edit fields)
//! - Configuration type definitions
//! - Collaborator traits (sensors, clock, display, buttons)
//! - Button debounce and clock edit state machine
//! - Screen layout, line formatting and the render cache
//! - The single-slot snapshot channel
//! - The three periodic activities (acquisition, input, render)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod activity;
pub mod config;
pub mod input;
pub mod model;
pub mod render;
pub mod sync;
pub mod traits;
