//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in meteoclock-core for the panel's hardware:
//!
//! - Climate sensor (AHT20, temperature and humidity)
//! - Barometric sensor (BMP280, temperature and pressure)
//! - Real-time clock (DS3231)
//! - Text display over any embedded-graphics RGB565 target
//! - Active-low push buttons

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod input;
pub mod rtc;
pub mod sensor;

#[cfg(test)]
mod mock;
