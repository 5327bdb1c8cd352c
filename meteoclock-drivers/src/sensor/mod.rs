//! Sensor drivers

pub mod aht20;
pub mod bmp280;

pub use aht20::{Aht20, Aht20Error, AHT20_ADDRESS};
pub use bmp280::{Bmp280, Bmp280Error, Sampling, BMP280_ADDRESS, BMP280_ADDRESS_ALT};
