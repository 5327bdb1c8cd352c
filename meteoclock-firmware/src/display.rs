//! ILI9341 bring-up
//!
//! SPI0 runs blocking at 40 MHz; the panel is used in landscape.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use meteoclock_drivers::display::GraphicsPanel;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::{ColorOrder, Orientation, Rotation};

use crate::resources::{Panel, SPI_BUFFER};

/// SPI clock for the panel
pub const SPI_FREQUENCY_HZ: u32 = 40_000_000;

pub fn spi_config() -> spi::Config {
    let mut config = spi::Config::default();
    config.frequency = SPI_FREQUENCY_HZ;
    config
}

/// Reset and initialize the panel
pub fn init_panel(
    spi: Spi<'static, SPI0, spi::Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
) -> Result<Panel, &'static str> {
    let spi_device =
        ExclusiveDevice::new(spi, cs, Delay).map_err(|_| "Failed to create SPI device")?;

    let buffer = SPI_BUFFER.init([0u8; 512]);
    let di = SpiInterface::new(spi_device, dc, buffer);

    let display = mipidsi::Builder::new(ILI9341Rgb565, di)
        .reset_pin(rst)
        .display_size(240, 320)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .color_order(ColorOrder::Bgr)
        .init(&mut Delay)
        .map_err(|_| "Failed to initialize display")?;

    Ok(GraphicsPanel::new(display))
}
