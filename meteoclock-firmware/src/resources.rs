//! Board resources shared between tasks
//!
//! Everything that more than one task touches lives here as a `static`:
//! the I2C bus, the clock (sensor reads and clock edits), the display and
//! render cache, and the snapshot slot.

use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, SPI0};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use meteoclock_core::render::RenderCache;
use meteoclock_core::sync::{Shared, SharedSlot, SnapshotSlot};
use meteoclock_drivers::display::GraphicsPanel;
use meteoclock_drivers::input::ActiveLowButton;
use meteoclock_drivers::rtc::Ds3231;
use meteoclock_drivers::sensor::{Aht20, Bmp280};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use static_cell::StaticCell;

/// I2C0, shared by the AHT20, BMP280 and DS3231
pub type I2cBus = Mutex<CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>;

/// One device's handle on the shared I2C bus
pub type BusDevice = I2cDevice<'static, CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>;

pub type Climate = Aht20<BusDevice, Delay>;
pub type Barometer = Bmp280<BusDevice, Delay>;
pub type RtcClock = Ds3231<BusDevice>;
pub type PanelButton = ActiveLowButton<Input<'static>>;

type PanelSpi = ExclusiveDevice<Spi<'static, SPI0, spi::Blocking>, Output<'static>, Delay>;

/// ILI9341 over SPI0
pub type PanelDisplay = mipidsi::Display<
    SpiInterface<'static, PanelSpi, Output<'static>>,
    ILI9341Rgb565,
    Output<'static>,
>;

pub type Panel = GraphicsPanel<PanelDisplay>;

pub static I2C_BUS: StaticCell<I2cBus> = StaticCell::new();
pub static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();
pub static BACKLIGHT: StaticCell<Output<'static>> = StaticCell::new();

pub static CLOCK: StaticCell<Shared<RtcClock>> = StaticCell::new();
pub static DISPLAY: StaticCell<Shared<Panel>> = StaticCell::new();

/// What is currently on screen, per region
pub static RENDER_CACHE: Shared<RenderCache> = Mutex::new(RenderCache::new());

/// Latest snapshot, written by acquisition and input, read by render
pub static SNAPSHOT: SharedSlot = SnapshotSlot::new();
