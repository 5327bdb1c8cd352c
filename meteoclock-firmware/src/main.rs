//! Meteoclock - Instrument Panel Firmware
//!
//! RP2040 firmware for a small weather station and clock: AHT20 and BMP280
//! readings plus DS3231 time on an ILI9341 panel, with two buttons to set
//! the clock.
//!
//! Three executors give the periodic tasks their priorities:
//! - input on `SWI_IRQ_1` (highest)
//! - acquisition on `SWI_IRQ_0`
//! - boot and render in thread mode (lowest)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::Spi;
use embassy_sync::mutex::Mutex;
use meteoclock_drivers::input::ActiveLowButton;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::resources::{BACKLIGHT, DISPLAY, I2C_BUS};

mod config;
mod display;
mod resources;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// I2C clock for the sensor bus
const I2C_FREQUENCY_HZ: u32 = 400_000;

static EXECUTOR_INPUT: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_ACQUISITION: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_RENDER: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_INPUT.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_ACQUISITION.on_interrupt()
}

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Meteoclock firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Backlight stays on for the life of the firmware
    BACKLIGHT.init(Output::new(p.PIN_22, Level::High));

    // Display: SPI0 (SCK=GPIO18, MOSI=GPIO19), CS=GPIO17, DC=GPIO20, RST=GPIO21
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display::spi_config());
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::High);

    let panel = match display::init_panel(spi, cs, dc, rst) {
        Ok(panel) => panel,
        Err(e) => {
            error!("{}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };
    let display = DISPLAY.init(Mutex::new(panel));
    info!("Display initialized");

    // Sensor bus: I2C0 (SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    // Buttons pull to ground when pressed
    let nav = ActiveLowButton::new(Input::new(p.PIN_14, Pull::Up));
    let set = ActiveLowButton::new(Input::new(p.PIN_15, Pull::Up));

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let input_spawner = EXECUTOR_INPUT.start(interrupt::SWI_IRQ_1);

    interrupt::SWI_IRQ_0.set_priority(Priority::P3);
    let acquisition_spawner = EXECUTOR_ACQUISITION.start(interrupt::SWI_IRQ_0);

    let board = tasks::Board {
        i2c_bus,
        display,
        nav,
        set,
    };

    let executor = EXECUTOR_RENDER.init(Executor::new());
    executor.run(|spawner| {
        spawner
            .spawn(tasks::boot_task(
                board,
                spawner,
                input_spawner,
                acquisition_spawner,
            ))
            .unwrap();
    })
}
