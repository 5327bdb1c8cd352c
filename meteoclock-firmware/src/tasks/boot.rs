//! Startup sequence
//!
//! Clears the screen, then probes the AHT20, the BMP280 and the DS3231 in
//! that order. A device that does not answer is reported on screen and
//! boot stops there, so no periodic task ever runs with a missing device.

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::{SendSpawner, Spawner};
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use meteoclock_core::activity::{AcquisitionActivity, InputActivity, RenderActivity};
use meteoclock_core::model::DateTime;
use meteoclock_core::render::RenderLayout;
use meteoclock_core::sync::Shared;
use meteoclock_core::traits::{Clock, Color, TextDisplay};
use meteoclock_drivers::rtc::Ds3231;
use meteoclock_drivers::sensor::{Aht20, Bmp280, BMP280_ADDRESS};

use super::{acquisition_task, input_task, render_task};
use crate::config::PANEL_CONFIG;
use crate::resources::{I2cBus, Panel, PanelButton, CLOCK, RENDER_CACHE, SNAPSHOT};

/// Peripherals handed from `main` to the boot task
pub struct Board {
    pub i2c_bus: &'static I2cBus,
    pub display: &'static Shared<Panel>,
    pub nav: PanelButton,
    pub set: PanelButton,
}

#[embassy_executor::task]
pub async fn boot_task(
    board: Board,
    spawner: Spawner,
    input_spawner: SendSpawner,
    acquisition_spawner: SendSpawner,
) {
    let Board {
        i2c_bus,
        display,
        nav,
        set,
    } = board;

    if !display.lock().await.fits(&PANEL_CONFIG.layout) {
        warn!("Layout cell size does not match the panel font");
    }

    let mut render = RenderActivity::new(
        display,
        &RENDER_CACHE,
        RenderLayout::new(PANEL_CONFIG.layout),
    );
    if let Err(e) = render.reset_screen().await {
        error!("Display clear failed: {}", e);
    }

    let climate = match Aht20::init(I2cDevice::new(i2c_bus), Delay).await {
        Ok(climate) => climate,
        Err(e) => {
            error!("AHT20 init failed: {}", Debug2Format(&e));
            halt(display, "AHT20 not found!").await;
        }
    };
    info!("AHT20 found");

    let mut barometer = Bmp280::new(I2cDevice::new(i2c_bus), Delay, BMP280_ADDRESS);
    if let Err(e) = barometer.init().await {
        error!("BMP280 init failed: {}", Debug2Format(&e));
        halt(display, "BMP280 not found!").await;
    }
    info!("BMP280 found");

    let mut rtc = Ds3231::new(I2cDevice::new(i2c_bus));
    match rtc.init().await {
        Ok(false) => info!("DS3231 found"),
        Ok(true) => {
            // Lost power; start from a valid time the user can edit
            let start = DateTime::new(PANEL_CONFIG.edit.year_min, 1, 1, 0, 0, 0);
            if let Err(e) = rtc.set(&start).await {
                error!("DS3231 set failed: {}", Debug2Format(&e));
                halt(display, "RTC not found!").await;
            }
            info!("DS3231 found, time reset");
        }
        Err(e) => {
            error!("DS3231 init failed: {}", Debug2Format(&e));
            halt(display, "RTC not found!").await;
        }
    }
    let clock: &'static Shared<_> = CLOCK.init(Mutex::new(rtc));

    let Some(receiver) = SNAPSHOT.receiver() else {
        error!("No snapshot receiver left");
        halt(display, "Boot failed!").await;
    };

    let buttons = InputActivity::new(
        nav,
        set,
        clock,
        &SNAPSHOT,
        PANEL_CONFIG.timing,
        PANEL_CONFIG.edit,
    );
    let acquisition = AcquisitionActivity::new(
        climate,
        barometer,
        clock,
        &SNAPSHOT,
        PANEL_CONFIG.calibration,
    );

    input_spawner.spawn(input_task(buttons)).unwrap();
    acquisition_spawner.spawn(acquisition_task(acquisition)).unwrap();
    spawner.spawn(render_task(render, receiver)).unwrap();

    info!("Meteoclock running");
}

/// Show a startup failure and stop
async fn halt(display: &'static Shared<Panel>, message: &str) -> ! {
    {
        let layout = PANEL_CONFIG.layout;
        let mut display = display.lock().await;
        let drawn = display.draw_text(
            layout.origin_x,
            layout.origin_y,
            message,
            Color::Foreground,
        );
        if let Err(e) = drawn {
            error!("Could not show startup error: {}", e);
        }
    }

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
