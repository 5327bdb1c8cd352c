//! Sensor and clock acquisition task (medium priority)

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Ticker;
use meteoclock_core::activity::AcquisitionActivity;

use crate::config::{period, PANEL_CONFIG};
use crate::resources::{Barometer, Climate, RtcClock};

pub type Acquisition =
    AcquisitionActivity<'static, CriticalSectionRawMutex, Climate, Barometer, RtcClock>;

/// Read both sensors and the clock once per acquisition period
#[embassy_executor::task]
pub async fn acquisition_task(mut activity: Acquisition) {
    info!("Acquisition task started");

    let mut ticker = Ticker::every(period(PANEL_CONFIG.timing.acquisition_period_ms));

    loop {
        let snapshot = activity.cycle().await;
        trace!(
            "Published {} C {} % {} hPa",
            snapshot.ambient_temperature,
            snapshot.ambient_humidity,
            snapshot.pressure_hpa
        );

        ticker.next().await;
    }
}
