//! Button polling task (highest priority)

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Instant, Ticker};
use meteoclock_core::activity::InputActivity;

use crate::config::{period, PANEL_CONFIG};
use crate::resources::{PanelButton, RtcClock};

pub type Buttons = InputActivity<'static, CriticalSectionRawMutex, PanelButton, RtcClock>;

/// Sample NAV and SET once per input period
#[embassy_executor::task]
pub async fn input_task(mut activity: Buttons) {
    info!("Input task started");

    let mut ticker = Ticker::every(period(PANEL_CONFIG.timing.input_period_ms));

    loop {
        ticker.next().await;

        activity.poll(Instant::now().as_millis()).await;
    }
}
