//! Screen refresh task (lowest priority, thread mode)

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Ticker;
use meteoclock_core::activity::RenderActivity;
use meteoclock_core::sync::SnapshotReceiver;

use crate::config::{period, PANEL_CONFIG};
use crate::resources::Panel;

pub type Render = RenderActivity<'static, CriticalSectionRawMutex, Panel>;

/// Redraw changed regions once per render period
///
/// The first pass waits until acquisition has published a snapshot.
#[embassy_executor::task]
pub async fn render_task(
    mut activity: Render,
    mut receiver: SnapshotReceiver<'static, CriticalSectionRawMutex>,
) {
    info!("Render task started");

    let mut ticker = Ticker::every(period(PANEL_CONFIG.timing.render_period_ms));

    loop {
        match activity.cycle(&mut receiver).await {
            Ok(0) => {}
            Ok(redrawn) => trace!("Redrew {} regions", redrawn),
            // Retried next period
            Err(e) => warn!("Render pass failed: {}", e),
        }

        ticker.next().await;
    }
}
