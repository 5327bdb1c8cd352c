//! Acquisition activity
//!
//! Reads both sensors and the clock, then publishes a fresh snapshot.

use defmt_or_log as log;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::config::CalibrationConfig;
use crate::model::{BarometricReading, ClimateReading, DateTime, SensorSnapshot};
use crate::sync::SnapshotSlot;
use crate::traits::{BarometricSensor, ClimateSensor, Clock};

/// Periodic sensor and clock sampling
///
/// Owns both sensors. A failed read falls back to the last good value for
/// that device, or to zero readings and the default time before its first
/// success. Every cycle publishes.
pub struct AcquisitionActivity<'a, M: RawMutex, A, B, C> {
    climate: A,
    barometric: B,
    clock: &'a Mutex<M, C>,
    slot: &'a SnapshotSlot<M>,
    calibration: CalibrationConfig,
    last_climate: ClimateReading,
    last_barometric: BarometricReading,
    last_time: DateTime,
}

impl<'a, M, A, B, C> AcquisitionActivity<'a, M, A, B, C>
where
    M: RawMutex,
    A: ClimateSensor,
    B: BarometricSensor,
    C: Clock,
{
    pub fn new(
        climate: A,
        barometric: B,
        clock: &'a Mutex<M, C>,
        slot: &'a SnapshotSlot<M>,
        calibration: CalibrationConfig,
    ) -> Self {
        Self {
            climate,
            barometric,
            clock,
            slot,
            calibration,
            last_climate: ClimateReading::default(),
            last_barometric: BarometricReading::default(),
            last_time: DateTime::default(),
        }
    }

    /// Run one acquisition cycle and return the published snapshot
    pub async fn cycle(&mut self) -> SensorSnapshot {
        match self.climate.read().await {
            Ok(reading) => self.last_climate = reading,
            Err(e) => log::warn!(
                "Climate sensor read failed: {:?}",
                defmt_or_log::Debug2Format(&e)
            ),
        }

        match self.barometric.read().await {
            Ok(reading) => self.last_barometric = reading,
            Err(e) => log::warn!(
                "Barometric sensor read failed: {:?}",
                defmt_or_log::Debug2Format(&e)
            ),
        }

        // Lock held for the single read only
        let now = {
            let mut clock = self.clock.lock().await;
            clock.now().await
        };
        match now {
            Ok(time) => self.last_time = time,
            Err(e) => log::warn!("Clock read failed: {:?}", defmt_or_log::Debug2Format(&e)),
        }

        let snapshot = SensorSnapshot::from_readings(
            self.last_climate,
            self.last_barometric,
            self.last_time,
            &self.calibration,
        );
        self.slot.publish(snapshot);
        log::trace!("Snapshot published");

        snapshot
    }
}
