//! Render activity
//!
//! Draws the latest snapshot, touching only regions whose text changed.

use defmt_or_log as log;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::model::SensorSnapshot;
use crate::render::{fit_line, format_region, Line, Region, RenderCache, RenderLayout};
use crate::sync::SnapshotReceiver;
use crate::traits::{Color, DisplayError, TextDisplay};

/// Display redraw against the render cache
///
/// Lock order is always display, then cache.
pub struct RenderActivity<'a, M: RawMutex, D> {
    display: &'a Mutex<M, D>,
    cache: &'a Mutex<M, RenderCache>,
    layout: RenderLayout,
}

impl<'a, M, D> RenderActivity<'a, M, D>
where
    M: RawMutex,
    D: TextDisplay,
{
    pub fn new(
        display: &'a Mutex<M, D>,
        cache: &'a Mutex<M, RenderCache>,
        layout: RenderLayout,
    ) -> Self {
        Self {
            display,
            cache,
            layout,
        }
    }

    /// Blank the whole screen and forget what was drawn
    pub async fn reset_screen(&mut self) -> Result<(), DisplayError> {
        let mut display = self.display.lock().await;
        let mut cache = self.cache.lock().await;

        display.clear(Color::Background)?;
        cache.invalidate();
        Ok(())
    }

    /// Wait for a snapshot and draw it
    pub async fn cycle(
        &mut self,
        receiver: &mut SnapshotReceiver<'_, M>,
    ) -> Result<usize, DisplayError> {
        let snapshot = receiver.latest().await;
        self.pass(&snapshot).await
    }

    /// One redraw pass over every region
    ///
    /// Returns the number of regions redrawn. On a display error the pass
    /// stops and the cache keeps describing what actually reached the
    /// screen.
    pub async fn pass(&mut self, snapshot: &SensorSnapshot) -> Result<usize, DisplayError> {
        let mut display = self.display.lock().await;
        let mut cache = self.cache.lock().await;
        let mut redrawn = 0;

        for region in Region::ALL {
            let text = fit_line(format_region(region, snapshot), self.layout.max_chars());
            let plan = cache.plan(region, &text);
            if !plan.draw {
                continue;
            }

            let rect = self.layout.rect(region);

            if plan.clear {
                log::trace!("Clearing region {}", region.index());
                display.fill_rect(rect.x, rect.y, rect.width, rect.height, Color::Background)?;
                cache.commit(region, &Line::new());
            }

            display
                .draw_text(rect.x, rect.y, &text, color_for(region))
                .map_err(|e| {
                    log::warn!("Draw failed: {:?}", e);
                    e
                })?;
            cache.commit(region, &text);
            redrawn += 1;
        }

        log::trace!("Redrew {} regions", redrawn);
        Ok(redrawn)
    }
}

fn color_for(region: Region) -> Color {
    match region {
        Region::EditIndicator => Color::Accent,
        _ => Color::Foreground,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::mock::{DisplayOp, MockDisplay};
    use crate::config::LayoutConfig;
    use crate::model::{DateTime, EditField, EditIndicator};
    use crate::sync::SnapshotSlot;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    struct Fixture {
        display: Mutex<NoopRawMutex, MockDisplay>,
        cache: Mutex<NoopRawMutex, RenderCache>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                display: Mutex::new(MockDisplay::default()),
                cache: Mutex::new(RenderCache::new()),
            }
        }

        fn activity(&self) -> RenderActivity<'_, NoopRawMutex, MockDisplay> {
            RenderActivity::new(&self.display, &self.cache, RenderLayout::default())
        }

        fn take_ops(&self) -> MockDisplay {
            core::mem::take(&mut *self.display.try_lock().unwrap())
        }
    }

    fn snapshot() -> SensorSnapshot {
        SensorSnapshot {
            ambient_temperature: 21.5,
            ambient_humidity: 40.25,
            aux_temperature: 22.0,
            pressure_hpa: 1013.25,
            timestamp: DateTime::new(2025, 3, 14, 12, 0, 0),
            edit: EditIndicator::IDLE,
        }
    }

    #[test]
    fn test_first_pass_draws_every_nonempty_region() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();

        // Idle indicator is empty text, same as the empty cache
        assert_eq!(block_on(render.pass(&snapshot())), Ok(6));

        let display = fixture.take_ops();
        assert_eq!(display.fills(), 0);
        assert_eq!(
            display.texts(),
            vec![
                "Temp: 21.50 C",
                "Humidity: 40.25 %",
                "Pressure: 1013.25 hPa",
                "Friday",
                "2025-03-14",
                "12:00:00"
            ]
        );
    }

    #[test]
    fn test_unchanged_snapshot_draws_nothing() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();
        block_on(render.pass(&snapshot())).unwrap();
        fixture.take_ops();

        assert_eq!(block_on(render.pass(&snapshot())), Ok(0));
        assert!(fixture.take_ops().ops.is_empty());
    }

    #[test]
    fn test_shrinking_text_cleared_once() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();

        let mut s = snapshot();
        s.pressure_hpa = 1013.25;
        block_on(render.pass(&s)).unwrap();
        fixture.take_ops();

        s.pressure_hpa = 998.5;
        assert_eq!(block_on(render.pass(&s)), Ok(1));

        let rect = RenderLayout::default().rect(Region::Pressure);
        let display = fixture.take_ops();
        assert_eq!(
            display.ops,
            vec![
                DisplayOp::Fill {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    color: Color::Background,
                },
                DisplayOp::Text {
                    x: rect.x,
                    y: rect.y,
                    text: "Pressure: 998.50 hPa".into(),
                    color: Color::Foreground,
                },
            ]
        );
    }

    #[test]
    fn test_growing_text_not_cleared() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();

        let mut s = snapshot();
        s.pressure_hpa = 998.5;
        block_on(render.pass(&s)).unwrap();
        fixture.take_ops();

        s.pressure_hpa = 1013.25;
        block_on(render.pass(&s)).unwrap();
        let display = fixture.take_ops();
        assert_eq!(display.fills(), 0);
        assert_eq!(display.texts(), vec!["Pressure: 1013.25 hPa"]);
    }

    #[test]
    fn test_edit_indicator_drawn_and_erased() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();

        let editing = snapshot().with_edit(EditIndicator::editing(EditField::Hour));
        block_on(render.pass(&editing)).unwrap();
        let display = fixture.take_ops();
        assert!(display.ops.contains(&DisplayOp::Text {
            x: 8,
            y: 8 + 6 * 30,
            text: "EDIT > Hour".into(),
            color: Color::Accent,
        }));

        block_on(render.pass(&snapshot())).unwrap();
        let display = fixture.take_ops();
        assert_eq!(display.fills(), 1);
        assert_eq!(
            fixture.cache.try_lock().unwrap().get(Region::EditIndicator),
            ""
        );
    }

    #[test]
    fn test_reset_screen_clears_and_invalidates() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();
        block_on(render.pass(&snapshot())).unwrap();
        fixture.take_ops();

        block_on(render.reset_screen()).unwrap();
        assert_eq!(
            fixture.take_ops().ops,
            vec![DisplayOp::Clear(Color::Background)]
        );

        // Everything is drawn again after a reset
        assert_eq!(block_on(render.pass(&snapshot())), Ok(6));
    }

    #[test]
    fn test_oversized_reading_stays_inside_region() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();
        let layout = RenderLayout::default();
        let rect = layout.rect(Region::AmbientTemperature);
        let cell_width = LayoutConfig::DEFAULT.cell_width;

        let mut s = snapshot();
        s.ambient_temperature = 1e20;
        block_on(render.pass(&s)).unwrap();
        s.ambient_temperature = 21.5;
        block_on(render.pass(&s)).unwrap();

        let display = fixture.take_ops();
        for op in &display.ops {
            if let DisplayOp::Text { text, .. } = op {
                let drawn_px = text.chars().count() as u16 * cell_width;
                assert!(drawn_px <= rect.width, "{text:?} is wider than its region");
            }
        }
        assert_eq!(display.fills(), 1);
        assert_eq!(
            fixture.cache.try_lock().unwrap().get(Region::AmbientTemperature),
            "Temp: 21.50 C"
        );
    }

    #[test]
    fn test_failed_draw_leaves_cache_consistent() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();
        fixture.display.try_lock().unwrap().fail = true;

        assert_eq!(
            block_on(render.pass(&snapshot())),
            Err(DisplayError::Communication)
        );
        assert_eq!(
            fixture.cache.try_lock().unwrap().get(Region::AmbientTemperature),
            ""
        );
    }

    #[test]
    fn test_cycle_reads_latest() {
        let fixture = Fixture::new();
        let mut render = fixture.activity();
        let slot = SnapshotSlot::<NoopRawMutex>::new();
        let mut receiver = slot.receiver().unwrap();

        let mut older = snapshot();
        older.ambient_temperature = 5.0;
        slot.publish(older);
        slot.publish(snapshot());

        block_on(render.cycle(&mut receiver)).unwrap();
        assert_eq!(fixture.take_ops().texts()[0], "Temp: 21.50 C");
    }
}
