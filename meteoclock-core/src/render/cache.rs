//! Last drawn text per region

use super::format::Line;
use super::layout::Region;

/// What a region needs before its new text is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawPlan {
    /// Blank the whole region rectangle first
    pub clear: bool,
    /// Draw the new text
    pub draw: bool,
}

impl RedrawPlan {
    pub const UNCHANGED: Self = Self {
        clear: false,
        draw: false,
    };
}

/// Text currently on screen for each region
///
/// Must only be updated after the text it records has been drawn.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    lines: [Line; Region::COUNT],
}

impl RenderCache {
    pub const fn new() -> Self {
        Self {
            lines: [const { Line::new() }; Region::COUNT],
        }
    }

    /// Text last drawn into `region`
    pub fn get(&self, region: Region) -> &str {
        &self.lines[region.index()]
    }

    /// Decide how to bring `region` from its cached text to `text`
    ///
    /// Glyph cells are opaque, so only text that got strictly shorter
    /// leaves old characters behind and needs a clear.
    pub fn plan(&self, region: Region, text: &str) -> RedrawPlan {
        let previous = self.get(region);
        if previous == text {
            return RedrawPlan::UNCHANGED;
        }

        RedrawPlan {
            clear: text.chars().count() < previous.chars().count(),
            draw: true,
        }
    }

    /// Record that `text` is now on screen in `region`
    pub fn commit(&mut self, region: Region, text: &Line) {
        self.lines[region.index()] = text.clone();
    }

    /// Forget everything, after the whole screen has been blanked
    pub fn invalidate(&mut self) {
        for line in self.lines.iter_mut() {
            line.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Line {
        let mut l = Line::new();
        l.push_str(text).unwrap();
        l
    }

    #[test]
    fn test_empty_cache_draws_without_clear() {
        let cache = RenderCache::new();
        assert_eq!(
            cache.plan(Region::Time, "12:00:00"),
            RedrawPlan {
                clear: false,
                draw: true
            }
        );
    }

    #[test]
    fn test_shorter_text_clears_first() {
        let mut cache = RenderCache::new();
        cache.commit(Region::Pressure, &line("0123456789"));

        let plan = cache.plan(Region::Pressure, "01234");
        assert!(plan.clear);
        assert!(plan.draw);
    }

    #[test]
    fn test_longer_text_no_clear() {
        let mut cache = RenderCache::new();
        cache.commit(Region::Pressure, &line("01234"));

        let plan = cache.plan(Region::Pressure, "0123456789");
        assert!(!plan.clear);
        assert!(plan.draw);
    }

    #[test]
    fn test_same_length_change_no_clear() {
        let mut cache = RenderCache::new();
        cache.commit(Region::Time, &line("12:00:00"));

        let plan = cache.plan(Region::Time, "12:00:01");
        assert!(!plan.clear);
        assert!(plan.draw);
    }

    #[test]
    fn test_unchanged_text_skipped() {
        let mut cache = RenderCache::new();
        cache.commit(Region::Date, &line("2025-03-14"));
        assert_eq!(cache.plan(Region::Date, "2025-03-14"), RedrawPlan::UNCHANGED);
    }

    #[test]
    fn test_regions_independent() {
        let mut cache = RenderCache::new();
        cache.commit(Region::Date, &line("2025-03-14"));
        assert_eq!(cache.get(Region::Time), "");
        assert_eq!(cache.get(Region::Date), "2025-03-14");
    }

    #[test]
    fn test_invalidate() {
        let mut cache = RenderCache::new();
        cache.commit(Region::EditIndicator, &line("EDIT > Year"));
        cache.invalidate();

        // Indicator disappearing after a reset needs no clear
        assert_eq!(cache.get(Region::EditIndicator), "");
        assert_eq!(cache.plan(Region::EditIndicator, ""), RedrawPlan::UNCHANGED);
    }
}
