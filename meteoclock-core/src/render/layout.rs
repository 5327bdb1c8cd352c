//! Screen regions and their fixed rectangles

use crate::config::LayoutConfig;

/// One line of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    AmbientTemperature,
    AmbientHumidity,
    Pressure,
    Weekday,
    Date,
    Time,
    EditIndicator,
}

impl Region {
    /// Number of regions
    pub const COUNT: usize = 7;

    /// All regions, top to bottom
    pub const ALL: [Region; Region::COUNT] = [
        Region::AmbientTemperature,
        Region::AmbientHumidity,
        Region::Pressure,
        Region::Weekday,
        Region::Date,
        Region::Time,
        Region::EditIndicator,
    ];

    /// Line number from the top of the panel
    pub fn index(&self) -> usize {
        match self {
            Region::AmbientTemperature => 0,
            Region::AmbientHumidity => 1,
            Region::Pressure => 2,
            Region::Weekday => 3,
            Region::Date => 4,
            Region::Time => 5,
            Region::EditIndicator => 6,
        }
    }
}

/// Pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegionRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Fixed placement of every region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLayout {
    config: LayoutConfig,
}

impl RenderLayout {
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Rectangle a region's text is drawn into and blanked from
    ///
    /// Every region is `columns` glyph cells wide and one cell high.
    pub fn rect(&self, region: Region) -> RegionRect {
        let c = &self.config;
        let line = region.index() as u16;

        RegionRect {
            x: c.origin_x,
            y: c.origin_y.saturating_add(line.saturating_mul(c.line_pitch)),
            width: c.columns.saturating_mul(c.cell_width),
            height: c.cell_height,
        }
    }

    /// Widest text, in characters, that fits a region
    pub fn max_chars(&self) -> usize {
        usize::from(self.config.columns)
    }
}

impl Default for RenderLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_all_order() {
        for (i, region) in Region::ALL.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
    }

    #[test]
    fn test_default_rects() {
        let layout = RenderLayout::default();

        assert_eq!(
            layout.rect(Region::AmbientTemperature),
            RegionRect {
                x: 8,
                y: 8,
                width: 240,
                height: 20
            }
        );
        assert_eq!(layout.rect(Region::EditIndicator).y, 8 + 6 * 30);
    }

    #[test]
    fn test_regions_do_not_overlap() {
        let layout = RenderLayout::default();
        for pair in Region::ALL.windows(2) {
            let upper = layout.rect(pair[0]);
            let lower = layout.rect(pair[1]);
            assert!(upper.y + upper.height <= lower.y);
        }
    }

    #[test]
    fn test_default_fits_landscape_panel() {
        // 320x240 panel in landscape
        let layout = RenderLayout::default();
        for region in Region::ALL {
            let r = layout.rect(region);
            assert!(r.x + r.width <= 320);
            assert!(r.y + r.height <= 240);
        }
    }
}
