//! Text display on top of embedded-graphics
//!
//! Wraps any RGB565 [`DrawTarget`] (an ILI9341 driven by mipidsi on the
//! panel, a mock display in tests). Text is drawn with a monospace font and
//! a background color, so every glyph cell is fully overwritten.

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use meteoclock_core::config::LayoutConfig;
use meteoclock_core::traits::{Color, DisplayError, TextDisplay};

/// Mapping from logical colors to panel colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    background: Rgb565,
    foreground: Rgb565,
    accent: Rgb565,
}

impl Palette {
    fn resolve(&self, color: Color) -> Rgb565 {
        match color {
            Color::Background => self.background,
            Color::Foreground => self.foreground,
            Color::Accent => self.accent,
        }
    }
}

impl Default for Palette {
    /// White on black with a yellow accent
    fn default() -> Self {
        Self {
            background: Rgb565::BLACK,
            foreground: Rgb565::WHITE,
            accent: Rgb565::YELLOW,
        }
    }
}

/// [`TextDisplay`] over an embedded-graphics draw target
pub struct GraphicsPanel<D> {
    target: D,
    font: &'static MonoFont<'static>,
    palette: Palette,
}

impl<D> GraphicsPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Panel using the 10x20 font and default palette
    pub fn new(target: D) -> Self {
        Self {
            target,
            font: &FONT_10X20,
            palette: Palette::default(),
        }
    }

    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    /// Glyph cell size in pixels, including character spacing
    pub fn cell_size(&self) -> (u16, u16) {
        let size = self.font.character_size;
        (
            (size.width + self.font.character_spacing) as u16,
            size.height as u16,
        )
    }

    /// Whether a layout's cell size matches the font
    pub fn fits(&self, layout: &LayoutConfig) -> bool {
        self.cell_size() == (layout.cell_width, layout.cell_height)
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }
}

impl<D> TextDisplay for GraphicsPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        let color = self.palette.resolve(color);
        self.target
            .clear(color)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let area = Rectangle::new(
            Point::new(i32::from(x), i32::from(y)),
            Size::new(u32::from(width), u32::from(height)),
        );
        if area.intersection(&self.target.bounding_box()) != area {
            return Err(DisplayError::InvalidCoordinates);
        }

        let color = self.palette.resolve(color);
        self.target
            .fill_solid(&area, color)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color) -> Result<(), DisplayError> {
        let style = MonoTextStyleBuilder::new()
            .font(self.font)
            .text_color(self.palette.resolve(color))
            .background_color(self.palette.background)
            .build();

        Text::with_baseline(
            text,
            Point::new(i32::from(x), i32::from(y)),
            style,
            Baseline::Top,
        )
        .draw(&mut self.target)
        .map(|_| ())
        .map_err(|_| DisplayError::Communication)
    }
}
