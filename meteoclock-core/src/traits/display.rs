//! Display driver trait

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display controller
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
}

/// Logical colors; the driver maps them onto its own pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Screen background, also used to blank regions
    Background,
    /// Regular text
    Foreground,
    /// Highlighted text (edit indicator)
    Accent,
}

/// Pixel/text display
///
/// Text is drawn in opaque glyph cells: each character overwrites its full
/// cell including background, so redrawing a line of equal or greater
/// length leaves no remnants of the previous text.
pub trait TextDisplay {
    /// Fill the entire screen with one color
    fn clear(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Fill a rectangle
    ///
    /// - `x`, `y`: top-left corner in pixels
    /// - `width`, `height`: size in pixels
    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color) -> Result<(), DisplayError>;
}
