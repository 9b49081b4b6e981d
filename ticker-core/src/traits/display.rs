//! Dot-matrix display traits

/// Errors that can occur while committing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication with the display hardware failed
    Communication,
    /// Display not initialized
    NotInitialized,
}

impl DisplayError {
    /// Operator-facing description
    pub fn message(self) -> &'static str {
        match self {
            DisplayError::Communication => "Display communication failed",
            DisplayError::NotInitialized => "Display not initialized",
        }
    }
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Font metrics for single characters
pub trait GlyphMetrics {
    /// Width of the glyph for `ch` in columns, without inter-glyph spacing
    fn glyph_width(&self, ch: char) -> u8;
}

/// A fixed-height, column-addressed drawing surface
///
/// Column 0 is the left edge of the visible field. Draws happen between
/// [`begin_frame`](MatrixSurface::begin_frame) and
/// [`end_frame`](MatrixSurface::end_frame) so a partially drawn frame is
/// never shown.
pub trait MatrixSurface: GlyphMetrics {
    /// Number of visible columns
    fn columns(&self) -> u16;

    /// Hold display updates and clear the drawing buffer
    fn begin_frame(&mut self);

    /// Draw `ch` with its leftmost column at `column`
    ///
    /// `column` may be negative or past the right edge; the glyph is
    /// clipped to the visible field. Returns the glyph width in columns.
    fn draw_glyph(&mut self, column: i32, ch: char) -> u8;

    /// Show the frame drawn since the last `begin_frame`
    fn end_frame(&mut self) -> Result<(), DisplayError>;
}
