//! One-shot static text

use super::engine::GLYPH_SPACING;
use crate::traits::{DisplayError, MatrixSurface};

/// Draw `text` left-aligned from column 0 as a single frame
///
/// Characters past the right edge are dropped.
pub fn print_static<D: MatrixSurface>(surface: &mut D, text: &str) -> Result<(), DisplayError> {
    let columns = i32::from(surface.columns());

    surface.begin_frame();
    let mut column = 0i32;
    for ch in text.chars() {
        if column >= columns {
            break;
        }
        let width = surface.draw_glyph(column, ch);
        column += i32::from(width) + i32::from(GLYPH_SPACING);
    }
    surface.end_frame()
}
