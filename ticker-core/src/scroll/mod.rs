//! Scrolling text on a dot-matrix surface

pub mod engine;
pub mod print;

pub use engine::{ScrollEngine, ScrollState, GLYPH_SPACING};
pub use print::print_static;
