//! Horizontal scroll state machine
//!
//! The visible window is described by the first character drawn and the
//! column that character starts at. Every shift redraws the window and then
//! moves it one column left; once the first character has fully left the
//! field the window starts at the next one. When the text runs out the
//! engine resets and the text enters again from the right edge.

use crate::time::{Deadline, Instant};
use crate::traits::{DisplayError, MatrixSurface};

/// Blank columns between adjacent glyphs
pub const GLYPH_SPACING: u8 = 1;

/// Scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    /// Index of the first character in the window
    pub char_index: usize,
    /// Column that character starts at; positive while entering from the
    /// right, negative while leaving on the left
    pub column_offset: i32,
    /// When the next shift may happen
    pub next_shift: Deadline,
}

/// Scrolls one line of text across a [`MatrixSurface`]
pub struct ScrollEngine {
    state: ScrollState,
    columns: u16,
    period_ms: u32,
}

impl ScrollEngine {
    /// Create an engine for a field `columns` wide
    pub fn new(columns: u16, period_ms: u32) -> Self {
        Self {
            state: Self::initial_state(columns),
            columns,
            period_ms: period_ms.max(1),
        }
    }

    /// Create an engine sized to `surface`
    pub fn for_surface<D: MatrixSurface>(surface: &D, period_ms: u32) -> Self {
        Self::new(surface.columns(), period_ms)
    }

    fn initial_state(columns: u16) -> ScrollState {
        ScrollState {
            char_index: 0,
            column_offset: i32::from(columns),
            next_shift: Deadline::Due,
        }
    }

    /// Current scroll position
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Time between one-column shifts
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Change the shift period, taking effect after the next shift
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms.max(1);
    }

    /// Start over with the text entering from the right edge
    ///
    /// The next tick shifts immediately.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(self.columns);
    }

    /// Redraw and shift one column if the shift deadline has passed
    ///
    /// Returns `Ok(true)` if a frame was drawn. Before the deadline, or with
    /// empty text, nothing is touched. If the frame cannot be shown the
    /// position is left where it was.
    pub fn tick<D: MatrixSurface>(
        &mut self,
        now: Instant,
        text: &str,
        surface: &mut D,
    ) -> Result<bool, DisplayError> {
        if text.is_empty() || !self.state.next_shift.is_due(now) {
            return Ok(false);
        }
        self.state.next_shift = Deadline::after(now, self.period_ms);

        let len = text.chars().count();
        if self.state.char_index >= len {
            // Text shrank since the last shift
            self.restart_window();
        }

        surface.begin_frame();
        let mut column = self.state.column_offset;
        for ch in text.chars().skip(self.state.char_index) {
            if column >= i32::from(self.columns) {
                break;
            }
            let width = surface.draw_glyph(column, ch);
            column += i32::from(width) + i32::from(GLYPH_SPACING);
        }
        surface.end_frame()?;

        self.state.column_offset -= 1;

        let Some(current) = text.chars().nth(self.state.char_index) else {
            self.restart_window();
            return Ok(true);
        };
        let span = i32::from(surface.glyph_width(current)) + i32::from(GLYPH_SPACING);
        if self.state.column_offset < -span {
            self.state.char_index += 1;
            self.state.column_offset = 0;
        }

        if self.state.char_index >= len {
            trace!("Scroll text exhausted, restarting");
            self.reset();
        }

        Ok(true)
    }

    /// Move the window back to the start of the text without touching the
    /// shift deadline
    fn restart_window(&mut self) {
        self.state.char_index = 0;
        self.state.column_offset = i32::from(self.columns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::GlyphMetrics;
    use std::vec::Vec;

    /// Surface with fixed-width glyphs that records each committed frame
    struct MockSurface {
        columns: u16,
        width: u8,
        pending: Vec<(i32, char)>,
        frames: Vec<Vec<(i32, char)>>,
        fail: bool,
    }

    impl MockSurface {
        fn new(columns: u16, width: u8) -> Self {
            Self {
                columns,
                width,
                pending: Vec::new(),
                frames: Vec::new(),
                fail: false,
            }
        }
    }

    impl GlyphMetrics for MockSurface {
        fn glyph_width(&self, _ch: char) -> u8 {
            self.width
        }
    }

    impl MatrixSurface for MockSurface {
        fn columns(&self) -> u16 {
            self.columns
        }

        fn begin_frame(&mut self) {
            self.pending.clear();
        }

        fn draw_glyph(&mut self, column: i32, ch: char) -> u8 {
            self.pending.push((column, ch));
            self.width
        }

        fn end_frame(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.frames.push(core::mem::take(&mut self.pending));
            Ok(())
        }
    }

    fn at(ms: u32) -> Instant {
        Instant::from_millis(ms)
    }

    /// Force `count` shifts
    fn run(engine: &mut ScrollEngine, surface: &mut MockSurface, text: &str, count: u32) {
        for i in 0..count {
            engine.state.next_shift = Deadline::Due;
            assert!(engine.tick(at(i * 10), text, surface).unwrap());
        }
    }

    #[test]
    fn test_initial_state_enters_from_right() {
        let surface = MockSurface::new(3, 2);
        let engine = ScrollEngine::for_surface(&surface, 10);
        let state = engine.state();
        assert_eq!(state.char_index, 0);
        assert_eq!(state.column_offset, 3);
        assert_eq!(state.next_shift, Deadline::Due);
    }

    #[test]
    fn test_first_glyph_scrolls_past() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 10);

        run(&mut engine, &mut surface, "AB", 6);
        assert_eq!(engine.state().char_index, 0);
        assert_eq!(engine.state().column_offset, -3);

        engine.tick(at(60), "AB", &mut surface).unwrap();
        assert_eq!(engine.state().char_index, 1);
        assert_eq!(engine.state().column_offset, 0);
    }

    #[test]
    fn test_exhausted_text_resets() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 10);

        run(&mut engine, &mut surface, "AB", 11);
        let state = engine.state();
        assert_eq!(state.char_index, 0);
        assert_eq!(state.column_offset, 3);
        assert_eq!(state.next_shift, Deadline::Due);
    }

    #[test]
    fn test_frames_follow_offset() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 10);

        run(&mut engine, &mut surface, "AB", 3);
        // Offset 3 draws nothing visible, 2 draws A, 1 draws A
        assert!(surface.frames[0].is_empty());
        assert_eq!(surface.frames[1], [(2, 'A')]);
        assert_eq!(surface.frames[2], [(1, 'A')]);

        run(&mut engine, &mut surface, "AB", 2);
        assert_eq!(surface.frames[4], [(-1, 'A'), (2, 'B')]);
    }

    #[test]
    fn test_tick_before_deadline_is_noop() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 30);
        engine.tick(at(100), "AB", &mut surface).unwrap();

        let before = engine.state();
        let frames = surface.frames.len();
        assert!(!engine.tick(at(129), "AB", &mut surface).unwrap());
        assert_eq!(engine.state(), before);
        assert_eq!(surface.frames.len(), frames);

        assert!(engine.tick(at(130), "AB", &mut surface).unwrap());
    }

    #[test]
    fn test_empty_text_is_noop() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 10);
        assert!(!engine.tick(at(0), "", &mut surface).unwrap());
        assert!(surface.frames.is_empty());
        assert_eq!(engine.state().next_shift, Deadline::Due);
    }

    #[test]
    fn test_render_stops_at_right_edge() {
        let mut surface = MockSurface::new(8, 2);
        let mut engine = ScrollEngine::new(8, 10);
        engine.state.column_offset = 0;
        engine.tick(at(0), "ABCDEFGH", &mut surface).unwrap();
        assert_eq!(surface.frames[0], [(0, 'A'), (3, 'B'), (6, 'C')]);
    }

    #[test]
    fn test_failed_frame_keeps_position() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 10);
        surface.fail = true;

        assert_eq!(
            engine.tick(at(0), "AB", &mut surface),
            Err(DisplayError::Communication)
        );
        assert_eq!(engine.state().char_index, 0);
        assert_eq!(engine.state().column_offset, 3);
    }

    #[test]
    fn test_shrunk_text_restarts() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 10);
        run(&mut engine, &mut surface, "ABCD", 11);
        assert_eq!(engine.state().char_index, 2);

        engine.tick(at(200), "A", &mut surface).unwrap();
        assert_eq!(engine.state().char_index, 0);
        assert_eq!(engine.state().column_offset, 2);
    }

    #[test]
    fn test_shift_cadence_survives_clock_wrap() {
        let mut surface = MockSurface::new(3, 2);
        let mut engine = ScrollEngine::new(3, 30);
        engine.tick(at(u32::MAX - 10), "AB", &mut surface).unwrap();

        assert!(!engine.tick(at(u32::MAX), "AB", &mut surface).unwrap());
        assert!(engine.tick(at(19), "AB", &mut surface).unwrap());
    }
}
