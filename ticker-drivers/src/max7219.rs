//! MAX7219 LED matrix driver
//!
//! Drives a daisy chain of 8x8 matrix modules (FC-16 layout) over SPI as one
//! wide [`MatrixSurface`]. Module 0 is the leftmost module and the last one
//! in the chain, so its register word is shifted out first.
//!
//! Drawing goes to a column framebuffer; nothing reaches the hardware until
//! [`end_frame`](MatrixSurface::end_frame) flushes all eight row registers.

use embedded_hal::spi::{Operation, SpiDevice};
use ticker_core::traits::{DisplayError, GlyphMetrics, MatrixSurface};

use crate::font;

/// Columns per module
pub const MODULE_COLUMNS: usize = 8;

/// Highest intensity setting
pub const MAX_INTENSITY: u8 = 15;

/// MAX7219 registers
#[allow(dead_code)]
mod reg {
    pub const NOOP: u8 = 0x00;
    pub const DIGIT0: u8 = 0x01;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// MAX7219 chain of `MODULES` matrix modules
pub struct Max7219<SPI, const MODULES: usize> {
    spi: SPI,
    /// Column bytes per module, bit 0 = top row
    framebuffer: [[u8; MODULE_COLUMNS]; MODULES],
    intensity: u8,
    initialized: bool,
}

impl<SPI, const MODULES: usize> Max7219<SPI, MODULES>
where
    SPI: SpiDevice,
{
    /// Create a driver; call [`init`](Self::init) before drawing
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            framebuffer: [[0; MODULE_COLUMNS]; MODULES],
            intensity: 0,
            initialized: false,
        }
    }

    /// Program every module and blank the display
    ///
    /// `intensity` is clamped to 0..=15.
    pub fn init(&mut self, intensity: u8) -> Result<(), DisplayError> {
        self.intensity = intensity.min(MAX_INTENSITY);

        self.write_all(reg::DISPLAY_TEST, 0x00)?;
        self.write_all(reg::SCAN_LIMIT, 0x07)?;
        self.write_all(reg::DECODE_MODE, 0x00)?;
        self.write_all(reg::INTENSITY, self.intensity)?;

        self.framebuffer = [[0; MODULE_COLUMNS]; MODULES];
        self.flush()?;

        self.write_all(reg::SHUTDOWN, 0x01)?;
        self.initialized = true;
        Ok(())
    }

    /// Change the intensity (clamped to 0..=15)
    pub fn set_intensity(&mut self, intensity: u8) -> Result<(), DisplayError> {
        self.intensity = intensity.min(MAX_INTENSITY);
        self.write_all(reg::INTENSITY, self.intensity)
    }

    /// Current intensity
    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Blank the LEDs without losing register contents
    pub fn shutdown(&mut self, off: bool) -> Result<(), DisplayError> {
        self.write_all(reg::SHUTDOWN, if off { 0x00 } else { 0x01 })
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Set one column of the framebuffer, ignoring columns off the field
    fn set_column(&mut self, column: i32, bits: u8) {
        let Ok(column) = usize::try_from(column) else {
            return;
        };
        if let Some(module) = self.framebuffer.get_mut(column / MODULE_COLUMNS) {
            module[column % MODULE_COLUMNS] |= bits;
        }
    }

    /// Row register value for `row` of one module
    ///
    /// The leftmost column lands in bit 7.
    fn row_bits(columns: &[u8; MODULE_COLUMNS], row: usize) -> u8 {
        columns
            .iter()
            .enumerate()
            .fold(0, |acc, (c, &bits)| acc | (((bits >> row) & 1) << (7 - c)))
    }

    /// Write all eight row registers of every module
    fn flush(&mut self) -> Result<(), DisplayError> {
        for row in 0..MODULE_COLUMNS {
            let words: [[u8; 2]; MODULES] = core::array::from_fn(|m| {
                [
                    reg::DIGIT0 + row as u8,
                    Self::row_bits(&self.framebuffer[m], row),
                ]
            });
            self.send(&words)?;
        }
        Ok(())
    }

    /// Write the same register on every module
    fn write_all(&mut self, register: u8, value: u8) -> Result<(), DisplayError> {
        self.send(&[[register, value]; MODULES])
    }

    /// Shift one word per module in a single chip-select window
    fn send(&mut self, words: &[[u8; 2]; MODULES]) -> Result<(), DisplayError> {
        let mut ops: [Operation<'_, u8>; MODULES] =
            core::array::from_fn(|m| Operation::Write(&words[m][..]));
        self.spi
            .transaction(&mut ops)
            .map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, const MODULES: usize> GlyphMetrics for Max7219<SPI, MODULES> {
    fn glyph_width(&self, ch: char) -> u8 {
        font::glyph_width(ch)
    }
}

impl<SPI, const MODULES: usize> MatrixSurface for Max7219<SPI, MODULES>
where
    SPI: SpiDevice,
{
    fn columns(&self) -> u16 {
        (MODULES * MODULE_COLUMNS) as u16
    }

    fn begin_frame(&mut self) {
        self.framebuffer = [[0; MODULE_COLUMNS]; MODULES];
    }

    fn draw_glyph(&mut self, column: i32, ch: char) -> u8 {
        let glyph = font::glyph(ch);
        for (i, &bits) in glyph.iter().enumerate() {
            self.set_column(column + i as i32, bits);
        }
        glyph.len() as u8
    }

    fn end_frame(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.flush()
    }
}
