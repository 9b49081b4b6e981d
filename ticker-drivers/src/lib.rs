//! Display drivers for the market ticker
//!
//! Concrete [`MatrixSurface`](ticker_core::traits::MatrixSurface)
//! implementations and the glyph font they draw with:
//!
//! - 5x7 proportional font
//! - MAX7219 8x8 LED matrix chains over SPI

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod font;
pub mod max7219;

pub use max7219::Max7219;
