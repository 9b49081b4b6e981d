//! Board-agnostic core logic for the market ticker firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or network implementations:
//!
//! - Collaborator traits (quote source, matrix surface, settings storage)
//! - Symbol price table and display text builder
//! - Rate-limited refresh scheduler with status classification
//! - Column-based scroll engine
//! - Settings variants and USB drive connection state
//! - The control loop step tying it all together
//!
//! Everything is fixed-capacity (`heapless`) and driven by a single
//! cooperative polling loop against a wrapping millisecond clock.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to every module
mod fmt;

pub mod app;
pub mod market;
pub mod refresh;
pub mod scroll;
pub mod settings;
pub mod time;
pub mod traits;

pub use app::{LinkState, TickerApp};
pub use market::{DisplayBuffer, SymbolPrice, SymbolTable};
pub use refresh::{RefreshScheduler, RefreshStatus};
pub use scroll::ScrollEngine;
pub use time::{Deadline, Instant};
