//! Collaborator traits
//!
//! These traits define the interface between the ticker logic and the
//! network, display, and storage implementations that live outside this
//! crate.

pub mod display;
pub mod quotes;
pub mod storage;

pub use display::{DisplayError, GlyphMetrics, MatrixSurface};
pub use quotes::{AsyncQuoteSource, FetchError, FetchResult, Quote, QuoteBatch, QuoteSource};
pub use storage::{SettingsStorage, StorageError, StorageKey};
