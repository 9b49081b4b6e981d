//! Market data model
//!
//! The symbol price table and the ticker line rendered from it.

pub mod display_text;
pub mod table;

pub use display_text::{
    build, DisplayBuffer, DISPLAY_CAPACITY, LOADING_TEXT, MAX_SEGMENT_LEN, SEGMENT_SEPARATOR,
};
pub use table::{
    count_symbols, ConfigError, SymbolPrice, SymbolTable, TableError, MAX_ID_LEN, MAX_SYMBOLS,
    NO_PRICE,
};
