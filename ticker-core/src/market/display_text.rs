//! Ticker line rendering
//!
//! Turns the symbol table into the single line of text that scrolls across
//! the matrix. Each symbol becomes one segment:
//!
//! ```text
//! AAPL: $212.41 +1.25% (+$2.62)     MSFT: loading...
//! ```

use core::fmt::Write;

use heapless::String;

use super::table::{SymbolPrice, SymbolTable, MAX_SYMBOLS};

/// Upper bound on one rendered segment, separator included
///
/// Text that would run past it is cut short; the separator is always kept.
pub const MAX_SEGMENT_LEN: usize = 64;

/// Capacity of the full ticker line
pub const DISPLAY_CAPACITY: usize = MAX_SYMBOLS * MAX_SEGMENT_LEN;

/// Gap between segments while scrolling
pub const SEGMENT_SEPARATOR: &str = "     ";

/// Placeholder shown for a symbol with no price yet
pub const LOADING_TEXT: &str = "loading...";

/// Room for a segment's text ahead of the separator
const SEGMENT_TEXT_LEN: usize = MAX_SEGMENT_LEN - SEGMENT_SEPARATOR.len();

/// Fixed-capacity ticker line
///
/// Never grows past `N` bytes: appends either fit whole or are refused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayBuffer<const N: usize = DISPLAY_CAPACITY> {
    text: String<N>,
}

impl<const N: usize> DisplayBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Current contents
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Bytes in use
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Total capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes still free
    pub fn remaining(&self) -> usize {
        N - self.text.len()
    }

    /// Drop all contents
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append `segment` if it fits entirely
    ///
    /// Returns `false`, leaving the buffer untouched, if it does not.
    pub fn push_segment(&mut self, segment: &str) -> bool {
        if segment.len() > self.remaining() {
            return false;
        }
        self.text.push_str(segment).is_ok()
    }
}

/// Writer keeping the leading `limit` bytes of its input, cut on a char
/// boundary
struct Clipped<'a> {
    out: &'a mut String<MAX_SEGMENT_LEN>,
    limit: usize,
    clipped: bool,
}

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.clipped {
            return Ok(());
        }
        for ch in s.chars() {
            if self.out.len() + ch.len_utf8() > self.limit {
                self.clipped = true;
                break;
            }
            // limit <= capacity
            let _ = self.out.push(ch);
        }
        Ok(())
    }
}

/// Render one symbol's segment, separator included, into `out`
///
/// Never fails: a segment longer than [`MAX_SEGMENT_LEN`] keeps its leading
/// text and the separator. Returns `true` if the text was cut.
pub fn write_segment(record: &SymbolPrice, out: &mut String<MAX_SEGMENT_LEN>) -> bool {
    out.clear();
    let mut text = Clipped {
        out: &mut *out,
        limit: SEGMENT_TEXT_LEN,
        clipped: false,
    };
    // Clipped swallows overflow, so formatting cannot fail
    let _ = match record.price() {
        None => write!(text, "{}: {}", record.id(), LOADING_TEXT),
        Some(price) => {
            let change = record.change();
            let sign = if change >= 0.0 { '+' } else { '-' };
            write!(
                text,
                "{}: ${:.2} {}{:.2}% ({}${:.2})",
                record.id(),
                price,
                sign,
                record.change_percent().abs(),
                sign,
                change.abs()
            )
        }
    };
    let clipped = text.clipped;
    let _ = out.push_str(SEGMENT_SEPARATOR);
    clipped
}

/// Rebuild `buffer` from every populated slot of `table`
///
/// Stops before a segment once fewer than [`MAX_SEGMENT_LEN`] bytes remain,
/// so only trailing symbols are ever left out, never cut in half. Returns
/// the number of segments written.
pub fn build<const T: usize, const B: usize>(
    table: &SymbolTable<T>,
    buffer: &mut DisplayBuffer<B>,
) -> usize {
    buffer.clear();
    let mut segment: String<MAX_SEGMENT_LEN> = String::new();
    let mut written = 0;

    for record in table {
        if buffer.remaining() < MAX_SEGMENT_LEN {
            debug!(
                "Ticker line full, omitting {} of {} symbols",
                table.len() - written,
                table.len()
            );
            break;
        }

        if write_segment(record, &mut segment) {
            debug!("Segment for {} cut to {} bytes", record.id(), MAX_SEGMENT_LEN);
        }

        if buffer.push_segment(segment.as_str()) {
            written += 1;
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::ConfigError;
    use proptest::prelude::*;

    fn segment_of(record: &SymbolPrice) -> String<MAX_SEGMENT_LEN> {
        let mut out = String::new();
        write_segment(record, &mut out);
        out
    }

    #[test]
    fn test_loading_segments_in_order() {
        let table = SymbolTable::<4>::from_csv("AAA,BBB,CCC").unwrap();
        let mut buffer = DisplayBuffer::<512>::new();

        assert_eq!(build(&table, &mut buffer), 3);
        assert_eq!(
            buffer.as_str(),
            "AAA: loading...     BBB: loading...     CCC: loading...     "
        );
    }

    #[test]
    fn test_priced_segment_format() {
        let mut table = SymbolTable::<4>::from_csv("AAA,BBB").unwrap();
        table.update("AAA", 11.0, 1.0, 10.0).unwrap();
        table.update("BBB", 19.0, -1.0, -5.0).unwrap();

        assert_eq!(
            segment_of(table.get("AAA").unwrap()).as_str(),
            "AAA: $11.00 +10.00% (+$1.00)     "
        );
        assert_eq!(
            segment_of(table.get("BBB").unwrap()).as_str(),
            "BBB: $19.00 -5.00% (-$1.00)     "
        );
    }

    #[test]
    fn test_unchanged_price_is_positive() {
        let mut table = SymbolTable::<1>::from_csv("FLAT").unwrap();
        table.update("FLAT", 3.5, 0.0, 0.0).unwrap();
        assert_eq!(
            segment_of(table.get("FLAT").unwrap()).as_str(),
            "FLAT: $3.50 +0.00% (+$0.00)     "
        );
    }

    #[test]
    fn test_build_truncates_whole_segments() {
        let table = SymbolTable::<8>::from_csv("AAA,BBB,CCC,DDD").unwrap();
        // 100 - 2 * 20 bytes used leaves less than one full segment reservation
        let mut buffer = DisplayBuffer::<100>::new();

        assert_eq!(build(&table, &mut buffer), 2);
        assert_eq!(buffer.as_str(), "AAA: loading...     BBB: loading...     ");
    }

    #[test]
    fn test_build_into_too_small_buffer() {
        let table = SymbolTable::<2>::from_csv("AAA").unwrap();
        let mut buffer = DisplayBuffer::<16>::new();

        assert_eq!(build(&table, &mut buffer), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_build_replaces_previous_text() {
        let mut table = SymbolTable::<2>::from_csv("AAA").unwrap();
        let mut buffer = DisplayBuffer::<256>::new();
        build(&table, &mut buffer);

        table.update("AAA", 2.0, 0.5, 33.33).unwrap();
        build(&table, &mut buffer);
        assert_eq!(buffer.as_str(), "AAA: $2.00 +33.33% (+$0.50)     ");
    }

    #[test]
    fn test_push_segment_refuses_overflow() {
        let mut buffer = DisplayBuffer::<8>::new();
        assert!(buffer.push_segment("12345"));
        assert!(!buffer.push_segment("6789"));
        assert_eq!(buffer.as_str(), "12345");
        assert_eq!(buffer.remaining(), 3);
    }

    #[test]
    fn test_long_symbol_kept_in_place() {
        let long = "ABCDEFGHIJKLMNOPQRSTUVWXYZ01234";
        let mut table =
            SymbolTable::<4>::from_csv("AAA,ABCDEFGHIJKLMNOPQRSTUVWXYZ01234,BBB").unwrap();
        table.update(long, 1234.56, -123.45, -10.0).unwrap();
        let mut buffer = DisplayBuffer::<2048>::new();

        assert_eq!(build(&table, &mut buffer), 3);
        assert_eq!(
            buffer.as_str(),
            "AAA: loading...     \
             ABCDEFGHIJKLMNOPQRSTUVWXYZ01234: $1234.56 -10.00% (-$123.45     \
             BBB: loading...     "
        );
    }

    #[test]
    fn test_oversized_segment_is_cut() {
        let mut table = SymbolTable::<1>::from_csv("AAA").unwrap();
        table.update("AAA", 3.0e38, -3.0e38, -50.0).unwrap();

        let mut out = String::new();
        assert!(write_segment(table.get("AAA").unwrap(), &mut out));
        assert_eq!(out.len(), MAX_SEGMENT_LEN);
        assert!(out.starts_with("AAA: $3"));
        assert!(out.ends_with(SEGMENT_SEPARATOR));
    }

    /// Build `table` into a `B`-byte line and check it against its segments
    fn check_build<const B: usize>(table: &SymbolTable<8>) -> Result<(), TestCaseError> {
        let mut buffer = DisplayBuffer::<B>::new();
        let written = build(table, &mut buffer);

        // Each segment takes at most MAX_SEGMENT_LEN, so this many always fit
        prop_assert!(written >= table.len().min(B / MAX_SEGMENT_LEN));
        prop_assert!(written <= table.len());
        if written < table.len() {
            prop_assert!(buffer.remaining() < MAX_SEGMENT_LEN);
        }

        let mut expected = std::string::String::new();
        for record in table.iter().take(written) {
            let segment = segment_of(record);
            prop_assert!(segment.starts_with(record.id()));
            prop_assert!(segment.ends_with(SEGMENT_SEPARATOR));
            expected.push_str(&segment);
        }
        prop_assert_eq!(buffer.as_str(), expected.as_str());
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_build_keeps_every_symbol_that_fits(
            names in proptest::collection::vec("[A-Z]{1,30}", 0..=8),
            prices in proptest::collection::vec(
                proptest::option::of((0.0f32..3.0e38, -3.0e38f32..3.0e38)),
                8,
            ),
        ) {
            // Index prefix keeps ids unique and under MAX_ID_LEN bytes
            let ids: std::vec::Vec<std::string::String> = names
                .iter()
                .enumerate()
                .map(|(i, name)| std::format!("{}{}", i, name))
                .collect();
            let csv = ids.join(",");

            if ids.is_empty() {
                prop_assert_eq!(SymbolTable::<8>::from_csv(&csv), Err(ConfigError::NoSymbols));
                return Ok(());
            }

            let mut table = SymbolTable::<8>::from_csv(&csv).unwrap();
            prop_assert_eq!(table.len(), ids.len());
            for (id, price) in ids.iter().zip(prices.iter()) {
                if let Some((price, change)) = price {
                    table.update(id, *price, *change, *change / 3.0).unwrap();
                }
            }

            check_build::<300>(&table)?;
            check_build::<2048>(&table)?;
        }
    }
}
