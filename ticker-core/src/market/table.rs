//! Fixed-capacity symbol price table
//!
//! Built once from the configured comma-separated symbol list. Slots are
//! never added or removed afterwards; a refresh only overwrites the numeric
//! fields of existing slots in place.

use heapless::{String, Vec};

/// Slot width for a symbol id; ids must be strictly shorter
pub const MAX_ID_LEN: usize = 32;

/// Maximum symbols per table
pub const MAX_SYMBOLS: usize = 32;

/// Price value meaning "not fetched yet"
pub const NO_PRICE: f32 = -1.0;

/// Separator between configured symbol ids
pub const SYMBOL_DELIMITER: char = ',';

/// Table construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No usable symbol in the configured list
    NoSymbols,
    /// The quote request would not fit its fixed buffer
    RequestTooLong,
}

impl ConfigError {
    /// Operator-facing description
    pub fn message(self) -> &'static str {
        match self {
            ConfigError::NoSymbols => "No valid symbols configured",
            ConfigError::RequestTooLong => "Symbol list too long for quote request",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Table update errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// No slot holds this symbol
    UnknownSymbol,
}

/// Latest price for one symbol
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SymbolPrice {
    id: String<MAX_ID_LEN>,
    price: f32,
    change: f32,
    change_percent: f32,
}

impl SymbolPrice {
    fn pending(id: String<MAX_ID_LEN>) -> Self {
        Self {
            id,
            price: NO_PRICE,
            change: 0.0,
            change_percent: 0.0,
        }
    }

    /// Symbol identifier
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Latest price, or `None` until the first successful refresh
    pub fn price(&self) -> Option<f32> {
        if self.has_price() {
            Some(self.price)
        } else {
            None
        }
    }

    /// Absolute change since the day open
    pub fn change(&self) -> f32 {
        self.change
    }

    /// Change since the day open, in percent of the open
    pub fn change_percent(&self) -> f32 {
        self.change_percent
    }

    /// Check whether a price has been fetched for this slot
    pub fn has_price(&self) -> bool {
        self.price >= 0.0
    }
}

/// Ordered, fixed-capacity table of symbol prices
///
/// Insertion order is configuration order, which is also the order the
/// display text is rendered in.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable<const N: usize = MAX_SYMBOLS> {
    slots: Vec<SymbolPrice, N>,
}

impl<const N: usize> SymbolTable<N> {
    /// Build a table from a comma-separated symbol list
    ///
    /// Each entry is trimmed. Empty entries, ids of `MAX_ID_LEN` bytes or
    /// more, and repeated ids are skipped. Entries past the table capacity
    /// are dropped. Fails only if no symbol was admitted.
    pub fn from_csv(csv: &str) -> Result<Self, ConfigError> {
        let mut slots: Vec<SymbolPrice, N> = Vec::new();

        for raw in csv.split(SYMBOL_DELIMITER) {
            let id = raw.trim();
            if id.is_empty() {
                continue;
            }

            if slots.is_full() {
                warn!("Symbol table full ({} slots), ignoring {} and later symbols", N, id);
                break;
            }

            if id.len() >= MAX_ID_LEN {
                warn!("Symbol {} longer than {} bytes, skipping", id, MAX_ID_LEN - 1);
                continue;
            }

            if slots.iter().any(|s| s.id() == id) {
                warn!("Duplicate symbol {}, skipping", id);
                continue;
            }

            let mut slot_id = String::new();
            if slot_id.push_str(id).is_err() {
                continue;
            }
            // Fullness checked above
            let _ = slots.push(SymbolPrice::pending(slot_id));
        }

        if slots.is_empty() {
            return Err(ConfigError::NoSymbols);
        }

        debug!("Symbol table holds {} of {} slots", slots.len(), N);
        Ok(Self { slots })
    }

    /// Overwrite the price fields of the slot holding `id`
    ///
    /// Leaves the table untouched if no slot matches.
    pub fn update(
        &mut self,
        id: &str,
        price: f32,
        change: f32,
        change_percent: f32,
    ) -> Result<(), TableError> {
        match self.slots.iter_mut().find(|s| s.id() == id) {
            Some(slot) => {
                slot.price = price;
                slot.change = change;
                slot.change_percent = change_percent;
                Ok(())
            }
            None => {
                debug!("No slot for symbol {}", id);
                Err(TableError::UnknownSymbol)
            }
        }
    }

    /// Find the slot holding `id`
    pub fn get(&self, id: &str) -> Option<&SymbolPrice> {
        self.slots.iter().find(|s| s.id() == id)
    }

    /// Populated slots in insertion order
    pub fn iter(&self) -> core::slice::Iter<'_, SymbolPrice> {
        self.slots.iter()
    }

    /// Symbol ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.id())
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no slot is populated
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of slots
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<'a, const N: usize> IntoIterator for &'a SymbolTable<N> {
    type Item = &'a SymbolPrice;
    type IntoIter = core::slice::Iter<'a, SymbolPrice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Count the non-empty entries of a comma-separated symbol list
pub fn count_symbols(csv: &str) -> usize {
    csv.split(SYMBOL_DELIMITER)
        .filter(|s| !s.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_csv_keeps_order_and_trims() {
        let table = SymbolTable::<8>::from_csv(" AAPL, MSFT ,BTC-USD").unwrap();
        let ids: Vec<&str, 8> = table.ids().collect();
        assert_eq!(ids.as_slice(), &["AAPL", "MSFT", "BTC-USD"]);
        assert!(table.iter().all(|s| !s.has_price()));
    }

    #[test]
    fn test_from_csv_skips_oversize_ids() {
        // 32 bytes is one too many
        let csv = "AAA,ABCDEFGHIJKLMNOPQRSTUVWXYZ012345,BBB";
        let table = SymbolTable::<8>::from_csv(csv).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get("AAA").is_some());
        assert!(table.get("BBB").is_some());
    }

    #[test]
    fn test_from_csv_accepts_longest_id() {
        let id = "ABCDEFGHIJKLMNOPQRSTUVWXYZ01234";
        assert_eq!(id.len(), MAX_ID_LEN - 1);
        let table = SymbolTable::<4>::from_csv(id).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_from_csv_stops_at_capacity() {
        let table = SymbolTable::<2>::from_csv("A,B,C,D").unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get("C").is_none());
    }

    #[test]
    fn test_from_csv_drops_duplicates() {
        let table = SymbolTable::<4>::from_csv("AAA,BBB,AAA").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_csv_empty_list() {
        assert_eq!(
            SymbolTable::<4>::from_csv(" , ,").unwrap_err(),
            ConfigError::NoSymbols
        );
        assert_eq!(
            SymbolTable::<4>::from_csv("").unwrap_err(),
            ConfigError::NoSymbols
        );
    }

    #[test]
    fn test_update_changes_only_target() {
        let mut table = SymbolTable::<4>::from_csv("AAA,BBB").unwrap();
        let before_bbb = table.get("BBB").unwrap().clone();

        table.update("AAA", 11.0, 1.0, 10.0).unwrap();

        let aaa = table.get("AAA").unwrap();
        assert_eq!(aaa.price(), Some(11.0));
        assert_eq!(aaa.change(), 1.0);
        assert_eq!(aaa.change_percent(), 10.0);
        assert_eq!(aaa.id(), "AAA");
        assert_eq!(table.get("BBB").unwrap(), &before_bbb);
    }

    #[test]
    fn test_update_unknown_symbol_is_noop() {
        let mut table = SymbolTable::<4>::from_csv("AAA,BBB").unwrap();
        table.update("AAA", 5.0, 0.5, 11.1).unwrap();
        let before = table.clone();

        assert_eq!(
            table.update("ZZZ", 1.0, 1.0, 1.0),
            Err(TableError::UnknownSymbol)
        );
        assert_eq!(table, before);
    }

    #[test]
    fn test_count_symbols() {
        assert_eq!(count_symbols("AAPL,MSFT"), 2);
        assert_eq!(count_symbols("AAPL,,MSFT, "), 2);
        assert_eq!(count_symbols(""), 0);
    }

    proptest! {
        #[test]
        fn prop_table_respects_capacity(ids in proptest::collection::vec("[A-Z\\-]{0,40}", 0..80)) {
            let mut csv: String<4096> = String::new();
            for (i, id) in ids.iter().enumerate() {
                if i > 0 {
                    let _ = csv.push(',');
                }
                let _ = csv.push_str(id);
            }

            if let Ok(table) = SymbolTable::<16>::from_csv(&csv) {
                prop_assert!(table.len() <= 16);
                for slot in table.iter() {
                    prop_assert!(!slot.id().is_empty());
                    prop_assert!(slot.id().len() < MAX_ID_LEN);
                }
            }
        }
    }
}
