//! Persistent settings storage
//!
//! Key-value storage for settings documents. The flash filesystem and its
//! USB mass-storage exposure live behind this trait.

use core::future::Future;

/// Storage keys for settings documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Network credentials
    WifiSettings = 0,
    /// Ticker symbols, API credentials, and timing
    TickerSettings = 1,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::WifiSettings),
            1 => Some(StorageKey::TickerSettings),
            _ => None,
        }
    }

    /// Name of the encoded document when the storage is exposed as a USB drive
    pub fn file_name(self) -> &'static str {
        match self {
            StorageKey::WifiSettings => "wifi_settings.bin",
            StorageKey::TickerSettings => "ticker_settings.bin",
        }
    }
}

/// Errors from settings storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Filesystem could not be mounted
    MountFailed,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Storage is full
    Full,
}

/// Settings storage trait
pub trait SettingsStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl Future<Output = Result<usize, StorageError>>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8])
        -> impl Future<Output = Result<(), StorageError>>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: StorageKey) -> impl Future<Output = bool>;
}
