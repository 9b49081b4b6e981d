//! Settings documents
//!
//! The closed set of persisted settings kinds. Each variant validates,
//! encodes and decodes itself; callers dispatch by matching on the kind.

use super::store::SettingsError;
use super::types::{TickerSettings, WifiSettings};
use crate::traits::StorageKey;

/// Which settings document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsKind {
    /// Network credentials
    Wifi,
    /// Ticker configuration
    Ticker,
}

impl SettingsKind {
    /// Human-readable name for log messages
    pub fn name(self) -> &'static str {
        match self {
            SettingsKind::Wifi => "WiFi",
            SettingsKind::Ticker => "Ticker",
        }
    }

    /// Key the document is stored under
    pub fn storage_key(self) -> StorageKey {
        match self {
            SettingsKind::Wifi => StorageKey::WifiSettings,
            SettingsKind::Ticker => StorageKey::TickerSettings,
        }
    }
}

/// One persisted settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settings {
    /// Network credentials
    Wifi(WifiSettings),
    /// Ticker configuration
    Ticker(TickerSettings),
}

impl Settings {
    /// Default document of the given kind
    ///
    /// Defaults carry empty credentials and will not pass validation until
    /// replaced with a complete document.
    pub fn default_for(kind: SettingsKind) -> Self {
        match kind {
            SettingsKind::Wifi => Settings::Wifi(WifiSettings::default()),
            SettingsKind::Ticker => Settings::Ticker(TickerSettings::default()),
        }
    }

    /// Which kind this document is
    pub fn kind(&self) -> SettingsKind {
        match self {
            Settings::Wifi(_) => SettingsKind::Wifi,
            Settings::Ticker(_) => SettingsKind::Ticker,
        }
    }

    /// Human-readable name for log messages
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Key the document is stored under
    pub fn storage_key(&self) -> StorageKey {
        self.kind().storage_key()
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), SettingsError> {
        let result = match self {
            Settings::Wifi(s) => s.validate(),
            Settings::Ticker(s) => s.validate(),
        };
        result.map_err(SettingsError::Validation)
    }

    /// Serialize into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, SettingsError> {
        let written = match self {
            Settings::Wifi(s) => postcard::to_slice(s, buffer),
            Settings::Ticker(s) => postcard::to_slice(s, buffer),
        }
        .map_err(|_| SettingsError::Encode)?;
        Ok(written.len())
    }

    /// Deserialize a document of `kind` and validate it
    pub fn decode(kind: SettingsKind, bytes: &[u8]) -> Result<Self, SettingsError> {
        let settings = match kind {
            SettingsKind::Wifi => Settings::Wifi(
                postcard::from_bytes(bytes).map_err(|_| SettingsError::Decode)?,
            ),
            SettingsKind::Ticker => Settings::Ticker(
                postcard::from_bytes(bytes).map_err(|_| SettingsError::Decode)?,
            ),
        };
        settings.validate()?;
        Ok(settings)
    }
}
