//! Settings type definitions
//!
//! Stored as postcard-serialized binary documents, one per settings kind.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::market::{count_symbols, MAX_SYMBOLS};

/// Maximum SSID length in bytes
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WiFi password length in bytes
pub const MAX_PASSWORD_LEN: usize = 63;

/// Slot size for the API key ID; keys must be strictly shorter
pub const API_KEY_ID_CAPACITY: usize = 32;

/// Slot size for the API secret key; keys must be strictly shorter
pub const API_SECRET_KEY_CAPACITY: usize = 64;

/// Slot size for the symbol list; lists must be strictly shorter
pub const SYMBOLS_CAPACITY: usize = 256;

/// Default time between quote requests
pub const DEFAULT_REQUEST_PERIOD_MS: u32 = 60_000;

/// Default time between one-column scroll shifts
pub const DEFAULT_SCROLL_PERIOD_MS: u32 = 30;

/// Default matrix intensity
pub const DEFAULT_BRIGHTNESS: u8 = 7;

/// Highest matrix intensity
pub const MAX_BRIGHTNESS: u8 = 15;

/// Market data feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// All US exchanges (paid plans)
    Sip,
    /// IEX only (free plans)
    #[default]
    Iex,
    /// SIP delayed by 15 minutes
    DelayedSip,
    /// Blue Ocean ATS
    Boats,
    /// Overnight trading
    Overnight,
    /// Over-the-counter
    Otc,
}

impl Feed {
    /// Every supported feed
    pub const ALL: [Feed; 6] = [
        Feed::Sip,
        Feed::Iex,
        Feed::DelayedSip,
        Feed::Boats,
        Feed::Overnight,
        Feed::Otc,
    ];

    /// Query parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::DelayedSip => "delayed_sip",
            Feed::Boats => "boats",
            Feed::Overnight => "overnight",
            Feed::Otc => "otc",
        }
    }

    /// Parse a query parameter value
    pub fn from_name(name: &str) -> Option<Self> {
        Feed::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

/// Reasons a settings document is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// SSID empty or too long
    InvalidSsid,
    /// Password too long
    InvalidPassword,
    /// API key ID empty or too long
    InvalidApiKeyId,
    /// API secret key empty or too long
    InvalidApiSecretKey,
    /// Symbol list empty, too long, or holding too many symbols
    InvalidSymbols,
    /// Unsupported feed name
    InvalidSourceFeed,
    /// Request period of zero
    InvalidRequestPeriod,
    /// Scroll period of zero
    InvalidScrollPeriod,
    /// Brightness outside 1..=15
    InvalidDisplayBrightness,
}

impl ValidationError {
    /// Operator-facing description naming the offending field
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::InvalidSsid => "Invalid SSID length, check \"ssid\"",
            ValidationError::InvalidPassword => "Invalid password length, check \"password\"",
            ValidationError::InvalidApiKeyId => "Invalid API key ID, check \"apiKeyId\"",
            ValidationError::InvalidApiSecretKey => {
                "Invalid API secret key, check \"apiSecretKey\""
            }
            ValidationError::InvalidSymbols => "Invalid symbol list, check \"symbols\"",
            ValidationError::InvalidSourceFeed => "Invalid source feed, check \"sourceFeed\"",
            ValidationError::InvalidRequestPeriod => {
                "Invalid request period, check \"requestPeriod\""
            }
            ValidationError::InvalidScrollPeriod => {
                "Invalid scroll period, check \"scrollPeriod\""
            }
            ValidationError::InvalidDisplayBrightness => {
                "Invalid display brightness (1-15), check \"displayBrightness\""
            }
        }
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

fn bounded<const N: usize>(value: &str, err: ValidationError) -> Result<String<N>, ValidationError> {
    let mut s = String::new();
    s.push_str(value).map_err(|_| err)?;
    Ok(s)
}

/// Network credentials
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WifiSettings {
    /// Network name
    pub ssid: String<MAX_SSID_LEN>,
    /// Network password (empty for open networks)
    pub password: String<MAX_PASSWORD_LEN>,
}

impl WifiSettings {
    /// Build WiFi settings, rejecting values that do not fit
    pub fn new(ssid: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            ssid: bounded(ssid, ValidationError::InvalidSsid)?,
            password: bounded(password, ValidationError::InvalidPassword)?,
        })
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ssid.is_empty() || self.ssid.len() > MAX_SSID_LEN {
            return Err(ValidationError::InvalidSsid);
        }
        if self.password.len() > MAX_PASSWORD_LEN {
            return Err(ValidationError::InvalidPassword);
        }
        Ok(())
    }
}

impl core::fmt::Debug for WifiSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WifiSettings")
            .field("ssid", &self.ssid.as_str())
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Ticker configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSettings {
    /// Market data API key ID
    pub api_key_id: String<API_KEY_ID_CAPACITY>,
    /// Market data API secret key
    pub api_secret_key: String<API_SECRET_KEY_CAPACITY>,
    /// Comma-separated symbols to display
    pub symbols: String<SYMBOLS_CAPACITY>,
    /// Feed to request quotes from
    pub feed: Feed,
    /// Time between quote requests
    pub request_period_ms: u32,
    /// Time between one-column scroll shifts
    pub scroll_period_ms: u32,
    /// Matrix intensity (1-15)
    pub display_brightness: u8,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            api_key_id: String::new(),
            api_secret_key: String::new(),
            symbols: String::new(),
            feed: Feed::Iex,
            request_period_ms: DEFAULT_REQUEST_PERIOD_MS,
            scroll_period_ms: DEFAULT_SCROLL_PERIOD_MS,
            display_brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl TickerSettings {
    /// Build ticker settings with default feed and timing
    pub fn new(
        api_key_id: &str,
        api_secret_key: &str,
        symbols: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key_id: bounded(api_key_id, ValidationError::InvalidApiKeyId)?,
            api_secret_key: bounded(api_secret_key, ValidationError::InvalidApiSecretKey)?,
            symbols: bounded(symbols, ValidationError::InvalidSymbols)?,
            ..Self::default()
        })
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key_id.is_empty() || self.api_key_id.len() >= API_KEY_ID_CAPACITY {
            return Err(ValidationError::InvalidApiKeyId);
        }
        if self.api_secret_key.is_empty() || self.api_secret_key.len() >= API_SECRET_KEY_CAPACITY
        {
            return Err(ValidationError::InvalidApiSecretKey);
        }
        if self.symbols.is_empty() || self.symbols.len() >= SYMBOLS_CAPACITY {
            return Err(ValidationError::InvalidSymbols);
        }
        let count = count_symbols(&self.symbols);
        if count == 0 || count > MAX_SYMBOLS {
            return Err(ValidationError::InvalidSymbols);
        }
        if self.request_period_ms < 1 {
            return Err(ValidationError::InvalidRequestPeriod);
        }
        if self.scroll_period_ms < 1 {
            return Err(ValidationError::InvalidScrollPeriod);
        }
        if !(1..=MAX_BRIGHTNESS).contains(&self.display_brightness) {
            return Err(ValidationError::InvalidDisplayBrightness);
        }
        Ok(())
    }
}

impl core::fmt::Debug for TickerSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickerSettings")
            .field("api_key_id", &self.api_key_id.as_str())
            .field("api_secret_key", &"<redacted>")
            .field("symbols", &self.symbols.as_str())
            .field("feed", &self.feed)
            .field("request_period_ms", &self.request_period_ms)
            .field("scroll_period_ms", &self.scroll_period_ms)
            .field("display_brightness", &self.display_brightness)
            .finish()
    }
}
