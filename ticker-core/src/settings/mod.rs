//! Device settings
//!
//! - [`types`]: WiFi and ticker settings with field validation
//! - [`document`]: the closed set of persisted documents
//! - [`store`]: load/save through a storage backend
//! - [`usb`]: exposing the settings filesystem to a host

pub mod document;
pub mod store;
pub mod types;
pub mod usb;

pub use document::{Settings, SettingsKind};
pub use store::{SettingsError, SettingsStore, MAX_SETTINGS_SIZE};
pub use types::{
    Feed, TickerSettings, ValidationError, WifiSettings, API_KEY_ID_CAPACITY,
    API_SECRET_KEY_CAPACITY, DEFAULT_BRIGHTNESS, DEFAULT_REQUEST_PERIOD_MS,
    DEFAULT_SCROLL_PERIOD_MS, MAX_BRIGHTNESS, MAX_PASSWORD_LEN, MAX_SSID_LEN, SYMBOLS_CAPACITY,
};
pub use usb::{UsbConnection, UsbDrive};
