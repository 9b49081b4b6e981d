//! Settings persistence
//!
//! Loads and saves settings documents through a [`SettingsStorage`]
//! backend.

use super::document::{Settings, SettingsKind};
use super::types::ValidationError;
use crate::traits::{SettingsStorage, StorageError};

/// Largest encoded settings document
pub const MAX_SETTINGS_SIZE: usize = 512;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Storage backend failed
    Storage(StorageError),
    /// No document stored for this kind
    NotFound,
    /// Document does not fit the encode buffer
    Encode,
    /// Stored bytes are not a valid document
    Decode,
    /// Document decoded but a field is out of range
    Validation(ValidationError),
}

impl SettingsError {
    /// Operator-facing description
    pub fn message(self) -> &'static str {
        match self {
            SettingsError::Storage(StorageError::MountFailed) => "Failed to mount filesystem",
            SettingsError::Storage(StorageError::Full) => "Settings storage full",
            SettingsError::Storage(_) => "Settings storage error",
            SettingsError::NotFound => "Settings file not found",
            SettingsError::Encode => "Settings too large to save",
            SettingsError::Decode => "Settings file is corrupt",
            SettingsError::Validation(e) => e.message(),
        }
    }
}

impl core::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<StorageError> for SettingsError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => SettingsError::NotFound,
            other => SettingsError::Storage(other),
        }
    }
}

impl From<ValidationError> for SettingsError {
    fn from(e: ValidationError) -> Self {
        SettingsError::Validation(e)
    }
}

/// Settings persistence manager
pub struct SettingsStore<S: SettingsStorage> {
    storage: S,
}

impl<S: SettingsStorage> SettingsStore<S> {
    /// Create a store over `storage`
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reclaim the storage backend
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load and validate the document of `kind`
    pub async fn load(&mut self, kind: SettingsKind) -> Result<Settings, SettingsError> {
        info!("Loading {} settings", kind.name());

        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let len = self.storage.read(kind.storage_key(), &mut buffer).await?;
        debug!("Read {} bytes of {} settings", len, kind.name());

        match Settings::decode(kind, &buffer[..len]) {
            Ok(settings) => {
                info!("{} settings loaded", kind.name());
                Ok(settings)
            }
            Err(e) => {
                warn!("{} settings rejected: {}", kind.name(), e.message());
                Err(e)
            }
        }
    }

    /// Validate and save `settings`, replacing the stored document
    pub async fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.write(settings).await
    }

    /// Write the default document of `kind` if none is stored
    ///
    /// A later [`load`](Self::load) then names the field still missing
    /// instead of reporting `NotFound`. The stored bytes are postcard; any
    /// host-editable form on the USB drive is the storage backend's to
    /// provide. Returns `true` if a document was written.
    pub async fn ensure_exists(&mut self, kind: SettingsKind) -> Result<bool, SettingsError> {
        if self.storage.exists(kind.storage_key()).await {
            return Ok(false);
        }
        info!("No {} settings stored, writing defaults", kind.name());
        self.write(&Settings::default_for(kind)).await?;
        Ok(true)
    }

    async fn write(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        let len = settings.encode(&mut buffer)?;
        self.storage
            .write(settings.storage_key(), &buffer[..len])
            .await?;
        info!("{} settings saved ({} bytes)", settings.name(), len);
        Ok(())
    }
}
