//! Settings repository
//!
//! Persists `BackupSettings` under `settings.json`. Reads are lenient: an
//! unreadable document yields defaults instead of an error.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::config::BackupSettings;
use crate::error::VaultResult;

use super::blob::BlobStore;
use super::file_io::{read_json_optional, write_json};

const SETTINGS_KEY: &str = "settings.json";

pub struct SettingsRepository {
    store: Arc<dyn BlobStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Load settings, applying defaults for any missing or invalid field
    pub fn load(&self) -> BackupSettings {
        match read_json_optional::<Value>(self.store.as_ref(), SETTINGS_KEY) {
            Ok(Some(value)) => BackupSettings::from_value(&value),
            Ok(None) => BackupSettings::default(),
            Err(e) => {
                warn!(error = %e, "Settings unreadable, using defaults");
                BackupSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &BackupSettings) -> VaultResult<()> {
        write_json(self.store.as_ref(), SETTINGS_KEY, settings)
    }
}
