//! Settings service
//!
//! Reads and updates the backup settings, recording every effective change
//! in the audit log.

use tracing::info;

use crate::audit::{generate_diff, AuditEntry, EntityType};
use crate::config::{BackupSettings, SettingsPatch};
use crate::error::VaultResult;
use crate::storage::Storage;

const SETTINGS_AUDIT_ID: &str = "settings";

/// Service for backup settings
pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current settings, with defaults for anything missing or invalid
    pub fn get(&self) -> BackupSettings {
        self.storage.settings.load()
    }

    /// Merge `patch` into the stored settings and persist the result
    ///
    /// Numeric fields are clamped to at least 1 rather than rejected.
    pub fn save(&self, patch: &SettingsPatch) -> VaultResult<BackupSettings> {
        let _guard = self.storage.lock()?;

        let before = self.storage.settings.load();
        let after = before.merged(patch);
        self.storage.settings.save(&after)?;

        if before != after {
            let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
                (Ok(b), Ok(a)) => generate_diff(&b, &a),
                _ => None,
            };
            info!(diff = ?diff, "Backup settings updated");
            self.storage.record(AuditEntry::update(
                self.storage.now(),
                EntityType::Settings,
                SETTINGS_AUDIT_ID,
                &before,
                &after,
                diff,
            ));
        }

        Ok(after)
    }
}
