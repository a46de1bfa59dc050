//! Backup settings for Fitvault
//!
//! Settings are never rejected: a stored field that is missing or invalid
//! falls back to its default, and numeric input is clamped to at least 1.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_MAX_SNAPSHOTS: u32 = 100;
const DEFAULT_INTERVAL_HOURS: u32 = 24;
const DEFAULT_RETENTION_DAYS: u32 = 90;

/// Backup configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSettings {
    /// Whether scheduled AUTO snapshots are taken
    pub auto_backup_enabled: bool,

    /// Total snapshot cap across all tracks
    pub max_snapshots: u32,

    /// Minimum hours between AUTO snapshots
    pub auto_backup_interval_hours: u32,

    /// Snapshots older than this become eligible for pruning
    pub retention_days: u32,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            auto_backup_enabled: false,
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
            auto_backup_interval_hours: DEFAULT_INTERVAL_HOURS,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl BackupSettings {
    /// Read settings from an arbitrary stored JSON value
    ///
    /// Each field is taken on its own: a bad field falls back to its default
    /// without affecting the others.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();

        Self {
            auto_backup_enabled: value
                .get("autoBackupEnabled")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.auto_backup_enabled),
            max_snapshots: positive_field(value, "maxSnapshots")
                .unwrap_or(defaults.max_snapshots),
            auto_backup_interval_hours: positive_field(value, "autoBackupIntervalHours")
                .unwrap_or(defaults.auto_backup_interval_hours),
            retention_days: positive_field(value, "retentionDays")
                .unwrap_or(defaults.retention_days),
        }
    }

    /// Merge a partial update, clamping numeric fields to at least 1
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            auto_backup_enabled: patch.auto_backup_enabled.unwrap_or(self.auto_backup_enabled),
            max_snapshots: patch.max_snapshots.map(clamp_positive).unwrap_or(self.max_snapshots),
            auto_backup_interval_hours: patch
                .auto_backup_interval_hours
                .map(clamp_positive)
                .unwrap_or(self.auto_backup_interval_hours),
            retention_days: patch
                .retention_days
                .map(clamp_positive)
                .unwrap_or(self.retention_days),
        }
    }
}

/// A partial settings update
///
/// Numeric fields are signed so out-of-range input can be clamped instead of
/// failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_backup_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_snapshots: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_backup_interval_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<i64>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn positive_field(value: &Value, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .filter(|n| *n >= 1)
        .map(|n| n.min(u32::MAX as u64) as u32)
}

fn clamp_positive(n: i64) -> u32 {
    n.clamp(1, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_settings() {
        let settings = BackupSettings::default();
        assert!(!settings.auto_backup_enabled);
        assert_eq!(settings.max_snapshots, 100);
        assert_eq!(settings.auto_backup_interval_hours, 24);
        assert_eq!(settings.retention_days, 90);
    }

    #[test]
    fn test_from_value_keeps_valid_fields() {
        let settings = BackupSettings::from_value(&json!({
            "autoBackupEnabled": true,
            "maxSnapshots": 10,
            "autoBackupIntervalHours": 6,
            "retentionDays": 30
        }));

        assert!(settings.auto_backup_enabled);
        assert_eq!(settings.max_snapshots, 10);
        assert_eq!(settings.auto_backup_interval_hours, 6);
        assert_eq!(settings.retention_days, 30);
    }

    #[test]
    fn test_from_value_defaults_invalid_fields() {
        let settings = BackupSettings::from_value(&json!({
            "autoBackupEnabled": "yes",
            "maxSnapshots": 0,
            "autoBackupIntervalHours": -4,
            "retentionDays": "ninety"
        }));

        assert_eq!(settings, BackupSettings::default());
    }

    #[test]
    fn test_from_value_non_object() {
        let settings = BackupSettings::from_value(&json!([1, 2, 3]));
        assert_eq!(settings, BackupSettings::default());
    }

    #[test]
    fn test_merged_clamps_to_one() {
        let patch = SettingsPatch {
            max_snapshots: Some(0),
            retention_days: Some(-7),
            ..Default::default()
        };

        let merged = BackupSettings::default().merged(&patch);
        assert_eq!(merged.max_snapshots, 1);
        assert_eq!(merged.retention_days, 1);
        assert_eq!(merged.auto_backup_interval_hours, 24);
    }

    #[test]
    fn test_merged_only_touches_given_fields() {
        let patch = SettingsPatch {
            auto_backup_enabled: Some(true),
            ..Default::default()
        };

        let merged = BackupSettings::default().merged(&patch);
        assert!(merged.auto_backup_enabled);
        assert_eq!(merged.max_snapshots, 100);
        assert!(!patch.is_empty());
        assert!(SettingsPatch::default().is_empty());
    }
}
