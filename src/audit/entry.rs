//! Audit entry data structures
//!
//! Defines the operations and subjects recorded in the vault's audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// Snapshot data was written back onto live state
    Restore,
    /// The current track pointer moved
    Switch,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Restore => write!(f, "RESTORE"),
            Operation::Switch => write!(f, "SWITCH"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Snapshot,
    Track,
    Settings,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Snapshot => write!(f, "Snapshot"),
            EntityType::Track => write!(f, "Track"),
            EntityType::Settings => write!(f, "Settings"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Human-readable description of the entity (label, track name, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable summary of what changed or what happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn base(
        timestamp: DateTime<Utc>,
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        timestamp: DateTime<Utc>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::base(
            timestamp,
            Operation::Create,
            entity_type,
            entity_id.into(),
            entity_name,
        );
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Create a new audit entry for an update operation
    pub fn update<T: Serialize>(
        timestamp: DateTime<Utc>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        let mut entry = Self::base(
            timestamp,
            Operation::Update,
            entity_type,
            entity_id.into(),
            None,
        );
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        entry.diff_summary = diff_summary;
        entry
    }

    /// Create a new audit entry for a delete operation
    pub fn delete<T: Serialize>(
        timestamp: DateTime<Utc>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
        reason: Option<String>,
    ) -> Self {
        let mut entry = Self::base(
            timestamp,
            Operation::Delete,
            entity_type,
            entity_id.into(),
            entity_name,
        );
        entry.before = serde_json::to_value(entity).ok();
        entry.diff_summary = reason;
        entry
    }

    /// Create an entry for a restore of a snapshot
    pub fn restore(
        timestamp: DateTime<Utc>,
        snapshot_id: impl Into<String>,
        summary: String,
    ) -> Self {
        let mut entry = Self::base(
            timestamp,
            Operation::Restore,
            EntityType::Snapshot,
            snapshot_id.into(),
            None,
        );
        entry.diff_summary = Some(summary);
        entry
    }

    /// Create an entry for a move of the current track pointer
    pub fn switch(
        timestamp: DateTime<Utc>,
        track_id: impl Into<String>,
        track_name: String,
        previous: Option<String>,
    ) -> Self {
        let mut entry = Self::base(
            timestamp,
            Operation::Switch,
            EntityType::Track,
            track_id.into(),
            Some(track_name),
        );
        entry.diff_summary = previous.map(|p| format!("from {}", p));
        entry
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Restore.to_string(), "RESTORE");
        assert_eq!(Operation::Switch.to_string(), "SWITCH");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"label": "before branch"});
        let entry = AuditEntry::create(
            Utc::now(),
            EntityType::Snapshot,
            "snap-12345678",
            Some("before branch".to_string()),
            &data,
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Snapshot);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_delete_entry_keeps_reason() {
        let entry = AuditEntry::delete(
            Utc::now(),
            EntityType::Snapshot,
            "snap-12345678",
            None,
            &json!({"size": 10}),
            Some("retention".to_string()),
        );

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.after.is_none());
        assert_eq!(entry.diff_summary.as_deref(), Some("retention"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::switch(
            Utc::now(),
            "trk-12345678",
            "experiment".to_string(),
            Some("main".to_string()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("SWITCH"));
        assert!(formatted.contains("Track"));
        assert!(formatted.contains("(experiment)"));
        assert!(formatted.contains("from main"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::restore(Utc::now(), "snap-1", "Restored: meals".into());
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Restore);
    }
}
