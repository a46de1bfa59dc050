//! Snapshot model
//!
//! A snapshot is an immutable, timestamped capture of every tracked entity
//! collection of one track. The metadata lives in `BackupSnapshot`; the
//! records travel in a `SnapshotArchive`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{SnapshotId, TrackId};
use super::payload::{EntityCounts, Payload};
use crate::error::{VaultError, VaultResult};

/// Current archive schema version
pub const ARCHIVE_SCHEMA_VERSION: u32 = 1;

/// How a snapshot came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SnapshotKind {
    /// Requested by the user (or taken as a safety backup before a restore)
    Manual,
    /// Taken by the auto-backup schedule
    Auto,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "MANUAL"),
            Self::Auto => write!(f, "AUTO"),
        }
    }
}

/// Snapshot metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub id: SnapshotId,

    /// Creation instant
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: SnapshotKind,

    /// Optional free-text annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Owning track
    pub track_id: TrackId,

    /// Serialized byte size of the payload
    pub size: u64,

    /// Record count per category at capture time
    pub entity_counts: EntityCounts,
}

impl BackupSnapshot {
    /// Age of the snapshot relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.timestamp)
    }
}

/// A snapshot together with its payload, as stored and exported
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotArchive {
    /// Schema version for migration support
    pub schema_version: u32,
    pub snapshot: BackupSnapshot,
    pub payload: Payload,
}

impl SnapshotArchive {
    pub fn new(snapshot: BackupSnapshot, payload: Payload) -> Self {
        Self {
            schema_version: ARCHIVE_SCHEMA_VERSION,
            snapshot,
            payload,
        }
    }

    /// Check that the recorded counts match the records in the payload
    pub fn verify(&self) -> VaultResult<()> {
        if self.schema_version > ARCHIVE_SCHEMA_VERSION {
            return Err(VaultError::CorruptSnapshot {
                id: self.snapshot.id.to_string(),
                reason: format!("unsupported schema version {}", self.schema_version),
            });
        }

        let mismatched = self.payload.mismatches(&self.snapshot.entity_counts);
        if mismatched.is_empty() {
            return Ok(());
        }

        let details: Vec<String> = mismatched
            .iter()
            .map(|c| {
                format!(
                    "{} (recorded {}, found {})",
                    c,
                    self.snapshot.entity_counts.get(*c),
                    self.payload.records(*c).len()
                )
            })
            .collect();

        Err(VaultError::CorruptSnapshot {
            id: self.snapshot.id.to_string(),
            reason: format!("entity counts do not match payload: {}", details.join(", ")),
        })
    }
}
