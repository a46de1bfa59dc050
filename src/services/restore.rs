//! Restore service
//!
//! Writes a snapshot's records back over the current track's live data.
//! Each restore moves through `Requested -> SafetyBackup -> Applying ->
//! Committed`, or ends in `Failed`. An unknown or corrupt snapshot fails
//! before anything is touched; per-category write failures are collected
//! and the remaining categories are still applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::audit::AuditEntry;
use crate::error::{VaultError, VaultResult};
use crate::models::{BackupSnapshot, EntityCategory, SnapshotId, SnapshotKind};
use crate::storage::Storage;

use super::snapshot::SnapshotService;
use super::track::{TrackService, VaultContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestoreMode {
    /// Every category
    Full,
    /// Only the listed categories
    Selective,
}

/// What to restore and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOptions {
    pub snapshot_id: SnapshotId,
    pub mode: RestoreMode,
    /// Used by `Selective`; None or empty restores nothing
    pub categories: Option<Vec<EntityCategory>>,
    /// Snapshot the current state before overwriting it
    pub create_backup_first: bool,
}

impl RestoreOptions {
    /// Restore everything, with a safety backup
    pub fn full(snapshot_id: SnapshotId) -> Self {
        Self {
            snapshot_id,
            mode: RestoreMode::Full,
            categories: None,
            create_backup_first: true,
        }
    }

    /// Restore only `categories`, with a safety backup
    pub fn selective(snapshot_id: SnapshotId, categories: Vec<EntityCategory>) -> Self {
        Self {
            snapshot_id,
            mode: RestoreMode::Selective,
            categories: Some(categories),
            create_backup_first: true,
        }
    }

    pub fn with_backup_first(mut self, create_backup_first: bool) -> Self {
        self.create_backup_first = create_backup_first;
        self
    }

    /// The categories to overwrite, in canonical order and without repeats
    fn selected_categories(&self) -> Vec<EntityCategory> {
        match self.mode {
            RestoreMode::Full => EntityCategory::all().to_vec(),
            RestoreMode::Selective => {
                let requested = self.categories.as_deref().unwrap_or(&[]);
                EntityCategory::all()
                    .iter()
                    .copied()
                    .filter(|c| requested.contains(c))
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestorePhase {
    Requested,
    SafetyBackup,
    Applying,
    Committed,
    Failed,
}

impl fmt::Display for RestorePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => write!(f, "REQUESTED"),
            Self::SafetyBackup => write!(f, "SAFETY_BACKUP"),
            Self::Applying => write!(f, "APPLYING"),
            Self::Committed => write!(f, "COMMITTED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Result of a restore; partial failure is reported here, not as an error
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    pub success: bool,
    pub errors: Vec<String>,
    /// Final phase: `Committed` or `Failed`
    pub phase: RestorePhase,
    /// Categories that were overwritten
    pub restored: Vec<EntityCategory>,
    /// The snapshot taken before overwriting, if one was requested and made
    pub safety_snapshot: Option<BackupSnapshot>,
}

impl RestoreOutcome {
    fn new() -> Self {
        Self {
            success: false,
            errors: Vec::new(),
            phase: RestorePhase::Requested,
            restored: Vec::new(),
            safety_snapshot: None,
        }
    }

    fn enter(&mut self, phase: RestorePhase) {
        debug!(from = %self.phase, to = %phase, "Restore phase");
        self.phase = phase;
    }

    fn finish(&mut self) {
        self.success = self.errors.is_empty();
        let phase = if self.success {
            RestorePhase::Committed
        } else {
            RestorePhase::Failed
        };
        self.enter(phase);
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{}: {} categor{} restored",
            self.phase,
            self.restored.len(),
            if self.restored.len() == 1 { "y" } else { "ies" }
        );
        if !self.errors.is_empty() {
            summary.push_str(&format!(", {} failed", self.errors.len()));
        }
        if let Some(safety) = &self.safety_snapshot {
            summary.push_str(&format!(", safety backup {}", safety.id));
        }
        summary
    }
}

/// Label of the snapshot taken before a restore overwrites anything
pub fn safety_backup_label(snapshot_id: SnapshotId) -> String {
    format!("Before restore of {}", snapshot_id)
}

/// Service for restoring snapshots
pub struct RestoreService<'a> {
    storage: &'a Storage,
}

impl<'a> RestoreService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Restore a snapshot into the current track
    ///
    /// Returns `Err` only when nothing was touched: the snapshot is unknown
    /// or its payload fails verification. Everything after that point is
    /// reported through the outcome.
    pub fn restore(
        &self,
        ctx: &VaultContext,
        options: &RestoreOptions,
    ) -> VaultResult<RestoreOutcome> {
        let _guard = self.storage.lock()?;

        let snapshot_id = options.snapshot_id;
        if self.storage.snapshots.get(snapshot_id)?.is_none() {
            return Err(VaultError::snapshot_not_found(snapshot_id.to_string()));
        }

        let archive = self.storage.snapshots.load_archive(snapshot_id)?;
        archive.verify()?;

        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;
        let mut outcome = RestoreOutcome::new();

        if options.create_backup_first {
            outcome.enter(RestorePhase::SafetyBackup);

            // No pruning here: the safety backup must never cost an older snapshot
            let snapshots = SnapshotService::new(self.storage);
            match snapshots.capture(
                track_id,
                SnapshotKind::Manual,
                Some(safety_backup_label(snapshot_id)),
            ) {
                Ok(safety) => outcome.safety_snapshot = Some(safety),
                Err(e) => {
                    warn!(snapshot_id = %snapshot_id, error = %e, "Safety backup failed, restore aborted");
                    outcome.errors.push(format!("Safety backup failed: {}", e));
                    outcome.finish();
                    self.record(snapshot_id, &outcome);
                    return Ok(outcome);
                }
            }
        }

        outcome.enter(RestorePhase::Applying);

        for category in options.selected_categories() {
            let records = archive.payload.records(category);
            match self
                .storage
                .entities
                .write_collection(track_id, category, records)
            {
                Ok(()) => outcome.restored.push(category),
                Err(e) => {
                    warn!(
                        snapshot_id = %snapshot_id,
                        category = %category,
                        error = %e,
                        "Failed to restore category"
                    );
                    outcome.errors.push(format!("{}: {}", category, e));
                }
            }
        }

        outcome.finish();
        info!(
            snapshot_id = %snapshot_id,
            track_id = %track_id,
            restored = outcome.restored.len(),
            failed = outcome.errors.len(),
            "Restore finished"
        );
        self.record(snapshot_id, &outcome);

        Ok(outcome)
    }

    fn record(&self, snapshot_id: SnapshotId, outcome: &RestoreOutcome) {
        self.storage.record(AuditEntry::restore(
            self.storage.now(),
            snapshot_id.to_string(),
            outcome.summary(),
        ));
    }
}
