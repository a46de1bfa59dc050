//! Snapshot repository
//!
//! Snapshot metadata lives in a single index document
//! (`snapshots/index.json`) that supports listing by track and ordering by
//! timestamp without touching payloads. Each snapshot's archive (metadata +
//! payload) is stored under `snapshots/<uuid>.json`.

use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::{VaultError, VaultResult};
use crate::models::{BackupSnapshot, SnapshotArchive, SnapshotId, TrackId};

use super::blob::BlobStore;
use super::file_io::{read_json_optional, write_json};

const INDEX_KEY: &str = "snapshots/index.json";
const ARCHIVE_PREFIX: &str = "snapshots/";

fn archive_key(id: SnapshotId) -> String {
    format!("{}{}.json", ARCHIVE_PREFIX, id.as_uuid())
}

/// Repository for snapshot persistence
pub struct SnapshotRepository {
    store: Arc<dyn BlobStore>,
    index: RwLock<Vec<BackupSnapshot>>,
}

impl SnapshotRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            index: RwLock::new(Vec::new()),
        }
    }

    /// Load the index, rebuilding it from the archives if it is missing
    pub fn load(&self) -> VaultResult<()> {
        let entries = match read_json_optional::<Vec<BackupSnapshot>>(self.store.as_ref(), INDEX_KEY)? {
            Some(entries) => entries,
            None => self.scan_archives()?,
        };

        let mut index = self.index.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *index = entries;
        Ok(())
    }

    fn scan_archives(&self) -> VaultResult<Vec<BackupSnapshot>> {
        let mut entries = Vec::new();
        for key in self.store.list(ARCHIVE_PREFIX)? {
            if key == INDEX_KEY {
                continue;
            }
            match read_json_optional::<SnapshotArchive>(self.store.as_ref(), &key) {
                Ok(Some(archive)) => entries.push(archive.snapshot),
                Ok(None) => {}
                Err(e) => warn!(key = %key, error = %e, "Skipping unreadable snapshot archive"),
            }
        }
        if !entries.is_empty() {
            warn!(count = entries.len(), "Snapshot index missing, rebuilt from archives");
        }
        Ok(entries)
    }

    fn save_index(&self, entries: &[BackupSnapshot]) -> VaultResult<()> {
        write_json(self.store.as_ref(), INDEX_KEY, entries)
    }

    /// Persist a new snapshot: archive first, then the index entry
    ///
    /// If the index cannot be written the archive is removed again, so a
    /// failed insert leaves no trace.
    pub fn insert(&self, archive: &SnapshotArchive) -> VaultResult<()> {
        let key = archive_key(archive.snapshot.id);
        write_json(self.store.as_ref(), &key, archive)?;

        let mut index = self.index.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut updated = index.clone();
        updated.push(archive.snapshot.clone());

        if let Err(e) = self.save_index(&updated) {
            if let Err(cleanup) = self.store.remove(&key) {
                warn!(key = %key, error = %cleanup, "Failed to remove orphaned snapshot archive");
            }
            return Err(e);
        }

        *index = updated;
        Ok(())
    }

    /// Remove a snapshot; returns None if it did not exist
    pub fn remove(&self, id: SnapshotId) -> VaultResult<Option<BackupSnapshot>> {
        let mut index = self.index.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let Some(position) = index.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        let mut updated = index.clone();
        let removed = updated.remove(position);
        self.save_index(&updated)?;
        *index = updated;

        // The index no longer references it; a leftover archive is only wasted space
        let key = archive_key(id);
        if let Err(e) = self.store.remove(&key) {
            warn!(key = %key, error = %e, "Failed to remove snapshot archive");
        }

        Ok(Some(removed))
    }

    pub fn get(&self, id: SnapshotId) -> VaultResult<Option<BackupSnapshot>> {
        let index = self.index.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(index.iter().find(|s| s.id == id).cloned())
    }

    /// All snapshots of every track, newest first
    pub fn get_all(&self) -> VaultResult<Vec<BackupSnapshot>> {
        let index = self.index.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        // Index is in insertion order; reversing first makes the stable
        // sort put the later of two equal timestamps first
        let mut snapshots: Vec<BackupSnapshot> = index.iter().rev().cloned().collect();
        snapshots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(snapshots)
    }

    /// Snapshots of one track, newest first
    pub fn get_by_track(&self, track_id: TrackId) -> VaultResult<Vec<BackupSnapshot>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|s| s.track_id == track_id)
            .collect())
    }

    pub fn count(&self) -> VaultResult<usize> {
        let index = self.index.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(index.len())
    }

    /// Load the full archive (metadata + payload) of a snapshot
    pub fn load_archive(&self, id: SnapshotId) -> VaultResult<SnapshotArchive> {
        let key = archive_key(id);
        let archive: SnapshotArchive = read_json_optional(self.store.as_ref(), &key)
            .map_err(|e| VaultError::CorruptSnapshot {
                id: id.to_string(),
                reason: e.to_string(),
            })?
            .ok_or_else(|| VaultError::CorruptSnapshot {
                id: id.to_string(),
                reason: "archive is missing from storage".into(),
            })?;

        if archive.snapshot.id != id {
            return Err(VaultError::CorruptSnapshot {
                id: id.to_string(),
                reason: format!("archive belongs to {}", archive.snapshot.id),
            });
        }

        Ok(archive)
    }
}
