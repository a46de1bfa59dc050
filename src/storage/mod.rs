//! Storage layer for Fitvault
//!
//! Everything the vault persists goes through a `BlobStore`: the settings
//! record, the track table, the snapshot index and archives, and the live
//! entity collections of each track. `Storage` ties the repositories
//! together with the operation lock, the clock and the audit log.

pub mod blob;
pub mod entities;
pub mod file_io;
pub mod memory;
pub mod settings;
pub mod snapshots;
pub mod tracks;

pub use blob::{BlobStore, FileStore};
pub use entities::EntityRepository;
pub use file_io::{read_json, write_json};
pub use memory::MemoryStore;
pub use settings::SettingsRepository;
pub use snapshots::SnapshotRepository;
pub use tracks::TrackRepository;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::VaultPaths;
use crate::error::{VaultError, VaultResult};

/// Source of "now" for timestamps, age checks and schedules
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: Option<VaultPaths>,
    pub settings: SettingsRepository,
    pub tracks: TrackRepository,
    pub snapshots: SnapshotRepository,
    pub entities: EntityRepository,
    audit: Option<AuditLogger>,
    /// Serializes snapshot creation, restore, deletion and live writes
    op_lock: Mutex<()>,
    clock: Clock,
}

impl Storage {
    /// Open the file-backed vault under `paths`
    pub fn open(paths: VaultPaths) -> VaultResult<Self> {
        paths.ensure_directories()?;

        let store: Arc<dyn BlobStore> = Arc::new(FileStore::new(paths.store_dir()));
        let mut storage = Self::build(store, Some(AuditLogger::new(paths.audit_log())));
        storage.paths = Some(paths);
        storage.load_all()?;
        Ok(storage)
    }

    /// Open a vault over any blob store, without an audit log
    pub fn with_store(store: Arc<dyn BlobStore>) -> VaultResult<Self> {
        let storage = Self::build(store, None);
        storage.load_all()?;
        Ok(storage)
    }

    /// A fresh vault held entirely in memory
    pub fn in_memory() -> VaultResult<Self> {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    fn build(store: Arc<dyn BlobStore>, audit: Option<AuditLogger>) -> Self {
        Self {
            paths: None,
            settings: SettingsRepository::new(store.clone()),
            tracks: TrackRepository::new(store.clone()),
            snapshots: SnapshotRepository::new(store.clone()),
            entities: EntityRepository::new(store),
            audit,
            op_lock: Mutex::new(()),
            clock: Arc::new(Utc::now),
        }
    }

    /// Load the track table and snapshot index
    fn load_all(&self) -> VaultResult<()> {
        if let Some(track) = self.tracks.load(self.now())? {
            self.tracks.save()?;
            info!(track_id = %track.id, name = %track.name, "Assigned default track");
        }
        self.snapshots.load()?;
        Ok(())
    }

    /// Replace the clock (tests and simulations)
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn paths(&self) -> Option<&VaultPaths> {
        self.paths.as_ref()
    }

    /// Take the vault-wide operation lock
    pub fn lock(&self) -> VaultResult<MutexGuard<'_, ()>> {
        self.op_lock.lock().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire operation lock: {}", e))
        })
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Append to the audit log
    ///
    /// The audited operation has already been persisted, so a logging
    /// failure is reported through tracing rather than failing it.
    pub fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(
                    operation = %entry.operation,
                    entity_id = %entry.entity_id,
                    error = %e,
                    "Failed to write audit entry"
                );
            }
        }
    }
}
