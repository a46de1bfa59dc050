//! Snapshot service
//!
//! Creates, lists, deletes, verifies, exports and imports snapshots, and
//! enforces retention after each creation. Everything that writes takes the
//! storage operation lock.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::backup::{
    read_archive_file, select_for_pruning, write_archive_file, ArchiveFormat, EntityCollector,
};
use crate::error::{VaultError, VaultResult};
use crate::models::{
    BackupSnapshot, IdQuery, Payload, SnapshotArchive, SnapshotId, SnapshotKind, TrackId,
};
use crate::storage::Storage;

use super::track::{TrackService, VaultContext};

const RETENTION_REASON: &str = "retention";

/// Result of re-checking a stored snapshot against its payload
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub snapshot: BackupSnapshot,
    pub problems: Vec<String>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Service for snapshot management
pub struct SnapshotService<'a> {
    storage: &'a Storage,
}

impl<'a> SnapshotService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Capture the current track's live data as a new snapshot
    ///
    /// Retention runs afterwards; prune failures are logged and never fail
    /// the creation. A write rejected for lack of space surfaces as
    /// `VaultError::StorageFull`.
    pub fn create(
        &self,
        ctx: &VaultContext,
        kind: SnapshotKind,
        label: Option<String>,
    ) -> VaultResult<BackupSnapshot> {
        let _guard = self.storage.lock()?;

        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;
        let snapshot = self.capture(track_id, kind, label)?;
        self.enforce_retention(Some(snapshot.id));

        Ok(snapshot)
    }

    /// Collect and persist a snapshot of `track_id` without pruning
    ///
    /// The caller must hold the operation lock.
    pub(crate) fn capture(
        &self,
        track_id: TrackId,
        kind: SnapshotKind,
        label: Option<String>,
    ) -> VaultResult<BackupSnapshot> {
        let state = EntityCollector::new(self.storage).collect(track_id)?;

        let snapshot = BackupSnapshot {
            id: SnapshotId::new(),
            timestamp: self.storage.now(),
            kind,
            label: normalize_label(label),
            track_id,
            size: state.size,
            entity_counts: state.counts,
        };

        self.storage
            .snapshots
            .insert(&SnapshotArchive::new(snapshot.clone(), state.payload))?;

        info!(
            snapshot_id = %snapshot.id,
            track_id = %track_id,
            kind = %snapshot.kind,
            size = snapshot.size,
            "Created snapshot"
        );
        self.record_created(&snapshot);

        Ok(snapshot)
    }

    fn record_created(&self, snapshot: &BackupSnapshot) {
        self.storage.record(AuditEntry::create(
            self.storage.now(),
            EntityType::Snapshot,
            snapshot.id.to_string(),
            snapshot.label.clone(),
            snapshot,
        ));
    }

    /// Snapshots of a track, newest first; the current track when `track_id` is None
    pub fn list(
        &self,
        ctx: &VaultContext,
        track_id: Option<TrackId>,
    ) -> VaultResult<Vec<BackupSnapshot>> {
        let track_id = match track_id {
            Some(id) => id,
            None => TrackService::new(self.storage).current_track_id(ctx)?,
        };
        self.storage.snapshots.get_by_track(track_id)
    }

    /// Snapshots of every track, newest first
    pub fn list_all(&self) -> VaultResult<Vec<BackupSnapshot>> {
        self.storage.snapshots.get_all()
    }

    /// Look up a snapshot by id, regardless of track
    pub fn get(&self, id: SnapshotId) -> VaultResult<Option<BackupSnapshot>> {
        self.storage.snapshots.get(id)
    }

    /// Latest snapshot of a track
    pub fn latest(&self, track_id: TrackId) -> VaultResult<Option<BackupSnapshot>> {
        Ok(self.storage.snapshots.get_by_track(track_id)?.into_iter().next())
    }

    /// Find a snapshot by full id, short display id (`snap-1a2b3c4d`), or a
    /// unique prefix of its uuid
    pub fn find(&self, identifier: &str) -> VaultResult<Option<BackupSnapshot>> {
        let prefix = match SnapshotId::query(identifier) {
            None => return Ok(None),
            Some(IdQuery::Exact(id)) => return self.get(id),
            Some(IdQuery::Prefix(prefix)) => prefix,
        };

        let mut matches = self
            .list_all()?
            .into_iter()
            .filter(|s| s.id.starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(snapshot), None) => Ok(Some(snapshot)),
            (Some(_), Some(_)) => Err(VaultError::Validation(format!(
                "Snapshot id '{}' is ambiguous",
                identifier.trim()
            ))),
            _ => Ok(None),
        }
    }

    /// Find a snapshot or fail with a snapshot-not-found error
    pub fn resolve(&self, identifier: &str) -> VaultResult<BackupSnapshot> {
        self.find(identifier)?
            .ok_or_else(|| VaultError::snapshot_not_found(identifier))
    }

    /// Delete a snapshot; returns false if it does not exist
    ///
    /// The last snapshot of a track may be deleted.
    pub fn delete(&self, id: SnapshotId) -> VaultResult<bool> {
        let _guard = self.storage.lock()?;

        let Some(removed) = self.storage.snapshots.remove(id)? else {
            debug!(snapshot_id = %id, "Delete requested for unknown snapshot");
            return Ok(false);
        };

        info!(snapshot_id = %id, "Deleted snapshot");
        self.storage.record(AuditEntry::delete(
            self.storage.now(),
            EntityType::Snapshot,
            id.to_string(),
            removed.label.clone(),
            &removed,
            None,
        ));

        Ok(true)
    }

    /// Load and verify the stored archive of a snapshot
    pub fn load_archive(&self, id: SnapshotId) -> VaultResult<SnapshotArchive> {
        if self.get(id)?.is_none() {
            return Err(VaultError::snapshot_not_found(id.to_string()));
        }

        let archive = self.storage.snapshots.load_archive(id)?;
        archive.verify()?;
        Ok(archive)
    }

    /// The captured records of a snapshot
    pub fn load_payload(&self, id: SnapshotId) -> VaultResult<Payload> {
        Ok(self.load_archive(id)?.payload)
    }

    /// Re-derive counts and size from the stored payload
    pub fn verify(&self, id: SnapshotId) -> VaultResult<IntegrityReport> {
        let snapshot = self
            .get(id)?
            .ok_or_else(|| VaultError::snapshot_not_found(id.to_string()))?;

        let mut problems = Vec::new();

        match self.storage.snapshots.load_archive(id) {
            Ok(archive) => {
                if let Err(e) = archive.verify() {
                    problems.push(e.to_string());
                }
                if archive.snapshot.entity_counts != snapshot.entity_counts {
                    problems.push("index counts differ from archive counts".to_string());
                }
                match archive.payload.to_bytes() {
                    Ok(bytes) if bytes.len() as u64 != snapshot.size => problems.push(format!(
                        "recorded size {} does not match payload size {}",
                        snapshot.size,
                        bytes.len()
                    )),
                    Ok(_) => {}
                    Err(e) => problems.push(format!("payload cannot be serialized: {}", e)),
                }
            }
            Err(e) => problems.push(e.to_string()),
        }

        if !problems.is_empty() {
            warn!(snapshot_id = %id, problems = problems.len(), "Snapshot failed verification");
        }

        Ok(IntegrityReport { snapshot, problems })
    }

    /// Apply retention now; returns the ids that were removed
    pub fn prune(&self) -> VaultResult<Vec<SnapshotId>> {
        let _guard = self.storage.lock()?;
        Ok(self.enforce_retention(None))
    }

    /// Delete what retention selects, skipping any delete that fails
    ///
    /// The caller must hold the operation lock.
    pub(crate) fn enforce_retention(&self, protect: Option<SnapshotId>) -> Vec<SnapshotId> {
        let settings = self.storage.settings.load();

        let snapshots = match self.storage.snapshots.get_all() {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!(error = %e, "Could not list snapshots for retention");
                return Vec::new();
            }
        };

        let selected = select_for_pruning(&snapshots, &settings, self.storage.now(), protect);
        if selected.is_empty() {
            return Vec::new();
        }

        debug!(
            total = snapshots.len(),
            max_snapshots = settings.max_snapshots,
            selected = selected.len(),
            "Pruning snapshots"
        );

        let mut removed = Vec::new();
        for id in selected {
            match self.storage.snapshots.remove(id) {
                Ok(Some(snapshot)) => {
                    info!(snapshot_id = %id, "Pruned snapshot");
                    self.storage.record(AuditEntry::delete(
                        self.storage.now(),
                        EntityType::Snapshot,
                        id.to_string(),
                        snapshot.label.clone(),
                        &snapshot,
                        Some(RETENTION_REASON.to_string()),
                    ));
                    removed.push(id);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(snapshot_id = %id, error = %e, "Failed to prune snapshot");
                }
            }
        }

        removed
    }

    /// Write a snapshot archive to a file
    pub fn export(&self, id: SnapshotId, path: &Path, format: ArchiveFormat) -> VaultResult<()> {
        let archive = self.load_archive(id)?;
        write_archive_file(path, &archive, format)?;
        info!(snapshot_id = %id, path = %path.display(), "Exported snapshot");
        Ok(())
    }

    /// Store an exported archive as a new snapshot on the current track
    ///
    /// The archive is verified before anything is written. The imported
    /// snapshot gets a new id and the current time.
    pub fn import(&self, ctx: &VaultContext, path: &Path) -> VaultResult<BackupSnapshot> {
        let archive = read_archive_file(path)?;

        let _guard = self.storage.lock()?;
        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;

        let size = archive
            .payload
            .to_bytes()
            .map_err(|e| VaultError::Json(format!("Failed to serialize snapshot payload: {}", e)))?
            .len() as u64;

        let label = archive
            .snapshot
            .label
            .clone()
            .unwrap_or_else(|| format!("Imported {}", archive.snapshot.id));

        let snapshot = BackupSnapshot {
            id: SnapshotId::new(),
            timestamp: self.storage.now(),
            kind: SnapshotKind::Manual,
            label: Some(label),
            track_id,
            size,
            entity_counts: archive.payload.counts(),
        };

        self.storage
            .snapshots
            .insert(&SnapshotArchive::new(snapshot.clone(), archive.payload))?;

        info!(
            snapshot_id = %snapshot.id,
            source = %archive.snapshot.id,
            path = %path.display(),
            "Imported snapshot"
        );
        self.record_created(&snapshot);
        self.enforce_retention(Some(snapshot.id));

        Ok(snapshot)
    }
}

fn normalize_label(label: Option<String>) -> Option<String> {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsPatch;
    use crate::models::EntityCategory;
    use crate::services::SettingsService;
    use crate::storage::{BlobStore, MemoryStore};
    use chrono::{DateTime, Duration, Utc};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn setup() -> (Storage, VaultContext) {
        let storage = Storage::in_memory().unwrap();
        let ctx = TrackService::new(&storage).open_context().unwrap();
        (storage, ctx)
    }

    /// A clock the test can move
    fn manual_clock(storage: &mut Storage, start: DateTime<Utc>) -> Arc<Mutex<DateTime<Utc>>> {
        let now = Arc::new(Mutex::new(start));
        let handle = now.clone();
        storage.set_clock(Arc::new(move || *handle.lock().unwrap()));
        now
    }

    fn add_meals(storage: &Storage, ctx: &VaultContext, n: usize) {
        for i in 0..n {
            storage
                .entities
                .append_record(ctx.current_track(), EntityCategory::Meals, json!({"n": i}))
                .unwrap();
        }
    }

    #[test]
    fn test_create_snapshot_counts_and_size() {
        let (storage, ctx) = setup();
        add_meals(&storage, &ctx, 3);
        let service = SnapshotService::new(&storage);

        let snapshot = service
            .create(&ctx, SnapshotKind::Manual, Some("  first  ".into()))
            .unwrap();

        assert_eq!(snapshot.track_id, ctx.current_track());
        assert_eq!(snapshot.label.as_deref(), Some("first"));
        assert_eq!(snapshot.entity_counts.get(EntityCategory::Meals), 3);
        assert_eq!(snapshot.entity_counts.get(EntityCategory::Weights), 0);

        let payload = service.load_payload(snapshot.id).unwrap();
        assert_eq!(payload.records(EntityCategory::Meals).len(), 3);
        assert_eq!(payload.to_bytes().unwrap().len() as u64, snapshot.size);
        assert_eq!(payload.counts(), snapshot.entity_counts);
    }

    #[test]
    fn test_blank_label_is_dropped() {
        let (storage, ctx) = setup();
        let snapshot = SnapshotService::new(&storage)
            .create(&ctx, SnapshotKind::Auto, Some("   ".into()))
            .unwrap();
        assert!(snapshot.label.is_none());
    }

    #[test]
    fn test_list_newest_first_and_get() {
        let (mut storage, ctx) = setup();
        let clock = manual_clock(&mut storage, Utc::now());
        let service = SnapshotService::new(&storage);

        let first = service.create(&ctx, SnapshotKind::Manual, None).unwrap();
        *clock.lock().unwrap() += Duration::minutes(5);
        let second = service.create(&ctx, SnapshotKind::Manual, None).unwrap();

        let listed = service.list(&ctx, None).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(service.get(first.id).unwrap().unwrap().id, first.id);
        assert!(service.get(SnapshotId::new()).unwrap().is_none());
    }

    #[test]
    fn test_delete_snapshot() {
        let (storage, ctx) = setup();
        let service = SnapshotService::new(&storage);
        let snapshot = service.create(&ctx, SnapshotKind::Manual, None).unwrap();

        assert!(service.delete(snapshot.id).unwrap());
        assert!(!service.delete(snapshot.id).unwrap());
        assert!(service.list(&ctx, None).unwrap().is_empty());
    }

    #[test]
    fn test_track_isolation() {
        let (storage, mut ctx) = setup();
        let tracks = TrackService::new(&storage);
        let service = SnapshotService::new(&storage);
        let main = ctx.current_track();

        let other = tracks.create(&ctx, "experiment", None).unwrap();
        tracks.set_current(&mut ctx, other.id).unwrap();
        service.create(&ctx, SnapshotKind::Manual, None).unwrap();
        service.create(&ctx, SnapshotKind::Auto, None).unwrap();

        assert_eq!(service.list(&ctx, None).unwrap().len(), 2);
        assert!(service.list(&ctx, Some(main)).unwrap().is_empty());
    }

    #[test]
    fn test_retention_keeps_most_recent() {
        let (mut storage, ctx) = setup();
        let clock = manual_clock(&mut storage, Utc::now() - Duration::days(400));

        SettingsService::new(&storage)
            .save(&SettingsPatch {
                max_snapshots: Some(3),
                retention_days: Some(30),
                ..Default::default()
            })
            .unwrap();

        let service = SnapshotService::new(&storage);
        let mut created = Vec::new();
        for _ in 0..8 {
            created.push(service.create(&ctx, SnapshotKind::Auto, None).unwrap().id);
            *clock.lock().unwrap() += Duration::days(40);
        }

        let kept: Vec<SnapshotId> = service
            .list(&ctx, None)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();

        assert!(kept.len() <= 3);
        let expected: Vec<SnapshotId> = created.iter().rev().take(kept.len()).copied().collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_retention_spares_young_snapshots() {
        let (storage, ctx) = setup();
        SettingsService::new(&storage)
            .save(&SettingsPatch {
                max_snapshots: Some(1),
                ..Default::default()
            })
            .unwrap();

        let service = SnapshotService::new(&storage);
        for _ in 0..3 {
            service.create(&ctx, SnapshotKind::Manual, None).unwrap();
        }

        // All are younger than retention_days, so nothing is pruned
        assert_eq!(service.list(&ctx, None).unwrap().len(), 3);
        assert!(service.prune().unwrap().is_empty());
    }

    #[test]
    fn test_equal_timestamps_list_latest_first() {
        let (mut storage, ctx) = setup();
        manual_clock(&mut storage, Utc::now());
        let service = SnapshotService::new(&storage);

        let first = service
            .create(&ctx, SnapshotKind::Manual, Some("first".into()))
            .unwrap();
        let second = service
            .create(&ctx, SnapshotKind::Manual, Some("second".into()))
            .unwrap();
        assert_eq!(first.timestamp, second.timestamp);

        let listed = service.list(&ctx, None).unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(service.latest(ctx.current_track()).unwrap().unwrap().id, second.id);
    }

    #[test]
    fn test_huge_retention_window_does_not_poison_lock() {
        let (mut storage, mut ctx) = setup();
        let clock = manual_clock(&mut storage, Utc::now());
        SettingsService::new(&storage)
            .save(&SettingsPatch {
                max_snapshots: Some(1),
                retention_days: Some(1_000_000_000),
                ..Default::default()
            })
            .unwrap();

        let service = SnapshotService::new(&storage);
        service.create(&ctx, SnapshotKind::Manual, None).unwrap();
        *clock.lock().unwrap() += Duration::days(3650);
        service.create(&ctx, SnapshotKind::Manual, None).unwrap();

        // Nothing is old enough, and later locked operations still work
        assert_eq!(service.list(&ctx, None).unwrap().len(), 2);
        let tracks = TrackService::new(&storage);
        let other = tracks.create(&ctx, "after", None).unwrap();
        tracks.set_current(&mut ctx, other.id).unwrap();
    }

    #[test]
    fn test_prune_after_time_passes() {
        let (mut storage, ctx) = setup();
        let clock = manual_clock(&mut storage, Utc::now());
        SettingsService::new(&storage)
            .save(&SettingsPatch {
                max_snapshots: Some(2),
                retention_days: Some(7),
                ..Default::default()
            })
            .unwrap();

        let service = SnapshotService::new(&storage);
        for _ in 0..4 {
            service.create(&ctx, SnapshotKind::Manual, None).unwrap();
            *clock.lock().unwrap() += Duration::seconds(1);
        }
        assert_eq!(service.list(&ctx, None).unwrap().len(), 4);

        *clock.lock().unwrap() += Duration::days(8);
        let removed = service.prune().unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(service.list(&ctx, None).unwrap().len(), 2);
    }

    /// Lets the next snapshot index write through, then rejects the rest
    struct FlakyIndexStore {
        inner: MemoryStore,
        armed: AtomicBool,
        index_writes: AtomicUsize,
    }

    impl BlobStore for FlakyIndexStore {
        fn read(&self, key: &str) -> VaultResult<Option<Vec<u8>>> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, bytes: &[u8]) -> VaultResult<()> {
            if self.armed.load(Ordering::SeqCst)
                && key == "snapshots/index.json"
                && self.index_writes.fetch_add(1, Ordering::SeqCst) >= 1
            {
                return Err(VaultError::Storage("simulated failure".into()));
            }
            self.inner.write(key, bytes)
        }

        fn remove(&self, key: &str) -> VaultResult<bool> {
            self.inner.remove(key)
        }

        fn list(&self, prefix: &str) -> VaultResult<Vec<String>> {
            self.inner.list(prefix)
        }
    }

    #[test]
    fn test_prune_failure_does_not_fail_create() {
        let store = Arc::new(FlakyIndexStore {
            inner: MemoryStore::new(),
            armed: AtomicBool::new(false),
            index_writes: AtomicUsize::new(0),
        });
        let mut storage = Storage::with_store(store.clone()).unwrap();
        let clock = manual_clock(&mut storage, Utc::now() - Duration::days(10));
        let ctx = TrackService::new(&storage).open_context().unwrap();

        SettingsService::new(&storage)
            .save(&SettingsPatch {
                max_snapshots: Some(1),
                retention_days: Some(1),
                ..Default::default()
            })
            .unwrap();

        let service = SnapshotService::new(&storage);
        let old = service.create(&ctx, SnapshotKind::Manual, None).unwrap();
        *clock.lock().unwrap() += Duration::days(5);

        store.armed.store(true, Ordering::SeqCst);
        let new = service.create(&ctx, SnapshotKind::Manual, None).unwrap();

        // The prune of `old` failed and was skipped
        assert!(service.get(old.id).unwrap().is_some());
        assert!(service.get(new.id).unwrap().is_some());
    }

    #[test]
    fn test_storage_full_propagates() {
        let storage = Storage::with_store(Arc::new(MemoryStore::with_quota(2048))).unwrap();
        let ctx = TrackService::new(&storage).open_context().unwrap();
        storage
            .entities
            .write_collection(
                ctx.current_track(),
                EntityCategory::Recipes,
                &[json!({"notes": "x".repeat(1500)})],
            )
            .unwrap();

        let err = SnapshotService::new(&storage)
            .create(&ctx, SnapshotKind::Manual, None)
            .unwrap_err();
        assert!(err.is_storage_full());
        assert_eq!(storage.snapshots.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_short_id() {
        let (storage, ctx) = setup();
        let service = SnapshotService::new(&storage);
        let snapshot = service.create(&ctx, SnapshotKind::Manual, None).unwrap();

        let short = snapshot.id.to_string();
        assert_eq!(service.find(&short).unwrap().unwrap().id, snapshot.id);
        assert_eq!(
            service
                .find(&snapshot.id.as_uuid().to_string())
                .unwrap()
                .unwrap()
                .id,
            snapshot.id
        );
        assert!(service.resolve("snap-zzzzzzzz").unwrap_err().is_snapshot_not_found());
    }

    #[test]
    fn test_verify_reports_clean_snapshot() {
        let (storage, ctx) = setup();
        add_meals(&storage, &ctx, 2);
        let service = SnapshotService::new(&storage);
        let snapshot = service.create(&ctx, SnapshotKind::Manual, None).unwrap();

        let report = service.verify(snapshot.id).unwrap();
        assert!(report.is_ok(), "{:?}", report.problems);
        assert!(service.verify(SnapshotId::new()).unwrap_err().is_snapshot_not_found());
    }

    #[test]
    fn test_export_then_import_on_other_track() {
        let temp = TempDir::new().unwrap();
        let (storage, mut ctx) = setup();
        add_meals(&storage, &ctx, 4);
        let service = SnapshotService::new(&storage);
        let original = service
            .create(&ctx, SnapshotKind::Manual, Some("week 1".into()))
            .unwrap();

        let path = temp.path().join("week1.yaml");
        service.export(original.id, &path, ArchiveFormat::Yaml).unwrap();

        let tracks = TrackService::new(&storage);
        let other = tracks.create(&ctx, "import-target", None).unwrap();
        tracks.set_current(&mut ctx, other.id).unwrap();

        let imported = service.import(&ctx, &path).unwrap();
        assert_ne!(imported.id, original.id);
        assert_eq!(imported.track_id, other.id);
        assert_eq!(imported.label.as_deref(), Some("week 1"));
        assert_eq!(imported.entity_counts, original.entity_counts);
        assert_eq!(
            service.load_payload(imported.id).unwrap(),
            service.load_payload(original.id).unwrap()
        );
    }

    #[test]
    fn test_snapshot_audited() {
        let temp = TempDir::new().unwrap();
        let paths = crate::config::VaultPaths::with_base_dir(temp.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let ctx = TrackService::new(&storage).open_context().unwrap();
        let service = SnapshotService::new(&storage);

        let snapshot = service.create(&ctx, SnapshotKind::Manual, None).unwrap();
        service.delete(snapshot.id).unwrap();

        let entries = storage.audit_logger().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_id, snapshot.id.to_string());
    }
}
