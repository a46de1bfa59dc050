//! Track repository
//!
//! Manages the track table and the persisted current-track pointer in
//! `tracks.json`.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};
use crate::models::{BackupTrack, TrackId, DEFAULT_TRACK_NAME};

use super::blob::BlobStore;
use super::file_io::{read_json, write_json};

const TRACKS_KEY: &str = "tracks.json";

/// Serializable track table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackTable {
    #[serde(default)]
    current_track_id: Option<TrackId>,
    #[serde(default)]
    tracks: Vec<BackupTrack>,
}

/// Repository for track persistence
pub struct TrackRepository {
    store: Arc<dyn BlobStore>,
    data: RwLock<TrackTable>,
}

impl TrackRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            data: RwLock::new(TrackTable::default()),
        }
    }

    /// Load the track table from the store
    ///
    /// Guarantees exactly one default track. When the table has none, a
    /// track named `main` is promoted, or a new one created. Returns that
    /// track, if any, so the caller can save.
    pub fn load(&self, now: DateTime<Utc>) -> VaultResult<Option<BackupTrack>> {
        let mut file_data: TrackTable = read_json(self.store.as_ref(), TRACKS_KEY)?;

        let mut created = None;
        let mut seen_default = false;
        for track in file_data.tracks.iter_mut() {
            if track.is_default && seen_default {
                track.is_default = false;
            }
            seen_default |= track.is_default;
        }

        if !seen_default {
            // A track already named like the default takes the role, keeping
            // names unique
            let existing = file_data
                .tracks
                .iter()
                .position(|t| t.name.eq_ignore_ascii_case(DEFAULT_TRACK_NAME));
            let track = match existing {
                Some(pos) => {
                    let mut track = file_data.tracks.remove(pos);
                    track.is_default = true;
                    track
                }
                None => BackupTrack::default_track(now),
            };
            file_data.tracks.insert(0, track.clone());
            created = Some(track);
        }

        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data;

        Ok(created)
    }

    pub fn save(&self) -> VaultResult<()> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_json(self.store.as_ref(), TRACKS_KEY, &*data)
    }

    pub fn get(&self, id: TrackId) -> VaultResult<Option<BackupTrack>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.tracks.iter().find(|t| t.id == id).cloned())
    }

    /// All tracks, default track first, then by creation time
    pub fn get_all(&self) -> VaultResult<Vec<BackupTrack>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut tracks = data.tracks.clone();
        tracks.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(tracks)
    }

    pub fn default_track(&self) -> VaultResult<BackupTrack> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        data.tracks
            .iter()
            .find(|t| t.is_default)
            .cloned()
            .ok_or_else(|| VaultError::Storage("Track table has no default track".into()))
    }

    /// Get a track by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> VaultResult<Option<BackupTrack>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.to_lowercase();
        Ok(data
            .tracks
            .iter()
            .find(|t| t.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn name_exists(&self, name: &str) -> VaultResult<bool> {
        Ok(self.get_by_name(name)?.is_some())
    }

    pub fn exists(&self, id: TrackId) -> VaultResult<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Insert a track (tracks are never updated once created)
    pub fn insert(&self, track: BackupTrack) -> VaultResult<()> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.tracks.push(track);
        Ok(())
    }

    /// Undo an insert that could not be persisted
    pub fn remove_unsaved(&self, id: TrackId) -> VaultResult<()> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.tracks.retain(|t| t.id != id || t.is_default);
        Ok(())
    }

    /// The persisted current-track pointer, unvalidated
    pub fn current_pointer(&self) -> VaultResult<Option<TrackId>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.current_track_id)
    }

    /// Replace the current-track pointer; None clears it
    pub fn set_current_pointer(&self, id: Option<TrackId>) -> VaultResult<()> {
        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.current_track_id = id;
        Ok(())
    }

    pub fn count(&self) -> VaultResult<usize> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.tracks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn create_test_repo() -> (Arc<MemoryStore>, TrackRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = TrackRepository::new(store.clone());
        (store, repo)
    }

    #[test]
    fn test_load_creates_default_track() {
        let (_store, repo) = create_test_repo();

        let created = repo.load(Utc::now()).unwrap();
        assert!(created.is_some());
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.default_track().unwrap().is_default);
    }

    #[test]
    fn test_default_track_survives_reload() {
        let (store, repo) = create_test_repo();
        repo.load(Utc::now()).unwrap();
        repo.save().unwrap();
        let default_id = repo.default_track().unwrap().id;

        let repo2 = TrackRepository::new(store);
        assert!(repo2.load(Utc::now()).unwrap().is_none());
        assert_eq!(repo2.default_track().unwrap().id, default_id);
    }

    #[test]
    fn test_get_all_default_first() {
        let (_store, repo) = create_test_repo();
        repo.load(Utc::now()).unwrap();
        let main = repo.default_track().unwrap();

        repo.insert(BackupTrack::branch("experiment", None, main.id, Utc::now()))
            .unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].is_default);
        assert_eq!(all[1].name, "experiment");
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let (_store, repo) = create_test_repo();
        repo.load(Utc::now()).unwrap();

        assert!(repo.name_exists("MAIN").unwrap());
        assert!(!repo.name_exists("cutting").unwrap());
    }

    #[test]
    fn test_extra_default_flags_are_dropped() {
        let (store, repo) = create_test_repo();
        let table = TrackTable {
            current_track_id: None,
            tracks: vec![
                BackupTrack::default_track(Utc::now()),
                BackupTrack::default_track(Utc::now()),
            ],
        };
        write_json(store.as_ref(), TRACKS_KEY, &table).unwrap();

        repo.load(Utc::now()).unwrap();
        let defaults = repo
            .get_all()
            .unwrap()
            .into_iter()
            .filter(|t| t.is_default)
            .count();
        assert_eq!(defaults, 1);
    }

    #[test]
    fn test_missing_default_promotes_track_named_main() {
        let (store, repo) = create_test_repo();
        let root = TrackId::new();
        let mut main = BackupTrack::branch("Main", None, root, Utc::now());
        main.is_default = false;
        let table = TrackTable {
            current_track_id: None,
            tracks: vec![
                BackupTrack::branch("experiment", None, root, Utc::now()),
                main.clone(),
            ],
        };
        write_json(store.as_ref(), TRACKS_KEY, &table).unwrap();

        let promoted = repo.load(Utc::now()).unwrap().unwrap();
        assert_eq!(promoted.id, main.id);
        assert_eq!(repo.count().unwrap(), 2);
        assert_eq!(repo.default_track().unwrap().id, main.id);
        let mains = repo
            .get_all()
            .unwrap()
            .into_iter()
            .filter(|t| t.name.eq_ignore_ascii_case("main"))
            .count();
        assert_eq!(mains, 1);
    }
}
