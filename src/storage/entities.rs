//! Live entity repository
//!
//! The live collections of each track, one document per category under
//! `live/<track-uuid>/<category>.json`. Records are opaque JSON values owned
//! by the host application.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{VaultError, VaultResult};
use crate::models::{EntityCategory, TrackId};

use super::blob::BlobStore;
use super::file_io::{read_json, write_json};

fn collection_key(track_id: TrackId, category: EntityCategory) -> String {
    format!("live/{}/{}.json", track_id.as_uuid(), category.key())
}

/// Repository for the live (current) entity data of every track
pub struct EntityRepository {
    store: Arc<dyn BlobStore>,
}

impl EntityRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Read one collection; a collection never written is empty
    pub fn read_collection(
        &self,
        track_id: TrackId,
        category: EntityCategory,
    ) -> VaultResult<Vec<Value>> {
        read_json(self.store.as_ref(), &collection_key(track_id, category))
    }

    /// Replace one collection wholesale
    pub fn write_collection(
        &self,
        track_id: TrackId,
        category: EntityCategory,
        records: &[Value],
    ) -> VaultResult<()> {
        write_json(self.store.as_ref(), &collection_key(track_id, category), records)
    }

    /// Append one record to a collection
    pub fn append_record(
        &self,
        track_id: TrackId,
        category: EntityCategory,
        record: Value,
    ) -> VaultResult<usize> {
        let mut records = self.read_collection(track_id, category)?;
        records.push(record);
        self.write_collection(track_id, category, &records)?;
        Ok(records.len())
    }

    /// Copy every collection of `from` onto `to`
    ///
    /// Collections absent under `from` are written as empty so the target
    /// never inherits stale data.
    pub fn copy_track(&self, from: TrackId, to: TrackId) -> VaultResult<()> {
        for category in EntityCategory::all() {
            let records = self.read_collection(from, *category).map_err(|e| {
                VaultError::Storage(format!("Failed to copy {}: {}", category, e))
            })?;
            self.write_collection(to, *category, &records)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn create_test_repo() -> EntityRepository {
        EntityRepository::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let repo = create_test_repo();
        let records = repo
            .read_collection(TrackId::new(), EntityCategory::Meals)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_write_replaces_collection() {
        let repo = create_test_repo();
        let track = TrackId::new();

        repo.write_collection(track, EntityCategory::Goals, &[json!({"target": 75})])
            .unwrap();
        repo.write_collection(track, EntityCategory::Goals, &[]).unwrap();

        assert!(repo
            .read_collection(track, EntityCategory::Goals)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_append_record() {
        let repo = create_test_repo();
        let track = TrackId::new();

        repo.append_record(track, EntityCategory::Vitals, json!({"bpm": 58}))
            .unwrap();
        let count = repo
            .append_record(track, EntityCategory::Vitals, json!({"bpm": 61}))
            .unwrap();

        assert_eq!(count, 2);
    }

    #[test]
    fn test_copy_track_is_independent() {
        let repo = create_test_repo();
        let main = TrackId::new();
        let branch = TrackId::new();

        repo.append_record(main, EntityCategory::Meals, json!({"name": "Oats"}))
            .unwrap();
        repo.copy_track(main, branch).unwrap();
        repo.append_record(branch, EntityCategory::Meals, json!({"name": "Eggs"}))
            .unwrap();

        assert_eq!(repo.read_collection(main, EntityCategory::Meals).unwrap().len(), 1);
        assert_eq!(repo.read_collection(branch, EntityCategory::Meals).unwrap().len(), 2);
    }
}
