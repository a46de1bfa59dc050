//! Live data access for the host application
//!
//! Writes go through the operation lock so they can never interleave with a
//! snapshot being collected or a restore being applied.

use serde_json::Value;
use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::models::EntityCategory;
use crate::storage::Storage;

use super::track::{TrackService, VaultContext};

pub struct DataService<'a> {
    storage: &'a Storage,
}

impl<'a> DataService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Records of one category on the current track
    pub fn list(&self, ctx: &VaultContext, category: EntityCategory) -> VaultResult<Vec<Value>> {
        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;
        self.storage.entities.read_collection(track_id, category)
    }

    /// Append a record; returns the new collection size
    pub fn add(
        &self,
        ctx: &VaultContext,
        category: EntityCategory,
        record: Value,
    ) -> VaultResult<usize> {
        if !record.is_object() {
            return Err(VaultError::Validation(format!(
                "A {} record must be a JSON object",
                category
            )));
        }

        let _guard = self.storage.lock()?;
        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;
        let count = self.storage.entities.append_record(track_id, category, record)?;
        debug!(track_id = %track_id, category = %category, count, "Appended record");
        Ok(count)
    }

    /// Replace a whole collection on the current track
    pub fn replace(
        &self,
        ctx: &VaultContext,
        category: EntityCategory,
        records: &[Value],
    ) -> VaultResult<()> {
        let _guard = self.storage.lock()?;
        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;
        self.storage
            .entities
            .write_collection(track_id, category, records)
    }
}
