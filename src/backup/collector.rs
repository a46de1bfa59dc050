//! Entity collection for snapshots
//!
//! Reads every tracked collection of a track into a payload and measures it.
//! Callers hold the storage operation lock so no writer can change a
//! collection halfway through.

use tracing::warn;

use crate::error::{VaultError, VaultResult};
use crate::models::{EntityCategory, EntityCounts, Payload, TrackId};
use crate::storage::Storage;

/// The captured state of one track
#[derive(Debug, Clone)]
pub struct CollectedState {
    pub counts: EntityCounts,
    pub payload: Payload,
    /// Byte length of the serialized payload
    pub size: u64,
}

pub struct EntityCollector<'a> {
    storage: &'a Storage,
}

impl<'a> EntityCollector<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Gather every category of `track_id`
    ///
    /// A collection that cannot be read is captured as empty and logged;
    /// the collect as a whole still succeeds.
    pub fn collect(&self, track_id: TrackId) -> VaultResult<CollectedState> {
        let mut payload = Payload::new();

        for category in EntityCategory::all() {
            let records = match self.storage.entities.read_collection(track_id, *category) {
                Ok(records) => records,
                Err(e) => {
                    warn!(
                        track_id = %track_id,
                        category = %category,
                        error = %e,
                        "Collection unreadable, capturing it as empty"
                    );
                    Vec::new()
                }
            };
            payload.insert(*category, records);
        }

        let size = payload
            .to_bytes()
            .map_err(|e| VaultError::Json(format!("Failed to serialize snapshot payload: {}", e)))?
            .len() as u64;

        Ok(CollectedState {
            counts: payload.counts(),
            payload,
            size,
        })
    }
}
