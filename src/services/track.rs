//! Track service
//!
//! Tracks are independent snapshot histories, each with its own live
//! dataset. Which track is current travels in an explicit `VaultContext`;
//! the pointer is also persisted so the next session resumes where this one
//! left off.

use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{VaultError, VaultResult};
use crate::models::{BackupTrack, IdQuery, TrackId};
use crate::storage::Storage;

/// Per-session view of the vault: which track operations apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultContext {
    current_track: TrackId,
}

impl VaultContext {
    pub fn new(current_track: TrackId) -> Self {
        Self { current_track }
    }

    pub fn current_track(&self) -> TrackId {
        self.current_track
    }
}

/// A track together with the number of snapshots in its history
#[derive(Debug, Clone)]
pub struct TrackSummary {
    pub track: BackupTrack,
    pub snapshot_count: usize,
    pub is_current: bool,
}

/// Service for track management
pub struct TrackService<'a> {
    storage: &'a Storage,
}

impl<'a> TrackService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Build a context from the persisted pointer
    ///
    /// A missing or dangling pointer resolves to the default track.
    pub fn open_context(&self) -> VaultResult<VaultContext> {
        if let Some(id) = self.storage.tracks.current_pointer()? {
            if self.storage.tracks.exists(id)? {
                return Ok(VaultContext::new(id));
            }
            warn!(track_id = %id, "Current track pointer is dangling, using default track");
        }

        let default = self.storage.tracks.default_track()?;
        Ok(VaultContext::new(default.id))
    }

    /// All tracks, default first
    pub fn list(&self) -> VaultResult<Vec<BackupTrack>> {
        self.storage.tracks.get_all()
    }

    /// All tracks with their snapshot counts
    pub fn list_with_counts(&self, ctx: &VaultContext) -> VaultResult<Vec<TrackSummary>> {
        let current = self.current_track_id(ctx)?;
        let snapshots = self.storage.snapshots.get_all()?;

        Ok(self
            .list()?
            .into_iter()
            .map(|track| TrackSummary {
                snapshot_count: snapshots.iter().filter(|s| s.track_id == track.id).count(),
                is_current: track.id == current,
                track,
            })
            .collect())
    }

    pub fn get(&self, id: TrackId) -> VaultResult<Option<BackupTrack>> {
        self.storage.tracks.get(id)
    }

    /// The track the context points at
    ///
    /// A context whose track has vanished falls back to the default track.
    pub fn current_track_id(&self, ctx: &VaultContext) -> VaultResult<TrackId> {
        if self.storage.tracks.exists(ctx.current_track)? {
            return Ok(ctx.current_track);
        }

        warn!(track_id = %ctx.current_track, "Context track not found, using default track");
        Ok(self.storage.tracks.default_track()?.id)
    }

    pub fn current_track(&self, ctx: &VaultContext) -> VaultResult<BackupTrack> {
        let id = self.current_track_id(ctx)?;
        self.get(id)?.ok_or_else(|| VaultError::track_not_found(id.to_string()))
    }

    /// Find a track by name, full id, short display id (`trk-1a2b3c4d`), or a
    /// unique prefix of its uuid
    pub fn find(&self, identifier: &str) -> VaultResult<Option<BackupTrack>> {
        let identifier = identifier.trim();

        if let Some(track) = self.storage.tracks.get_by_name(identifier)? {
            return Ok(Some(track));
        }

        let prefix = match TrackId::query(identifier) {
            None => return Ok(None),
            Some(IdQuery::Exact(id)) => return self.get(id),
            Some(IdQuery::Prefix(prefix)) => prefix,
        };

        let mut matches = self.list()?.into_iter().filter(|t| t.id.starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(track), None) => Ok(Some(track)),
            (Some(_), Some(_)) => Err(VaultError::Validation(format!(
                "Track id '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// Find a track or fail with a track-not-found error
    pub fn resolve(&self, identifier: &str) -> VaultResult<BackupTrack> {
        self.find(identifier)?
            .ok_or_else(|| VaultError::track_not_found(identifier))
    }

    /// Move the current track pointer
    ///
    /// Takes the operation lock so the move cannot overlap a snapshot being
    /// attributed to the previous track.
    pub fn set_current(&self, ctx: &mut VaultContext, id: TrackId) -> VaultResult<()> {
        let _guard = self.storage.lock()?;

        let track = self
            .get(id)?
            .ok_or_else(|| VaultError::track_not_found(id.to_string()))?;

        let previous = ctx.current_track;
        let persisted = self.storage.tracks.current_pointer()?;
        self.storage.tracks.set_current_pointer(Some(id))?;
        if let Err(e) = self.storage.tracks.save() {
            self.storage.tracks.set_current_pointer(persisted)?;
            return Err(e);
        }
        ctx.current_track = id;

        if previous != id {
            info!(track_id = %id, name = %track.name, "Switched current track");
            let previous_name = self.get(previous)?.map(|t| t.name);
            self.storage.record(AuditEntry::switch(
                self.storage.now(),
                id.to_string(),
                track.name,
                previous_name,
            ));
        }

        Ok(())
    }

    /// Branch a new track off the current one
    ///
    /// The new track starts with a copy of the current track's live data and
    /// an empty snapshot history.
    pub fn create(
        &self,
        ctx: &VaultContext,
        name: &str,
        description: Option<String>,
    ) -> VaultResult<BackupTrack> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::Validation("Track name cannot be empty".into()));
        }

        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let _guard = self.storage.lock()?;

        if self.storage.tracks.name_exists(name)? {
            return Err(VaultError::Duplicate {
                entity_type: "Track",
                identifier: name.to_string(),
            });
        }

        let parent = self.current_track_id(ctx)?;
        let track = BackupTrack::branch(name, description, parent, self.storage.now());

        self.storage.entities.copy_track(parent, track.id)?;

        self.storage.tracks.insert(track.clone())?;
        if let Err(e) = self.storage.tracks.save() {
            self.storage.tracks.remove_unsaved(track.id)?;
            return Err(e);
        }

        info!(track_id = %track.id, name = %track.name, parent = %parent, "Created track");
        self.storage.record(AuditEntry::create(
            self.storage.now(),
            EntityType::Track,
            track.id.to_string(),
            Some(track.name.clone()),
            &track,
        ));

        Ok(track)
    }
}
