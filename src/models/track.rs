//! Track model
//!
//! A track is a named, independent history of snapshots with its own live
//! dataset, branched from a parent track.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TrackId;

/// Name given to the primordial track
pub const DEFAULT_TRACK_NAME: &str = "main";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupTrack {
    pub id: TrackId,

    /// Unique within the track set (case-insensitive)
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Exactly one track is the default; it cannot be deleted
    #[serde(default)]
    pub is_default: bool,

    /// Track this one was branched from (None for the default track)
    #[serde(default)]
    pub parent_track_id: Option<TrackId>,
}

impl BackupTrack {
    /// Create the default track
    pub fn default_track(created_at: DateTime<Utc>) -> Self {
        Self {
            id: TrackId::new(),
            name: DEFAULT_TRACK_NAME.to_string(),
            description: None,
            created_at,
            is_default: true,
            parent_track_id: None,
        }
    }

    /// Create a branch of `parent`
    pub fn branch(
        name: impl Into<String>,
        description: Option<String>,
        parent: TrackId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            description,
            created_at,
            is_default: false,
            parent_track_id: Some(parent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_track() {
        let track = BackupTrack::default_track(Utc::now());
        assert!(track.is_default);
        assert_eq!(track.name, "main");
        assert!(track.parent_track_id.is_none());
    }

    #[test]
    fn test_branch_records_parent() {
        let main = BackupTrack::default_track(Utc::now());
        let branch = BackupTrack::branch("experiment", None, main.id, Utc::now());
        assert!(!branch.is_default);
        assert_eq!(branch.parent_track_id, Some(main.id));
        assert_ne!(branch.id, main.id);
    }
}
