//! Core data models for Fitvault
//!
//! Snapshots, tracks, entity categories and the typed payload that ties them
//! together.

pub mod category;
pub mod ids;
pub mod payload;
pub mod snapshot;
pub mod track;

pub use category::EntityCategory;
pub use ids::{IdQuery, SnapshotId, TrackId};
pub use payload::{EntityCounts, Payload};
pub use snapshot::{BackupSnapshot, SnapshotArchive, SnapshotKind, ARCHIVE_SCHEMA_VERSION};
pub use track::{BackupTrack, DEFAULT_TRACK_NAME};
