//! Service layer for Fitvault
//!
//! The service layer provides the vault's public operations on top of the
//! storage layer: validation, locking, retention and audit recording.

pub mod auto;
pub mod compare;
pub mod data;
pub mod restore;
pub mod settings;
pub mod snapshot;
pub mod stats;
pub mod track;

pub use auto::AutoBackupService;
pub use compare::{CategoryDelta, CompareService, TrackComparison};
pub use data::DataService;
pub use restore::{
    safety_backup_label, RestoreMode, RestoreOptions, RestoreOutcome, RestorePhase,
    RestoreService,
};
pub use settings::SettingsService;
pub use snapshot::{IntegrityReport, SnapshotService};
pub use stats::{format_bytes, StatsService, StorageStats};
pub use track::{TrackService, TrackSummary, VaultContext};
