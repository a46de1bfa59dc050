//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod data;
pub mod report;
pub mod restore;
pub mod settings;
pub mod snapshot;
pub mod track;

pub use data::{handle_data_command, DataCommands};
pub use report::{
    handle_auto_command, handle_compare_command, handle_history_command, handle_stats_command,
};
pub use restore::{handle_restore_command, RestoreArgs};
pub use settings::{handle_settings_command, SettingsCommands};
pub use snapshot::{handle_snapshot_command, SnapshotCommands};
pub use track::{handle_track_command, TrackCommands};
