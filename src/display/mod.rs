//! Display formatting for terminal output
//!
//! Formats snapshots, tracks, comparisons and reports for the CLI.

pub mod report;
pub mod snapshot;
pub mod track;

pub use report::{
    format_comparison, format_integrity_report, format_restore_outcome, format_stats,
};
pub use snapshot::{format_snapshot_details, format_snapshot_list};
pub use track::{format_track_details, format_track_list};
