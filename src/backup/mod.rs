//! Snapshot building blocks for Fitvault
//!
//! - `EntityCollector`: captures a track's live collections as a payload
//! - `select_for_pruning`: pure retention selection (age AND count)
//! - archive files: export/import of single snapshots as JSON or YAML
//!
//! The services layer composes these into the public operations.

mod archive;
mod collector;
mod retention;

pub use archive::{read_archive_file, write_archive_file, ArchiveFormat};
pub use collector::{CollectedState, EntityCollector};
pub use retention::select_for_pruning;
