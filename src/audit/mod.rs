//! Audit logging for Fitvault
//!
//! Records every mutating vault operation (snapshot create/delete, restore,
//! track create/switch, settings update) in an append-only JSONL log.
//!
//! - `AuditEntry`: one operation with optional before/after values
//! - `AuditLogger`: appends entries to the log file and reads them back
//! - `generate_diff`: human-readable summary of a before/after change

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
