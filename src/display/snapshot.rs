//! Snapshot display formatting
//!
//! Snapshot listings are rendered as tables; a single snapshot gets a
//! detail view with its per-category counts.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BackupSnapshot, BackupTrack, EntityCategory};
use crate::services::format_bytes;

use super::report::truncate;

const LABEL_WIDTH: usize = 40;

#[derive(Tabled)]
struct SnapshotRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Taken")]
    taken: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl From<&BackupSnapshot> for SnapshotRow {
    fn from(snapshot: &BackupSnapshot) -> Self {
        Self {
            id: snapshot.id.to_string(),
            taken: snapshot.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            kind: snapshot.kind.to_string(),
            records: snapshot.entity_counts.total(),
            size: format_bytes(snapshot.size),
            label: truncate(snapshot.label.as_deref().unwrap_or(""), LABEL_WIDTH),
        }
    }
}

/// Format snapshots (newest first) as a table
pub fn format_snapshot_list(snapshots: &[BackupSnapshot]) -> String {
    if snapshots.is_empty() {
        return "No snapshots found.".to_string();
    }

    let rows: Vec<SnapshotRow> = snapshots.iter().map(SnapshotRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n{} snapshot(s)\n", table, snapshots.len())
}

/// Format a single snapshot's details
pub fn format_snapshot_details(snapshot: &BackupSnapshot, track: Option<&BackupTrack>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Snapshot: {}\n", snapshot.id));
    output.push_str(&format!("  Full ID:  {}\n", snapshot.id.as_uuid()));
    output.push_str(&format!(
        "  Taken:    {}\n",
        snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("  Type:     {}\n", snapshot.kind));
    if let Some(label) = &snapshot.label {
        output.push_str(&format!("  Label:    {}\n", label));
    }
    match track {
        Some(track) => output.push_str(&format!("  Track:    {} ({})\n", track.name, track.id)),
        None => output.push_str(&format!("  Track:    {}\n", snapshot.track_id)),
    }
    output.push_str(&format!("  Size:     {}\n", format_bytes(snapshot.size)));

    output.push_str("\nRecords:\n");
    for category in EntityCategory::all() {
        let count = snapshot.entity_counts.get(*category);
        if count > 0 {
            output.push_str(&format!("  {:<18} {:>6}\n", category.key(), count));
        }
    }
    output.push_str(&format!(
        "  {:<18} {:>6}\n",
        "total",
        snapshot.entity_counts.total()
    ));

    output
}
