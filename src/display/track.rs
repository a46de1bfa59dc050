//! Track display formatting

use crate::models::BackupTrack;
use crate::services::TrackSummary;

/// Format tracks with their snapshot counts; the current track is starred
pub fn format_track_list(summaries: &[TrackSummary]) -> String {
    if summaries.is_empty() {
        return "No tracks found.".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.track.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "   {:<name_width$}  {:<12}  {:>9}  {}\n",
        "Name",
        "ID",
        "Snapshots",
        "Parent",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "   {:-<name_width$}  {:-<12}  {:->9}  {:-<12}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        let marker = if summary.is_current { "*" } else { " " };
        let parent = summary
            .track
            .parent_track_id
            .and_then(|p| summaries.iter().find(|s| s.track.id == p))
            .map(|s| s.track.name.clone())
            .unwrap_or_default();

        output.push_str(&format!(
            " {} {:<name_width$}  {:<12}  {:>9}  {}\n",
            marker,
            summary.track.name,
            summary.track.id.to_string(),
            summary.snapshot_count,
            parent,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single track's details
pub fn format_track_details(track: &BackupTrack, parent: Option<&BackupTrack>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Track: {}\n", track.name));
    output.push_str(&format!("  ID:          {}\n", track.id));
    if let Some(description) = &track.description {
        output.push_str(&format!("  Description: {}\n", description));
    }
    output.push_str(&format!(
        "  Created:     {}\n",
        track.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if track.is_default {
        output.push_str("  Default:     Yes\n");
    }
    if let Some(parent) = parent {
        output.push_str(&format!("  Branched from: {}\n", parent.name));
    }

    output
}
