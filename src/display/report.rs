//! Report formatting for terminal output
//!
//! Comparisons, storage statistics, restore outcomes and integrity reports,
//! plus the small layout helpers the other display modules share.

use crate::models::BackupTrack;
use crate::services::{
    format_bytes, IntegrityReport, RestoreOutcome, StorageStats, TrackComparison,
};

/// Format a signed count difference right-aligned to `width`, with color hints
///
/// Padding is applied before the escape codes so columns line up.
pub fn format_diff_colored(diff: i64, width: usize) -> String {
    if diff < 0 {
        format!("\x1b[31m{:>width$}\x1b[0m", diff, width = width) // Red for fewer records
    } else if diff > 0 {
        let signed = format!("+{}", diff);
        format!("\x1b[32m{:>width$}\x1b[0m", signed, width = width) // Green for more
    } else {
        format!("{:>width$}", 0, width = width)
    }
}

/// Format a comparison of two tracks' latest snapshots
pub fn format_comparison(
    left: &BackupTrack,
    right: &BackupTrack,
    comparison: Option<&TrackComparison>,
) -> String {
    let Some(comparison) = comparison else {
        return format!(
            "Nothing to compare: '{}' and '{}' both need at least one snapshot.",
            left.name, right.name
        );
    };

    let left_width = left.name.len().max(8);
    let right_width = right.name.len().max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "Comparing {} ({}) with {} ({})\n\n",
        left.name, comparison.left.id, right.name, comparison.right.id
    ));

    if comparison.rows.is_empty() {
        output.push_str("Both snapshots are empty.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<18}  {:>left_width$}  {:>right_width$}  {:>6}\n",
        "Category",
        left.name,
        right.name,
        "Diff",
        left_width = left_width,
        right_width = right_width,
    ));
    output.push_str(&separator(18 + 2 + left_width + 2 + right_width + 2 + 6));
    output.push('\n');

    for row in &comparison.rows {
        output.push_str(&format!(
            "{:<18}  {:>left_width$}  {:>right_width$}  {}\n",
            row.category.key(),
            row.left,
            row.right,
            format_diff_colored(row.diff, 6),
            left_width = left_width,
            right_width = right_width,
        ));
    }

    output
}

/// Format storage statistics
pub fn format_stats(stats: &StorageStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Snapshots:   {}\n", stats.total_snapshots));
    output.push_str(&format!("Total size:  {}\n", format_bytes(stats.total_size)));

    match (stats.oldest_snapshot, stats.newest_snapshot) {
        (Some(oldest), Some(newest)) => {
            output.push_str(&format!("Oldest:      {}\n", oldest.format("%Y-%m-%d %H:%M UTC")));
            output.push_str(&format!("Newest:      {}\n", newest.format("%Y-%m-%d %H:%M UTC")));
        }
        _ => output.push_str("Oldest:      -\nNewest:      -\n"),
    }

    output
}

/// Format the result of a restore
pub fn format_restore_outcome(outcome: &RestoreOutcome) -> String {
    let mut output = String::new();

    if let Some(safety) = &outcome.safety_snapshot {
        output.push_str(&format!("Safety backup created: {}\n", safety.id));
    }

    if outcome.success {
        output.push_str(&format!(
            "Restore complete: {} categor{} restored.\n",
            outcome.restored.len(),
            if outcome.restored.len() == 1 { "y" } else { "ies" }
        ));
        output.push_str("Reload any open views of this data.\n");
    } else {
        output.push_str(&format!("Restore failed ({}):\n", outcome.phase));
        for error in &outcome.errors {
            output.push_str(&format!("  - {}\n", error));
        }
        if !outcome.restored.is_empty() {
            let restored: Vec<&str> = outcome.restored.iter().map(|c| c.key()).collect();
            output.push_str(&format!("Restored anyway: {}\n", restored.join(", ")));
        }
    }

    output
}

/// Format a snapshot integrity report
pub fn format_integrity_report(report: &IntegrityReport) -> String {
    if report.is_ok() {
        return format!(
            "Snapshot {} is intact ({} records, {}).\n",
            report.snapshot.id,
            report.snapshot.entity_counts.total(),
            format_bytes(report.snapshot.size)
        );
    }

    let mut output = format!("Snapshot {} has problems:\n", report.snapshot.id);
    for problem in &report.problems {
        output.push_str(&format!("  - {}\n", problem));
    }
    output
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum display length, with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BackupSnapshot, EntityCategory, EntityCounts, SnapshotId, SnapshotKind};
    use crate::services::{CategoryDelta, RestorePhase};
    use chrono::Utc;

    fn snapshot(track: &BackupTrack) -> BackupSnapshot {
        BackupSnapshot {
            id: SnapshotId::new(),
            timestamp: Utc::now(),
            kind: SnapshotKind::Manual,
            label: None,
            track_id: track.id,
            size: 10,
            entity_counts: EntityCounts::new(),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer label", 10), "a much ...");
    }

    #[test]
    fn test_diff_colored() {
        assert_eq!(format_diff_colored(0, 6), "     0");
        assert_eq!(format_diff_colored(5, 6), "\x1b[32m    +5\x1b[0m");
        assert_eq!(format_diff_colored(-2, 6), "\x1b[31m    -2\x1b[0m");
        assert_eq!(format_diff_colored(1234567, 6), "\x1b[32m+1234567\x1b[0m");
    }

    #[test]
    fn test_comparison_without_snapshots() {
        let main = BackupTrack::default_track(Utc::now());
        let branch = BackupTrack::branch("experiment", None, main.id, Utc::now());

        let output = format_comparison(&main, &branch, None);
        assert!(output.starts_with("Nothing to compare"));
    }

    #[test]
    fn test_comparison_rows() {
        let main = BackupTrack::default_track(Utc::now());
        let branch = BackupTrack::branch("experiment", None, main.id, Utc::now());
        let comparison = TrackComparison {
            left: snapshot(&main),
            right: snapshot(&branch),
            rows: vec![CategoryDelta {
                category: EntityCategory::Meals,
                left: 10,
                right: 15,
                diff: 5,
            }],
        };

        let output = format_comparison(&main, &branch, Some(&comparison));
        let row = output.lines().find(|l| l.starts_with("meals")).unwrap();
        assert!(row.contains("10"));
        assert!(row.contains("15"));
        assert!(row.contains("+5"));

        let header = output.lines().find(|l| l.starts_with("Category")).unwrap();
        let visible = row.replace("\x1b[32m", "").replace("\x1b[0m", "");
        assert_eq!(visible.len(), header.len());
    }

    #[test]
    fn test_stats_empty() {
        let output = format_stats(&StorageStats::default());
        assert!(output.contains("Snapshots:   0"));
        assert!(output.contains("0 B"));
        assert!(output.contains("Oldest:      -"));
    }

    #[test]
    fn test_restore_failure_lists_errors() {
        let outcome = RestoreOutcome {
            success: false,
            errors: vec!["meals: Storage error: disk".into()],
            phase: RestorePhase::Failed,
            restored: vec![EntityCategory::Weights],
            safety_snapshot: None,
        };

        let output = format_restore_outcome(&outcome);
        assert!(output.contains("Restore failed (FAILED)"));
        assert!(output.contains("meals: Storage error: disk"));
        assert!(output.contains("Restored anyway: weights"));
    }
}
