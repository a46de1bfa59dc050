//! Retention selection
//!
//! Pure selection of the snapshots to prune. A snapshot is pruned only when
//! the total count exceeds `max_snapshots` AND it is older than
//! `retention_days`; the oldest go first, and no track is emptied.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::config::BackupSettings;
use crate::models::{BackupSnapshot, SnapshotId, TrackId};

/// Pick snapshots to delete, oldest first
///
/// `protect` (typically the snapshot just created) is never selected.
pub fn select_for_pruning(
    snapshots: &[BackupSnapshot],
    settings: &BackupSettings,
    now: DateTime<Utc>,
    protect: Option<SnapshotId>,
) -> Vec<SnapshotId> {
    let max = settings.max_snapshots as usize;
    if snapshots.len() <= max {
        return Vec::new();
    }

    // A retention window too wide for the calendar keeps everything
    let Some(max_age) = Duration::try_days(i64::from(settings.retention_days)) else {
        return Vec::new();
    };

    let mut per_track: HashMap<TrackId, usize> = HashMap::new();
    for snapshot in snapshots {
        *per_track.entry(snapshot.track_id).or_default() += 1;
    }

    let mut oldest_first: Vec<&BackupSnapshot> = snapshots.iter().collect();
    oldest_first.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let mut remaining = snapshots.len();
    let mut selected = Vec::new();

    for snapshot in oldest_first {
        if remaining <= max {
            break;
        }
        if Some(snapshot.id) == protect || snapshot.age(now) <= max_age {
            continue;
        }

        let track_count = per_track.entry(snapshot.track_id).or_default();
        if *track_count <= 1 {
            continue;
        }

        *track_count -= 1;
        remaining -= 1;
        selected.push(snapshot.id);
    }

    selected
}
