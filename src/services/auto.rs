//! Scheduled automatic snapshots
//!
//! The host calls `run_if_due` on its own cadence (startup, a timer, after
//! edits). An AUTO snapshot is taken when auto-backup is enabled and the
//! current track has no AUTO snapshot younger than the configured interval.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::VaultResult;
use crate::models::{BackupSnapshot, SnapshotKind, TrackId};
use crate::storage::Storage;

use super::snapshot::SnapshotService;
use super::track::{TrackService, VaultContext};

pub struct AutoBackupService<'a> {
    storage: &'a Storage,
}

impl<'a> AutoBackupService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Take an AUTO snapshot of the current track if one is due
    ///
    /// Runs under the same lock as manual snapshots, so it cannot double-fire
    /// or race a manual backup.
    pub fn run_if_due(&self, ctx: &VaultContext) -> VaultResult<Option<BackupSnapshot>> {
        let settings = self.storage.settings.load();
        if !settings.auto_backup_enabled {
            return Ok(None);
        }

        let _guard = self.storage.lock()?;
        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;

        let now = self.storage.now();
        match self.due(track_id, settings.auto_backup_interval_hours)? {
            Due::Now => {}
            Due::At(due) if now >= due => {}
            Due::At(due) => {
                debug!(track_id = %track_id, due = %due, "Auto-backup not due yet");
                return Ok(None);
            }
            Due::Never => {
                debug!(track_id = %track_id, "Auto-backup interval reaches past the calendar");
                return Ok(None);
            }
        }

        let snapshots = SnapshotService::new(self.storage);
        let snapshot = snapshots.capture(track_id, SnapshotKind::Auto, None)?;
        snapshots.enforce_retention(Some(snapshot.id));

        Ok(Some(snapshot))
    }

    /// When the next AUTO snapshot of the current track is due
    ///
    /// None when auto-backup is disabled or the interval puts the next one
    /// beyond any representable date; the current time when one is already
    /// due.
    pub fn next_due(&self, ctx: &VaultContext) -> VaultResult<Option<DateTime<Utc>>> {
        let settings = self.storage.settings.load();
        if !settings.auto_backup_enabled {
            return Ok(None);
        }

        let track_id = TrackService::new(self.storage).current_track_id(ctx)?;
        let now = self.storage.now();

        Ok(match self.due(track_id, settings.auto_backup_interval_hours)? {
            Due::Now => Some(now),
            Due::At(due) => Some(due.max(now)),
            Due::Never => None,
        })
    }

    fn due(&self, track_id: TrackId, interval_hours: u32) -> VaultResult<Due> {
        let last_auto = self
            .storage
            .snapshots
            .get_by_track(track_id)?
            .into_iter()
            .find(|s| s.kind == SnapshotKind::Auto);

        let Some(last) = last_auto else {
            return Ok(Due::Now);
        };

        Ok(last
            .timestamp
            .checked_add_signed(Duration::hours(i64::from(interval_hours)))
            .map_or(Due::Never, Due::At))
    }
}

/// Schedule position of the next AUTO snapshot
enum Due {
    /// No AUTO snapshot yet
    Now,
    At(DateTime<Utc>),
    /// The interval overflows the calendar
    Never,
}
