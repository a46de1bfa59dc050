//! Track comparison
//!
//! Compares the latest snapshot of two tracks category by category.

use serde::Serialize;

use crate::error::VaultResult;
use crate::models::{BackupSnapshot, EntityCategory, TrackId};
use crate::storage::Storage;

/// Counts of one category in the two compared snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDelta {
    pub category: EntityCategory,
    pub left: usize,
    pub right: usize,
    /// `right - left`
    pub diff: i64,
}

/// The snapshots that were compared and their per-category deltas
#[derive(Debug, Clone)]
pub struct TrackComparison {
    pub left: BackupSnapshot,
    pub right: BackupSnapshot,
    pub rows: Vec<CategoryDelta>,
}

/// Service for comparing tracks
pub struct CompareService<'a> {
    storage: &'a Storage,
}

impl<'a> CompareService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Compare the latest snapshots of `left` and `right`
    ///
    /// Returns None when either track has no snapshots. Categories that are
    /// empty on both sides are left out.
    pub fn compare(&self, left: TrackId, right: TrackId) -> VaultResult<Option<TrackComparison>> {
        let Some(left) = self.latest(left)? else {
            return Ok(None);
        };
        let Some(right) = self.latest(right)? else {
            return Ok(None);
        };

        let rows = EntityCategory::all()
            .iter()
            .filter_map(|category| {
                let l = left.entity_counts.get(*category);
                let r = right.entity_counts.get(*category);
                if l == 0 && r == 0 {
                    return None;
                }
                Some(CategoryDelta {
                    category: *category,
                    left: l,
                    right: r,
                    diff: r as i64 - l as i64,
                })
            })
            .collect();

        Ok(Some(TrackComparison { left, right, rows }))
    }

    fn latest(&self, track_id: TrackId) -> VaultResult<Option<BackupSnapshot>> {
        Ok(self.storage.snapshots.get_by_track(track_id)?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnapshotKind;
    use crate::services::{SnapshotService, TrackService};
    use serde_json::json;

    #[test]
    fn test_compare_meals() {
        let storage = Storage::in_memory().unwrap();
        let tracks = TrackService::new(&storage);
        let snapshots = SnapshotService::new(&storage);
        let mut ctx = tracks.open_context().unwrap();
        let main = ctx.current_track();

        let meals: Vec<_> = (0..10).map(|i| json!({"meal": i})).collect();
        storage
            .entities
            .write_collection(main, EntityCategory::Meals, &meals)
            .unwrap();
        snapshots.create(&ctx, SnapshotKind::Manual, None).unwrap();

        let branch = tracks.create(&ctx, "experiment", None).unwrap();
        tracks.set_current(&mut ctx, branch.id).unwrap();
        for i in 10..15 {
            storage
                .entities
                .append_record(branch.id, EntityCategory::Meals, json!({"meal": i}))
                .unwrap();
        }
        snapshots.create(&ctx, SnapshotKind::Manual, None).unwrap();

        let comparison = CompareService::new(&storage)
            .compare(main, branch.id)
            .unwrap()
            .unwrap();

        assert_eq!(
            comparison.rows,
            vec![CategoryDelta {
                category: EntityCategory::Meals,
                left: 10,
                right: 15,
                diff: 5,
            }]
        );
    }

    #[test]
    fn test_compare_without_snapshots() {
        let storage = Storage::in_memory().unwrap();
        let tracks = TrackService::new(&storage);
        let ctx = tracks.open_context().unwrap();
        SnapshotService::new(&storage)
            .create(&ctx, SnapshotKind::Manual, None)
            .unwrap();
        let branch = tracks.create(&ctx, "empty", None).unwrap();

        let result = CompareService::new(&storage)
            .compare(ctx.current_track(), branch.id)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_equal_nonzero_counts_kept() {
        let storage = Storage::in_memory().unwrap();
        let tracks = TrackService::new(&storage);
        let ctx = tracks.open_context().unwrap();
        let main = ctx.current_track();

        storage
            .entities
            .write_collection(main, EntityCategory::Weights, &[json!({"kg": 80}), json!({"kg": 81})])
            .unwrap();
        SnapshotService::new(&storage)
            .create(&ctx, SnapshotKind::Manual, None)
            .unwrap();

        let comparison = CompareService::new(&storage)
            .compare(main, main)
            .unwrap()
            .unwrap();
        assert_eq!(comparison.rows.len(), 1);
        assert_eq!(comparison.rows[0].diff, 0);
    }
}
