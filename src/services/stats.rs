//! Storage statistics
//!
//! Aggregates over every track, not just the current one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::VaultResult;
use crate::storage::Storage;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_snapshots: usize,
    /// Sum of snapshot payload sizes in bytes
    pub total_size: u64,
    pub oldest_snapshot: Option<DateTime<Utc>>,
    pub newest_snapshot: Option<DateTime<Utc>>,
}

pub struct StatsService<'a> {
    storage: &'a Storage,
}

impl<'a> StatsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn storage_stats(&self) -> VaultResult<StorageStats> {
        let snapshots = self.storage.snapshots.get_all()?;

        Ok(StorageStats {
            total_snapshots: snapshots.len(),
            total_size: snapshots.iter().map(|s| s.size).sum(),
            oldest_snapshot: snapshots.iter().map(|s| s.timestamp).min(),
            newest_snapshot: snapshots.iter().map(|s| s.timestamp).max(),
        })
    }
}

/// Human-readable byte size, base 1024
///
/// Picks the largest unit whose value is at least 1, rounds to two decimals
/// and drops trailing zeros: `1536` is `"1.5 KB"`, `1024` is `"1 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit < UNITS.len() - 1 && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
