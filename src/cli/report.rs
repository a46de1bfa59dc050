//! Reporting CLI commands: compare, stats, auto, history

use crate::display::{format_comparison, format_stats};
use crate::error::VaultResult;
use crate::services::{AutoBackupService, CompareService, StatsService, TrackService, VaultContext};
use crate::storage::Storage;

/// Compare the latest snapshots of two tracks
pub fn handle_compare_command(storage: &Storage, left: &str, right: &str) -> VaultResult<()> {
    let tracks = TrackService::new(storage);
    let left = tracks.resolve(left)?;
    let right = tracks.resolve(right)?;

    let comparison = CompareService::new(storage).compare(left.id, right.id)?;
    print!("{}", format_comparison(&left, &right, comparison.as_ref()));
    if comparison.is_none() {
        println!();
    }

    Ok(())
}

/// Show storage statistics across all tracks
pub fn handle_stats_command(storage: &Storage) -> VaultResult<()> {
    let stats = StatsService::new(storage).storage_stats()?;
    print!("{}", format_stats(&stats));
    Ok(())
}

/// Take an AUTO snapshot if one is due
pub fn handle_auto_command(storage: &Storage, ctx: &VaultContext) -> VaultResult<()> {
    let service = AutoBackupService::new(storage);

    match service.run_if_due(ctx)? {
        Some(snapshot) => println!("Created automatic snapshot {}", snapshot.id),
        None => match service.next_due(ctx)? {
            Some(due) => println!(
                "No automatic snapshot due; next at {}",
                due.format("%Y-%m-%d %H:%M UTC")
            ),
            None if storage.settings.load().auto_backup_enabled => {
                println!("No automatic snapshot due")
            }
            None => println!(
                "Auto-backup is off. Enable it with: fitvault settings set --auto-backup on"
            ),
        },
    }

    Ok(())
}

/// Show recent audit log entries
pub fn handle_history_command(storage: &Storage, limit: usize) -> VaultResult<()> {
    let Some(logger) = storage.audit_logger() else {
        println!("No audit log for this vault.");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
