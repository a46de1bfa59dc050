//! Snapshot CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{select_for_pruning, ArchiveFormat};
use crate::display::{format_integrity_report, format_snapshot_details, format_snapshot_list};
use crate::error::{VaultError, VaultResult};
use crate::models::SnapshotKind;
use crate::services::{format_bytes, SnapshotService, TrackService, VaultContext};
use crate::storage::Storage;

/// Snapshot subcommands
#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Capture the current track's data
    Create {
        /// Free-text label
        #[arg(short, long)]
        label: Option<String>,
        /// Mark the snapshot as automatic
        #[arg(long)]
        auto: bool,
    },

    /// List snapshots of a track (newest first)
    #[command(alias = "ls")]
    List {
        /// Track name or ID (defaults to the current track)
        #[arg(short, long)]
        track: Option<String>,
        /// List snapshots of every track
        #[arg(short, long, conflicts_with = "track")]
        all: bool,
    },

    /// Show a snapshot's details
    Show {
        /// Snapshot ID
        id: String,
    },

    /// Delete a snapshot
    #[command(alias = "rm")]
    Delete {
        /// Snapshot ID
        id: String,
    },

    /// Check a snapshot's payload against its recorded counts
    Verify {
        /// Snapshot ID
        id: String,
    },

    /// Apply the retention policy now
    Prune {
        /// Actually delete (otherwise only report what would go)
        #[arg(short, long)]
        force: bool,
    },

    /// Write a snapshot to a JSON or YAML file
    Export {
        /// Snapshot ID
        id: String,
        /// Output file
        file: PathBuf,
        /// json or yaml (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Import an exported snapshot onto the current track
    Import {
        /// Archive file
        file: PathBuf,
    },
}

/// Handle a snapshot command
pub fn handle_snapshot_command(
    storage: &Storage,
    ctx: &VaultContext,
    cmd: SnapshotCommands,
) -> VaultResult<()> {
    let service = SnapshotService::new(storage);

    match cmd {
        SnapshotCommands::Create { label, auto } => {
            let kind = if auto {
                SnapshotKind::Auto
            } else {
                SnapshotKind::Manual
            };
            let track = TrackService::new(storage).current_track(ctx)?;
            let snapshot = service.create(ctx, kind, label)?;

            println!("Created snapshot {} on track '{}'", snapshot.id, track.name);
            println!(
                "  {} records, {}",
                snapshot.entity_counts.total(),
                format_bytes(snapshot.size)
            );
        }

        SnapshotCommands::List { track, all } => {
            let snapshots = if all {
                service.list_all()?
            } else {
                let track_id = match track {
                    Some(identifier) => Some(TrackService::new(storage).resolve(&identifier)?.id),
                    None => None,
                };
                service.list(ctx, track_id)?
            };

            print!("{}", format_snapshot_list(&snapshots));
            if snapshots.is_empty() {
                println!();
                println!("Create one with: fitvault snapshot create");
            }
        }

        SnapshotCommands::Show { id } => {
            let snapshot = service.resolve(&id)?;
            let track = TrackService::new(storage).get(snapshot.track_id)?;
            print!("{}", format_snapshot_details(&snapshot, track.as_ref()));
        }

        SnapshotCommands::Delete { id } => {
            let snapshot = service.resolve(&id)?;
            if service.delete(snapshot.id)? {
                println!("Deleted snapshot {}", snapshot.id);
            } else {
                println!("Snapshot {} was already gone", snapshot.id);
            }
        }

        SnapshotCommands::Verify { id } => {
            let snapshot = service.resolve(&id)?;
            let report = service.verify(snapshot.id)?;
            print!("{}", format_integrity_report(&report));
            if !report.is_ok() {
                return Err(VaultError::CorruptSnapshot {
                    id: snapshot.id.to_string(),
                    reason: format!("{} problem(s) found", report.problems.len()),
                });
            }
        }

        SnapshotCommands::Prune { force } => {
            let settings = storage.settings.load();

            if !force {
                let snapshots = service.list_all()?;
                let selected = select_for_pruning(&snapshots, &settings, storage.now(), None);

                println!(
                    "Retention policy: keep at most {} snapshots; prune only those older than {} days",
                    settings.max_snapshots, settings.retention_days
                );
                println!("Current snapshots: {}", snapshots.len());

                if selected.is_empty() {
                    println!("No snapshots to prune.");
                    return Ok(());
                }

                println!("To be deleted: {}", selected.len());
                println!();
                println!("To delete them, run again with --force flag:");
                println!("  fitvault snapshot prune --force");
                return Ok(());
            }

            let removed = service.prune()?;
            if removed.is_empty() {
                println!("No snapshots to prune.");
            } else {
                println!("Pruned {} snapshot(s):", removed.len());
                for id in removed {
                    println!("  {}", id);
                }
            }
        }

        SnapshotCommands::Export { id, file, format } => {
            let format = match format {
                Some(f) => ArchiveFormat::parse(&f).ok_or_else(|| {
                    VaultError::Validation(format!("Unknown archive format '{}'", f))
                })?,
                None => ArchiveFormat::from_path(&file),
            };

            let snapshot = service.resolve(&id)?;
            service.export(snapshot.id, &file, format)?;
            println!("Exported snapshot {} to {}", snapshot.id, file.display());
        }

        SnapshotCommands::Import { file } => {
            let snapshot = service.import(ctx, &file)?;
            println!("Imported {} as snapshot {}", file.display(), snapshot.id);
            println!("  {} records", snapshot.entity_counts.total());
        }
    }

    Ok(())
}
