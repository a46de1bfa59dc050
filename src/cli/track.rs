//! Track CLI commands

use clap::Subcommand;

use crate::display::{format_track_details, format_track_list};
use crate::error::VaultResult;
use crate::services::{SnapshotService, TrackService, VaultContext};
use crate::storage::Storage;

/// Track subcommands
#[derive(Subcommand)]
pub enum TrackCommands {
    /// List all tracks
    #[command(alias = "ls")]
    List,

    /// Show the current track
    Current,

    /// Branch a new track off the current one
    Create {
        /// Track name
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Make a track current
    Switch {
        /// Track name or ID
        track: String,
    },
}

/// Handle a track command
pub fn handle_track_command(
    storage: &Storage,
    ctx: &mut VaultContext,
    cmd: TrackCommands,
) -> VaultResult<()> {
    let service = TrackService::new(storage);

    match cmd {
        TrackCommands::List => {
            let summaries = service.list_with_counts(ctx)?;
            print!("{}", format_track_list(&summaries));
        }

        TrackCommands::Current => {
            let track = service.current_track(ctx)?;
            let parent = match track.parent_track_id {
                Some(id) => service.get(id)?,
                None => None,
            };
            print!("{}", format_track_details(&track, parent.as_ref()));

            let snapshots = SnapshotService::new(storage).list(ctx, None)?;
            println!("  Snapshots:   {}", snapshots.len());
        }

        TrackCommands::Create { name, description } => {
            let track = service.create(ctx, &name, description)?;
            let parent = service.current_track(ctx)?;
            println!("Created track '{}' ({})", track.name, track.id);
            println!("  Branched from '{}' with a copy of its current data", parent.name);
            println!("Switch to it with: fitvault track switch {}", track.name);
        }

        TrackCommands::Switch { track } => {
            let target = service.resolve(&track)?;
            let latest = SnapshotService::new(storage).latest(service.current_track_id(ctx)?)?;

            service.set_current(ctx, target.id)?;
            println!("Switched to track '{}'", target.name);
            if latest.is_none() {
                println!("Note: the track you left has no snapshots.");
            }
        }
    }

    Ok(())
}
