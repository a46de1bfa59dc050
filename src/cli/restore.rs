//! Restore CLI command

use clap::Args;

use crate::display::{format_restore_outcome, format_snapshot_details};
use crate::error::{VaultError, VaultResult};
use crate::models::EntityCategory;
use crate::services::{RestoreOptions, RestoreService, SnapshotService, TrackService, VaultContext};
use crate::storage::Storage;

/// Arguments of `fitvault restore`
#[derive(Args)]
pub struct RestoreArgs {
    /// Snapshot ID
    pub snapshot: String,

    /// Restore only this category (repeatable); all categories when omitted
    #[arg(short, long = "category", value_parser = parse_category)]
    pub categories: Vec<EntityCategory>,

    /// Skip the safety snapshot normally taken before overwriting
    #[arg(long)]
    pub no_safety_backup: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

fn parse_category(s: &str) -> Result<EntityCategory, String> {
    s.parse::<EntityCategory>().map_err(|e| e.to_string())
}

/// Handle the restore command
pub fn handle_restore_command(
    storage: &Storage,
    ctx: &VaultContext,
    args: RestoreArgs,
) -> VaultResult<()> {
    let snapshot = SnapshotService::new(storage).resolve(&args.snapshot)?;
    let current = TrackService::new(storage).current_track(ctx)?;

    let options = if args.categories.is_empty() {
        RestoreOptions::full(snapshot.id)
    } else {
        RestoreOptions::selective(snapshot.id, args.categories.clone())
    }
    .with_backup_first(!args.no_safety_backup);

    if !args.force {
        let source = TrackService::new(storage).get(snapshot.track_id)?;
        print!("{}", format_snapshot_details(&snapshot, source.as_ref()));
        println!();

        if args.categories.is_empty() {
            println!(
                "WARNING: This will overwrite ALL data on track '{}'!",
                current.name
            );
        } else {
            let names: Vec<&str> = args.categories.iter().map(|c| c.key()).collect();
            println!(
                "WARNING: This will overwrite {} on track '{}'!",
                names.join(", "),
                current.name
            );
        }
        if args.no_safety_backup {
            println!("No safety snapshot will be taken.");
        }
        println!("To proceed, run again with --force flag:");
        println!("  fitvault restore {} --force", args.snapshot);
        return Ok(());
    }

    let outcome = RestoreService::new(storage).restore(ctx, &options)?;
    print!("{}", format_restore_outcome(&outcome));

    if !outcome.success {
        return Err(VaultError::Storage(format!(
            "Restore of {} did not complete",
            snapshot.id
        )));
    }

    Ok(())
}
