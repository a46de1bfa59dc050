use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fitvault::cli::{
    handle_auto_command, handle_compare_command, handle_data_command, handle_history_command,
    handle_restore_command, handle_settings_command, handle_snapshot_command,
    handle_stats_command, handle_track_command, DataCommands, RestoreArgs, SettingsCommands,
    SnapshotCommands, TrackCommands,
};
use fitvault::config::paths::{VaultPaths, DATA_DIR_ENV};
use fitvault::services::TrackService;
use fitvault::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fitvault",
    version,
    about = "Snapshots, branches and restores for your fitness data",
    long_about = "Fitvault captures your meals, workouts, weights, sleep and other \
                  fitness records as snapshots, lets you branch them into independent \
                  tracks, and restores whole snapshots or single categories."
)]
struct Cli {
    /// Vault directory (defaults to the platform config directory)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot management commands
    #[command(subcommand, alias = "snap")]
    Snapshot(SnapshotCommands),

    /// Restore a snapshot onto the current track
    Restore(RestoreArgs),

    /// Track management commands
    #[command(subcommand)]
    Track(TrackCommands),

    /// Compare the latest snapshots of two tracks
    Compare {
        /// First track (name or ID)
        left: String,
        /// Second track (name or ID)
        right: String,
    },

    /// Storage statistics across all tracks
    Stats,

    /// Backup settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Read or append live data on the current track
    #[command(subcommand)]
    Data(DataCommands),

    /// Take an automatic snapshot if one is due
    Auto,

    /// Show recent vault operations
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show the vault location
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fitvault=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => VaultPaths::with_base_dir(dir),
        None => VaultPaths::new()?,
    };

    let Some(command) = cli.command else {
        println!("Fitvault - snapshots, branches and restores for fitness data");
        println!();
        println!("Run 'fitvault --help' for usage information.");
        return Ok(());
    };

    let storage = Storage::open(paths.clone())?;
    let mut ctx = TrackService::new(&storage).open_context()?;

    match command {
        Commands::Snapshot(cmd) => handle_snapshot_command(&storage, &ctx, cmd)?,
        Commands::Restore(args) => handle_restore_command(&storage, &ctx, args)?,
        Commands::Track(cmd) => handle_track_command(&storage, &mut ctx, cmd)?,
        Commands::Compare { left, right } => handle_compare_command(&storage, &left, &right)?,
        Commands::Stats => handle_stats_command(&storage)?,
        Commands::Settings(cmd) => handle_settings_command(&storage, cmd)?,
        Commands::Data(cmd) => handle_data_command(&storage, &ctx, cmd)?,
        Commands::Auto => handle_auto_command(&storage, &ctx)?,
        Commands::History { limit } => handle_history_command(&storage, limit)?,
        Commands::Config => {
            println!("Fitvault Configuration");
            println!("======================");
            println!("Vault directory: {}", paths.base_dir().display());
            println!("Store directory: {}", paths.store_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
        }
    }

    Ok(())
}
