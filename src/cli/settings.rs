//! Settings CLI commands

use clap::{Subcommand, ValueEnum};

use crate::config::{BackupSettings, SettingsPatch};
use crate::error::VaultResult;
use crate::services::SettingsService;
use crate::storage::Storage;

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the backup settings
    Show,

    /// Change one or more settings
    Set {
        /// Take AUTO snapshots on schedule
        #[arg(long, value_enum)]
        auto_backup: Option<Toggle>,
        /// Total snapshot cap across all tracks
        #[arg(long, allow_hyphen_values = true)]
        max_snapshots: Option<i64>,
        /// Hours between AUTO snapshots
        #[arg(long, allow_hyphen_values = true)]
        interval_hours: Option<i64>,
        /// Age in days before a snapshot may be pruned
        #[arg(long, allow_hyphen_values = true)]
        retention_days: Option<i64>,
    },
}

/// Handle a settings command
pub fn handle_settings_command(storage: &Storage, cmd: SettingsCommands) -> VaultResult<()> {
    let service = SettingsService::new(storage);

    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(&service.get()));
        }

        SettingsCommands::Set {
            auto_backup,
            max_snapshots,
            interval_hours,
            retention_days,
        } => {
            let patch = SettingsPatch {
                auto_backup_enabled: auto_backup.map(|t| matches!(t, Toggle::On)),
                max_snapshots,
                auto_backup_interval_hours: interval_hours,
                retention_days,
            };

            if patch.is_empty() {
                println!("Nothing to change. See: fitvault settings set --help");
                return Ok(());
            }

            let settings = service.save(&patch)?;
            println!("Settings saved.");
            print!("{}", format_settings(&settings));
        }
    }

    Ok(())
}

fn format_settings(settings: &BackupSettings) -> String {
    format!(
        "Auto-backup:     {}\n\
         Interval:        every {} hour(s)\n\
         Max snapshots:   {}\n\
         Retention:       {} day(s)\n",
        if settings.auto_backup_enabled { "on" } else { "off" },
        settings.auto_backup_interval_hours,
        settings.max_snapshots,
        settings.retention_days,
    )
}
