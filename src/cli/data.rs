//! Live data CLI commands
//!
//! A thin window onto the current track's collections, mostly useful for
//! scripting and for seeding data to snapshot.

use clap::Subcommand;
use serde_json::Value;

use crate::error::{VaultError, VaultResult};
use crate::models::EntityCategory;
use crate::services::{DataService, VaultContext};
use crate::storage::Storage;

/// Data subcommands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Append a JSON record to a category
    Add {
        /// Category (meals, weights, sleepSessions, ...)
        category: EntityCategory,
        /// The record as a JSON object
        record: String,
    },

    /// Print a category's records as JSON
    List {
        /// Category (meals, weights, sleepSessions, ...)
        category: EntityCategory,
    },
}

/// Handle a data command
pub fn handle_data_command(
    storage: &Storage,
    ctx: &VaultContext,
    cmd: DataCommands,
) -> VaultResult<()> {
    let service = DataService::new(storage);

    match cmd {
        DataCommands::Add { category, record } => {
            let value: Value = serde_json::from_str(&record)
                .map_err(|e| VaultError::Validation(format!("Invalid JSON record: {}", e)))?;
            let count = service.add(ctx, category, value)?;
            println!("Added {} record ({} total)", category, count);
        }

        DataCommands::List { category } => {
            let records = service.list(ctx, category)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
