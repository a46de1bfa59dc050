//! Configuration module for Fitvault
//!
//! - Path resolution for the vault directory
//! - Backup settings with lenient parsing and normalization

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::{BackupSettings, SettingsPatch};
