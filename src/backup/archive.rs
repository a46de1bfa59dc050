//! Snapshot archive files
//!
//! Exports a stored snapshot (metadata + payload) to a standalone JSON or
//! YAML file, and reads such files back for import. Every file read is
//! verified before it is handed out.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{VaultError, VaultResult};
use crate::models::SnapshotArchive;

/// On-disk format of an exported archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFormat {
    #[default]
    Json,
    Yaml,
}

impl ArchiveFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .unwrap_or_default()
    }
}

/// Write an archive to `path`
pub fn write_archive_file(
    path: &Path,
    archive: &SnapshotArchive,
    format: ArchiveFormat,
) -> VaultResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)
        .map_err(|e| VaultError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    match format {
        ArchiveFormat::Json => {
            serde_json::to_writer_pretty(&mut file, archive)?;
        }
        ArchiveFormat::Yaml => {
            writeln!(file, "# Fitvault snapshot archive")?;
            writeln!(file, "# Snapshot: {}", archive.snapshot.id)?;
            writeln!(file, "# Taken: {}", archive.snapshot.timestamp)?;
            serde_yaml::to_writer(&mut file, archive)?;
        }
    }

    file.flush()?;
    Ok(())
}

/// Read and verify an archive from `path`
pub fn read_archive_file(path: &Path) -> VaultResult<SnapshotArchive> {
    let contents = fs::read_to_string(path)
        .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let archive: SnapshotArchive = match ArchiveFormat::from_path(path) {
        ArchiveFormat::Json => serde_json::from_str(&contents)?,
        ArchiveFormat::Yaml => serde_yaml::from_str(&contents)?,
    };

    archive.verify()?;
    Ok(archive)
}
