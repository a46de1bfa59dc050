//! Custom error types for Fitvault
//!
//! This module defines the error hierarchy for the vault using thiserror.
//! Partial restore failures are not errors: they travel as data inside
//! `RestoreOutcome`.

use thiserror::Error;

/// The main error type for Fitvault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON / YAML serialization errors
    #[error("Serialization error: {0}")]
    Json(String),

    /// Bad input (empty track name, malformed category, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The storage medium rejected a write for lack of space
    #[error("Storage full: {0}")]
    StorageFull(String),

    /// A snapshot's recorded counts disagree with its payload, or it cannot be decoded
    #[error("Snapshot {id} is corrupt: {reason}")]
    CorruptSnapshot { id: String, reason: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VaultError {
    /// Create a "not found" error for tracks
    pub fn track_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Track",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for snapshots
    pub fn snapshot_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Snapshot",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_track_not_found(&self) -> bool {
        matches!(self, Self::NotFound { entity_type: "Track", .. })
    }

    pub fn is_snapshot_not_found(&self) -> bool {
        matches!(self, Self::NotFound { entity_type: "Snapshot", .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_storage_full(&self) -> bool {
        matches!(self, Self::StorageFull(_))
    }
}

// ENOSPC on Linux and macOS
const NO_SPACE_OS_ERROR: i32 = 28;

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        if err.raw_os_error() == Some(NO_SPACE_OS_ERROR) {
            Self::StorageFull(err.to_string())
        } else {
            Self::Io(err.to_string())
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for VaultError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Fitvault operations
pub type VaultResult<T> = Result<T, VaultError>;
