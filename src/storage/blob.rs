//! Opaque byte-addressable storage
//!
//! The vault only needs get/put/delete/list over string keys. `FileStore`
//! maps keys to files under a root directory and writes atomically; any other
//! medium (key-value store, database) can sit behind the same trait.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use crate::error::{VaultError, VaultResult};

/// A byte store addressed by `/`-separated string keys
pub trait BlobStore: Send + Sync {
    /// Read the bytes stored under `key`, or None if absent
    fn read(&self, key: &str) -> VaultResult<Option<Vec<u8>>>;

    /// Replace the bytes under `key`; either fully applied or not at all
    fn write(&self, key: &str, bytes: &[u8]) -> VaultResult<()>;

    /// Remove `key`; returns false if it did not exist
    fn remove(&self, key: &str) -> VaultResult<bool>;

    /// Keys that start with `prefix`, sorted
    fn list(&self, prefix: &str) -> VaultResult<Vec<String>>;
}

/// File-system backed store rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> VaultResult<PathBuf> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !valid {
            return Err(VaultError::Validation(format!("Invalid storage key: '{}'", key)));
        }

        Ok(self.root.join(relative))
    }

    fn collect_keys(&self, dir: &Path, keys: &mut Vec<String>) -> VaultResult<()> {
        for entry in fs::read_dir(dir)
            .map_err(|e| VaultError::Storage(format!("Failed to read {}: {}", dir.display(), e)))?
        {
            let path = entry
                .map_err(|e| VaultError::Storage(format!("Failed to read directory entry: {}", e)))?
                .path();

            if path.is_dir() {
                self.collect_keys(&path, keys)?;
            } else if path.extension().map_or(false, |ext| ext == "tmp") {
                // Leftover from an interrupted write
                continue;
            } else if let Ok(relative) = path.strip_prefix(&self.root) {
                let key: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect();
                keys.push(key.join("/"));
            }
        }
        Ok(())
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> VaultResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        fs::read(&path)
            .map(Some)
            .map_err(|e| VaultError::Storage(format!("Failed to read {}: {}", path.display(), e)))
    }

    /// Write to a temp file in the same directory, sync, then rename over
    /// the target so a crash never leaves a half-written blob.
    fn write(&self, key: &str, bytes: &[u8]) -> VaultResult<()> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error(e, "create directory"))?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let result = (|| {
            let file = File::create(&temp_path).map_err(|e| storage_error(e, "create temp file"))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(bytes)
                .map_err(|e| storage_error(e, "write data"))?;
            writer.flush().map_err(|e| storage_error(e, "flush data"))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| storage_error(e, "sync data"))?;
            fs::rename(&temp_path, &path).map_err(|e| storage_error(e, "rename temp file"))
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn remove(&self, key: &str) -> VaultResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_error(e, "remove file")),
        }
    }

    fn list(&self, prefix: &str) -> VaultResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        self.collect_keys(&self.root, &mut keys)?;
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}

/// Keep capacity failures distinguishable from other I/O failures
fn storage_error(err: std::io::Error, action: &str) -> VaultError {
    match VaultError::from(err) {
        VaultError::StorageFull(msg) => VaultError::StorageFull(format!("Failed to {}: {}", action, msg)),
        other => VaultError::Storage(format!("Failed to {}: {}", action, other)),
    }
}
