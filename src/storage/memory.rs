//! In-memory blob store
//!
//! Used for embedding the vault without a file system and for exercising
//! failure paths: an optional byte quota makes writes fail with
//! `StorageFull`, and key prefixes can be marked as failing.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{VaultError, VaultResult};

use super::blob::BlobStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    quota_bytes: Option<usize>,
    failing_prefixes: RwLock<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once the total stored bytes would exceed `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Make every write and remove under `prefix` fail
    pub fn fail_writes_under(&self, prefix: impl Into<String>) -> VaultResult<()> {
        let mut failing = self.failing_prefixes.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        failing.push(prefix.into());
        Ok(())
    }

    /// Stop injecting failures
    pub fn clear_failures(&self) -> VaultResult<()> {
        let mut failing = self.failing_prefixes.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        failing.clear();
        Ok(())
    }

    /// Total bytes currently stored
    pub fn used_bytes(&self) -> VaultResult<usize> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.values().map(Vec::len).sum())
    }

    fn check_injected_failure(&self, key: &str) -> VaultResult<()> {
        let failing = self.failing_prefixes.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        if failing.iter().any(|p| key.starts_with(p.as_str())) {
            return Err(VaultError::Storage(format!("Write rejected for key '{}'", key)));
        }
        Ok(())
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> VaultResult<Option<Vec<u8>>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> VaultResult<()> {
        self.check_injected_failure(key)?;

        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(quota) = self.quota_bytes {
            let replaced = data.get(key).map(Vec::len).unwrap_or(0);
            let used: usize = data.values().map(Vec::len).sum();
            if used - replaced + bytes.len() > quota {
                return Err(VaultError::StorageFull(format!(
                    "writing {} bytes to '{}' exceeds the {} byte quota",
                    bytes.len(),
                    key,
                    quota
                )));
            }
        }

        data.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> VaultResult<bool> {
        self.check_injected_failure(key)?;

        let mut data = self.data.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        Ok(data.remove(key).is_some())
    }

    fn list(&self, prefix: &str) -> VaultResult<Vec<String>> {
        let data = self.data.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
