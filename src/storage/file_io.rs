//! JSON helpers over a `BlobStore`
//!
//! Typed read/write of JSON documents stored under a key.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{VaultError, VaultResult};

use super::blob::BlobStore;

/// Read JSON under `key`, returning a default value if the key doesn't exist
pub fn read_json<T>(store: &dyn BlobStore, key: &str) -> VaultResult<T>
where
    T: DeserializeOwned + Default,
{
    match read_json_optional(store, key)? {
        Some(value) => Ok(value),
        None => Ok(T::default()),
    }
}

/// Read JSON under `key`, or None if the key doesn't exist
pub fn read_json_optional<T>(store: &dyn BlobStore, key: &str) -> VaultResult<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(bytes) = store.read(key)? else {
        return Ok(None);
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| VaultError::Storage(format!("Failed to parse {}: {}", key, e)))
}

/// Serialize `data` and store it under `key`
pub fn write_json<T>(store: &dyn BlobStore, key: &str, data: &T) -> VaultResult<()>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| VaultError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
    store.write(key, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let store = MemoryStore::new();
        let data: TestData = read_json(&store, "missing.json").unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let store = MemoryStore::new();
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json(&store, "test.json", &data).unwrap();
        let loaded: Option<TestData> = read_json_optional(&store, "test.json").unwrap();
        assert_eq!(loaded, Some(data));
    }

    #[test]
    fn test_invalid_json_is_storage_error() {
        let store = MemoryStore::new();
        store.write("bad.json", b"not json at all").unwrap();

        let err = read_json::<TestData>(&store, "bad.json").unwrap_err();
        assert!(matches!(err, VaultError::Storage(_)));
    }
}
