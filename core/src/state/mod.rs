//! JSON-backed key-value state store
//!
//! Persists the small set of durable flags the widget keeps between runs,
//! currently just the consent marker.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{CoachError, Result};

pub struct StateStore {
    data: HashMap<String, Value>,
    path: Option<PathBuf>,
}

impl StateStore {
    /// Open the store at the default platform location
    pub fn new() -> Result<Self> {
        let path = dirs::data_dir()
            .ok_or(CoachError::DataDirUnavailable)?
            .join("prcoach")
            .join("state.json");

        Self::with_path(path)
    }

    /// Open a store backed by an explicit file
    ///
    /// Used for the `storage.state_path` config override and in tests.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self {
            data: HashMap::new(),
            path: Some(path.into()),
        };

        store.load()?;
        Ok(store)
    }

    /// Store that never touches disk
    ///
    /// Fallback when no usable state file exists; values live only for the
    /// duration of the process.
    pub fn ephemeral() -> Self {
        Self {
            data: HashMap::new(),
            path: None,
        }
    }

    pub fn load(&mut self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            return Ok(());
        }

        let content = std::fs::read_to_string(path).map_err(|_| CoachError::StateReadFailed {
            path: path.clone(),
        })?;
        if content.trim().is_empty() {
            return Ok(());
        }

        self.data = serde_json::from_str(&content).map_err(|_| CoachError::StateCorrupted {
            path: path.clone(),
        })?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };

        let content = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(path, content).map_err(|_| CoachError::StateWriteFailed {
            path: path.clone(),
        })?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.get(key).cloned()
    }

    pub fn set(&mut self, key: String, value: Value) -> Result<()> {
        self.data.insert(key, value);
        self.save()
    }

    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.data.remove(key);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut store = StateStore::with_path(&path).unwrap();
        store
            .set("consent-given".to_string(), Value::String("true".to_string()))
            .unwrap();

        // A fresh store over the same file sees the persisted value
        let reopened = StateStore::with_path(&path).unwrap();
        assert_eq!(
            reopened.get("consent-given"),
            Some(Value::String("true".to_string()))
        );
    }

    #[test]
    fn test_delete_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut store = StateStore::with_path(&path).unwrap();
        store
            .set("consent-given".to_string(), Value::String("true".to_string()))
            .unwrap();
        store.delete("consent-given").unwrap();

        let reopened = StateStore::with_path(&path).unwrap();
        assert_eq!(reopened.get("consent-given"), None);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("state.json");

        let store = StateStore::with_path(&path).unwrap();
        assert_eq!(store.get("consent-given"), None);
    }

    #[test]
    fn test_empty_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, "  \n").unwrap();

        let store = StateStore::with_path(&path).unwrap();
        assert_eq!(store.get("consent-given"), None);
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = StateStore::with_path(&path);
        assert!(matches!(result, Err(CoachError::StateCorrupted { .. })));
    }

    #[test]
    fn test_ephemeral_store_never_writes() {
        let mut store = StateStore::ephemeral();
        store
            .set("consent-given".to_string(), Value::String("true".to_string()))
            .unwrap();
        assert_eq!(
            store.get("consent-given"),
            Some(Value::String("true".to_string()))
        );
    }
}
