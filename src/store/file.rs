// SPDX-License-Identifier: MIT

//! File-backed blob store: a JSON map of key to value at a fixed path.
//!
//! This is the native analogue of the browser's localStorage. Reads of a
//! missing file behave as an empty store; writes replace the whole file.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::store::BlobStore;

/// Blob store persisted as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Storage(format!(
                    "corrupt store file {}: {err}",
                    self.path.display()
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(AppError::Storage(format!(
                "cannot read {}: {err}",
                self.path.display()
            ))),
        }
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&map)
            .map_err(|err| AppError::Storage(err.to_string()))?;
        fs::write(&self.path, json).map_err(|err| {
            AppError::Storage(format!("cannot write {}: {err}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("waylog.json"));
        assert_eq!(store.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("waylog.json"));

        store.set("workouts", "[1,2,3]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[1,2,3]"));

        // Other keys survive a second write.
        store.set("other", "x").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waylog.json");

        let mut store = FileStore::new(&path);
        store.set("workouts", "persisted").unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("workouts").unwrap().as_deref(),
            Some("persisted")
        );
    }
}
