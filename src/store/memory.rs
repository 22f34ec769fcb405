//! In-memory blob store for ephemeral sessions and tests.

use std::collections::HashMap;

use crate::error::Result;
use crate::store::BlobStore;

/// HashMap-backed [`BlobStore`]. Contents are lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
