//! In-memory store for tests and dry experiments.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ObjectStore, StoreError};

/// A `HashMap`-backed store. Writes replace whole values, which mirrors the
/// replace semantics real backends provide.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored object, for assertions.
    pub fn get(&self, location: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(location).cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn read(&self, location: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.objects.lock().unwrap().get(location).cloned())
    }

    async fn write(&self, location: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.objects
            .lock()
            .unwrap()
            .insert(location.to_string(), bytes.to_vec());
        Ok(())
    }
}
