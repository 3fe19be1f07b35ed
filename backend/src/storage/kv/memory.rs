//! In-process key-value client. Clones share the same map.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::KeyValueClient;
use crate::storage::traits::StorageError;

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueClient {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryKeyValueClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Place an arbitrary value under `key`, bypassing the storage layer
    pub fn insert_raw(&self, key: &str, value: Value) {
        self.values().insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.values().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueClient for MemoryKeyValueClient {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.values().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.values().insert(key.to_string(), value.clone());
        Ok(())
    }
}
