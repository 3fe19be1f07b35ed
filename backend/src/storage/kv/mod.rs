//! # Key-Value Storage
//!
//! Keeps the whole collection as one JSON array under a fixed key in a remote
//! key-value service. Writes overwrite the key unconditionally: concurrent
//! writers race and the last one wins.

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use serde_json::Value;
use shared::Expense;
use tracing::{debug, error, warn};

use super::decode::decode_collection;
use super::traits::{ExpenseStorage, ReadOutcome, StorageError};

pub use memory::MemoryKeyValueClient;
pub use rest::RestKeyValueClient;

/// Key holding the expense collection
pub const EXPENSES_KEY: &str = "expenses";

/// Minimal get/set protocol of the key-value service
#[async_trait]
pub trait KeyValueClient: Send + Sync {
    /// Fetch the value under `key`, `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;
}

pub struct KeyValueStorage<C: KeyValueClient> {
    client: C,
    key: String,
}

impl<C: KeyValueClient> KeyValueStorage<C> {
    pub fn new(client: C) -> Self {
        Self::with_key(client, EXPENSES_KEY)
    }

    pub fn with_key(client: C, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl<C: KeyValueClient> ExpenseStorage for KeyValueStorage<C> {
    fn name(&self) -> &'static str {
        "key-value"
    }

    async fn read(&self) -> ReadOutcome {
        match self.client.get(&self.key).await {
            Ok(None) => ReadOutcome::Loaded(Vec::new()),
            Ok(Some(value)) => match decode_collection(value, &self.key) {
                Ok(expenses) => {
                    debug!("Loaded {} expenses from key '{}'", expenses.len(), self.key);
                    ReadOutcome::Loaded(expenses)
                }
                Err(e) => {
                    warn!("Treating stored expenses as empty: {}", e);
                    ReadOutcome::Degraded { cause: e }
                }
            },
            Err(e) => {
                error!("Error reading expenses from key-value store: {}", e);
                ReadOutcome::Degraded { cause: e }
            }
        }
    }

    async fn write(&self, expenses: &[Expense]) -> Result<(), StorageError> {
        let value = serde_json::to_value(expenses)?;
        match self.client.set(&self.key, &value).await {
            Ok(()) => {
                debug!("Saved {} expenses under key '{}'", expenses.len(), self.key);
                Ok(())
            }
            Err(e) => {
                error!("Error saving expenses to key-value store: {}", e);
                Err(e)
            }
        }
    }
}
