//! Fallback backend used when nothing is configured outside development.

use async_trait::async_trait;
use shared::Expense;
use tracing::warn;

use super::traits::{ExpenseStorage, ReadOutcome, StorageError};

const CONFIGURE_HINT: &str = "set KV_REST_API_URL and KV_REST_API_TOKEN";

#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl NullStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExpenseStorage for NullStorage {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn read(&self) -> ReadOutcome {
        warn!("Storage is not configured ({}); returning no expenses", CONFIGURE_HINT);
        ReadOutcome::Degraded {
            cause: StorageError::Unconfigured,
        }
    }

    async fn write(&self, expenses: &[Expense]) -> Result<(), StorageError> {
        warn!(
            count = expenses.len(),
            "Storage is not configured ({}); expenses were not saved",
            CONFIGURE_HINT
        );
        Err(StorageError::Unconfigured)
    }
}
