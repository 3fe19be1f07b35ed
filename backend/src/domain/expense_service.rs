//! Expense service domain logic.
//!
//! Every operation asks the provider for the active backend, reads the whole
//! collection, and (for changes) writes the whole collection back. Nothing
//! serializes these read-modify-write cycles, so concurrent changes resolve
//! as last-writer-wins.
use chrono::Utc;
use shared::{AddExpenseRequest, Expense};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::models::expense::{build_expense, total_amount};
use crate::domain::validation::{validate_expense, ValidationError};
use crate::storage::{BackendProvider, ExpenseStorage, ReadOutcome, StorageError};

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The current collection together with its total
#[derive(Debug)]
pub struct ExpenseListing {
    pub expenses: Vec<Expense>,
    pub total: f64,
    /// Why the collection is empty, when the read was degraded
    pub degraded: Option<StorageError>,
}

#[derive(Clone)]
pub struct ExpenseService {
    provider: Arc<dyn BackendProvider>,
}

impl ExpenseService {
    pub fn new(provider: Arc<dyn BackendProvider>) -> Self {
        Self { provider }
    }

    pub fn backend_name(&self) -> &'static str {
        self.provider.active_backend().name()
    }

    pub async fn list_expenses(&self) -> ExpenseListing {
        match self.provider.active_backend().read().await {
            ReadOutcome::Loaded(expenses) => {
                let total = total_amount(&expenses);
                ExpenseListing {
                    expenses,
                    total,
                    degraded: None,
                }
            }
            ReadOutcome::Degraded { cause } => ExpenseListing {
                expenses: Vec::new(),
                total: 0.0,
                degraded: Some(cause),
            },
        }
    }

    pub async fn total(&self) -> f64 {
        let expenses = self.provider.active_backend().read().await.into_expenses();
        total_amount(&expenses)
    }

    /// Validate the form, assign id and timestamp, append and save.
    ///
    /// The record is returned only once the backend accepted the write.
    pub async fn add_expense(&self, request: AddExpenseRequest) -> Result<Expense, ExpenseError> {
        let input = validate_expense(&request)?;

        let backend = self.provider.active_backend();
        let mut expenses = load_for_update(backend.as_ref()).await?;

        let expense = build_expense(input, Utc::now(), &expenses);
        expenses.push(expense.clone());
        backend.write(&expenses).await?;

        info!(
            id = %expense.id,
            backend = backend.name(),
            "Added expense '{}' ({}) for {:.2}",
            expense.description,
            expense.category,
            expense.amount
        );
        Ok(expense)
    }

    /// Remove the record with `id`. Returns false, without writing, when no
    /// record matches.
    pub async fn delete_expense(&self, id: &str) -> Result<bool, ExpenseError> {
        let backend = self.provider.active_backend();
        let mut expenses = load_for_update(backend.as_ref()).await?;

        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() == before {
            info!(id = %id, "No expense to delete");
            return Ok(false);
        }

        backend.write(&expenses).await?;
        info!(id = %id, backend = backend.name(), "Deleted expense");
        Ok(true)
    }
}

/// Read the collection as the base for a change.
///
/// Unreadable or malformed stored data is replaced, like any other fail-soft
/// read: the change starts from an empty collection. Only an unreachable or
/// erroring key-value service blocks the write, since the stored data may be
/// intact behind it.
async fn load_for_update(backend: &dyn ExpenseStorage) -> Result<Vec<Expense>, StorageError> {
    match backend.read().await {
        ReadOutcome::Loaded(expenses) => Ok(expenses),
        ReadOutcome::Degraded { cause } if blocks_update(&cause) => {
            warn!(backend = backend.name(), "Not saving while storage is unreachable: {}", cause);
            Err(cause)
        }
        ReadOutcome::Degraded { cause } => {
            warn!(backend = backend.name(), "Starting from an empty collection: {}", cause);
            Ok(Vec::new())
        }
    }
}

fn blocks_update(cause: &StorageError) -> bool {
    matches!(cause, StorageError::Transport(_) | StorageError::KeyValue(_))
}
