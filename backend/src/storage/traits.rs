//! # Storage Traits
//!
//! This module defines the storage abstraction that lets the key-value, local
//! file and null backends be used interchangeably by the domain layer.
//!
//! Every backend reads and writes the whole expense collection as a single
//! unit. There is no partial update path and no locking: two concurrent
//! read-modify-write cycles resolve as last-writer-wins.

use async_trait::async_trait;
use shared::Expense;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid expense data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("key-value request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("key-value store returned an error: {0}")]
    KeyValue(String),

    #[error("stored value at '{location}' is not a list of expenses")]
    NotACollection { location: String },

    #[error("no storage backend is configured")]
    Unconfigured,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result of reading the collection.
///
/// A degraded read still yields a usable (empty) collection; the cause is kept
/// so callers can tell "no expenses" apart from "storage failed".
#[derive(Debug)]
pub enum ReadOutcome {
    Loaded(Vec<Expense>),
    Degraded { cause: StorageError },
}

impl ReadOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ReadOutcome::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&StorageError> {
        match self {
            ReadOutcome::Loaded(_) => None,
            ReadOutcome::Degraded { cause } => Some(cause),
        }
    }

    /// The collection, empty when the read was degraded
    pub fn into_expenses(self) -> Vec<Expense> {
        match self {
            ReadOutcome::Loaded(expenses) => expenses,
            ReadOutcome::Degraded { .. } => Vec::new(),
        }
    }
}

/// Trait defining the read/write contract shared by all backends
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Short backend name for logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Load the full collection. Never fails; problems surface as
    /// [`ReadOutcome::Degraded`].
    async fn read(&self) -> ReadOutcome;

    /// Replace the stored collection with `expenses`.
    async fn write(&self, expenses: &[Expense]) -> Result<(), StorageError>;
}

/// Hands out the backend to use for the current call.
///
/// Implementations may decide afresh on every call, so callers should not
/// hold on to the returned backend across operations.
pub trait BackendProvider: Send + Sync {
    fn active_backend(&self) -> Arc<dyn ExpenseStorage>;
}
