//! # Storage Module
//!
//! Persistence for the expense collection. Three interchangeable backends
//! implement [`ExpenseStorage`]:
//!
//! - **Key-value**: one JSON array under a fixed key in a remote KV service
//! - **Local file**: `data/expenses.json`, development only
//! - **Null**: reads empty, rejects writes; used when nothing is configured
//!
//! [`BackendSelector`] chooses among them from the environment on each call.

pub mod decode;
pub mod file;
pub mod kv;
pub mod null;
pub mod selector;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use file::LocalFileStorage;
pub use kv::{
    KeyValueClient, KeyValueStorage, MemoryKeyValueClient, RestKeyValueClient, EXPENSES_KEY,
};
pub use null::NullStorage;
pub use selector::{select_backend, BackendKind, BackendSelector, FixedBackend};
pub use traits::{BackendProvider, ExpenseStorage, ReadOutcome, StorageError};
