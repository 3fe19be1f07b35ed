//! Test utilities for storage tests.
//!
//! `TestEnvironment` owns a temporary directory that is removed when it goes
//! out of scope, even if the test panics.

use shared::Expense;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::file::{LocalFileStorage, DEFAULT_DATA_DIR};
use super::selector::FixedBackend;
use super::traits::ExpenseStorage;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    /// Root of the temporary directory
    pub base_path: PathBuf,
    /// Data directory inside the root; not created up front
    pub data_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::with_prefix("expense_tracker_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let data_dir = base_path.join(DEFAULT_DATA_DIR);

        Ok(Self {
            _temp_dir: temp_dir,
            base_path,
            data_dir,
        })
    }

    pub fn file_storage(&self) -> LocalFileStorage {
        LocalFileStorage::new(&self.data_dir)
    }

    /// A provider that always hands out this environment's file backend
    pub fn file_provider(&self) -> Arc<FixedBackend> {
        let storage: Arc<dyn ExpenseStorage> = Arc::new(self.file_storage());
        Arc::new(FixedBackend::new(storage))
    }
}

pub fn sample_expense(id: &str, category: &str, description: &str, amount: f64) -> Expense {
    Expense {
        id: id.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        amount,
        created_at: "2024-06-10T06:13:20.000Z".to_string(),
    }
}
