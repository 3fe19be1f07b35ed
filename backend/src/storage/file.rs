//! # Local File Storage
//!
//! Development-only backend that keeps the collection in a single
//! pretty-printed JSON document:
//!
//! ```text
//! data/
//! └── expenses.json    ← [ { "id": ..., "category": ..., ... }, ... ]
//! ```
//!
//! The directory and an empty `[]` document are created on first read. A
//! corrupt document never fails the caller; the read degrades to an empty
//! collection and the error is logged. Not durable on ephemeral hosts.

use async_trait::async_trait;
use serde_json::Value;
use shared::Expense;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

use super::decode::decode_collection;
use super::traits::{ExpenseStorage, ReadOutcome, StorageError};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const EXPENSES_FILE_NAME: &str = "expenses.json";

#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    data_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(EXPENSES_FILE_NAME)
    }

    async fn ensure_data_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StorageError::io(&self.data_dir, e))
    }

    /// Make sure the directory and the document exist, seeding `[]`
    async fn ensure_file(&self) -> Result<PathBuf, StorageError> {
        self.ensure_data_dir().await?;

        let path = self.file_path();
        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;
        if !exists {
            let empty = serde_json::to_string_pretty(&Vec::<Expense>::new())?;
            fs::write(&path, empty)
                .await
                .map_err(|e| StorageError::io(&path, e))?;
            info!("Created empty expenses file at {}", path.display());
        }
        Ok(path)
    }

    async fn load(&self) -> Result<Vec<Expense>, StorageError> {
        let path = self.ensure_file().await?;
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;
        let value: Value = serde_json::from_str(&content)?;
        decode_collection(value, &path.display().to_string())
    }

    async fn save(&self, expenses: &[Expense]) -> Result<(), StorageError> {
        self.ensure_data_dir().await?;

        let path = self.file_path();
        let content = serde_json::to_string_pretty(expenses)?;

        // Write to a sibling temp file, then rename over the document
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .await
            .map_err(|e| StorageError::io(&temp_path, e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;
        Ok(())
    }
}

impl Default for LocalFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[async_trait]
impl ExpenseStorage for LocalFileStorage {
    fn name(&self) -> &'static str {
        "local-file"
    }

    async fn read(&self) -> ReadOutcome {
        match self.load().await {
            Ok(expenses) => {
                debug!(
                    "Loaded {} expenses from {}",
                    expenses.len(),
                    self.file_path().display()
                );
                ReadOutcome::Loaded(expenses)
            }
            Err(e) => {
                error!(
                    "Error reading expenses from {}: {}",
                    self.file_path().display(),
                    e
                );
                ReadOutcome::Degraded { cause: e }
            }
        }
    }

    async fn write(&self, expenses: &[Expense]) -> Result<(), StorageError> {
        match self.save(expenses).await {
            Ok(()) => {
                debug!(
                    "Saved {} expenses to {}",
                    expenses.len(),
                    self.file_path().display()
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "Error saving expenses to {}: {}",
                    self.file_path().display(),
                    e
                );
                Err(e)
            }
        }
    }
}
