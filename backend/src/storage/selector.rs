//! Backend selection.
//!
//! The choice is a pure function of [`StorageConfig`], evaluated in a fixed
//! priority order:
//!
//! 1. key-value credentials (URL and token) present → key-value backend
//! 2. development mode → local file backend
//! 3. otherwise → null backend

use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use super::file::LocalFileStorage;
use super::kv::{KeyValueStorage, RestKeyValueClient};
use super::null::NullStorage;
use super::traits::{BackendProvider, ExpenseStorage};
use crate::config::{ConfigSource, StorageConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendKind {
    KeyValue { url: String, token: String },
    LocalFile { data_dir: PathBuf },
    Null,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::KeyValue { .. } => "key-value",
            BackendKind::LocalFile { .. } => "local-file",
            BackendKind::Null => "null",
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn select_backend(config: &StorageConfig) -> BackendKind {
    if let (Some(url), Some(token)) = (present(&config.kv_url), present(&config.kv_token)) {
        return BackendKind::KeyValue {
            url: url.to_string(),
            token: token.to_string(),
        };
    }
    if config.runtime_mode.is_development() {
        return BackendKind::LocalFile {
            data_dir: config.data_dir.clone(),
        };
    }
    BackendKind::Null
}

/// Picks the backend from the current configuration on every call
#[derive(Clone)]
pub struct BackendSelector {
    source: Arc<dyn ConfigSource>,
    http: Client,
}

impl BackendSelector {
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self::with_client(source, Client::new())
    }

    pub fn with_client(source: Arc<dyn ConfigSource>, http: Client) -> Self {
        Self { source, http }
    }

    pub fn current_kind(&self) -> BackendKind {
        select_backend(&self.source.storage_config())
    }

    pub fn build(&self, kind: BackendKind) -> Arc<dyn ExpenseStorage> {
        match kind {
            BackendKind::KeyValue { url, token } => Arc::new(KeyValueStorage::new(
                RestKeyValueClient::new(self.http.clone(), url, token),
            )),
            BackendKind::LocalFile { data_dir } => Arc::new(LocalFileStorage::new(data_dir)),
            BackendKind::Null => Arc::new(NullStorage::new()),
        }
    }
}

impl BackendProvider for BackendSelector {
    fn active_backend(&self) -> Arc<dyn ExpenseStorage> {
        let kind = self.current_kind();
        debug!(backend = kind.name(), "Selected storage backend");
        self.build(kind)
    }
}

/// Always hands out the same backend
#[derive(Clone)]
pub struct FixedBackend {
    storage: Arc<dyn ExpenseStorage>,
}

impl FixedBackend {
    pub fn new(storage: Arc<dyn ExpenseStorage>) -> Self {
        Self { storage }
    }
}

impl BackendProvider for FixedBackend {
    fn active_backend(&self) -> Arc<dyn ExpenseStorage> {
        self.storage.clone()
    }
}
