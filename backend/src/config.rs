//! # Configuration
//!
//! Storage settings are looked up through a [`ConfigSource`] on every call so
//! credentials injected into the environment take effect without a restart.
//! Server settings are read once at startup.
//!
//! | Variable               | Purpose                                        |
//! |------------------------|------------------------------------------------|
//! | `KV_REST_API_URL`      | key-value service URL (with token: KV backend) |
//! | `KV_REST_API_TOKEN`    | key-value access token                         |
//! | `APP_ENV`              | `development` enables the local file backend   |
//! | `EXPENSES_DATA_DIR`    | directory of `expenses.json` (default `data`)  |
//! | `EXPENSES_BIND_ADDR`   | listen address (default `127.0.0.1:3000`)      |
//! | `EXPENSES_CORS_ORIGIN` | allowed browser origin                         |

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

use crate::storage::file::DEFAULT_DATA_DIR;

pub const KV_URL_VAR: &str = "KV_REST_API_URL";
pub const KV_TOKEN_VAR: &str = "KV_REST_API_TOKEN";
pub const RUNTIME_MODE_VAR: &str = "APP_ENV";
pub const DATA_DIR_VAR: &str = "EXPENSES_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "EXPENSES_BIND_ADDR";
pub const CORS_ORIGIN_VAR: &str = "EXPENSES_CORS_ORIGIN";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
}

impl RuntimeMode {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            RuntimeMode::Development
        } else {
            RuntimeMode::Production
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, RuntimeMode::Development)
    }
}

/// Settings that decide which storage backend is active
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub kv_url: Option<String>,
    pub kv_token: Option<String>,
    pub runtime_mode: RuntimeMode,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kv_url: None,
            kv_token: None,
            runtime_mode: RuntimeMode::Production,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Read a variable, treating blank values as unset
fn lookup_non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl StorageConfig {
    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            kv_url: lookup_non_empty(&lookup, KV_URL_VAR),
            kv_token: lookup_non_empty(&lookup, KV_TOKEN_VAR),
            runtime_mode: lookup_non_empty(&lookup, RUNTIME_MODE_VAR)
                .map(|mode| RuntimeMode::parse(&mode))
                .unwrap_or_default(),
            data_dir: lookup_non_empty(&lookup, DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

/// Supplies the storage configuration for each call
pub trait ConfigSource: Send + Sync {
    fn storage_config(&self) -> StorageConfig;
}

/// Reads the process environment every time it is asked
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigSource;

impl ConfigSource for EnvConfigSource {
    fn storage_config(&self) -> StorageConfig {
        StorageConfig::from_env()
    }
}

/// Fixed configuration that can be swapped at runtime
#[derive(Debug, Default)]
pub struct StaticConfigSource {
    config: Mutex<StorageConfig>,
}

impl StaticConfigSource {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }

    fn config(&self) -> MutexGuard<'_, StorageConfig> {
        self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn replace(&self, config: StorageConfig) {
        *self.config() = config;
    }
}

impl ConfigSource for StaticConfigSource {
    fn storage_config(&self) -> StorageConfig {
        self.config().clone()
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
}

impl ServerConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup_non_empty(&lookup, BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                field: BIND_ADDR_VAR,
                reason: format!("'{}': {}", bind_addr, e),
            })?;

        let cors_origin = lookup_non_empty(&lookup, CORS_ORIGIN_VAR)
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin =
            HeaderValue::from_str(&cors_origin).map_err(|e| ConfigError::InvalidValue {
                field: CORS_ORIGIN_VAR,
                reason: format!("'{}': {}", cors_origin, e),
            })?;

        Ok(Self {
            bind_addr,
            cors_origin,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}
