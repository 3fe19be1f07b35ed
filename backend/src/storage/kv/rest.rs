//! REST client for Upstash-compatible key-value services (Vercel KV).
//!
//! Each command is a `POST` of a JSON array (`["GET", key]`,
//! `["SET", key, value]`) to the base URL with a bearer token. Replies carry
//! either `result` or `error`. Values are stored as JSON text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::KeyValueClient;
use crate::storage::traits::StorageError;

#[derive(Debug, Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct RestKeyValueClient {
    http: Client,
    url: String,
    token: String,
}

impl RestKeyValueClient {
    pub fn new(http: Client, url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            token: token.into(),
        }
    }

    async fn command(&self, args: &[&str]) -> Result<Option<Value>, StorageError> {
        debug!(
            url = %self.url,
            command = args.first().copied().unwrap_or_default(),
            "Sending key-value command"
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        let reply: CommandReply = match response.json().await {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(StorageError::KeyValue(format!("HTTP {}", status)));
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = reply.error {
            return Err(StorageError::KeyValue(error));
        }
        if !status.is_success() {
            return Err(StorageError::KeyValue(format!("HTTP {}", status)));
        }
        Ok(reply.result)
    }
}

#[async_trait]
impl KeyValueClient for RestKeyValueClient {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let value = match self.command(&["GET", key]).await? {
            None | Some(Value::Null) => None,
            // Stored text is JSON; anything else is passed through as a string
            Some(Value::String(text)) => match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => Some(parsed),
                Err(_) => Some(Value::String(text)),
            },
            Some(other) => Some(other),
        };
        Ok(value)
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.command(&["SET", key, &text]).await?;
        Ok(())
    }
}
