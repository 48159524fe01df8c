//! Live backend client with offline fallback.
//!
//! The backend gets exactly one attempt per message. Any failure (timeout,
//! connection error, non-success status, undecodable body) is logged and
//! answered by the local engine instead; callers never see the error.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::traits::ChatBackend;
use crate::config::Config;
use crate::engine::ResponseEngine;
use crate::error::{FloatChatError, Result};
use crate::schemas::{ChatMessage, HistoryResponse, ResponseDocument};

pub const CHAT_PATH: &str = "/api/chat/";
pub const HISTORY_PATH: &str = "/api/chat/history";

/// reqwest-backed implementation of the chat contract
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpChatBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build reqwest client with timeout")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms: saturating_millis(timeout),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.backend.base_url.clone(), config.backend_timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_err(&self, operation: &str, err: reqwest::Error) -> FloatChatError {
        if err.is_timeout() {
            FloatChatError::Timeout {
                operation: operation.to_string(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            err.into()
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(FloatChatError::Backend {
            message: format!("status {}: {}", status, body),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &ChatMessage) -> Result<ResponseDocument> {
        let operation = format!("POST {}", CHAT_PATH);
        let response = self
            .client
            .post(self.url(CHAT_PATH))
            .json(message)
            .send()
            .await
            .map_err(|e| self.map_err(&operation, e))?;
        let response = Self::check_status(response).await?;
        response
            .json::<ResponseDocument>()
            .await
            .map_err(|e| self.map_err(&operation, e))
    }

    async fn history(&self, user_id: &str) -> Result<HistoryResponse> {
        let operation = format!("GET {}", HISTORY_PATH);
        let response = self
            .client
            .get(self.url(HISTORY_PATH))
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(|e| self.map_err(&operation, e))?;
        let response = Self::check_status(response).await?;
        response
            .json::<HistoryResponse>()
            .await
            .map_err(|e| self.map_err(&operation, e))
    }
}

fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Backend,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub document: ResponseDocument,
    pub source: ReplySource,
}

/// Chat client that prefers the live backend and falls back to the engine.
pub struct FallbackChatClient {
    backend: Option<Box<dyn ChatBackend>>,
    engine: ResponseEngine,
}

impl FallbackChatClient {
    pub fn new(backend: Box<dyn ChatBackend>, engine: ResponseEngine) -> Self {
        Self {
            backend: Some(backend),
            engine,
        }
    }

    /// Client that never touches the network.
    pub fn offline(engine: ResponseEngine) -> Self {
        Self {
            backend: None,
            engine,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = HttpChatBackend::from_config(config)?;
        Ok(Self::new(
            Box::new(backend),
            ResponseEngine::new(config.engine.seed),
        ))
    }

    pub async fn send(&self, message: &ChatMessage) -> Reply {
        if let Some(backend) = &self.backend {
            match backend.send(message).await {
                Ok(document) => {
                    debug!("Backend answered chat message");
                    return Reply {
                        document,
                        source: ReplySource::Backend,
                    };
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        kind = e.label(),
                        "Backend unavailable, answering from local engine"
                    );
                }
            }
        }

        let classification = self.engine.classify(&message.message);
        debug!(
            intent = %classification.intent,
            rule = classification.rule,
            "Fallback response synthesized"
        );
        Reply {
            document: classification.document,
            source: ReplySource::Fallback,
        }
    }

    /// Chat history for `user_id`; empty when the backend cannot provide it.
    pub async fn history(&self, user_id: &str) -> HistoryResponse {
        let Some(backend) = &self.backend else {
            return HistoryResponse::default();
        };
        match backend.history(user_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "History unavailable, returning empty list");
                HistoryResponse::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::intent::Intent;
    use crate::engine::suggestions::suggestions_for;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FailingBackend {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn send(&self, _message: &ChatMessage) -> Result<ResponseDocument> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FloatChatError::Timeout {
                operation: "POST /api/chat/".into(),
                timeout_ms: 30_000,
            })
        }

        async fn history(&self, _user_id: &str) -> Result<HistoryResponse> {
            Err(FloatChatError::Backend {
                message: "connection refused".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_failure_falls_back_without_retry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = FallbackChatClient::new(
            Box::new(FailingBackend {
                calls: calls.clone(),
            }),
            ResponseEngine::new(Some(5)),
        );
        let reply = client
            .send(&ChatMessage::new("ocean velocity", None))
            .await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            reply.document.suggestions,
            suggestions_for(Intent::CurrentVelocity).to_vec()
        );
    }

    #[tokio::test]
    async fn test_history_failure_is_empty() {
        let client = FallbackChatClient::new(
            Box::new(FailingBackend {
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            ResponseEngine::default(),
        );
        assert!(client.history("u1").await.messages.is_empty());
    }

    #[tokio::test]
    async fn test_offline_client() {
        let client = FallbackChatClient::offline(ResponseEngine::default());
        let reply = client.send(&ChatMessage::new("", None)).await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(reply.document.suggestions.len(), 4);
        assert!(client.history("anyone").await.messages.is_empty());
    }

    #[test]
    fn test_timeout_millis_saturate() {
        assert_eq!(saturating_millis(Duration::from_millis(250)), 250);
        assert_eq!(saturating_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let backend =
            HttpChatBackend::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url(CHAT_PATH), "http://localhost:8000/api/chat/");
    }
}
