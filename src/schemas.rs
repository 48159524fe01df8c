//! Wire types shared by the chat client, the HTTP service and the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::data::DomainData;
use crate::engine::intent::Intent;
use crate::engine::viz::VisualizationSpec;

/// Answer to one chat message, identical whether it came from the live
/// backend or from the offline engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDocument {
    pub message: String,
    pub data: DomainData,
    #[serde(default)]
    pub visualizations: Vec<VisualizationSpec>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Request body for `POST /api/chat/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ChatMessage {
    pub fn new(message: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: uuid::Uuid,
    pub user_id: String,
    pub message: String,
    pub intent: Intent,
    pub timestamp: DateTime<Utc>,
    pub has_visualizations: bool,
}

/// Body of `POST /api/dashboard/save-query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveQueryRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: uuid::Uuid,
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of `GET /api/chat/history`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}

pub const ANONYMOUS_USER: &str = "anonymous";
