use async_trait::async_trait;

use crate::error::Result;
use crate::schemas::{ChatMessage, HistoryResponse, ResponseDocument};

/// A live analytics backend speaking the chat contract.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &ChatMessage) -> Result<ResponseDocument>;

    async fn history(&self, user_id: &str) -> Result<HistoryResponse>;
}
