use async_trait::async_trait;

use crate::domain::message::ChatMessage;
use crate::error::AppResult;

#[async_trait]
pub trait ChatSummaryService: Send + Sync {
    /// Condenses an ordered conversation into a text summary. An empty slice is allowed.
    async fn summarize(&self, messages: &[ChatMessage]) -> AppResult<String>;
}
