use async_trait::async_trait;

use crate::domain::completion::CompletionRequest;
use crate::error::AppResult;

#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String>;
}
