use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::message::ChatMessage;
use crate::error::{AppError, AppResult};
use crate::services::{ChatCompletionClient, ChatSummaryService};

/// Summary service backed by a chat-completion client.
///
/// The prompt shape and response handling for summaries are not defined yet,
/// so `summarize` reports `NotImplemented` and never reaches the client.
pub struct LlmChatSummaryService {
    #[allow(dead_code)]
    client: Arc<dyn ChatCompletionClient>,
}

impl LlmChatSummaryService {
    pub fn new(client: Arc<dyn ChatCompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatSummaryService for LlmChatSummaryService {
    async fn summarize(&self, messages: &[ChatMessage]) -> AppResult<String> {
        debug!(messages = messages.len(), "summarize requested");
        Err(AppError::NotImplemented("chat summarization"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::completion::CompletionRequest;

    #[derive(Default)]
    struct RecordingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatCompletionClient for RecordingClient {
        async fn complete(&self, _request: &CompletionRequest) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("summary".to_string())
        }
    }

    fn service() -> (Arc<RecordingClient>, LlmChatSummaryService) {
        let client = Arc::new(RecordingClient::default());
        let service = LlmChatSummaryService::new(client.clone());
        (client, service)
    }

    #[tokio::test]
    async fn empty_conversation_is_not_implemented() {
        let (client, service) = service();

        let err = service.summarize(&[]).await.unwrap_err();

        assert!(matches!(err, AppError::NotImplemented("chat summarization")));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn single_message_is_not_implemented() {
        let (client, service) = service();
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");

        let err = service
            .summarize(&[ChatMessage::new("a", "hi", timestamp)])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "chat summarization is not implemented");
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}
