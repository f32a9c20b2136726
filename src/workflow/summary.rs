use tracing::info;

use crate::context::AppContext;
use crate::domain::message::ChatMessage;
use crate::domain::summary::SummaryOutcome;
use crate::error::{AppError, AppResult};

pub async fn summarize_conversation(
    ctx: &AppContext,
    messages: &[ChatMessage],
) -> AppResult<SummaryOutcome> {
    info!(messages = messages.len(), "summarizing conversation");

    let summary = ctx.summary.summarize(messages).await?;
    let summary = summary.trim();
    if summary.is_empty() {
        return Err(AppError::LanguageModel(
            "summary service returned an empty summary".to_string(),
        ));
    }

    Ok(SummaryOutcome {
        summary: summary.to_string(),
        message_count: messages.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::services::ChatSummaryService;

    struct FixedSummary(&'static str);

    #[async_trait]
    impl ChatSummaryService for FixedSummary {
        async fn summarize(&self, _messages: &[ChatMessage]) -> AppResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct Unimplemented;

    #[async_trait]
    impl ChatSummaryService for Unimplemented {
        async fn summarize(&self, _messages: &[ChatMessage]) -> AppResult<String> {
            Err(AppError::NotImplemented("chat summarization"))
        }
    }

    fn context(summary: Arc<dyn ChatSummaryService>) -> AppContext {
        AppContext::new(summary)
    }

    fn messages() -> Vec<ChatMessage> {
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        vec![
            ChatMessage::new("alice", "ship it?", timestamp),
            ChatMessage::new("bob", "after review", timestamp),
        ]
    }

    #[tokio::test]
    async fn returns_trimmed_summary() {
        let ctx = context(Arc::new(FixedSummary("  Ship after review.\n")));
        let outcome = summarize_conversation(&ctx, &messages()).await.unwrap();
        assert_eq!(outcome.summary, "Ship after review.");
        assert_eq!(outcome.message_count, 2);
    }

    #[tokio::test]
    async fn rejects_blank_summary() {
        let ctx = context(Arc::new(FixedSummary("   ")));
        let err = summarize_conversation(&ctx, &messages()).await.unwrap_err();
        assert!(matches!(err, AppError::LanguageModel(_)));
    }

    #[tokio::test]
    async fn propagates_service_errors() {
        let ctx = context(Arc::new(Unimplemented));
        let err = summarize_conversation(&ctx, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::NotImplemented(_)));
    }
}
