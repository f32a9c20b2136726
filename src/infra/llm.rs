use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::completion::{CompletionMessage, CompletionRequest};
use crate::error::{AppError, AppResult};
use crate::services::ChatCompletionClient;

/// Client for any endpoint speaking the OpenAI chat completions protocol.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: Option<u32>,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            model,
            max_tokens: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        )
        .with_max_tokens(config.max_tokens)
    }

    /// Token limit applied to requests that do not set their own.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("OpenAI API key not configured".to_string()))
    }

    fn completions_endpoint(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        if request.messages.is_empty() {
            return Err(AppError::LanguageModel(
                "completion request has no messages".to_string(),
            ));
        }

        let api_key = self.api_key()?;
        let endpoint = Self::completions_endpoint(&self.base_url);
        let body = ChatCompletionBody::new(&self.model, request, self.max_tokens);
        debug!(
            %endpoint,
            model = %self.model,
            messages = request.messages.len(),
            "requesting chat completion"
        );

        let response = self
            .http
            .post(&endpoint)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "chat completion request failed");
                AppError::LanguageModel(format!("failed to call chat completion API: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            warn!(%status, "chat completion API returned an error status");
            return Err(AppError::LanguageModel(format!(
                "chat completion API responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse chat completion response: {err}"))
        })?;

        payload.into_text()
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [CompletionMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionBody<'a> {
    fn new(
        model: &'a str,
        request: &'a CompletionRequest,
        default_max_tokens: Option<u32>,
    ) -> Self {
        Self {
            model,
            messages: &request.messages,
            max_tokens: request.max_tokens.or(default_max_tokens),
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionChoiceMessage,
}

#[derive(Deserialize)]
struct ChatCompletionChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> AppResult<String> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            AppError::LanguageModel("chat completion returned no choices".to_string())
        })?;

        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::LanguageModel("chat completion returned empty content".to_string())
            })
    }
}
