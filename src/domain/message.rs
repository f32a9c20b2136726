use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
}

impl ChatMessage {
    pub fn new(
        sender: impl Into<String>,
        message: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
            timestamp,
        }
    }

    /// Parses a JSON array of messages, e.g. the contents of a chat export.
    pub fn parse_list(contents: &str) -> AppResult<Vec<Self>> {
        serde_json::from_str(contents)
            .map_err(|err| AppError::InvalidInput(format!("invalid message list: {err}")))
    }
}
