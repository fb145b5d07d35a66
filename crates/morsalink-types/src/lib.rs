//! Core types shared by the morsalink crates
//!
//! These are the wire shapes exchanged between the browser UI, the HTTP
//! handlers and the provider clients.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Reply used when every configured provider fails or has nothing to say
pub const DEFAULT_APOLOGY: &str = "I couldn't find a clear answer.";

/// Plain-text body returned when a chat request carries no question
pub const EMPTY_QUESTION_REPLY: &str = "Please ask a question.";

// ============================================================================
// Message Types
// ============================================================================

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Helper function to deserialize string or null values
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// A single `{role, content}` record of the conversation
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Message {
    #[serde(default)]
    pub role: Role,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// The trimmed content of the last message, if it is not blank.
///
/// The browser always appends the new user turn last, so this is the
/// question being asked.
pub fn last_question(messages: &[Message]) -> Option<&str> {
    messages
        .last()
        .map(|m| m.content.trim())
        .filter(|q| !q.is_empty())
}

/// Drop assistant turns that precede the first user turn (the UI greeting).
///
/// System messages are kept wherever they appear.
pub fn strip_leading_assistant(messages: &[Message]) -> Vec<&Message> {
    let first_user = messages
        .iter()
        .position(|m| m.role == Role::User)
        .unwrap_or(messages.len());

    messages
        .iter()
        .enumerate()
        .filter(|(i, m)| *i >= first_user || m.role != Role::Assistant)
        .map(|(_, m)| m)
        .collect()
}

// ============================================================================
// HTTP Bodies
// ============================================================================

/// Body of `POST /api/chat`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// JSON reply of `POST /api/chat` in json mode
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub provider: Option<String>,
}

/// Body of `POST /api/image`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ImageRequest {
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub prompt: String,
}

/// Successful reply of `POST /api/image`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageResponse {
    pub url: String,
}

/// Error body shared by the JSON endpoints
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
