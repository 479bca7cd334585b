use serde::{Deserialize, Serialize};

/// A single turn in a persisted consultation transcript.
///
/// Assistant content is stored exactly as the model produced it,
/// citation artifacts included; cleanup happens on read (see
/// [`crate::postprocess::clean`]). Messages are immutable once created
/// and only disappear when the case is reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Stable string form used in the durable transcript schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    /// Parse the durable string form back into a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ChatRole::User),
            "assistant" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}
