use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one user's conversation. Opaque beyond equality and
/// hashing; Telegram chat ids map onto it directly.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chat:{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry in a conversation history. Immutable once appended; ordering
/// within a conversation is the append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub role: Role,
    pub content: String,
}

impl StoredMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

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
}

/// Inbound envelope from a transport connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub trace_id: Uuid,
    pub connector_id: String,
    pub chat_id: ChatId,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(connector_id: impl Into<String>, chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            connector_id: connector_id.into(),
            chat_id,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Outbound reply bound for a transport connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub trace_id: Uuid,
    pub connector_id: String,
    pub chat_id: ChatId,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl OutboundMessage {
    /// Build the reply envelope for an inbound message, carrying its trace id.
    pub fn reply_to(inbound: &InboundMessage, text: impl Into<String>) -> Self {
        Self {
            trace_id: inbound.trace_id,
            connector_id: inbound.connector_id.clone(),
            chat_id: inbound.chat_id,
            text: text.into(),
            at: Utc::now(),
        }
    }
}
