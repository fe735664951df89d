use std::collections::HashMap;

use soiree_schema::{ChatId, Role, StoredMessage};
use tokio::sync::RwLock;

/// In-memory conversation log, keyed by chat id.
///
/// Histories are append-only and retained for the process lifetime; nothing
/// is deleted, not even across `/reset` (the reset boundary is applied by
/// the window extractor, not here). The full log stays available for
/// debugging. Restarting the process starts every conversation fresh — a
/// known limitation of this bot's scope.
#[derive(Default)]
pub struct HistoryStore {
    conversations: RwLock<HashMap<ChatId, Vec<StoredMessage>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message to a chat's history, creating the history on
    /// first use.
    pub async fn append(&self, chat_id: ChatId, role: Role, content: impl Into<String>) {
        let mut conversations = self.conversations.write().await;
        conversations.entry(chat_id).or_default().push(StoredMessage {
            role,
            content: content.into(),
        });
    }

    /// Full ordered history for a chat. An id that has never been seen
    /// yields an empty history, not an error.
    pub async fn read(&self, chat_id: ChatId) -> Vec<StoredMessage> {
        let conversations = self.conversations.read().await;
        conversations.get(&chat_id).cloned().unwrap_or_default()
    }
}
