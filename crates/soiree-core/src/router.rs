//! Inbound message routing: store, resolve commands, or ask the model.

use std::sync::Arc;

use soiree_schema::{ChatId, Role};

use crate::commands::{self, Command};
use crate::history::HistoryStore;
use crate::orchestrator::{CompletionError, Orchestrator};
use crate::window;

pub struct MessageRouter {
    history: Arc<HistoryStore>,
    orchestrator: Orchestrator,
}

impl MessageRouter {
    pub fn new(history: Arc<HistoryStore>, orchestrator: Orchestrator) -> Self {
        Self {
            history,
            orchestrator,
        }
    }

    /// Handle one inbound message and produce the reply text.
    ///
    /// The raw text is recorded before any interpretation, so a later
    /// failure never loses the record that the user spoke. The reply is
    /// recorded before returning, so history reflects it even if the
    /// transport fails to deliver it.
    pub async fn handle_message(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<String, CompletionError> {
        self.history.append(chat_id, Role::User, text).await;

        let response = match commands::parse(text) {
            Some(Command::Start) => {
                tracing::info!(%chat_id, "conversation started");
                commands::START_ACK.to_string()
            }
            Some(Command::Reset) => {
                tracing::info!(%chat_id, "conversation reset");
                commands::RESET_ACK.to_string()
            }
            Some(Command::History) => {
                let history = self.history.read(chat_id).await;
                // The /history message itself was stored just above; the
                // command asks about the conversation, it is not part of it.
                let shown = match history.split_last() {
                    Some((last, rest)) if last.content == "/history" => rest,
                    _ => &history[..],
                };
                window::build_window(shown)
                    .iter()
                    .map(|msg| msg.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            None => self.orchestrator.get_completion(chat_id).await?,
        };

        self.history
            .append(chat_id, Role::Assistant, response.as_str())
            .await;
        Ok(response)
    }
}
