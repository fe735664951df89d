//! One completion turn: window in, rendered reply out.

use std::sync::Arc;

use soiree_provider::{LlmMessage, LlmProvider, LlmRequest, LlmResponse};
use soiree_schema::{ChatId, Role, StoredMessage};

use crate::event::{self, EventDetails};
use crate::history::HistoryStore;
use crate::window;

/// Sampling temperature for every completion request. Low, to keep the
/// assistant's phrasing stable across turns.
const TEMPERATURE: f32 = 0.3;

const MAX_TOKENS: u32 = 2048;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The completion service was unreachable, returned a non-success
    /// status, or produced a body that could not be parsed.
    #[error("completion service failed: {0}")]
    Upstream(anyhow::Error),
    /// The model invoked the hand-off function without a required argument.
    #[error("malformed tool call: {0}")]
    MalformedToolCall(String),
}

/// What the model came back with: free text to relay verbatim, or a
/// completed event hand-off.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Text(String),
    EventReady(EventDetails),
}

pub struct Orchestrator {
    history: Arc<HistoryStore>,
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl Orchestrator {
    pub fn new(
        history: Arc<HistoryStore>,
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            history,
            provider,
            model: model.into(),
        }
    }

    /// Run one completion turn for the chat and render the reply text.
    /// A rendered hand-off summary is terminal: it goes straight back to
    /// the user, never into a further model turn.
    pub async fn get_completion(&self, chat_id: ChatId) -> Result<String, CompletionError> {
        match self.complete(chat_id).await? {
            ModelReply::Text(text) => Ok(text),
            ModelReply::EventReady(details) => Ok(details.render_summary()),
        }
    }

    /// Run one completion turn and return the interpreted reply shape.
    pub async fn complete(&self, chat_id: ChatId) -> Result<ModelReply, CompletionError> {
        let history = self.history.read(chat_id).await;
        let prompt = window::build_window(&history);
        let request = to_request(&self.model, &prompt);
        tracing::debug!(%chat_id, messages = request.messages.len(), "requesting completion");

        let response = self
            .provider
            .chat(request)
            .await
            .map_err(CompletionError::Upstream)?;

        interpret(response)
    }
}

fn to_request(model: &str, prompt: &[StoredMessage]) -> LlmRequest {
    let mut system = None;
    let mut messages = Vec::new();
    for msg in prompt {
        match msg.role {
            Role::System => system = Some(msg.content.clone()),
            role => messages.push(LlmMessage::new(role.as_str(), msg.content.clone())),
        }
    }
    LlmRequest {
        model: model.to_string(),
        system,
        messages,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        tools: vec![event::tool_def()],
    }
}

fn interpret(response: LlmResponse) -> Result<ModelReply, CompletionError> {
    if let Some((name, input)) = response.tool_use() {
        if name == event::TOOL_NAME {
            let details = EventDetails::from_args(input)
                .map_err(|e| CompletionError::MalformedToolCall(e.to_string()))?;
            return Ok(ModelReply::EventReady(details));
        }
        tracing::warn!(tool = name, "model invoked an unknown tool, relaying text");
    }
    Ok(ModelReply::Text(response.text))
}
