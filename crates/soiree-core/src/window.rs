//! Prompt-window extraction.
//!
//! The model never sees a conversation's full history: each turn gets the
//! fixed system prompt plus a bounded suffix of recent messages, scoped to
//! the most recent `/start` or `/reset`.

use soiree_schema::{Role, StoredMessage};

use crate::commands;

/// Upper bound on history messages included in one prompt window.
pub const MAX_WINDOW_MESSAGES: usize = 10;

/// The fixed instruction prepended to every prompt window. Defined once;
/// not editable at runtime.
pub const SYSTEM_PROMPT: &str = "\
Your goal is to support a conversation and ask questions until you are ready \
to use the function and send data to my company. If the user is trying to \
talk after sending, tell them they will be contacted as soon as possible. \
Regardless of how the conversation is started, you need to fill the fields \
and use the function. If the customer is unclear in their intent, gently \
nudge towards planning the event. You are an event planning assistant and \
you will not comply with other requests from the users.";

/// Derive the prompt window for one completion turn: one synthesized system
/// message followed by at most the last [`MAX_WINDOW_MESSAGES`] messages
/// appended after the most recent reset command. Freshly constructed on
/// every call; the stored history is left untouched.
pub fn build_window(history: &[StoredMessage]) -> Vec<StoredMessage> {
    let start = history
        .iter()
        .rposition(|msg| msg.role == Role::User && commands::is_reset(&msg.content))
        .map(|i| i + 1)
        .unwrap_or(0);

    let suffix = &history[start..];
    let tail_start = suffix.len().saturating_sub(MAX_WINDOW_MESSAGES);

    let mut window = Vec::with_capacity(suffix.len() - tail_start + 1);
    window.push(StoredMessage::system(SYSTEM_PROMPT));
    window.extend_from_slice(&suffix[tail_start..]);
    window
}
