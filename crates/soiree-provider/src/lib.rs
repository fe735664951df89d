pub mod openai;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use openai::OpenAiProvider;
pub use types::*;

/// Client for a chat-completion service. One implementation is wired at a
/// time; the trait exists so tests can substitute a stub.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse>;

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}
