pub mod commands;
pub mod config;
pub mod event;
pub mod history;
pub mod orchestrator;
pub mod router;
pub mod window;

pub use commands::Command;
pub use config::{load_config, ProviderConfig, SoireeConfig, TelegramConfig};
pub use event::EventDetails;
pub use history::HistoryStore;
pub use orchestrator::{CompletionError, ModelReply, Orchestrator};
pub use router::MessageRouter;
