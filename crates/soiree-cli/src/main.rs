use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use soiree_channels::telegram::TelegramBot;
use soiree_core::{load_config, HistoryStore, MessageRouter, Orchestrator, SoireeConfig};
use soiree_provider::OpenAiProvider;
use soiree_schema::ChatId;

#[derive(Parser)]
#[command(name = "soiree", version, about = "soiree event-planning concierge bot")]
struct Cli {
    #[arg(long, default_value = "config.yaml", help = "Path to the config file")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the Telegram bot")]
    Start,
    #[command(about = "Local REPL for testing (no Telegram needed)")]
    Chat,
    #[command(about = "Validate the config file")]
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate => {
            let config = load_config(&cli.config)?;
            println!(
                "Config valid. connector={}, model={}, api_base={}",
                config.telegram.connector_id, config.provider.model, config.provider.api_base
            );
        }
        Commands::Start => start_bot(&cli.config).await?,
        Commands::Chat => run_repl(&cli.config).await?,
    }

    Ok(())
}

fn build_router(config: &SoireeConfig) -> Result<Arc<MessageRouter>> {
    if config.provider.api_key.is_empty() {
        anyhow::bail!("provider api key is empty (set provider.api_key or its ${{ENV}} source)");
    }
    let provider = Arc::new(OpenAiProvider::new(
        config.provider.api_key.clone(),
        config.provider.api_base.clone(),
    ));
    let history = Arc::new(HistoryStore::new());
    let orchestrator = Orchestrator::new(history.clone(), provider, config.provider.model.clone());
    Ok(Arc::new(MessageRouter::new(history, orchestrator)))
}

async fn start_bot(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let router = build_router(&config)?;

    if config.telegram.token.is_empty() {
        anyhow::bail!(
            "Telegram token is empty for connector {}",
            config.telegram.connector_id
        );
    }

    tracing::info!("Starting Telegram bot: {}", config.telegram.connector_id);
    let bot = TelegramBot::new(
        config.telegram.token.clone(),
        config.telegram.connector_id.clone(),
        router,
    );
    bot.run_impl().await
}

async fn run_repl(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let router = build_router(&config)?;

    println!("soiree REPL. Type 'quit' to exit.");
    println!("---");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input == "quit" || input == "exit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match router.handle_message(ChatId(0), input).await {
            Ok(reply) => println!("{reply}"),
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    Ok(())
}
