use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_chat_core::{Config, ConversationState, Orchestrator, ServiceId};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-chat", version, about = "Ask about the weather in plain Indonesian")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a service.
    Configure {
        /// Service short name: "gemini" or "openweather".
        service: String,
    },

    /// Start an interactive chat session.
    Chat,

    /// Ask a single question and exit.
    Ask {
        /// The question, e.g. "cuaca besok di Bandung".
        utterance: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service } => configure(&service),
            Command::Chat => chat().await,
            Command::Ask { utterance } => ask(&utterance).await,
        }
    }
}

fn configure(service: &str) -> anyhow::Result<()> {
    let id = ServiceId::try_from(service)?;
    let mut config = Config::load()?;
    if config.is_service_configured(id) {
        println!("A {id} key is already stored; it will be replaced.");
    }

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.upsert_service_api_key(id, api_key.trim().to_string());
    config.save()?;

    println!(
        "Saved {id} credentials to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

fn orchestrator() -> anyhow::Result<Orchestrator> {
    let config = Config::load()?.with_env_overrides();
    Orchestrator::from_config(&config)
}

async fn chat() -> anyhow::Result<()> {
    let orchestrator = orchestrator()?;
    let mut state = ConversationState::new();

    for turn in state.transcript() {
        render::print_reply(&turn.reply);
    }

    loop {
        let input = Text::new(">")
            .with_placeholder("Tanyakan cuaca di kota mana saja...")
            .prompt();

        let utterance = match input {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        };

        let utterance = utterance.trim();
        if utterance.is_empty() || utterance.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = orchestrator.handle_turn(&mut state, utterance).await;
        render::print_reply(&reply);
    }

    debug!(turns = state.transcript().len(), "chat session ended");
    Ok(())
}

async fn ask(utterance: &str) -> anyhow::Result<()> {
    let orchestrator = orchestrator()?;
    let mut state = ConversationState::new();

    let reply = orchestrator.handle_turn(&mut state, utterance).await;
    render::print_reply(&reply);
    Ok(())
}
