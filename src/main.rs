//! Tic-tac-toe trainer - unified CLI
//!
//! Interactive TUI by default, or a one-shot training trigger.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_trainer::{
    ClientConfig, Event, HttpGateway, SessionController, SessionState, TrainingStatus,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => tictactoe_trainer::tui::run_tui(config).await,
        Command::Train => run_train(config).await,
    }
}

/// Layers CLI flags over file and environment configuration.
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    ClientConfig::resolve(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &cli.overrides(),
    )
    .context("Failed to load configuration")
}

/// Requests training once and waits for the answer.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn run_train(config: ClientConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let gateway = HttpGateway::from_config(&config)?;
    let mut controller = SessionController::new(
        gateway,
        SessionState::with_policy(*config.on_simulate_failure()),
        config.request_timeout(),
    );

    controller.dispatch(Event::TrainingRequested);
    controller.settle().await;

    let state = controller.state();
    info!(status = %state.training(), "Training request finished");
    println!("Status: {}", state.training());

    match state.training() {
        TrainingStatus::Completed => Ok(()),
        _ => anyhow::bail!(
            "{}",
            state.last_error().unwrap_or("training did not complete")
        ),
    }
}
