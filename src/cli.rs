//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_trainer::{ConfigOverrides, FailurePolicy};

/// Train a remote tic-tac-toe model and play against it.
#[derive(Debug, Parser)]
#[command(name = "tictactoe_trainer", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Service base URL (overrides config and environment).
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Request timeout in seconds (overrides config and environment).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// What to do with an unconfirmed mark when a move fails: `rollback` or `keep`.
    #[arg(long, global = true)]
    pub on_simulate_failure: Option<FailurePolicy>,

    /// What to run; defaults to the TUI.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Flags that override file and environment configuration.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            server_url: self.server_url.clone(),
            timeout_secs: self.timeout_secs,
            on_simulate_failure: self.on_simulate_failure,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play interactively in the terminal.
    Tui,
    /// Start training once and report the result.
    Train,
}
