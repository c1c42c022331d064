//! CLI module for murmur.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Dispatch to one-shot send, health check or the stdin loop
//!
//! # Usage
//!
//! ```ignore
//! use murmur::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! let exit_code = runtime.block_on(run_cli_command(command))?;
//! std::process::exit(exit_code);
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CliOptions, USAGE};
pub use version::{handle_version_command, VERSION};

use std::io::IsTerminal;

use color_eyre::Result;
use tokio::io::BufReader;

use crate::adapters::TerminalView;
use crate::client::ChatClient;
use crate::driver::StreamOutcome;
use crate::input::run_repl;
use crate::startup::ClientConfig;

const PROMPT: &str = "> ";

/// Run a parsed CLI command and return the process exit code.
///
/// # Note
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub async fn run_cli_command(command: CliCommand) -> Result<i32> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            print!("{}", USAGE);
            Ok(0)
        }
        CliCommand::Health(options) => {
            let client = ChatClient::from_config(options.apply(ClientConfig::from_env()))?;
            match client.health().await {
                Ok(health) => {
                    println!(
                        "{} {} ({})",
                        health.service.as_deref().unwrap_or("backend"),
                        health.version.as_deref().unwrap_or("unknown version"),
                        health.status
                    );
                    Ok(if health.is_healthy() { 0 } else { 1 })
                }
                Err(e) => {
                    eprintln!("Health check failed: {}", e);
                    Ok(1)
                }
            }
        }
        CliCommand::Send { options, message } => {
            let client = ChatClient::from_config(options.apply(ClientConfig::from_env()))?;
            let mut view = TerminalView::stdout();
            let report = client.send(&client.request_for(message), &mut view).await;
            if report.outcome == StreamOutcome::Truncated {
                eprintln!("(reply ended before the server finished)");
            }
            Ok(if report.is_errored() { 1 } else { 0 })
        }
        CliCommand::Repl(options) => {
            let client = ChatClient::from_config(options.apply(ClientConfig::from_env()))?;
            let prompt = std::io::stdin().is_terminal().then_some(PROMPT);
            let input = BufReader::new(tokio::io::stdin());
            run_repl(&client, input, prompt, TerminalView::stdout).await?;
            Ok(0)
        }
    }
}
