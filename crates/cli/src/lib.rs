// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hfrs - shift handoff notes with reviewer acknowledgment.
//!
//! This crate provides the client behind the `handoff` CLI. Notes and
//! technical activities live on a remote HTTP backend; this side keeps an
//! in-memory view of them and decides when an informational note is fully
//! acknowledged and should be completed.
//!
//! # Main Components
//!
//! - [`NoteStore`] - Notes and the reviewer roster, with acknowledgment-driven completion
//! - [`ActivityBoard`] - Technical activities and their counts
//! - [`api`] - The backend seam ([`NotesApi`](api::NotesApi), [`ActivitiesApi`](api::ActivitiesApi)) and its HTTP client
//! - [`Config`] - Backend location, acting user and acknowledgment policy
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use hfrs::{config::load_effective, api::HttpApi, NoteStore};
//!
//! let config = load_effective(None)?;
//! let store = NoteStore::new(HttpApi::new(&config.api)?, config.acknowledgment.policy);
//! store.load(&config.session()).await?;
//! println!("{:?}", store.summary());
//! ```

mod cli;
mod commands;
mod display;

pub mod activities;
pub mod api;
pub mod config;
pub mod env;
pub mod error;
pub mod store;

pub use activities::ActivityBoard;
pub use cli::{ActivitiesCommand, Cli, Command, ConfigCommand, NotesCommand, OutputFormat};
pub use config::Config;
pub use error::{Error, Result};
pub use store::{AckOutcome, Completion, NoteStore};

use clap::CommandFactory;
use clap_complete::generate;

use commands::Context;

/// Log filter for a run: `HANDOFF_LOG` wins, then `--verbose`.
pub fn log_directive(verbose: bool) -> String {
    match env::log_filter() {
        Some(filter) => filter,
        None if verbose => "debug".to_string(),
        None => "warn".to_string(),
    }
}

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process execution.
pub async fn run(cli: Cli) -> Result<()> {
    let explicit = cli.config.as_deref();
    match cli.command {
        Command::Config(cmd) => commands::config::run(explicit, cmd),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "handoff", &mut std::io::stdout());
            Ok(())
        }
        Command::Notes(cmd) => {
            let ctx = Context::load(explicit)?;
            commands::notes::run(&ctx, cmd).await
        }
        Command::Reviewers { output } => {
            let ctx = Context::load(explicit)?;
            commands::reviewers::run(&ctx, output).await
        }
        Command::Activities(cmd) => {
            let ctx = Context::load(explicit)?;
            commands::activities::run(&ctx, cmd).await
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
