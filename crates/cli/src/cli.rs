// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const COMMANDS_HELP: &str = "\
Shift Notes:
  notes       List, create, edit and acknowledge shift notes
  reviewers   Show the reviewer roster

Technical Planning:
  activities  Track planned technical activities

Setup:
  config      Manage configuration
  completion  Generate shell completions";

const QUICKSTART_HELP: &str = "\
Get started:
  handoff config init --url https://ops.example.com/api
  handoff notes list
  handoff notes new \"Pump 2 pressure drops overnight\"
  handoff notes ack 14 <reviewer-id>";

#[derive(Parser)]
#[command(name = "handoff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shift handoff notes with reviewer acknowledgment")]
#[command(
    long_about = "Shift handoff notes with reviewer acknowledgment.\n\n\
    Informational notes complete themselves once every reviewer on the roster has acknowledged them."
)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Work with shift notes
    #[command(subcommand)]
    Notes(NotesCommand),

    /// Show the reviewer roster
    Reviewers {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Work with technical activities
    #[command(subcommand)]
    Activities(ActivitiesCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum NotesCommand {
    /// List notes (active by default)
    #[command(after_help = "Examples:\n  \
        handoff notes list                Active notes with the acknowledgment summary\n  \
        handoff notes list --finalized    Completed and cancelled notes\n  \
        handoff notes list -o json        Machine-readable output")]
    List {
        /// Show completed and cancelled notes instead
        #[arg(long)]
        finalized: bool,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show a note with its acknowledgments
    Show {
        id: String,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Create a note
    #[command(after_help = "Examples:\n  \
        handoff notes new \"Generator B offline\"                 Informational note\n  \
        handoff notes new \"Order spare seals\" -t follow-up      Follow-up note")]
    New {
        /// Note text
        #[arg(value_parser = non_empty_string)]
        description: String,

        /// Note type: informational or follow-up
        #[arg(long = "type", short = 't', default_value = "informational")]
        note_type: String,
    },

    /// Replace a note's description
    Edit { id: String, description: String },

    /// Change a note's status
    #[command(after_help = "Statuses: scheduled, pending, in-progress, completed, cancelled")]
    Status { id: String, status: String },

    /// Move a finalized note back to pending
    Reopen { id: String },

    /// Acknowledge a note on behalf of a reviewer
    Ack {
        id: String,

        /// Reviewer id from 'handoff reviewers'
        reviewer: String,

        /// Remove the acknowledgment instead
        #[arg(long)]
        uncheck: bool,
    },

    /// Delete a note
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Fields for a new activity.
#[derive(Args)]
pub struct NewActivityArgs {
    #[arg(value_parser = non_empty_string)]
    pub description: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Subcommand)]
pub enum ActivitiesCommand {
    /// List activities with their counts
    List {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Create an activity
    New(NewActivityArgs),

    /// Change an activity's status
    #[command(after_help = "Statuses: pending, not-done, finished")]
    Status { id: String, status: String },

    /// Delete an activity
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a new config file
    Init {
        /// Base URL of the handoff service
        #[arg(long)]
        url: String,

        /// Username to act as (default: git user.name or $USER)
        #[arg(long)]
        username: Option<String>,

        /// Role: admin, coordinator or user
        #[arg(long, default_value = "user")]
        role: String,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config with the token masked
    Show,
}
