// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod activities;
pub mod config;
pub mod notes;
pub mod reviewers;

use std::io::IsTerminal;
use std::path::Path;

use hf_core::{RecordId, Session};

use crate::activities::ActivityBoard;
use crate::api::HttpApi;
use crate::config::{load_effective, Config};
use crate::error::Result;
use crate::store::NoteStore;

/// Effective config and the session it describes.
pub struct Context {
    pub config: Config,
    pub session: Session,
}

impl Context {
    /// Loads and validates the config, applying environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = load_effective(explicit)?;
        let session = config.session();
        Ok(Context { config, session })
    }

    pub fn note_store(&self) -> Result<NoteStore> {
        let api = HttpApi::new(&self.config.api)?;
        Ok(NoteStore::new(api, self.config.acknowledgment.policy))
    }

    pub fn activity_board(&self) -> Result<ActivityBoard> {
        Ok(ActivityBoard::new(HttpApi::new(&self.config.api)?))
    }
}

/// Parses a user-supplied id, trimming surrounding whitespace.
pub(crate) fn record_id(raw: &str) -> RecordId {
    RecordId::from(raw.trim())
}

/// Asks a yes/no question on the terminal, defaulting to no.
///
/// Returns false without asking when stdin is not a terminal, so scripts
/// must pass `--yes` explicitly. A failed prompt also counts as no.
pub(crate) fn confirm(prompt: &str) -> bool {
    if !std::io::stdin().is_terminal() {
        return false;
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
