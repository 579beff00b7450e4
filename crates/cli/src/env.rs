// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Reads a variable, treating empty values as unset.
fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `HANDOFF_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    non_empty(vars::HANDOFF_CONFIG).map(PathBuf::from)
}

/// Returns the value of `HANDOFF_API_URL` if set.
pub fn api_url() -> Option<String> {
    non_empty(vars::HANDOFF_API_URL)
}

/// Returns the value of `HANDOFF_TOKEN` if set.
pub fn token() -> Option<String> {
    non_empty(vars::HANDOFF_TOKEN)
}

/// Returns the value of `HANDOFF_LOG` if set.
pub fn log_filter() -> Option<String> {
    non_empty(vars::HANDOFF_LOG)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
