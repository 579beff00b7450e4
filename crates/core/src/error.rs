// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for hf-core operations.

use thiserror::Error;

/// All possible errors that can occur in hf-core operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid note type: '{0}'\n  hint: valid types are: informational, follow-up")]
    InvalidNoteType(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: scheduled, pending, in-progress, completed, cancelled")]
    InvalidStatus(String),

    #[error("invalid activity status: '{0}'\n  hint: valid statuses are: pending, not-done, finished")]
    InvalidActivityStatus(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: high, medium, low")]
    InvalidPriority(String),

    #[error("invalid role: '{0}'\n  hint: valid roles are: admin, coordinator, user")]
    InvalidRole(String),

    #[error("invalid acknowledgment policy: '{0}'\n  hint: valid policies are: current-roster, roster-members")]
    InvalidPolicy(String),

    #[error("{field} is required")]
    FieldRequired { field: &'static str },

    #[error("{0}")]
    InvalidInput(String),
}

/// A specialized Result type for hf-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
