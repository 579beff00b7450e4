// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use thiserror::Error;

use crate::api::ApiError;

/// A mutating operation against the backend, used to phrase failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreateNote,
    UpdateDescription,
    UpdateStatus,
    Acknowledge,
    DeleteNote,
    CreateActivity,
    UpdateActivity,
    DeleteActivity,
}

impl MutationKind {
    /// User-facing message shown when the operation fails.
    pub fn message(&self) -> &'static str {
        match self {
            MutationKind::CreateNote => "could not create the note",
            MutationKind::UpdateDescription => "could not update the description",
            MutationKind::UpdateStatus => "could not update the status",
            MutationKind::Acknowledge => "could not update the acknowledgment",
            MutationKind::DeleteNote => "could not delete the note",
            MutationKind::CreateActivity => "could not create the activity",
            MutationKind::UpdateActivity => "could not update the activity status",
            MutationKind::DeleteActivity => "could not delete the activity",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// All possible errors that can occur in the hfrs library.
///
/// None of them end the session: the caller may retry the triggering action.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad local input. Never reaches the network.
    #[error("{0}")]
    Validation(#[from] hf_core::Error),

    #[error("could not load data: {0}")]
    Load(#[source] ApiError),

    #[error("{op}: {source}")]
    Mutation {
        op: MutationKind,
        #[source]
        source: ApiError,
    },

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("activity not found: {0}")]
    ActivityNotFound(String),

    #[error("reviewer not found: {0}\n  hint: run 'handoff reviewers' to list the roster")]
    ReviewerNotFound(String),

    #[error("{target} {id} already has a {op} in progress")]
    Busy {
        target: &'static str,
        id: String,
        op: &'static str,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("permission denied: {action} requires the {role} role")]
    PermissionDenied {
        action: &'static str,
        role: &'static str,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wraps a failed backend call for `op`.
    pub fn mutation(op: MutationKind, source: ApiError) -> Self {
        Error::Mutation { op, source }
    }
}

/// A specialized Result type for hfrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
