// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Acknowledgment tracking and auto-completion.
//!
//! A note moves from unacknowledged through partially acknowledged to fully
//! acknowledged as reviewers confirm it. A fully acknowledged informational
//! note that is not yet finalized completes itself exactly once.
//!
//! The reviewer roster is always passed in, never read from shared state.
//! Completeness is measured against the roster as it is *now*, not as it
//! was when the note was created; [`CompletenessPolicy`] selects how
//! entries for reviewers no longer on the roster are counted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::identity::{Identity, Reviewer};
use crate::note::{Note, NoteType, Status};

/// How acknowledgments are matched against the current roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletenessPolicy {
    /// Checked entries are counted regardless of who they belong to, and the
    /// count must equal the roster size. Removing a reviewer after partial
    /// acknowledgment can make a note complete without them.
    #[default]
    CurrentRoster,
    /// Every reviewer currently on the roster must have a checked entry.
    /// Entries for reviewers no longer on the roster are ignored.
    RosterMembers,
}

impl CompletenessPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletenessPolicy::CurrentRoster => "current-roster",
            CompletenessPolicy::RosterMembers => "roster-members",
        }
    }
}

impl fmt::Display for CompletenessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CompletenessPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "current-roster" | "current_roster" => Ok(CompletenessPolicy::CurrentRoster),
            "roster-members" | "roster_members" => Ok(CompletenessPolicy::RosterMembers),
            _ => Err(Error::InvalidPolicy(s.to_string())),
        }
    }
}

/// Acknowledgment progress of a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckState {
    /// No reviewer has confirmed.
    Unacknowledged,
    /// Some, but not all, required confirmations are in.
    Partial { checked: usize, required: usize },
    /// Every required confirmation is in.
    Full,
}

impl AckState {
    pub fn is_full(&self) -> bool {
        matches!(self, AckState::Full)
    }
}

/// Number of confirmations that count toward completeness under `policy`.
fn counted(note: &Note, roster: &[Reviewer], policy: CompletenessPolicy) -> usize {
    match policy {
        CompletenessPolicy::CurrentRoster => note.checked_count(),
        CompletenessPolicy::RosterMembers => roster
            .iter()
            .filter(|r| note.is_acknowledged_by(&r.id))
            .count(),
    }
}

/// Computes where `note` sits in the acknowledgment lifecycle.
///
/// An empty roster never yields [`AckState::Full`].
pub fn state(note: &Note, roster: &[Reviewer], policy: CompletenessPolicy) -> AckState {
    let checked = counted(note, roster, policy);
    let required = roster.len();

    if required > 0 && checked == required {
        AckState::Full
    } else if checked == 0 {
        AckState::Unacknowledged
    } else {
        AckState::Partial { checked, required }
    }
}

/// True when every required confirmation is in.
pub fn is_fully_acknowledged(note: &Note, roster: &[Reviewer], policy: CompletenessPolicy) -> bool {
    state(note, roster, policy).is_full()
}

/// Result of re-evaluating a note after one of its acknowledgments changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Nothing to do.
    Unchanged,
    /// The note must transition to [`Status::Completed`].
    Complete,
}

/// Decides whether `note` should auto-complete.
///
/// Only informational, non-finalized, fully acknowledged notes complete.
/// Evaluating an already completed note is always [`Evaluation::Unchanged`].
pub fn evaluate(note: &Note, roster: &[Reviewer], policy: CompletenessPolicy) -> Evaluation {
    if note.note_type != NoteType::Informational || note.is_finalized() {
        return Evaluation::Unchanged;
    }
    if is_fully_acknowledged(note, roster, policy) {
        Evaluation::Complete
    } else {
        Evaluation::Unchanged
    }
}

/// Applies the auto-completion transition.
///
/// Returns false without touching the note if it is already finalized, so
/// `finalized_at` is stamped at most once.
pub fn complete(note: &mut Note, by: &Identity, at: DateTime<Utc>) -> bool {
    if note.is_finalized() {
        return false;
    }
    note.status = Status::Completed;
    note.finalized_at = Some(at);
    note.finalized_by = Some(by.clone());
    true
}

#[cfg(test)]
#[path = "ack_tests.rs"]
mod tests;
