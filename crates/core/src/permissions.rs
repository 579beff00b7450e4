// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Role-based affordances for front ends.
//!
//! These decide which controls a front end offers. They are not an
//! authorization layer: the backend enforces access on every request.

use crate::identity::Session;
use crate::note::{Note, NoteType};

/// Any authenticated session may create notes.
pub fn can_create(session: &Session) -> bool {
    !session.user.username.trim().is_empty()
}

/// Descriptions are editable by administrators on notes that are not finalized.
pub fn can_edit_description(session: &Session, note: &Note) -> bool {
    session.is_admin() && !note.is_finalized()
}

pub fn can_change_status(session: &Session) -> bool {
    session.is_admin() || session.is_coordinator()
}

/// Only administrators may move a finalized note back to pending.
pub fn can_reopen(session: &Session, note: &Note) -> bool {
    session.is_admin() && note.is_finalized()
}

/// Acknowledgment checkboxes exist only on active informational notes.
///
/// Any session may toggle any reviewer's box; administrators routinely
/// confirm on behalf of coordinators.
pub fn can_acknowledge(_session: &Session, note: &Note) -> bool {
    note.note_type == NoteType::Informational && !note.is_finalized()
}

pub fn can_delete(session: &Session) -> bool {
    session.is_admin()
}

#[cfg(test)]
#[path = "permissions_tests.rs"]
mod tests;
