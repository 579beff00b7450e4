// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shift-note types: Note, NoteType, Status, and Acknowledgment.
//!
//! Wire names follow the backend (`"Pendiente"`, `"informativo"`, ...).
//! Parsing from user input also accepts English aliases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::identity::{Identity, RecordId};
use crate::wire::lenient_datetime;

/// Whether a note takes part in acknowledgment auto-completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteType {
    /// Information every reviewer must confirm. Completes itself once all have.
    #[default]
    #[serde(rename = "informativo")]
    Informational,
    /// Work that needs a manual status change to close.
    #[serde(rename = "seguimiento")]
    FollowUp,
    /// A type this client does not know. Never auto-completes.
    #[serde(rename = "otro", other)]
    Other,
}

impl NoteType {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Informational => "informativo",
            NoteType::FollowUp => "seguimiento",
            NoteType::Other => "otro",
        }
    }

    /// Returns the English label used in CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            NoteType::Informational => "informational",
            NoteType::FollowUp => "follow-up",
            NoteType::Other => "other",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for NoteType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "informational" | "informativo" | "info" => Ok(NoteType::Informational),
            "follow-up" | "follow_up" | "followup" | "seguimiento" => Ok(NoteType::FollowUp),
            _ => Err(Error::InvalidNoteType(s.to_string())),
        }
    }
}

/// Lifecycle status of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Programado")]
    Scheduled,
    /// Initial state for new notes and the default for notes without one.
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En proceso")]
    InProgress,
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Scheduled,
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Cancelled,
    ];

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Scheduled => "Programado",
            Status::Pending => "Pendiente",
            Status::InProgress => "En proceso",
            Status::Completed => "Completado",
            Status::Cancelled => "Cancelado",
        }
    }

    /// Returns true for completed or cancelled notes.
    ///
    /// Finalized notes stay mutable: an administrator can reset them.
    pub fn is_finalized(&self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }

    /// Returns true if this is an active state (not finalized).
    pub fn is_active(&self) -> bool {
        !self.is_finalized()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "programado" | "scheduled" => Ok(Status::Scheduled),
            "pendiente" | "pending" => Ok(Status::Pending),
            "en proceso" | "in-progress" | "in_progress" | "in progress" => Ok(Status::InProgress),
            "completado" | "completed" | "done" => Ok(Status::Completed),
            "cancelado" | "cancelled" | "canceled" => Ok(Status::Cancelled),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A reviewer's confirmation of one note.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    #[serde(default)]
    pub checked: bool,
    /// When `checked` last changed.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    /// Who toggled it. May be an administrator acting for the reviewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_by: Option<Identity>,
    /// Fields the backend sends that this client does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Acknowledgment {
    /// Merges a toggle into this entry, keeping every other field.
    pub fn toggle(&mut self, checked: bool, by: &Identity, at: DateTime<Utc>) {
        self.checked = checked;
        self.timestamp = Some(at);
        self.acknowledged_by = Some(by.clone());
    }
}

/// Acknowledgments keyed by reviewer id.
pub type Acknowledgments = BTreeMap<RecordId, Acknowledgment>;

/// A shift-handoff record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    pub description: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub status: Status,
    pub acknowledged_by: Acknowledgments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Identity>,
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Set only by the auto-completion transition.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub finalized_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_by: Option<Identity>,
}

impl Note {
    /// Creates a pending note with no acknowledgments.
    pub fn new(id: impl Into<RecordId>, description: impl Into<String>, note_type: NoteType) -> Self {
        Note {
            id: id.into(),
            description: description.into(),
            note_type,
            status: Status::Pending,
            acknowledged_by: Acknowledgments::new(),
            created_by: None,
            created_at: None,
            finalized_at: None,
            finalized_by: None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_finalized()
    }

    /// Number of acknowledgment entries with `checked = true`.
    pub fn checked_count(&self) -> usize {
        self.acknowledged_by.values().filter(|a| a.checked).count()
    }

    /// Whether `reviewer` has confirmed this note.
    pub fn is_acknowledged_by(&self, reviewer: &RecordId) -> bool {
        self.acknowledged_by
            .get(reviewer)
            .is_some_and(|a| a.checked)
    }
}

/// A note as it arrives from the backend, before defaults are applied.
///
/// Every field except the id may be missing or null. Use
/// [`RawNote::normalize`] to obtain a [`Note`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    pub id: Option<RecordId>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_acknowledgments")]
    pub acknowledged_by: Option<Acknowledgments>,
    pub created_by: Option<Identity>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub finalized_at: Option<DateTime<Utc>>,
    pub finalized_by: Option<Identity>,
}

/// Reads `null` entries as unchecked acknowledgments.
fn lenient_acknowledgments<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Acknowledgments>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<RecordId, Option<Acknowledgment>>>::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .map(|(reviewer, ack)| (reviewer, ack.unwrap_or_default()))
            .collect()
    }))
}

/// Outcome of normalizing a [`RawNote`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub note: Note,
    /// Status string that did not parse and was replaced by the default.
    pub unknown_status: Option<String>,
    /// Type string that did not parse. The note is typed [`NoteType::Other`].
    pub unknown_type: Option<String>,
}

impl RawNote {
    /// Applies defaults so downstream code never sees absent fields.
    ///
    /// `status` defaults to pending, `description` to empty, `type` to
    /// informational and `acknowledgedBy` to an empty map. A status string
    /// that does not parse also falls back to pending and is reported in
    /// [`Normalized::unknown_status`]. Only a missing type defaults: one
    /// that does not parse becomes [`NoteType::Other`] and is reported in
    /// [`Normalized::unknown_type`].
    pub fn normalize(self) -> Result<Normalized> {
        let id = self.id.ok_or(Error::FieldRequired { field: "Note id" })?;

        let (status, unknown_status) = match self.status {
            None => (Status::default(), None),
            Some(s) => match s.parse::<Status>() {
                Ok(status) => (status, None),
                Err(_) => (Status::default(), Some(s)),
            },
        };

        let (note_type, unknown_type) = match self.note_type {
            None => (NoteType::default(), None),
            Some(t) => match t.parse::<NoteType>() {
                Ok(note_type) => (note_type, None),
                Err(_) => (NoteType::Other, Some(t)),
            },
        };

        Ok(Normalized {
            note: Note {
                id,
                description: self.description.unwrap_or_default(),
                note_type,
                status,
                acknowledged_by: self.acknowledged_by.unwrap_or_default(),
                created_by: self.created_by,
                created_at: self.created_at,
                finalized_at: self.finalized_at,
                finalized_by: self.finalized_by,
            },
            unknown_status,
            unknown_type,
        })
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub description: String,
    pub note_type: NoteType,
}

impl NoteDraft {
    pub fn new(description: impl Into<String>, note_type: NoteType) -> Self {
        NoteDraft {
            description: description.into(),
            note_type,
        }
    }

    /// Returns the trimmed description, or an error if it is blank.
    pub fn validated_description(&self) -> Result<&str> {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            return Err(Error::FieldRequired {
                field: "Note description",
            });
        }
        Ok(trimmed)
    }
}

#[cfg(test)]
#[path = "note_tests.rs"]
mod tests;
