// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hf-core: Shared domain library for the shift-handoff tool.
//!
//! This crate provides the note and activity data types, the acknowledgment
//! state machine, and the derived views used by the `handoff` CLI. It does
//! no I/O.

pub mod ack;
pub mod activity;
pub mod error;
pub mod identity;
pub mod note;
pub mod permissions;
pub mod view;
pub mod wire;

pub use ack::{AckState, CompletenessPolicy, Evaluation};
pub use activity::{
    Activity, ActivityDraft, ActivityStatus, ActivitySummary, NewActivity, Priority,
};
pub use error::{Error, Result};
pub use identity::{Identity, RecordId, Reviewer, Role, Session};
pub use note::{Acknowledgment, Acknowledgments, Note, NoteDraft, NoteType, RawNote, Status};
pub use view::{AckSummary, Partition, Tab};
