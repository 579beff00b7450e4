// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The note store: in-memory source of truth for shift notes.
//!
//! Every operation takes the acting [`Session`] explicitly. Network calls
//! go through a [`NotesApi`] and their results are applied only on success,
//! with one exception: description edits are staged locally and reverted
//! if the flush fails.
//!
//! Operations on different notes run concurrently. A second operation of
//! the same kind on the same note is rejected with [`Error::Busy`] while
//! the first is in flight. Results that arrive after their note was removed
//! are discarded.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};

use hf_core::ack::{self, AckState, CompletenessPolicy, Evaluation};
use hf_core::view::{self, AckSummary, Tab};
use hf_core::{Note, NoteDraft, RawNote, RecordId, Reviewer, Session, Status};

use crate::api::{AckRequest, CreateNote, HttpApi, NotePatch, NotesApi};
use crate::error::{Error, MutationKind, Result};

/// Key of an operation that may be in flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Op {
    Description(RecordId),
    Status(RecordId),
    Ack(RecordId, RecordId),
    Delete(RecordId),
}

impl Op {
    fn busy(&self) -> Error {
        let (id, op) = match self {
            Op::Description(id) => (id, "description edit"),
            Op::Status(id) => (id, "status change"),
            Op::Ack(id, _) => (id, "acknowledgment change"),
            Op::Delete(id) => (id, "delete"),
        };
        Error::Busy {
            target: "note",
            id: id.to_string(),
            op,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    notes: Vec<Note>,
    /// Last description the server accepted, per note.
    saved: HashMap<RecordId, String>,
    reviewers: Vec<Reviewer>,
    loads: usize,
    banner: Option<String>,
    in_flight: HashSet<Op>,
}

impl State {
    fn note_mut(&mut self, id: &RecordId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| &n.id == id)
    }

    fn contains(&self, id: &RecordId) -> bool {
        self.notes.iter().any(|n| &n.id == id)
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks an operation as in flight until dropped.
struct InFlight<'a> {
    state: &'a Mutex<State>,
    op: Op,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight.remove(&self.op);
    }
}

/// Keeps the loading flag raised until dropped.
struct Loading<'a> {
    state: &'a Mutex<State>,
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        state.loads = state.loads.saturating_sub(1);
    }
}

/// What happened to the note's status after an acknowledgment was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The note is not due to complete.
    NotTriggered,
    /// The note transitioned to completed.
    Completed,
    /// A status change for the note was already in flight.
    AlreadyInFlight,
    /// The status update failed. The acknowledgment itself was kept.
    Failed(String),
    /// The note was removed before the result arrived.
    Discarded,
}

/// Result of [`NoteStore::acknowledge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckOutcome {
    /// Acknowledgment state after the toggle, or `None` if the note vanished.
    pub state: Option<AckState>,
    pub completion: Completion,
}

/// Holds notes and the reviewer roster for one session.
pub struct NoteStore<A = HttpApi> {
    api: A,
    policy: CompletenessPolicy,
    state: Mutex<State>,
}

impl<A: NotesApi> NoteStore<A> {
    pub fn new(api: A, policy: CompletenessPolicy) -> Self {
        NoteStore {
            api,
            policy,
            state: Mutex::new(State::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn policy(&self) -> CompletenessPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }

    fn begin(&self, op: Op) -> Result<InFlight<'_>> {
        let mut state = self.lock();
        if !state.in_flight.insert(op.clone()) {
            return Err(op.busy());
        }
        Ok(InFlight {
            state: &self.state,
            op,
        })
    }

    /// Records `err` as the banner and returns it.
    fn surface<T>(&self, err: Error) -> Result<T> {
        self.lock().banner = Some(err.to_string());
        Err(err)
    }

    fn require(&self, id: &RecordId) -> Result<()> {
        if self.lock().contains(id) {
            Ok(())
        } else {
            Err(Error::NoteNotFound(id.to_string()))
        }
    }

    /// Fetches notes and the roster, replacing both on success.
    ///
    /// On failure both collections are cleared and the banner is set.
    pub async fn load(&self, session: &Session) -> Result<()> {
        self.lock().loads += 1;
        let _loading = Loading { state: &self.state };
        debug!("loading notes for {}", session.user.username);

        let fetched = tokio::try_join!(self.api.list_notes(), self.api.list_reviewers());
        let (raw, reviewers) = match fetched {
            Ok(pair) => pair,
            Err(e) => {
                {
                    let mut state = self.lock();
                    state.notes.clear();
                    state.saved.clear();
                    state.reviewers.clear();
                }
                return self.surface(Error::Load(e));
            }
        };

        let notes = normalize_all(raw);
        let mut state = self.lock();
        state.saved = notes
            .iter()
            .map(|n| (n.id.clone(), n.description.clone()))
            .collect();
        state.notes = notes;
        state.reviewers = reviewers;
        state.banner = None;
        info!(
            "loaded {} notes and {} reviewers",
            state.notes.len(),
            state.reviewers.len()
        );
        Ok(())
    }

    /// Creates a note and puts it at the front of the list.
    ///
    /// Returns `None` when the server accepted the note but did not send it
    /// back with an id; a reload will show it.
    pub async fn create(&self, session: &Session, draft: &NoteDraft) -> Result<Option<Note>> {
        let description = match draft.validated_description() {
            Ok(d) => d.to_string(),
            Err(e) => return self.surface(e.into()),
        };

        let body = CreateNote {
            description,
            note_type: draft.note_type,
            status: Status::Pending,
            created_by: session.user.clone(),
            created_at: Utc::now(),
        };
        let created = match self.api.create_note(body.clone()).await {
            Ok(created) => created,
            Err(e) => return self.surface(Error::mutation(MutationKind::CreateNote, e)),
        };

        let Some(raw) = created.filter(|r| r.id.is_some()) else {
            warn!("server did not return the created note");
            return Ok(None);
        };
        let note = fill_created(raw, body)?;

        let mut state = self.lock();
        state.saved.insert(note.id.clone(), note.description.clone());
        state.notes.insert(0, note.clone());
        info!("{} created note {}", session.user.username, note.id);
        Ok(Some(note))
    }

    /// Replaces the local description without contacting the server.
    pub fn stage_description(&self, id: &RecordId, value: impl Into<String>) -> Result<()> {
        let mut state = self.lock();
        let note = state
            .note_mut(id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        note.description = value.into();
        Ok(())
    }

    /// Sends the staged description if it differs from the saved one.
    ///
    /// Returns whether an update was sent. On failure the description is
    /// reverted to the last value the server accepted.
    pub async fn commit_description(&self, session: &Session, id: &RecordId) -> Result<bool> {
        let staged = {
            let state = self.lock();
            let note = state
                .notes
                .iter()
                .find(|n| &n.id == id)
                .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
            if state.saved.get(id) == Some(&note.description) {
                return Ok(false);
            }
            note.description.clone()
        };

        let _guard = self.begin(Op::Description(id.clone()))?;
        let result = self
            .api
            .update_note(id.clone(), NotePatch::description(staged.clone()))
            .await;

        let mut state = self.lock();
        match result {
            Ok(()) if state.contains(id) => {
                state.saved.insert(id.clone(), staged);
                info!("{} updated description of note {}", session.user.username, id);
                Ok(true)
            }
            Ok(()) => {
                debug!("discarding description result for removed note {}", id);
                Ok(true)
            }
            Err(e) => {
                if let Some(saved) = state.saved.get(id).cloned() {
                    if let Some(note) = state.note_mut(id) {
                        note.description = saved;
                    }
                }
                drop(state);
                self.surface(Error::mutation(MutationKind::UpdateDescription, e))
            }
        }
    }

    /// Whether the note has a staged description the server has not accepted.
    pub fn has_unsaved_changes(&self, id: &RecordId) -> bool {
        let state = self.lock();
        state
            .notes
            .iter()
            .find(|n| &n.id == id)
            .is_some_and(|n| state.saved.get(id) != Some(&n.description))
    }

    /// Changes a note's status. Applied locally only after the server accepts it.
    pub async fn set_status(&self, session: &Session, id: &RecordId, status: Status) -> Result<()> {
        self.require(id)?;
        let _guard = self.begin(Op::Status(id.clone()))?;

        if let Err(e) = self.api.update_note(id.clone(), NotePatch::status(status)).await {
            return self.surface(Error::mutation(MutationKind::UpdateStatus, e));
        }

        let mut state = self.lock();
        match state.note_mut(id) {
            Some(note) => {
                note.status = status;
                info!("{} set note {} to {}", session.user.username, id, status);
            }
            None => debug!("discarding status result for removed note {}", id),
        }
        Ok(())
    }

    /// Deletes a note after `confirm` approves it.
    ///
    /// No request is sent unless `confirm` returns true. A failed delete,
    /// including one the server rejects as not found, leaves the note in
    /// place.
    pub async fn delete<F>(&self, session: &Session, id: &RecordId, confirm: F) -> Result<()>
    where
        F: FnOnce(&Note) -> bool,
    {
        let note = self
            .note(id)
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
        let _guard = self.begin(Op::Delete(id.clone()))?;
        if !confirm(&note) {
            return Err(Error::Cancelled);
        }

        if let Err(e) = self.api.delete_note(id.clone()).await {
            return self.surface(Error::mutation(MutationKind::DeleteNote, e));
        }

        let mut state = self.lock();
        state.notes.retain(|n| &n.id != id);
        state.saved.remove(id);
        info!("{} deleted note {}", session.user.username, id);
        Ok(())
    }

    /// Sets one reviewer's acknowledgment of a note.
    ///
    /// The entry is merged locally only after the server accepts it. The
    /// note is then re-evaluated and, if it is an informational note that
    /// every required reviewer has now confirmed, moved to completed. A
    /// failure of that second step does not fail the acknowledgment; it is
    /// reported in [`AckOutcome::completion`].
    pub async fn acknowledge(
        &self,
        session: &Session,
        id: &RecordId,
        reviewer: &RecordId,
        checked: bool,
    ) -> Result<AckOutcome> {
        self.require(id)?;
        let _guard = self.begin(Op::Ack(id.clone(), reviewer.clone()))?;

        let body = AckRequest {
            coordinator_id: reviewer.clone(),
            checked,
            acknowledged_by: session.user.clone(),
        };
        if let Err(e) = self.api.acknowledge(id.clone(), body).await {
            return self.surface(Error::mutation(MutationKind::Acknowledge, e));
        }

        let (state, evaluation) = {
            let mut guard = self.lock();
            let State {
                notes, reviewers, ..
            } = &mut *guard;
            let Some(note) = notes.iter_mut().find(|n| &n.id == id) else {
                debug!("discarding acknowledgment for removed note {}", id);
                return Ok(AckOutcome {
                    state: None,
                    completion: Completion::Discarded,
                });
            };
            note.acknowledged_by
                .entry(reviewer.clone())
                .or_default()
                .toggle(checked, &session.user, Utc::now());
            info!(
                "{} set acknowledgment of note {} by {} to {}",
                session.user.username, id, reviewer, checked
            );
            (
                ack::state(note, reviewers, self.policy),
                ack::evaluate(note, reviewers, self.policy),
            )
        };

        let completion = match evaluation {
            Evaluation::Unchanged => Completion::NotTriggered,
            Evaluation::Complete => self.auto_complete(session, id).await,
        };
        Ok(AckOutcome {
            state: Some(state),
            completion,
        })
    }

    async fn auto_complete(&self, session: &Session, id: &RecordId) -> Completion {
        let Ok(_guard) = self.begin(Op::Status(id.clone())) else {
            return Completion::AlreadyInFlight;
        };

        if let Err(e) = self
            .api
            .update_note(id.clone(), NotePatch::status(Status::Completed))
            .await
        {
            let err = Error::mutation(MutationKind::UpdateStatus, e);
            warn!("auto-completion of note {} failed: {}", id, err);
            let message = err.to_string();
            self.lock().banner = Some(message.clone());
            return Completion::Failed(message);
        }

        let mut state = self.lock();
        match state.note_mut(id) {
            Some(note) => {
                if ack::complete(note, &session.user, Utc::now()) {
                    info!("note {} completed after full acknowledgment", id);
                    Completion::Completed
                } else {
                    Completion::NotTriggered
                }
            }
            None => {
                debug!("discarding completion for removed note {}", id);
                Completion::Discarded
            }
        }
    }

    /// All notes, newest creations first.
    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    pub fn note(&self, id: &RecordId) -> Option<Note> {
        self.lock().notes.iter().find(|n| &n.id == id).cloned()
    }

    /// Notes on one side of the active/finalized split.
    pub fn tab(&self, tab: Tab) -> Vec<Note> {
        let state = self.lock();
        view::partition(&state.notes)
            .tab(tab)
            .iter()
            .map(|n| (*n).clone())
            .collect()
    }

    pub fn summary(&self) -> AckSummary {
        view::summarize(&self.lock().notes)
    }

    pub fn reviewers(&self) -> Vec<Reviewer> {
        self.lock().reviewers.clone()
    }

    /// Replaces the roster. Later completeness checks use the new one.
    pub fn set_reviewers(&self, reviewers: Vec<Reviewer>) {
        self.lock().reviewers = reviewers;
    }

    /// Acknowledgment state of a note against the current roster.
    pub fn ack_state(&self, id: &RecordId) -> Option<AckState> {
        let state = self.lock();
        state
            .notes
            .iter()
            .find(|n| &n.id == id)
            .map(|n| ack::state(n, &state.reviewers, self.policy))
    }

    /// The last error surfaced to the user, until the next successful load.
    pub fn banner(&self) -> Option<String> {
        self.lock().banner.clone()
    }

    pub fn clear_banner(&self) {
        self.lock().banner = None;
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loads > 0
    }

    /// Whether any operation on the note is in flight.
    pub fn is_pending(&self, id: &RecordId) -> bool {
        self.lock().in_flight.iter().any(|op| match op {
            Op::Description(n) | Op::Status(n) | Op::Delete(n) | Op::Ack(n, _) => n == id,
        })
    }
}

/// Normalizes fetched notes, dropping any without an id.
fn normalize_all(raw: Vec<RawNote>) -> Vec<Note> {
    raw.into_iter()
        .filter_map(|r| match r.normalize() {
            Ok(n) => {
                if let Some(status) = n.unknown_status {
                    warn!(
                        "note {} has unknown status '{}', treating as pending",
                        n.note.id, status
                    );
                }
                if let Some(note_type) = n.unknown_type {
                    warn!(
                        "note {} has unknown type '{}', it will not auto-complete",
                        n.note.id, note_type
                    );
                }
                Some(n.note)
            }
            Err(e) => {
                warn!("skipping note: {}", e);
                None
            }
        })
        .collect()
}

/// Fills fields the server left out of a created note from the request.
fn fill_created(raw: RawNote, sent: CreateNote) -> Result<Note> {
    let filled = RawNote {
        description: raw.description.or(Some(sent.description)),
        note_type: raw
            .note_type
            .or_else(|| Some(sent.note_type.as_str().to_string())),
        status: raw.status.or_else(|| Some(sent.status.as_str().to_string())),
        created_by: raw.created_by.or(Some(sent.created_by)),
        created_at: raw.created_at.or(Some(sent.created_at)),
        ..raw
    };
    Ok(filled.normalize()?.note)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
