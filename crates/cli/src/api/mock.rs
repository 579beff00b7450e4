// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory backend for store and command tests.
//!
//! Every call is recorded. Individual operations can be made to fail, or
//! held at a gate until the test releases them, which is how tests
//! interleave concurrent operations deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::Notify;

use hf_core::{
    Activity, ActivityStatus, ActivitySummary, NewActivity, RawNote, RecordId, Reviewer,
};

use super::{
    extract_list, AckRequest, ActivitiesApi, ApiError, ApiFuture, ApiResult, CreateNote,
    NotePatch, NotesApi,
};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ListNotes,
    ListReviewers,
    CreateNote(CreateNote),
    UpdateNote(RecordId, NotePatch),
    Acknowledge(RecordId, AckRequest),
    DeleteNote(RecordId),
    ListActivities,
    ActivitySummary,
    CreateActivity(NewActivity),
    UpdateActivity(RecordId, ActivityStatus),
    DeleteActivity(RecordId),
}

impl Call {
    /// Operation name used for failure and gate lookups.
    pub(crate) fn op(&self) -> &'static str {
        match self {
            Call::ListNotes => "list_notes",
            Call::ListReviewers => "list_reviewers",
            Call::CreateNote(_) => "create_note",
            Call::UpdateNote(..) => "update_note",
            Call::Acknowledge(..) => "acknowledge",
            Call::DeleteNote(_) => "delete_note",
            Call::ListActivities => "list_activities",
            Call::ActivitySummary => "activity_summary",
            Call::CreateActivity(_) => "create_activity",
            Call::UpdateActivity(..) => "update_activity",
            Call::DeleteActivity(_) => "delete_activity",
        }
    }
}

#[derive(Default)]
struct MockState {
    notes: Option<Value>,
    reviewers: Option<Value>,
    created: Option<Value>,
    activities: Vec<Activity>,
    summary: Option<ActivitySummary>,
    next_id: u32,
    calls: Vec<Call>,
    failures: HashMap<&'static str, ApiError>,
    gates: HashMap<&'static str, Arc<Notify>>,
}

#[derive(Default)]
pub(crate) struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Body returned by `list_notes`, in any supported envelope.
    pub(crate) fn with_notes(self, body: Value) -> Self {
        self.lock().notes = Some(body);
        self
    }

    /// Body returned by `list_reviewers`, in any supported envelope.
    pub(crate) fn with_reviewers(self, body: Value) -> Self {
        self.lock().reviewers = Some(body);
        self
    }

    /// Body returned by `create_note`. Without one, the mock echoes a
    /// record with a fresh id.
    pub(crate) fn with_created(self, body: Value) -> Self {
        self.lock().created = Some(body);
        self
    }

    pub(crate) fn with_activities(self, activities: Vec<Activity>) -> Self {
        self.lock().activities = activities;
        self
    }

    pub(crate) fn with_summary(self, summary: ActivitySummary) -> Self {
        self.lock().summary = Some(summary);
        self
    }

    /// Makes every subsequent `op` call fail with `err`.
    pub(crate) fn fail(&self, op: &'static str, err: ApiError) {
        self.lock().failures.insert(op, err);
    }

    pub(crate) fn recover(&self, op: &'static str) {
        self.lock().failures.remove(op);
    }

    /// Holds every `op` call until the returned handle is notified.
    pub(crate) fn gate(&self, op: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().gates.insert(op, Arc::clone(&gate));
        gate
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls to `op`.
    pub(crate) fn count(&self, op: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `call`, waits on its gate if one is set, then either fails
    /// with the configured error or runs `respond`.
    fn handle<'a, T, F>(&'a self, call: Call, respond: F) -> ApiFuture<'a, T>
    where
        T: Send + 'a,
        F: FnOnce(&mut MockState) -> ApiResult<T> + Send + 'a,
    {
        let op = call.op();
        let gate = {
            let mut state = self.lock();
            state.calls.push(call);
            state.gates.get(op).cloned()
        };
        Box::pin(async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            let mut state = self.lock();
            if let Some(err) = state.failures.get(op) {
                return Err(err.clone());
            }
            respond(&mut state)
        })
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: Some("not found".to_string()),
    }
}

impl NotesApi for MockApi {
    fn list_notes(&self) -> ApiFuture<'_, Vec<RawNote>> {
        self.handle(Call::ListNotes, |state| {
            extract_list(state.notes.clone(), &["notes", "data"])
        })
    }

    fn list_reviewers(&self) -> ApiFuture<'_, Vec<Reviewer>> {
        self.handle(Call::ListReviewers, |state| {
            extract_list(state.reviewers.clone(), &["data"])
        })
    }

    fn create_note(&self, body: CreateNote) -> ApiFuture<'_, Option<RawNote>> {
        self.handle(Call::CreateNote(body), |state| {
            if let Some(created) = state.created.clone() {
                return super::extract_record(Some(created));
            }
            state.next_id += 1;
            Ok(Some(RawNote {
                id: Some(RecordId::from(format!("n{}", state.next_id))),
                ..RawNote::default()
            }))
        })
    }

    fn update_note(&self, id: RecordId, patch: NotePatch) -> ApiFuture<'_, ()> {
        self.handle(Call::UpdateNote(id, patch), |_| Ok(()))
    }

    fn acknowledge(&self, id: RecordId, body: AckRequest) -> ApiFuture<'_, ()> {
        self.handle(Call::Acknowledge(id, body), |_| Ok(()))
    }

    fn delete_note(&self, id: RecordId) -> ApiFuture<'_, ()> {
        self.handle(Call::DeleteNote(id), |_| Ok(()))
    }
}

impl ActivitiesApi for MockApi {
    fn list_activities(&self) -> ApiFuture<'_, Vec<Activity>> {
        self.handle(Call::ListActivities, |state| Ok(state.activities.clone()))
    }

    fn activity_summary(&self) -> ApiFuture<'_, Option<ActivitySummary>> {
        self.handle(Call::ActivitySummary, |state| Ok(state.summary))
    }

    fn create_activity(&self, body: NewActivity) -> ApiFuture<'_, ()> {
        self.handle(Call::CreateActivity(body.clone()), move |state| {
            state.next_id += 1;
            state.activities.push(Activity {
                id: RecordId::from(format!("a{}", state.next_id)),
                description: body.description,
                start_date: body.start_date,
                end_date: body.end_date,
                notes: body.notes,
                status: body.status,
                priority: Default::default(),
                created_by: None,
            });
            Ok(())
        })
    }

    fn update_activity(&self, id: RecordId, status: ActivityStatus) -> ApiFuture<'_, ()> {
        self.handle(Call::UpdateActivity(id.clone(), status), move |state| {
            let activity = state
                .activities
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(not_found)?;
            activity.status = status;
            Ok(())
        })
    }

    fn delete_activity(&self, id: RecordId) -> ApiFuture<'_, ()> {
        self.handle(Call::DeleteActivity(id.clone()), move |state| {
            let before = state.activities.len();
            state.activities.retain(|a| a.id != id);
            if state.activities.len() == before {
                return Err(not_found());
            }
            Ok(())
        })
    }
}
