// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend API abstraction.
//!
//! Provides trait-based access to the handoff REST service so that:
//! - [`HttpApi`] talks to the real backend
//! - tests substitute an in-memory implementation
//!
//! Methods take `&self` so several requests can be in flight at once.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpApi;

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use hf_core::{
    Activity, ActivityStatus, ActivitySummary, Identity, NewActivity, NoteType, RawNote, RecordId,
    Reviewer, Status,
};

/// Error type for backend calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}{}", message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Boxed future returned by API trait methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// Body of a note creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub description: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub status: Status,
    pub created_by: Identity,
    pub created_at: DateTime<Utc>,
}

/// Partial update of a note. Absent fields are left alone by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl NotePatch {
    pub fn description(value: impl Into<String>) -> Self {
        NotePatch {
            description: Some(value.into()),
            ..NotePatch::default()
        }
    }

    pub fn status(status: Status) -> Self {
        NotePatch {
            status: Some(status),
            ..NotePatch::default()
        }
    }
}

/// Body of an acknowledgment toggle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AckRequest {
    pub coordinator_id: RecordId,
    pub checked: bool,
    /// The acting user, who may differ from the reviewer.
    pub acknowledged_by: Identity,
}

/// Shift-note endpoints.
pub trait NotesApi: Send + Sync {
    /// Fetch every note.
    fn list_notes(&self) -> ApiFuture<'_, Vec<RawNote>>;

    /// Fetch the reviewer roster.
    fn list_reviewers(&self) -> ApiFuture<'_, Vec<Reviewer>>;

    /// Create a note. Returns the server's record when it sends one back.
    fn create_note(&self, body: CreateNote) -> ApiFuture<'_, Option<RawNote>>;

    fn update_note(&self, id: RecordId, patch: NotePatch) -> ApiFuture<'_, ()>;

    fn acknowledge(&self, id: RecordId, body: AckRequest) -> ApiFuture<'_, ()>;

    fn delete_note(&self, id: RecordId) -> ApiFuture<'_, ()>;
}

/// Technical-activity endpoints.
pub trait ActivitiesApi: Send + Sync {
    fn list_activities(&self) -> ApiFuture<'_, Vec<Activity>>;

    /// Fetch the server-side counts. `None` when the server sends nothing.
    fn activity_summary(&self) -> ApiFuture<'_, Option<ActivitySummary>>;

    fn create_activity(&self, body: NewActivity) -> ApiFuture<'_, ()>;

    fn update_activity(&self, id: RecordId, status: ActivityStatus) -> ApiFuture<'_, ()>;

    fn delete_activity(&self, id: RecordId) -> ApiFuture<'_, ()>;
}

/// Unwraps a list that may be bare or nested under one of `keys`.
///
/// The first key holding an array wins. Anything that is not an array after
/// unwrapping is treated as an empty list.
///
/// Elements that fail to decode are skipped with a warning.
pub(crate) fn extract_list<T: DeserializeOwned>(
    body: Option<Value>,
    keys: &[&str],
) -> ApiResult<Vec<T>> {
    let Some(body) = body else {
        return Ok(Vec::new());
    };

    let list = match body {
        Value::Array(_) => body,
        Value::Object(mut map) => keys
            .iter()
            .find_map(|k| map.remove(*k).filter(Value::is_array))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    };

    let Value::Array(items) = list else {
        tracing::warn!("response did not contain a list, treating as empty");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("skipping malformed record at index {}: {}", i, e);
                None
            }
        })
        .collect())
}

/// Unwraps a single record that may be bare or nested under `data`.
pub(crate) fn extract_record<T: DeserializeOwned>(body: Option<Value>) -> ApiResult<Option<T>> {
    let record = match body {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(mut map)) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        Some(other) => other,
    };
    serde_json::from_value(record)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
