// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementation of the backend API using reqwest.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;
use tracing::debug;

use hf_core::{
    Activity, ActivityStatus, ActivitySummary, NewActivity, RawNote, RecordId, Reviewer,
};

use super::{
    extract_list, extract_record, AckRequest, ActivitiesApi, ApiError, ApiFuture, ApiResult,
    CreateNote, NotePatch, NotesApi,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

const NOTES_PATH: &str = "shiftHandOff";
const REVIEWERS_PATH: [&str; 2] = ["User", "coordinators"];
const ACTIVITIES_PATH: &str = "technicalActivities";

/// Client for the handoff REST service.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpApi {
    /// Builds a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            Error::Config(format!("invalid api.base_url '{}': {}", config.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "invalid api.base_url '{}': not a base URL",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("handoff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {}", e)))?;

        Ok(HttpApi {
            client,
            base,
            token: config.token.clone(),
        })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and returns the parsed body, if any.
    async fn send(builder: RequestBuilder) -> ApiResult<Option<Value>> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
            debug!(status = status.as_u16(), ?message, "api error response");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_unit(builder: RequestBuilder) -> ApiResult<()> {
        Self::send(builder).await.map(|_| ())
    }
}

impl NotesApi for HttpApi {
    fn list_notes(&self) -> ApiFuture<'_, Vec<RawNote>> {
        let req = self.request(Method::GET, &[NOTES_PATH]);
        Box::pin(async move { extract_list(Self::send(req).await?, &["notes", "data"]) })
    }

    fn list_reviewers(&self) -> ApiFuture<'_, Vec<Reviewer>> {
        let req = self.request(Method::GET, &REVIEWERS_PATH);
        Box::pin(async move { extract_list(Self::send(req).await?, &["data"]) })
    }

    fn create_note(&self, body: CreateNote) -> ApiFuture<'_, Option<RawNote>> {
        let req = self.request(Method::POST, &[NOTES_PATH]).json(&body);
        Box::pin(async move { extract_record(Self::send(req).await?) })
    }

    fn update_note(&self, id: RecordId, patch: NotePatch) -> ApiFuture<'_, ()> {
        let req = self.request(Method::PUT, &[NOTES_PATH, id.as_str()]).json(&patch);
        Box::pin(Self::send_unit(req))
    }

    fn acknowledge(&self, id: RecordId, body: AckRequest) -> ApiFuture<'_, ()> {
        let req = self
            .request(Method::PUT, &[NOTES_PATH, id.as_str(), "acknowledge"])
            .json(&body);
        Box::pin(Self::send_unit(req))
    }

    fn delete_note(&self, id: RecordId) -> ApiFuture<'_, ()> {
        let req = self.request(Method::DELETE, &[NOTES_PATH, id.as_str()]);
        Box::pin(Self::send_unit(req))
    }
}

impl ActivitiesApi for HttpApi {
    fn list_activities(&self) -> ApiFuture<'_, Vec<Activity>> {
        let req = self.request(Method::GET, &[ACTIVITIES_PATH]);
        Box::pin(async move { extract_list(Self::send(req).await?, &["activities", "data"]) })
    }

    fn activity_summary(&self) -> ApiFuture<'_, Option<ActivitySummary>> {
        let req = self.request(Method::GET, &[ACTIVITIES_PATH, "summary"]);
        Box::pin(async move { extract_record(Self::send(req).await?) })
    }

    fn create_activity(&self, body: NewActivity) -> ApiFuture<'_, ()> {
        let req = self.request(Method::POST, &[ACTIVITIES_PATH]).json(&body);
        Box::pin(Self::send_unit(req))
    }

    fn update_activity(&self, id: RecordId, status: ActivityStatus) -> ApiFuture<'_, ()> {
        let req = self
            .request(Method::PUT, &[ACTIVITIES_PATH, id.as_str()])
            .json(&serde_json::json!({ "status": status }));
        Box::pin(Self::send_unit(req))
    }

    fn delete_activity(&self, id: RecordId) -> ApiFuture<'_, ()> {
        let req = self.request(Method::DELETE, &[ACTIVITIES_PATH, id.as_str()]);
        Box::pin(Self::send_unit(req))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
