// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Technical-activity board.
//!
//! Unlike the note store, every mutation is followed by a full reload so the
//! list and its counts always reflect the server.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use hf_core::{Activity, ActivityDraft, ActivityStatus, ActivitySummary, RecordId};

use crate::api::{ActivitiesApi, HttpApi};
use crate::error::{Error, MutationKind, Result};

#[derive(Debug, Default)]
struct Board {
    activities: Vec<Activity>,
    summary: ActivitySummary,
    banner: Option<String>,
}

pub struct ActivityBoard<A = HttpApi> {
    api: A,
    board: Mutex<Board>,
}

impl<A: ActivitiesApi> ActivityBoard<A> {
    pub fn new(api: A) -> Self {
        ActivityBoard {
            api,
            board: Mutex::new(Board::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn surface<T>(&self, err: Error) -> Result<T> {
        self.lock().banner = Some(err.to_string());
        Err(err)
    }

    /// Fetches the list, then the summary.
    ///
    /// When the server sends no summary it is computed from the list.
    pub async fn load(&self) -> Result<()> {
        let activities = match self.api.list_activities().await {
            Ok(list) => list,
            Err(e) => return self.surface(Error::Load(e)),
        };
        let summary = match self.api.activity_summary().await {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                debug!("no activity summary from server, computing locally");
                ActivitySummary::from_activities(&activities)
            }
            Err(e) => return self.surface(Error::Load(e)),
        };

        let mut board = self.lock();
        board.activities = activities;
        board.summary = summary;
        board.banner = None;
        Ok(())
    }

    /// Validates and creates an activity, then reloads.
    pub async fn create(&self, draft: &ActivityDraft) -> Result<()> {
        let body = match draft.validate() {
            Ok(body) => body,
            Err(e) => return self.surface(e.into()),
        };
        if let Err(e) = self.api.create_activity(body).await {
            return self.surface(Error::mutation(MutationKind::CreateActivity, e));
        }
        info!("created activity");
        self.load().await
    }

    pub async fn set_status(&self, id: &RecordId, status: ActivityStatus) -> Result<()> {
        self.require(id)?;
        if let Err(e) = self.api.update_activity(id.clone(), status).await {
            return self.surface(Error::mutation(MutationKind::UpdateActivity, e));
        }
        info!("set activity {} to {}", id, status);
        self.load().await
    }

    /// Deletes an activity after `confirm` approves it, then reloads.
    pub async fn delete<F>(&self, id: &RecordId, confirm: F) -> Result<()>
    where
        F: FnOnce(&Activity) -> bool,
    {
        let activity = self
            .activity(id)
            .ok_or_else(|| Error::ActivityNotFound(id.to_string()))?;
        if !confirm(&activity) {
            return Err(Error::Cancelled);
        }
        if let Err(e) = self.api.delete_activity(id.clone()).await {
            return self.surface(Error::mutation(MutationKind::DeleteActivity, e));
        }
        info!("deleted activity {}", id);
        self.load().await
    }

    fn require(&self, id: &RecordId) -> Result<()> {
        if self.lock().activities.iter().any(|a| &a.id == id) {
            Ok(())
        } else {
            Err(Error::ActivityNotFound(id.to_string()))
        }
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.lock().activities.clone()
    }

    pub fn activity(&self, id: &RecordId) -> Option<Activity> {
        self.lock().activities.iter().find(|a| &a.id == id).cloned()
    }

    pub fn summary(&self) -> ActivitySummary {
        self.lock().summary
    }

    pub fn banner(&self) -> Option<String> {
        self.lock().banner.clone()
    }
}

#[cfg(test)]
#[path = "activities_tests.rs"]
mod tests;
