// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Technical activity planning types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::identity::{Identity, RecordId};
use crate::wire::{lenient_datetime, null_as_default};

/// Outcome of a planned technical activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ActivityStatus {
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "No realizada")]
    NotDone,
    #[serde(rename = "Finalizada")]
    Finished,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "Pendiente",
            ActivityStatus::NotDone => "No realizada",
            ActivityStatus::Finished => "Finalizada",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown status strings read as pending rather than failing the record.
impl<'de> Deserialize<'de> for ActivityStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

impl FromStr for ActivityStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Ok(ActivityStatus::Pending),
            "no realizada" | "not-done" | "not_done" | "skipped" => Ok(ActivityStatus::NotDone),
            "finalizada" | "finished" | "done" => Ok(ActivityStatus::Finished),
            _ => Err(Error::InvalidActivityStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Baja")]
    Low,
    /// Also what unknown priority strings read as.
    #[default]
    #[serde(rename = "Media", other)]
    Medium,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "Media",
            Priority::Low => "Baja",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "alta" | "high" => Ok(Priority::High),
            "media" | "medium" => Ok(Priority::Medium),
            "baja" | "low" => Ok(Priority::Low),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// A planned piece of technical work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: RecordId,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ActivityStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Identity>,
}

/// Input for creating an activity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityDraft {
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: String,
}

/// Validated activity payload, ready to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: String,
    pub status: ActivityStatus,
}

impl ActivityDraft {
    /// Trims text fields and checks the date range.
    pub fn validate(&self) -> Result<NewActivity> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::FieldRequired {
                field: "Activity description",
            });
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(Error::InvalidInput(
                    "end date cannot be before start date".to_string(),
                ));
            }
        }
        Ok(NewActivity {
            description: description.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes.trim().to_string(),
            status: ActivityStatus::Pending,
        })
    }
}

/// Counts shown above the activity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivitySummary {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub completed: usize,
    #[serde(default)]
    pub pending: usize,
}

impl ActivitySummary {
    pub fn from_activities(activities: &[Activity]) -> Self {
        activities
            .iter()
            .fold(ActivitySummary::default(), |mut acc, a| {
                acc.total += 1;
                match a.status {
                    ActivityStatus::Finished => acc.completed += 1,
                    ActivityStatus::Pending => acc.pending += 1,
                    ActivityStatus::NotDone => {}
                }
                acc
            })
    }
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
