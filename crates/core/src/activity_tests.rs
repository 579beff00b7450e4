// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use chrono::TimeZone;
use yare::parameterized;

#[parameterized(
    wire_pending = { "Pendiente", ActivityStatus::Pending },
    wire_not_done = { "No realizada", ActivityStatus::NotDone },
    wire_finished = { "Finalizada", ActivityStatus::Finished },
    english_not_done = { "not-done", ActivityStatus::NotDone },
    english_done = { "DONE", ActivityStatus::Finished },
)]
fn activity_status_from_str(input: &str, expected: ActivityStatus) {
    assert_eq!(input.parse::<ActivityStatus>().unwrap(), expected);
}

#[parameterized(
    alta = { "Alta", Priority::High },
    low = { "low", Priority::Low },
    medium = { "medium", Priority::Medium },
)]
fn priority_from_str(input: &str, expected: Priority) {
    assert_eq!(input.parse::<Priority>().unwrap(), expected);
}

#[test]
fn activity_defaults_for_missing_and_null_fields() {
    let activity: Activity = serde_json::from_str(
        r#"{"id": 9, "description": "Replace UPS batteries", "notes": null, "status": null}"#,
    )
    .unwrap();
    assert_eq!(activity.id.as_str(), "9");
    assert_eq!(activity.notes, "");
    assert_eq!(activity.status, ActivityStatus::Pending);
    assert_eq!(activity.priority, Priority::Medium);
}

#[test]
fn unknown_priority_reads_as_medium() {
    let activity: Activity =
        serde_json::from_str(r#"{"id": "x", "priority": "Urgente"}"#).unwrap();
    assert_eq!(activity.priority, Priority::Medium);
}

#[test]
fn unknown_status_reads_as_pending() {
    let activity: Activity = serde_json::from_str(
        r#"{"id": 4, "status": "Archivada", "startDate": "2025-03-01T08:00:00"}"#,
    )
    .unwrap();
    assert_eq!(activity.status, ActivityStatus::Pending);
    assert_eq!(
        activity.start_date.unwrap().to_rfc3339(),
        "2025-03-01T08:00:00+00:00"
    );
}

#[test]
fn draft_validation_trims_and_defaults_status() {
    let draft = ActivityDraft {
        description: "  Firmware update on RTU-4 ".to_string(),
        notes: " bring laptop ".to_string(),
        ..ActivityDraft::default()
    };
    let new = draft.validate().unwrap();
    assert_eq!(new.description, "Firmware update on RTU-4");
    assert_eq!(new.notes, "bring laptop");
    assert_eq!(new.status, ActivityStatus::Pending);
}

#[test]
fn draft_requires_description() {
    let draft = ActivityDraft {
        description: "   ".to_string(),
        ..ActivityDraft::default()
    };
    assert!(matches!(draft.validate(), Err(Error::FieldRequired { .. })));
}

#[test]
fn draft_rejects_end_before_start() {
    let start = Utc.with_ymd_and_hms(2026, 5, 2, 8, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();
    let draft = ActivityDraft {
        description: "Cable survey".to_string(),
        start_date: Some(start),
        end_date: Some(end),
        ..ActivityDraft::default()
    };
    assert!(matches!(draft.validate(), Err(Error::InvalidInput(_))));

    let same_day = ActivityDraft {
        end_date: Some(start),
        ..draft
    };
    assert!(same_day.validate().is_ok());
}

#[test]
fn summary_from_activities() {
    let make = |id: i64, status: ActivityStatus| Activity {
        id: RecordId::from(id),
        description: String::new(),
        start_date: None,
        end_date: None,
        notes: String::new(),
        status,
        priority: Priority::Medium,
        created_by: None,
    };
    let activities = vec![
        make(1, ActivityStatus::Pending),
        make(2, ActivityStatus::Finished),
        make(3, ActivityStatus::NotDone),
        make(4, ActivityStatus::Pending),
    ];
    assert_eq!(
        ActivitySummary::from_activities(&activities),
        ActivitySummary {
            total: 4,
            completed: 1,
            pending: 2
        }
    );
}
