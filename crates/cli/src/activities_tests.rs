// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::api::mock::MockApi;
use crate::api::ApiError;
use chrono::{TimeZone, Utc};

fn activity(id: &str, status: ActivityStatus) -> Activity {
    Activity {
        id: RecordId::from(id),
        description: format!("activity {id}"),
        start_date: None,
        end_date: None,
        notes: String::new(),
        status,
        priority: Default::default(),
        created_by: None,
    }
}

fn seeded() -> MockApi {
    MockApi::new().with_activities(vec![
        activity("a1", ActivityStatus::Pending),
        activity("a2", ActivityStatus::Finished),
        activity("a3", ActivityStatus::NotDone),
    ])
}

#[tokio::test]
async fn load_computes_summary_when_server_sends_none() {
    let board = ActivityBoard::new(seeded());
    board.load().await.unwrap();

    assert_eq!(board.activities().len(), 3);
    assert_eq!(
        board.summary(),
        ActivitySummary {
            total: 3,
            completed: 1,
            pending: 1
        }
    );
}

#[tokio::test]
async fn load_prefers_server_summary() {
    let server = ActivitySummary {
        total: 10,
        completed: 4,
        pending: 6,
    };
    let board = ActivityBoard::new(seeded().with_summary(server));
    board.load().await.unwrap();
    assert_eq!(board.summary(), server);
}

#[tokio::test]
async fn load_failure_sets_banner() {
    let board = ActivityBoard::new(seeded());
    board
        .api()
        .fail("list_activities", ApiError::Transport("down".to_string()));

    let err = board.load().await.unwrap_err();
    assert!(matches!(err, Error::Load(_)));
    assert!(board.banner().is_some());
}

#[tokio::test]
async fn create_validates_before_sending() {
    let board = ActivityBoard::new(seeded());
    board.load().await.unwrap();

    let blank = ActivityDraft {
        description: "  ".to_string(),
        ..ActivityDraft::default()
    };
    assert!(matches!(
        board.create(&blank).await,
        Err(Error::Validation(_))
    ));

    let backwards = ActivityDraft {
        description: "Replace filter".to_string(),
        start_date: Some(Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()),
        end_date: Some(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()),
        notes: String::new(),
    };
    assert!(matches!(
        board.create(&backwards).await,
        Err(Error::Validation(_))
    ));
    assert_eq!(board.api().count("create_activity"), 0);
}

#[tokio::test]
async fn create_reloads_list() {
    let board = ActivityBoard::new(seeded());
    board.load().await.unwrap();

    let draft = ActivityDraft {
        description: "Calibrate sensor".to_string(),
        ..ActivityDraft::default()
    };
    board.create(&draft).await.unwrap();

    assert_eq!(board.activities().len(), 4);
    assert_eq!(board.summary().pending, 2);
    assert_eq!(board.api().count("list_activities"), 2);
}

#[tokio::test]
async fn set_status_reloads() {
    let board = ActivityBoard::new(seeded());
    board.load().await.unwrap();

    board
        .set_status(&RecordId::from("a1"), ActivityStatus::Finished)
        .await
        .unwrap();
    let a1 = board.activity(&RecordId::from("a1")).unwrap();
    assert_eq!(a1.status, ActivityStatus::Finished);
    assert_eq!(board.summary().completed, 2);
}

#[tokio::test]
async fn set_status_unknown_activity() {
    let board = ActivityBoard::new(seeded());
    board.load().await.unwrap();
    let err = board
        .set_status(&RecordId::from("zz"), ActivityStatus::Finished)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ActivityNotFound(_)));
    assert_eq!(board.api().count("update_activity"), 0);
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let board = ActivityBoard::new(seeded());
    board.load().await.unwrap();
    let id = RecordId::from("a2");

    let err = board.delete(&id, |_| false).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(board.activities().len(), 3);

    board.delete(&id, |_| true).await.unwrap();
    assert_eq!(board.activities().len(), 2);
    assert!(board.activity(&id).is_none());
}

#[tokio::test]
async fn delete_failure_keeps_activity() {
    let board = ActivityBoard::new(seeded());
    board.load().await.unwrap();
    board.api().fail(
        "delete_activity",
        ApiError::Status {
            status: 403,
            message: Some("forbidden".to_string()),
        },
    );

    let err = board
        .delete(&RecordId::from("a1"), |_| true)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not delete the activity: server returned 403: forbidden"
    );
    assert_eq!(board.activities().len(), 3);
}
