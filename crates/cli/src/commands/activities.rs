// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use hf_core::{Activity, ActivityDraft, ActivityStatus, ActivitySummary, Error as CoreError};

use crate::activities::ActivityBoard;
use crate::api::ActivitiesApi;
use crate::cli::{ActivitiesCommand, NewActivityArgs, OutputFormat};
use crate::display::{format_activity_line, format_activity_summary};
use crate::error::Result;

use super::{confirm, record_id, Context};

#[derive(Serialize)]
struct ActivityList {
    activities: Vec<Activity>,
    summary: ActivitySummary,
}

pub async fn run(ctx: &Context, cmd: ActivitiesCommand) -> Result<()> {
    let board = ctx.activity_board()?;
    run_impl(&board, cmd, confirm).await
}

pub(crate) async fn run_impl<A, F>(
    board: &ActivityBoard<A>,
    cmd: ActivitiesCommand,
    ask: F,
) -> Result<()>
where
    A: ActivitiesApi,
    F: FnOnce(&str) -> bool,
{
    match cmd {
        ActivitiesCommand::List { output } => {
            board.load().await?;
            list(board, output)
        }
        ActivitiesCommand::New(args) => {
            let draft = draft_from_args(args)?;
            board.create(&draft).await?;
            println!("Created activity \"{}\"", draft.description.trim());
            Ok(())
        }
        ActivitiesCommand::Status { id, status } => {
            let status: ActivityStatus = status.parse()?;
            board.load().await?;
            let id = record_id(&id);
            board.set_status(&id, status).await?;
            println!("Activity {}: {}", id, status);
            Ok(())
        }
        ActivitiesCommand::Delete { id, yes } => {
            board.load().await?;
            let id = record_id(&id);
            board
                .delete(&id, |activity| {
                    yes || ask(&format!(
                        "Delete activity {} \"{}\"?",
                        activity.id, activity.description
                    ))
                })
                .await?;
            println!("Deleted activity {}", id);
            Ok(())
        }
    }
}

fn list<A: ActivitiesApi>(board: &ActivityBoard<A>, output: OutputFormat) -> Result<()> {
    let activities = board.activities();
    let summary = board.summary();
    match output {
        OutputFormat::Json => {
            let list = ActivityList {
                activities,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        OutputFormat::Text => {
            println!("{}", format_activity_summary(&summary));
            if activities.is_empty() {
                println!("No activities.");
            }
            for activity in &activities {
                println!("{}", format_activity_line(activity));
            }
        }
    }
    Ok(())
}

fn draft_from_args(args: NewActivityArgs) -> Result<ActivityDraft> {
    Ok(ActivityDraft {
        description: args.description,
        start_date: args.start.as_deref().map(parse_date).transpose()?,
        end_date: args.end.as_deref().map(parse_date).transpose()?,
        notes: args.notes,
    })
}

/// Parses `YYYY-MM-DD` as midnight UTC.
pub(crate) fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::InvalidInput(format!("invalid date '{}': expected YYYY-MM-DD", raw))
    })?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

#[cfg(test)]
#[path = "activities_tests.rs"]
mod tests;
