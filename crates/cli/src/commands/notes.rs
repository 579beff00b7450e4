// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use hf_core::{permissions, AckSummary, Error as CoreError, Note, NoteDraft, NoteType, Session};
use hf_core::{Status, Tab};

use crate::api::NotesApi;
use crate::cli::{NotesCommand, OutputFormat};
use crate::display::{format_note_details, format_note_line, format_summary_line};
use crate::error::{Error, Result};
use crate::store::{Completion, NoteStore};

use super::{confirm, record_id, Context};

#[derive(Serialize)]
struct NoteList {
    notes: Vec<Note>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<AckSummary>,
}

/// Execute a notes subcommand against the configured backend.
pub async fn run(ctx: &Context, cmd: NotesCommand) -> Result<()> {
    let store = ctx.note_store()?;
    run_impl(&store, &ctx.session, cmd, confirm).await
}

/// Internal implementation that accepts a store for testing.
///
/// `ask` is consulted before deleting unless `--yes` was given.
pub(crate) async fn run_impl<A, F>(
    store: &NoteStore<A>,
    session: &Session,
    cmd: NotesCommand,
    ask: F,
) -> Result<()>
where
    A: NotesApi,
    F: FnOnce(&str) -> bool,
{
    match cmd {
        NotesCommand::New {
            description,
            note_type,
        } => {
            let note_type: NoteType = note_type.parse()?;
            create(store, session, &description, note_type).await
        }
        NotesCommand::Delete { id, yes } => {
            // Refuse before prompting; the server enforces this too.
            if !permissions::can_delete(session) {
                return Err(Error::PermissionDenied {
                    action: "deleting notes",
                    role: "admin",
                });
            }
            store.load(session).await?;
            delete(store, session, &id, yes, ask).await
        }
        NotesCommand::List { finalized, output } => {
            store.load(session).await?;
            list(store, finalized, output)
        }
        NotesCommand::Show { id, output } => {
            store.load(session).await?;
            show(store, &id, output)
        }
        NotesCommand::Edit { id, description } => {
            store.load(session).await?;
            edit(store, session, &id, description).await
        }
        NotesCommand::Status { id, status } => {
            let status: Status = status.parse()?;
            store.load(session).await?;
            set_status(store, session, &id, status).await
        }
        NotesCommand::Reopen { id } => {
            store.load(session).await?;
            reopen(store, session, &id).await
        }
        NotesCommand::Ack {
            id,
            reviewer,
            uncheck,
        } => {
            store.load(session).await?;
            acknowledge(store, session, &id, &reviewer, !uncheck).await
        }
    }
}

fn find<A: NotesApi>(store: &NoteStore<A>, id: &str) -> Result<Note> {
    let id = record_id(id);
    store
        .note(&id)
        .ok_or_else(|| Error::NoteNotFound(id.to_string()))
}

fn list<A: NotesApi>(store: &NoteStore<A>, finalized: bool, output: OutputFormat) -> Result<()> {
    let tab = if finalized { Tab::Finalized } else { Tab::Active };
    let notes = store.tab(tab);
    let summary = (tab == Tab::Active).then(|| store.summary());

    match output {
        OutputFormat::Json => {
            let list = NoteList { notes, summary };
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        OutputFormat::Text => {
            if let Some(summary) = &summary {
                println!("{}", format_summary_line(summary));
            }
            if notes.is_empty() {
                let which = if finalized { "finalized" } else { "active" };
                println!("No {} notes.", which);
                return Ok(());
            }
            let roster_size = store.reviewers().len();
            for note in &notes {
                println!(
                    "{}",
                    format_note_line(note, store.ack_state(&note.id), roster_size)
                );
            }
        }
    }
    Ok(())
}

fn show<A: NotesApi>(store: &NoteStore<A>, id: &str, output: OutputFormat) -> Result<()> {
    let note = find(store, id)?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note)?),
        OutputFormat::Text => println!(
            "{}",
            format_note_details(&note, &store.reviewers(), store.ack_state(&note.id))
        ),
    }
    Ok(())
}

async fn create<A: NotesApi>(
    store: &NoteStore<A>,
    session: &Session,
    description: &str,
    note_type: NoteType,
) -> Result<()> {
    let draft = NoteDraft::new(description, note_type);
    match store.create(session, &draft).await? {
        Some(note) => println!("Created note {}", note.id),
        None => println!("Created note (run 'handoff notes list' to see it)"),
    }
    Ok(())
}

async fn edit<A: NotesApi>(
    store: &NoteStore<A>,
    session: &Session,
    id: &str,
    description: String,
) -> Result<()> {
    let note = find(store, id)?;
    if !session.is_admin() {
        return Err(Error::PermissionDenied {
            action: "editing descriptions",
            role: "admin",
        });
    }
    if !permissions::can_edit_description(session, &note) {
        return Err(CoreError::InvalidInput(format!(
            "note {} is {}; reopen it before editing",
            note.id, note.status
        ))
        .into());
    }

    store.stage_description(&note.id, description)?;
    if store.commit_description(session, &note.id).await? {
        println!("Updated note {}", note.id);
    } else {
        println!("No changes to note {}", note.id);
    }
    Ok(())
}

async fn set_status<A: NotesApi>(
    store: &NoteStore<A>,
    session: &Session,
    id: &str,
    status: Status,
) -> Result<()> {
    let note = find(store, id)?;
    if !permissions::can_change_status(session) {
        return Err(Error::PermissionDenied {
            action: "changing status",
            role: "admin or coordinator",
        });
    }
    if note.is_finalized() && status.is_active() && !permissions::can_reopen(session, &note) {
        return Err(Error::PermissionDenied {
            action: "reopening notes",
            role: "admin",
        });
    }
    if note.status == status {
        println!("Note {} is already {}", note.id, status);
        return Ok(());
    }

    store.set_status(session, &note.id, status).await?;
    println!("Note {}: {} -> {}", note.id, note.status, status);
    Ok(())
}

async fn reopen<A: NotesApi>(store: &NoteStore<A>, session: &Session, id: &str) -> Result<()> {
    let note = find(store, id)?;
    if !note.is_finalized() {
        return Err(CoreError::InvalidInput(format!(
            "note {} is not finalized",
            note.id
        ))
        .into());
    }
    if !permissions::can_reopen(session, &note) {
        return Err(Error::PermissionDenied {
            action: "reopening notes",
            role: "admin",
        });
    }

    store.set_status(session, &note.id, Status::Pending).await?;
    println!("Reopened note {}", note.id);
    Ok(())
}

async fn acknowledge<A: NotesApi>(
    store: &NoteStore<A>,
    session: &Session,
    id: &str,
    reviewer: &str,
    checked: bool,
) -> Result<()> {
    let note = find(store, id)?;
    let reviewer_id = record_id(reviewer);
    let reviewer = store
        .reviewers()
        .into_iter()
        .find(|r| r.id == reviewer_id)
        .ok_or_else(|| Error::ReviewerNotFound(reviewer_id.to_string()))?;
    if !permissions::can_acknowledge(session, &note) {
        return Err(CoreError::InvalidInput(format!(
            "note {} does not take acknowledgments: only active informational notes do",
            note.id
        ))
        .into());
    }

    let outcome = store
        .acknowledge(session, &note.id, &reviewer.id, checked)
        .await?;
    let verb = if checked {
        "Acknowledged"
    } else {
        "Cleared acknowledgment of"
    };
    println!("{} note {} for {}", verb, note.id, reviewer.label());

    match outcome.completion {
        Completion::Completed => {
            println!("Note {} completed: every reviewer has acknowledged it", note.id)
        }
        Completion::Failed(message) => eprintln!("warning: {}", message),
        Completion::NotTriggered | Completion::AlreadyInFlight | Completion::Discarded => {}
    }
    Ok(())
}

async fn delete<A, F>(
    store: &NoteStore<A>,
    session: &Session,
    id: &str,
    yes: bool,
    ask: F,
) -> Result<()>
where
    A: NotesApi,
    F: FnOnce(&str) -> bool,
{
    let id = record_id(id);
    store
        .delete(session, &id, |note| {
            yes || ask(&format!(
                "Delete note {} \"{}\"? This cannot be undone.",
                note.id,
                note.description.lines().next().unwrap_or("")
            ))
        })
        .await?;
    println!("Deleted note {}", id);
    Ok(())
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
