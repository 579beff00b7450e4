// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use hf_core::Session;

use crate::api::NotesApi;
use crate::cli::OutputFormat;
use crate::display::format_reviewer_line;
use crate::error::Result;
use crate::store::NoteStore;

use super::Context;

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let store = ctx.note_store()?;
    run_impl(&store, &ctx.session, output).await
}

pub(crate) async fn run_impl<A: NotesApi>(
    store: &NoteStore<A>,
    session: &Session,
    output: OutputFormat,
) -> Result<()> {
    store.load(session).await?;
    let reviewers = store.reviewers();

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reviewers)?),
        OutputFormat::Text => {
            if reviewers.is_empty() {
                println!("No reviewers.");
            }
            for reviewer in &reviewers {
                println!("{}", format_reviewer_line(reviewer));
            }
        }
    }
    Ok(())
}
