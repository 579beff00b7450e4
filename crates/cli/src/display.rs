// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};

use hf_core::{AckState, AckSummary, Activity, ActivitySummary, Note, NoteType, Reviewer};

/// Maximum line width for wrapped text content (excluding 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Longest description shown on a list line.
const LINE_WIDTH: usize = 60;

/// Date shown in lists: `dd/mm/yy`, or `-` when absent.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d/%m/%y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Timestamp shown in detail views: `YYYY-MM-DD HH:MM`.
pub fn format_datetime(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Wrap text at word boundaries if it's a single line.
///
/// Multi-line content is returned as-is to keep the author's formatting.
/// Width is counted in characters, not bytes.
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.chars().count() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in content.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// First line of `text`, shortened to `width` characters with an ellipsis.
fn headline(text: &str, width: usize) -> String {
    let first = text.lines().next().unwrap_or("").trim();
    if first.chars().count() <= width {
        return first.to_string();
    }
    let cut: String = first.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

fn ack_progress(state: AckState, required: usize) -> String {
    match state {
        AckState::Full => format!("{required}/{required}"),
        AckState::Partial { checked, required } => format!("{checked}/{required}"),
        AckState::Unacknowledged => format!("0/{required}"),
    }
}

/// Format a single note line for list output.
///
/// Informational notes show acknowledgment progress against the roster.
pub fn format_note_line(note: &Note, state: Option<AckState>, roster_size: usize) -> String {
    let mut line = format!(
        "- [{}] ({}) {}: {}",
        note.note_type.label(),
        note.status,
        note.id,
        headline(&note.description, LINE_WIDTH)
    );
    if note.note_type == NoteType::Informational {
        if let Some(state) = state {
            line.push_str(&format!(" [ack {}]", ack_progress(state, roster_size)));
        }
    }
    line.push_str(&format!(" {}", format_date(note.created_at)));
    line
}

/// Summary shown above the active list.
pub fn format_summary_line(summary: &AckSummary) -> String {
    format!(
        "acknowledged: {} / {}",
        summary.total_acknowledged, summary.total_possible
    )
}

/// Format note details for the show command.
pub fn format_note_details(note: &Note, roster: &[Reviewer], state: Option<AckState>) -> String {
    let mut output = Vec::new();

    output.push(format!("[{}] {}", note.note_type.label(), note.id));
    output.push(format!("Status: {}", note.status));
    if let Some(by) = &note.created_by {
        output.push(format!("Author: {}", by.display_name()));
    }
    if let Some(at) = note.created_at {
        output.push(format!("Created: {}", format_datetime(at)));
    }
    if let Some(at) = note.finalized_at {
        let by = note
            .finalized_by
            .as_ref()
            .map(|i| format!(" by {}", i.display_name()))
            .unwrap_or_default();
        output.push(format!("Finalized: {}{}", format_datetime(at), by));
    }

    output.push(String::new());
    output.push("Description:".to_string());
    for line in wrap_text(&note.description, WRAP_WIDTH).lines() {
        output.push(format!("    {}", line));
    }

    if note.note_type == NoteType::Informational {
        output.push(String::new());
        match state {
            Some(state) => output.push(format!(
                "Acknowledgments ({}):",
                ack_progress(state, roster.len())
            )),
            None => output.push("Acknowledgments:".to_string()),
        }
        for reviewer in roster {
            output.push(format_ack_entry(note, reviewer));
        }
        // Entries for reviewers who have left the roster.
        for (id, entry) in &note.acknowledged_by {
            if roster.iter().all(|r| &r.id != id) {
                let mark = if entry.checked { "x" } else { " " };
                output.push(format!("  [{}] {} (not on roster)", mark, id));
            }
        }
    }

    output.join("\n")
}

fn format_ack_entry(note: &Note, reviewer: &Reviewer) -> String {
    let entry = note.acknowledged_by.get(&reviewer.id);
    let mark = if entry.is_some_and(|e| e.checked) {
        "x"
    } else {
        " "
    };
    let mut line = format!("  [{}] {} ({})", mark, reviewer.label(), reviewer.id);
    if let Some(entry) = entry {
        if let Some(at) = entry.timestamp {
            line.push_str(&format!(" {}", format_datetime(at)));
        }
        if let Some(by) = &entry.acknowledged_by {
            line.push_str(&format!(" by {}", by.display_name()));
        }
    }
    line
}

pub fn format_reviewer_line(reviewer: &Reviewer) -> String {
    format!("- {}: {} ({})", reviewer.id, reviewer.label(), reviewer.role)
}

/// Format a single activity line for list output.
pub fn format_activity_line(activity: &Activity) -> String {
    format!(
        "- ({}) {}: {} [{}] {} - {}",
        activity.status,
        activity.id,
        headline(&activity.description, LINE_WIDTH),
        activity.priority,
        format_date(activity.start_date),
        format_date(activity.end_date)
    )
}

pub fn format_activity_summary(summary: &ActivitySummary) -> String {
    format!(
        "total: {}  completed: {}  pending: {}",
        summary.total, summary.completed, summary.pending
    )
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
