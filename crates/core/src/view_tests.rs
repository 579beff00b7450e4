// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::identity::{Identity, RecordId, Role};
use crate::note::{NoteType, Status};
use std::collections::HashSet;

fn note(id: i64, status: Status, acks: &[(&str, bool)]) -> Note {
    let mut note = Note::new(id, format!("note {}", id), NoteType::Informational);
    note.status = status;
    let by = Identity::new("ops", Role::User);
    for (reviewer, checked) in acks {
        note.acknowledged_by
            .entry(RecordId::from(*reviewer))
            .or_default()
            .toggle(*checked, &by, chrono::Utc::now());
    }
    note
}

fn sample() -> Vec<Note> {
    vec![
        note(1, Status::Pending, &[("a", true), ("b", false)]),
        note(2, Status::Completed, &[("a", true), ("b", true)]),
        note(3, Status::InProgress, &[]),
        note(4, Status::Cancelled, &[("a", false)]),
        note(5, Status::Scheduled, &[("c", true)]),
    ]
}

#[test]
fn partition_is_disjoint_and_exhaustive() {
    let notes = sample();
    let p = partition(&notes);

    let active: HashSet<_> = p.active.iter().map(|n| n.id.clone()).collect();
    let finalized: HashSet<_> = p.finalized.iter().map(|n| n.id.clone()).collect();

    assert!(active.is_disjoint(&finalized));
    assert_eq!(active.len() + finalized.len(), notes.len());
    assert!(p.active.iter().all(|n| !n.is_finalized()));
    assert!(p.finalized.iter().all(|n| n.is_finalized()));
}

#[test]
fn partition_preserves_order() {
    let notes = sample();
    let p = partition(&notes);
    let active: Vec<_> = p.tab(Tab::Active).iter().map(|n| n.id.to_string()).collect();
    let finalized: Vec<_> = p
        .tab(Tab::Finalized)
        .iter()
        .map(|n| n.id.to_string())
        .collect();
    assert_eq!(active, vec!["1", "3", "5"]);
    assert_eq!(finalized, vec!["2", "4"]);
}

#[test]
fn summary_counts_entries_across_all_notes() {
    let notes = sample();
    let summary = summarize(&notes);
    assert_eq!(summary.total_acknowledged, 4);
    assert_eq!(summary.total_possible, 6);
    assert!(summary.total_acknowledged <= summary.total_possible);
}

#[test]
fn empty_list_yields_zeros() {
    assert_eq!(summarize(&[]), AckSummary::default());
    let p = partition(&[]);
    assert!(p.active.is_empty());
    assert!(p.finalized.is_empty());
}
