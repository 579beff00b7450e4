// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Derived views over the note list.
//!
//! Everything here is a pure function of the current notes; callers recompute
//! after every change instead of caching.

use serde::Serialize;

use crate::note::Note;

/// Which half of the partition to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Active,
    Finalized,
}

/// Notes split into active and finalized, preserving list order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition<'a> {
    pub active: Vec<&'a Note>,
    pub finalized: Vec<&'a Note>,
}

impl<'a> Partition<'a> {
    pub fn tab(&self, tab: Tab) -> &[&'a Note] {
        match tab {
            Tab::Active => &self.active,
            Tab::Finalized => &self.finalized,
        }
    }
}

/// Splits `notes` into disjoint active and finalized lists.
pub fn partition(notes: &[Note]) -> Partition<'_> {
    let (finalized, active): (Vec<&Note>, Vec<&Note>) =
        notes.iter().partition(|n| n.is_finalized());
    Partition { active, finalized }
}

/// Acknowledgment totals across all notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AckSummary {
    /// Entries with `checked = true`.
    pub total_acknowledged: usize,
    /// All entries present, checked or not.
    pub total_possible: usize,
}

pub fn summarize(notes: &[Note]) -> AckSummary {
    notes.iter().fold(AckSummary::default(), |mut acc, note| {
        acc.total_acknowledged += note.checked_count();
        acc.total_possible += note.acknowledged_by.len();
        acc
    })
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
