//! In-memory list snapshot with selection preservation
//!
//! A snapshot is the ordered list of records as of the last refresh plus
//! the id of the selected record. Applying a fresh fetch replaces the list
//! wholesale and re-selects the previous record if it is still present, so
//! a front end never jumps to a different row after a write.

use crate::core::repository::Record;

/// What changed when a fresh list was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Incremented on every apply
    pub generation: u64,
    /// Number of rows now in the snapshot
    pub rows: usize,
    /// Selection captured before the replace
    pub previous_selection: Option<i64>,
    /// Whether the previous selection is selected again
    pub restored: bool,
}

/// Ordered records plus an optional selection
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    rows: Vec<R>,
    selected: Option<i64>,
    generation: u64,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: None,
            generation: 0,
        }
    }
}

impl<R: Record> Snapshot<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected(&self) -> Option<&R> {
        self.selected.and_then(|id| self.find(id))
    }

    /// Select the record with `id`; returns false (and clears the
    /// selection) when no such record is in the snapshot
    pub fn select(&mut self, id: i64) -> bool {
        if self.find(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            self.selected = None;
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replace the contents with a freshly fetched list
    pub fn apply(&mut self, fresh: Vec<R>) -> SyncOutcome {
        let previous = self.selected;

        self.rows = fresh;
        self.generation += 1;
        self.selected = previous.filter(|&id| self.rows.iter().any(|r| r.id() == id));

        let outcome = SyncOutcome {
            generation: self.generation,
            rows: self.rows.len(),
            previous_selection: previous,
            restored: self.selected.is_some(),
        };
        tracing::debug!(
            kind = R::LABEL,
            generation = outcome.generation,
            rows = outcome.rows,
            restored = outcome.restored,
            "snapshot applied"
        );
        outcome
    }

    /// Records whose name contains `query`, ignoring case
    ///
    /// A blank query matches everything.
    pub fn filter_by_name(&self, query: &str) -> Vec<&R> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows
            .iter()
            .filter(|r| r.name().to_lowercase().contains(&needle))
            .collect()
    }
}
