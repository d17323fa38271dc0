//! Selection tracker.
//!
//! Holds the set of selected row ids. The set is a view over currently
//! eligible rows: callers reconcile it after every filter recompute and
//! every delete, and clear it outright when the filter changes.

use crate::model::RowId;
use std::collections::HashSet;

/// Unordered set of selected row ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: HashSet<RowId>,
}

impl SelectionTracker {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove a single id.
    pub fn select(&mut self, id: RowId, selected: bool) {
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// Replace the selection with exactly `ids`.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RowId>,
    {
        self.selected = ids.into_iter().collect();
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop every id not in `valid_ids`. Returns how many were pruned.
    pub fn reconcile<'a, I>(&mut self, valid_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        if self.selected.is_empty() {
            return 0;
        }

        let valid: HashSet<&RowId> = valid_ids.into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| valid.contains(id));
        before - self.selected.len()
    }

    /// Remove the listed ids (e.g. after they were deleted).
    pub fn remove_many<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Check membership.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sorted snapshot of the selected ids.
    pub fn ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Iterate the selected ids in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{id, ids};

    fn selected(raw: &[&str]) -> SelectionTracker {
        let mut tracker = SelectionTracker::new();
        tracker.select_all(ids(raw));
        tracker
    }

    #[test]
    fn select_adds_and_removes() {
        let mut tracker = SelectionTracker::new();
        tracker.select(id("user-1"), true);
        tracker.select(id("user-2"), true);
        tracker.select(id("user-1"), false);

        assert!(!tracker.is_selected("user-1"));
        assert!(tracker.is_selected("user-2"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn deselect_missing_is_noop() {
        let mut tracker = selected(&["user-1"]);
        tracker.select(id("user-9"), false);
        assert_eq!(tracker.ids(), ids(&["user-1"]));
    }

    #[test]
    fn select_all_replaces_previous_selection() {
        let mut tracker = selected(&["user-1", "user-2"]);
        tracker.select_all(ids(&["user-3"]));
        assert_eq!(tracker.ids(), ids(&["user-3"]));
    }

    #[test]
    fn clear_empties() {
        let mut tracker = selected(&["user-1", "user-2"]);
        tracker.clear();
        assert!(tracker.is_empty());
    }

    #[test]
    fn reconcile_prunes_ids_not_in_valid_set() {
        let mut tracker = selected(&["user-1", "user-2", "user-3"]);
        let valid = ids(&["user-2", "user-3", "user-4"]);

        let pruned = tracker.reconcile(&valid);

        assert_eq!(pruned, 1);
        assert_eq!(tracker.ids(), ids(&["user-2", "user-3"]));
    }

    #[test]
    fn reconcile_against_empty_clears() {
        let mut tracker = selected(&["user-1"]);
        let valid: Vec<RowId> = Vec::new();
        assert_eq!(tracker.reconcile(&valid), 1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn remove_many_drops_listed_ids() {
        let mut tracker = selected(&["user-1", "user-2", "user-3"]);
        tracker.remove_many(&ids(&["user-1", "user-3", "user-8"]));
        assert_eq!(tracker.ids(), ids(&["user-2"]));
    }

    #[test]
    fn ids_are_sorted() {
        let tracker = selected(&["user-3", "user-1", "user-2"]);
        assert_eq!(tracker.ids(), ids(&["user-1", "user-2", "user-3"]));
    }
}
