//! Engine state owned by one table.
//!
//! `TableState` ties together the row store, the active filter, the cached
//! filtered view, the selection, load state, in-flight operations, and the
//! notification queue. Every entry point leaves the pieces mutually
//! consistent:
//!
//! - the filtered view reflects the current store version and filter
//! - selection is a subset of the filtered ids
//! - changing the filter clears the selection
//!
//! The presentation layer reads from here. Asynchronous mutations go through
//! [`MutationCoordinator`](super::mutation::MutationCoordinator), which calls
//! the crate-private apply methods once the backend has confirmed.

use super::filter::{ActiveFilter, FilterSpec, FilterUpdate, FilteredView};
use super::notifications::Notifications;
use super::operations::OperationTracker;
use super::selection::SelectionTracker;
use crate::model::{Row, RowId, RowPatch, ValidationError};
use crate::store::RowStore;
use crate::view_state::{Viewport, VirtualRow, VisibleWindow};
use serde::Serialize;
use tracing::debug;

#[cfg(test)]
#[path = "table_state_tests.rs"]
mod tests;

/// Initial-load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    /// Waiting for the first `fetch_all`.
    #[default]
    Loading,
    /// Dataset present; table usable.
    Ready,
    /// Initial load failed. Terminal.
    Failed(String),
}

/// How the selection relates to the filtered rows (header checkbox state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionSummary {
    /// Nothing selected.
    None,
    /// Some but not all filtered rows selected.
    Some,
    /// Every filtered row selected (and at least one exists).
    All,
}

/// A materialized row together with its layout slot.
#[derive(Debug, Clone, Copy)]
pub struct WindowRow<'a> {
    /// Placement inside the scroll extent.
    pub slot: VirtualRow,
    /// The row data.
    pub row: &'a Row,
    /// Whether the row is selected.
    pub selected: bool,
}

/// Complete engine state for one table.
#[derive(Debug)]
pub struct TableState {
    store: RowStore,
    filter: FilterSpec,
    view: FilteredView,
    selection: SelectionTracker,
    load_state: LoadState,
    operations: OperationTracker,
    notifications: Notifications,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(Notifications::default())
    }
}

impl TableState {
    /// Create an empty state in `Loading`.
    pub fn new(notifications: Notifications) -> Self {
        Self {
            store: RowStore::new(),
            filter: FilterSpec::default(),
            view: FilteredView::new(),
            selection: SelectionTracker::new(),
            load_state: LoadState::Loading,
            operations: OperationTracker::default(),
            notifications,
        }
    }

    /// Create a ready state over `rows`, skipping the backend.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        let mut state = Self::default();
        state.finish_load(rows);
        state
    }

    // ===== Queries =====

    /// Initial-load lifecycle.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Full unfiltered dataset.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Active filter.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Operation lifecycle records.
    pub fn operations(&self) -> &OperationTracker {
        &self.operations
    }

    /// Notification queue.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Rows passing the filter, in store order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row> {
        self.view.rows(&self.store)
    }

    /// Ids passing the filter, in store order.
    pub fn filtered_ids(&self) -> impl Iterator<Item = &RowId> {
        self.view.ids(&self.store)
    }

    /// Row at a filtered index.
    pub fn filtered_row(&self, index: usize) -> Option<&Row> {
        self.view.row_at(&self.store, index)
    }

    /// Rows in the store.
    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    /// Rows passing the filter.
    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    /// True if any filter dimension constrains.
    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active()
    }

    /// Constraining filter dimensions, for display.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.filter.active_filters()
    }

    /// Header checkbox state.
    pub fn selection_summary(&self) -> SelectionSummary {
        let selected = self.selection.len();
        if selected == 0 {
            SelectionSummary::None
        } else if selected == self.view.len() {
            SelectionSummary::All
        } else {
            SelectionSummary::Some
        }
    }

    /// Window over the filtered rows for a viewport.
    pub fn window(&self, viewport: &Viewport) -> VisibleWindow {
        viewport.window(self.view.len())
    }

    /// Materialized rows for a viewport, with their layout slots.
    pub fn visible_rows(&self, viewport: &Viewport) -> Vec<WindowRow<'_>> {
        self.window(viewport)
            .rows()
            .filter_map(|slot| {
                self.view.row_at(&self.store, slot.index).map(|row| WindowRow {
                    slot,
                    row,
                    selected: self.selection.is_selected(row.id.as_str()),
                })
            })
            .collect()
    }

    // ===== Selection =====

    /// Toggle one row.
    ///
    /// Selecting a row that is absent or filtered out is ignored so the
    /// selection never escapes the filtered set.
    pub fn select(&mut self, id: &RowId, selected: bool) {
        if selected && !self.is_visible_under_filter(id) {
            debug!(id = %id, "Ignoring selection of row outside filtered set");
            return;
        }
        self.selection.select(id.clone(), selected);
    }

    /// Header checkbox: select every filtered row, or clear.
    pub fn bulk_select(&mut self, selected: bool) {
        if selected {
            self.select_all_filtered();
        } else {
            self.clear_selection();
        }
    }

    /// Replace the selection with every filtered id.
    pub fn select_all_filtered(&mut self) {
        self.selection
            .select_all(self.view.ids(&self.store).cloned());
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ===== Filter =====

    /// Change one filter dimension. Clears the selection.
    ///
    /// An update that would invert the score range is rejected and leaves
    /// both filter and selection untouched.
    pub fn update_filter(&mut self, update: FilterUpdate) -> Result<(), ValidationError> {
        let mut next = self.filter.clone();
        next.apply_update(update)?;
        self.set_filter(next);
        Ok(())
    }

    /// Replace the whole filter. Clears the selection.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.selection.clear();
        self.refresh();
    }

    /// Reset every filter dimension. Clears the selection.
    pub fn clear_filters(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    // ===== Notifications =====

    /// Dismiss a notification by id.
    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    // ===== Coordinator hooks =====

    pub(crate) fn operations_mut(&mut self) -> &mut OperationTracker {
        &mut self.operations
    }

    pub(crate) fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Install the initial dataset.
    pub(crate) fn finish_load(&mut self, rows: Vec<Row>) {
        self.store.load(rows);
        self.selection.clear();
        self.load_state = LoadState::Ready;
        self.refresh();
    }

    /// Record a terminal load failure.
    pub(crate) fn fail_load(&mut self, message: String) {
        self.load_state = LoadState::Failed(message);
    }

    /// Apply a confirmed update. Returns false if the row vanished meanwhile.
    pub(crate) fn apply_patch(&mut self, id: &RowId, patch: &RowPatch) -> bool {
        if !self.store.contains(id.as_str()) {
            return false;
        }
        self.store.update(id.as_str(), patch);
        self.refresh();
        true
    }

    /// Apply confirmed deletes. Returns how many rows were actually removed.
    pub(crate) fn apply_deletes(&mut self, ids: &[RowId]) -> usize {
        let removed = self.store.delete_many(ids);
        self.selection.remove_many(ids);
        self.refresh();
        removed
    }

    fn is_visible_under_filter(&self, id: &RowId) -> bool {
        self.store
            .get(id.as_str())
            .is_some_and(|row| super::filter::matches(row, &self.filter))
    }

    fn refresh(&mut self) {
        if self.view.refresh(&self.store, &self.filter) {
            let pruned = self.selection.reconcile(self.view.ids(&self.store));
            if pruned > 0 {
                debug!(pruned, "Selection reconciled against filtered rows");
            }
        }
    }
}
