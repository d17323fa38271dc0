//! Tests for TableState consistency rules.

use super::*;
use crate::model::{Role, Status};
use crate::state::filter::{FilterField, ScoreRange};
use crate::test_harness::{five_rows, id, ids};

fn state() -> TableState {
    TableState::with_rows(five_rows())
}

fn selected(state: &TableState) -> Vec<RowId> {
    state.selection().ids()
}

// ===== Loading =====

#[test]
fn new_state_is_loading_and_empty() {
    let state = TableState::default();
    assert_eq!(state.load_state(), &LoadState::Loading);
    assert_eq!(state.total_count(), 0);
    assert_eq!(state.filtered_count(), 0);
}

#[test]
fn with_rows_is_ready_and_unfiltered() {
    let state = state();
    assert_eq!(state.load_state(), &LoadState::Ready);
    assert_eq!(state.total_count(), 5);
    assert_eq!(state.filtered_count(), 5);
    assert!(!state.has_active_filters());
}

#[test]
fn fail_load_is_recorded() {
    let mut state = TableState::default();
    state.fail_load("backend unreachable".to_string());
    assert_eq!(
        state.load_state(),
        &LoadState::Failed("backend unreachable".to_string())
    );
}

// ===== Filtering =====

#[test]
fn status_filter_counts() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::Status(Some(Status::Active)))
        .expect("valid update");

    assert_eq!(state.filtered_count(), 3);
    assert_eq!(state.total_count(), 5);
    let names: Vec<_> = state.filtered_rows().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alice Johnson", "Carol Davis", "Eve Martinez"]);
}

#[test]
fn filter_change_clears_selection() {
    let mut state = state();
    state.select(&id("user-1"), true);
    state.select(&id("user-2"), true);

    state
        .update_filter(FilterUpdate::Name("a".to_string()))
        .expect("valid update");

    assert!(state.selection().is_empty());
}

#[test]
fn filter_change_clears_selection_even_if_rows_still_match() {
    let mut state = state();
    state.select(&id("user-3"), true);

    // Carol Davis is a Developer, so she still passes.
    state
        .update_filter(FilterUpdate::Role(Some(Role::Developer)))
        .expect("valid update");

    assert!(state.selection().is_empty());
    assert_eq!(state.filtered_count(), 2);
}

#[test]
fn inverted_score_range_rejected_without_side_effects() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::ScoreMax(40))
        .expect("valid update");
    state.select(&id("user-1"), true);

    let err = state.update_filter(FilterUpdate::ScoreMin(60));

    assert_eq!(err, Err(ValidationError::InvalidScoreRange { min: 60, max: 40 }));
    assert_eq!(state.filter().score_range, ScoreRange::new(0, 40).expect("valid"));
    assert_eq!(selected(&state), ids(&["user-1"]));
}

#[test]
fn active_filters_and_clear() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::Role(Some(Role::Developer)))
        .expect("valid update");
    state
        .update_filter(FilterUpdate::ScoreMin(20))
        .expect("valid update");

    let fields: Vec<_> = state.active_filters().iter().map(|f| f.field).collect();
    assert_eq!(fields, vec![FilterField::Role, FilterField::Score]);

    state.clear_filters();
    assert!(!state.has_active_filters());
    assert_eq!(state.filtered_count(), 5);
}

// ===== Selection =====

#[test]
fn selecting_filtered_out_row_is_ignored() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::Status(Some(Status::Active)))
        .expect("valid update");

    state.select(&id("user-2"), true);
    state.select(&id("user-404"), true);

    assert!(state.selection().is_empty());
}

#[test]
fn deselect_works_for_any_id() {
    let mut state = state();
    state.select(&id("user-1"), true);
    state.select(&id("user-1"), false);
    assert!(state.selection().is_empty());
}

#[test]
fn bulk_select_covers_filtered_rows_only() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::Status(Some(Status::Active)))
        .expect("valid update");

    state.bulk_select(true);
    assert_eq!(selected(&state), ids(&["user-1", "user-3", "user-5"]));
    assert_eq!(state.selection_summary(), SelectionSummary::All);

    state.bulk_select(false);
    assert_eq!(state.selection_summary(), SelectionSummary::None);
}

#[test]
fn selection_summary_partial() {
    let mut state = state();
    state.select(&id("user-2"), true);
    assert_eq!(state.selection_summary(), SelectionSummary::Some);
}

#[test]
fn selection_summary_none_when_filtered_set_empty() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::Name("zzz".to_string()))
        .expect("valid update");
    state.bulk_select(true);
    assert_eq!(state.selection_summary(), SelectionSummary::None);
}

// ===== Coordinator hooks =====

#[test]
fn patch_that_drops_row_from_filter_prunes_selection() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::Status(Some(Status::Active)))
        .expect("valid update");
    state.bulk_select(true);

    assert!(state.apply_patch(&id("user-3"), &RowPatch::status(Status::Suspended)));

    assert_eq!(state.filtered_count(), 2);
    assert_eq!(selected(&state), ids(&["user-1", "user-5"]));
}

#[test]
fn patch_on_missing_row_is_noop() {
    let mut state = state();
    let version = state.store().version();
    assert!(!state.apply_patch(&id("user-99"), &RowPatch::status(Status::Active)));
    assert_eq!(state.store().version(), version);
}

#[test]
fn apply_deletes_updates_store_view_and_selection() {
    let mut state = state();
    state.bulk_select(true);

    let removed = state.apply_deletes(&ids(&["user-1", "user-4", "user-99"]));

    assert_eq!(removed, 2);
    assert_eq!(state.total_count(), 3);
    assert_eq!(state.filtered_count(), 3);
    assert_eq!(selected(&state), ids(&["user-2", "user-3", "user-5"]));
}

// ===== Windowing =====

#[test]
fn visible_rows_follow_filtered_sequence() {
    let mut state = state();
    state
        .update_filter(FilterUpdate::Status(Some(Status::Active)))
        .expect("valid update");
    state.select(&id("user-3"), true);

    let viewport = Viewport::new(72, 700, 5).expect("valid viewport");
    let rows = state.visible_rows(&viewport);

    let got: Vec<_> = rows
        .iter()
        .map(|r| (r.slot.index, r.slot.offset, r.row.id.as_str(), r.selected))
        .collect();
    assert_eq!(
        got,
        vec![
            (0, 0, "user-1", false),
            (1, 72, "user-3", true),
            (2, 144, "user-5", false),
        ]
    );
}

#[test]
fn stale_offset_after_filter_stays_in_bounds() {
    let mut state = TableState::with_rows(crate::backend::generate_rows(1_000, 1));
    let mut viewport = Viewport::new(72, 700, 5).expect("valid viewport");
    viewport.scroll_to(crate::view_state::ScrollPosition::Bottom, state.total_count());

    state
        .update_filter(FilterUpdate::ScoreMax(1))
        .expect("valid update");

    let window = state.window(&viewport);
    assert!(window.end_index <= state.filtered_count());
    assert_eq!(state.visible_rows(&viewport).len(), window.len());
}

#[test]
fn dismiss_notification_delegates() {
    let mut state = state();
    let id = state.notifications_mut().success("done");
    assert!(state.dismiss_notification(id));
    assert!(state.notifications().is_empty());
}
