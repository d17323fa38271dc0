//! Pure core integration functions.
//!
//! Glue between the engine and the binary: turns CLI-style filter arguments
//! into a [`FilterSpec`], and captures a serializable snapshot of what a
//! presentation layer would draw. Nothing here performs I/O.

use crate::model::{Role, Row, Status, ValidationError};
use crate::state::{
    ActiveFilter, BulkDeleteReport, FilterSpec, LoadState, Notification, ScoreRange,
    SelectionSummary, TableState,
};
use crate::view_state::Viewport;
use serde::Serialize;
use std::fmt::Write as _;

/// Raw filter arguments as they arrive from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Name substring.
    pub name: Option<String>,
    /// Role, lowercase.
    pub role: Option<String>,
    /// Status, lowercase.
    pub status: Option<String>,
    /// Lower score bound.
    pub score_min: Option<u8>,
    /// Upper score bound.
    pub score_max: Option<u8>,
}

/// Build a filter spec, validating every dimension.
pub fn filter_spec_from_args(args: &FilterArgs) -> Result<FilterSpec, ValidationError> {
    let role_filter = args.role.as_deref().map(str::parse::<Role>).transpose()?;
    let status_filter = args
        .status
        .as_deref()
        .map(str::parse::<Status>)
        .transpose()?;
    let score_range = ScoreRange::new(
        args.score_min.unwrap_or(ScoreRange::default().min()),
        args.score_max.unwrap_or(ScoreRange::default().max()),
    )?;

    Ok(FilterSpec {
        name_filter: args.name.clone().unwrap_or_default(),
        role_filter,
        status_filter,
        score_range,
    })
}

/// Geometry of the materialized window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    /// First materialized filtered index.
    pub first_index: usize,
    /// Last materialized filtered index, `-1` when empty.
    pub last_index: isize,
    /// Scroll offset after clamping.
    pub scroll_offset: u64,
    /// Total scrollable height.
    pub total_extent: u64,
}

/// One materialized row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSnapshot {
    /// Index within the filtered sequence.
    pub index: usize,
    /// Absolute top offset in pixels.
    pub offset: u64,
    /// Selection checkbox state.
    pub selected: bool,
    /// Row data.
    pub row: Row,
}

/// Everything a presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    /// Initial-load lifecycle.
    pub load_state: LoadState,
    /// Rows in the store.
    pub total_count: usize,
    /// Rows passing the filter.
    pub filtered_count: usize,
    /// Selected rows.
    pub selected_count: usize,
    /// Header checkbox state.
    pub selection: SelectionSummary,
    /// Filter pills.
    pub active_filters: Vec<ActiveFilter>,
    /// Window geometry.
    pub window: WindowSnapshot,
    /// Materialized rows.
    pub rows: Vec<RowSnapshot>,
    /// Pending notifications.
    pub notifications: Vec<Notification>,
    /// Result of a bulk delete, if one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_delete: Option<BulkDeleteReport>,
}

/// Capture the state as seen through `viewport`.
pub fn snapshot(state: &TableState, viewport: &Viewport) -> TableSnapshot {
    let window = state.window(viewport);
    let filtered = state.filtered_count();

    TableSnapshot {
        load_state: state.load_state().clone(),
        total_count: state.total_count(),
        filtered_count: filtered,
        selected_count: state.selection().len(),
        selection: state.selection_summary(),
        active_filters: state.active_filters(),
        window: WindowSnapshot {
            first_index: window.first_index,
            last_index: window.last_index(),
            scroll_offset: window.scroll_offset,
            total_extent: viewport.total_extent(filtered),
        },
        rows: state
            .visible_rows(viewport)
            .into_iter()
            .map(|r| RowSnapshot {
                index: r.slot.index,
                offset: r.slot.offset,
                selected: r.selected,
                row: r.row.clone(),
            })
            .collect(),
        notifications: state.notifications().iter().cloned().collect(),
        bulk_delete: None,
    }
}

/// Plain-text rendering of a snapshot.
pub fn render_text(snapshot: &TableSnapshot) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Showing {} of {} records ({} selected)",
        snapshot.filtered_count, snapshot.total_count, snapshot.selected_count
    );
    if !snapshot.active_filters.is_empty() {
        let pills: Vec<String> = snapshot
            .active_filters
            .iter()
            .map(|f| format!("{}: {}", f.field.label(), f.value))
            .collect();
        let _ = writeln!(out, "Filters: {}", pills.join(", "));
    }
    let _ = writeln!(
        out,
        "Window: {}..={} at offset {} of {}px",
        snapshot.window.first_index,
        snapshot.window.last_index,
        snapshot.window.scroll_offset,
        snapshot.window.total_extent
    );
    if let Some(report) = &snapshot.bulk_delete {
        let _ = writeln!(
            out,
            "Bulk delete: {} deleted, {} failed{}",
            report.deleted_count,
            report.failed_count,
            if report.success { "" } else { " (request failed)" }
        );
    }

    for r in &snapshot.rows {
        let _ = writeln!(
            out,
            "{} {:>6} {:<12} {:<24} {:<10} {:<10} {:>3}",
            if r.selected { "[x]" } else { "[ ]" },
            r.index,
            r.row.id.as_str(),
            r.row.name,
            r.row.role.label(),
            r.row.status.label(),
            r.row.score.get()
        );
    }

    for n in &snapshot.notifications {
        let _ = writeln!(out, "{:?}: {}", n.level, n.message);
    }

    out
}
