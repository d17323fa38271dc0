//! Filter engine.
//!
//! [`apply`] is the pure, stable, single-pass filter over store order.
//! [`FilteredView`] caches its result keyed on `(store version, spec)` so
//! repeated renders with nothing changed cost nothing.

use crate::model::{Role, Row, RowId, Status, ValidationError};
use crate::store::RowStore;
use serde::Serialize;
use tracing::debug;

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

// ===== ScoreRange =====

/// Inclusive score bounds. The default `0..=100` constrains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreRange {
    min: u8,
    max: u8,
}

impl ScoreRange {
    /// Smart constructor: requires `min <= max <= 100`.
    pub fn new(min: u8, max: u8) -> Result<Self, ValidationError> {
        if min > max || max > 100 {
            Err(ValidationError::InvalidScoreRange { min, max })
        } else {
            Ok(Self { min, max })
        }
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> u8 {
        self.max
    }

    /// True if this is the full `0..=100` range.
    pub fn is_full(&self) -> bool {
        *self == Self::default()
    }

    /// Check whether a score lies within the bounds.
    pub fn contains(&self, score: u8) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

// ===== FilterSpec =====

/// Conjunction of the active filter predicates.
///
/// An empty `name_filter`, a `None` role/status, and a full score range
/// each mean "no constraint on this dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against the row name.
    pub name_filter: String,
    /// Exact role match.
    pub role_filter: Option<Role>,
    /// Exact status match.
    pub status_filter: Option<Status>,
    /// Inclusive score bounds.
    pub score_range: ScoreRange,
}

/// Identifies one dimension of a [`FilterSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    /// `name_filter`.
    Name,
    /// `role_filter`.
    Role,
    /// `status_filter`.
    Status,
    /// `score_range`.
    Score,
}

impl FilterField {
    /// Display label for the field.
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Name => "Name",
            FilterField::Role => "Role",
            FilterField::Status => "Status",
            FilterField::Score => "Score",
        }
    }
}

/// One constraining dimension, formatted for display as a removable pill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    /// Which dimension.
    pub field: FilterField,
    /// Human-readable value (`"Developer"`, `"20-80"`, ...).
    pub value: String,
}

/// A change to a single filter dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Set the name substring (empty clears).
    Name(String),
    /// Set or clear the role constraint.
    Role(Option<Role>),
    /// Set or clear the status constraint.
    Status(Option<Status>),
    /// Set the lower score bound.
    ScoreMin(u8),
    /// Set the upper score bound.
    ScoreMax(u8),
    /// Reset one dimension to "no constraint".
    Clear(FilterField),
}

impl FilterSpec {
    /// True if any dimension constrains.
    pub fn is_active(&self) -> bool {
        !self.name_filter.is_empty()
            || self.role_filter.is_some()
            || self.status_filter.is_some()
            || !self.score_range.is_full()
    }

    /// Constraining dimensions in name, role, status, score order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();

        if !self.name_filter.is_empty() {
            active.push(ActiveFilter {
                field: FilterField::Name,
                value: self.name_filter.clone(),
            });
        }
        if let Some(role) = self.role_filter {
            active.push(ActiveFilter {
                field: FilterField::Role,
                value: role.label().to_string(),
            });
        }
        if let Some(status) = self.status_filter {
            active.push(ActiveFilter {
                field: FilterField::Status,
                value: status.label().to_string(),
            });
        }
        if !self.score_range.is_full() {
            active.push(ActiveFilter {
                field: FilterField::Score,
                value: format!("{}-{}", self.score_range.min(), self.score_range.max()),
            });
        }

        active
    }

    /// Apply a single-dimension update.
    ///
    /// Returns `Err` without modifying the spec if the update would produce
    /// an invalid score range.
    pub fn apply_update(&mut self, update: FilterUpdate) -> Result<(), ValidationError> {
        match update {
            FilterUpdate::Name(name) => self.name_filter = name,
            FilterUpdate::Role(role) => self.role_filter = role,
            FilterUpdate::Status(status) => self.status_filter = status,
            FilterUpdate::ScoreMin(min) => {
                self.score_range = ScoreRange::new(min, self.score_range.max())?;
            }
            FilterUpdate::ScoreMax(max) => {
                self.score_range = ScoreRange::new(self.score_range.min(), max)?;
            }
            FilterUpdate::Clear(field) => match field {
                FilterField::Name => self.name_filter.clear(),
                FilterField::Role => self.role_filter = None,
                FilterField::Status => self.status_filter = None,
                FilterField::Score => self.score_range = ScoreRange::default(),
            },
        }
        Ok(())
    }
}

// ===== Matching =====

/// Precomputed matcher: lowercases the name needle once per pass.
struct Matcher<'a> {
    spec: &'a FilterSpec,
    needle: String,
}

impl<'a> Matcher<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        Self {
            spec,
            needle: spec.name_filter.to_lowercase(),
        }
    }

    fn matches(&self, row: &Row) -> bool {
        if !self.needle.is_empty() && !row.name.to_lowercase().contains(&self.needle) {
            return false;
        }
        if self.spec.role_filter.is_some_and(|role| row.role != role) {
            return false;
        }
        if self.spec.status_filter.is_some_and(|status| row.status != status) {
            return false;
        }
        self.spec.score_range.contains(row.score.get())
    }
}

/// Check a single row against a spec.
pub fn matches(row: &Row, spec: &FilterSpec) -> bool {
    Matcher::new(spec).matches(row)
}

/// Positions (into `rows`) of every row passing `spec`, in order.
pub fn apply_indices(rows: &[Row], spec: &FilterSpec) -> Vec<usize> {
    let matcher = Matcher::new(spec);
    rows.iter()
        .enumerate()
        .filter(|(_, row)| matcher.matches(row))
        .map(|(pos, _)| pos)
        .collect()
}

/// Rows passing `spec`, preserving input order.
///
/// Pure and deterministic; `apply(&apply(rows, spec), spec) == apply(rows, spec)`.
pub fn apply(rows: &[Row], spec: &FilterSpec) -> Vec<Row> {
    let matcher = Matcher::new(spec);
    rows.iter().filter(|row| matcher.matches(row)).cloned().collect()
}

// ===== FilteredView =====

/// Cached filter result over a [`RowStore`].
///
/// Stores positions into `store.rows()`. Positions are only meaningful for
/// the store version they were computed against, which is why the cache key
/// includes it.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    positions: Vec<usize>,
    key: Option<(u64, FilterSpec)>,
}

impl FilteredView {
    /// Create an empty, never-computed view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute if the store version or spec changed since the last call.
    ///
    /// Returns `true` if a recompute happened.
    pub fn refresh(&mut self, store: &RowStore, spec: &FilterSpec) -> bool {
        if let Some((version, cached)) = &self.key {
            if *version == store.version() && cached == spec {
                return false;
            }
        }

        self.positions = apply_indices(store.rows(), spec);
        self.key = Some((store.version(), spec.clone()));
        debug!(
            total = store.len(),
            filtered = self.positions.len(),
            version = store.version(),
            "Filter recomputed"
        );
        true
    }

    /// Number of rows passing the filter.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if no row passes.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Row at a filtered index.
    pub fn row_at<'s>(&self, store: &'s RowStore, index: usize) -> Option<&'s Row> {
        self.positions
            .get(index)
            .and_then(|&pos| store.rows().get(pos))
    }

    /// Filtered rows in store order.
    pub fn rows<'s>(&'s self, store: &'s RowStore) -> impl Iterator<Item = &'s Row> + 's {
        self.positions
            .iter()
            .filter_map(move |&pos| store.rows().get(pos))
    }

    /// Filtered ids in store order.
    pub fn ids<'s>(&'s self, store: &'s RowStore) -> impl Iterator<Item = &'s RowId> + 's {
        self.rows(store).map(|row| &row.id)
    }
}
