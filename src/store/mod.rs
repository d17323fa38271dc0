//! In-memory row store.
//!
//! Holds the full, unfiltered dataset in insertion order and applies
//! synchronous mutations to it. Asynchronous backend traffic lives in
//! [`crate::state::mutation`], never here.

use crate::model::{Row, RowId, RowPatch};
use std::collections::{HashMap, HashSet};
use tracing::warn;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Ordered collection of rows with O(1) lookup by id.
///
/// # Invariants
/// - Ids are unique.
/// - `index[id] == position of id in rows` for every stored row.
/// - Survivors keep their relative order across deletes.
/// - `version` increases on every load and every effective mutation.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<Row>,
    index: HashMap<RowId, usize>,
    version: u64,
}

impl RowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire dataset.
    ///
    /// Later rows that repeat an earlier id are dropped.
    pub fn load(&mut self, rows: Vec<Row>) {
        let mut kept = Vec::with_capacity(rows.len());
        let mut index = HashMap::with_capacity(rows.len());

        for row in rows {
            if index.contains_key(&row.id) {
                warn!(id = %row.id, "Dropping row with duplicate id during load");
                continue;
            }
            index.insert(row.id.clone(), kept.len());
            kept.push(row);
        }

        self.rows = kept;
        self.index = index;
        self.bump();
    }

    /// Look up a row by id.
    pub fn get(&self, id: &str) -> Option<&Row> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    /// Check whether a row with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Apply a partial update. No-op if the id is absent.
    ///
    /// Returns `true` if the row exists and at least one field changed.
    pub fn update(&mut self, id: &str, patch: &RowPatch) -> bool {
        let Some(&pos) = self.index.get(id) else {
            return false;
        };

        let changed = patch.apply_to(&mut self.rows[pos]);
        if changed {
            self.bump();
        }
        changed
    }

    /// Remove a row. Idempotent: returns `false` if it was already gone.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(pos) = self.index.remove(id) else {
            return false;
        };

        self.rows.remove(pos);
        for row in &self.rows[pos..] {
            if let Some(slot) = self.index.get_mut(&row.id) {
                *slot -= 1;
            }
        }
        self.bump();
        true
    }

    /// Remove every listed id in a single order-preserving pass.
    ///
    /// Absent ids are ignored. Returns the number of rows removed.
    pub fn delete_many<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        let doomed: HashSet<&RowId> = ids
            .into_iter()
            .filter(|id| self.index.contains_key(id.as_str()))
            .collect();

        if doomed.is_empty() {
            return 0;
        }

        let before = self.rows.len();
        self.rows.retain(|row| !doomed.contains(&row.id));
        let removed = before - self.rows.len();

        self.reindex();
        self.bump();
        removed
    }

    /// All rows in store order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All ids in store order.
    pub fn ids(&self) -> impl Iterator<Item = &RowId> {
        self.rows.iter().map(|row| &row.id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Monotonic change counter, used as a cache key by filtered views.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, row) in self.rows.iter().enumerate() {
            self.index.insert(row.id.clone(), pos);
        }
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
