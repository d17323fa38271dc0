//! Mutation coordinator.
//!
//! Issues asynchronous backend calls and applies their results to
//! [`TableState`]. Updates are pessimistic: local state changes only after
//! the backend confirms. Failures leave the store untouched and surface as a
//! `Failed` operation plus an error notification, never as an `Err`.
//!
//! Each call borrows the state twice: once to validate and record `Pending`,
//! and once after the backend answers to apply the outcome. The borrow is
//! never held across an `.await`, so any number of operations may be in
//! flight on the same thread.

use super::operations::{OperationId, OperationKind, OperationStatus};
use super::table_state::TableState;
use crate::backend::DataBackend;
use crate::model::{OperationError, RowId, RowPatch, Score, Status, TransportError};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of a bulk delete, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteReport {
    /// The backend request completed.
    pub success: bool,
    /// Requested rows the backend deleted.
    pub deleted_count: usize,
    /// Requested rows that were not deleted.
    pub failed_count: usize,
}

/// Applies backend-confirmed mutations to shared table state.
pub struct MutationCoordinator {
    state: Rc<RefCell<TableState>>,
    backend: Rc<dyn DataBackend>,
}

impl MutationCoordinator {
    /// Coordinate mutations of `state` against `backend`.
    pub fn new(state: Rc<RefCell<TableState>>, backend: Rc<dyn DataBackend>) -> Self {
        Self { state, backend }
    }

    /// Shared handle to the state this coordinator mutates.
    pub fn state(&self) -> &Rc<RefCell<TableState>> {
        &self.state
    }

    /// Initial bulk load. Failure is terminal for the table.
    pub async fn load(&self, count: usize) -> Result<usize, TransportError> {
        let op = self
            .state
            .borrow_mut()
            .operations_mut()
            .begin(OperationKind::Load { count });
        let started = Instant::now();

        let result = self.backend.fetch_all(count).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(rows) => {
                state.finish_load(rows);
                state.operations_mut().finish(op, OperationStatus::Applied);
                let loaded = state.total_count();
                info!(
                    rows = loaded,
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Dataset loaded"
                );
                Ok(loaded)
            }
            Err(err) => {
                warn!(error = %err, "Initial load failed");
                state.fail_load(err.to_string());
                state
                    .operations_mut()
                    .finish(op, OperationStatus::Failed(err.clone().into()));
                state.notifications_mut().error("Failed to load data");
                Err(err)
            }
        }
    }

    /// Delete one row. Returns true once the backend confirmed and the row
    /// is gone locally.
    pub async fn delete_record(&self, id: &RowId) -> bool {
        let (op, name) = {
            let mut state = self.state.borrow_mut();
            let name = state.store().get(id.as_str()).map(|row| row.name.clone());
            let op = self.begin(&mut state, OperationKind::Delete(id.clone()), id);
            match name {
                Some(name) => (op, name),
                None => return not_found(&mut state, op, id),
            }
        };

        let result = self.backend.delete_one(id).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(true) => {
                state.apply_deletes(std::slice::from_ref(id));
                applied(&mut state, op, format!("{name} has been deleted successfully"))
            }
            Ok(false) => failed(
                &mut state,
                op,
                OperationError::Rejected,
                "Failed to delete record. Please try again.",
            ),
            Err(err) => failed(
                &mut state,
                op,
                err.into(),
                "An error occurred while deleting the record",
            ),
        }
    }

    /// Change a row's status.
    ///
    /// Setting the status the row already has succeeds without a backend call.
    pub async fn update_status(&self, id: &RowId, status: Status) -> bool {
        let (op, name) = {
            let mut state = self.state.borrow_mut();
            let current = state
                .store()
                .get(id.as_str())
                .map(|row| (row.status, row.name.clone()));
            let op = self.begin(&mut state, OperationKind::UpdateStatus(id.clone(), status), id);
            match current {
                None => return not_found(&mut state, op, id),
                Some((existing, _)) if existing == status => {
                    debug!(id = %id, %status, "Status unchanged, skipping backend");
                    state.operations_mut().finish(op, OperationStatus::Applied);
                    return true;
                }
                Some((_, name)) => (op, name),
            }
        };

        let result = self.backend.update_status(id, status).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(true) => {
                if !state.apply_patch(id, &RowPatch::status(status)) {
                    return not_found(&mut state, op, id);
                }
                applied(&mut state, op, format!("Status updated to {status} for {name}"))
            }
            Ok(false) => failed(
                &mut state,
                op,
                OperationError::Rejected,
                "Failed to update status. Please try again.",
            ),
            Err(err) => failed(
                &mut state,
                op,
                err.into(),
                "An error occurred while updating status",
            ),
        }
    }

    /// Change a row's score.
    ///
    /// Values outside `0..=100` fail validation before the backend is called.
    /// Setting the score the row already has succeeds without a backend call.
    pub async fn update_score(&self, id: &RowId, score: i64) -> bool {
        let (op, name, score) = {
            let mut state = self.state.borrow_mut();
            let current = state
                .store()
                .get(id.as_str())
                .map(|row| (row.score, row.name.clone()));
            let op = self.begin(&mut state, OperationKind::UpdateScore(id.clone(), score), id);

            let score = match Score::new(score) {
                Ok(score) => score,
                Err(err) => {
                    return failed(&mut state, op, err.into(), "Score must be between 0 and 100")
                }
            };
            match current {
                None => return not_found(&mut state, op, id),
                Some((existing, _)) if existing == score => {
                    debug!(id = %id, %score, "Score unchanged, skipping backend");
                    state.operations_mut().finish(op, OperationStatus::Applied);
                    return true;
                }
                Some((_, name)) => (op, name, score),
            }
        };

        let result = self.backend.update_score(id, score).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(true) => {
                if !state.apply_patch(id, &RowPatch::score(score)) {
                    return not_found(&mut state, op, id);
                }
                applied(&mut state, op, format!("Score updated to {score} for {name}"))
            }
            Ok(false) => failed(
                &mut state,
                op,
                OperationError::Rejected,
                "Failed to update score. Please try again.",
            ),
            Err(err) => failed(
                &mut state,
                op,
                err.into(),
                "An error occurred while updating score",
            ),
        }
    }

    /// Delete many rows in one backend request.
    ///
    /// Exactly the requested ids the backend reports as deleted are removed
    /// from store and selection; failed ids stay put and stay selected.
    /// Repeated ids are requested and counted once.
    pub async fn bulk_delete(&self, ids: &[RowId]) -> BulkDeleteReport {
        let mut unique = HashSet::new();
        let ids: Vec<RowId> = ids
            .iter()
            .filter(|id| unique.insert(*id))
            .cloned()
            .collect();
        if ids.is_empty() {
            return BulkDeleteReport {
                success: true,
                deleted_count: 0,
                failed_count: 0,
            };
        }

        let op = self
            .state
            .borrow_mut()
            .operations_mut()
            .begin(OperationKind::BulkDelete(unique.into_iter().cloned().collect()));

        let result = self.backend.bulk_delete(&ids).await;

        let mut state = self.state.borrow_mut();
        let response = match result {
            Ok(response) if response.success => response,
            Ok(_) => {
                failed(
                    &mut state,
                    op,
                    OperationError::Rejected,
                    "Failed to delete records. Please try again.",
                );
                return transport_failure(&ids);
            }
            Err(err) => {
                failed(
                    &mut state,
                    op,
                    err.into(),
                    "An error occurred while deleting records",
                );
                return transport_failure(&ids);
            }
        };

        let requested: HashSet<&RowId> = ids.iter().collect();
        let mut seen = HashSet::new();
        let confirmed: Vec<RowId> = response
            .deleted_ids
            .into_iter()
            .filter(|id| requested.contains(id) && seen.insert(id.clone()))
            .collect();
        let ignored = response.failed_ids.len();

        state.apply_deletes(&confirmed);
        state.operations_mut().finish(op, OperationStatus::Applied);

        let report = BulkDeleteReport {
            success: true,
            deleted_count: confirmed.len(),
            failed_count: ids.len().saturating_sub(confirmed.len()),
        };
        info!(
            requested = ids.len(),
            deleted = report.deleted_count,
            failed = report.failed_count,
            reported_failed = ignored,
            "Bulk delete finished"
        );

        if report.deleted_count > 0 {
            state
                .notifications_mut()
                .success(format!("Deleted {} records", report.deleted_count));
        }
        if report.failed_count > 0 {
            state
                .notifications_mut()
                .error(format!("Failed to delete {} records", report.failed_count));
        }
        report
    }

    /// Bulk delete whatever is currently selected.
    pub async fn bulk_delete_selected(&self) -> BulkDeleteReport {
        let ids = self.state.borrow().selection().ids();
        self.bulk_delete(&ids).await
    }

    fn begin(&self, state: &mut TableState, kind: OperationKind, id: &RowId) -> OperationId {
        let overlapping = state.operations().pending_for(id).count();
        if overlapping > 0 {
            debug!(id = %id, overlapping, "Operation started while another is pending for the same row");
        }
        let op = state.operations_mut().begin(kind);
        debug!(op = op.get(), id = %id, "Operation pending");
        op
    }
}

fn applied(state: &mut TableState, op: OperationId, message: String) -> bool {
    debug!(op = op.get(), "Operation applied");
    state.operations_mut().finish(op, OperationStatus::Applied);
    state.notifications_mut().success(message);
    true
}

fn failed(state: &mut TableState, op: OperationId, reason: OperationError, message: &str) -> bool {
    warn!(op = op.get(), reason = %reason, "Operation failed");
    state
        .operations_mut()
        .finish(op, OperationStatus::Failed(reason));
    state.notifications_mut().error(message);
    false
}

fn not_found(state: &mut TableState, op: OperationId, id: &RowId) -> bool {
    failed(
        state,
        op,
        OperationError::NotFound(id.clone()),
        "Record not found",
    )
}

fn transport_failure(ids: &[RowId]) -> BulkDeleteReport {
    BulkDeleteReport {
        success: false,
        deleted_count: 0,
        failed_count: ids.len(),
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
