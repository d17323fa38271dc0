//! Data backend abstraction.
//!
//! The engine consumes exactly one collaborator: something that can load the
//! dataset and confirm mutations. Every call is asynchronous and may fail;
//! the engine never assumes success.
//!
//! The trait is `?Send`: the engine runs on a single logical thread and
//! shares state through `Rc<RefCell<_>>`, so futures never cross threads.

use crate::model::{Row, RowId, Score, Status, TransportError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod generator;
pub mod mock;

pub use generator::generate_rows;
pub use mock::{MockBackend, MockCalls, MockConfig};

/// Backend answer to a bulk delete.
///
/// `success` says whether the request completed. It is independent of
/// whether every id was deleted: a partial result is still `success: true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    /// Request completed.
    pub success: bool,
    /// Ids the backend deleted.
    pub deleted_ids: Vec<RowId>,
    /// Ids the backend could not delete.
    pub failed_ids: Vec<RowId>,
}

/// Remote store contract.
#[async_trait(?Send)]
pub trait DataBackend {
    /// Bulk initial load of `count` rows.
    async fn fetch_all(&self, count: usize) -> Result<Vec<Row>, TransportError>;

    /// Delete one row. `Ok(false)` means the backend refused.
    async fn delete_one(&self, id: &RowId) -> Result<bool, TransportError>;

    /// Set a row's status. `Ok(false)` means the backend refused.
    async fn update_status(&self, id: &RowId, status: Status) -> Result<bool, TransportError>;

    /// Set a row's score. `Ok(false)` means the backend refused.
    async fn update_score(&self, id: &RowId, score: Score) -> Result<bool, TransportError>;

    /// Delete many rows in one request, partitioning them into deleted and failed.
    async fn bulk_delete(&self, ids: &[RowId]) -> Result<BulkDeleteResponse, TransportError>;
}
