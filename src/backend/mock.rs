//! In-memory mock backend.
//!
//! Stands in for a real service: generates the dataset on load, sleeps for a
//! configurable latency on every call, and fails on demand. Failure injection
//! comes in three forms:
//!
//! - `fail_ids`: mutations on these ids answer `success: false`
//! - `transport_down`: every call returns a [`TransportError`]
//! - `failure_rate`: seeded per-id failure probability for bulk delete
//!
//! Tests can also script the exact next bulk delete response.

use super::{generate_rows, BulkDeleteResponse, DataBackend};
use crate::model::{Row, RowId, Score, Status, TransportError};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// Mock backend tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct MockConfig {
    /// Delay before `fetch_all` answers.
    pub load_latency: Duration,
    /// Delay before every mutation answers.
    pub mutation_latency: Duration,
    /// Per-id failure probability in bulk delete, clamped to [0, 1].
    pub failure_rate: f64,
    /// Seed for data generation and failure sampling.
    pub seed: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            load_latency: Duration::ZERO,
            mutation_latency: Duration::ZERO,
            failure_rate: 0.0,
            seed: 42,
        }
    }
}

/// Per-method call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockCalls {
    /// `fetch_all` calls.
    pub fetch_all: usize,
    /// `delete_one` calls.
    pub delete_one: usize,
    /// `update_status` calls.
    pub update_status: usize,
    /// `update_score` calls.
    pub update_score: usize,
    /// `bulk_delete` calls.
    pub bulk_delete: usize,
}

/// Configurable fake [`DataBackend`].
#[derive(Debug)]
pub struct MockBackend {
    config: MockConfig,
    rng: RefCell<StdRng>,
    fail_ids: RefCell<HashSet<RowId>>,
    transport_down: Cell<bool>,
    scripted_bulk: RefCell<Option<BulkDeleteResponse>>,
    calls: Cell<MockCalls>,
}

impl MockBackend {
    /// Create a backend with the given tuning.
    pub fn new(config: MockConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng: RefCell::new(rng),
            fail_ids: RefCell::new(HashSet::new()),
            transport_down: Cell::new(false),
            scripted_bulk: RefCell::new(None),
            calls: Cell::new(MockCalls::default()),
        }
    }

    /// Make mutations on these ids answer `success: false`.
    pub fn with_fail_ids<I>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = RowId>,
    {
        self.fail_ids.borrow_mut().extend(ids);
        self
    }

    /// Script the response to the next bulk delete.
    pub fn with_bulk_response(self, response: BulkDeleteResponse) -> Self {
        *self.scripted_bulk.borrow_mut() = Some(response);
        self
    }

    /// Toggle simulated outage at runtime.
    pub fn set_transport_down(&self, down: bool) {
        self.transport_down.set(down);
    }

    /// Snapshot of call counters.
    pub fn calls(&self) -> MockCalls {
        self.calls.get()
    }

    fn record(&self, bump: impl FnOnce(&mut MockCalls)) {
        let mut calls = self.calls.get();
        bump(&mut calls);
        self.calls.set(calls);
    }

    async fn round_trip(&self, latency: Duration) -> Result<(), TransportError> {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if self.transport_down.get() {
            return Err(TransportError::Unreachable("mock backend is down".to_string()));
        }
        Ok(())
    }

    fn accepts(&self, id: &RowId) -> bool {
        !self.fail_ids.borrow().contains(id)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

#[async_trait(?Send)]
impl DataBackend for MockBackend {
    async fn fetch_all(&self, count: usize) -> Result<Vec<Row>, TransportError> {
        self.record(|c| c.fetch_all += 1);
        self.round_trip(self.config.load_latency).await?;
        Ok(generate_rows(count, self.config.seed))
    }

    async fn delete_one(&self, id: &RowId) -> Result<bool, TransportError> {
        self.record(|c| c.delete_one += 1);
        self.round_trip(self.config.mutation_latency).await?;
        Ok(self.accepts(id))
    }

    async fn update_status(&self, id: &RowId, _status: Status) -> Result<bool, TransportError> {
        self.record(|c| c.update_status += 1);
        self.round_trip(self.config.mutation_latency).await?;
        Ok(self.accepts(id))
    }

    async fn update_score(&self, id: &RowId, _score: Score) -> Result<bool, TransportError> {
        self.record(|c| c.update_score += 1);
        self.round_trip(self.config.mutation_latency).await?;
        Ok(self.accepts(id))
    }

    async fn bulk_delete(&self, ids: &[RowId]) -> Result<BulkDeleteResponse, TransportError> {
        self.record(|c| c.bulk_delete += 1);
        self.round_trip(self.config.mutation_latency).await?;

        if let Some(scripted) = self.scripted_bulk.borrow_mut().take() {
            return Ok(scripted);
        }

        let rate = if self.config.failure_rate.is_nan() {
            0.0
        } else {
            self.config.failure_rate.clamp(0.0, 1.0)
        };
        let mut rng = self.rng.borrow_mut();
        let (deleted_ids, failed_ids): (Vec<RowId>, Vec<RowId>) = ids
            .iter()
            .cloned()
            .partition(|id| self.accepts(id) && !rng.random_bool(rate));

        debug!(
            deleted = deleted_ids.len(),
            failed = failed_ids.len(),
            "Mock bulk delete partitioned"
        );

        Ok(BulkDeleteResponse {
            success: true,
            deleted_ids,
            failed_ids,
        })
    }
}
