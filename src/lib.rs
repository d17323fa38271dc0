//! rowgrid
//!
//! Headless engine for a virtualized table over a large dataset: filtering,
//! selection, viewport windowing and backend-confirmed mutations.
//!
//! The synchronous core (`store`, `state`, `view_state`) is pure and testable
//! without a backend. `state::mutation` is the only async boundary; it talks
//! to a [`backend::DataBackend`].

pub mod backend;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
pub mod view_state;

// Snapshot and argument glue for the binary
pub mod integration;

#[cfg(test)]
mod test_harness;
