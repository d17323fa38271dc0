//! Error types for the rowgrid engine.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary (config, logging, initial load)
//! - [`OperationError`] - Reason a single mutation ended in `Failed`
//!   - [`TransportError`] - Data backend call rejected or unreachable
//!   - [`ValidationError`] - Input rejected before the backend is contacted
//!
//! # Error Recovery Strategy
//!
//! Backend failures never escape the mutation coordinator. They are converted into a
//! failed operation record plus a dismissable notification, and local state is left
//! exactly as it was. Only a failed initial load is terminal.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::RowId;
use thiserror::Error;

/// Top-level application error for the `rowgrid` binary.
///
/// Engine operations do not return this type; it only covers the startup path
/// where a failure means the table cannot be shown at all.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The initial bulk load failed. Terminal: the table is blocked.
    #[error("Failed to load data: {0}")]
    Load(TransportError),

    /// Async runtime could not be started.
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// Invalid argument rejected before touching the engine.
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot could not be encoded as JSON.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Failure of a call to the data backend.
///
/// The engine never assumes a backend call succeeds. Both variants are treated
/// identically by the coordinator; the split exists for logging and messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Backend could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// Backend received the request and rejected it.
    #[error("backend rejected request: {0}")]
    Rejected(String),
}

/// Input rejected locally, before any backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Score outside the inclusive range 0..=100.
    #[error("score {0} is out of range (expected 0-100)")]
    ScoreOutOfRange(i64),

    /// Row identifiers cannot be empty.
    #[error("row id cannot be empty")]
    EmptyRowId,

    /// Row height must be at least one pixel.
    #[error("row height must be greater than zero")]
    ZeroRowHeight,

    /// Score range with `min > max`.
    #[error("invalid score range {min}-{max}")]
    InvalidScoreRange {
        /// Lower bound as given.
        min: u8,
        /// Upper bound as given.
        max: u8,
    },

    /// Role name not in the known set.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// Status name not in the known set.
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

/// Reason recorded when an operation transitions to `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The backend call itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Arguments were rejected before the backend was called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The target row is not in the store.
    #[error("row {0} not found")]
    NotFound(RowId),

    /// The backend completed the call but reported `success: false`.
    #[error("backend reported failure")]
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display_includes_reason() {
        let err = TransportError::Unreachable("connection refused".to_string());
        assert_eq!(err.to_string(), "backend unreachable: connection refused");
    }

    #[test]
    fn validation_error_score_display() {
        let err = ValidationError::ScoreOutOfRange(101);
        let msg = err.to_string();
        assert!(msg.contains("101"));
        assert!(msg.contains("0-100"));
    }

    #[test]
    fn operation_error_from_transport_is_transparent() {
        let err: OperationError = TransportError::Rejected("busy".to_string()).into();
        assert_eq!(err.to_string(), "backend rejected request: busy");
    }

    #[test]
    fn operation_error_from_validation_is_transparent() {
        let err: OperationError = ValidationError::ScoreOutOfRange(-3).into();
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn operation_error_not_found_names_row() {
        let id = RowId::new("user-7").expect("valid id");
        let err = OperationError::NotFound(id);
        assert_eq!(err.to_string(), "row user-7 not found");
    }

    #[test]
    fn app_error_load_wraps_transport() {
        let err = AppError::Load(TransportError::Unreachable("down".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("Failed to load data"));
        assert!(msg.contains("down"));
    }

    #[test]
    fn app_error_from_validation() {
        let err: AppError = ValidationError::ZeroRowHeight.into();
        assert!(err.to_string().contains("row height"));
    }
}
