//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod row;

// Re-export for convenience
pub use error::{AppError, OperationError, TransportError, ValidationError};
pub use identifiers::RowId;
pub use row::{Role, Row, RowPatch, Score, Status};
