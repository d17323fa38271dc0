//! Table state engine.
//!
//! Filtering, selection and operation tracking are synchronous and testable
//! without a backend. Only the mutation coordinator awaits anything.

pub mod filter;
pub mod mutation;
pub mod notifications;
pub mod operations;
pub mod selection;
pub mod table_state;

// Re-export for convenience
pub use filter::{ActiveFilter, FilterField, FilterSpec, FilterUpdate, FilteredView, ScoreRange};
pub use mutation::{BulkDeleteReport, MutationCoordinator};
pub use notifications::{Notification, NotificationLevel, Notifications};
pub use operations::{OperationId, OperationKind, OperationRecord, OperationStatus, OperationTracker};
pub use selection::SelectionTracker;
pub use table_state::{LoadState, SelectionSummary, TableState, WindowRow};
