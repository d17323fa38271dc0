//! View-state layer - scrolling and visible window calculation
//!
//! This module decides which slice of the filtered row sequence is
//! materialized for a given scroll position. It knows nothing about rows
//! themselves, only counts and pixel geometry.
//!
//! # Module Structure
//!
//! - `viewport`: Viewport, RowHeight and the `compute_window` windower
//! - `visible_range`: VisibleWindow / VirtualRow - result of windowing
//! - `scroll`: ScrollPosition - semantic scroll intent with clamping

pub mod scroll;
pub mod viewport;
pub mod visible_range;

pub use scroll::ScrollPosition;
pub use viewport::{compute_window, RowHeight, Viewport};
pub use visible_range::{VirtualRow, VisibleWindow};
