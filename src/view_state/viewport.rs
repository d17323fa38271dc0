//! Viewport windower.
//!
//! Given a scroll offset, a uniform row height, the viewport height, the
//! number of filtered rows and an overscan margin, computes the minimal
//! contiguous range of rows to materialize:
//!
//! ```text
//! first = max(0, floor(offset / row_height) - overscan)
//! last  = min(row_count - 1, ceil((offset + viewport_height) / row_height) + overscan)
//! ```

use super::scroll::ScrollPosition;
use super::visible_range::VisibleWindow;
use crate::model::ValidationError;

/// Uniform row height in pixels. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowHeight(u32);

impl RowHeight {
    /// Smart constructor that rejects zero.
    pub fn new(pixels: u32) -> Result<Self, ValidationError> {
        if pixels == 0 {
            Err(ValidationError::ZeroRowHeight)
        } else {
            Ok(Self(pixels))
        }
    }

    /// Raw pixel value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Compute the window for one frame.
///
/// Offsets inside the extent are used as given. An offset at or past the end
/// of the extent (left over from before a filter or delete shrank the
/// sequence) is first clamped to the last full page, so indices are always
/// within `0..row_count`.
pub fn compute_window(
    scroll_offset: u64,
    row_height: RowHeight,
    viewport_height: u32,
    row_count: usize,
    overscan: usize,
) -> VisibleWindow {
    let height = row_height.get();

    if row_count == 0 {
        return VisibleWindow::new(0, 0, height, 0);
    }

    let h = u64::from(height);
    let extent = row_count as u64 * h;
    let offset = if scroll_offset >= extent {
        extent.saturating_sub(u64::from(viewport_height))
    } else {
        scroll_offset
    };

    let first_visible = (offset / h) as usize;
    let bottom = offset + u64::from(viewport_height);
    let last_visible = bottom.div_ceil(h) as usize;

    let last = last_visible.saturating_add(overscan).min(row_count - 1);
    let first = first_visible.saturating_sub(overscan).min(last);

    VisibleWindow::new(first, last + 1, height, offset)
}

/// Scroll state for a virtualized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Current scroll offset in pixels.
    pub scroll_offset: u64,
    /// Visible height in pixels.
    pub viewport_height: u32,
    /// Uniform row height.
    pub row_height: RowHeight,
    /// Extra rows rendered past each visible edge.
    pub overscan: usize,
}

impl Viewport {
    /// Create a viewport scrolled to the top.
    pub fn new(row_height: u32, viewport_height: u32, overscan: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            scroll_offset: 0,
            viewport_height,
            row_height: RowHeight::new(row_height)?,
            overscan,
        })
    }

    /// Builder-style scroll offset setter.
    pub fn with_scroll_offset(mut self, scroll_offset: u64) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    /// Window over a sequence of `row_count` rows.
    pub fn window(&self, row_count: usize) -> VisibleWindow {
        compute_window(
            self.scroll_offset,
            self.row_height,
            self.viewport_height,
            row_count,
            self.overscan,
        )
    }

    /// Total scrollable extent: `row_count * row_height`.
    pub fn total_extent(&self, row_count: usize) -> u64 {
        row_count as u64 * u64::from(self.row_height.get())
    }

    /// Largest offset that does not leave blank space below the last row.
    pub fn max_scroll_offset(&self, row_count: usize) -> u64 {
        self.total_extent(row_count)
            .saturating_sub(u64::from(self.viewport_height))
    }

    /// Absolute top edge of a row.
    pub fn offset_of(&self, index: usize) -> u64 {
        index as u64 * u64::from(self.row_height.get())
    }

    /// Move to a semantic position, storing the resolved offset.
    pub fn scroll_to(&mut self, position: ScrollPosition, row_count: usize) {
        self.scroll_offset =
            position.resolve(self.row_height.get(), self.viewport_height, row_count);
    }

    /// Clamp a stale offset after the row count shrank.
    pub fn clamp_to(&mut self, row_count: usize) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset(row_count));
    }
}
