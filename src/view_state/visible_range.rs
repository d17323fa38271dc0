//! Visible window calculation result

/// Contiguous range of filtered rows to materialize.
///
/// Indices are into the *filtered* row sequence, never the full store.
///
/// # Invariants
/// - `first_index <= end_index`
/// - `end_index <= row_count` of the sequence it was computed for
/// - An empty window has `first_index == end_index == 0` when `row_count == 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    /// Index of first materialized row (inclusive).
    pub first_index: usize,
    /// Index one past the last materialized row (exclusive).
    pub end_index: usize,
    /// Row height in pixels, used to position rows.
    pub row_height: u32,
    /// Scroll offset the window was resolved from, after clamping.
    pub scroll_offset: u64,
}

/// One materialized row and its absolute position in the scroll extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualRow {
    /// Index into the filtered row sequence.
    pub index: usize,
    /// Top edge in pixels: `index * row_height`.
    pub offset: u64,
    /// Height in pixels.
    pub height: u32,
}

impl VisibleWindow {
    /// Create new window.
    ///
    /// # Panics
    /// In debug builds, panics if `first_index > end_index`.
    pub fn new(first_index: usize, end_index: usize, row_height: u32, scroll_offset: u64) -> Self {
        debug_assert!(
            first_index <= end_index,
            "first_index {} > end_index {}",
            first_index,
            end_index
        );
        Self {
            first_index,
            end_index,
            row_height,
            scroll_offset,
        }
    }

    /// Inclusive last index, `-1` for an empty window.
    pub fn last_index(&self) -> isize {
        self.end_index as isize - 1
    }

    /// Number of materialized rows.
    pub fn len(&self) -> usize {
        self.end_index - self.first_index
    }

    /// Check if window is empty.
    pub fn is_empty(&self) -> bool {
        self.first_index == self.end_index
    }

    /// Iterate over materialized row indices.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.first_index..self.end_index
    }

    /// Check if a specific row index is materialized.
    pub fn contains(&self, index: usize) -> bool {
        (self.first_index..self.end_index).contains(&index)
    }

    /// Materialized rows with their absolute offsets.
    pub fn rows(&self) -> impl Iterator<Item = VirtualRow> {
        let height = self.row_height;
        self.indices().map(move |index| VirtualRow {
            index,
            offset: index as u64 * u64::from(height),
            height,
        })
    }
}
