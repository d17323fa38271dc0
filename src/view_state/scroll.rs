//! Semantic scroll position

/// Scroll intent that survives changes in row count.
///
/// # Resolution
/// All variants resolve to a pixel offset via [`ScrollPosition::resolve`],
/// clamped to `[0, max(0, extent - viewport_height)]`. A position that was
/// valid for 100,000 rows stays safe after a filter leaves ten.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollPosition {
    /// Very top.
    #[default]
    Top,

    /// Very bottom: `extent - viewport_height`, clamped to 0.
    Bottom,

    /// Absolute pixel offset from the top.
    AtOffset(u64),

    /// Put the given row at the top edge. Indices past the end clamp to
    /// the last row.
    AtRow(usize),

    /// Proportional position, 0.0 = top, 1.0 = bottom. Clamped to [0, 1].
    Fraction(f64),
}

impl ScrollPosition {
    /// Resolve to an absolute pixel offset.
    ///
    /// # Arguments
    /// - `row_height`: Uniform row height in pixels
    /// - `viewport_height`: Height of the visible area in pixels
    /// - `row_count`: Rows in the (filtered) sequence
    pub fn resolve(&self, row_height: u32, viewport_height: u32, row_count: usize) -> u64 {
        let extent = row_count as u64 * u64::from(row_height);
        let max_offset = extent.saturating_sub(u64::from(viewport_height));

        let raw = match *self {
            ScrollPosition::Top => 0,
            ScrollPosition::Bottom => max_offset,
            ScrollPosition::AtOffset(offset) => offset,
            ScrollPosition::AtRow(index) => {
                let last = row_count.saturating_sub(1);
                index.min(last) as u64 * u64::from(row_height)
            }
            ScrollPosition::Fraction(fraction) => {
                let clamped = if fraction.is_nan() {
                    0.0
                } else {
                    fraction.clamp(0.0, 1.0)
                };
                (clamped * max_offset as f64).round() as u64
            }
        };

        raw.min(max_offset)
    }
}
