//! Property-based tests for the viewport windower.
//!
//! Properties under test:
//! - indices are always within `0..row_count`, even for stale offsets
//! - every row intersecting the clamped visible area is materialized
//! - overscan never shrinks the window
//! - offsets inside the extent set `first_index` exactly
//! - `ScrollPosition` resolves inside `[0, max_scroll]`

use proptest::prelude::*;
use rowgrid::view_state::{compute_window, RowHeight, ScrollPosition, Viewport};

fn arb_height() -> impl Strategy<Value = RowHeight> {
    (1u32..200).prop_map(|h| RowHeight::new(h).expect("non-zero"))
}

fn arb_position() -> impl Strategy<Value = ScrollPosition> {
    prop_oneof![
        Just(ScrollPosition::Top),
        Just(ScrollPosition::Bottom),
        any::<u64>().prop_map(ScrollPosition::AtOffset),
        (0usize..1_000_000).prop_map(ScrollPosition::AtRow),
        (-1.0f64..2.0).prop_map(ScrollPosition::Fraction),
    ]
}

proptest! {
    #[test]
    fn window_indices_stay_in_bounds(
        offset in any::<u32>(),
        height in arb_height(),
        viewport_height in 0u32..5_000,
        row_count in 0usize..100_000,
        overscan in 0usize..50,
    ) {
        let window = compute_window(u64::from(offset), height, viewport_height, row_count, overscan);

        prop_assert!(window.first_index <= window.end_index);
        prop_assert!(window.end_index <= row_count);
        if row_count == 0 {
            prop_assert_eq!(window.last_index(), -1);
        } else {
            prop_assert!(!window.is_empty());
        }
    }

    #[test]
    fn visible_rows_are_materialized(
        offset in any::<u32>(),
        height in arb_height(),
        viewport_height in 1u32..5_000,
        row_count in 1usize..100_000,
    ) {
        let h = u64::from(height.get());
        let window = compute_window(u64::from(offset), height, viewport_height, row_count, 0);

        let top = window.scroll_offset;
        let bottom = top + u64::from(viewport_height);
        let first_visible = (top / h) as usize;
        let last_visible = ((bottom.saturating_sub(1)) / h) as usize;

        for index in first_visible..=last_visible.min(row_count - 1) {
            prop_assert!(window.contains(index), "row {} not materialized", index);
        }
    }

    #[test]
    fn overscan_only_widens(
        offset in any::<u32>(),
        height in arb_height(),
        viewport_height in 0u32..5_000,
        row_count in 0usize..10_000,
        overscan in 0usize..50,
    ) {
        let narrow = compute_window(u64::from(offset), height, viewport_height, row_count, 0);
        let wide = compute_window(u64::from(offset), height, viewport_height, row_count, overscan);

        prop_assert!(wide.first_index <= narrow.first_index);
        prop_assert!(wide.end_index >= narrow.end_index);
    }

    #[test]
    fn first_index_follows_offset_inside_extent(
        height in arb_height(),
        viewport_height in 0u32..5_000,
        row_count in 1usize..10_000,
        overscan in 0usize..50,
        fraction in 0.0f64..1.0,
    ) {
        let h = u64::from(height.get());
        let extent = row_count as u64 * h;
        let offset = ((extent as f64 * fraction) as u64).min(extent - 1);
        let window = compute_window(offset, height, viewport_height, row_count, overscan);

        prop_assert_eq!(window.first_index, ((offset / h) as usize).saturating_sub(overscan));
    }

    #[test]
    fn scroll_position_resolves_within_extent(
        position in arb_position(),
        row_height in 1u32..200,
        viewport_height in 0u32..5_000,
        row_count in 0usize..100_000,
    ) {
        let mut viewport = Viewport::new(row_height, viewport_height, 5).expect("valid viewport");
        viewport.scroll_to(position, row_count);

        prop_assert!(viewport.scroll_offset <= viewport.max_scroll_offset(row_count));
    }
}

#[test]
fn reference_scroll_scenario() {
    let viewport = Viewport::new(72, 700, 5)
        .expect("valid viewport")
        .with_scroll_offset(720);
    let window = viewport.window(1000);

    assert_eq!(window.first_index, 5);
    assert_eq!(window.last_index(), 25);
}

#[test]
fn hundred_thousand_rows_window_is_small() {
    let viewport = Viewport::new(72, 700, 5)
        .expect("valid viewport")
        .with_scroll_offset(3_600_000);
    let window = viewport.window(100_000);

    assert!(window.len() <= 22);
    assert!(window.contains(50_000));
}
