//! Property tests for the packers and the draw step.
//!
//! 1. Placed frames never overlap and keep the configured gap within a level.
//! 2. A result without overflow lies entirely inside the work area.
//! 3. Packing is deterministic.
//! 4. Appending a rectangle to an overflowing packing keeps it overflowing.
//! 5. Every input index is either placed or reported as unplaced.

use proptest::prelude::*;
use tessel::layout_engine::draw::placements;
use tessel::layout_engine::{Orientation, RectangleDescriptor, TileResult, tile};
use tessel::sys::geometry::Rect;

fn descriptors(max_len: usize) -> impl Strategy<Value = Vec<RectangleDescriptor>> {
    prop::collection::vec((1i32..=700, 1i32..=500), 0..=max_len).prop_map(|sizes| {
        sizes
            .into_iter()
            .enumerate()
            .map(|(index, (w, h))| RectangleDescriptor::new(index, w, h))
            .collect()
    })
}

fn work_area() -> impl Strategy<Value = Rect> {
    (-200i32..=200, -200i32..=200, 200i32..=2000, 200i32..=1200)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

fn frames(result: &TileResult, area: Rect, spacing: i32) -> Vec<Rect> {
    placements(result, area, spacing).into_iter().map(|p| p.frame).collect()
}

proptest! {
    #[test]
    fn placed_frames_do_not_overlap(
        rects in descriptors(24),
        area in work_area(),
        spacing in 0i32..=30,
        orientation in orientation(),
    ) {
        let result = tile(&rects, area, spacing, orientation);
        let frames = frames(&result, area, spacing);
        for (i, a) in frames.iter().enumerate() {
            for b in &frames[i + 1..] {
                prop_assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn row_neighbours_keep_the_gap(
        rects in descriptors(24),
        area in work_area(),
        spacing in 0i32..=30,
    ) {
        let result = tile(&rects, area, spacing, Orientation::Horizontal);
        let frames = placements(&result, area, spacing);
        let mut placed = frames.iter();
        for level in &result.levels {
            let row: Vec<_> = placed.by_ref().take(level.len()).collect();
            for pair in row.windows(2) {
                prop_assert!(pair[1].frame.x() - pair[0].frame.max_x() >= spacing);
            }
        }
    }

    #[test]
    fn results_without_overflow_are_contained(
        rects in descriptors(24),
        area in work_area(),
        spacing in 0i32..=30,
        orientation in orientation(),
    ) {
        let result = tile(&rects, area, spacing, orientation);
        if !result.overflow {
            for frame in frames(&result, area, spacing) {
                prop_assert!(area.contains_rect(&frame), "{:?} outside {:?}", frame, area);
            }
        }
    }

    #[test]
    fn rows_are_contained_even_when_overflowing(
        rects in descriptors(24),
        area in work_area(),
        spacing in 0i32..=30,
    ) {
        let result = tile(&rects, area, spacing, Orientation::Horizontal);
        for frame in frames(&result, area, spacing) {
            prop_assert!(area.contains_rect(&frame));
        }
    }

    #[test]
    fn packing_is_deterministic(
        rects in descriptors(24),
        area in work_area(),
        spacing in 0i32..=30,
        orientation in orientation(),
    ) {
        let first = tile(&rects, area, spacing, orientation);
        let second = tile(&rects, area, spacing, orientation);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn appending_never_clears_overflow(
        rects in descriptors(24),
        extra in (1i32..=700, 1i32..=500),
        area in work_area(),
        spacing in 0i32..=30,
        orientation in orientation(),
    ) {
        let result = tile(&rects, area, spacing, orientation);
        prop_assume!(result.overflow);

        let mut more = rects.clone();
        more.push(RectangleDescriptor::new(rects.len(), extra.0, extra.1));
        prop_assert!(tile(&more, area, spacing, orientation).overflow);
    }

    #[test]
    fn every_index_is_accounted_for(
        rects in descriptors(24),
        area in work_area(),
        spacing in 0i32..=30,
        orientation in orientation(),
    ) {
        let result = tile(&rects, area, spacing, orientation);
        let mut seen: Vec<usize> = result
            .placed()
            .map(|d| d.index)
            .chain(result.unplaced.iter().copied())
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..rects.len()).collect::<Vec<_>>());
        prop_assert_eq!(result.overflow || !result.unplaced.is_empty(), result.overflow);
    }
}

#[test]
fn column_overflow_survives_an_appended_sliver() {
    let area = Rect::new(0, 0, 908, 348);
    let rects: Vec<_> = [(662, 76), (1, 98), (687, 27), (250, 348)]
        .into_iter()
        .enumerate()
        .map(|(index, (w, h))| RectangleDescriptor::new(index, w, h))
        .collect();
    assert!(tile(&rects, area, 10, Orientation::Vertical).overflow);

    let mut more = rects.clone();
    more.push(RectangleDescriptor::new(4, 1, 64));
    assert!(tile(&more, area, 10, Orientation::Vertical).overflow);
}

proptest! {
    #[test]
    fn single_rectangle_is_centered(
        w in 1i32..=200,
        h in 1i32..=200,
        area in work_area(),
        spacing in 0i32..=30,
    ) {
        let rect = RectangleDescriptor::new(0, w, h);
        let result = tile(&[rect], area, spacing, Orientation::Horizontal);
        prop_assert!(!result.overflow);
        prop_assert_eq!(result.levels[0].x, (area.width() - w) / 2 + area.x());
        prop_assert_eq!(result.origin.y, (area.height() - h) / 2 + area.y());
    }
}
