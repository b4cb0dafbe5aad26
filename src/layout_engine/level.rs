use serde::Serialize;

use super::descriptor::RectangleDescriptor;
use super::systems::Orientation;

/// One row (or column, for vertical packing) of rectangles.
///
/// `width` and `height` are the bounding box of the contained rectangles,
/// spacing included. `x`/`y` stay zero until the packer positions the level
/// once every rectangle has been assigned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Level {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    area: i64,
    rects: Vec<RectangleDescriptor>,
}

impl Level {
    pub fn rects(&self) -> &[RectangleDescriptor] { &self.rects }

    pub fn len(&self) -> usize { self.rects.len() }

    pub fn is_empty(&self) -> bool { self.rects.is_empty() }

    /// Sum of the contained rectangles' areas, spacing excluded.
    pub fn area(&self) -> i64 { self.area }

    /// Extent along the packing direction: width for rows, height for columns.
    pub fn extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Extent across the packing direction: height for rows, width for columns.
    pub fn thickness(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }

    fn push(&mut self, rect: RectangleDescriptor, orientation: Orientation, spacing: i32) {
        let gap = if self.rects.is_empty() { 0 } else { spacing };
        match orientation {
            Orientation::Horizontal => {
                self.width += gap + rect.width;
                self.height = self.height.max(rect.height);
            }
            Orientation::Vertical => {
                self.height += gap + rect.height;
                self.width = self.width.max(rect.width);
            }
        }
        self.area += rect.area();
        self.rects.push(rect);
    }
}

/// Partitions an ordered rectangle stream into levels.
///
/// The builder only does bookkeeping; deciding when to break a level or to
/// reject a rectangle is left to the packing system driving it.
pub(crate) struct LevelBuilder {
    orientation: Orientation,
    spacing: i32,
    levels: Vec<Level>,
    current: Level,
    committed: i32,
    unplaced: Vec<usize>,
}

impl LevelBuilder {
    pub(crate) fn new(orientation: Orientation, spacing: i32, estimated_levels: usize) -> Self {
        Self {
            orientation,
            spacing,
            levels: Vec::with_capacity(estimated_levels),
            current: Level::default(),
            committed: 0,
            unplaced: Vec::new(),
        }
    }

    pub(crate) fn current(&self) -> &Level { &self.current }

    /// Extent the current level would have along the packing direction if
    /// `rect` were appended to it.
    pub(crate) fn extent_with(&self, rect: &RectangleDescriptor) -> i32 {
        let along = match self.orientation {
            Orientation::Horizontal => rect.width,
            Orientation::Vertical => rect.height,
        };
        if self.current.is_empty() {
            along
        } else {
            self.current.extent(self.orientation) + self.spacing + along
        }
    }

    /// Total cross-axis extent once `rect` is placed: every finished level
    /// plus its trailing spacing, then the level holding `rect`. With
    /// `on_new_level` the current level is counted as finished and `rect`
    /// opens the next one.
    pub(crate) fn stacked_with(&self, rect: &RectangleDescriptor, on_new_level: bool) -> i32 {
        let across = match self.orientation {
            Orientation::Horizontal => rect.height,
            Orientation::Vertical => rect.width,
        };
        let current = self.current.thickness(self.orientation);
        if on_new_level && !self.current.is_empty() {
            self.committed + current + self.spacing + across
        } else {
            self.committed + current.max(across)
        }
    }

    pub(crate) fn push(&mut self, rect: RectangleDescriptor) {
        self.current.push(rect, self.orientation, self.spacing);
    }

    pub(crate) fn reject(&mut self, rect: &RectangleDescriptor) { self.unplaced.push(rect.index); }

    /// Closes the current level. A no-op while the current level is empty.
    pub(crate) fn break_level(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let done = std::mem::take(&mut self.current);
        self.committed += done.thickness(self.orientation) + self.spacing;
        self.levels.push(done);
    }

    /// Returns the finished levels (trailing empty level dropped) and the
    /// indices of every rejected rectangle.
    pub(crate) fn finish(mut self) -> (Vec<Level>, Vec<usize>) {
        self.break_level();
        (self.levels, self.unplaced)
    }
}

/// Ideal level count: total extent (spacing included) over the bound,
/// rounded up, plus one level of headroom.
pub(crate) fn estimate_levels(extents: impl Iterator<Item = i32>, spacing: i32, bound: i32) -> usize {
    if bound <= 0 {
        return 1;
    }
    let total: i64 = extents.map(|e| i64::from(e) + i64::from(spacing)).sum();
    let bound = i64::from(bound);
    ((total + bound - 1) / bound).max(0) as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(index: usize, width: i32, height: i32) -> RectangleDescriptor {
        RectangleDescriptor::new(index, width, height)
    }

    #[test]
    fn rows_accumulate_width_and_max_height() {
        let mut builder = LevelBuilder::new(Orientation::Horizontal, 10, 2);
        builder.push(rect(0, 400, 300));
        assert_eq!(builder.extent_with(&rect(1, 400, 200)), 810);
        builder.push(rect(1, 400, 200));

        let level = builder.current();
        assert_eq!((level.width, level.height), (810, 300));
        assert_eq!(level.area(), 400 * 300 + 400 * 200);
    }

    #[test]
    fn stacked_extent_counts_spacing_after_finished_levels() {
        let mut builder = LevelBuilder::new(Orientation::Horizontal, 10, 2);
        builder.push(rect(0, 400, 300));
        assert_eq!(builder.stacked_with(&rect(1, 100, 350), false), 350);
        assert_eq!(builder.stacked_with(&rect(1, 400, 300), true), 610);

        builder.break_level();
        assert_eq!(builder.stacked_with(&rect(1, 400, 300), false), 610);
        assert_eq!(builder.stacked_with(&rect(1, 400, 300), true), 610);
    }

    #[test]
    fn columns_accumulate_height_and_max_width() {
        let mut builder = LevelBuilder::new(Orientation::Vertical, 5, 1);
        builder.push(rect(0, 300, 100));
        builder.push(rect(1, 200, 100));
        let level = builder.current();
        assert_eq!((level.width, level.height), (300, 205));
        assert_eq!(level.extent(Orientation::Vertical), 205);
        assert_eq!(level.thickness(Orientation::Vertical), 300);
    }

    #[test]
    fn finish_drops_empty_levels_and_reports_rejections() {
        let mut builder = LevelBuilder::new(Orientation::Horizontal, 10, 3);
        builder.push(rect(0, 100, 100));
        builder.break_level();
        builder.break_level();
        builder.reject(&rect(7, 2000, 100));

        let (levels, unplaced) = builder.finish();
        assert_eq!(levels.len(), 1);
        assert_eq!(unplaced, vec![7]);
    }

    #[test]
    fn estimate_rounds_up_and_adds_headroom() {
        assert_eq!(estimate_levels([400, 400].into_iter(), 10, 1000), 1 + 1);
        assert_eq!(estimate_levels([400, 400, 400].into_iter(), 10, 1000), 2 + 1);
        assert_eq!(estimate_levels(std::iter::empty(), 10, 1000), 1);
        assert_eq!(estimate_levels([10].into_iter(), 10, 0), 1);
    }
}
