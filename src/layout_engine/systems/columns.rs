use tracing::trace;

use super::{Orientation, PackingSystem};
use crate::layout_engine::descriptor::RectangleDescriptor;
use crate::layout_engine::level::{LevelBuilder, estimate_levels};
use crate::layout_engine::tile::TileResult;
use crate::sys::geometry::{Point, WorkArea};

/// Vertical packer: the transpose of [`super::RowPacker`].
///
/// Columns break when the accumulated column height would pass the work area
/// height. A column that would push the total width past the work area width
/// is rejected, and the input set as a whole overflows when its summed area
/// exceeds the work area's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnPacker {
    spacing: i32,
}

impl ColumnPacker {
    pub fn new(spacing: i32) -> Self { Self { spacing } }
}

impl PackingSystem for ColumnPacker {
    fn tile(&self, descriptors: &[RectangleDescriptor], area: WorkArea) -> TileResult {
        let spacing = self.spacing;
        let estimated =
            estimate_levels(descriptors.iter().map(|d| d.height), spacing, area.height())
                .min(descriptors.len());
        let total_area: i64 = descriptors.iter().map(RectangleDescriptor::area).sum();
        trace!(estimated, total_area, count = descriptors.len(), "packing columns");

        let mut builder = LevelBuilder::new(Orientation::Vertical, spacing, estimated);
        let mut overflow = false;
        if total_area > area.size.area() {
            trace!(total_area, "rectangles exceed the work area surface");
            overflow = true;
        }
        for rect in descriptors {
            if area.is_empty() || rect.height > area.height() || rect.width > area.width() {
                trace!(index = rect.index, "larger than the work area");
                builder.reject(rect);
                overflow = true;
                continue;
            }
            let new_column =
                !builder.current().is_empty() && builder.extent_with(rect) > area.height();
            let stacked = builder.stacked_with(rect, new_column);
            if stacked > area.width() {
                trace!(index = rect.index, stacked, "would exceed the work area width");
                builder.reject(rect);
                overflow = true;
                continue;
            }
            if new_column {
                builder.break_level();
            }
            builder.push(*rect);
        }

        let (mut levels, unplaced) = builder.finish();

        let total_width = levels.iter().map(|level| level.width).sum::<i32>()
            + spacing * (levels.len() as i32 - 1).max(0);
        let tallest = levels.iter().map(|level| level.height).max().unwrap_or(0);
        let origin = Point::new(
            (area.width() - total_width) / 2 + area.x(),
            (area.height() - tallest) / 2 + area.y(),
        );

        let mut x = origin.x;
        for level in &mut levels {
            level.x = x;
            level.y = (area.height() - level.height) / 2 + area.y();
            x += level.width + spacing;
        }

        TileResult {
            levels,
            origin,
            orientation: Orientation::Vertical,
            overflow,
            unplaced,
        }
    }

    fn orientation(&self) -> Orientation { Orientation::Vertical }
}
