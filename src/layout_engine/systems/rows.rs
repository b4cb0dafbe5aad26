use tracing::trace;

use super::{Orientation, PackingSystem};
use crate::layout_engine::descriptor::RectangleDescriptor;
use crate::layout_engine::level::{LevelBuilder, estimate_levels};
use crate::layout_engine::tile::TileResult;
use crate::sys::geometry::{Point, WorkArea};

/// Horizontal packer: fills rows left to right and stacks them top to bottom,
/// centering each row and then the whole block inside the work area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowPacker {
    spacing: i32,
}

impl RowPacker {
    pub fn new(spacing: i32) -> Self { Self { spacing } }
}

impl PackingSystem for RowPacker {
    fn tile(&self, descriptors: &[RectangleDescriptor], area: WorkArea) -> TileResult {
        let spacing = self.spacing;
        let estimated = estimate_levels(descriptors.iter().map(|d| d.width), spacing, area.width())
            .min(descriptors.len());
        trace!(estimated, count = descriptors.len(), "packing rows");

        let mut builder = LevelBuilder::new(Orientation::Horizontal, spacing, estimated);
        let mut overflow = false;
        for rect in descriptors {
            if area.is_empty() || rect.width > area.width() {
                trace!(index = rect.index, width = rect.width, "wider than the work area");
                builder.reject(rect);
                overflow = true;
                continue;
            }
            let new_row = !builder.current().is_empty() && builder.extent_with(rect) > area.width();
            let stacked = builder.stacked_with(rect, new_row);
            if stacked > area.height() {
                trace!(index = rect.index, stacked, "would exceed the work area height");
                builder.reject(rect);
                overflow = true;
                continue;
            }
            if new_row {
                builder.break_level();
            }
            builder.push(*rect);
        }

        let (mut levels, unplaced) = builder.finish();

        let total_height = levels.iter().map(|level| level.height).sum::<i32>()
            + spacing * (levels.len() as i32 - 1).max(0);
        let widest = levels.iter().map(|level| level.width).max().unwrap_or(0);
        let origin = Point::new(
            (area.width() - widest) / 2 + area.x(),
            (area.height() - total_height) / 2 + area.y(),
        );

        let mut y = origin.y;
        for level in &mut levels {
            level.x = (area.width() - level.width) / 2 + area.x();
            level.y = y;
            y += level.height + spacing;
        }

        TileResult {
            levels,
            origin,
            orientation: Orientation::Horizontal,
            overflow,
            unplaced,
        }
    }

    fn orientation(&self) -> Orientation { Orientation::Horizontal }
}
