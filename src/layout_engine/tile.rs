use serde::Serialize;

use super::descriptor::RectangleDescriptor;
use super::error::LayoutError;
use super::level::Level;
use super::systems::{Orientation, PackingSystem, PackingSystemKind};
use crate::sys::geometry::{Point, WorkArea};

/// Output of one packing run.
///
/// When `overflow` is set, either some rectangles were skipped (their
/// indices are in `unplaced`) or, for vertical packing, the set as a whole
/// exceeds the work area's surface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TileResult {
    pub levels: Vec<Level>,
    /// Top-left corner of the packed block.
    pub origin: Point,
    pub orientation: Orientation,
    pub overflow: bool,
    pub unplaced: Vec<usize>,
}

impl TileResult {
    pub fn is_vertical(&self) -> bool { self.orientation == Orientation::Vertical }

    pub fn placed(&self) -> impl Iterator<Item = &RectangleDescriptor> + '_ {
        self.levels.iter().flat_map(|level| level.rects())
    }

    pub fn placed_count(&self) -> usize { self.levels.iter().map(Level::len).sum() }

    pub fn is_placed(&self, index: usize) -> bool { self.placed().any(|rect| rect.index == index) }

    /// Turns an overflowing result into [`LayoutError::Overflow`].
    pub fn into_result(self) -> Result<TileResult, LayoutError> {
        if self.overflow {
            Err(LayoutError::Overflow { unplaced: self.unplaced })
        } else {
            Ok(self)
        }
    }
}

/// Packs `descriptors` into `work_area` using the packer for `orientation`.
pub fn tile(
    descriptors: &[RectangleDescriptor],
    work_area: WorkArea,
    spacing: i32,
    orientation: Orientation,
) -> TileResult {
    PackingSystemKind::new(orientation, spacing).tile(descriptors, work_area)
}
