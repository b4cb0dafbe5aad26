use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::descriptor::RectangleDescriptor;
use super::tile::TileResult;
use crate::sys::geometry::WorkArea;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Rows stacked top-to-bottom.
    #[default]
    Horizontal,
    /// Columns laid out left-to-right.
    Vertical,
}

#[enum_dispatch]
pub trait PackingSystem {
    /// Packs `descriptors`, in the order given, into `work_area`.
    fn tile(&self, descriptors: &[RectangleDescriptor], work_area: WorkArea) -> TileResult;

    fn orientation(&self) -> Orientation;
}

mod columns;
pub use columns::ColumnPacker;
mod rows;
pub use rows::RowPacker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[enum_dispatch(PackingSystem)]
pub enum PackingSystemKind {
    Rows(RowPacker),
    Columns(ColumnPacker),
}

impl PackingSystemKind {
    pub fn new(orientation: Orientation, spacing: i32) -> Self {
        match orientation {
            Orientation::Horizontal => RowPacker::new(spacing).into(),
            Orientation::Vertical => ColumnPacker::new(spacing).into(),
        }
    }
}
