mod descriptor;
pub mod draw;
mod engine;
mod error;
mod fit;
mod level;
mod overrides;
pub mod systems;
mod tile;
pub mod utils;

pub use descriptor::{RectangleDescriptor, SkipReason, describe};
pub use draw::Placement;
pub use engine::{Eviction, LayoutEngine, PassReport};
pub use error::LayoutError;
pub use level::Level;
pub use overrides::OverrideStore;
pub use systems::{ColumnPacker, Orientation, PackingSystem, PackingSystemKind, RowPacker};
pub use tile::{TileResult, tile};
pub use utils::SortPolicy;
