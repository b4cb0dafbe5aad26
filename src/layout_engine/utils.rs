use serde::{Deserialize, Serialize};
use tracing::debug;

use super::descriptor::RectangleDescriptor;
use crate::sys::geometry::WorkArea;

/// Order in which rectangles are fed to the packer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Widest first, so large rectangles anchor each row. Stable.
    #[default]
    WidthDescending,
    /// Alternately take the widest and then the tallest remaining rectangle.
    Alternating,
}

pub fn sort_descriptors(descriptors: &mut Vec<RectangleDescriptor>, policy: SortPolicy) {
    match policy {
        SortPolicy::WidthDescending => descriptors.sort_by(|a, b| b.width.cmp(&a.width)),
        SortPolicy::Alternating => {
            let mut remaining = std::mem::take(descriptors);
            let mut by_width = true;
            while !remaining.is_empty() {
                let key = |d: &RectangleDescriptor| if by_width { d.width } else { d.height };
                // First maximum wins ties so equal rectangles keep their order.
                let mut best = 0;
                for (i, d) in remaining.iter().enumerate() {
                    if key(d) > key(&remaining[best]) {
                        best = i;
                    }
                }
                descriptors.push(remaining.remove(best));
                by_width = !by_width;
            }
        }
    }
}

/// Swaps the positions of each `(a, b)` pair of descriptor indices in the
/// packing order. Pairs naming a rectangle that is not present are ignored.
pub fn apply_swaps(descriptors: &mut [RectangleDescriptor], swaps: &[(usize, usize)]) {
    for &(a, b) in swaps {
        let pos_a = descriptors.iter().position(|d| d.index == a);
        let pos_b = descriptors.iter().position(|d| d.index == b);
        if let (Some(pos_a), Some(pos_b)) = (pos_a, pos_b) {
            descriptors.swap(pos_a, pos_b);
        }
    }
}

/// Shrinks `work_area` around rectangles snapped to its left or right edge
/// (maximized vertically only) and drops them from the packable set.
///
/// The last remaining packable rectangle is never reserved, even if snapped.
pub fn reserve_snapped(
    mut work_area: WorkArea,
    descriptors: &mut Vec<RectangleDescriptor>,
    spacing: i32,
) -> WorkArea {
    let mut i = 0;
    while i < descriptors.len() {
        let d = descriptors[i];
        if descriptors.len() == 1 || !d.maximize_state().is_edge_snapped() {
            i += 1;
            continue;
        }
        let reserved = d.width + spacing;
        if d.x + d.width == work_area.max_x() {
            work_area.size.width -= reserved;
        }
        if d.x == work_area.x() {
            work_area.origin.x += reserved;
            work_area.size.width -= reserved;
        }
        debug!(index = d.index, ?work_area, "reserved space for snapped window");
        descriptors.remove(i);
    }
    work_area
}
