use serde::Serialize;
use tracing::{debug, trace};

use super::tile::TileResult;
use crate::sys::desktop::{WindowControl, WindowId};
use crate::sys::geometry::{Rect, WorkArea};

/// Final frame for the rectangle with descriptor index `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub index: usize,
    pub frame: Rect,
}

/// Walks the levels of `result` and computes a frame for every placed
/// rectangle.
///
/// Within a level each rectangle is pulled towards the work area's midline
/// on the cross axis, but never outside its level; a level entirely on the
/// far side of the midline keeps its rectangles flush with its leading edge.
pub fn placements(result: &TileResult, work_area: WorkArea, spacing: i32) -> Vec<Placement> {
    let mut out = Vec::with_capacity(result.placed_count());
    for level in &result.levels {
        if result.is_vertical() {
            let mut y = level.y;
            for rect in level.rects() {
                let offset = midline_offset(work_area.mid_x(), level.x, level.width, rect.width);
                out.push(Placement {
                    index: rect.index,
                    frame: Rect::new(level.x + offset, y, rect.width, rect.height),
                });
                y += rect.height + spacing;
            }
        } else {
            let mut x = level.x;
            for rect in level.rects() {
                let offset = midline_offset(work_area.mid_y(), level.y, level.height, rect.height);
                out.push(Placement {
                    index: rect.index,
                    frame: Rect::new(x, level.y + offset, rect.width, rect.height),
                });
                x += rect.width + spacing;
            }
        }
    }
    out
}

fn midline_offset(midline: i32, level_start: i32, level_thickness: i32, thickness: i32) -> i32 {
    let centered = midline - (level_start + thickness / 2);
    centered.min(level_thickness - thickness).max(0)
}

/// Issues one move per placement. `windows` is the list the descriptors'
/// indices point into.
pub fn apply(
    control: &mut impl WindowControl,
    windows: &[WindowId],
    placements: &[Placement],
    animate: bool,
) {
    for placement in placements {
        let Some(&window) = windows.get(placement.index) else {
            debug!(index = placement.index, windows = windows.len(), "placement has no window");
            continue;
        };
        trace!(%window, frame = ?placement.frame, "moving window");
        control.move_window(window, animate, placement.frame);
    }
}
