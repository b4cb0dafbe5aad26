use serde::{Deserialize, Serialize};

use crate::sys::desktop::{MaximizeState, MonitorId, WindowId, WindowQuery};
use crate::sys::geometry::Rect;

/// Size, identity and packing flags of one window, snapshotted at the start
/// of a layout pass.
///
/// `index` points into the window list the host returned for the pass; the
/// host alone maps it back to a real window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangleDescriptor {
    pub index: usize,
    /// Live position, only consulted to detect edge-snapped windows.
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub maximized_horizontally: bool,
    pub maximized_vertically: bool,
}

impl RectangleDescriptor {
    pub fn new(index: usize, width: i32, height: i32) -> Self {
        Self::from_frame(index, Rect::new(0, 0, width, height), MaximizeState::default())
    }

    pub fn from_frame(index: usize, frame: Rect, maximized: MaximizeState) -> Self {
        Self {
            index,
            x: frame.x(),
            y: frame.y(),
            width: frame.width(),
            height: frame.height(),
            maximized_horizontally: maximized.horizontally,
            maximized_vertically: maximized.vertically,
        }
    }

    pub fn area(&self) -> i64 { i64::from(self.width) * i64::from(self.height) }

    pub fn maximize_state(&self) -> MaximizeState {
        MaximizeState {
            horizontally: self.maximized_horizontally,
            vertically: self.maximized_vertically,
        }
    }

    pub fn frame(&self) -> Rect { Rect::new(self.x, self.y, self.width, self.height) }
}

/// Why a window produced no descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    OtherMonitor,
    Excluded,
    /// Maximized on both axes. Such windows are handled outside the layout.
    Maximized,
    /// Zero or negative size.
    Degenerate,
}

/// Builds the descriptor for `window`, the `index`-th entry of the host's
/// window list, when it takes part in packing on `monitor`.
pub fn describe(
    query: &impl WindowQuery,
    window: WindowId,
    index: usize,
    monitor: MonitorId,
) -> Result<RectangleDescriptor, SkipReason> {
    if query.monitor(window) != monitor {
        return Err(SkipReason::OtherMonitor);
    }
    if query.is_excluded(window) {
        return Err(SkipReason::Excluded);
    }
    let maximized = query.maximize_state(window);
    if maximized.is_fully_maximized() {
        return Err(SkipReason::Maximized);
    }
    let frame = query.frame_rect(window);
    if frame.is_empty() {
        return Err(SkipReason::Degenerate);
    }
    Ok(RectangleDescriptor::from_frame(index, frame, maximized))
}
