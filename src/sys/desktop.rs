//! Narrow interfaces to the desktop that owns the real windows.
//!
//! The layout engine never talks to a compositor directly. It reads live
//! geometry through [`WindowQuery`] and applies its results through
//! [`WindowControl`]; the host supplies both.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sys::geometry::{Rect, WorkArea};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(raw: u32) -> Self { Self(raw) }

            pub fn get(self) -> u32 { self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
        }
    };
}

id_type!(
    /// Handle of a real window, opaque to the engine.
    WindowId
);
id_type!(
    /// Workspace index as ordered by the host.
    WorkspaceId
);
id_type!(MonitorId);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaximizeState {
    #[serde(default)]
    pub horizontally: bool,
    #[serde(default)]
    pub vertically: bool,
}

impl MaximizeState {
    pub fn is_fully_maximized(self) -> bool { self.horizontally && self.vertically }

    /// Maximized along the vertical axis only, i.e. snapped to a screen edge.
    pub fn is_edge_snapped(self) -> bool { self.vertically && !self.horizontally }
}

/// Read-only view of live desktop state.
pub trait WindowQuery {
    /// Windows on `workspace` in a stable order for the duration of one pass.
    /// `None` when the workspace does not exist.
    fn list_windows(&self, workspace: WorkspaceId) -> Option<Vec<WindowId>>;

    fn frame_rect(&self, window: WindowId) -> Rect;

    fn monitor(&self, window: WindowId) -> MonitorId;

    fn maximize_state(&self, window: WindowId) -> MaximizeState;

    /// Windows the host's policy excludes from tiling (dialogs, pinned, ...).
    fn is_excluded(&self, window: WindowId) -> bool;

    fn monitors(&self) -> Vec<MonitorId>;

    fn work_area_for_monitor(&self, workspace: WorkspaceId, monitor: MonitorId)
    -> Option<WorkArea>;
}

/// Side-effecting half of the desktop.
pub trait WindowControl {
    fn move_window(&mut self, window: WindowId, animate: bool, frame: Rect);

    fn win_to_new_workspace(&mut self, window: WindowId, activate: bool) -> WorkspaceId;

    fn move_oversized_window(&mut self, window: WindowId);
}
