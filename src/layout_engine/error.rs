use thiserror::Error;

use crate::sys::desktop::{MonitorId, WorkspaceId};
use crate::sys::geometry::WorkArea;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("workspace {0} does not exist")]
    NoWorkspace(WorkspaceId),
    #[error("workspace {0} has no windows")]
    NoWindows(WorkspaceId),
    #[error("no monitors available")]
    NoMonitors,
    #[error("no work area for monitor {monitor} on workspace {workspace}")]
    NoWorkArea {
        workspace: WorkspaceId,
        monitor: MonitorId,
    },
    #[error("work area {0:?} is empty")]
    InvalidWorkArea(WorkArea),
    #[error("{} rectangle(s) did not fit in the work area", .unplaced.len())]
    Overflow { unplaced: Vec<usize> },
    #[error("workspace index {0} has no override table")]
    UnknownWorkspaceIndex(usize),
}
