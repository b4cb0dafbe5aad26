//! An in-memory desktop.
//!
//! [`Scene`] answers [`WindowQuery`] from plain data and records every
//! [`WindowControl`] call, so a layout pass can be run without a window
//! system. Scenes are loaded from TOML by the command line tool.

use std::path::Path;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::common::collections::HashSet;
use crate::sys::desktop::{
    MaximizeState, MonitorId, WindowControl, WindowId, WindowQuery, WorkspaceId,
};
use crate::sys::geometry::{Rect, WorkArea};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub monitors: Vec<SceneMonitor>,
    #[serde(default)]
    pub workspaces: Vec<SceneWorkspace>,
    #[serde(skip)]
    events: Vec<SceneEvent>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SceneMonitor {
    pub id: MonitorId,
    pub work_area: WorkArea,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SceneWorkspace {
    #[serde(default)]
    pub windows: Vec<SceneWindow>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SceneWindow {
    pub id: WindowId,
    pub frame: Rect,
    #[serde(default = "primary_monitor")]
    pub monitor: MonitorId,
    #[serde(default)]
    pub maximized: MaximizeState,
    #[serde(default)]
    pub excluded: bool,
}

fn primary_monitor() -> MonitorId { MonitorId::new(0) }

/// A recorded [`WindowControl`] call.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    Moved {
        window: WindowId,
        frame: Rect,
        animate: bool,
    },
    NewWorkspace {
        window: WindowId,
        workspace: WorkspaceId,
        activate: bool,
    },
    Oversized {
        window: WindowId,
    },
}

impl SceneWindow {
    pub fn new(id: u32, frame: Rect) -> Self {
        Self {
            id: WindowId::new(id),
            frame,
            monitor: primary_monitor(),
            maximized: MaximizeState::default(),
            excluded: false,
        }
    }

    pub fn on_monitor(mut self, monitor: MonitorId) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn maximized(mut self, horizontally: bool, vertically: bool) -> Self {
        self.maximized = MaximizeState { horizontally, vertically };
        self
    }

    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }
}

impl Scene {
    pub fn single_monitor(work_area: WorkArea) -> Self {
        let mut scene = Scene::default();
        scene.add_monitor(primary_monitor(), work_area);
        scene
    }

    pub fn add_monitor(&mut self, id: MonitorId, work_area: WorkArea) {
        self.monitors.push(SceneMonitor { id, work_area });
    }

    pub fn add_workspace(&mut self, windows: Vec<SceneWindow>) -> WorkspaceId {
        self.workspaces.push(SceneWorkspace { windows });
        WorkspaceId::new(self.workspaces.len() as u32 - 1)
    }

    pub fn read(path: &Path) -> anyhow::Result<Scene> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> anyhow::Result<Scene> {
        let scene: Scene = toml::from_str(buf)?;
        scene.check_ids()?;
        Ok(scene)
    }

    fn check_ids(&self) -> anyhow::Result<()> {
        let mut monitors = HashSet::default();
        for monitor in &self.monitors {
            if !monitors.insert(monitor.id) {
                bail!("monitor {} is declared twice", monitor.id);
            }
        }
        let mut windows = HashSet::default();
        for window in self.workspaces.iter().flat_map(|ws| &ws.windows) {
            if !windows.insert(window.id) {
                bail!("window {} is declared twice", window.id);
            }
        }
        Ok(())
    }

    pub fn workspace_count(&self) -> usize { self.workspaces.len() }

    pub fn windows_on(&self, workspace: WorkspaceId) -> Vec<WindowId> {
        self.list_windows(workspace).unwrap_or_default()
    }

    pub fn frame_of(&self, window: WindowId) -> Option<Rect> {
        self.window(window).map(|w| w.frame)
    }

    pub fn events(&self) -> &[SceneEvent] { &self.events }

    /// Moves recorded so far, in order.
    pub fn moves(&self) -> impl Iterator<Item = (WindowId, Rect)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            SceneEvent::Moved { window, frame, .. } => Some((window, frame)),
            _ => None,
        })
    }

    fn window(&self, id: WindowId) -> Option<&SceneWindow> {
        self.workspaces.iter().flat_map(|ws| &ws.windows).find(|w| w.id == id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut SceneWindow> {
        self.workspaces.iter_mut().flat_map(|ws| &mut ws.windows).find(|w| w.id == id)
    }

    fn take_window(&mut self, id: WindowId) -> Option<SceneWindow> {
        self.workspaces.iter_mut().find_map(|ws| {
            let position = ws.windows.iter().position(|w| w.id == id)?;
            Some(ws.windows.remove(position))
        })
    }
}

impl WindowQuery for Scene {
    fn list_windows(&self, workspace: WorkspaceId) -> Option<Vec<WindowId>> {
        let ws = self.workspaces.get(workspace.get() as usize)?;
        Some(ws.windows.iter().map(|w| w.id).collect())
    }

    fn frame_rect(&self, window: WindowId) -> Rect { self.frame_of(window).unwrap_or_default() }

    fn monitor(&self, window: WindowId) -> MonitorId {
        self.window(window).map_or(primary_monitor(), |w| w.monitor)
    }

    fn maximize_state(&self, window: WindowId) -> MaximizeState {
        self.window(window).map(|w| w.maximized).unwrap_or_default()
    }

    fn is_excluded(&self, window: WindowId) -> bool {
        self.window(window).is_some_and(|w| w.excluded)
    }

    fn monitors(&self) -> Vec<MonitorId> { self.monitors.iter().map(|m| m.id).collect() }

    fn work_area_for_monitor(
        &self,
        workspace: WorkspaceId,
        monitor: MonitorId,
    ) -> Option<WorkArea> {
        self.workspaces.get(workspace.get() as usize)?;
        self.monitors.iter().find(|m| m.id == monitor).map(|m| m.work_area)
    }
}

impl WindowControl for Scene {
    fn move_window(&mut self, window: WindowId, animate: bool, frame: Rect) {
        if let Some(w) = self.window_mut(window) {
            w.frame = frame;
        }
        self.events.push(SceneEvent::Moved { window, frame, animate });
    }

    fn win_to_new_workspace(&mut self, window: WindowId, activate: bool) -> WorkspaceId {
        let windows = self.take_window(window).into_iter().collect();
        let workspace = self.add_workspace(windows);
        self.events.push(SceneEvent::NewWorkspace { window, workspace, activate });
        workspace
    }

    fn move_oversized_window(&mut self, window: WindowId) {
        self.events.push(SceneEvent::Oversized { window });
    }
}
