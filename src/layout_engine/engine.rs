use serde::Serialize;
use tracing::{debug, debug_span, trace, warn};

use super::descriptor::{RectangleDescriptor, SkipReason, describe};
use super::draw::{self, Placement};
use super::error::LayoutError;
use super::overrides::OverrideStore;
use super::tile::{TileResult, tile};
use super::utils::{apply_swaps, reserve_snapped, sort_descriptors};
use crate::common::config::{LayoutSettings, OverflowAction, Settings};
use crate::sys::desktop::{MonitorId, WindowControl, WindowId, WindowQuery, WorkspaceId};
use crate::sys::geometry::WorkArea;

/// Runs layout passes against a host desktop.
///
/// The engine keeps no geometry between passes. Its only state is the
/// configuration and the per-workspace override tables.
#[derive(Debug)]
pub struct LayoutEngine {
    settings: LayoutSettings,
    animate: bool,
    overrides: OverrideStore,
}

/// Packable state of one monitor, ready for [`tile`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Gathered {
    pub(crate) work_area: WorkArea,
    pub(crate) descriptors: Vec<RectangleDescriptor>,
    /// Windows left out for being maximized on both axes.
    pub(crate) maximized: Vec<WindowId>,
}

/// The window removed from an overflowing layout, and where it went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Eviction {
    pub window: WindowId,
    /// Workspace it was sent to, or `None` when it was handed back to the
    /// host as oversized.
    pub workspace: Option<WorkspaceId>,
}

/// Outcome of a pass on one monitor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub monitor: MonitorId,
    pub work_area: WorkArea,
    pub result: TileResult,
    pub placements: Vec<Placement>,
    pub evicted: Option<Eviction>,
    /// Maximized windows moved to a new workspace during the pass.
    pub relocated: Vec<WindowId>,
}

impl LayoutEngine {
    pub fn new(settings: &Settings, workspace_count: usize) -> Self {
        Self {
            settings: settings.layout.clone(),
            animate: settings.animate,
            overrides: OverrideStore::with_workspaces(workspace_count),
        }
    }

    pub fn settings(&self) -> &LayoutSettings { &self.settings }

    pub fn overrides(&self) -> &OverrideStore { &self.overrides }

    pub fn append_workspace(&mut self) -> WorkspaceId { self.overrides.append_workspace() }

    pub fn remove_workspace(&mut self, workspace: WorkspaceId) -> Result<(), LayoutError> {
        self.overrides.remove_workspace(workspace)
    }

    pub fn create_override(
        &mut self,
        workspace: WorkspaceId,
        victim: RectangleDescriptor,
        replacement: RectangleDescriptor,
    ) -> Result<(), LayoutError> {
        self.overrides.create_override(workspace, victim, replacement)
    }

    /// Packs `descriptors` with the configured spacing and orientation.
    pub fn tile(&self, descriptors: &[RectangleDescriptor], work_area: WorkArea) -> TileResult {
        tile(
            descriptors,
            work_area,
            self.settings.window_spacing,
            self.settings.orientation,
        )
    }

    /// Collects, orders and filters the descriptors of `windows` that live on
    /// `monitor`, and the work area left for them. `candidate` joins the set
    /// before ordering, as if it were one more window.
    pub(crate) fn gather(
        &self,
        query: &impl WindowQuery,
        workspace: WorkspaceId,
        monitor: MonitorId,
        windows: &[WindowId],
        swaps: &[(usize, usize)],
        candidate: Option<RectangleDescriptor>,
    ) -> Result<Gathered, LayoutError> {
        let work_area = query
            .work_area_for_monitor(workspace, monitor)
            .ok_or(LayoutError::NoWorkArea { workspace, monitor })?;
        if work_area.is_empty() {
            return Err(LayoutError::InvalidWorkArea(work_area));
        }

        let lone = windows.len() == 1;
        let mut descriptors = Vec::with_capacity(windows.len() + 1);
        let mut maximized = Vec::new();
        for (index, &window) in windows.iter().enumerate() {
            match describe(query, window, index, monitor) {
                Ok(descriptor) => descriptors.push(descriptor),
                // A lone maximized window is laid out like any other.
                Err(SkipReason::Maximized) if lone => {
                    descriptors.push(RectangleDescriptor::from_frame(
                        index,
                        query.frame_rect(window),
                        query.maximize_state(window),
                    ));
                }
                Err(SkipReason::Maximized) => maximized.push(window),
                Err(reason) => trace!(%window, ?reason, "window not packed"),
            }
        }
        descriptors.extend(candidate);

        sort_descriptors(&mut descriptors, self.settings.sort);
        let work_area = reserve_snapped(work_area, &mut descriptors, self.settings.window_spacing);
        apply_swaps(&mut descriptors, swaps);

        Ok(Gathered { work_area, descriptors, maximized })
    }

    /// Lays out every monitor of `workspace` and moves the windows.
    ///
    /// `reference` is the window whose change triggered the pass; it is the
    /// one evicted when the layout overflows.
    pub fn arrange<D: WindowQuery + WindowControl>(
        &mut self,
        desktop: &mut D,
        workspace: WorkspaceId,
        reference: Option<WindowId>,
    ) -> Result<Vec<PassReport>, LayoutError> {
        let _span = debug_span!("arrange", %workspace).entered();

        let windows = desktop.list_windows(workspace).ok_or(LayoutError::NoWorkspace(workspace))?;
        if windows.is_empty() {
            return Err(LayoutError::NoWindows(workspace));
        }
        let monitors = desktop.monitors();
        if monitors.is_empty() {
            return Err(LayoutError::NoMonitors);
        }

        let swaps = self.overrides.take_swaps(workspace);
        let mut reports = Vec::with_capacity(monitors.len());
        for monitor in monitors {
            let mut gathered = self.gather(&*desktop, workspace, monitor, &windows, &swaps, None)?;

            let mut relocated = Vec::new();
            if self.settings.move_maximized_windows {
                for window in gathered.maximized.drain(..) {
                    let target = desktop.win_to_new_workspace(window, false);
                    self.overrides.ensure_workspace(target);
                    debug!(%window, %target, "moved maximized window to a new workspace");
                    relocated.push(window);
                }
            }

            let mut result = self.tile(&gathered.descriptors, gathered.work_area);
            let mut evicted = None;
            if result.overflow {
                warn!(%monitor, unplaced = ?result.unplaced, "layout overflows the work area");
                if let Some(eviction) = self.evict(desktop, &windows, &mut gathered, reference) {
                    result = self.tile(&gathered.descriptors, gathered.work_area);
                    evicted = Some(eviction);
                }
            }

            let placements =
                draw::placements(&result, gathered.work_area, self.settings.window_spacing);
            draw::apply(desktop, &windows, &placements, self.animate);
            debug!(
                %monitor,
                levels = result.levels.len(),
                placed = placements.len(),
                overflow = result.overflow,
                "pass complete"
            );

            reports.push(PassReport {
                monitor,
                work_area: gathered.work_area,
                result,
                placements,
                evicted,
                relocated,
            });
        }
        Ok(reports)
    }

    /// Removes `reference` from an overflowing set and sends it away, unless
    /// oversized windows are kept or it is the only window of the workspace.
    fn evict(
        &mut self,
        control: &mut impl WindowControl,
        windows: &[WindowId],
        gathered: &mut Gathered,
        reference: Option<WindowId>,
    ) -> Option<Eviction> {
        if self.settings.keep_oversized_windows || windows.len() <= 1 {
            return None;
        }
        let reference = reference?;
        let position = gathered
            .descriptors
            .iter()
            .position(|d| windows.get(d.index) == Some(&reference))?;
        gathered.descriptors.remove(position);

        let workspace = match self.settings.overflow_action {
            OverflowAction::NewWorkspace => {
                let target =
                    control.win_to_new_workspace(reference, self.settings.activate_new_workspace);
                self.overrides.ensure_workspace(target);
                Some(target)
            }
            OverflowAction::MoveOversized => {
                control.move_oversized_window(reference);
                None
            }
        };
        warn!(window = %reference, ?workspace, "evicted window from overflowing layout");
        Some(Eviction { window: reference, workspace })
    }
}
