use tracing::trace;

use super::descriptor::RectangleDescriptor;
use super::engine::LayoutEngine;
use crate::sys::desktop::{MaximizeState, MonitorId, WindowQuery, WorkspaceId};
use crate::sys::geometry::Rect;

impl LayoutEngine {
    /// Whether a window of size `candidate` could join `workspace` on
    /// `monitor` without overflowing the layout.
    ///
    /// The existing windows are gathered exactly as a pass would gather them,
    /// pending overrides included, but nothing is moved and the overrides are
    /// left in place. A workspace holding a window maximized on both axes
    /// never accepts another one.
    pub fn test_window_fit(
        &self,
        query: &impl WindowQuery,
        candidate: Rect,
        workspace: WorkspaceId,
        monitor: MonitorId,
    ) -> bool {
        let Some(windows) = query.list_windows(workspace) else {
            return false;
        };
        if windows.iter().any(|&window| query.maximize_state(window).is_fully_maximized()) {
            trace!(%workspace, "workspace holds a maximized window");
            return false;
        }

        let candidate =
            RectangleDescriptor::from_frame(windows.len(), candidate, MaximizeState::default());
        let swaps = self.overrides().swaps(workspace);
        let Ok(gathered) =
            self.gather(query, workspace, monitor, &windows, &swaps, Some(candidate))
        else {
            return false;
        };

        let result = self.tile(&gathered.descriptors, gathered.work_area);
        trace!(%workspace, %monitor, overflow = result.overflow, "fit test");
        !result.overflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::Settings;
    use crate::model::scene::{Scene, SceneWindow};
    use crate::sys::desktop::WindowId;

    const MONITOR: MonitorId = MonitorId::new(0);

    fn engine() -> LayoutEngine { LayoutEngine::new(&Settings::default(), 2) }

    fn two_windows() -> (Scene, WorkspaceId) {
        let mut scene = Scene::single_monitor(Rect::new(0, 0, 1000, 600));
        let ws = scene.add_workspace(vec![
            SceneWindow::new(1, Rect::new(0, 0, 400, 300)),
            SceneWindow::new(2, Rect::new(0, 0, 400, 300)),
        ]);
        (scene, ws)
    }

    #[test]
    fn small_candidate_fits() {
        let (scene, ws) = two_windows();
        assert!(engine().test_window_fit(&scene, Rect::new(0, 0, 150, 300), ws, MONITOR));
    }

    #[test]
    fn candidate_that_needs_a_third_row_does_not_fit() {
        let (scene, ws) = two_windows();
        assert!(!engine().test_window_fit(&scene, Rect::new(0, 0, 400, 300), ws, MONITOR));
    }

    #[test]
    fn full_work_area_rejects_without_moving_anything() {
        let mut scene = Scene::single_monitor(Rect::new(0, 0, 1000, 600));
        let ws = scene.add_workspace(vec![
            SceneWindow::new(1, Rect::new(0, 0, 990, 290)),
            SceneWindow::new(2, Rect::new(0, 0, 990, 290)),
        ]);
        assert!(!engine().test_window_fit(&scene, Rect::new(0, 0, 900, 500), ws, MONITOR));
        assert_eq!(scene.moves().count(), 0);
        assert_eq!(scene.frame_of(WindowId::new(1)), Some(Rect::new(0, 0, 990, 290)));
    }

    #[test]
    fn empty_workspace_accepts_anything_that_fits_the_area() {
        let mut scene = Scene::single_monitor(Rect::new(0, 0, 1000, 600));
        let ws = scene.add_workspace(vec![]);
        assert!(engine().test_window_fit(&scene, Rect::new(0, 0, 1000, 600), ws, MONITOR));
        assert!(!engine().test_window_fit(&scene, Rect::new(0, 0, 1001, 600), ws, MONITOR));
    }

    #[test]
    fn maximized_window_blocks_the_workspace() {
        let mut scene = Scene::single_monitor(Rect::new(0, 0, 1000, 600));
        let ws = scene.add_workspace(vec![
            SceneWindow::new(1, Rect::new(0, 0, 1000, 600)).maximized(true, true),
        ]);
        assert!(!engine().test_window_fit(&scene, Rect::new(0, 0, 10, 10), ws, MONITOR));
    }

    #[test]
    fn missing_workspace_or_monitor_does_not_fit() {
        let (scene, ws) = two_windows();
        let small = Rect::new(0, 0, 10, 10);
        assert!(!engine().test_window_fit(&scene, small, WorkspaceId::new(9), MONITOR));
        assert!(!engine().test_window_fit(&scene, small, ws, MonitorId::new(3)));
    }

    #[test]
    fn pending_overrides_are_not_consumed() {
        let (scene, ws) = two_windows();
        let mut engine = engine();
        engine
            .create_override(
                ws,
                RectangleDescriptor::new(0, 400, 300),
                RectangleDescriptor::new(1, 400, 300),
            )
            .unwrap();

        assert!(engine.test_window_fit(&scene, Rect::new(0, 0, 100, 100), ws, MONITOR));
        assert_eq!(engine.overrides().swaps(ws), vec![(0, 1)]);
    }
}
