pub mod scene;

pub use scene::{Scene, SceneEvent, SceneMonitor, SceneWindow, SceneWorkspace};
