use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout_engine::{Orientation, SortPolicy};

pub fn config_file() -> Option<PathBuf> { dirs::home_dir().map(|home| home.join(".tessel.toml")) }

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Animate window moves issued by the draw step.
    #[serde(default = "no")]
    pub animate: bool,
    #[serde(default)]
    pub layout: LayoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animate: no(),
            layout: LayoutSettings::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Gap between adjacent windows and between rows, in pixels.
    #[serde(default = "default_window_spacing")]
    pub window_spacing: i32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub sort: SortPolicy,
    /// Leave an overflowing layout as-is instead of evicting the window that
    /// triggered the pass.
    #[serde(default = "no")]
    pub keep_oversized_windows: bool,
    #[serde(default)]
    pub overflow_action: OverflowAction,
    /// Send windows maximized on both axes to a fresh workspace instead of
    /// leaving them out of the layout.
    #[serde(default = "no")]
    pub move_maximized_windows: bool,
    /// Switch to the workspace an evicted window was sent to.
    #[serde(default = "no")]
    pub activate_new_workspace: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            window_spacing: default_window_spacing(),
            orientation: Orientation::default(),
            sort: SortPolicy::default(),
            keep_oversized_windows: no(),
            overflow_action: OverflowAction::default(),
            move_maximized_windows: no(),
            activate_new_workspace: no(),
        }
    }
}

/// What happens to the reference window when a pass overflows.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowAction {
    #[default]
    NewWorkspace,
    MoveOversized,
}

impl LayoutSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.window_spacing < 0 {
            issues.push(format!(
                "window_spacing must be non-negative, got {}",
                self.window_spacing
            ));
        }

        if self.keep_oversized_windows && self.overflow_action != OverflowAction::default() {
            issues.push(
                "overflow_action has no effect while keep_oversized_windows is set".to_string(),
            );
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.window_spacing < 0 {
            self.window_spacing = default_window_spacing();
            fixes += 1;
        }

        fixes
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> { self.layout.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.layout.auto_fix_values() }
}

fn no() -> bool { false }

fn default_window_spacing() -> i32 { 10 }

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }

    pub fn parse(buf: &str) -> anyhow::Result<Config> { Ok(toml::from_str(buf)?) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_file_matches_defaults() {
        let parsed = Config::parse(include_str!("../../tessel.default.toml")).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn parses_layout_settings() {
        let config = Config::parse(
            r#"
            [settings]
            animate = true

            [settings.layout]
            window_spacing = 24
            orientation = "vertical"
            sort = "alternating"
            keep_oversized_windows = true
            move_maximized_windows = true
            "#,
        )
        .unwrap();

        let layout = &config.settings.layout;
        assert!(config.settings.animate);
        assert_eq!(layout.window_spacing, 24);
        assert_eq!(layout.orientation, Orientation::Vertical);
        assert_eq!(layout.sort, SortPolicy::Alternating);
        assert!(layout.keep_oversized_windows);
        assert!(layout.move_maximized_windows);
        assert_eq!(layout.overflow_action, OverflowAction::NewWorkspace);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Config::parse("[settings.layout]\nwindow_gap = 3\n").unwrap_err();
        assert!(err.to_string().contains("window_gap"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_empty());

        config.settings.layout.window_spacing = -4;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("window_spacing must be non-negative"));

        let fixes = config.auto_fix_values();
        assert_eq!(fixes, 1);
        assert_eq!(config.settings.layout.window_spacing, 10);
        assert!(config.validate().is_empty());

        config.settings.layout.keep_oversized_windows = true;
        config.settings.layout.overflow_action = OverflowAction::MoveOversized;
        assert_eq!(config.validate().len(), 1);
        assert_eq!(config.auto_fix_values(), 0);
    }

    #[test]
    fn save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tessel.toml");

        let mut config = Config::default();
        config.settings.layout.window_spacing = 6;
        config.settings.layout.overflow_action = OverflowAction::MoveOversized;
        config.save(&path).unwrap();

        assert_eq!(Config::read(&path).unwrap(), config);
    }
}
