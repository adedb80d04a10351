// Settings persistence: view geometry and behaviour knobs.
// Uses platform-native config dir: e.g. ~/Library/Application Support/nbmerge/settings.json
// on macOS, ~/.config/nbmerge/settings.json on Linux.

use std::path::{Path, PathBuf};

use nbmerge_view::ViewOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeViewSettings {
    /// Column width of one pane.
    #[serde(default = "default_pane_width")]
    pub pane_width: f32,
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    /// Rows at the top of each output item that start a drag.
    #[serde(default = "default_handle_height")]
    pub handle_height: f32,
    #[serde(default = "default_pane_gap")]
    pub pane_gap: f32,
    /// Pointer travel before a press turns into a drag.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
    #[serde(default)]
    pub expand_unchanged_outputs: bool,
}

fn default_pane_width() -> f32 {
    40.0
}

fn default_item_height() -> f32 {
    3.0
}

fn default_handle_height() -> f32 {
    1.0
}

fn default_pane_gap() -> f32 {
    1.0
}

fn default_drag_threshold() -> f32 {
    4.0
}

impl Default for MergeViewSettings {
    fn default() -> Self {
        Self {
            pane_width: default_pane_width(),
            item_height: default_item_height(),
            handle_height: default_handle_height(),
            pane_gap: default_pane_gap(),
            drag_threshold: default_drag_threshold(),
            expand_unchanged_outputs: false,
        }
    }
}

impl MergeViewSettings {
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            pane_width: self.pane_width,
            pane_gap: self.pane_gap,
            item_height: self.item_height,
            // Handle strip never exceeds the item.
            handle_height: self.handle_height.clamp(0.0, self.item_height),
            drag_threshold: self.drag_threshold,
            expand_unchanged_outputs: self.expand_unchanged_outputs,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("nbmerge").join("settings.json"))
}

/// Load from the platform config dir, falling back to defaults.
pub fn load_settings() -> MergeViewSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => MergeViewSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> MergeViewSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                MergeViewSettings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => MergeViewSettings::default(),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            MergeViewSettings::default()
        }
    }
}

pub fn save_settings(settings: &MergeViewSettings) {
    match settings_path() {
        Some(path) => save_settings_to(&path, settings),
        None => log::warn!("Cannot determine settings path"),
    }
}

pub fn save_settings_to(path: &Path, settings: &MergeViewSettings) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("settings.json"));
        assert_eq!(settings, MergeViewSettings::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = MergeViewSettings {
            pane_width: 30.0,
            expand_unchanged_outputs: true,
            ..MergeViewSettings::default()
        };
        save_settings_to(&path, &settings);
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn partial_file_fills_remaining_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "item_height": 5 }"#).unwrap();
        let settings = load_settings_from(&path);
        assert_eq!(settings.item_height, 5.0);
        assert_eq!(settings.pane_width, 40.0);
        assert_eq!(settings.drag_threshold, 4.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), MergeViewSettings::default());
    }

    #[test]
    fn view_options_keep_handle_inside_item() {
        let settings = MergeViewSettings {
            item_height: 2.0,
            handle_height: 6.0,
            ..MergeViewSettings::default()
        };
        let options = settings.view_options();
        assert_eq!(options.handle_height, 2.0);
        assert_eq!(options.item_height, 2.0);
    }
}
