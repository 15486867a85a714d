// Shell settings: interaction metrics and timings, stored apart from layout profiles.
// Uses the platform config dir, e.g. ~/.config/atelier/settings.json on Linux.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use atelier_layout::{DockMetrics, TreeMetrics};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// Pointer travel (logical px) before a press turns into a drag.
    pub drag_threshold: f32,
    /// Drop strip offered by a collapsed edge.
    pub hot_rect_size: f32,
    pub splitter_thickness: f32,
    pub tab_strip_height: f32,
    pub save_debounce_ms: u64,
    /// Maximum distance to a window edge for the toolbar to snap to it.
    pub toolbar_snap_distance: f32,
    pub toolbar_thickness: f32,
    pub min_slot_size: f32,
    pub min_edge_size: f32,
    /// Largest share of the window an edge may take.
    pub max_edge_fraction: f32,
    pub default_side_width: f32,
    pub default_bottom_height: f32,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 10.0,
            hot_rect_size: 100.0,
            splitter_thickness: 4.0,
            tab_strip_height: 24.0,
            save_debounce_ms: 300,
            toolbar_snap_distance: 100.0,
            toolbar_thickness: 40.0,
            min_slot_size: 50.0,
            min_edge_size: 150.0,
            max_edge_fraction: 0.5,
            default_side_width: 250.0,
            default_bottom_height: 200.0,
        }
    }
}

impl ShellSettings {
    pub fn dock_metrics(&self) -> DockMetrics {
        DockMetrics {
            tree: TreeMetrics {
                splitter_thickness: self.splitter_thickness,
                tab_strip_height: self.tab_strip_height,
                min_slot_size: self.min_slot_size,
            },
            hot_rect_size: self.hot_rect_size,
        }
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("atelier").join("settings.json"))
}

pub fn load_settings() -> ShellSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => ShellSettings::default(),
    }
}

/// Missing file → defaults silently; unparsable file → defaults with a warning.
pub fn load_settings_from(path: &Path) -> ShellSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                ShellSettings::default()
            }
        },
        Err(_) => ShellSettings::default(),
    }
}
