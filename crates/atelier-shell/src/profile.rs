// Persisted layout types: one LayoutConfig per named profile, wrapped in a profile set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use atelier_core::{Edge, Rect, ToolbarPosition};
use atelier_layout::DockGridLayout;

/// Reserved profile seeded from the compiled-in arrangement. Always present.
pub const DEFAULT_PROFILE: &str = "Default";

/// Profile a pre-profiles layout file is migrated into.
pub const LEGACY_PROFILE: &str = "Last Workspace";

pub fn is_reserved_profile(name: &str) -> bool {
    name.eq_ignore_ascii_case(DEFAULT_PROFILE)
}

// ──────────────────────────────────────────────
// PanelState
// ──────────────────────────────────────────────

/// Last observed placement of one panel. Kept for hidden panels too, so showing
/// a panel can put it back where it was.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelState {
    pub title: String,
    pub is_hidden: bool,
    pub is_floating: bool,
    pub is_tabbed: bool,
    /// "Left" | "Right" | "Bottom", empty when not docked.
    pub dock_edge: String,
    pub dock_index: usize,
    pub tab_index: usize,
    pub was_active: bool,
    pub floating_left: f32,
    pub floating_top: f32,
    pub floating_width: f32,
    pub floating_height: f32,
    pub docked_proportion: f32,
}

impl PanelState {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn edge(&self) -> Option<Edge> {
        Edge::parse(&self.dock_edge)
    }

    pub fn floating_bounds(&self) -> Rect {
        Rect::new(
            self.floating_left,
            self.floating_top,
            self.floating_width,
            self.floating_height,
        )
    }

    pub fn set_floating_bounds(&mut self, bounds: Rect) {
        self.floating_left = bounds.x;
        self.floating_top = bounds.y;
        self.floating_width = bounds.width;
        self.floating_height = bounds.height;
    }
}

// ──────────────────────────────────────────────
// LayoutConfig
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub left_dock_grid: Option<DockGridLayout>,
    pub right_dock_grid: Option<DockGridLayout>,
    pub bottom_dock_grid: Option<DockGridLayout>,
    pub left_dock_width: f32,
    pub right_dock_width: f32,
    pub bottom_dock_height: f32,
    pub toolbar_position: String,
    pub panels: Vec<PanelState>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_dock_grid: None,
            right_dock_grid: None,
            bottom_dock_grid: None,
            left_dock_width: 0.0,
            right_dock_width: 0.0,
            bottom_dock_height: 0.0,
            toolbar_position: ToolbarPosition::Top.as_str().to_string(),
            panels: Vec::new(),
        }
    }
}

impl LayoutConfig {
    pub fn dock_grid(&self, edge: Edge) -> Option<&DockGridLayout> {
        match edge {
            Edge::Left => self.left_dock_grid.as_ref(),
            Edge::Right => self.right_dock_grid.as_ref(),
            Edge::Bottom => self.bottom_dock_grid.as_ref(),
        }
    }

    pub fn dock_grid_mut(&mut self, edge: Edge) -> &mut Option<DockGridLayout> {
        match edge {
            Edge::Left => &mut self.left_dock_grid,
            Edge::Right => &mut self.right_dock_grid,
            Edge::Bottom => &mut self.bottom_dock_grid,
        }
    }

    pub fn edge_size(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left_dock_width,
            Edge::Right => self.right_dock_width,
            Edge::Bottom => self.bottom_dock_height,
        }
    }

    pub fn set_edge_size(&mut self, edge: Edge, size: f32) {
        match edge {
            Edge::Left => self.left_dock_width = size,
            Edge::Right => self.right_dock_width = size,
            Edge::Bottom => self.bottom_dock_height = size,
        }
    }

    pub fn toolbar(&self) -> Option<ToolbarPosition> {
        ToolbarPosition::parse(&self.toolbar_position)
    }

    pub fn state(&self, title: &str) -> Option<&PanelState> {
        self.panels.iter().find(|s| s.title == title)
    }

    pub fn state_mut(&mut self, title: &str) -> Option<&mut PanelState> {
        self.panels.iter_mut().find(|s| s.title == title)
    }
}

// ──────────────────────────────────────────────
// WorkspaceProfiles
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceProfiles {
    pub active_profile: String,
    pub profiles: BTreeMap<String, LayoutConfig>,
}

impl WorkspaceProfiles {
    pub fn get(&self, name: &str) -> Option<&LayoutConfig> {
        self.profiles.get(name)
    }

    pub fn active(&self) -> Option<&LayoutConfig> {
        self.profiles.get(&self.active_profile)
    }

    /// User-visible profile names, sorted case-insensitively, reserved one excluded.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .profiles
            .keys()
            .filter(|name| !is_reserved_profile(name))
            .cloned()
            .collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    /// Seed the reserved profile if it is missing and point an empty or dangling
    /// active name at it.
    pub fn ensure_default(&mut self, seed: impl FnOnce() -> LayoutConfig) {
        if !self.profiles.contains_key(DEFAULT_PROFILE) {
            self.profiles.insert(DEFAULT_PROFILE.to_string(), seed());
        }
        if self.active_profile.is_empty() || !self.profiles.contains_key(&self.active_profile) {
            self.active_profile = DEFAULT_PROFILE.to_string();
        }
    }
}
