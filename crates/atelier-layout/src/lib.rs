// Docking layout engine: panels, tab groups, the three edge dock trees and the
// floating surface, kept mutually exclusive by construction.

mod dock_tree;
mod panel;
mod snapshot;
mod tab_group;

use std::collections::HashMap;

use atelier_core::{Edge, LayoutEvent, PanelId, Rect, TabStripHitTest, Vec2};

pub use dock_tree::{DockTree, Slot, TreeMetrics};
pub use panel::{Panel, Placement};
pub use snapshot::{DockGridLayout, DockItemLayout};
pub use tab_group::TabGroup;

/// Width of the drop strip offered by a collapsed (empty) edge, before scaling.
pub const DEFAULT_HOT_RECT_SIZE: f32 = 100.0;

/// Rescale proportions so they sum to 1. Non-positive or non-finite entries take
/// the mean of the valid ones; if none are valid every entry gets an equal share.
pub(crate) fn normalize_sizes(sizes: &mut [f32]) {
    if sizes.is_empty() {
        return;
    }
    let valid: Vec<f32> = sizes
        .iter()
        .copied()
        .filter(|s| s.is_finite() && *s > 0.0)
        .collect();
    let fill = if valid.is_empty() {
        1.0
    } else {
        valid.iter().sum::<f32>() / valid.len() as f32
    };
    for s in sizes.iter_mut() {
        if !s.is_finite() || *s <= 0.0 {
            *s = fill;
        }
    }
    let total: f32 = sizes.iter().sum();
    for s in sizes.iter_mut() {
        *s /= total;
    }
}

// ──────────────────────────────────────────────
// Model types
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockMetrics {
    pub tree: TreeMetrics,
    pub hot_rect_size: f32,
}

impl Default for DockMetrics {
    fn default() -> Self {
        Self {
            tree: TreeMetrics::default(),
            hot_rect_size: DEFAULT_HOT_RECT_SIZE,
        }
    }
}

/// A torn-off panel on the floating surface. Bounds are in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingGroup {
    pub group: TabGroup,
    pub bounds: Rect,
}

/// Where a docked panel is (re)inserted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockSlot {
    /// A new single-panel slot at `index`, weighted relative to the existing slots.
    NewSlot { index: usize, weight: Option<f32> },
    /// A tab of the existing slot at `index`.
    Tab {
        index: usize,
        tab_index: usize,
        activate: bool,
    },
}

/// A tab (or title bar) under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabHit {
    pub panel: PanelId,
    /// Rect of the tab itself, root coordinates.
    pub tab: Rect,
    pub floating: bool,
}

enum Origin {
    Docked(Edge),
    Floating,
    Nowhere,
}

// ──────────────────────────────────────────────
// DockModel
// ──────────────────────────────────────────────

/// Owns every panel and every container. A panel is docked when a dock tree holds
/// it, floating when a floating group holds it and hidden otherwise; every move
/// detaches from the old container first.
#[derive(Debug)]
pub struct DockModel {
    panels: Vec<Panel>,
    docks: [DockTree; 3],
    /// Z-ordered, last is topmost.
    floating: Vec<FloatingGroup>,
    root_bounds: Rect,
    surface_origin: Vec2,
    scale_factor: f32,
    hot_rect_size: f32,
    events: Vec<LayoutEvent>,
    next_id: PanelId,
}

impl DockModel {
    pub fn new(metrics: DockMetrics) -> Self {
        Self {
            panels: Vec::new(),
            docks: Edge::ALL.map(|edge| DockTree::new(edge, metrics.tree)),
            floating: Vec::new(),
            root_bounds: Rect::ZERO,
            surface_origin: Vec2::ZERO,
            scale_factor: 1.0,
            hot_rect_size: metrics.hot_rect_size,
            events: Vec::new(),
            next_id: 1,
        }
    }

    // ── Registry ─────────────────────────────────

    /// Register a panel. It starts hidden. Titles are unique; a duplicate or empty
    /// title is rejected.
    pub fn register_panel(&mut self, title: &str, home_edge: Edge) -> Option<PanelId> {
        if title.is_empty() {
            log::warn!("Refusing to register a panel with an empty title");
            return None;
        }
        if self.panel_by_title(title).is_some() {
            log::warn!("Panel '{title}' is already registered");
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.panels.push(Panel::new(id, title, home_edge));
        log::debug!("Registered panel '{title}' as {id}");
        Some(id)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_by_title(&self, title: &str) -> Option<PanelId> {
        self.panels.iter().find(|p| p.title == title).map(|p| p.id)
    }

    pub fn title_of(&self, id: PanelId) -> Option<&str> {
        self.panel(id).map(|p| p.title.as_str())
    }

    pub fn set_can_float_all(&mut self, can_float: bool) {
        for panel in &mut self.panels {
            panel.can_float = can_float;
        }
    }

    // ── Containers ───────────────────────────────

    pub fn dock(&self, edge: Edge) -> &DockTree {
        &self.docks[edge.index()]
    }

    pub fn floating(&self) -> &[FloatingGroup] {
        &self.floating
    }

    pub fn placement(&self, id: PanelId) -> Placement {
        for tree in &self.docks {
            if let Some((dock_index, tab_index)) = tree.locate(id) {
                let group = &tree.groups()[dock_index];
                return Placement::Docked {
                    edge: tree.edge(),
                    dock_index,
                    tab_index,
                    tabbed: group.is_tabbed(),
                    active: group.active_panel() == Some(id),
                    proportion: tree.item_sizes().get(dock_index).copied().unwrap_or(1.0),
                };
            }
        }
        match self.floating.iter().find(|f| f.group.contains(id)) {
            Some(f) => Placement::Floating { bounds: f.bounds },
            None => Placement::Hidden,
        }
    }

    pub fn is_visible(&self, id: PanelId) -> bool {
        !self.placement(id).is_hidden()
    }

    /// Every panel sits in at most one container.
    pub fn is_consistent(&self) -> bool {
        self.panels.iter().all(|panel| {
            let docked = self.docks.iter().filter(|t| t.contains(panel.id)).count();
            let floating = self
                .floating
                .iter()
                .filter(|f| f.group.contains(panel.id))
                .count();
            let single_group = self
                .docks
                .iter()
                .flat_map(|t| t.groups())
                .filter(|g| g.contains(panel.id))
                .count()
                <= 1;
            docked + floating <= 1 && single_group
        })
    }

    fn detach(&mut self, id: PanelId) -> Origin {
        for tree in &mut self.docks {
            if tree.remove_panel(id) {
                return Origin::Docked(tree.edge());
            }
        }
        if let Some(index) = self.floating.iter().position(|f| f.group.contains(id)) {
            let floating = &mut self.floating[index];
            floating.group.remove_panel(id);
            if floating.group.is_empty() {
                self.floating.remove(index);
            }
            return Origin::Floating;
        }
        Origin::Nowhere
    }

    /// Like `detach`, but leaves the panel in place when it already lives on `edge`;
    /// the tree's own move handles that case.
    fn detach_elsewhere(&mut self, id: PanelId, edge: Edge) -> Origin {
        if self.docks[edge.index()].contains(id) {
            Origin::Docked(edge)
        } else {
            self.detach(id)
        }
    }

    fn settle(&mut self, origin: Origin) {
        match origin {
            Origin::Docked(edge) => self.rebuild_edge(edge),
            Origin::Floating => self.events.push(LayoutEvent::LayoutChanged),
            Origin::Nowhere => {}
        }
    }

    fn rebuild_edge(&mut self, edge: Edge) {
        if self.docks[edge.index()].rebuild() {
            self.events.push(LayoutEvent::DockedItemsChanged(edge));
        }
        self.events.push(LayoutEvent::LayoutChanged);
    }

    // ── Moves ────────────────────────────────────

    /// Append the panel as a new slot at the end of `edge`.
    pub fn dock_to_edge(&mut self, id: PanelId, edge: Edge) -> bool {
        if self.panel(id).is_none() {
            return false;
        }
        let origin = self.detach(id);
        self.docks[edge.index()].add_panel(id);
        self.settle_into(origin, edge);
        true
    }

    /// Dock into `edge` at the slot position `point` (root coordinates) falls on.
    pub fn dock_at(&mut self, id: PanelId, edge: Edge, point: Vec2) -> Option<usize> {
        self.panel(id)?;
        let origin = self.detach_elsewhere(id, edge);
        let index = self.docks[edge.index()].insert_at_position(id, point);
        self.settle_into(origin, edge);
        Some(index)
    }

    /// Merge into the docked group holding `target`; the moved panel becomes active.
    pub fn dock_as_tab(&mut self, id: PanelId, target: PanelId) -> bool {
        if id == target || self.panel(id).is_none() {
            return false;
        }
        let Some(edge) = self.placement(target).edge() else {
            return false;
        };
        let origin = self.detach_elsewhere(id, edge);
        let merged = self.docks[edge.index()].dock_as_tab(id, target);
        self.settle_into(origin, edge);
        merged
    }

    /// Insert at an explicit slot, used when restoring recorded placements.
    pub fn dock_into(&mut self, id: PanelId, edge: Edge, slot: DockSlot) -> bool {
        if self.panel(id).is_none() {
            return false;
        }
        let origin = self.detach(id);
        let tree = &mut self.docks[edge.index()];
        match slot {
            DockSlot::Tab {
                index,
                tab_index,
                activate,
            } if index < tree.len() => {
                tree.insert_tab(index, tab_index, id, activate);
            }
            DockSlot::Tab { index, .. } => {
                tree.insert_group(index, TabGroup::new(id), None);
            }
            DockSlot::NewSlot { index, weight } => {
                tree.insert_group(index, TabGroup::new(id), weight);
            }
        }
        self.settle_into(origin, edge);
        true
    }

    fn settle_into(&mut self, origin: Origin, edge: Edge) {
        if let Origin::Docked(from) = origin {
            if from != edge {
                self.settle(origin);
            }
        } else {
            self.settle(origin);
        }
        self.rebuild_edge(edge);
    }

    /// Put the panel on the floating surface as its own single-panel group, on top.
    pub fn float(&mut self, id: PanelId, bounds: Rect) -> bool {
        if self.panel(id).is_none() {
            return false;
        }
        let origin = self.detach(id);
        if let Origin::Docked(edge) = origin {
            self.rebuild_edge(edge);
        }
        self.floating.push(FloatingGroup {
            group: TabGroup::new(id),
            bounds,
        });
        self.events.push(LayoutEvent::LayoutChanged);
        true
    }

    /// Move a floating panel's group so its top-left sits at `origin` (surface coordinates).
    pub fn move_floating(&mut self, id: PanelId, origin: Vec2) -> bool {
        let Some(floating) = self.floating.iter_mut().find(|f| f.group.contains(id)) else {
            return false;
        };
        floating.bounds.x = origin.x;
        floating.bounds.y = origin.y;
        self.events.push(LayoutEvent::LayoutChanged);
        true
    }

    pub fn raise_floating(&mut self, id: PanelId) -> bool {
        let Some(index) = self.floating.iter().position(|f| f.group.contains(id)) else {
            return false;
        };
        let top = self.floating.remove(index);
        self.floating.push(top);
        true
    }

    /// Detach from whatever holds the panel. Returns false if it was already hidden.
    pub fn hide(&mut self, id: PanelId) -> bool {
        match self.detach(id) {
            Origin::Nowhere => false,
            origin => {
                self.settle(origin);
                true
            }
        }
    }

    /// Make the panel its group's visible tab; a floating panel is raised.
    pub fn activate(&mut self, id: PanelId) -> bool {
        if let Some(edge) = self.placement(id).edge() {
            let tree = &mut self.docks[edge.index()];
            let changed = tree.set_active(id);
            tree.rebuild();
            self.events.push(LayoutEvent::LayoutChanged);
            return changed;
        }
        self.raise_floating(id)
    }

    /// Empty every container. All panels end up hidden.
    pub fn clear(&mut self) {
        for edge in Edge::ALL {
            self.docks[edge.index()].clear();
            self.rebuild_edge(edge);
        }
        self.floating.clear();
    }

    // ── Geometry ─────────────────────────────────

    /// Root content bounds, floating-surface origin (root coordinates) and DPI scale.
    pub fn set_geometry(&mut self, root: Rect, surface_origin: Vec2, scale_factor: f32) {
        self.root_bounds = root;
        self.surface_origin = surface_origin;
        self.scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    }

    pub fn root_bounds(&self) -> Rect {
        self.root_bounds
    }

    pub fn surface_origin(&self) -> Vec2 {
        self.surface_origin
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn to_surface(&self, rect: Rect) -> Rect {
        rect.translate(Vec2::ZERO - self.surface_origin)
    }

    pub fn to_root(&self, rect: Rect) -> Rect {
        rect.translate(self.surface_origin)
    }

    pub fn set_dock_bounds(&mut self, edge: Edge, bounds: Rect, preview_extent: f32) {
        self.docks[edge.index()].set_bounds(bounds, preview_extent);
    }

    pub fn resize_splitter(&mut self, edge: Edge, index: usize, delta: f32) -> bool {
        let resized = self.docks[edge.index()].resize_splitter(index, delta);
        if resized {
            self.events.push(LayoutEvent::LayoutChanged);
        }
        resized
    }

    /// On-screen rect of a visible panel, root coordinates.
    pub fn panel_rect(&self, id: PanelId) -> Option<Rect> {
        match self.placement(id) {
            Placement::Docked { edge, .. } => self.dock(edge).slot_of(id).map(|s| s.rect),
            Placement::Floating { bounds } => Some(self.to_root(bounds)),
            Placement::Hidden => None,
        }
    }

    fn floating_strip(&self, floating: &FloatingGroup) -> Rect {
        let bounds = self.to_root(floating.bounds);
        let height = self.dock(Edge::Left).metrics().tab_strip_height.min(bounds.height);
        Rect::new(bounds.x, bounds.y, bounds.width, height)
    }

    /// Tab or title bar under `point`; floating groups are tested first, topmost first.
    pub fn tab_hit(&self, point: Vec2) -> Option<TabHit> {
        for floating in self.floating.iter().rev() {
            let strip = self.floating_strip(floating);
            if strip.contains(point) {
                let panel = floating.group.active_panel()?;
                return Some(TabHit {
                    panel,
                    tab: strip,
                    floating: true,
                });
            }
        }
        for tree in &self.docks {
            for slot in tree.slots() {
                if let Some(panel) = slot.tab_at(point) {
                    let tab = slot
                        .panels
                        .iter()
                        .position(|&p| p == panel)
                        .and_then(|i| slot.tab_rect(i))
                        .unwrap_or(slot.tab_strip);
                    return Some(TabHit {
                        panel,
                        tab,
                        floating: false,
                    });
                }
            }
        }
        None
    }

    /// Docked group whose tab strip is under `point`, excluding the group holding
    /// `exclude`. Yields the merge target and its slot rect.
    pub fn tab_merge_target(&self, point: Vec2, exclude: PanelId) -> Option<(PanelId, Rect)> {
        self.docks
            .iter()
            .flat_map(|tree| tree.slots())
            .filter(|slot| !slot.panels.contains(&exclude))
            .find(|slot| slot.tab_strip_rect().is_some_and(|r| r.contains(point)))
            .map(|slot| (slot.tab_target(), slot.rect))
    }

    /// Edge whose drop area contains `point`. Collapsed edges offer a hot strip.
    pub fn dock_edge_at(&self, point: Vec2) -> Option<Edge> {
        let hot = self.hot_rect_size * self.scale_factor;
        Edge::ALL
            .into_iter()
            .find(|&edge| self.dock(edge).hit_rect(hot, self.root_bounds).contains(point))
    }

    pub fn preview_for(&self, edge: Edge, point: Vec2) -> Option<Rect> {
        self.dock(edge).preview_rect(point)
    }

    // ── Serialization ────────────────────────────

    pub fn dock_layout(&self, edge: Edge) -> DockGridLayout {
        self.dock(edge).get_layout(|id| self.title_of(id))
    }

    /// Replace an edge's contents with a stored layout. Panels it names are pulled
    /// out of any other container first.
    pub fn apply_dock_layout(&mut self, edge: Edge, layout: Option<&DockGridLayout>) {
        let by_title: HashMap<String, PanelId> = self
            .panels
            .iter()
            .map(|p| (p.title.clone(), p.id))
            .collect();
        if let Some(layout) = layout {
            let named: Vec<PanelId> = layout
                .items
                .iter()
                .flat_map(|item| item.panels.iter())
                .filter_map(|title| by_title.get(title).copied())
                .collect();
            for id in named {
                let origin = self.detach(id);
                if !matches!(origin, Origin::Docked(e) if e == edge) {
                    self.settle(origin);
                }
            }
        }
        let changed = self.docks[edge.index()]
            .apply_layout(layout, |title| by_title.get(title).copied());
        if changed {
            self.events.push(LayoutEvent::DockedItemsChanged(edge));
        }
        self.events.push(LayoutEvent::LayoutChanged);
    }

    // ── Events ───────────────────────────────────

    pub fn push_event(&mut self, event: LayoutEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for DockModel {
    fn default() -> Self {
        Self::new(DockMetrics::default())
    }
}
