use atelier_core::{Edge, PanelId, Rect, SplitDirection, TabStripHitTest, Vec2};

use crate::normalize_sizes;
use crate::snapshot::{DockGridLayout, DockItemLayout};
use crate::tab_group::TabGroup;

// ──────────────────────────────────────────────
// Metrics
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeMetrics {
    /// Gap between adjacent slots.
    pub splitter_thickness: f32,
    /// Height of the tab strip / title bar at the top of every slot.
    pub tab_strip_height: f32,
    /// Smallest extent a splitter drag may shrink a slot to.
    pub min_slot_size: f32,
}

impl Default for TreeMetrics {
    fn default() -> Self {
        Self {
            splitter_thickness: 4.0,
            tab_strip_height: 24.0,
            min_slot_size: 50.0,
        }
    }
}

// ──────────────────────────────────────────────
// Slot: projected geometry of one tab group
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub index: usize,
    pub active: PanelId,
    pub panels: Vec<PanelId>,
    pub rect: Rect,
    pub tab_strip: Rect,
}

impl Slot {
    /// Rect of one tab; the strip is shared equally among the group's tabs.
    pub fn tab_rect(&self, tab_index: usize) -> Option<Rect> {
        if tab_index >= self.panels.len() {
            return None;
        }
        let width = self.tab_strip.width / self.panels.len() as f32;
        Some(Rect::new(
            self.tab_strip.x + width * tab_index as f32,
            self.tab_strip.y,
            width,
            self.tab_strip.height,
        ))
    }

    /// Panel whose tab (or title bar, for a single-panel group) is under `point`.
    pub fn tab_at(&self, point: Vec2) -> Option<PanelId> {
        if self.tab_strip.is_empty() || !self.tab_strip.contains(point) {
            return None;
        }
        (0..self.panels.len())
            .find(|&i| self.tab_rect(i).is_some_and(|r| r.contains(point)))
            .map(|i| self.panels[i])
    }
}

impl TabStripHitTest for Slot {
    fn tab_target(&self) -> PanelId {
        self.active
    }

    fn tab_strip_rect(&self) -> Option<Rect> {
        if self.tab_strip.is_empty() {
            None
        } else {
            Some(self.tab_strip)
        }
    }
}

// ──────────────────────────────────────────────
// DockTree
// ──────────────────────────────────────────────

/// Ordered list of tab groups docked along one edge. Side edges stack their slots
/// vertically; the bottom edge lays them out left to right. Each slot holds a
/// proportion of the tree's extent and the proportions always sum to 1.
///
/// Structural mutations leave the slot geometry stale until [`DockTree::rebuild`].
#[derive(Debug, Clone)]
pub struct DockTree {
    edge: Edge,
    metrics: TreeMetrics,
    groups: Vec<TabGroup>,
    sizes: Vec<f32>,
    /// Host rectangle in root coordinates; zero-sized along the edge axis when collapsed.
    bounds: Rect,
    /// Edge extent to preview against while the host is collapsed.
    preview_extent: f32,
    slots: Vec<Slot>,
    splitters: Vec<Rect>,
    last_count: usize,
}

impl DockTree {
    pub fn new(edge: Edge, metrics: TreeMetrics) -> Self {
        Self {
            edge,
            metrics,
            groups: Vec::new(),
            sizes: Vec::new(),
            bounds: Rect::ZERO,
            preview_extent: 0.0,
            slots: Vec::new(),
            splitters: Vec::new(),
            last_count: 0,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn direction(&self) -> SplitDirection {
        self.edge.split_direction()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn item_sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn splitters(&self) -> &[Rect] {
        &self.splitters
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn metrics(&self) -> TreeMetrics {
        self.metrics
    }

    /// Position the host. `preview_extent` is the edge size used for drop previews
    /// while the host is collapsed.
    pub fn set_bounds(&mut self, bounds: Rect, preview_extent: f32) {
        self.bounds = bounds;
        if preview_extent > 0.0 {
            self.preview_extent = preview_extent;
        }
        self.project();
    }

    pub fn contains(&self, panel: PanelId) -> bool {
        self.groups.iter().any(|g| g.contains(panel))
    }

    /// `(dock_index, tab_index)` of a docked panel.
    pub fn locate(&self, panel: PanelId) -> Option<(usize, usize)> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(i, g)| g.position(panel).map(|t| (i, t)))
    }

    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.groups
            .iter()
            .flat_map(|g| g.panels().iter().copied())
            .collect()
    }

    pub fn slot_of(&self, panel: PanelId) -> Option<&Slot> {
        let (index, _) = self.locate(panel)?;
        self.slots.get(index)
    }

    // ── Structural edits ─────────────────────────

    /// Append the panel as a new single-panel slot at the end.
    pub fn add_panel(&mut self, panel: PanelId) -> bool {
        if self.contains(panel) {
            return false;
        }
        let end = self.groups.len();
        self.insert_group(end, TabGroup::new(panel), None);
        true
    }

    /// Insert a whole group at `index` (clamped). `weight` is the group's share
    /// relative to the existing slots, which together weigh 1; `None` gives the
    /// new slot an equal share.
    pub fn insert_group(&mut self, index: usize, group: TabGroup, weight: Option<f32>) -> usize {
        let count = self.groups.len();
        let index = index.min(count);
        let weight = match weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ if count == 0 => 1.0,
            _ => 1.0 / count as f32,
        };
        self.groups.insert(index, group);
        self.sizes.insert(index, weight);
        normalize_sizes(&mut self.sizes);
        index
    }

    /// Add a panel as a tab of the slot at `dock_index`, at `tab_index` (clamped).
    pub fn insert_tab(
        &mut self,
        dock_index: usize,
        tab_index: usize,
        panel: PanelId,
        activate: bool,
    ) -> bool {
        if self.contains(panel) {
            return false;
        }
        let Some(group) = self.groups.get_mut(dock_index) else {
            return false;
        };
        group.insert_panel(tab_index, panel);
        if activate {
            group.set_active(panel);
        }
        true
    }

    /// Detach a panel. A group left empty is dropped and the remaining
    /// proportions are renormalized.
    pub fn remove_panel(&mut self, panel: PanelId) -> bool {
        let Some((index, _)) = self.locate(panel) else {
            return false;
        };
        self.groups[index].remove_panel(panel);
        if self.groups[index].is_empty() {
            self.groups.remove(index);
            self.sizes.remove(index);
            normalize_sizes(&mut self.sizes);
        }
        true
    }

    /// Insert the panel as a new slot at the position `point` (root coordinates)
    /// falls on. The panel is first removed if it already lives here.
    pub fn insert_at_position(&mut self, panel: PanelId, point: Vec2) -> usize {
        if self.remove_panel(panel) {
            self.project();
        }
        let index = self.find_target_index(point);
        self.insert_group(index, TabGroup::new(panel), None)
    }

    /// Merge `panel` into the group containing `target` and make it the visible tab.
    pub fn dock_as_tab(&mut self, panel: PanelId, target: PanelId) -> bool {
        if panel == target || !self.contains(target) {
            return false;
        }
        self.remove_panel(panel);
        let Some((index, _)) = self.locate(target) else {
            return false;
        };
        let group = &mut self.groups[index];
        group.add_panel(panel);
        group.set_active(panel);
        true
    }

    pub fn set_active(&mut self, panel: PanelId) -> bool {
        match self.locate(panel) {
            Some((index, _)) => self.groups[index].set_active(panel),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.sizes.clear();
    }

    // ── Geometry ─────────────────────────────────

    /// Slot index a drop at `point` lands on: the first measured slot whose
    /// midpoint along the split axis lies beyond the point, else the end.
    pub fn find_target_index(&self, point: Vec2) -> usize {
        let mut measured = false;
        for slot in &self.slots {
            if slot.rect.is_empty() {
                continue;
            }
            measured = true;
            let (coord, mid) = match self.direction() {
                SplitDirection::Horizontal => (point.x, slot.rect.x + slot.rect.width / 2.0),
                SplitDirection::Vertical => (point.y, slot.rect.y + slot.rect.height / 2.0),
            };
            if coord < mid {
                return slot.index;
            }
        }
        if measured {
            self.groups.len()
        } else {
            0
        }
    }

    /// Where the panel would land if dropped at `point`, in root coordinates.
    /// Works while the host is collapsed by previewing against the cached extent.
    pub fn preview_rect(&self, point: Vec2) -> Option<Rect> {
        let (width, height) = self.host_size();
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let index = self.find_target_index(point);
        let count = self.groups.len();
        let thickness = self.metrics.splitter_thickness;
        let axis = match self.direction() {
            SplitDirection::Horizontal => width,
            SplitDirection::Vertical => height,
        };
        let mut available = axis - count as f32 * thickness;
        if available <= 0.0 {
            available = axis;
        }
        let share = available / (count + 1) as f32;
        let offset = index as f32 * (share + thickness);
        let local = match self.direction() {
            SplitDirection::Horizontal => Rect::new(offset, 0.0, share, height),
            SplitDirection::Vertical => Rect::new(0.0, offset, width, share),
        };

        let mut origin = self.bounds.origin();
        if self.edge == Edge::Right && self.bounds.width <= 0.0 {
            origin.x -= width;
        }
        if self.edge == Edge::Bottom && self.bounds.height <= 0.0 {
            origin.y -= height;
        }
        Some(local.translate(origin))
    }

    /// Drop-target area. A collapsed host is widened into a strip of `hot_size`
    /// along its edge; a missing cross dimension falls back to `root`.
    pub fn hit_rect(&self, hot_size: f32, root: Rect) -> Rect {
        let b = self.bounds;
        if !b.is_empty() {
            return b;
        }
        let height = if b.height > 0.0 { b.height } else { root.height };
        let width = if b.width > 0.0 { b.width } else { root.width };
        match self.edge {
            Edge::Left => Rect::new(b.x, b.y, hot_size, height),
            Edge::Right => Rect::new(b.x - hot_size, b.y, hot_size, height),
            Edge::Bottom => Rect::new(b.x, b.y - hot_size, width, hot_size),
        }
    }

    fn host_size(&self) -> (f32, f32) {
        let mut width = self.bounds.width;
        let mut height = self.bounds.height;
        match self.edge {
            Edge::Left | Edge::Right if width <= 0.0 => width = self.preview_extent,
            Edge::Bottom if height <= 0.0 => height = self.preview_extent,
            _ => {}
        }
        (width, height)
    }

    /// Re-establish group invariants and recompute slot geometry.
    /// Returns true when the slot count differs from the previous rebuild.
    pub fn rebuild(&mut self) -> bool {
        let mut i = self.groups.len();
        while i > 0 {
            i -= 1;
            if self.groups[i].is_empty() {
                self.groups.remove(i);
                if i < self.sizes.len() {
                    self.sizes.remove(i);
                }
            }
        }
        for group in &mut self.groups {
            let active = group.active_index();
            group.set_active_index(active);
        }
        self.sizes.resize(self.groups.len(), 0.0);
        normalize_sizes(&mut self.sizes);
        self.project();

        let changed = self.groups.len() != self.last_count;
        self.last_count = self.groups.len();
        changed
    }

    /// Lay out slots and splitters inside the host bounds.
    fn project(&mut self) {
        self.slots.clear();
        self.splitters.clear();
        let count = self.groups.len();
        if count == 0 {
            return;
        }
        let direction = self.direction();
        let thickness = self.metrics.splitter_thickness;
        let b = self.bounds;
        let available = (b.extent(direction) - thickness * (count - 1) as f32).max(0.0);
        let mut cursor = match direction {
            SplitDirection::Horizontal => b.x,
            SplitDirection::Vertical => b.y,
        };

        for (index, group) in self.groups.iter().enumerate() {
            let length = available * self.sizes.get(index).copied().unwrap_or(0.0);
            let rect = match direction {
                SplitDirection::Horizontal => Rect::new(cursor, b.y, length, b.height),
                SplitDirection::Vertical => Rect::new(b.x, cursor, b.width, length),
            };
            cursor += length;

            if let Some(active) = group.active_panel() {
                let strip = self.metrics.tab_strip_height.min(rect.height).max(0.0);
                self.slots.push(Slot {
                    index,
                    active,
                    panels: group.panels().to_vec(),
                    rect,
                    tab_strip: Rect::new(rect.x, rect.y, rect.width, strip),
                });
            }

            if index + 1 < count {
                self.splitters.push(match direction {
                    SplitDirection::Horizontal => Rect::new(cursor, b.y, thickness, b.height),
                    SplitDirection::Vertical => Rect::new(b.x, cursor, b.width, thickness),
                });
                cursor += thickness;
            }
        }
    }

    /// Drag the splitter after slot `index` by `delta` pixels. Both neighbours keep
    /// at least the minimum slot size.
    pub fn resize_splitter(&mut self, index: usize, delta: f32) -> bool {
        if index + 1 >= self.groups.len() {
            return false;
        }
        let count = self.groups.len();
        let available = self.bounds.extent(self.direction())
            - self.metrics.splitter_thickness * (count - 1) as f32;
        if available <= 0.0 {
            return false;
        }
        let a = self.sizes[index] * available;
        let b = self.sizes[index + 1] * available;
        let pair = a + b;
        let min = self.metrics.min_slot_size.min(pair / 2.0);
        let new_a = (a + delta).clamp(min, pair - min);
        self.sizes[index] = new_a / available;
        self.sizes[index + 1] = (pair - new_a) / available;
        self.project();
        true
    }

    // ── Serialization ────────────────────────────

    /// Snapshot keyed by panel title. Panels `title_of` cannot name are left out.
    pub fn get_layout<'a>(&self, title_of: impl Fn(PanelId) -> Option<&'a str>) -> DockGridLayout {
        let mut items = Vec::new();
        let mut item_sizes = Vec::new();
        for (group, &size) in self.groups.iter().zip(&self.sizes) {
            let mut panels = Vec::new();
            let mut active_index = 0;
            for &panel in group.panels() {
                let Some(title) = title_of(panel) else {
                    continue;
                };
                if group.active_panel() == Some(panel) {
                    active_index = panels.len();
                }
                panels.push(title.to_string());
            }
            if panels.is_empty() {
                continue;
            }
            items.push(DockItemLayout {
                panels,
                active_index,
            });
            item_sizes.push(size);
        }
        normalize_sizes(&mut item_sizes);
        DockGridLayout {
            dock_edge: self.edge.as_str().to_string(),
            items,
            item_sizes,
        }
    }

    /// Replace the contents with `layout`. Titles `resolve` cannot map are skipped,
    /// groups left empty are dropped and sizes missing from the layout get an equal
    /// share. Returns the rebuild's count-changed flag.
    pub fn apply_layout(
        &mut self,
        layout: Option<&DockGridLayout>,
        mut resolve: impl FnMut(&str) -> Option<PanelId>,
    ) -> bool {
        self.clear();
        if let Some(layout) = layout {
            for (i, item) in layout.items.iter().enumerate() {
                let mut panels = Vec::new();
                let mut active = None;
                for (j, title) in item.panels.iter().enumerate() {
                    let Some(panel) = resolve(title) else {
                        continue;
                    };
                    if self.contains(panel) || panels.contains(&panel) {
                        continue;
                    }
                    if j == item.active_index {
                        active = Some(panel);
                    }
                    panels.push(panel);
                }
                if panels.is_empty() {
                    continue;
                }
                let mut group = TabGroup::from_panels(panels, item.active_index);
                if let Some(active) = active {
                    group.set_active(active);
                }
                self.groups.push(group);
                self.sizes
                    .push(layout.item_sizes.get(i).copied().unwrap_or(0.0));
            }
            normalize_sizes(&mut self.sizes);
        }
        self.rebuild()
    }
}
