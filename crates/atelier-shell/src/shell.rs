// Shell façade: owns the dock model, both drag controllers and persistence, and
// turns host input into layout changes plus a queue of host-facing events.

use std::time::Instant;

use atelier_core::{Edge, LayoutEvent, PanelId, PointerCapture, Rect, ToolbarPosition, Vec2};
use atelier_layout::DockModel;

use crate::drag_drop::{DragController, DragEvent, DragOutcome};
use crate::layout_compute::{clamp_edge_size, compute_edge_rects, EdgeSizes, ShellRects};
use crate::persistence::{build_snapshot, restore_target, LayoutPersistence, Restore, Workspace};
use crate::profile::LayoutConfig;
use crate::settings::ShellSettings;
use crate::store::ProfileStore;
use crate::toolbar::{GripEvent, ToolbarDrag};

/// A panel the host contributes. Its content stays with the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDescriptor {
    pub title: String,
    pub initial_edge: Edge,
}

impl PanelDescriptor {
    pub fn new(title: &str, initial_edge: Edge) -> Self {
        Self {
            title: title.to_string(),
            initial_edge,
        }
    }
}

/// The compiled-in arrangement, also the seed of the Default profile.
pub fn default_panels() -> Vec<PanelDescriptor> {
    vec![
        PanelDescriptor::new("Layers", Edge::Left),
        PanelDescriptor::new("Properties", Edge::Left),
        PanelDescriptor::new("Color", Edge::Left),
        PanelDescriptor::new("Brushes", Edge::Left),
        PanelDescriptor::new("History", Edge::Right),
        PanelDescriptor::new("Timeline", Edge::Bottom),
    ]
}

// ──────────────────────────────────────────────
// Shell
// ──────────────────────────────────────────────

pub struct Shell {
    settings: ShellSettings,
    workspace: Workspace,
    drag: DragController,
    toolbar: ToolbarDrag,
    persistence: LayoutPersistence,
    window: Rect,
    scale_factor: f32,
    rects: ShellRects,
    locked: bool,
    /// Events ready for the host. Anything queued here has already been
    /// accounted for by the autosave.
    outbox: Vec<LayoutEvent>,
}

impl Shell {
    /// Register `panels` on their initial edges. That arrangement becomes the
    /// Default profile; call `load` to switch to the persisted one.
    pub fn new(settings: ShellSettings, panels: &[PanelDescriptor], store: Option<ProfileStore>) -> Self {
        let mut model = DockModel::new(settings.dock_metrics());
        for descriptor in panels {
            if let Some(id) = model.register_panel(&descriptor.title, descriptor.initial_edge) {
                model.dock_to_edge(id, descriptor.initial_edge);
            }
        }
        model.take_events();

        let workspace = Workspace {
            model,
            sizes: EdgeSizes::from_settings(&settings),
            toolbar: ToolbarPosition::default(),
        };
        let default_config = build_snapshot(&workspace, &LayoutConfig::default());
        let persistence = LayoutPersistence::new(store, default_config, settings.save_debounce());
        let toolbar = ToolbarDrag::new(
            workspace.toolbar,
            settings.drag_threshold,
            settings.toolbar_snap_distance,
            settings.toolbar_thickness,
        );
        let window = Rect::ZERO;

        let mut shell = Self {
            drag: DragController::new(settings.drag_threshold),
            toolbar,
            persistence,
            window,
            scale_factor: 1.0,
            rects: compute_edge_rects(window, workspace.toolbar, settings.toolbar_thickness, &workspace.sizes, |_| false),
            locked: false,
            outbox: Vec::new(),
            workspace,
            settings,
        };
        shell.relayout();
        shell
    }

    /// Load the profile file and apply its active profile.
    pub fn load(&mut self) {
        let config = self.persistence.load();
        self.apply(&config);
    }

    fn apply(&mut self, config: &LayoutConfig) {
        let events = self.persistence.apply(&mut self.workspace, config);
        self.after_apply(events);
    }

    fn after_apply(&mut self, events: Vec<LayoutEvent>) {
        self.outbox.extend(events);
        self.toolbar.set_position(self.workspace.toolbar);
        self.workspace.model.set_can_float_all(!self.locked);
        self.relayout();
    }

    // ── Accessors ────────────────────────────────

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn model(&self) -> &DockModel {
        &self.workspace.model
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn persistence(&self) -> &LayoutPersistence {
        &self.persistence
    }

    pub fn rects(&self) -> &ShellRects {
        &self.rects
    }

    pub fn window(&self) -> Rect {
        self.window
    }

    pub fn toolbar_position(&self) -> ToolbarPosition {
        self.workspace.toolbar
    }

    pub fn edge_size(&self, edge: Edge) -> f32 {
        self.workspace.sizes.get(edge)
    }

    pub fn panel_id(&self, title: &str) -> Option<PanelId> {
        self.workspace.model.panel_by_title(title)
    }

    /// Drop preview of the panel drag, floating-surface coordinates.
    pub fn drag_preview(&self) -> Option<Rect> {
        self.drag.preview()
    }

    /// Strip the toolbar would snap to, window coordinates.
    pub fn toolbar_preview(&self) -> Option<Rect> {
        self.toolbar.preview()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_workspace_locked(&self) -> bool {
        self.locked
    }

    // ── Geometry ─────────────────────────────────

    pub fn set_window(&mut self, window: Rect, scale_factor: f32) {
        self.window = window;
        self.scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        self.relayout();
    }

    /// Recompute host rects from the window, toolbar and edge occupancy and push
    /// them into the dock trees. Collapsed edges keep their cached size as the
    /// preview extent.
    pub fn relayout(&mut self) {
        let model = &self.workspace.model;
        self.rects = compute_edge_rects(
            self.window,
            self.workspace.toolbar,
            self.settings.toolbar_thickness,
            &self.workspace.sizes,
            |edge| !model.dock(edge).is_empty(),
        );
        let left = self.rects.dock(Edge::Left);
        let right = self.rects.dock(Edge::Right);
        let root = Rect::new(left.x, left.y, right.right() - left.x, left.height);

        let model = &mut self.workspace.model;
        model.set_geometry(root, self.window.origin(), self.scale_factor);
        for edge in Edge::ALL {
            model.set_dock_bounds(edge, self.rects.dock(edge), self.workspace.sizes.get(edge));
        }
    }

    pub fn resize_edge(&mut self, edge: Edge, size: f32) {
        let size = clamp_edge_size(edge, size, self.window, &self.settings);
        self.workspace.sizes.set(edge, size);
        self.workspace.model.push_event(LayoutEvent::LayoutChanged);
        self.relayout();
    }

    pub fn resize_splitter(&mut self, edge: Edge, index: usize, delta: f32) -> bool {
        self.workspace.model.resize_splitter(edge, index, delta)
    }

    // ── Pointer input ────────────────────────────

    /// Press on a tab or floating title bar starts a potential drag. Returns
    /// whether the press hit one.
    pub fn pointer_press(&mut self, pos: Vec2, capture: &mut dyn PointerCapture) -> bool {
        let Some(hit) = self.workspace.model.tab_hit(pos) else {
            return false;
        };
        self.drag.handle_event(
            DragEvent::Press {
                pos,
                panel: hit.panel,
            },
            &mut self.workspace.model,
            capture,
        );
        true
    }

    pub fn pointer_move(&mut self, pos: Vec2, capture: &mut dyn PointerCapture) -> DragOutcome {
        let outcome = self
            .drag
            .handle_event(DragEvent::Move { pos }, &mut self.workspace.model, capture);
        if let DragOutcome::TornOff(_) = outcome {
            self.relayout();
        }
        outcome
    }

    /// Commits the drag. A press that never became a drag activates the tab.
    pub fn pointer_release(&mut self, pos: Vec2, capture: &mut dyn PointerCapture) -> DragOutcome {
        let outcome = self
            .drag
            .handle_event(DragEvent::Release { pos }, &mut self.workspace.model, capture);
        match outcome {
            DragOutcome::None => {}
            DragOutcome::Clicked(id) => {
                self.workspace.model.activate(id);
            }
            _ => self.relayout(),
        }
        outcome
    }

    pub fn capture_lost(&mut self, capture: &mut dyn PointerCapture) -> DragOutcome {
        self.drag
            .handle_event(DragEvent::CaptureLost, &mut self.workspace.model, capture)
    }

    /// Toolbar grip input. Returns the new toolbar position when it moved.
    pub fn grip_event(&mut self, event: GripEvent, capture: &mut dyn PointerCapture) -> Option<ToolbarPosition> {
        let moved = self
            .toolbar
            .handle_event(event, self.window, self.scale_factor, capture)?;
        self.workspace.toolbar = moved;
        let model = &mut self.workspace.model;
        model.push_event(LayoutEvent::ToolbarMoved(moved));
        model.push_event(LayoutEvent::LayoutChanged);
        self.relayout();
        Some(moved)
    }

    // ── Panel visibility ─────────────────────────

    pub fn is_panel_visible(&self, id: PanelId) -> bool {
        self.workspace.model.is_visible(id)
    }

    pub fn hide_panel(&mut self, id: PanelId) -> bool {
        let Some(title) = self.workspace.model.title_of(id).map(str::to_string) else {
            return false;
        };
        if !self.workspace.model.is_visible(id) {
            return false;
        }
        if self.drag.source() == Some(id) && self.drag.cancel() {
            log::debug!("Cancelled drag of panel '{title}'");
        }
        self.persistence.sync(&self.workspace);
        self.persistence.set_hidden(&title, true);
        self.workspace.model.hide(id);
        self.workspace.model.push_event(LayoutEvent::PanelVisibilityChanged);
        log::debug!("Hid panel '{title}'");
        self.relayout();
        true
    }

    /// Put a hidden panel back where its record says it was.
    pub fn show_panel(&mut self, id: PanelId) -> bool {
        if self.workspace.model.is_visible(id) {
            return false;
        }
        self.persistence.sync(&self.workspace);
        let Some(target) = restore_target(&self.workspace.model, self.persistence.current(), id) else {
            return false;
        };
        let model = &mut self.workspace.model;
        let shown = match target {
            Restore::Float(bounds) => model.float(id, bounds),
            Restore::Dock(edge, slot) => model.dock_into(id, edge, slot),
        };
        if shown {
            model.push_event(LayoutEvent::PanelVisibilityChanged);
            log::debug!("Showed panel {id} via {target:?}");
            self.persistence.sync(&self.workspace);
            self.relayout();
        }
        shown
    }

    /// Returns the new visibility.
    pub fn toggle_panel(&mut self, id: PanelId) -> bool {
        if self.is_panel_visible(id) {
            self.hide_panel(id);
        } else {
            self.show_panel(id);
        }
        self.is_panel_visible(id)
    }

    /// Close button on a tab or floating title bar. Hides just this panel; its
    /// group goes away only when nothing is left in it.
    pub fn close_panel(&mut self, id: PanelId) -> bool {
        if !self.is_panel_visible(id) {
            return false;
        }
        self.workspace.model.push_event(LayoutEvent::CloseRequested(id));
        self.hide_panel(id)
    }

    pub fn activate_panel(&mut self, id: PanelId) -> bool {
        self.workspace.model.activate(id)
    }

    /// Flip the workspace lock. Locked docked panels stay put when dragged.
    pub fn toggle_workspace_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.workspace.model.set_can_float_all(!self.locked);
        log::debug!("Workspace lock {}", if self.locked { "on" } else { "off" });
        self.locked
    }

    // ── Events and autosave ──────────────────────

    /// Move fresh model events to the outbox, restarting the save timer for
    /// anything that changed the arrangement.
    fn pump(&mut self, now: Instant) {
        let events = self.workspace.model.take_events();
        if events.iter().any(|e| {
            matches!(
                e,
                LayoutEvent::LayoutChanged
                    | LayoutEvent::DockedItemsChanged(_)
                    | LayoutEvent::PanelVisibilityChanged
                    | LayoutEvent::ToolbarMoved(_)
            )
        }) {
            self.persistence.on_layout_changed(now);
        }
        self.outbox.extend(events);
    }

    pub fn take_events(&mut self, now: Instant) -> Vec<LayoutEvent> {
        self.pump(now);
        std::mem::take(&mut self.outbox)
    }

    /// Drive the debounced autosave. Returns whether a save happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.pump(now);
        self.persistence.tick(now, &self.workspace)
    }

    pub fn save_now(&mut self) {
        self.persistence.save_now(&self.workspace);
    }

    // ── Profiles ─────────────────────────────────

    pub fn profile_names(&self) -> Vec<String> {
        self.persistence.profile_names()
    }

    pub fn active_profile(&self) -> &str {
        self.persistence.active_profile()
    }

    pub fn save_profile(&mut self, name: &str) -> bool {
        self.persistence.save_profile(name, &self.workspace)
    }

    pub fn load_profile(&mut self, name: &str) -> bool {
        match self.persistence.load_profile(name, &mut self.workspace) {
            Some(events) => {
                self.after_apply(events);
                true
            }
            None => false,
        }
    }

    pub fn load_default(&mut self) -> bool {
        match self.persistence.load_default(&mut self.workspace) {
            Some(events) => {
                self.after_apply(events);
                true
            }
            None => false,
        }
    }

    pub fn delete_profile(&mut self, name: &str) -> bool {
        self.persistence.delete_profile(name)
    }
}
