// Layout persistence: snapshots of the live arrangement, reconciliation with the
// previous per-panel records, named profiles and the debounced autosave.

use std::time::{Duration, Instant};

use atelier_core::{Edge, LayoutEvent, PanelId, Rect, ToolbarPosition};
use atelier_layout::{DockModel, DockSlot};

use crate::layout_compute::EdgeSizes;
use crate::profile::{is_reserved_profile, LayoutConfig, PanelState, WorkspaceProfiles, DEFAULT_PROFILE};
use crate::store::ProfileStore;

// ──────────────────────────────────────────────
// Live state a snapshot is taken from
// ──────────────────────────────────────────────

#[derive(Debug)]
pub struct Workspace {
    pub model: DockModel,
    pub sizes: EdgeSizes,
    pub toolbar: ToolbarPosition,
}

// ──────────────────────────────────────────────
// Debounce timer
// ──────────────────────────────────────────────

/// Trailing-edge debounce driven by the host loop. Every `notify` pushes the
/// deadline out; `poll` fires once after the last notification settles.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

// ──────────────────────────────────────────────
// Snapshot and restore
// ──────────────────────────────────────────────

fn carried(previous: &LayoutConfig, title: &str) -> PanelState {
    previous
        .state(title)
        .cloned()
        .unwrap_or_else(|| PanelState::new(title))
}

/// Capture the arrangement. Every registered panel gets a record: docked and
/// floating panels from where they are now, hidden ones carried forward from
/// `previous` so they remember where to come back.
pub fn build_snapshot(workspace: &Workspace, previous: &LayoutConfig) -> LayoutConfig {
    let model = &workspace.model;
    let mut config = LayoutConfig {
        toolbar_position: workspace.toolbar.as_str().to_string(),
        ..LayoutConfig::default()
    };
    let mut hidden = 0;

    for edge in Edge::ALL {
        config.set_edge_size(edge, workspace.sizes.get(edge));
        let grid = model.dock_layout(edge);
        for (dock_index, item) in grid.items.iter().enumerate() {
            for (tab_index, title) in item.panels.iter().enumerate() {
                let mut state = carried(previous, title);
                state.is_hidden = false;
                state.is_floating = false;
                state.is_tabbed = item.panels.len() > 1;
                state.dock_edge = edge.as_str().to_string();
                state.dock_index = dock_index;
                state.tab_index = tab_index;
                state.was_active = item.active_index == tab_index;
                if let Some(&proportion) = grid.item_sizes.get(dock_index) {
                    state.docked_proportion = proportion;
                }
                config.panels.push(state);
            }
        }
        *config.dock_grid_mut(edge) = Some(grid);
    }

    for floating in model.floating() {
        for &id in floating.group.panels() {
            let Some(title) = model.title_of(id) else {
                continue;
            };
            let mut state = carried(previous, title);
            state.is_hidden = false;
            state.is_floating = true;
            state.is_tabbed = false;
            state.set_floating_bounds(floating.bounds);
            config.panels.push(state);
        }
    }

    for panel in model.panels() {
        if config.state(&panel.title).is_some() {
            continue;
        }
        hidden += 1;
        let mut state = carried(previous, &panel.title);
        state.is_hidden = true;
        config.panels.push(state);
    }
    log::trace!(
        "Snapshot: {} panel records, {} hidden",
        config.panels.len(),
        hidden
    );
    config
}

/// Replace the arrangement with `config`. Titles that no longer resolve are
/// skipped; edge sizes and the toolbar keep their current values when the
/// stored ones are unusable.
pub fn apply_snapshot(workspace: &mut Workspace, config: &LayoutConfig) {
    for edge in Edge::ALL {
        let size = config.edge_size(edge);
        if size > 0.0 {
            workspace.sizes.set(edge, size);
        }
    }
    match config.toolbar() {
        Some(position) => workspace.toolbar = position,
        None => log::warn!("Unknown toolbar position '{}'", config.toolbar_position),
    }

    let model = &mut workspace.model;
    model.clear();
    for edge in Edge::ALL {
        model.apply_dock_layout(edge, config.dock_grid(edge));
    }
    for state in &config.panels {
        if state.is_hidden || !state.is_floating {
            continue;
        }
        let Some(id) = model.panel_by_title(&state.title) else {
            log::debug!("Skipping unknown floating panel '{}'", state.title);
            continue;
        };
        if model.is_visible(id) {
            continue;
        }
        model.float(id, state.floating_bounds());
    }
}

/// Where a shown panel goes back to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Restore {
    Float(Rect),
    Dock(Edge, DockSlot),
}

/// Resolve a panel's record against the current arrangement. A tabbed record
/// rejoins the slot at its index only when that slot's members were recorded
/// at the same edge and index; otherwise it gets a fresh slot there.
pub fn restore_target(model: &DockModel, config: &LayoutConfig, id: PanelId) -> Option<Restore> {
    let panel = model.panel(id)?;
    let append = |edge: Edge| {
        Restore::Dock(
            edge,
            DockSlot::NewSlot {
                index: model.dock(edge).len(),
                weight: None,
            },
        )
    };
    let Some(state) = config.state(&panel.title) else {
        return Some(append(panel.home_edge));
    };

    if state.is_floating {
        let bounds = state.floating_bounds();
        if bounds.width > 0.0 && bounds.height > 0.0 {
            return Some(Restore::Float(bounds));
        }
        return Some(append(panel.home_edge));
    }

    let Some(edge) = state.edge() else {
        return Some(append(Edge::Left));
    };
    let tree = model.dock(edge);
    let index = state.dock_index.min(tree.len());

    let joins = state.is_tabbed
        && tree.groups().get(index).is_some_and(|group| {
            group.panels().iter().any(|&member| {
                model
                    .title_of(member)
                    .and_then(|title| config.state(title))
                    .is_some_and(|s| s.dock_edge == state.dock_edge && s.dock_index == state.dock_index)
            })
        });
    let slot = if joins {
        DockSlot::Tab {
            index,
            tab_index: state.tab_index,
            activate: state.was_active,
        }
    } else {
        let weight = if state.docked_proportion > 0.0 {
            state.docked_proportion
        } else {
            1.0
        };
        DockSlot::NewSlot {
            index,
            weight: Some(weight),
        }
    };
    Some(Restore::Dock(edge, slot))
}

// ──────────────────────────────────────────────
// LayoutPersistence
// ──────────────────────────────────────────────

#[derive(Debug)]
pub struct LayoutPersistence {
    store: Option<ProfileStore>,
    profiles: WorkspaceProfiles,
    /// Records from the last sync, the source of truth for hidden panels.
    current: LayoutConfig,
    default_config: LayoutConfig,
    applying: bool,
    debouncer: SaveDebouncer,
}

impl LayoutPersistence {
    /// `store` of `None` keeps everything in memory.
    pub fn new(store: Option<ProfileStore>, default_config: LayoutConfig, debounce: Duration) -> Self {
        let mut profiles = WorkspaceProfiles::default();
        profiles.ensure_default(|| default_config.clone());
        Self {
            store,
            profiles,
            current: default_config.clone(),
            default_config,
            applying: false,
            debouncer: SaveDebouncer::new(debounce),
        }
    }

    pub fn profiles(&self) -> &WorkspaceProfiles {
        &self.profiles
    }

    pub fn current(&self) -> &LayoutConfig {
        &self.current
    }

    pub fn record(&self, title: &str) -> Option<&PanelState> {
        self.current.state(title)
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    pub fn is_save_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Read the profile file, migrating or seeding as needed, write the
    /// normalized set back and return the active profile's layout. Any read
    /// failure falls back to the default arrangement.
    pub fn load(&mut self) -> LayoutConfig {
        let loaded = match &self.store {
            Some(store) => match store.read() {
                Ok(set) => set,
                Err(e) => {
                    log::warn!("Ignoring saved layout: {e}");
                    None
                }
            },
            None => None,
        };
        let mut profiles = loaded.unwrap_or_default();
        profiles.ensure_default(|| self.default_config.clone());
        log::info!(
            "Loaded {} workspace profile(s), active '{}'",
            profiles.profiles.len(),
            profiles.active_profile
        );
        self.profiles = profiles;
        self.write();

        self.profiles
            .active()
            .cloned()
            .unwrap_or_else(|| self.default_config.clone())
    }

    /// Apply `config` under the re-entrancy guard. Events raised while applying
    /// are drained and handed back without arming the autosave.
    pub fn apply(&mut self, workspace: &mut Workspace, config: &LayoutConfig) -> Vec<LayoutEvent> {
        self.applying = true;
        apply_snapshot(workspace, config);
        let events = workspace.model.take_events();
        self.current = build_snapshot(workspace, config);
        self.applying = false;
        events
    }

    /// Structural change notification; restarts the save timer.
    pub fn on_layout_changed(&mut self, now: Instant) {
        if self.applying {
            return;
        }
        self.debouncer.notify(now);
    }

    /// Refresh the per-panel records from the live arrangement.
    pub fn sync(&mut self, workspace: &Workspace) {
        self.current = build_snapshot(workspace, &self.current);
    }

    pub fn set_hidden(&mut self, title: &str, hidden: bool) {
        if let Some(state) = self.current.state_mut(title) {
            state.is_hidden = hidden;
        }
    }

    /// Save if the debounce deadline has passed. Returns whether it saved.
    pub fn tick(&mut self, now: Instant, workspace: &Workspace) -> bool {
        if !self.debouncer.poll(now) {
            return false;
        }
        self.save_now(workspace);
        true
    }

    /// Snapshot into the active profile and write the set.
    pub fn save_now(&mut self, workspace: &Workspace) {
        self.debouncer.cancel();
        self.sync(workspace);
        let name = self.profiles.active_profile.clone();
        self.profiles.profiles.insert(name, self.current.clone());
        self.write();
    }

    fn write(&self) -> bool {
        let Some(store) = &self.store else {
            return true;
        };
        match store.write(&self.profiles) {
            Ok(()) => {
                log::debug!("Saved workspace profiles to {}", store.path().display());
                true
            }
            Err(e) => {
                log::error!("Failed to save workspace profiles: {e}");
                false
            }
        }
    }

    // ── Profiles ─────────────────────────────────

    pub fn active_profile(&self) -> &str {
        &self.profiles.active_profile
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.names()
    }

    /// Store the live arrangement under `name` and make it active. Empty names
    /// and the reserved name are rejected.
    pub fn save_profile(&mut self, name: &str, workspace: &Workspace) -> bool {
        let name = name.trim();
        if name.is_empty() || is_reserved_profile(name) {
            log::warn!("Refusing to save workspace profile '{name}'");
            return false;
        }
        self.sync(workspace);
        self.profiles
            .profiles
            .insert(name.to_string(), self.current.clone());
        self.profiles.active_profile = name.to_string();
        self.debouncer.cancel();
        log::info!("Saved workspace profile '{name}'");
        self.write();
        true
    }

    /// Activate and apply a stored profile. `None` if it does not exist.
    pub fn load_profile(&mut self, name: &str, workspace: &mut Workspace) -> Option<Vec<LayoutEvent>> {
        let name = if is_reserved_profile(name) {
            DEFAULT_PROFILE
        } else {
            name
        };
        if name.trim().is_empty() {
            return None;
        }
        let config = match self.profiles.get(name) {
            Some(config) => config.clone(),
            None if name == DEFAULT_PROFILE => self.default_config.clone(),
            None => return None,
        };
        self.profiles.active_profile = name.to_string();
        let events = self.apply(workspace, &config);
        self.debouncer.cancel();
        log::info!("Loaded workspace profile '{name}'");
        self.write();
        Some(events)
    }

    pub fn load_default(&mut self, workspace: &mut Workspace) -> Option<Vec<LayoutEvent>> {
        self.load_profile(DEFAULT_PROFILE, workspace)
    }

    /// Remove a user profile. Removing the active one makes Default active
    /// without touching the live arrangement.
    pub fn delete_profile(&mut self, name: &str) -> bool {
        if is_reserved_profile(name) || self.profiles.profiles.remove(name).is_none() {
            return false;
        }
        if self.profiles.active_profile == name {
            self.profiles.active_profile = DEFAULT_PROFILE.to_string();
        }
        log::info!("Deleted workspace profile '{name}'");
        self.write();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Vec2;
    use atelier_layout::{DockGridLayout, DockItemLayout, Placement};

    fn workspace() -> (Workspace, [PanelId; 4]) {
        let mut model = DockModel::default();
        model.set_geometry(Rect::new(0.0, 0.0, 1200.0, 800.0), Vec2::ZERO, 1.0);
        let a = model.register_panel("A", Edge::Left).unwrap();
        let b = model.register_panel("B", Edge::Left).unwrap();
        let c = model.register_panel("C", Edge::Left).unwrap();
        let d = model.register_panel("D", Edge::Right).unwrap();
        model.dock_to_edge(a, Edge::Left);
        model.dock_to_edge(b, Edge::Left);
        model.dock_to_edge(c, Edge::Left);
        model.dock_as_tab(d, c);
        model.take_events();
        let workspace = Workspace {
            model,
            sizes: EdgeSizes {
                left: 250.0,
                right: 250.0,
                bottom: 200.0,
            },
            toolbar: ToolbarPosition::Top,
        };
        (workspace, [a, b, c, d])
    }

    fn memory(workspace: &Workspace) -> LayoutPersistence {
        let seed = build_snapshot(workspace, &LayoutConfig::default());
        LayoutPersistence::new(None, seed, Duration::from_millis(300))
    }

    fn same_placement(left: Placement, right: Placement) -> bool {
        match (left, right) {
            (
                Placement::Docked { edge, dock_index, tab_index, tabbed, active, proportion },
                Placement::Docked {
                    edge: e2,
                    dock_index: d2,
                    tab_index: t2,
                    tabbed: tb2,
                    active: a2,
                    proportion: p2,
                },
            ) => {
                edge == e2
                    && dock_index == d2
                    && tab_index == t2
                    && tabbed == tb2
                    && active == a2
                    && (proportion - p2).abs() < 1e-4
            }
            (l, r) => l == r,
        }
    }

    // ──────────────────────────────────────────────
    // Debounce
    // ──────────────────────────────────────────────

    #[test]
    fn debouncer_fires_once_after_last_notify() {
        let start = Instant::now();
        let mut debouncer = SaveDebouncer::new(Duration::from_millis(300));
        assert!(!debouncer.poll(start));
        debouncer.notify(start);
        debouncer.notify(start + Duration::from_millis(200));
        assert!(!debouncer.poll(start + Duration::from_millis(400)));
        assert!(debouncer.poll(start + Duration::from_millis(500)));
        assert!(!debouncer.poll(start + Duration::from_millis(900)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn changes_during_apply_do_not_arm_save() {
        let (mut ws, _) = workspace();
        let mut persistence = memory(&ws);
        let config = build_snapshot(&ws, &LayoutConfig::default());
        let events = persistence.apply(&mut ws, &config);
        assert!(events.contains(&LayoutEvent::LayoutChanged));
        assert!(!persistence.is_save_pending());
        assert!(!persistence.is_applying());

        persistence.on_layout_changed(Instant::now());
        assert!(persistence.is_save_pending());
    }

    // ──────────────────────────────────────────────
    // Snapshot / restore
    // ──────────────────────────────────────────────

    #[test]
    fn snapshot_records_every_panel() {
        let (mut ws, [a, _, c, d]) = workspace();
        ws.model.float(a, Rect::new(300.0, 200.0, 220.0, 180.0));
        let config = build_snapshot(&ws, &LayoutConfig::default());
        assert_eq!(config.panels.len(), 4);

        let a_state = config.state("A").unwrap();
        assert!(a_state.is_floating && !a_state.is_hidden);
        assert_eq!(a_state.floating_bounds(), Rect::new(300.0, 200.0, 220.0, 180.0));

        let d_state = config.state("D").unwrap();
        assert_eq!(d_state.dock_edge, "Left");
        assert_eq!((d_state.dock_index, d_state.tab_index), (1, 1));
        assert!(d_state.is_tabbed && d_state.was_active);
        assert!(!config.state("C").unwrap().was_active);
        assert_eq!(ws.model.placement(c).edge(), ws.model.placement(d).edge());
        assert!((d_state.docked_proportion - 0.5).abs() < 1e-5);
    }

    #[test]
    fn hidden_panel_keeps_previous_record() {
        let (mut ws, [_, b, ..]) = workspace();
        let before = build_snapshot(&ws, &LayoutConfig::default());
        ws.model.hide(b);
        let after = build_snapshot(&ws, &before);
        let state = after.state("B").unwrap();
        assert!(state.is_hidden);
        assert_eq!(state.dock_edge, "Left");
        assert_eq!(state.dock_index, 1);
    }

    #[test]
    fn apply_of_snapshot_round_trips() {
        let (mut ws, ids) = workspace();
        ws.model.float(ids[0], Rect::new(300.0, 200.0, 220.0, 180.0));
        ws.model.dock_to_edge(ids[1], Edge::Bottom);
        ws.toolbar = ToolbarPosition::Left;
        let before: Vec<Placement> = ids.iter().map(|&id| ws.model.placement(id)).collect();
        let config = build_snapshot(&ws, &LayoutConfig::default());

        ws.model.clear();
        ws.toolbar = ToolbarPosition::Top;
        apply_snapshot(&mut ws, &config);

        for (&id, expected) in ids.iter().zip(before) {
            assert!(same_placement(ws.model.placement(id), expected), "panel {id}");
        }
        assert_eq!(ws.toolbar, ToolbarPosition::Left);
        assert!(ws.model.is_consistent());
    }

    #[test]
    fn apply_skips_unknown_titles_and_keeps_sizes() {
        let (mut ws, [a, ..]) = workspace();
        let config = LayoutConfig {
            left_dock_grid: Some(DockGridLayout {
                dock_edge: "Left".into(),
                items: vec![
                    DockItemLayout { panels: vec!["Gone".into()], active_index: 0 },
                    DockItemLayout { panels: vec!["A".into()], active_index: 0 },
                ],
                item_sizes: vec![0.5, 0.5],
            }),
            left_dock_width: 0.0,
            right_dock_width: 320.0,
            toolbar_position: "Sideways".into(),
            ..LayoutConfig::default()
        };
        apply_snapshot(&mut ws, &config);
        assert_eq!(ws.model.dock(Edge::Left).len(), 1);
        assert!(ws.model.placement(a).is_docked());
        assert_eq!(ws.sizes.left, 250.0);
        assert_eq!(ws.sizes.right, 320.0);
        assert_eq!(ws.toolbar, ToolbarPosition::Top);
    }

    #[test]
    fn hide_then_show_restores_slot_tab_and_active() {
        let (mut ws, [_, _, c, d]) = workspace();
        let mut persistence = memory(&ws);
        persistence.sync(&ws);

        persistence.set_hidden("D", true);
        ws.model.hide(d);
        persistence.sync(&ws);
        assert!(persistence.record("D").unwrap().is_hidden);

        let target = restore_target(&ws.model, persistence.current(), d).unwrap();
        assert_eq!(
            target,
            Restore::Dock(Edge::Left, DockSlot::Tab { index: 2, tab_index: 1, activate: true })
        );
        let Restore::Dock(edge, slot) = target else { unreachable!() };
        ws.model.dock_into(d, edge, slot);
        assert!(matches!(
            ws.model.placement(d),
            Placement::Docked { edge: Edge::Left, dock_index: 2, tab_index: 1, active: true, .. }
        ));
        assert_eq!(ws.model.placement(c).edge(), Some(Edge::Left));
    }

    #[test]
    fn tab_restore_survives_interim_undock_and_redock() {
        let (mut ws, [a, _, c, d]) = workspace();
        let mut persistence = memory(&ws);
        persistence.sync(&ws);
        persistence.set_hidden("D", true);
        ws.model.hide(d);
        persistence.sync(&ws);

        ws.model.float(a, Rect::new(400.0, 300.0, 200.0, 150.0));
        persistence.sync(&ws);
        assert_eq!(persistence.record("C").unwrap().dock_index, 1);
        assert!(ws.model.dock_into(a, Edge::Left, DockSlot::NewSlot { index: 0, weight: None }));
        persistence.sync(&ws);
        assert_eq!(persistence.record("C").unwrap().dock_index, 2);

        let target = restore_target(&ws.model, persistence.current(), d).unwrap();
        assert_eq!(
            target,
            Restore::Dock(Edge::Left, DockSlot::Tab { index: 2, tab_index: 1, activate: true })
        );
        let Restore::Dock(edge, slot) = target else { unreachable!() };
        assert!(ws.model.dock_into(d, edge, slot));
        assert!(matches!(
            ws.model.placement(d),
            Placement::Docked { edge: Edge::Left, dock_index: 2, tab_index: 1, active: true, .. }
        ));
        assert!(matches!(
            ws.model.placement(c),
            Placement::Docked { dock_index: 2, tab_index: 0, active: false, .. }
        ));
    }

    #[test]
    fn show_of_untabbed_panel_gets_new_slot_with_proportion() {
        let (mut ws, [_, b, ..]) = workspace();
        let mut persistence = memory(&ws);
        persistence.sync(&ws);
        ws.model.hide(b);
        persistence.sync(&ws);

        let target = restore_target(&ws.model, persistence.current(), b).unwrap();
        let Restore::Dock(Edge::Left, DockSlot::NewSlot { index: 1, weight: Some(w) }) = target else {
            panic!("unexpected target {target:?}");
        };
        assert!((w - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn show_without_record_appends_to_home_edge() {
        let (ws, [.., d]) = workspace();
        let target = restore_target(&ws.model, &LayoutConfig::default(), d).unwrap();
        assert_eq!(
            target,
            Restore::Dock(Edge::Right, DockSlot::NewSlot { index: 0, weight: None })
        );
    }

    // ──────────────────────────────────────────────
    // Profiles
    // ──────────────────────────────────────────────

    #[test]
    fn profile_rules() {
        let (mut ws, [a, ..]) = workspace();
        let mut persistence = memory(&ws);
        assert!(!persistence.save_profile("   ", &ws));
        assert!(!persistence.save_profile("default", &ws));
        assert!(persistence.save_profile("  Painting ", &ws));
        assert_eq!(persistence.active_profile(), "Painting");
        assert_eq!(persistence.profile_names(), vec!["Painting"]);

        ws.model.hide(a);
        assert!(persistence.load_profile("Painting", &mut ws).is_some());
        assert!(ws.model.placement(a).is_docked());
        assert!(persistence.load_profile("Missing", &mut ws).is_none());

        assert!(!persistence.delete_profile("Default"));
        assert!(persistence.delete_profile("Painting"));
        assert_eq!(persistence.active_profile(), DEFAULT_PROFILE);
    }

    #[test]
    fn load_migrates_and_writes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{ "leftDockWidth": 300, "panels": [] }"#).unwrap();
        let (ws, _) = workspace();
        let seed = build_snapshot(&ws, &LayoutConfig::default());
        let mut persistence =
            LayoutPersistence::new(Some(ProfileStore::at(&path)), seed, Duration::from_millis(300));

        let active = persistence.load();
        assert_eq!(active.left_dock_width, 300.0);
        assert_eq!(persistence.active_profile(), "Last Workspace");

        let written = ProfileStore::at(&path).read().unwrap().unwrap();
        assert!(written.get(DEFAULT_PROFILE).is_some());
        assert!(written.get("Last Workspace").is_some());
    }

    #[test]
    fn corrupt_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, "{ nope").unwrap();
        let (ws, _) = workspace();
        let seed = build_snapshot(&ws, &LayoutConfig::default());
        let mut persistence =
            LayoutPersistence::new(Some(ProfileStore::at(&path)), seed.clone(), Duration::ZERO);
        assert_eq!(persistence.load(), seed);
        assert_eq!(persistence.active_profile(), DEFAULT_PROFILE);
    }

    #[test]
    fn failed_write_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let (mut ws, [a, ..]) = workspace();
        let seed = build_snapshot(&ws, &LayoutConfig::default());
        let store = ProfileStore::at(blocker.join("layout.json"));
        let mut persistence = LayoutPersistence::new(Some(store), seed, Duration::ZERO);

        ws.model.hide(a);
        let now = Instant::now();
        persistence.on_layout_changed(now);
        assert!(persistence.tick(now, &ws));
        let saved = persistence.profiles().active().unwrap();
        assert!(saved.state("A").unwrap().is_hidden);
    }

    #[test]
    fn autosave_writes_into_active_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let (mut ws, [a, ..]) = workspace();
        let seed = build_snapshot(&ws, &LayoutConfig::default());
        let mut persistence =
            LayoutPersistence::new(Some(ProfileStore::at(&path)), seed, Duration::from_millis(300));
        persistence.load();

        ws.model.float(a, Rect::new(10.0, 10.0, 200.0, 100.0));
        let now = Instant::now();
        persistence.on_layout_changed(now);
        assert!(!persistence.tick(now, &ws));
        assert!(persistence.tick(now + Duration::from_millis(300), &ws));

        let written = ProfileStore::at(&path).read().unwrap().unwrap();
        let default = written.get(DEFAULT_PROFILE).unwrap();
        assert!(default.state("A").unwrap().is_floating);
    }
}
