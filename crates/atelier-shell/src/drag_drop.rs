use atelier_core::{CaptureTarget, Edge, PanelId, PointerCapture, Rect, Vec2};
use atelier_layout::DockModel;

// ──────────────────────────────────────────────
// Pointer input fed to the controller
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Pointer went down on `panel`'s tab or title bar. Root coordinates.
    Press { pos: Vec2, panel: PanelId },
    Move { pos: Vec2 },
    Release { pos: Vec2 },
    /// The windowing layer took pointer capture away.
    CaptureLost,
}

// ──────────────────────────────────────────────
// Drop target: tab strip or dock edge
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropTarget {
    /// Merge into the docked group that holds `target`.
    Tab { target: PanelId },
    /// Insert as a new slot of `edge` at the pointer position.
    Dock { edge: Edge },
}

/// What a handled event did to the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    None,
    /// Press and release without crossing the threshold.
    Clicked(PanelId),
    /// A docked panel was torn off onto the floating surface.
    TornOff(PanelId),
    Tabbed { panel: PanelId, target: PanelId },
    Docked { panel: PanelId, edge: Edge, index: usize },
    /// Dropped with no target; the panel stays floating where it was dragged.
    LeftFloating(PanelId),
    /// Capture could not be recovered; nothing was committed.
    Aborted,
}

// ──────────────────────────────────────────────
// Panel drag & drop state machine
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    PotentialDrag {
        source: PanelId,
        press_pos: Vec2,
        /// Pointer position minus the panel's top-left at press time.
        offset: Vec2,
        from_floating: bool,
        capture: CaptureTarget,
    },
    /// A docked source, now torn off and following the pointer.
    DraggingDocked {
        source: PanelId,
        offset: Vec2,
        capture: CaptureTarget,
        drop_target: Option<DropTarget>,
    },
    /// A source that was already floating when the drag began.
    DraggingFloating {
        source: PanelId,
        offset: Vec2,
        capture: CaptureTarget,
        drop_target: Option<DropTarget>,
    },
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
    /// Threshold in logical px; scaled by the model's DPI factor.
    threshold: f32,
    /// Drop preview in floating-surface coordinates.
    preview: Option<Rect>,
    /// Set by `cancel`; capture is handed back on the next event.
    release_pending: bool,
}

impl DragController {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
            preview: None,
            release_pending: false,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn preview(&self) -> Option<Rect> {
        self.preview
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            DragState::DraggingDocked { .. } | DragState::DraggingFloating { .. }
        )
    }

    pub fn source(&self) -> Option<PanelId> {
        match self.state {
            DragState::Idle => None,
            DragState::PotentialDrag { source, .. }
            | DragState::DraggingDocked { source, .. }
            | DragState::DraggingFloating { source, .. } => Some(source),
        }
    }

    /// Drop the drag without committing anything, e.g. when its source panel
    /// was hidden mid-drag. Returns whether a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        self.state = DragState::Idle;
        self.preview = None;
        self.release_pending = true;
        true
    }

    pub fn handle_event(
        &mut self,
        event: DragEvent,
        model: &mut DockModel,
        capture: &mut dyn PointerCapture,
    ) -> DragOutcome {
        if std::mem::take(&mut self.release_pending) {
            capture.release();
        }
        if let (Some(source), DragEvent::Move { .. } | DragEvent::Release { .. }) = (self.source(), event) {
            if !model.is_visible(source) {
                log::debug!("Panel {source} went away mid-drag; aborting");
                return self.abort(capture);
            }
        }
        match event {
            DragEvent::Press { pos, panel } => self.on_press(pos, panel, model, capture),
            DragEvent::Move { pos } => self.on_move(pos, model, capture),
            DragEvent::Release { pos } => self.on_release(pos, model, capture),
            DragEvent::CaptureLost => self.on_capture_lost(capture),
        }
    }

    fn on_press(
        &mut self,
        pos: Vec2,
        panel: PanelId,
        model: &mut DockModel,
        capture: &mut dyn PointerCapture,
    ) -> DragOutcome {
        if !self.is_idle() {
            return DragOutcome::None;
        }
        let Some(rect) = model.panel_rect(panel) else {
            return DragOutcome::None;
        };
        let from_floating = model.placement(panel).is_floating();
        if from_floating {
            model.raise_floating(panel);
        }

        let target = CaptureTarget::TabStrip(panel);
        if !capture.capture(target) {
            log::warn!("Could not capture pointer for panel {panel}");
        }
        self.state = DragState::PotentialDrag {
            source: panel,
            press_pos: pos,
            offset: pos - rect.origin(),
            from_floating,
            capture: target,
        };
        DragOutcome::None
    }

    fn on_move(
        &mut self,
        pos: Vec2,
        model: &mut DockModel,
        capture: &mut dyn PointerCapture,
    ) -> DragOutcome {
        match self.state {
            DragState::Idle => DragOutcome::None,
            DragState::PotentialDrag {
                source,
                press_pos,
                offset,
                from_floating,
                capture: target,
            } => {
                let limit = self.threshold * model.scale_factor();
                if (pos - press_pos).length_squared() <= limit * limit {
                    return DragOutcome::None;
                }
                let can_float = model.panel(source).is_some_and(|p| p.can_float);
                if !from_floating && !can_float {
                    return DragOutcome::None;
                }

                let mut outcome = DragOutcome::None;
                if from_floating {
                    self.state = DragState::DraggingFloating {
                        source,
                        offset,
                        capture: target,
                        drop_target: None,
                    };
                } else {
                    let Some(rect) = model.panel_rect(source) else {
                        return self.abort(capture);
                    };
                    let bounds = model.to_surface(rect);
                    model.float(source, bounds);
                    // The torn-off panel has a fresh title bar; keep capture on it.
                    capture.capture(target);
                    log::debug!("Tore off panel {source} at {bounds:?}");
                    self.state = DragState::DraggingDocked {
                        source,
                        offset,
                        capture: target,
                        drop_target: None,
                    };
                    outcome = DragOutcome::TornOff(source);
                }
                self.track(pos, model);
                outcome
            }
            DragState::DraggingDocked { .. } | DragState::DraggingFloating { .. } => {
                self.track(pos, model);
                DragOutcome::None
            }
        }
    }

    /// Follow the pointer and refresh the drop target and preview.
    fn track(&mut self, pos: Vec2, model: &mut DockModel) {
        let (source, offset) = match self.state {
            DragState::DraggingDocked { source, offset, .. }
            | DragState::DraggingFloating { source, offset, .. } => (source, offset),
            _ => return,
        };
        let origin = pos - offset - model.surface_origin();
        model.move_floating(source, origin);

        let (target, preview) = match model.tab_merge_target(pos, source) {
            Some((target, rect)) => (Some(DropTarget::Tab { target }), Some(rect)),
            None => match model.dock_edge_at(pos) {
                Some(edge) => (Some(DropTarget::Dock { edge }), model.preview_for(edge, pos)),
                None => (None, None),
            },
        };
        self.preview = preview.map(|r| model.to_surface(r));
        match &mut self.state {
            DragState::DraggingDocked { drop_target, .. }
            | DragState::DraggingFloating { drop_target, .. } => *drop_target = target,
            _ => {}
        }
    }

    fn on_release(
        &mut self,
        pos: Vec2,
        model: &mut DockModel,
        capture: &mut dyn PointerCapture,
    ) -> DragOutcome {
        let state = self.state;
        self.state = DragState::Idle;
        self.preview = None;

        let outcome = match state {
            DragState::Idle => return DragOutcome::None,
            DragState::PotentialDrag { source, .. } => DragOutcome::Clicked(source),
            DragState::DraggingDocked {
                source,
                drop_target,
                ..
            }
            | DragState::DraggingFloating {
                source,
                drop_target,
                ..
            } => match drop_target {
                Some(DropTarget::Tab { target }) if model.dock_as_tab(source, target) => {
                    log::debug!("Merged panel {source} into the group of {target}");
                    DragOutcome::Tabbed {
                        panel: source,
                        target,
                    }
                }
                Some(DropTarget::Dock { edge }) => match model.dock_at(source, edge, pos) {
                    Some(index) => {
                        log::debug!("Docked panel {source} on {edge} at slot {index}");
                        DragOutcome::Docked {
                            panel: source,
                            edge,
                            index,
                        }
                    }
                    None => DragOutcome::LeftFloating(source),
                },
                _ => DragOutcome::LeftFloating(source),
            },
        };
        capture.release();
        outcome
    }

    /// Re-acquire capture on the last target, then the source panel, then the
    /// floating surface. Abort only when all three refuse.
    fn on_capture_lost(&mut self, capture: &mut dyn PointerCapture) -> DragOutcome {
        let (source, last) = match self.state {
            DragState::Idle => return DragOutcome::None,
            DragState::PotentialDrag {
                source,
                capture: last,
                ..
            }
            | DragState::DraggingDocked {
                source,
                capture: last,
                ..
            }
            | DragState::DraggingFloating {
                source,
                capture: last,
                ..
            } => (source, last),
        };

        let candidates = [
            last,
            CaptureTarget::Panel(source),
            CaptureTarget::FloatingSurface,
        ];
        for candidate in candidates {
            if capture.capture(candidate) {
                log::debug!("Recovered pointer capture on {candidate:?}");
                self.set_capture(candidate);
                return DragOutcome::None;
            }
        }
        log::warn!("Pointer capture lost during drag of panel {source}; aborting");
        self.abort(capture)
    }

    fn set_capture(&mut self, target: CaptureTarget) {
        match &mut self.state {
            DragState::PotentialDrag { capture, .. }
            | DragState::DraggingDocked { capture, .. }
            | DragState::DraggingFloating { capture, .. } => *capture = target,
            DragState::Idle => {}
        }
    }

    fn abort(&mut self, capture: &mut dyn PointerCapture) -> DragOutcome {
        self.state = DragState::Idle;
        self.preview = None;
        capture.release();
        DragOutcome::Aborted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::NoopCapture;
    use atelier_layout::Placement;

    /// Capture sink that records requests and refuses listed targets.
    #[derive(Default)]
    struct ScriptedCapture {
        refuse: Vec<CaptureTarget>,
        requests: Vec<CaptureTarget>,
        released: usize,
    }

    impl PointerCapture for ScriptedCapture {
        fn capture(&mut self, target: CaptureTarget) -> bool {
            self.requests.push(target);
            !self.refuse.contains(&target)
        }

        fn release(&mut self) {
            self.released += 1;
        }
    }

    /// Left edge with A over B, right edge with C, bottom collapsed.
    fn model() -> (DockModel, [PanelId; 3]) {
        let mut model = DockModel::default();
        model.set_geometry(Rect::new(0.0, 0.0, 1200.0, 800.0), Vec2::new(0.0, 0.0), 1.0);
        let a = model.register_panel("A", Edge::Left).unwrap();
        let b = model.register_panel("B", Edge::Left).unwrap();
        let c = model.register_panel("C", Edge::Right).unwrap();
        model.dock_to_edge(a, Edge::Left);
        model.dock_to_edge(b, Edge::Left);
        model.dock_to_edge(c, Edge::Right);
        model.set_dock_bounds(Edge::Left, Rect::new(0.0, 0.0, 250.0, 804.0), 250.0);
        model.set_dock_bounds(Edge::Right, Rect::new(950.0, 0.0, 250.0, 800.0), 250.0);
        model.set_dock_bounds(Edge::Bottom, Rect::new(250.0, 800.0, 700.0, 0.0), 200.0);
        (model, [a, b, c])
    }

    fn press(ctl: &mut DragController, model: &mut DockModel, pos: Vec2, panel: PanelId) {
        ctl.handle_event(DragEvent::Press { pos, panel }, model, &mut NoopCapture);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let (mut model, [a, ..]) = model();
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(100.0, 10.0), a);

        ctl.handle_event(DragEvent::Move { pos: Vec2::new(109.0, 10.0) }, &mut model, &mut NoopCapture);
        assert!(matches!(ctl.state(), DragState::PotentialDrag { .. }));
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(110.0, 10.0) }, &mut model, &mut NoopCapture);
        assert!(matches!(ctl.state(), DragState::PotentialDrag { .. }));
        assert!(model.placement(a).is_docked());

        let outcome =
            ctl.handle_event(DragEvent::Move { pos: Vec2::new(111.0, 10.0) }, &mut model, &mut NoopCapture);
        assert_eq!(outcome, DragOutcome::TornOff(a));
        assert!(matches!(ctl.state(), DragState::DraggingDocked { .. }));
        assert!(model.placement(a).is_floating());
    }

    #[test]
    fn threshold_scales_with_dpi() {
        let (mut model, [a, ..]) = model();
        model.set_geometry(model.root_bounds(), Vec2::ZERO, 2.0);
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(100.0, 10.0), a);
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(115.0, 10.0) }, &mut model, &mut NoopCapture);
        assert!(!ctl.is_dragging());
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(121.0, 10.0) }, &mut model, &mut NoopCapture);
        assert!(ctl.is_dragging());
    }

    #[test]
    fn click_without_movement_reports_click() {
        let (mut model, [_, b, _]) = model();
        let mut ctl = DragController::new(10.0);
        let mut capture = ScriptedCapture::default();
        ctl.handle_event(DragEvent::Press { pos: Vec2::new(50.0, 410.0), panel: b }, &mut model, &mut capture);
        let outcome = ctl.handle_event(DragEvent::Release { pos: Vec2::new(52.0, 411.0) }, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::Clicked(b));
        assert!(ctl.is_idle());
        assert_eq!(capture.released, 1);
        assert!(model.placement(b).is_docked());
    }

    #[test]
    fn torn_off_panel_keeps_pointer_offset() {
        let (mut model, [a, ..]) = model();
        model.set_geometry(model.root_bounds(), Vec2::new(0.0, 40.0), 1.0);
        let mut ctl = DragController::new(10.0);
        // A occupies (0, 0, 250, 400); grab it 30px in, 12px down.
        press(&mut ctl, &mut model, Vec2::new(30.0, 12.0), a);
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(530.0, 312.0) }, &mut model, &mut NoopCapture);

        let Placement::Floating { bounds } = model.placement(a) else {
            panic!("expected floating");
        };
        // Surface coordinates: root position minus the surface origin.
        assert_eq!(bounds.x, 500.0);
        assert_eq!(bounds.y, 260.0);
        assert_eq!(bounds.width, 250.0);
    }

    #[test]
    fn drop_on_tab_strip_merges_and_activates() {
        let (mut model, [a, _, c]) = model();
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(30.0, 10.0), a);
        let over_c_tab = Vec2::new(1000.0, 10.0);
        ctl.handle_event(DragEvent::Move { pos: over_c_tab }, &mut model, &mut NoopCapture);
        assert_eq!(ctl.preview(), Some(Rect::new(950.0, 0.0, 250.0, 800.0)));

        let outcome = ctl.handle_event(DragEvent::Release { pos: over_c_tab }, &mut model, &mut NoopCapture);
        assert_eq!(outcome, DragOutcome::Tabbed { panel: a, target: c });
        assert!(ctl.preview().is_none());
        assert!(matches!(
            model.placement(a),
            Placement::Docked { edge: Edge::Right, tabbed: true, active: true, .. }
        ));
        assert!(model.floating().is_empty());
        assert!(model.is_consistent());
    }

    #[test]
    fn drop_on_collapsed_bottom_edge_docks() {
        let (mut model, [_, b, _]) = model();
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(30.0, 410.0), b);
        let near_bottom = Vec2::new(600.0, 760.0);
        ctl.handle_event(DragEvent::Move { pos: near_bottom }, &mut model, &mut NoopCapture);
        assert_eq!(ctl.preview(), Some(Rect::new(250.0, 600.0, 700.0, 200.0)));

        let outcome = ctl.handle_event(DragEvent::Release { pos: near_bottom }, &mut model, &mut NoopCapture);
        assert_eq!(
            outcome,
            DragOutcome::Docked { panel: b, edge: Edge::Bottom, index: 0 }
        );
        assert_eq!(model.placement(b).edge(), Some(Edge::Bottom));
        assert_eq!(model.dock(Edge::Left).len(), 1);
    }

    #[test]
    fn drop_in_empty_space_leaves_panel_floating() {
        let (mut model, [a, ..]) = model();
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(30.0, 10.0), a);
        let middle = Vec2::new(600.0, 300.0);
        ctl.handle_event(DragEvent::Move { pos: middle }, &mut model, &mut NoopCapture);
        assert!(ctl.preview().is_none());
        let outcome = ctl.handle_event(DragEvent::Release { pos: middle }, &mut model, &mut NoopCapture);
        assert_eq!(outcome, DragOutcome::LeftFloating(a));
        assert!(model.placement(a).is_floating());
    }

    #[test]
    fn floating_source_drags_without_tearing_off() {
        let (mut model, [a, ..]) = model();
        model.float(a, Rect::new(400.0, 300.0, 200.0, 150.0));
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(420.0, 305.0), a);
        let outcome =
            ctl.handle_event(DragEvent::Move { pos: Vec2::new(470.0, 305.0) }, &mut model, &mut NoopCapture);
        assert_eq!(outcome, DragOutcome::None);
        assert!(matches!(ctl.state(), DragState::DraggingFloating { .. }));
        assert_eq!(model.panel_rect(a).map(|r| r.x), Some(450.0));
    }

    #[test]
    fn locked_docked_panel_never_detaches() {
        let (mut model, [a, ..]) = model();
        model.set_can_float_all(false);
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(30.0, 10.0), a);
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(600.0, 300.0) }, &mut model, &mut NoopCapture);
        assert!(model.placement(a).is_docked());
        let outcome =
            ctl.handle_event(DragEvent::Release { pos: Vec2::new(600.0, 300.0) }, &mut model, &mut NoopCapture);
        assert_eq!(outcome, DragOutcome::Clicked(a));
    }

    #[test]
    fn capture_loss_falls_back_through_targets() {
        let (mut model, [a, ..]) = model();
        let mut ctl = DragController::new(10.0);
        let mut capture = ScriptedCapture::default();
        ctl.handle_event(DragEvent::Press { pos: Vec2::new(30.0, 10.0), panel: a }, &mut model, &mut capture);
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(300.0, 300.0) }, &mut model, &mut capture);

        capture.refuse = vec![CaptureTarget::TabStrip(a), CaptureTarget::Panel(a)];
        capture.requests.clear();
        let outcome = ctl.handle_event(DragEvent::CaptureLost, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::None);
        assert_eq!(
            capture.requests,
            vec![
                CaptureTarget::TabStrip(a),
                CaptureTarget::Panel(a),
                CaptureTarget::FloatingSurface
            ]
        );
        assert!(ctl.is_dragging());
        assert!(matches!(
            ctl.state(),
            DragState::DraggingDocked { capture: CaptureTarget::FloatingSurface, .. }
        ));
    }

    #[test]
    fn capture_loss_aborts_when_nothing_accepts() {
        let (mut model, [a, ..]) = model();
        let mut ctl = DragController::new(10.0);
        let mut capture = ScriptedCapture::default();
        ctl.handle_event(DragEvent::Press { pos: Vec2::new(30.0, 10.0), panel: a }, &mut model, &mut capture);
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(1000.0, 10.0) }, &mut model, &mut capture);
        assert!(ctl.preview().is_some());

        capture.refuse = vec![
            CaptureTarget::TabStrip(a),
            CaptureTarget::Panel(a),
            CaptureTarget::FloatingSurface,
        ];
        let outcome = ctl.handle_event(DragEvent::CaptureLost, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::Aborted);
        assert!(ctl.is_idle());
        assert!(ctl.preview().is_none());
        // Nothing was committed: the panel did not merge into C's group.
        assert!(model.placement(a).is_floating());
        assert_eq!(model.dock(Edge::Right).groups()[0].len(), 1);
    }

    #[test]
    fn capture_loss_before_threshold_recovers_or_aborts() {
        let (mut model, [a, ..]) = model();
        let mut ctl = DragController::new(10.0);
        let mut capture = ScriptedCapture::default();
        ctl.handle_event(DragEvent::Press { pos: Vec2::new(30.0, 10.0), panel: a }, &mut model, &mut capture);

        capture.refuse = vec![CaptureTarget::TabStrip(a)];
        let outcome = ctl.handle_event(DragEvent::CaptureLost, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::None);
        assert!(matches!(
            ctl.state(),
            DragState::PotentialDrag { capture: CaptureTarget::Panel(_), .. }
        ));

        capture.refuse.extend([CaptureTarget::Panel(a), CaptureTarget::FloatingSurface]);
        let outcome = ctl.handle_event(DragEvent::CaptureLost, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::Aborted);
        assert!(ctl.is_idle());
        assert_eq!(capture.released, 1);
        // The press never became a drag, so nothing moved.
        assert!(model.placement(a).is_docked());
        let outcome = ctl.handle_event(DragEvent::Release { pos: Vec2::new(30.0, 10.0) }, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::None);
    }

    #[test]
    fn hidden_source_is_never_dropped() {
        let (mut model, [a, ..]) = model();
        let mut ctl = DragController::new(10.0);
        let mut capture = ScriptedCapture::default();
        ctl.handle_event(DragEvent::Press { pos: Vec2::new(30.0, 10.0), panel: a }, &mut model, &mut capture);
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(600.0, 300.0) }, &mut model, &mut capture);
        model.hide(a);

        let over_right = Vec2::new(1150.0, 400.0);
        let outcome = ctl.handle_event(DragEvent::Release { pos: over_right }, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::Aborted);
        assert!(ctl.is_idle());
        assert_eq!(capture.released, 1);
        assert!(model.placement(a).is_hidden());
        assert_eq!(model.dock(Edge::Right).len(), 1);
    }

    #[test]
    fn cancel_hands_capture_back_on_next_event() {
        let (mut model, [a, ..]) = model();
        let mut ctl = DragController::new(10.0);
        let mut capture = ScriptedCapture::default();
        assert!(!ctl.cancel());
        ctl.handle_event(DragEvent::Press { pos: Vec2::new(30.0, 10.0), panel: a }, &mut model, &mut capture);
        ctl.handle_event(DragEvent::Move { pos: Vec2::new(1000.0, 10.0) }, &mut model, &mut capture);
        assert!(ctl.cancel());
        assert!(ctl.is_idle());
        assert!(ctl.preview().is_none());
        assert_eq!(capture.released, 0);

        let outcome = ctl.handle_event(DragEvent::Release { pos: Vec2::new(1000.0, 10.0) }, &mut model, &mut capture);
        assert_eq!(outcome, DragOutcome::None);
        assert_eq!(capture.released, 1);
        assert!(model.placement(a).is_floating());
        assert_eq!(model.dock(Edge::Right).groups()[0].len(), 1);
    }

    #[test]
    fn second_press_during_drag_is_ignored() {
        let (mut model, [a, b, _]) = model();
        let mut ctl = DragController::new(10.0);
        press(&mut ctl, &mut model, Vec2::new(30.0, 10.0), a);
        press(&mut ctl, &mut model, Vec2::new(30.0, 410.0), b);
        assert_eq!(ctl.source(), Some(a));
    }
}
