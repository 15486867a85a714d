// Toolbar grip drag: snaps the toolbar to whichever window edge the pointer is
// released near. No tabbing or docking, only the four edges.

use atelier_core::{CaptureTarget, PointerCapture, Rect, ToolbarPosition, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GripEvent {
    Press(Vec2),
    Move(Vec2),
    Release(Vec2),
    CaptureLost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GripState {
    Idle,
    Pressed { press_pos: Vec2 },
    Dragging,
}

#[derive(Debug)]
pub struct ToolbarDrag {
    state: GripState,
    position: ToolbarPosition,
    threshold: f32,
    snap_distance: f32,
    thickness: f32,
    preview: Option<Rect>,
}

impl ToolbarDrag {
    pub fn new(position: ToolbarPosition, threshold: f32, snap_distance: f32, thickness: f32) -> Self {
        Self {
            state: GripState::Idle,
            position,
            threshold,
            snap_distance,
            thickness,
            preview: None,
        }
    }

    pub fn position(&self) -> ToolbarPosition {
        self.position
    }

    pub fn set_position(&mut self, position: ToolbarPosition) {
        self.position = position;
    }

    pub fn state(&self) -> GripState {
        self.state
    }

    /// Edge strip the toolbar would occupy, window coordinates.
    pub fn preview(&self) -> Option<Rect> {
        self.preview
    }

    /// Returns the new position when a release moved the toolbar.
    pub fn handle_event(
        &mut self,
        event: GripEvent,
        window: Rect,
        scale_factor: f32,
        capture: &mut dyn PointerCapture,
    ) -> Option<ToolbarPosition> {
        match event {
            GripEvent::Press(pos) => {
                if self.state == GripState::Idle {
                    capture.capture(CaptureTarget::ToolbarGrip);
                    self.state = GripState::Pressed { press_pos: pos };
                }
                None
            }
            GripEvent::Move(pos) => {
                if let GripState::Pressed { press_pos } = self.state {
                    let limit = self.threshold * scale_factor;
                    if (pos - press_pos).length_squared() >= limit * limit {
                        self.state = GripState::Dragging;
                    }
                }
                if self.state == GripState::Dragging {
                    let target = detect_edge(pos, window, self.position, self.snap_distance);
                    self.preview = edge_strip(target, window, self.thickness);
                }
                None
            }
            GripEvent::Release(pos) => {
                if self.state == GripState::Idle {
                    return None;
                }
                self.state = GripState::Idle;
                self.preview = None;
                capture.release();
                let target = detect_edge(pos, window, self.position, self.snap_distance);
                if target == self.position {
                    return None;
                }
                log::debug!("Toolbar moved to {}", target.as_str());
                self.position = target;
                Some(target)
            }
            GripEvent::CaptureLost => {
                self.state = GripState::Idle;
                self.preview = None;
                None
            }
        }
    }
}

/// Nearest window edge within `snap_distance`, ties resolved Top, Bottom, Left,
/// Right. Anything farther keeps `current`.
pub fn detect_edge(
    pos: Vec2,
    window: Rect,
    current: ToolbarPosition,
    snap_distance: f32,
) -> ToolbarPosition {
    let candidates = [
        (ToolbarPosition::Top, pos.y - window.y),
        (ToolbarPosition::Bottom, window.bottom() - pos.y),
        (ToolbarPosition::Left, pos.x - window.x),
        (ToolbarPosition::Right, window.right() - pos.x),
    ];
    let min = candidates
        .iter()
        .map(|&(_, d)| d)
        .fold(f32::INFINITY, f32::min);
    candidates
        .iter()
        .find(|&&(_, d)| d == min && d < snap_distance)
        .map(|&(edge, _)| edge)
        .unwrap_or(current)
}

/// Strip of `thickness` along the toolbar's edge; `None` for a floating toolbar.
pub fn edge_strip(position: ToolbarPosition, window: Rect, thickness: f32) -> Option<Rect> {
    let w = window;
    match position {
        ToolbarPosition::Top => Some(Rect::new(w.x, w.y, w.width, thickness)),
        ToolbarPosition::Bottom => Some(Rect::new(w.x, w.bottom() - thickness, w.width, thickness)),
        ToolbarPosition::Left => Some(Rect::new(w.x, w.y, thickness, w.height)),
        ToolbarPosition::Right => Some(Rect::new(w.right() - thickness, w.y, thickness, w.height)),
        ToolbarPosition::Floating => None,
    }
}
