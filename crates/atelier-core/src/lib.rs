use std::fmt;
use std::ops::{Add, Sub};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when either dimension has collapsed to zero (or below).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Extent along the axis a split direction divides.
    pub fn extent(&self, direction: SplitDirection) -> f32 {
        match direction {
            SplitDirection::Horizontal => self.width,
            SplitDirection::Vertical => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type PanelId = u64;

// ──────────────────────────────────────────────
// Docking edges
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitDirection {
    /// Slots side by side; splits divide the width.
    Horizontal,
    /// Slots stacked; splits divide the height.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Left,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 3] = [Edge::Left, Edge::Right, Edge::Bottom];

    /// Slots run perpendicular to the edge: side edges stack their slots,
    /// the bottom edge lays them out in a row.
    pub fn split_direction(self) -> SplitDirection {
        match self {
            Edge::Left | Edge::Right => SplitDirection::Vertical,
            Edge::Bottom => SplitDirection::Horizontal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Left => "Left",
            Edge::Right => "Right",
            Edge::Bottom => "Bottom",
        }
    }

    pub fn parse(s: &str) -> Option<Edge> {
        match s {
            "Left" => Some(Edge::Left),
            "Right" => Some(Edge::Right),
            "Bottom" => Some(Edge::Bottom),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Right => 1,
            Edge::Bottom => 2,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolbarPosition {
    #[default]
    Top,
    Left,
    Right,
    Bottom,
    Floating,
}

impl ToolbarPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolbarPosition::Top => "Top",
            ToolbarPosition::Left => "Left",
            ToolbarPosition::Right => "Right",
            ToolbarPosition::Bottom => "Bottom",
            ToolbarPosition::Floating => "Floating",
        }
    }

    pub fn parse(s: &str) -> Option<ToolbarPosition> {
        match s {
            "Top" => Some(ToolbarPosition::Top),
            "Left" => Some(ToolbarPosition::Left),
            "Right" => Some(ToolbarPosition::Right),
            "Bottom" => Some(ToolbarPosition::Bottom),
            "Floating" => Some(ToolbarPosition::Floating),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Host-facing events
// ──────────────────────────────────────────────

/// Notifications the docking engine raises for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEvent {
    /// Any structural rebuild, splitter resize or floating move.
    LayoutChanged,
    /// The slot count of one edge changed; the host re-sizes that edge.
    DockedItemsChanged(Edge),
    /// A panel asked to be hidden (tab or title-bar close).
    CloseRequested(PanelId),
    PanelVisibilityChanged,
    ToolbarMoved(ToolbarPosition),
}

// ──────────────────────────────────────────────
// Trait: PointerCapture
// ──────────────────────────────────────────────

/// Element that may hold pointer capture during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureTarget {
    /// The tab (or single-panel title bar) the press landed on.
    TabStrip(PanelId),
    /// The dragged panel itself.
    Panel(PanelId),
    FloatingSurface,
    ToolbarGrip,
}

/// Exclusive pointer ownership, provided by the windowing layer.
/// `capture` returns false when the target can no longer accept capture.
pub trait PointerCapture {
    fn capture(&mut self, target: CaptureTarget) -> bool;
    fn release(&mut self);
}

/// Capture sink for hosts without real capture semantics; every request succeeds.
#[derive(Debug, Default, Clone)]
pub struct NoopCapture;

impl PointerCapture for NoopCapture {
    fn capture(&mut self, _target: CaptureTarget) -> bool {
        true
    }

    fn release(&mut self) {}
}

// ──────────────────────────────────────────────
// Trait: TabStripHitTest
// ──────────────────────────────────────────────

/// A dockable element that exposes its tab strip for tab-merge hit-testing.
pub trait TabStripHitTest {
    /// The panel a drop on this strip merges into.
    fn tab_target(&self) -> PanelId;
    /// Tab strip rectangle in root coordinates, `None` when not visible.
    fn tab_strip_rect(&self) -> Option<Rect>;
}
