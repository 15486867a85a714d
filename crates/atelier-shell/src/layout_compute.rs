// Window geometry: toolbar strip, the three dock hosts and the document area.

use atelier_core::{Edge, Rect, ToolbarPosition};

use crate::settings::ShellSettings;
use crate::toolbar::edge_strip;

/// Pixel sizes of the three edges. Values are kept while an edge is collapsed so
/// the edge comes back at the same size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSizes {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeSizes {
    pub fn from_settings(settings: &ShellSettings) -> Self {
        Self {
            left: settings.default_side_width,
            right: settings.default_side_width,
            bottom: settings.default_bottom_height,
        }
    }

    pub fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, edge: Edge, size: f32) {
        match edge {
            Edge::Left => self.left = size,
            Edge::Right => self.right = size,
            Edge::Bottom => self.bottom = size,
        }
    }
}

/// Clamp an edge size to `[min_edge_size, max_edge_fraction * window extent]`.
/// A window too small for the minimum gets the minimum.
pub fn clamp_edge_size(edge: Edge, size: f32, window: Rect, settings: &ShellSettings) -> f32 {
    let extent = match edge {
        Edge::Left | Edge::Right => window.width,
        Edge::Bottom => window.height,
    };
    let max = (extent * settings.max_edge_fraction).max(settings.min_edge_size);
    size.clamp(settings.min_edge_size, max)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellRects {
    pub toolbar: Option<Rect>,
    /// Indexed by `Edge::index()`. Collapsed edges have zero extent on their edge.
    pub docks: [Rect; 3],
    pub document: Rect,
}

impl ShellRects {
    pub fn dock(&self, edge: Edge) -> Rect {
        self.docks[edge.index()]
    }
}

/// Carve the toolbar from its edge, then the side docks over the full remaining
/// height, then the bottom dock between them. Empty edges collapse.
pub fn compute_edge_rects(
    window: Rect,
    toolbar: ToolbarPosition,
    toolbar_thickness: f32,
    sizes: &EdgeSizes,
    occupied: impl Fn(Edge) -> bool,
) -> ShellRects {
    let strip = edge_strip(toolbar, window, toolbar_thickness);
    let mut content = window;
    if strip.is_some() {
        match toolbar {
            ToolbarPosition::Top => {
                content.y += toolbar_thickness;
                content.height -= toolbar_thickness;
            }
            ToolbarPosition::Bottom => content.height -= toolbar_thickness,
            ToolbarPosition::Left => {
                content.x += toolbar_thickness;
                content.width -= toolbar_thickness;
            }
            ToolbarPosition::Right => content.width -= toolbar_thickness,
            ToolbarPosition::Floating => {}
        }
    }
    content.width = content.width.max(0.0);
    content.height = content.height.max(0.0);

    let extent = |edge: Edge, limit: f32| {
        if occupied(edge) {
            sizes.get(edge).clamp(0.0, limit)
        } else {
            0.0
        }
    };
    let left = extent(Edge::Left, content.width);
    let right = extent(Edge::Right, content.width - left);
    let middle = (content.width - left - right).max(0.0);
    let bottom = extent(Edge::Bottom, content.height);

    let left_rect = Rect::new(content.x, content.y, left, content.height);
    let right_rect = Rect::new(content.right() - right, content.y, right, content.height);
    let bottom_rect = Rect::new(content.x + left, content.bottom() - bottom, middle, bottom);
    let document = Rect::new(content.x + left, content.y, middle, content.height - bottom);

    ShellRects {
        toolbar: strip,
        docks: [left_rect, right_rect, bottom_rect],
        document,
    }
}
