use atelier_core::{Edge, PanelId, Rect};

/// A dockable panel. The record holds identity and behavior flags only; where the
/// panel currently lives is derived from the containers that hold it (see
/// [`Placement`]), so a panel can never be docked and floating at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: PanelId,
    /// Unique, stable identifier used as the persistence key.
    pub title: String,
    /// Edge the panel docks to when nothing better is known about it.
    pub home_edge: Edge,
    /// False while the workspace is locked; a locked panel cannot be torn off.
    pub can_float: bool,
}

impl Panel {
    pub fn new(id: PanelId, title: impl Into<String>, home_edge: Edge) -> Self {
        Self {
            id,
            title: title.into(),
            home_edge,
            can_float: true,
        }
    }
}

/// Where a panel currently lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Docked {
        edge: Edge,
        /// Slot index within the edge's dock tree.
        dock_index: usize,
        /// Position inside the slot's tab group.
        tab_index: usize,
        /// The slot holds more than one panel.
        tabbed: bool,
        /// This panel is the group's visible tab.
        active: bool,
        /// Share of the tree's extent held by the slot.
        proportion: f32,
    },
    Floating {
        /// Bounds in floating-surface coordinates.
        bounds: Rect,
    },
    Hidden,
}

impl Placement {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Placement::Hidden)
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Placement::Floating { .. })
    }

    pub fn is_docked(&self) -> bool {
        matches!(self, Placement::Docked { .. })
    }

    pub fn edge(&self) -> Option<Edge> {
        match self {
            Placement::Docked { edge, .. } => Some(*edge),
            _ => None,
        }
    }
}
