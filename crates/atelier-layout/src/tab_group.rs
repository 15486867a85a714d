use atelier_core::PanelId;

// ──────────────────────────────────────────────
// TabGroup: panels sharing one slot
// ──────────────────────────────────────────────

/// Ordered set of panels sharing one slot. Exactly one of them is active.
///
/// A group is never left empty by the containers that own it: the dock tree and
/// the floating list drop a group as soon as its last panel leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct TabGroup {
    panels: Vec<PanelId>,
    active_index: usize,
}

impl TabGroup {
    /// A single-panel group with that panel active.
    pub fn new(panel: PanelId) -> Self {
        Self {
            panels: vec![panel],
            active_index: 0,
        }
    }

    /// Build a group from a list that may contain duplicates; the active index is clamped.
    pub fn from_panels(panels: impl IntoIterator<Item = PanelId>, active_index: usize) -> Self {
        let mut group = Self {
            panels: Vec::new(),
            active_index: 0,
        };
        for panel in panels {
            group.add_panel(panel);
        }
        group.active_index = clamp_index(active_index, group.panels.len());
        group
    }

    pub fn panels(&self) -> &[PanelId] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// More than one member: the group renders a tab strip instead of a title bar.
    pub fn is_tabbed(&self) -> bool {
        self.panels.len() > 1
    }

    pub fn contains(&self, panel: PanelId) -> bool {
        self.panels.contains(&panel)
    }

    pub fn position(&self, panel: PanelId) -> Option<usize> {
        self.panels.iter().position(|&p| p == panel)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_panel(&self) -> Option<PanelId> {
        self.panels.get(self.active_index).copied()
    }

    /// Append a panel. Returns false if it is already a member.
    pub fn add_panel(&mut self, panel: PanelId) -> bool {
        if self.contains(panel) {
            return false;
        }
        self.panels.push(panel);
        true
    }

    /// Insert a panel at `index` (clamped to the end). The active panel stays active.
    pub fn insert_panel(&mut self, index: usize, panel: PanelId) -> bool {
        if self.contains(panel) {
            return false;
        }
        let index = index.min(self.panels.len());
        self.panels.insert(index, panel);
        if self.panels.len() > 1 && index <= self.active_index {
            self.active_index += 1;
        }
        true
    }

    /// Remove a panel. The active index keeps pointing at the same panel when a tab
    /// before it goes away; removing the active tab activates its successor (or the
    /// new last tab).
    pub fn remove_panel(&mut self, panel: PanelId) -> bool {
        let Some(index) = self.position(panel) else {
            return false;
        };
        self.panels.remove(index);
        if index < self.active_index {
            self.active_index -= 1;
        }
        self.active_index = clamp_index(self.active_index, self.panels.len());
        true
    }

    pub fn set_active(&mut self, panel: PanelId) -> bool {
        match self.position(panel) {
            Some(index) => {
                self.active_index = index;
                true
            }
            None => false,
        }
    }

    pub fn set_active_index(&mut self, index: usize) {
        self.active_index = clamp_index(index, self.panels.len());
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_duplicates() {
        let mut group = TabGroup::new(1);
        assert!(!group.add_panel(1));
        assert!(group.add_panel(2));
        assert_eq!(group.panels(), &[1, 2]);
        assert!(group.is_tabbed());
    }

    #[test]
    fn removing_active_middle_tab_keeps_index_valid() {
        let mut group = TabGroup::from_panels([1, 2, 3], 1);
        assert_eq!(group.active_panel(), Some(2));
        assert!(group.remove_panel(2));
        assert!(group.active_index() < group.len());
        assert_eq!(group.active_panel(), Some(3));
    }

    #[test]
    fn removing_last_active_tab_clamps() {
        let mut group = TabGroup::from_panels([1, 2, 3], 2);
        group.remove_panel(3);
        assert_eq!(group.active_index(), 1);
        assert_eq!(group.active_panel(), Some(2));
    }

    #[test]
    fn removing_tab_before_active_follows_active_panel() {
        let mut group = TabGroup::from_panels([1, 2, 3], 2);
        group.remove_panel(1);
        assert_eq!(group.active_panel(), Some(3));
    }

    #[test]
    fn removing_everything_leaves_empty_group() {
        let mut group = TabGroup::new(7);
        assert!(group.remove_panel(7));
        assert!(group.is_empty());
        assert_eq!(group.active_panel(), None);
        assert!(!group.remove_panel(7));
    }

    #[test]
    fn insert_before_active_shifts_active() {
        let mut group = TabGroup::from_panels([1, 2], 1);
        group.insert_panel(0, 9);
        assert_eq!(group.panels(), &[9, 1, 2]);
        assert_eq!(group.active_panel(), Some(2));
    }

    #[test]
    fn from_panels_dedupes_and_clamps() {
        let group = TabGroup::from_panels([4, 4, 5], 10);
        assert_eq!(group.panels(), &[4, 5]);
        assert_eq!(group.active_index(), 1);
    }

    #[test]
    fn set_active_unknown_panel_is_ignored() {
        let mut group = TabGroup::from_panels([1, 2], 0);
        assert!(!group.set_active(3));
        assert_eq!(group.active_index(), 0);
        assert!(group.set_active(2));
        assert_eq!(group.active_index(), 1);
    }
}
