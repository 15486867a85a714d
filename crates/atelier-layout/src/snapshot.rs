// Serialized form of one dock tree. Panels are referenced by title so a stored
// layout survives panel-id reallocation between sessions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockGridLayout {
    #[serde(default)]
    pub dock_edge: String,
    #[serde(default)]
    pub items: Vec<DockItemLayout>,
    #[serde(default)]
    pub item_sizes: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockItemLayout {
    #[serde(default)]
    pub panels: Vec<String>,
    #[serde(default)]
    pub active_index: usize,
}
