// Atelier shell: pointer-driven docking, toolbar snapping and workspace
// profiles on top of the atelier-layout model.

pub mod drag_drop;
pub mod layout_compute;
pub mod persistence;
pub mod profile;
pub mod settings;
pub mod shell;
pub mod store;
pub mod toolbar;

pub use drag_drop::{DragController, DragEvent, DragOutcome, DragState, DropTarget};
pub use persistence::{LayoutPersistence, SaveDebouncer, Workspace};
pub use profile::{LayoutConfig, PanelState, WorkspaceProfiles, DEFAULT_PROFILE, LEGACY_PROFILE};
pub use settings::ShellSettings;
pub use shell::{default_panels, PanelDescriptor, Shell};
pub use store::{ProfileStore, StoreError};
pub use toolbar::{GripEvent, ToolbarDrag};
