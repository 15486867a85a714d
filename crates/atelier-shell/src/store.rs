// Profile file I/O. One JSON file per installation: <config_dir>/atelier/layout.json.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::profile::{LayoutConfig, WorkspaceProfiles, LEGACY_PROFILE};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine the user config directory")]
    NoConfigDir,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self, StoreError> {
        let config_dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::at(config_dir.join("atelier").join("layout.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when there is no saved layout. A file carrying a `profiles` map is
    /// read as a profile set; any other object is a single bare layout and is
    /// migrated into the legacy profile.
    pub fn read(&self) -> Result<Option<WorkspaceProfiles>, StoreError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value: serde_json::Value = serde_json::from_str(&data)?;
        if value.get("profiles").is_some() {
            let set: WorkspaceProfiles = serde_json::from_value(value)?;
            return Ok((!set.profiles.is_empty()).then_some(set));
        }

        let legacy: LayoutConfig = serde_json::from_value(value)?;
        log::info!(
            "Migrating single-layout file {} into profile '{}'",
            self.path.display(),
            LEGACY_PROFILE
        );
        let mut set = WorkspaceProfiles {
            active_profile: LEGACY_PROFILE.to_string(),
            ..WorkspaceProfiles::default()
        };
        set.profiles.insert(LEGACY_PROFILE.to_string(), legacy);
        Ok(Some(set))
    }

    pub fn write(&self, set: &WorkspaceProfiles) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(set)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
