//! Project storage
//!
//! The whole project lives in one JSON file,
//! `~/.config/grido/storage/stadium_grid_manager_data.json`:
//!
//! ```json
//! { "stadiumData": {...} | null, "allSections": ["101", ...],
//!   "sectionsCache": { "101": { "gridData": [...], ... } },
//!   "currentSectionCode": "101" }
//! ```
//!
//! Writes go to a sibling temp file first and are renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::layout::StadiumLayout;
use crate::model::project::Project;
use crate::model::section::{SectionCache, SectionCacheEntry};
use crate::model::AppModel;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("No storage directory available")]
    NoStorageDir,
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt project storage: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything needed to restore a project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub stadium_data: Option<StadiumLayout>,
    /// Leaf section codes, stored for readers of the file
    pub all_sections: Vec<String>,
    pub sections_cache: SectionCache,
    pub current_section_code: String,
}

/// Lenient on-disk shape: bad cache entries or a bad layout are dropped
/// instead of failing the whole load
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSnapshot {
    #[serde(default)]
    stadium_data: Option<Value>,
    #[serde(default)]
    sections_cache: BTreeMap<String, Value>,
    #[serde(default)]
    current_section_code: Option<String>,
}

impl ProjectSnapshot {
    /// Snapshot of the model with the live section included in the cache
    pub fn capture(model: &AppModel) -> Self {
        let mut sections_cache = model.project.cache.clone();
        sections_cache.insert(model.section_code.clone(), model.live_entry());
        Self {
            stadium_data: model.project.layout().cloned(),
            all_sections: model.project.leaves().to_vec(),
            sections_cache,
            current_section_code: model.section_code.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let stored: StoredSnapshot = serde_json::from_str(json)?;

        let stadium_data = stored.stadium_data.and_then(|value| {
            if value.is_null() {
                return None;
            }
            match serde_json::from_value::<StadiumLayout>(value) {
                Ok(layout) => match layout.validate() {
                    Ok(()) => Some(layout),
                    Err(e) => {
                        tracing::warn!("Dropping stored layout: {}", e);
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!("Dropping unreadable stored layout: {}", e);
                    None
                }
            }
        });

        let mut sections_cache = SectionCache::new();
        for (code, value) in stored.sections_cache {
            match serde_json::from_value::<SectionCacheEntry>(value) {
                Ok(entry) => {
                    sections_cache.insert(code, entry);
                }
                Err(e) => {
                    tracing::warn!("Dropping stored section {}: {}", code, e);
                }
            }
        }

        let all_sections = Project::with_parts(stadium_data.clone(), SectionCache::new())
            .leaves()
            .to_vec();

        Ok(Self {
            stadium_data,
            all_sections,
            sections_cache,
            current_section_code: stored.current_section_code.unwrap_or_default(),
        })
    }
}

impl ProjectSnapshot {
    /// Layout and cache as a project, without touching any model
    pub fn into_project(self) -> Project {
        Project::with_parts(self.stadium_data, self.sections_cache)
    }
}

/// Restore a stored project into the model
pub fn restore(model: &mut AppModel, snapshot: ProjectSnapshot) {
    let ProjectSnapshot {
        stadium_data,
        sections_cache,
        current_section_code,
        ..
    } = snapshot;

    model.project = Project::with_parts(stadium_data, sections_cache);

    let code = if !current_section_code.trim().is_empty() {
        current_section_code
    } else if let Some(first) = model.project.leaves().first() {
        first.clone()
    } else {
        model.config.default_section_code.clone()
    };

    tracing::info!(
        "Restored project: {} cached sections, current {}",
        model.project.cache.len(),
        code
    );
    model.load_section(&code);
}

/// The storage file
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard location in the config dir
    pub fn default_location() -> Result<Self, StorageError> {
        crate::config_paths::AppFile::Project.path()
            .map(Self::new)
            .ok_or(StorageError::NoStorageDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored project; `Ok(None)` when nothing is stored
    pub fn load(&self) -> Result<Option<ProjectSnapshot>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&self.path, e)),
        };
        if json.trim().is_empty() {
            return Ok(None);
        }
        ProjectSnapshot::from_json(&json).map(Some)
    }

    /// Like [`ProjectStore::load`], treating unreadable storage as empty
    pub fn load_or_empty(&self) -> Option<ProjectSnapshot> {
        match self.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Ignoring stored project: {}", e);
                None
            }
        }
    }

    pub fn save(&self, snapshot: &ProjectSnapshot) -> Result<(), StorageError> {
        let json = snapshot.to_json()?;
        self.save_raw(&json)
    }

    /// Write `json` atomically
    pub fn save_raw(&self, json: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;

        tracing::debug!("Saved project ({} bytes) to {}", json.len(), self.path.display());
        Ok(())
    }

    /// Remove the stored project
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&self.path, e)),
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}
