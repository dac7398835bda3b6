//! Section cache
//!
//! Every section the user has visited is kept here, keyed by section code.
//! Exactly one section is live in [`crate::model::AppModel`]; the rest exist
//! only as cache entries until switched to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid, GridError};
use super::naming::{RowOverrides, SectionConfig};

/// Saved state of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredSection", into = "StoredSection")]
pub struct SectionCacheEntry {
    pub grid: Grid,
    pub config: SectionConfig,
    pub row_overrides: RowOverrides,
}

impl SectionCacheEntry {
    /// A section counts as configured once it has at least one seat
    pub fn is_configured(&self) -> bool {
        self.grid.has_seats()
    }
}

/// On-disk shape of a cache entry (`gridData`, `rows`, `cols`, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSection {
    grid_data: Vec<Cell>,
    rows: usize,
    cols: usize,
    #[serde(default)]
    row_overrides: RowOverrides,
    #[serde(default)]
    config: SectionConfig,
}

impl TryFrom<StoredSection> for SectionCacheEntry {
    type Error = GridError;

    fn try_from(stored: StoredSection) -> Result<Self, Self::Error> {
        Ok(Self {
            grid: Grid::from_cells(stored.rows, stored.cols, stored.grid_data)?,
            config: stored.config.normalized(),
            row_overrides: stored.row_overrides,
        })
    }
}

impl From<SectionCacheEntry> for StoredSection {
    fn from(entry: SectionCacheEntry) -> Self {
        let rows = entry.grid.rows();
        let cols = entry.grid.cols();
        Self {
            grid_data: entry.grid.into_cells(),
            rows,
            cols,
            row_overrides: entry.row_overrides,
            config: entry.config,
        }
    }
}

/// Section code → saved section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionCache(BTreeMap<String, SectionCacheEntry>);

impl SectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<&SectionCacheEntry> {
        self.0.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn insert(&mut self, code: impl Into<String>, entry: SectionCacheEntry) {
        self.0.insert(code.into(), entry);
    }

    pub fn remove(&mut self, code: &str) -> Option<SectionCacheEntry> {
        self.0.remove(code)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cached and holding at least one seat
    pub fn is_configured(&self, code: &str) -> bool {
        self.0.get(code).is_some_and(SectionCacheEntry::is_configured)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionCacheEntry)> {
        self.0.iter().map(|(code, entry)| (code.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grid::CellKind;
    use crate::model::naming::Naming;

    fn entry(rows: usize, cols: usize) -> SectionCacheEntry {
        let config = SectionConfig::default();
        let row_overrides = RowOverrides::new();
        let grid = Grid::new(rows, cols, &Naming::new(&config, &row_overrides, rows, cols));
        SectionCacheEntry {
            grid,
            config,
            row_overrides,
        }
    }

    #[test]
    fn test_configured_requires_a_seat() {
        let mut cache = SectionCache::new();
        let mut e = entry(1, 2);
        cache.insert("A1", e.clone());
        assert!(cache.is_configured("A1"));

        e.grid.set_all(CellKind::Empty);
        cache.insert("A1", e);
        assert!(!cache.is_configured("A1"));
        assert!(!cache.is_configured("missing"));
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_value(entry(1, 1)).unwrap();
        assert_eq!(json["rows"], 1);
        assert_eq!(json["cols"], 1);
        assert_eq!(json["gridData"][0]["code"], "1-1");
        assert_eq!(json["config"]["namePattern"], "$ROW-$COL");
    }

    #[test]
    fn test_loads_stored_entry_with_missing_config() {
        let json = r#"{
            "gridData": [
                {"row": 1, "col": 1, "type": "seat", "code": "A-1"},
                {"row": 1, "col": 2, "type": "empty", "code": "A-2"}
            ],
            "rows": 1,
            "cols": 2
        }"#;
        let e: SectionCacheEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.grid.seat_count(), 1);
        assert_eq!(e.config, SectionConfig::default());
        assert!(e.row_overrides.is_empty());
    }

    #[test]
    fn test_rejects_inconsistent_entry() {
        let json = r#"{"gridData": [], "rows": 2, "cols": 2}"#;
        assert!(serde_json::from_str::<SectionCacheEntry>(json).is_err());
    }
}
