//! Multi-section project: imported layout plus the section cache

use super::layout::{LayoutIndex, ProjectStats, StadiumLayout};
use super::section::SectionCache;

/// Section code used when no project is loaded
pub const DEFAULT_SECTION_CODE: &str = "PISO_2/SECCION_503A";

#[derive(Debug, Clone, Default)]
pub struct Project {
    layout: Option<StadiumLayout>,
    index: LayoutIndex,
    pub cache: SectionCache,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a project from stored parts
    pub fn with_parts(layout: Option<StadiumLayout>, cache: SectionCache) -> Self {
        let index = layout.as_ref().map(LayoutIndex::build).unwrap_or_default();
        Self {
            layout,
            index,
            cache,
        }
    }

    /// Install a freshly imported layout; the cache is kept.
    pub fn load_layout(&mut self, layout: StadiumLayout) {
        self.index = LayoutIndex::build(&layout);
        self.layout = Some(layout);
    }

    /// Drop the layout and every cached section
    pub fn close(&mut self) {
        self.layout = None;
        self.index = LayoutIndex::default();
        self.cache.clear();
    }

    pub fn layout(&self) -> Option<&StadiumLayout> {
        self.layout.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.layout.is_some()
    }

    pub fn index(&self) -> &LayoutIndex {
        &self.index
    }

    /// Leaf section codes in layout order
    pub fn leaves(&self) -> &[String] {
        &self.index.leaves
    }

    pub fn stats(&self) -> ProjectStats {
        self.index.stats()
    }

    pub fn stadium_name(&self) -> Option<&str> {
        self.layout.as_ref().and_then(|l| l.name.as_deref())
    }

    /// Leaves that are cached with at least one seat
    pub fn configured_count(&self) -> usize {
        self.index
            .leaves
            .iter()
            .filter(|code| self.cache.is_configured(code))
            .count()
    }
}
