//! Application model - the complete state of the designer
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod grid;
pub mod interaction;
pub mod layout;
pub mod naming;
pub mod project;
pub mod section;
pub mod ui;
pub mod viewport;

pub use grid::{Cell, CellKind, Grid};
pub use interaction::{Interaction, PointerState, Tool};
pub use layout::{LayoutIndex, SectionNode, StadiumLayout};
pub use naming::{Naming, NamingType, RowOverrides, SectionConfig};
pub use project::Project;
pub use section::{SectionCache, SectionCacheEntry};
pub use ui::{ConfigField, ConfigForm, Modal, Notice, UiState};
pub use viewport::{GridGeometry, GridHit, Point, Viewport};

use crate::config::GridConfig;
use crate::theme::Theme;

/// Width of the config sidebar (logical px)
pub const SIDEBAR_WIDTH: f64 = 260.0;
/// Width of the section navigator, shown while a project is loaded
pub const SECTIONS_WIDTH: f64 = 240.0;
/// Height of the status bar
pub const STATUS_BAR_HEIGHT: f64 = 26.0;

/// Axis-aligned rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn inset(&self, amount: f64) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.0).max(0.0),
            (self.height - amount * 2.0).max(0.0),
        )
    }

    /// Same rectangle in physical pixels
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Seat count and size summary of the live section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStats {
    pub seats: usize,
    pub size_label: String,
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Grid of the live section
    pub grid: Grid,
    /// Naming rules of the live section
    pub section_config: SectionConfig,
    pub row_overrides: RowOverrides,
    /// Code of the live section
    pub section_code: String,
    /// Imported layout and the section cache
    pub project: Project,
    pub viewport: Viewport,
    pub interaction: Interaction,
    pub ui: UiState,
    pub theme: Theme,
    pub config: GridConfig,
    /// Window dimensions in physical pixels
    pub window_size: (u32, u32),
    /// Device pixel ratio
    pub scale_factor: f64,
}

impl AppModel {
    /// Create a model with a fresh default section, centered in the canvas
    pub fn new(config: GridConfig, theme: Theme, window_size: (u32, u32), scale_factor: f64) -> Self {
        let section_config = SectionConfig::default();
        let row_overrides = RowOverrides::new();
        let (rows, cols) = (config.default_rows, config.default_cols);
        let grid = Grid::new(
            rows,
            cols,
            &Naming::new(&section_config, &row_overrides, rows, cols),
        );
        let section_code = config.default_section_code.clone();
        let form = ConfigForm::from_section(grid.rows(), grid.cols(), &section_code, &section_config);

        let mut model = Self {
            grid,
            section_config,
            row_overrides,
            section_code,
            project: Project::new(),
            viewport: Viewport::default(),
            interaction: Interaction::new(config.drag_threshold),
            ui: UiState::new(form),
            theme,
            config,
            window_size,
            scale_factor: if scale_factor > 0.0 { scale_factor } else { 1.0 },
        };
        model.recenter();
        model
    }

    /// Label generator for the live section
    pub fn naming(&self) -> Naming<'_> {
        Naming::new(
            &self.section_config,
            &self.row_overrides,
            self.grid.rows(),
            self.grid.cols(),
        )
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.grid.rows(), self.grid.cols())
    }

    /// Window size in logical pixels
    pub fn logical_size(&self) -> (f64, f64) {
        (
            self.window_size.0 as f64 / self.scale_factor,
            self.window_size.1 as f64 / self.scale_factor,
        )
    }

    /// Sidebar rectangle (logical px)
    pub fn sidebar_rect(&self) -> Rect {
        let (_, h) = self.logical_size();
        Rect::new(0.0, 0.0, SIDEBAR_WIDTH, (h - STATUS_BAR_HEIGHT).max(0.0))
    }

    /// Section navigator rectangle, present while a project is loaded
    pub fn sections_rect(&self) -> Option<Rect> {
        if !self.project.is_loaded() {
            return None;
        }
        let (_, h) = self.logical_size();
        Some(Rect::new(
            SIDEBAR_WIDTH,
            0.0,
            SECTIONS_WIDTH,
            (h - STATUS_BAR_HEIGHT).max(0.0),
        ))
    }

    /// Canvas rectangle in window logical coordinates
    pub fn canvas_rect(&self) -> Rect {
        let (w, h) = self.logical_size();
        let left = self
            .sections_rect()
            .map(|r| r.right())
            .unwrap_or(SIDEBAR_WIDTH);
        Rect::new(
            left,
            0.0,
            (w - left).max(0.0),
            (h - STATUS_BAR_HEIGHT).max(0.0),
        )
    }

    pub fn status_bar_rect(&self) -> Rect {
        let (w, h) = self.logical_size();
        Rect::new(0.0, (h - STATUS_BAR_HEIGHT).max(0.0), w, STATUS_BAR_HEIGHT)
    }

    /// Fit the live grid into the canvas
    pub fn recenter(&mut self) {
        let canvas = self.canvas_rect();
        let geometry = self.geometry();
        self.viewport.recenter(&geometry, canvas.width, canvas.height);
    }

    pub fn stats(&self) -> GridStats {
        GridStats {
            seats: self.grid.seat_count(),
            size_label: self.grid.size_label(),
        }
    }

    /// Copy of the live section as a cache entry
    pub fn live_entry(&self) -> SectionCacheEntry {
        SectionCacheEntry {
            grid: self.grid.clone(),
            config: self.section_config.clone(),
            row_overrides: self.row_overrides.clone(),
        }
    }

    /// Store the live section in the cache under its code
    pub fn commit_live_section(&mut self) {
        let entry = self.live_entry();
        self.project.cache.insert(self.section_code.clone(), entry);
    }

    /// Make `code` the live section: load it from the cache, or start a fresh
    /// default-sized grid with default naming.
    pub fn load_section(&mut self, code: &str) {
        match self.project.cache.get(code).cloned() {
            Some(entry) => {
                self.grid = entry.grid;
                self.section_config = entry.config;
                self.row_overrides = entry.row_overrides;
            }
            None => {
                self.section_config = SectionConfig::default();
                self.row_overrides = RowOverrides::new();
                let (rows, cols) = (self.config.default_rows, self.config.default_cols);
                self.grid = Grid::new(
                    rows,
                    cols,
                    &Naming::new(&self.section_config, &self.row_overrides, rows, cols),
                );
            }
        }
        self.section_code = code.to_string();
        // A modal holds indices into the grid it was opened on
        self.ui.modal = None;
        self.interaction.hovered = None;
        self.sync_form();
        self.recenter();
    }

    /// Mirror the live section into the config inputs, keeping focus
    pub fn sync_form(&mut self) {
        let focused = self.ui.form.focused;
        self.ui.form = ConfigForm::from_section(
            self.grid.rows(),
            self.grid.cols(),
            &self.section_code,
            &self.section_config,
        );
        self.ui.form.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> AppModel {
        AppModel::new(GridConfig::default(), Theme::default(), (1280, 800), 1.0)
    }

    #[test]
    fn test_new_model_defaults() {
        let m = model();
        assert_eq!((m.grid.rows(), m.grid.cols()), (10, 15));
        assert_eq!(m.section_code, "PISO_2/SECCION_503A");
        assert_eq!(m.stats().seats, 150);
        assert_eq!(m.stats().size_label, "10x15 Grid");
        assert!(m.viewport.is_settled());
    }

    #[test]
    fn test_canvas_excludes_panels() {
        let mut m = model();
        assert_eq!(m.canvas_rect(), Rect::new(SIDEBAR_WIDTH, 0.0, 1280.0 - SIDEBAR_WIDTH, 800.0 - STATUS_BAR_HEIGHT));
        m.project.load_layout(StadiumLayout {
            sections: vec![SectionNode::leaf("A")],
            ..Default::default()
        });
        assert_eq!(m.canvas_rect().x, SIDEBAR_WIDTH + SECTIONS_WIDTH);
    }

    #[test]
    fn test_logical_size_uses_scale_factor() {
        let m = AppModel::new(GridConfig::default(), Theme::default(), (2560, 1600), 2.0);
        assert_eq!(m.logical_size(), (1280.0, 800.0));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
    }
}
