//! Canvas geometry and the pan/zoom transform
//!
//! Grid space is measured in logical pixels at scale 1 with the grid's top-left
//! corner at the origin. Screen space is canvas-local logical pixels. The
//! transform between them is `screen = grid * scale + translate`.

use super::Rect;

/// Data cell edge length
pub const CELL: f64 = 32.0;
/// Gap between cells
pub const GAP: f64 = 4.0;
/// Padding around the whole grid
pub const PAD: f64 = 40.0;
/// Width of the row label column
pub const LABEL_W: f64 = 40.0;
/// Distance from one cell to the next
pub const STEP: f64 = CELL + GAP;

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

/// Breathing room kept around the grid when recentering
pub const RECENTER_PADDING: f64 = 24.0;

/// How long the wheel must be idle before the full-quality redraw
pub const ZOOM_DEBOUNCE_MS: u64 = 100;

/// Keyboard zoom step
pub const ZOOM_STEP: f64 = 1.2;

/// A point in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Result of hit-testing a grid point.
///
/// `row == 0` is the column header row and `col == 0` the row label column.
/// `index` is set only for data cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHit {
    pub row: usize,
    pub col: usize,
    pub index: Option<usize>,
}

impl GridHit {
    /// Row label cell (column 0 of a data row)
    pub fn is_label(&self) -> bool {
        self.col == 0 && self.row >= 1
    }
}

/// Geometry of a rows × cols grid at scale 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub rows: usize,
    pub cols: usize,
}

impl GridGeometry {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total width including padding
    pub fn width(&self) -> f64 {
        PAD * 2.0 + LABEL_W + GAP + self.cols as f64 * STEP - GAP
    }

    /// Total height including padding and the header row
    pub fn height(&self) -> f64 {
        PAD * 2.0 + (self.rows + 1) as f64 * STEP - GAP
    }

    /// Rectangle of the cell at (`row`, `col`); row 0 is the header and col 0
    /// the label column.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let x = if col == 0 {
            PAD
        } else {
            PAD + LABEL_W + GAP + (col - 1) as f64 * STEP
        };
        let y = PAD + row as f64 * STEP;
        let w = if col == 0 { LABEL_W } else { CELL };
        Rect::new(x, y, w, CELL)
    }

    /// Find the cell under a grid-space point. Points in the gaps between
    /// cells, in the padding, or past the last row/column hit nothing.
    pub fn hit_test(&self, point: Point) -> Option<GridHit> {
        let Point { x: gx, y: gy } = point;

        let header_y = PAD;
        let data_start_y = PAD + STEP;
        let row = if gy >= header_y && gy < header_y + CELL {
            0
        } else if gy >= data_start_y {
            let row = ((gy - data_start_y) / STEP).floor() as usize + 1;
            let cell_top = data_start_y + (row - 1) as f64 * STEP;
            if gy > cell_top + CELL {
                return None;
            }
            row
        } else {
            return None;
        };

        let label_x = PAD;
        let data_start_x = PAD + LABEL_W + GAP;
        let col = if gx >= label_x && gx < label_x + LABEL_W {
            0
        } else if gx >= data_start_x {
            let col = ((gx - data_start_x) / STEP).floor() as usize + 1;
            let cell_left = data_start_x + (col - 1) as f64 * STEP;
            if gx > cell_left + CELL {
                return None;
            }
            col
        } else {
            return None;
        };

        if row > self.rows || col > self.cols {
            return None;
        }

        let index = (row >= 1 && col >= 1).then(|| (row - 1) * self.cols + (col - 1));
        Some(GridHit { row, col, index })
    }
}

/// Pan offset and zoom scale of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Zoom factor, kept within `[MIN_SCALE, MAX_SCALE]`
    pub scale: f64,
    /// Screen position of the grid origin
    pub translate: Point,
    /// Scale of the last full-quality frame
    rendered_scale: f64,
    /// Bumped on every zoom; a settle request only applies to the latest one
    zoom_revision: u64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Point::default(),
            rendered_scale: 1.0,
            zoom_revision: 0,
        }
    }
}

/// Clamp a scale into the supported zoom range
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Zoom factor for a wheel movement; positive `delta_y` (scrolling down)
/// zooms out.
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    1.1_f64.powf(-delta_y / 100.0)
}

impl Viewport {
    pub fn screen_to_grid(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate.x) / self.scale,
            (screen.y - self.translate.y) / self.scale,
        )
    }

    pub fn grid_to_screen(&self, grid: Point) -> Point {
        Point::new(
            grid.x * self.scale + self.translate.x,
            grid.y * self.scale + self.translate.y,
        )
    }

    /// Map a grid-space rectangle to screen space
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let origin = self.grid_to_screen(Point::new(rect.x, rect.y));
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }

    /// Hit-test a screen point against the grid
    pub fn hit_test(&self, geometry: &GridGeometry, screen: Point) -> Option<GridHit> {
        geometry.hit_test(self.screen_to_grid(screen))
    }

    /// Pan so the grid point grabbed at `anchor` follows the pointer.
    ///
    /// `anchor` is the pointer position minus the translation at press time.
    pub fn pan_to(&mut self, pointer: Point, anchor: Point) {
        self.translate = Point::new(pointer.x - anchor.x, pointer.y - anchor.y);
    }

    /// Pan anchor for a gesture starting at `pointer`
    pub fn pan_anchor(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.translate.x, pointer.y - self.translate.y)
    }

    /// Multiply the scale by `factor` (clamped), keeping the grid point under
    /// `pointer` fixed on screen. Returns the new zoom revision.
    pub fn zoom_at(&mut self, pointer: Point, factor: f64) -> u64 {
        let new_scale = clamp_scale(self.scale * factor);
        let grid = self.screen_to_grid(pointer);

        self.translate = Point::new(
            pointer.x - grid.x * new_scale,
            pointer.y - grid.y * new_scale,
        );
        self.scale = new_scale;
        self.zoom_revision += 1;
        self.zoom_revision
    }

    /// Record that the zoom with `revision` has settled. Stale revisions are
    /// ignored. Returns true when a full-quality redraw is now due.
    pub fn settle(&mut self, revision: u64) -> bool {
        if revision != self.zoom_revision {
            return false;
        }
        let changed = self.rendered_scale != self.scale;
        self.rendered_scale = self.scale;
        changed
    }

    /// False while a zoom gesture is still in flight
    pub fn is_settled(&self) -> bool {
        self.rendered_scale == self.scale
    }

    pub fn zoom_revision(&self) -> u64 {
        self.zoom_revision
    }

    /// Fit the whole grid into a canvas of `canvas_w` × `canvas_h` and center it
    pub fn recenter(&mut self, geometry: &GridGeometry, canvas_w: f64, canvas_h: f64) {
        let grid_w = geometry.width();
        let grid_h = geometry.height();

        let fit = ((canvas_w - RECENTER_PADDING * 2.0) / grid_w)
            .min((canvas_h - RECENTER_PADDING * 2.0) / grid_h);
        self.scale = clamp_scale(fit);
        self.rendered_scale = self.scale;

        self.translate = Point::new(
            (canvas_w - grid_w * self.scale) / 2.0,
            (canvas_h - grid_h * self.scale) / 2.0,
        );
    }

    /// Current zoom as a whole percentage
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}
