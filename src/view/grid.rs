//! Grid canvas painter
//!
//! Paints the corner cell, the column header row, the row label column and
//! every visible data cell. Coordinates go grid space -> canvas logical
//! (viewport transform) -> physical pixels (device pixel ratio).

use std::ops::RangeInclusive;

use crate::model::grid::Grid;
use crate::model::naming::Naming;
use crate::model::viewport::{GridGeometry, Viewport, PAD, STEP};
use crate::model::Rect;
use crate::theme::CanvasTheme;

use super::frame::{Frame, TextPainter};

/// Font size of cell text at zoom 1 (logical px)
pub const CELL_FONT_SIZE: f64 = 10.0;
/// Cell text is skipped when it would render smaller than this (logical px)
pub const MIN_LEGIBLE_FONT: f64 = 6.0;
/// Inner padding kept around cell text (logical px at zoom 1)
const CELL_TEXT_INSET: f64 = 2.0;

/// Everything the grid painter needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct GridScene<'a> {
    pub grid: &'a Grid,
    pub naming: Naming<'a>,
    pub viewport: &'a Viewport,
    /// Flat index of the hovered data cell
    pub hovered: Option<usize>,
    pub theme: &'a CanvasTheme,
    /// Canvas rectangle in physical pixels
    pub canvas: Rect,
    pub scale_factor: f64,
    /// Cheap frame while a zoom gesture is in flight
    pub draft: bool,
}

impl GridScene<'_> {
    /// Physical-pixel rectangle of a grid-space rectangle
    fn to_physical(&self, rect: Rect) -> Rect {
        let screen = self.viewport.rect_to_screen(rect).scaled(self.scale_factor);
        Rect::new(
            screen.x + self.canvas.x,
            screen.y + self.canvas.y,
            screen.width,
            screen.height,
        )
    }

    /// Physical font size of cell text, or `None` when text is not drawn
    pub fn text_size(&self) -> Option<f32> {
        let logical = CELL_FONT_SIZE * self.viewport.scale;
        (!self.draft && logical >= MIN_LEGIBLE_FONT).then(|| (logical * self.scale_factor) as f32)
    }

    /// Grid rows (0 = header) and columns (0 = labels) intersecting the canvas
    pub fn visible_cells(&self) -> (RangeInclusive<usize>, RangeInclusive<usize>) {
        let scale = self.viewport.scale * self.scale_factor;
        let origin_x = self.canvas.x + self.viewport.translate.x * self.scale_factor;
        let origin_y = self.canvas.y + self.viewport.translate.y * self.scale_factor;

        let to_grid_x = |px: f64| (px - origin_x) / scale;
        let to_grid_y = |py: f64| (py - origin_y) / scale;

        let rows = visible_range(
            to_grid_y(self.canvas.y),
            to_grid_y(self.canvas.bottom()),
            self.grid.rows(),
        );
        let cols = visible_range(
            to_grid_x(self.canvas.x),
            to_grid_x(self.canvas.right()),
            self.grid.cols(),
        );
        (rows, cols)
    }
}

/// Track indices (0..=count) whose cells overlap the grid-space span
/// [`start`, `end`]. Track 0 is the header/label track.
fn visible_range(start: f64, end: f64, count: usize) -> RangeInclusive<usize> {
    let first = ((start - PAD) / STEP).floor().max(0.0) as usize;
    let last = ((end - PAD) / STEP).ceil().max(0.0) as usize;
    first.min(count)..=last.min(count)
}

pub fn paint_grid(frame: &mut Frame, text: &mut TextPainter, scene: &GridScene) {
    let theme = scene.theme;
    let geometry = GridGeometry::new(scene.grid.rows(), scene.grid.cols());
    let text_size = scene.text_size().filter(|_| text.has_font());
    let inset = CELL_TEXT_INSET * scene.viewport.scale * scene.scale_factor;
    let line = scene.scale_factor.max(1.0);

    frame.set_clip(scene.canvas);
    frame.fill_rect(scene.canvas, theme.background.to_argb_u32());

    let (rows, cols) = scene.visible_cells();

    for row in rows.clone() {
        for col in cols.clone() {
            let rect = scene.to_physical(geometry.cell_rect(row, col));

            match (row, col) {
                (0, 0) => {
                    frame.dashed_rect(rect, line, 4.0 * line, theme.corner_border.to_argb_u32());
                }
                (0, col) => {
                    frame.vertical_gradient(
                        rect,
                        theme.header_top.to_argb_u32(),
                        theme.header_bottom.to_argb_u32(),
                    );
                    if let Some(size) = text_size {
                        let label = scene.naming.column_label(col);
                        draw_cell_text(frame, text, rect, inset, &label, size, theme.label_text.to_argb_u32());
                    }
                }
                (row, 0) => {
                    frame.diagonal_gradient(
                        rect,
                        theme.label_start.to_argb_u32(),
                        theme.label_end.to_argb_u32(),
                    );
                    if let Some(size) = text_size {
                        let label = scene.naming.row_label(row);
                        draw_cell_text(frame, text, rect, inset, &label, size, theme.label_text.to_argb_u32());
                    }
                }
                (row, col) => {
                    let (Some(index), Some(cell)) =
                        (scene.grid.index(row, col), scene.grid.cell(row, col))
                    else {
                        continue;
                    };
                    let hovered = scene.hovered == Some(index);

                    if cell.is_seat() {
                        let fill = if hovered { theme.seat_hover } else { theme.seat };
                        frame.fill_rect(rect, fill.to_argb_u32());
                        if let Some(size) = text_size {
                            draw_cell_text(frame, text, rect, inset, &cell.label, size, theme.seat_text.to_argb_u32());
                        }
                    } else {
                        let (fill, border) = if hovered {
                            (theme.empty_hover, theme.empty_hover_border)
                        } else {
                            (theme.empty, theme.empty_border)
                        };
                        frame.fill_rect(rect, fill.to_argb_u32());
                        frame.stroke_rect(rect, line, border.to_argb_u32());
                    }
                }
            }
        }
    }

    frame.clear_clip();
}

fn draw_cell_text(
    frame: &mut Frame,
    text: &mut TextPainter,
    rect: Rect,
    inset: f64,
    label: &str,
    size: f32,
    color: u32,
) {
    if label.is_empty() {
        return;
    }
    let max_width = (rect.width - inset * 2.0).max(0.0) as f32;
    let fitted = text.elide(label, size, max_width);
    text.draw_centered(frame, rect, &fitted, size, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grid::CellKind;
    use crate::model::naming::{RowOverrides, SectionConfig};
    use crate::theme::Theme;
    use crate::view::frame::GlyphCache;

    struct Fixture {
        grid: Grid,
        config: SectionConfig,
        overrides: RowOverrides,
        viewport: Viewport,
        theme: Theme,
    }

    impl Fixture {
        fn new(rows: usize, cols: usize) -> Self {
            let config = SectionConfig::default();
            let overrides = RowOverrides::new();
            let grid = Grid::new(rows, cols, &Naming::new(&config, &overrides, rows, cols));
            Self {
                grid,
                config,
                overrides,
                viewport: Viewport::default(),
                theme: Theme::default(),
            }
        }

        fn scene(&self, canvas: Rect, draft: bool) -> GridScene<'_> {
            GridScene {
                grid: &self.grid,
                naming: Naming::new(
                    &self.config,
                    &self.overrides,
                    self.grid.rows(),
                    self.grid.cols(),
                ),
                viewport: &self.viewport,
                hovered: None,
                theme: &self.theme.canvas,
                canvas,
                scale_factor: 1.0,
                draft,
            }
        }
    }

    fn pixel_at_cell(frame: &Frame, scene: &GridScene, row: usize, col: usize) -> u32 {
        let geometry = GridGeometry::new(scene.grid.rows(), scene.grid.cols());
        let rect = scene.to_physical(geometry.cell_rect(row, col));
        frame.get_pixel(
            (rect.x + rect.width / 2.0) as usize,
            (rect.y + 2.0) as usize,
        )
    }

    #[test]
    fn test_seat_and_empty_cells_use_distinct_fills() {
        let mut fixture = Fixture::new(2, 2);
        fixture.grid.set_kind(1, CellKind::Empty);

        let mut buffer = vec![0u32; 400 * 400];
        let mut frame = Frame::new(&mut buffer, 400, 400);
        let mut cache = GlyphCache::new();
        let mut text = TextPainter::new(None, &mut cache);
        let scene = fixture.scene(Rect::new(0.0, 0.0, 400.0, 400.0), false);

        paint_grid(&mut frame, &mut text, &scene);

        assert_eq!(
            pixel_at_cell(&frame, &scene, 1, 1),
            fixture.theme.canvas.seat.to_argb_u32()
        );
        assert_eq!(
            pixel_at_cell(&frame, &scene, 1, 2),
            fixture.theme.canvas.empty.to_argb_u32()
        );
    }

    #[test]
    fn test_hovered_seat_is_highlighted() {
        let fixture = Fixture::new(2, 2);
        let mut buffer = vec![0u32; 400 * 400];
        let mut frame = Frame::new(&mut buffer, 400, 400);
        let mut cache = GlyphCache::new();
        let mut text = TextPainter::new(None, &mut cache);
        let mut scene = fixture.scene(Rect::new(0.0, 0.0, 400.0, 400.0), false);
        scene.hovered = Some(0);

        paint_grid(&mut frame, &mut text, &scene);

        assert_eq!(
            pixel_at_cell(&frame, &scene, 1, 1),
            fixture.theme.canvas.seat_hover.to_argb_u32()
        );
    }

    #[test]
    fn test_painting_stays_inside_canvas() {
        let fixture = Fixture::new(3, 3);
        let mut buffer = vec![0u32; 300 * 300];
        let mut frame = Frame::new(&mut buffer, 300, 300);
        let mut cache = GlyphCache::new();
        let mut text = TextPainter::new(None, &mut cache);
        let scene = fixture.scene(Rect::new(100.0, 0.0, 200.0, 300.0), false);

        paint_grid(&mut frame, &mut text, &scene);

        assert_eq!(frame.get_pixel(50, 150), 0);
        assert_eq!(
            frame.get_pixel(299, 299),
            fixture.theme.canvas.background.to_argb_u32()
        );
    }

    #[test]
    fn test_text_skipped_in_draft_and_below_legibility_floor() {
        let mut fixture = Fixture::new(2, 2);
        let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(fixture.scene(canvas, false).text_size().is_some());
        assert!(fixture.scene(canvas, true).text_size().is_none());

        fixture.viewport.scale = 0.5;
        assert!(fixture.scene(canvas, false).text_size().is_none());
    }

    #[test]
    fn test_visible_cells_cull_offscreen_tracks() {
        let mut fixture = Fixture::new(100, 100);
        fixture.viewport.scale = 1.0;
        let scene = fixture.scene(Rect::new(0.0, 0.0, 200.0, 200.0), false);
        let (rows, cols) = scene.visible_cells();
        assert_eq!(*rows.start(), 0);
        assert!(*rows.end() < 10);
        assert!(*cols.end() < 10);

        fixture.viewport.translate.y = -(PAD + 50.0 * STEP);
        let scene = fixture.scene(Rect::new(0.0, 0.0, 200.0, 200.0), false);
        let (rows, _) = scene.visible_cells();
        assert!(*rows.start() >= 49);
    }
}
