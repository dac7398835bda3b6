//! Whole-window rendering without a font

mod common;

use common::{stadium_model, test_model};

use grido::model::viewport::Point;
use grido::model::AppModel;
use grido::view::{self, Frame, GlyphCache, TextPainter};

fn render(model: &AppModel) -> Vec<u32> {
    let (w, h) = (model.window_size.0 as usize, model.window_size.1 as usize);
    let mut buffer = vec![0u32; w * h];
    let mut cache = GlyphCache::new();
    {
        let mut frame = Frame::new(&mut buffer, w, h);
        let mut text = TextPainter::new(None, &mut cache);
        view::render(model, &mut frame, &mut text);
    }
    buffer
}

/// Window pixel at the center of a data cell
fn cell_pixel(model: &AppModel, buffer: &[u32], row: usize, col: usize) -> u32 {
    let rect = model.geometry().cell_rect(row, col);
    let local = model.viewport.grid_to_screen(Point::new(
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0,
    ));
    let canvas = model.canvas_rect();
    let x = ((canvas.x + local.x) * model.scale_factor) as usize;
    let y = ((canvas.y + local.y) * model.scale_factor) as usize;
    buffer[y * model.window_size.0 as usize + x]
}

#[test]
fn test_seats_and_empty_cells_render_with_theme_colors() {
    let mut model = test_model();
    model.grid.set_kind(1, grido::model::CellKind::Empty);

    let buffer = render(&model);

    assert_eq!(
        cell_pixel(&model, &buffer, 1, 1),
        model.theme.canvas.seat.to_argb_u32()
    );
    assert_eq!(
        cell_pixel(&model, &buffer, 1, 2),
        model.theme.canvas.empty.to_argb_u32()
    );
}

#[test]
fn test_sections_panel_shifts_canvas() {
    let plain = test_model();
    let loaded = stadium_model();

    assert!(loaded.canvas_rect().x > plain.canvas_rect().x);

    let buffer = render(&loaded);
    assert_eq!(
        cell_pixel(&loaded, &buffer, 1, 1),
        loaded.theme.canvas.seat.to_argb_u32()
    );
}

#[test]
fn test_hidpi_render_fills_physical_buffer() {
    let mut model = test_model();
    model.window_size = (2560, 1600);
    model.scale_factor = 2.0;
    model.recenter();

    let buffer = render(&model);

    assert_eq!(buffer.len(), 2560 * 1600);
    assert_eq!(
        cell_pixel(&model, &buffer, 3, 4),
        model.theme.canvas.seat.to_argb_u32()
    );
}
