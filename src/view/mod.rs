//! Rendering of the designer into an ARGB frame buffer
//!
//! The view is a pure function of the model: [`render`] paints the grid
//! canvas and the panels around it. The windowing runtime owns the pixel
//! buffer and the font; everything here draws in physical pixels.

pub mod fonts;
pub mod frame;
pub mod grid;
pub mod layout;
pub mod panels;

pub use frame::{Frame, GlyphCache, TextPainter};
pub use grid::{paint_grid, GridScene};
pub use layout::{click_msgs, hit_widget, Widget};

use crate::model::AppModel;

use panels::PanelPainter;

/// Paint the whole window
pub fn render(model: &AppModel, frame: &mut Frame, text: &mut TextPainter) {
    frame.clear(model.theme.canvas.background.to_argb_u32());

    let scene = GridScene {
        grid: &model.grid,
        naming: model.naming(),
        viewport: &model.viewport,
        hovered: model.interaction.hovered,
        theme: &model.theme.canvas,
        canvas: model.canvas_rect().scaled(model.scale_factor),
        scale_factor: model.scale_factor,
        draft: !model.viewport.is_settled(),
    };
    paint_grid(frame, text, &scene);

    let rows = layout::tree_rows(model);
    let mut painter = PanelPainter {
        frame,
        text,
        scale_factor: model.scale_factor,
    };
    panels::paint_sidebar(&mut painter, model);
    panels::paint_sections(&mut painter, model, &rows);
    panels::paint_status_bar(&mut painter, model);
    panels::paint_modal(&mut painter, model);
}
