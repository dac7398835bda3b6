//! Pan/zoom message handlers

use crate::commands::Cmd;
use crate::messages::ViewportMsg;
use crate::model::viewport::{Point, ZOOM_STEP};
use crate::model::AppModel;

pub fn update_viewport(model: &mut AppModel, msg: ViewportMsg) -> Option<Cmd> {
    match msg {
        ViewportMsg::ZoomSettled { revision } => {
            // Stale timers belong to zooms that were superseded
            model.viewport.settle(revision).then_some(Cmd::Redraw)
        }
        ViewportMsg::ZoomIn => zoom_centered(model, ZOOM_STEP),
        ViewportMsg::ZoomOut => zoom_centered(model, 1.0 / ZOOM_STEP),
        ViewportMsg::Recenter => {
            model.recenter();
            Some(Cmd::Redraw)
        }
    }
}

/// Discrete zoom around the canvas center, drawn at full quality right away
fn zoom_centered(model: &mut AppModel, factor: f64) -> Option<Cmd> {
    let canvas = model.canvas_rect();
    let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
    let revision = model.viewport.zoom_at(center, factor);
    model.viewport.settle(revision);
    Some(Cmd::Redraw)
}
