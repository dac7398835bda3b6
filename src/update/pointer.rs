//! Canvas pointer handling
//!
//! Drives the [`PointerState`] machine: paint gestures, canvas panning, and
//! edit-tool clicks that open the seat or row editor.

use std::collections::HashSet;

use crate::commands::Cmd;
use crate::messages::{CanvasMsg, PointerButton};
use crate::model::interaction::PointerState;
use crate::model::ui::Modal;
use crate::model::viewport::{wheel_zoom_factor, GridHit, Point};
use crate::model::{AppModel, Tool};

use super::commit_and_persist;

pub fn update_canvas(model: &mut AppModel, msg: CanvasMsg) -> Option<Cmd> {
    match msg {
        CanvasMsg::PointerDown { x, y, button } => pointer_down(model, Point::new(x, y), button),
        CanvasMsg::PointerMove { x, y } => pointer_move(model, Point::new(x, y)),
        CanvasMsg::PointerUp { x, y } => {
            pointer_move(model, Point::new(x, y));
            finish_gesture(model, true)
        }
        CanvasMsg::PointerLeave => {
            let hover_changed = model.interaction.hovered.take().is_some();
            let cmd = finish_gesture(model, false);
            if hover_changed {
                Some(Cmd::batch(vec![Cmd::from(cmd), Cmd::Redraw]))
            } else {
                cmd
            }
        }
        CanvasMsg::Wheel { delta_y, x, y } => {
            let factor = wheel_zoom_factor(delta_y);
            let revision = model.viewport.zoom_at(Point::new(x, y), factor);
            Some(Cmd::batch(vec![
                Cmd::Redraw,
                Cmd::DebouncedZoomSettle {
                    revision,
                    delay_ms: model.config.zoom_debounce_ms,
                },
            ]))
        }
    }
}

fn hit(model: &AppModel, point: Point) -> Option<GridHit> {
    model.viewport.hit_test(&model.geometry(), point)
}

fn pointer_down(model: &mut AppModel, point: Point, button: PointerButton) -> Option<Cmd> {
    if !model.interaction.pointer.is_idle() {
        return None;
    }

    let hit = hit(model, point);
    let anchor = model.viewport.pan_anchor(point);
    let tool = model.interaction.tool;

    if button == PointerButton::Primary {
        if let (Some(kind), Some(index)) = (tool.paint_kind(), hit.and_then(|h| h.index)) {
            model.grid.set_kind(index, kind);
            let mut painted = HashSet::new();
            painted.insert(index);
            model.interaction.pointer = PointerState::Painting { kind, painted };
            model.interaction.hovered = Some(index);
            return Some(Cmd::Redraw);
        }

        if tool == Tool::Edit {
            if let Some(hit) = hit.filter(|h| h.index.is_some() || h.is_label()) {
                model.interaction.pointer = PointerState::EditPending {
                    hit,
                    anchor,
                    last: point,
                    travel: 0.0,
                };
                return None;
            }
        }
    }

    model.interaction.pointer = PointerState::Panning {
        anchor,
        last: point,
        travel: 0.0,
    };
    None
}

fn pointer_move(model: &mut AppModel, point: Point) -> Option<Cmd> {
    let hit_index = hit(model, point).and_then(|h| h.index);

    match &mut model.interaction.pointer {
        PointerState::Painting { kind, painted } => {
            let Some(index) = hit_index else {
                return None;
            };
            if !painted.insert(index) {
                return None;
            }
            let kind = *kind;
            let changed = model.grid.set_kind(index, kind);
            let hover_changed = model.interaction.hovered != Some(index);
            model.interaction.hovered = Some(index);
            (changed || hover_changed).then_some(Cmd::Redraw)
        }
        PointerState::Panning {
            anchor,
            last,
            travel,
        }
        | PointerState::EditPending {
            anchor,
            last,
            travel,
            ..
        } => {
            *travel += last.distance(point);
            *last = point;
            let anchor = *anchor;
            model.viewport.pan_to(point, anchor);
            Some(Cmd::Redraw)
        }
        PointerState::Idle => {
            if model.interaction.hovered == hit_index {
                return None;
            }
            model.interaction.hovered = hit_index;
            Some(Cmd::Redraw)
        }
    }
}

/// Return to `Idle`. A short edit-tool gesture opens an editor when
/// `allow_click` is set; a paint gesture commits the section.
fn finish_gesture(model: &mut AppModel, allow_click: bool) -> Option<Cmd> {
    match std::mem::take(&mut model.interaction.pointer) {
        PointerState::Idle => None,
        PointerState::Painting { painted, .. } => {
            tracing::debug!("Paint gesture touched {} cells", painted.len());
            Some(Cmd::batch(vec![commit_and_persist(model), Cmd::Redraw]))
        }
        PointerState::Panning { .. } => None,
        PointerState::EditPending { hit, travel, .. } => {
            if !allow_click || travel >= model.interaction.drag_threshold {
                return None;
            }
            open_editor(model, hit)
        }
    }
}

fn open_editor(model: &mut AppModel, hit: GridHit) -> Option<Cmd> {
    let modal = if let Some(index) = hit.index {
        let input = model.grid.get(index)?.label.clone();
        Modal::EditSeat { index, input }
    } else if hit.is_label() {
        Modal::EditRow {
            row: hit.row,
            input: model.naming().row_label(hit.row),
        }
    } else {
        return None;
    };

    tracing::debug!("Opening editor: {}", modal.title());
    model.ui.modal = Some(modal);
    Some(Cmd::Redraw)
}
