//! Modal dialog handlers (seat editor, row editor, close confirmation)

use crate::commands::Cmd;
use crate::messages::{ModalMsg, SectionMsg};
use crate::model::grid::CellKind;
use crate::model::ui::Modal;
use crate::model::AppModel;

use super::commit_and_persist;

pub fn update_modal(model: &mut AppModel, msg: ModalMsg) -> Option<Cmd> {
    let modal = model.ui.modal.as_mut()?;

    match msg {
        ModalMsg::InsertChar(ch) => {
            if ch.is_control() {
                return None;
            }
            modal.input_mut()?.push(ch);
            Some(Cmd::Redraw)
        }
        ModalMsg::DeleteBackward => {
            modal.input_mut()?.pop()?;
            Some(Cmd::Redraw)
        }
        ModalMsg::Cancel => {
            model.ui.modal = None;
            Some(Cmd::Redraw)
        }
        ModalMsg::Confirm => {
            let modal = model.ui.modal.take()?;
            confirm(model, modal)
        }
    }
}

fn confirm(model: &mut AppModel, modal: Modal) -> Option<Cmd> {
    match modal {
        Modal::EditSeat { index, input } => {
            let cell = model.grid.get_mut(index)?;
            cell.label = input.trim().to_string();
            cell.kind = CellKind::Seat;
            Some(Cmd::batch(vec![commit_and_persist(model), Cmd::Redraw]))
        }
        Modal::EditRow { row, input } => {
            // Blank input removes the override
            model.row_overrides.set(row, &input);
            Some(Cmd::batch(vec![commit_and_persist(model), Cmd::Redraw]))
        }
        Modal::ConfirmCloseProject => {
            super::update_section(model, SectionMsg::Close)
        }
    }
}
