//! Sidebar config form input

use crate::commands::Cmd;
use crate::messages::FormMsg;
use crate::model::ui::ConfigField;
use crate::model::AppModel;

use super::grid::apply_form_field;

pub fn update_form(model: &mut AppModel, msg: FormMsg) -> Option<Cmd> {
    match msg {
        FormMsg::Focus(field) => {
            if !field.is_text() || !is_editable(model, field) {
                return None;
            }
            if model.ui.form.focused == Some(field) {
                return None;
            }
            let cmd = blur(model);
            model.ui.form.focused = Some(field);
            Some(Cmd::batch(vec![Cmd::from(cmd), Cmd::Redraw]))
        }
        FormMsg::FocusNext => {
            let next = next_text_field(model, model.ui.form.focused);
            let cmd = blur(model);
            model.ui.form.focused = next;
            Some(Cmd::batch(vec![Cmd::from(cmd), Cmd::Redraw]))
        }
        FormMsg::Blur => {
            let had_focus = model.ui.form.focused.is_some();
            let cmd = blur(model);
            if had_focus {
                Some(Cmd::batch(vec![Cmd::from(cmd), Cmd::Redraw]))
            } else {
                cmd
            }
        }
        FormMsg::InsertChar(ch) => {
            let field = model.ui.form.focused?;
            if ch.is_control() || (field.is_dimension() && !ch.is_ascii_digit()) {
                return None;
            }
            model.ui.form.text_mut(field)?.push(ch);
            on_text_changed(model, field)
        }
        FormMsg::DeleteBackward => {
            let field = model.ui.form.focused?;
            model.ui.form.text_mut(field)?.pop()?;
            on_text_changed(model, field)
        }
        FormMsg::Toggle(field) => {
            if !model.ui.form.toggle(field) {
                return None;
            }
            Some(Cmd::batch(vec![
                Cmd::from(apply_form_field(model, field)),
                Cmd::Redraw,
            ]))
        }
    }
}

/// The section code is fixed by the layout while a project is loaded
fn is_editable(model: &AppModel, field: ConfigField) -> bool {
    !(field == ConfigField::SectionCode && model.project.is_loaded())
}

/// Naming fields apply live; size fields wait for blur so that typing
/// `12` over `10` never shrinks the grid to one row on the way
fn on_text_changed(model: &mut AppModel, field: ConfigField) -> Option<Cmd> {
    if field.is_dimension() {
        return Some(Cmd::Redraw);
    }
    Some(Cmd::batch(vec![
        Cmd::from(apply_form_field(model, field)),
        Cmd::Redraw,
    ]))
}

/// Drop focus, applying a pending size change
fn blur(model: &mut AppModel) -> Option<Cmd> {
    let field = model.ui.form.focused.take()?;
    if field.is_dimension() {
        return apply_form_field(model, field);
    }
    None
}

fn next_text_field(model: &AppModel, current: Option<ConfigField>) -> Option<ConfigField> {
    let fields: Vec<ConfigField> = ConfigField::ALL
        .into_iter()
        .filter(|f| f.is_text() && is_editable(model, *f))
        .collect();
    if fields.is_empty() {
        return None;
    }
    let next = match current.and_then(|c| fields.iter().position(|f| *f == c)) {
        Some(i) => (i + 1) % fields.len(),
        None => 0,
    };
    Some(fields[next])
}
