//! Keyboard input handling
//!
//! Keys route to the first of these that is active:
//! - the open modal (seat/row editor, confirmation)
//! - the focused config input
//! - global shortcuts (tools, zoom, section navigation, export)

use winit::keyboard::{Key, NamedKey};

use grido::messages::{
    AppMsg, FormMsg, GridMsg, ModalMsg, Msg, SectionMsg, ViewportMsg,
};
use grido::model::{AppModel, Tool};

/// Messages for one key press
pub fn key_msgs(model: &AppModel, key: &Key, ctrl: bool, shift: bool) -> Vec<Msg> {
    if model.ui.modal.is_some() {
        return modal_key(key);
    }
    if model.ui.form.focused.is_some() {
        return form_key(key);
    }
    global_key(key, ctrl, shift).into_iter().collect()
}

fn typed_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| !c.is_control())
}

fn modal_key(key: &Key) -> Vec<Msg> {
    match key {
        Key::Named(NamedKey::Escape) => vec![Msg::Modal(ModalMsg::Cancel)],
        Key::Named(NamedKey::Enter) => vec![Msg::Modal(ModalMsg::Confirm)],
        Key::Named(NamedKey::Backspace) => vec![Msg::Modal(ModalMsg::DeleteBackward)],
        Key::Named(NamedKey::Space) => vec![Msg::Modal(ModalMsg::InsertChar(' '))],
        Key::Character(text) => typed_chars(text)
            .map(|c| Msg::Modal(ModalMsg::InsertChar(c)))
            .collect(),
        _ => Vec::new(),
    }
}

fn form_key(key: &Key) -> Vec<Msg> {
    match key {
        Key::Named(NamedKey::Escape | NamedKey::Enter) => vec![Msg::Form(FormMsg::Blur)],
        Key::Named(NamedKey::Tab) => vec![Msg::Form(FormMsg::FocusNext)],
        Key::Named(NamedKey::Backspace) => vec![Msg::Form(FormMsg::DeleteBackward)],
        Key::Named(NamedKey::Space) => vec![Msg::Form(FormMsg::InsertChar(' '))],
        Key::Character(text) => typed_chars(text)
            .map(|c| Msg::Form(FormMsg::InsertChar(c)))
            .collect(),
        _ => Vec::new(),
    }
}

fn global_key(key: &Key, ctrl: bool, shift: bool) -> Option<Msg> {
    match key {
        Key::Named(NamedKey::Tab) => Some(Msg::Form(FormMsg::FocusNext)),
        Key::Named(NamedKey::PageUp) => Some(Msg::Section(SectionMsg::Previous)),
        Key::Named(NamedKey::PageDown) => Some(Msg::Section(SectionMsg::Next)),
        Key::Character(text) if ctrl => match text.to_lowercase().as_str() {
            "e" if shift => Some(Msg::App(AppMsg::ExportArchive)),
            "e" => Some(Msg::App(AppMsg::ExportCsv)),
            "o" => Some(Msg::Section(SectionMsg::RequestImport)),
            "q" => Some(Msg::App(AppMsg::Quit)),
            _ => None,
        },
        Key::Character(text) => match text.as_str() {
            "+" | "=" => Some(Msg::Viewport(ViewportMsg::ZoomIn)),
            "-" => Some(Msg::Viewport(ViewportMsg::ZoomOut)),
            "0" => Some(Msg::Viewport(ViewportMsg::Recenter)),
            "1" => Some(Msg::Grid(GridMsg::SelectTool(Tool::Seat))),
            "2" => Some(Msg::Grid(GridMsg::SelectTool(Tool::Empty))),
            "3" => Some(Msg::Grid(GridMsg::SelectTool(Tool::Edit))),
            _ => None,
        },
        _ => None,
    }
}
