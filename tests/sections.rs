//! Section cache and layout import tests

mod common;

use common::{cell_center, down, persists, send, stadium_model, test_model, up, STADIUM_JSON};

use grido::commands::Cmd;
use grido::messages::{GridMsg, ModalMsg, Msg, PointerButton, SectionMsg};
use grido::model::grid::CellKind;
use grido::model::project::DEFAULT_SECTION_CODE;
use grido::model::{Modal, Tool};
use grido::update::update;

fn switch(code: &str) -> Msg {
    Msg::Section(SectionMsg::Switch(code.to_string()))
}

fn import(json: &str) -> Msg {
    Msg::Section(SectionMsg::ImportLayout(json.to_string()))
}

// ========================================================================
// Import
// ========================================================================

#[test]
fn test_import_opens_first_leaf() {
    let model = stadium_model();

    assert!(model.project.is_loaded());
    assert_eq!(model.project.leaves(), ["A", "B", "C"]);
    assert_eq!(model.section_code, "A");
    assert_eq!(model.ui.form.section_code, "A");
    assert!(model.ui.notice.is_some());
}

#[test]
fn test_unnumbered_subtrees_are_not_leaves() {
    let mut model = test_model();
    update(
        &mut model,
        import(
            r#"{"sections":[
                {"code":"A","sections":[{"code":"A1"}]},
                {"code":"B","unnumbered":true}
            ]}"#,
        ),
    );

    assert_eq!(model.project.leaves(), ["A1"]);
    assert_eq!(model.section_code, "A1");
}

#[test]
fn test_failed_import_changes_nothing() {
    let mut model = test_model();
    model.grid.set_kind(0, CellKind::Empty);
    let grid = model.grid.clone();

    let cmd = update(&mut model, import("{ not json"));

    assert!(matches!(cmd, Some(Cmd::Redraw)));
    assert!(!model.project.is_loaded());
    assert_eq!(model.section_code, DEFAULT_SECTION_CODE);
    assert_eq!(model.grid, grid);
    let notice = model.ui.notice.as_ref().expect("error notice");
    assert!(notice.text.starts_with("Invalid JSON format"));
}

#[test]
fn test_layout_without_leaves_is_rejected() {
    let mut model = test_model();
    update(
        &mut model,
        import(r#"{"sections":[{"code":"VIP","unnumbered":true}]}"#),
    );

    assert!(!model.project.is_loaded());
    let notice = model.ui.notice.as_ref().expect("error notice");
    assert_eq!(
        notice.text,
        "No leaf sections (unnumbered: false) found in the JSON."
    );
}

#[test]
fn test_import_persists_project() {
    let mut model = test_model();
    let cmd = update(&mut model, import(STADIUM_JSON)).expect("import command");
    assert!(persists(&cmd));
}

#[test]
fn test_layout_loaded_behind_seat_editor_closes_it() {
    let mut model = stadium_model();
    update(&mut model, Msg::Grid(GridMsg::SelectTool(Tool::Edit)));
    let point = cell_center(&model, 1, 1);
    send(
        &mut model,
        vec![down(point, PointerButton::Primary), up(point)],
    );
    assert!(matches!(model.ui.modal, Some(Modal::EditSeat { .. })));

    update(
        &mut model,
        Msg::Section(SectionMsg::LayoutFileLoaded {
            path: "north.json".into(),
            result: Ok(r#"{"sections":[{"code":"N1"},{"code":"N2"}]}"#.to_string()),
        }),
    );

    assert!(model.ui.modal.is_none());
    assert_eq!(model.section_code, "N1");
    let grid = model.grid.clone();

    send(
        &mut model,
        vec![
            Msg::Modal(ModalMsg::InsertChar('X')),
            Msg::Modal(ModalMsg::Confirm),
        ],
    );
    assert_eq!(model.grid, grid);
    assert_eq!(model.grid.seat_count(), model.grid.len());
}

// ========================================================================
// Switching
// ========================================================================

#[test]
fn test_switching_away_and_back_restores_section() {
    let mut model = stadium_model();
    model.grid.set_kind(3, CellKind::Empty);
    model.section_config.name_pattern = "S$COL".to_string();

    update(&mut model, switch("B"));
    assert_eq!(model.section_code, "B");
    assert_eq!(model.grid.seat_count(), model.grid.len());
    assert_eq!(model.section_config.name_pattern, "$ROW-$COL");

    update(&mut model, switch("A"));
    assert_eq!(model.section_code, "A");
    assert_eq!(model.grid.cells()[3].kind, CellKind::Empty);
    assert_eq!(model.section_config.name_pattern, "S$COL");
}

#[test]
fn test_switching_to_live_cached_section_is_noop() {
    let mut model = stadium_model();
    update(&mut model, switch("B"));
    update(&mut model, switch("A"));

    assert!(update(&mut model, switch("A")).is_none());
}

#[test]
fn test_next_and_previous_wrap() {
    let mut model = stadium_model();

    update(&mut model, Msg::Section(SectionMsg::Next));
    assert_eq!(model.section_code, "B");

    send(
        &mut model,
        vec![
            Msg::Section(SectionMsg::Previous),
            Msg::Section(SectionMsg::Previous),
        ],
    );
    assert_eq!(model.section_code, "C");
}

#[test]
fn test_visited_sections_count_as_configured() {
    let mut model = stadium_model();
    update(&mut model, switch("C"));

    assert!(model.project.cache.is_configured("A"));
    assert!(!model.project.cache.is_configured("B"));
}

// ========================================================================
// Closing
// ========================================================================

#[test]
fn test_close_asks_for_confirmation() {
    let mut model = stadium_model();
    update(&mut model, Msg::Section(SectionMsg::RequestClose));
    assert_eq!(model.ui.modal, Some(Modal::ConfirmCloseProject));

    update(&mut model, Msg::Modal(ModalMsg::Cancel));
    assert!(model.project.is_loaded());
}

#[test]
fn test_confirmed_close_resets_and_clears_storage() {
    let mut model = stadium_model();
    update(&mut model, Msg::Section(SectionMsg::RequestClose));

    let cmd = update(&mut model, Msg::Modal(ModalMsg::Confirm)).expect("close command");

    assert!(cmd
        .flatten()
        .iter()
        .any(|c| matches!(c, Cmd::ClearStorage)));
    assert!(!model.project.is_loaded());
    assert!(model.project.cache.is_empty());
    assert_eq!(model.section_code, DEFAULT_SECTION_CODE);
    assert!(model.ui.modal.is_none());
}

#[test]
fn test_close_without_project_does_nothing() {
    let mut model = test_model();
    assert!(update(&mut model, Msg::Section(SectionMsg::RequestClose)).is_none());
    assert!(model.ui.modal.is_none());
}
