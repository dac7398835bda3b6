//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use grido::commands::Cmd;
use grido::config::GridConfig;
use grido::messages::{CanvasMsg, Msg, PointerButton, SectionMsg};
use grido::model::viewport::{GridGeometry, Point, Viewport};
use grido::model::AppModel;
use grido::theme::Theme;
use grido::update::update;

/// Two parents, a top-level leaf and an unnumbered block
pub const STADIUM_JSON: &str = r#"{
    "name": "Estadio  Test",
    "sections": [
        { "code": "P1", "name": "Piso 1", "sections": [ { "code": "A" }, { "code": "B" } ] },
        { "code": "C" },
        { "code": "VIP", "unnumbered": true, "sections": [ { "code": "V1" } ] }
    ]
}"#;

/// True if `cmd` (or any command in a batch) writes the project
pub fn persists(cmd: &Cmd) -> bool {
    cmd.flatten()
        .iter()
        .any(|c| matches!(c, Cmd::PersistProject { .. }))
}

/// Default model in a 1280x800 window at scale factor 1
pub fn test_model() -> AppModel {
    AppModel::new(GridConfig::default(), Theme::default(), (1280, 800), 1.0)
}

/// Model with a `rows` x `cols` live section and an identity viewport
pub fn grid_model(rows: usize, cols: usize) -> AppModel {
    let config = GridConfig {
        default_rows: rows,
        default_cols: cols,
        ..GridConfig::default()
    };
    let mut model = AppModel::new(config, Theme::default(), (1280, 800), 1.0);
    model.viewport = Viewport::default();
    model
}

/// Model with [`STADIUM_JSON`] imported
pub fn stadium_model() -> AppModel {
    let mut model = test_model();
    update(
        &mut model,
        Msg::Section(SectionMsg::ImportLayout(STADIUM_JSON.to_string())),
    );
    model
}

/// Canvas-local point at the center of the cell at (`row`, `col`); column 0
/// is the row label and row 0 the header
pub fn cell_center(model: &AppModel, row: usize, col: usize) -> Point {
    let rect = GridGeometry::new(model.grid.rows(), model.grid.cols()).cell_rect(row, col);
    model.viewport.grid_to_screen(Point::new(
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0,
    ))
}

pub fn down(point: Point, button: PointerButton) -> Msg {
    Msg::Canvas(CanvasMsg::PointerDown {
        x: point.x,
        y: point.y,
        button,
    })
}

pub fn move_to(point: Point) -> Msg {
    Msg::Canvas(CanvasMsg::PointerMove {
        x: point.x,
        y: point.y,
    })
}

pub fn up(point: Point) -> Msg {
    Msg::Canvas(CanvasMsg::PointerUp {
        x: point.x,
        y: point.y,
    })
}

/// Send all messages, returning the command of the last one
pub fn send(model: &mut AppModel, msgs: Vec<Msg>) -> Option<Cmd> {
    let mut last = None;
    for msg in msgs {
        last = update(model, msg);
    }
    last
}
