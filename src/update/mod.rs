//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod form;
mod grid;
mod pointer;
mod section;
mod ui;
mod viewport;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;
use crate::persistence::ProjectSnapshot;

#[cfg(debug_assertions)]
use crate::tracing::StateSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use form::update_form;
pub use grid::{apply_form_field, update_grid};
pub use pointer::update_canvas;
pub use section::{import_layout, switch_section, update_section};
pub use ui::update_modal;
pub use viewport::update_viewport;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    // A modal captures all canvas and form input until it closes
    if model.ui.modal.is_some() && matches!(msg, Msg::Canvas(_) | Msg::Form(_) | Msg::Grid(_)) {
        return None;
    }

    match msg {
        Msg::Canvas(m) => pointer::update_canvas(model, m),
        Msg::Viewport(m) => viewport::update_viewport(model, m),
        Msg::Grid(m) => grid::update_grid(model, m),
        Msg::Form(m) => form::update_form(model, m),
        Msg::Section(m) => section::update_section(model, m),
        Msg::Modal(m) => ui::update_modal(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Save the live section into the cache and write the project to storage
pub(crate) fn commit_and_persist(model: &mut AppModel) -> Cmd {
    model.commit_live_section();
    persist(model)
}

/// Command writing the current project to storage
pub(crate) fn persist(model: &AppModel) -> Cmd {
    Cmd::PersistProject {
        snapshot: Box::new(ProjectSnapshot::capture(model)),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after state and logs diffs for debugging.
/// Filters out noisy messages like pointer moves and ticks from logging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::{AppMsg, CanvasMsg};

    let is_noisy = matches!(
        &msg,
        Msg::Canvas(CanvasMsg::PointerMove { .. }) | Msg::App(AppMsg::Tick)
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = StateSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = StateSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    model.grid.assert_invariants();

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Canvas::PointerDown { x: 10.0, y: 4.0, button: Primary }`
/// - `Grid::FillAll`
/// - `App::Resize(1920, 1080)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Canvas(m) => format!("Canvas::{:?}", m),
        Msg::Viewport(m) => format!("Viewport::{:?}", m),
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::Form(m) => format!("Form::{:?}", m),
        Msg::Section(m) => match m {
            // Layout JSON can be large
            crate::messages::SectionMsg::ImportLayout(json) => {
                format!("Section::ImportLayout({} bytes)", json.len())
            }
            crate::messages::SectionMsg::LayoutFileLoaded { path, .. } => {
                format!("Section::LayoutFileLoaded({})", path.display())
            }
            other => format!("Section::{:?}", other),
        },
        Msg::Modal(m) => format!("Modal::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
