//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::{ConfigField, Tool};

/// Mouse button that started a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer input over the canvas, in canvas-local logical pixels
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMsg {
    PointerDown { x: f64, y: f64, button: PointerButton },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Pointer left the canvas
    PointerLeave,
    /// Wheel or trackpad scroll; positive `delta_y` scrolls down
    Wheel { delta_y: f64, x: f64, y: f64 },
}

/// Pan/zoom messages
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportMsg {
    /// Debounce timer fired for the zoom with `revision`
    ZoomSettled { revision: u64 },
    /// Zoom in around the canvas center
    ZoomIn,
    /// Zoom out around the canvas center
    ZoomOut,
    /// Fit the grid into the canvas
    Recenter,
}

/// Whole-grid editing
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    SelectTool(Tool),
    /// Turn every cell into a seat
    FillAll,
    /// Turn every cell into an empty slot
    ClearAll,
    /// Regenerate every label from the current naming rules
    ApplyNaming,
}

/// Sidebar config form
#[derive(Debug, Clone, PartialEq)]
pub enum FormMsg {
    Focus(ConfigField),
    /// Move focus to the next text field (Tab)
    FocusNext,
    Blur,
    InsertChar(char),
    DeleteBackward,
    /// Flip a checkbox or the naming type
    Toggle(ConfigField),
}

/// Project and section navigation
#[derive(Debug, Clone, PartialEq)]
pub enum SectionMsg {
    /// Make the given leaf section live
    Switch(String),
    /// Expand or collapse a parent in the navigator
    ToggleNode(String),
    Next,
    Previous,
    /// Scroll the navigator by whole rows (positive = down)
    ScrollTree(i32),
    /// Ask for a layout file
    RequestImport,
    /// Layout file read finished
    LayoutFileLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },
    /// Import a layout from JSON text
    ImportLayout(String),
    /// Ask for confirmation before closing the project
    RequestClose,
    /// Close the project (confirmed)
    Close,
}

/// Seat/row editor and confirmation dialogs
#[derive(Debug, Clone, PartialEq)]
pub enum ModalMsg {
    InsertChar(char),
    DeleteBackward,
    Confirm,
    Cancel,
}

/// App messages (export, storage, window)
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Window resized (physical pixels)
    Resize(u32, u32),
    /// Display scale factor changed (e.g., moving between monitors)
    ScaleFactorChanged(f64),
    /// Export the live section as CSV
    ExportCsv,
    /// Export every configured leaf section as a ZIP archive
    ExportArchive,
    /// Export finished; `Ok(None)` when the save dialog was cancelled
    ExportCompleted(Result<Option<PathBuf>, String>),
    /// Project snapshot write finished
    PersistCompleted(Result<(), String>),
    /// Periodic housekeeping (notice expiry)
    Tick,
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Canvas(CanvasMsg),
    Viewport(ViewportMsg),
    Grid(GridMsg),
    Form(FormMsg),
    Section(SectionMsg),
    Modal(ModalMsg),
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Msg::Canvas(CanvasMsg::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
        })
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Msg::Canvas(CanvasMsg::PointerMove { x, y })
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Msg::Canvas(CanvasMsg::PointerUp { x, y })
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Msg::App(AppMsg::Resize(width, height))
    }
}
