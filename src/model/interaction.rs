//! Pointer interaction state machine
//!
//! ```text
//!            press on data cell (paint tool)
//!   Idle ─────────────────────────────────────▶ Painting
//!    │  press with edit tool on a cell/label        │
//!    ├────────────────────────────────────▶ EditPending
//!    │  press anywhere else                          │
//!    └────────────────────────────────────▶ Panning  │
//!                       release ◀────────────────────┘
//! ```
//!
//! An `EditPending` gesture pans like `Panning`; on release it opens an
//! editor only if the pointer travelled less than the drag threshold.

use std::collections::HashSet;

use super::grid::CellKind;
use super::viewport::{GridHit, Point};

/// Cumulative pointer travel (logical px) below which a press-release is a click
pub const DRAG_THRESHOLD: f64 = 5.0;

/// Active canvas tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint seats
    #[default]
    Seat,
    /// Paint empty slots
    Empty,
    /// Click a seat or row label to edit it
    Edit,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Seat, Tool::Empty, Tool::Edit];

    /// Cell kind painted by this tool, `None` for non-painting tools
    pub fn paint_kind(self) -> Option<CellKind> {
        match self {
            Tool::Seat => Some(CellKind::Seat),
            Tool::Empty => Some(CellKind::Empty),
            Tool::Edit => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Tool::Seat => "Seat",
            Tool::Empty => "Empty",
            Tool::Edit => "Edit",
        }
    }
}

/// Where the current pointer gesture stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// Drag-painting `kind` onto cells; each cell is painted once per gesture
    Painting {
        kind: CellKind,
        painted: HashSet<usize>,
    },
    /// Dragging the canvas
    Panning { anchor: Point, last: Point, travel: f64 },
    /// Edit-tool press on `hit`; becomes a click if `travel` stays small
    EditPending {
        hit: GridHit,
        anchor: Point,
        last: Point,
        travel: f64,
    },
}

impl PointerState {
    /// Short name for tracing
    pub fn name(&self) -> &'static str {
        match self {
            PointerState::Idle => "Idle",
            PointerState::Painting { .. } => "Painting",
            PointerState::Panning { .. } => "Panning",
            PointerState::EditPending { .. } => "EditPending",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PointerState::Idle)
    }

    /// True while the canvas follows the pointer
    pub fn is_dragging_canvas(&self) -> bool {
        matches!(
            self,
            PointerState::Panning { .. } | PointerState::EditPending { .. }
        )
    }
}

/// Tool selection, gesture state and hover
#[derive(Debug, Clone)]
pub struct Interaction {
    pub tool: Tool,
    pub pointer: PointerState,
    /// Flat index of the data cell under the pointer
    pub hovered: Option<usize>,
    /// Travel below which an edit press counts as a click
    pub drag_threshold: f64,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD)
    }
}

impl Interaction {
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            tool: Tool::default(),
            pointer: PointerState::Idle,
            hovered: None,
            drag_threshold,
        }
    }
}
