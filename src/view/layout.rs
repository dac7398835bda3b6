//! Widget layout and hit-testing for the panels around the canvas
//!
//! Every clickable element is a [`Widget`] with a rectangle in window
//! logical coordinates. The painter and the runtime share these layouts, so
//! what is drawn is exactly what is clickable.

use crate::messages::{AppMsg, FormMsg, GridMsg, ModalMsg, Msg, SectionMsg, ViewportMsg};
use crate::model::layout::{section_tree, TreeRow};
use crate::model::ui::{ConfigField, Modal};
use crate::model::{AppModel, Point, Rect, Tool};

pub const MARGIN: f64 = 16.0;
pub const BUTTON_HEIGHT: f64 = 28.0;
pub const INPUT_HEIGHT: f64 = 26.0;
pub const FIELD_LABEL_HEIGHT: f64 = 16.0;
pub const TOGGLE_HEIGHT: f64 = 22.0;
pub const HEADING_HEIGHT: f64 = 20.0;
pub const SPACING: f64 = 8.0;

pub const TREE_HEADER_HEIGHT: f64 = 72.0;
pub const TREE_ROW_HEIGHT: f64 = 24.0;
pub const TREE_INDENT: f64 = 14.0;

pub const MODAL_WIDTH: f64 = 360.0;
pub const MODAL_HEIGHT: f64 = 150.0;

/// Sidebar and toolbar buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FillAll,
    ClearAll,
    ApplyNaming,
    ExportCsv,
    ExportArchive,
    ImportLayout,
    CloseProject,
    PreviousSection,
    NextSection,
    ZoomIn,
    ZoomOut,
    Recenter,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::FillAll => "Fill all",
            Action::ClearAll => "Clear all",
            Action::ApplyNaming => "Apply naming",
            Action::ExportCsv => "Export CSV",
            Action::ExportArchive => "Export ZIP",
            Action::ImportLayout => "Import layout",
            Action::CloseProject => "Close project",
            Action::PreviousSection => "<",
            Action::NextSection => ">",
            Action::ZoomIn => "+",
            Action::ZoomOut => "-",
            Action::Recenter => "Fit",
        }
    }

    pub fn msg(self) -> Msg {
        match self {
            Action::FillAll => Msg::Grid(GridMsg::FillAll),
            Action::ClearAll => Msg::Grid(GridMsg::ClearAll),
            Action::ApplyNaming => Msg::Grid(GridMsg::ApplyNaming),
            Action::ExportCsv => Msg::App(AppMsg::ExportCsv),
            Action::ExportArchive => Msg::App(AppMsg::ExportArchive),
            Action::ImportLayout => Msg::Section(SectionMsg::RequestImport),
            Action::CloseProject => Msg::Section(SectionMsg::RequestClose),
            Action::PreviousSection => Msg::Section(SectionMsg::Previous),
            Action::NextSection => Msg::Section(SectionMsg::Next),
            Action::ZoomIn => Msg::Viewport(ViewportMsg::ZoomIn),
            Action::ZoomOut => Msg::Viewport(ViewportMsg::ZoomOut),
            Action::Recenter => Msg::Viewport(ViewportMsg::Recenter),
        }
    }
}

/// A clickable element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Tool(Tool),
    Field(ConfigField),
    Action(Action),
    /// Row of the section navigator, by index into the full tree
    TreeRow(usize),
    ModalConfirm,
    ModalCancel,
    /// Anywhere outside the modal box
    ModalBackdrop,
}

/// Section heading drawn above a widget group
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub text: &'static str,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelLayout {
    pub headings: Vec<Heading>,
    pub widgets: Vec<(Widget, Rect)>,
}

impl PanelLayout {
    pub fn hit(&self, point: Point) -> Option<&Widget> {
        self.widgets
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(widget, _)| widget)
    }

    pub fn rect_of(&self, widget: &Widget) -> Option<Rect> {
        self.widgets
            .iter()
            .find(|(w, _)| w == widget)
            .map(|(_, rect)| *rect)
    }
}

/// Lays widgets out top to bottom inside a column
struct Column {
    x: f64,
    width: f64,
    y: f64,
    layout: PanelLayout,
}

impl Column {
    fn new(area: Rect, top: f64) -> Self {
        Self {
            x: area.x + MARGIN,
            width: (area.width - MARGIN * 2.0).max(0.0),
            y: area.y + top,
            layout: PanelLayout::default(),
        }
    }

    fn heading(&mut self, text: &'static str) {
        self.layout.headings.push(Heading {
            text,
            rect: Rect::new(self.x, self.y, self.width, HEADING_HEIGHT),
        });
        self.y += HEADING_HEIGHT + 4.0;
    }

    /// Equal-width widgets side by side
    fn row(&mut self, widgets: Vec<Widget>, height: f64) {
        let count = widgets.len().max(1) as f64;
        let w = (self.width - SPACING * (count - 1.0)) / count;
        for (i, widget) in widgets.into_iter().enumerate() {
            let x = self.x + i as f64 * (w + SPACING);
            self.layout
                .widgets
                .push((widget, Rect::new(x, self.y, w, height)));
        }
        self.y += height + SPACING;
    }

    /// Text inputs with a label line above each
    fn inputs(&mut self, fields: Vec<ConfigField>) {
        self.y += FIELD_LABEL_HEIGHT;
        self.row(fields.into_iter().map(Widget::Field).collect(), INPUT_HEIGHT);
    }

    fn gap(&mut self, amount: f64) {
        self.y += amount;
    }
}

/// Title block height above the first sidebar heading
pub const SIDEBAR_TITLE_HEIGHT: f64 = 44.0;

/// Tools, config form and actions in the left sidebar
pub fn sidebar_layout(sidebar: Rect) -> PanelLayout {
    let mut col = Column::new(sidebar, SIDEBAR_TITLE_HEIGHT);

    col.heading("TOOLS");
    col.row(Tool::ALL.into_iter().map(Widget::Tool).collect(), BUTTON_HEIGHT);
    col.gap(4.0);

    col.heading("SECTION");
    col.inputs(vec![ConfigField::SectionCode]);
    col.inputs(vec![ConfigField::Rows, ConfigField::Cols]);
    col.gap(4.0);

    col.heading("NAMING");
    col.row(vec![Widget::Field(ConfigField::NamingType)], TOGGLE_HEIGHT);
    col.inputs(vec![ConfigField::RowStart, ConfigField::ColStart]);
    col.inputs(vec![ConfigField::NamePattern]);
    for field in [
        ConfigField::InvertRows,
        ConfigField::InvertCols,
        ConfigField::ZeroPadding,
    ] {
        col.row(vec![Widget::Field(field)], TOGGLE_HEIGHT);
    }
    col.row(vec![Widget::Action(Action::ApplyNaming)], BUTTON_HEIGHT);
    col.gap(4.0);

    col.heading("GRID");
    col.row(
        vec![
            Widget::Action(Action::FillAll),
            Widget::Action(Action::ClearAll),
        ],
        BUTTON_HEIGHT,
    );
    col.row(
        vec![
            Widget::Action(Action::ExportCsv),
            Widget::Action(Action::ExportArchive),
        ],
        BUTTON_HEIGHT,
    );
    col.row(
        vec![
            Widget::Action(Action::ImportLayout),
            Widget::Action(Action::CloseProject),
        ],
        BUTTON_HEIGHT,
    );

    col.layout
}

/// Navigator rows that fit below the header
pub fn tree_capacity(panel: Rect) -> usize {
    ((panel.height - TREE_HEADER_HEIGHT) / TREE_ROW_HEIGHT).floor().max(0.0) as usize
}

/// Prev/next buttons and the visible tree rows of the section navigator
pub fn sections_layout(panel: Rect, rows: &[TreeRow], scroll: usize) -> PanelLayout {
    let mut layout = PanelLayout::default();

    let button_w = 28.0;
    let button_y = panel.y + 40.0;
    layout.widgets.push((
        Widget::Action(Action::PreviousSection),
        Rect::new(panel.right() - MARGIN - button_w * 2.0 - 4.0, button_y, button_w, 24.0),
    ));
    layout.widgets.push((
        Widget::Action(Action::NextSection),
        Rect::new(panel.right() - MARGIN - button_w, button_y, button_w, 24.0),
    ));

    let top = panel.y + TREE_HEADER_HEIGHT;
    for (slot, index) in (scroll..rows.len()).take(tree_capacity(panel)).enumerate() {
        let y = top + slot as f64 * TREE_ROW_HEIGHT;
        layout.widgets.push((
            Widget::TreeRow(index),
            Rect::new(panel.x, y, panel.width, TREE_ROW_HEIGHT),
        ));
    }

    layout
}

/// Zoom buttons at the right end of the status bar
pub fn status_bar_layout(bar: Rect) -> PanelLayout {
    let mut layout = PanelLayout::default();
    let h = bar.height - 6.0;
    let y = bar.y + 3.0;
    let mut x = bar.right() - 8.0;
    for (action, w) in [
        (Action::Recenter, 36.0),
        (Action::ZoomIn, 24.0),
        (Action::ZoomOut, 24.0),
    ] {
        x -= w;
        layout
            .widgets
            .push((Widget::Action(action), Rect::new(x, y, w, h)));
        x -= 4.0;
    }
    layout
}

/// Modal box centered in the window
pub fn modal_rect(window: (f64, f64)) -> Rect {
    Rect::new(
        ((window.0 - MODAL_WIDTH) / 2.0).max(0.0),
        ((window.1 - MODAL_HEIGHT) / 2.0).max(0.0),
        MODAL_WIDTH,
        MODAL_HEIGHT,
    )
}

/// Input box of a modal that has one
pub fn modal_input_rect(modal: Rect) -> Rect {
    Rect::new(
        modal.x + MARGIN,
        modal.y + 48.0,
        modal.width - MARGIN * 2.0,
        INPUT_HEIGHT + 4.0,
    )
}

pub fn modal_layout(modal: Rect) -> PanelLayout {
    let w = 96.0;
    let y = modal.bottom() - MARGIN - BUTTON_HEIGHT;
    PanelLayout {
        headings: Vec::new(),
        widgets: vec![
            (
                Widget::ModalConfirm,
                Rect::new(modal.right() - MARGIN - w, y, w, BUTTON_HEIGHT),
            ),
            (
                Widget::ModalCancel,
                Rect::new(modal.right() - MARGIN - w * 2.0 - SPACING, y, w, BUTTON_HEIGHT),
            ),
        ],
    }
}

/// Label of the modal's confirm button
pub fn confirm_label(modal: &Modal) -> &'static str {
    match modal {
        Modal::ConfirmCloseProject => "Close",
        Modal::EditSeat { .. } | Modal::EditRow { .. } => "Save",
    }
}

/// Navigator rows for the current model, empty without a project
pub fn tree_rows(model: &AppModel) -> Vec<TreeRow> {
    model
        .project
        .layout()
        .map(|layout| {
            section_tree(
                layout,
                &model.project.cache,
                &model.section_code,
                &model.ui.expanded_nodes,
            )
        })
        .unwrap_or_default()
}

/// Widget under a point in window logical coordinates
pub fn hit_widget(model: &AppModel, point: Point) -> Option<Widget> {
    if model.ui.modal.is_some() {
        let modal = modal_rect(model.logical_size());
        if !modal.contains(point) {
            return Some(Widget::ModalBackdrop);
        }
        return modal_layout(modal).hit(point).cloned();
    }

    if model.sidebar_rect().contains(point) {
        return sidebar_layout(model.sidebar_rect()).hit(point).cloned();
    }
    if let Some(panel) = model.sections_rect().filter(|r| r.contains(point)) {
        let rows = tree_rows(model);
        return sections_layout(panel, &rows, model.ui.tree_scroll)
            .hit(point)
            .cloned();
    }
    if model.status_bar_rect().contains(point) {
        return status_bar_layout(model.status_bar_rect()).hit(point).cloned();
    }
    None
}

/// Message for a click on `widget`
pub fn widget_msg(model: &AppModel, widget: &Widget) -> Option<Msg> {
    match widget {
        Widget::Tool(tool) => Some(Msg::Grid(GridMsg::SelectTool(*tool))),
        Widget::Field(field) if field.is_text() => Some(Msg::Form(FormMsg::Focus(*field))),
        Widget::Field(field) => Some(Msg::Form(FormMsg::Toggle(*field))),
        Widget::Action(action) => Some(action.msg()),
        Widget::TreeRow(index) => match tree_rows(model).into_iter().nth(*index)? {
            TreeRow::Parent { code, .. } => Some(Msg::Section(SectionMsg::ToggleNode(code))),
            TreeRow::Leaf { code, .. } => Some(Msg::Section(SectionMsg::Switch(code))),
        },
        Widget::ModalConfirm => Some(Msg::Modal(ModalMsg::Confirm)),
        Widget::ModalCancel | Widget::ModalBackdrop => Some(Msg::Modal(ModalMsg::Cancel)),
    }
}

/// Messages for a primary click outside the canvas.
///
/// Clicking anything other than the focused input takes focus away from it
/// first, so a pending size change is applied before the click acts.
pub fn click_msgs(model: &AppModel, point: Point) -> Vec<Msg> {
    let widget = hit_widget(model, point);
    let mut msgs = Vec::new();

    let focused = model.ui.form.focused;
    let keeps_focus = matches!(
        (&widget, focused),
        (Some(Widget::Field(field)), Some(current)) if *field == current || field.is_text()
    );
    if focused.is_some() && !keeps_focus && model.ui.modal.is_none() {
        msgs.push(Msg::Form(FormMsg::Blur));
    }

    if let Some(msg) = widget.as_ref().and_then(|w| widget_msg(model, w)) {
        msgs.push(msg);
    }
    msgs
}
