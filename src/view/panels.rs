//! Panel painters: config sidebar, section navigator, status bar, modal

use crate::model::layout::TreeRow;
use crate::model::ui::{ConfigField, NoticeLevel};
use crate::model::{AppModel, Rect};
use crate::theme::Theme;

use super::frame::{Frame, TextPainter};
use super::layout::{
    confirm_label, modal_input_rect, modal_layout, modal_rect, sections_layout, sidebar_layout,
    status_bar_layout, Action, Widget, FIELD_LABEL_HEIGHT, MARGIN, TREE_INDENT,
};

/// Body text size (logical px)
pub const UI_FONT_SIZE: f64 = 13.0;
pub const SMALL_FONT_SIZE: f64 = 11.0;
pub const TITLE_FONT_SIZE: f64 = 18.0;

/// Physical-pixel painting helpers bound to one frame
pub struct PanelPainter<'f, 'b, 't, 'g> {
    pub frame: &'f mut Frame<'b>,
    pub text: &'t mut TextPainter<'g>,
    pub scale_factor: f64,
}

impl PanelPainter<'_, '_, '_, '_> {
    fn px(&self, rect: Rect) -> Rect {
        rect.scaled(self.scale_factor)
    }

    fn size(&self, logical: f64) -> f32 {
        (logical * self.scale_factor) as f32
    }

    fn fill(&mut self, rect: Rect, color: u32) {
        let rect = self.px(rect);
        self.frame.fill_rect(rect, color);
    }

    fn bordered(&mut self, rect: Rect, fill: u32, border: u32) {
        let rect = self.px(rect);
        self.frame.draw_bordered_rect(rect, fill, border);
    }

    /// Left-aligned text, vertically centered in `rect`, elided to fit
    fn label(&mut self, rect: Rect, text: &str, size: f64, color: u32) {
        let r = self.px(rect);
        let size = self.size(size);
        let fitted = self.text.elide(text, size, r.width as f32);
        let y = r.y + (r.height - size as f64) / 2.0;
        self.text.draw(self.frame, r.x, y, &fitted, size, color);
    }

    fn centered(&mut self, rect: Rect, text: &str, size: f64, color: u32) {
        let r = self.px(rect);
        let size = self.size(size);
        self.text.draw_centered(self.frame, r, text, size, color);
    }

    fn button(&mut self, rect: Rect, text: &str, active: bool, theme: &Theme) {
        let (fill, fg) = if active {
            (theme.panel.accent, theme.panel.button_text)
        } else {
            (theme.panel.button, theme.panel.button_text)
        };
        self.bordered(
            rect,
            fill.to_argb_u32(),
            theme.panel.border.to_argb_u32(),
        );
        self.centered(rect, text, UI_FONT_SIZE, fg.to_argb_u32());
    }
}

// ============================================================================
// Sidebar
// ============================================================================

pub fn paint_sidebar(p: &mut PanelPainter, model: &AppModel) {
    let theme = &model.theme;
    let area = model.sidebar_rect();
    p.fill(area, theme.panel.background.to_argb_u32());
    p.fill(
        Rect::new(area.right() - 1.0, area.y, 1.0, area.height),
        theme.panel.border.to_argb_u32(),
    );

    p.label(
        Rect::new(area.x + MARGIN, area.y + 10.0, area.width - MARGIN * 2.0, 24.0),
        "G.R.I.D.O.",
        TITLE_FONT_SIZE,
        theme.panel.foreground.to_argb_u32(),
    );

    let layout = sidebar_layout(area);
    for heading in &layout.headings {
        p.label(
            heading.rect,
            heading.text,
            SMALL_FONT_SIZE,
            theme.panel.muted.to_argb_u32(),
        );
    }

    for (widget, rect) in &layout.widgets {
        match widget {
            Widget::Tool(tool) => {
                p.button(*rect, tool.display_name(), model.interaction.tool == *tool, theme)
            }
            Widget::Field(field) if field.is_text() => paint_input(p, model, *field, *rect),
            Widget::Field(field) => paint_toggle(p, model, *field, *rect),
            Widget::Action(action) => {
                let disabled = matches!(action, Action::ExportArchive | Action::CloseProject)
                    && !model.project.is_loaded();
                paint_action(p, *rect, *action, disabled, theme);
            }
            _ => {}
        }
    }
}

fn paint_action(p: &mut PanelPainter, rect: Rect, action: Action, disabled: bool, theme: &Theme) {
    if disabled {
        p.bordered(
            rect,
            theme.panel.background.to_argb_u32(),
            theme.panel.border.to_argb_u32(),
        );
        p.centered(rect, action.label(), UI_FONT_SIZE, theme.panel.muted.to_argb_u32());
    } else {
        p.button(rect, action.label(), false, theme);
    }
}

fn paint_input(p: &mut PanelPainter, model: &AppModel, field: ConfigField, rect: Rect) {
    let theme = &model.theme;
    let form = &model.ui.form;
    let focused = form.focused == Some(field);
    let locked = field == ConfigField::SectionCode && model.project.is_loaded();

    p.label(
        Rect::new(rect.x, rect.y - FIELD_LABEL_HEIGHT, rect.width, FIELD_LABEL_HEIGHT),
        field.label(),
        SMALL_FONT_SIZE,
        theme.panel.muted.to_argb_u32(),
    );

    let border = if focused {
        theme.panel.input_focus
    } else {
        theme.panel.border
    };
    p.bordered(
        rect,
        theme.panel.input_background.to_argb_u32(),
        border.to_argb_u32(),
    );

    let value = form.text(field).unwrap_or_default();
    let fg = if locked {
        theme.panel.muted
    } else {
        theme.panel.foreground
    };
    let inner = rect.inset(6.0);
    p.label(inner, value, UI_FONT_SIZE, fg.to_argb_u32());

    if focused {
        let size = p.size(UI_FONT_SIZE);
        let width = p.text.measure_width(value, size) as f64 / p.scale_factor;
        let caret_x = (inner.x + width + 1.0).min(inner.right());
        p.fill(
            Rect::new(caret_x, inner.y + 2.0, 1.0, inner.height - 4.0),
            theme.panel.input_focus.to_argb_u32(),
        );
    }
}

fn paint_toggle(p: &mut PanelPainter, model: &AppModel, field: ConfigField, rect: Rect) {
    let theme = &model.theme;
    let on = model.ui.form.is_on(field);

    if field == ConfigField::NamingType {
        // Segmented numeric | alpha switch
        let half = Rect::new(rect.x, rect.y, rect.width / 2.0, rect.height);
        let other = Rect::new(rect.x + rect.width / 2.0, rect.y, rect.width / 2.0, rect.height);
        p.button(half, "1, 2, 3", !on, theme);
        p.button(other, "A, B, C", on, theme);
        return;
    }

    let box_size = rect.height - 6.0;
    let check = Rect::new(rect.x, rect.y + 3.0, box_size, box_size);
    let fill = if on {
        theme.panel.accent
    } else {
        theme.panel.input_background
    };
    p.bordered(check, fill.to_argb_u32(), theme.panel.border.to_argb_u32());
    p.label(
        Rect::new(rect.x + box_size + 8.0, rect.y, rect.width - box_size - 8.0, rect.height),
        field.label(),
        UI_FONT_SIZE,
        theme.panel.foreground.to_argb_u32(),
    );
}

// ============================================================================
// Section navigator
// ============================================================================

pub fn paint_sections(p: &mut PanelPainter, model: &AppModel, rows: &[TreeRow]) {
    let Some(area) = model.sections_rect() else {
        return;
    };
    let theme = &model.theme;
    p.fill(area, theme.panel.background.to_argb_u32());
    p.fill(
        Rect::new(area.right() - 1.0, area.y, 1.0, area.height),
        theme.panel.border.to_argb_u32(),
    );

    let title = model.project.stadium_name().unwrap_or("Stadium");
    p.label(
        Rect::new(area.x + MARGIN, area.y + 8.0, area.width - MARGIN * 2.0, 22.0),
        title,
        UI_FONT_SIZE,
        theme.panel.foreground.to_argb_u32(),
    );

    let stats = model.project.stats();
    let summary = format!(
        "{}/{} configured, {} groups",
        model.project.configured_count(),
        stats.leaves,
        stats.parents
    );
    p.label(
        Rect::new(area.x + MARGIN, area.y + 40.0, area.width - MARGIN * 2.0 - 64.0, 24.0),
        &summary,
        SMALL_FONT_SIZE,
        theme.panel.muted.to_argb_u32(),
    );

    let layout = sections_layout(area, rows, model.ui.tree_scroll);
    for (widget, rect) in &layout.widgets {
        match widget {
            Widget::Action(action) => p.button(*rect, action.label(), false, theme),
            Widget::TreeRow(index) => {
                if let Some(row) = rows.get(*index) {
                    paint_tree_row(p, theme, row, *rect);
                }
            }
            _ => {}
        }
    }
}

fn paint_tree_row(p: &mut PanelPainter, theme: &Theme, row: &TreeRow, rect: Rect) {
    let indent = MARGIN + row.depth() as f64 * TREE_INDENT;
    let dot = Rect::new(rect.x + indent, rect.y + rect.height / 2.0 - 3.0, 6.0, 6.0);
    let text_rect = Rect::new(
        rect.x + indent + 24.0,
        rect.y,
        (rect.width - indent - 24.0 - MARGIN).max(0.0),
        rect.height,
    );

    match row {
        TreeRow::Parent {
            name,
            leaf_count,
            all_configured,
            expanded,
            ..
        } => {
            let marker = if *expanded { "v" } else { ">" };
            p.label(
                Rect::new(rect.x + indent, rect.y, 12.0, rect.height),
                marker,
                SMALL_FONT_SIZE,
                theme.panel.muted.to_argb_u32(),
            );
            let status = if *all_configured {
                theme.tree.configured
            } else {
                theme.tree.unconfigured
            };
            p.fill(
                Rect::new(dot.x + 12.0, dot.y, dot.width, dot.height),
                status.to_argb_u32(),
            );
            p.label(
                text_rect,
                &format!("{} ({})", name, leaf_count),
                UI_FONT_SIZE,
                theme.panel.foreground.to_argb_u32(),
            );
        }
        TreeRow::Leaf {
            name,
            configured,
            active,
            ..
        } => {
            if *active {
                p.fill(rect, theme.tree.active_background.to_argb_u32());
            }
            let status = if *configured {
                theme.tree.configured
            } else {
                theme.tree.unconfigured
            };
            p.fill(
                Rect::new(dot.x + 12.0, dot.y, dot.width, dot.height),
                status.to_argb_u32(),
            );
            p.label(
                text_rect,
                name,
                UI_FONT_SIZE,
                theme.panel.foreground.to_argb_u32(),
            );
        }
    }
}

// ============================================================================
// Status bar
// ============================================================================

/// Left status bar text: section, size, seats, tool and zoom
pub fn status_text(model: &AppModel) -> String {
    let stats = model.stats();
    format!(
        "{}  |  {}  |  {} seats  |  Tool: {}  |  {}%",
        model.section_code,
        stats.size_label,
        stats.seats,
        model.interaction.tool.display_name(),
        model.viewport.zoom_percent()
    )
}

pub fn paint_status_bar(p: &mut PanelPainter, model: &AppModel) {
    let theme = &model.theme;
    let bar = model.status_bar_rect();
    p.fill(bar, theme.status_bar.background.to_argb_u32());
    p.fill(
        Rect::new(bar.x, bar.y, bar.width, 1.0),
        theme.panel.border.to_argb_u32(),
    );

    let layout = status_bar_layout(bar);
    let buttons_left = layout
        .widgets
        .iter()
        .map(|(_, r)| r.x)
        .fold(bar.right(), f64::min);

    let text_area = Rect::new(bar.x + 10.0, bar.y, buttons_left - bar.x - 20.0, bar.height);
    match &model.ui.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => theme.overlay.highlight,
                NoticeLevel::Error => theme.overlay.error,
            };
            p.label(text_area, &notice.text, SMALL_FONT_SIZE, color.to_argb_u32());
        }
        None => p.label(
            text_area,
            &status_text(model),
            SMALL_FONT_SIZE,
            theme.status_bar.foreground.to_argb_u32(),
        ),
    }

    for (widget, rect) in &layout.widgets {
        if let Widget::Action(action) = widget {
            p.button(*rect, action.label(), false, theme);
        }
    }
}

// ============================================================================
// Modal
// ============================================================================

pub fn paint_modal(p: &mut PanelPainter, model: &AppModel) {
    let Some(modal) = &model.ui.modal else {
        return;
    };
    let theme = &model.theme;
    p.frame.dim(theme.overlay.dim.to_argb_u32());

    let rect = modal_rect(model.logical_size());
    p.bordered(
        rect,
        theme.overlay.background.to_argb_u32(),
        theme.panel.border.to_argb_u32(),
    );
    p.label(
        Rect::new(rect.x + MARGIN, rect.y + 12.0, rect.width - MARGIN * 2.0, 24.0),
        &modal.title(),
        UI_FONT_SIZE,
        theme.overlay.foreground.to_argb_u32(),
    );

    match modal.input() {
        Some(input) => {
            let input_rect = modal_input_rect(rect);
            p.bordered(
                input_rect,
                theme.overlay.input_background.to_argb_u32(),
                theme.panel.input_focus.to_argb_u32(),
            );
            p.label(
                input_rect.inset(6.0),
                &format!("{}|", input),
                UI_FONT_SIZE,
                theme.overlay.foreground.to_argb_u32(),
            );
        }
        None => p.label(
            modal_input_rect(rect),
            "Layout and all section grids will be removed.",
            SMALL_FONT_SIZE,
            theme.panel.muted.to_argb_u32(),
        ),
    }

    for (widget, button) in &modal_layout(rect).widgets {
        match widget {
            Widget::ModalConfirm => p.button(*button, confirm_label(modal), true, theme),
            Widget::ModalCancel => p.button(*button, "Cancel", false, theme),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    #[test]
    fn test_status_text_summarizes_live_section() {
        let m = AppModel::new(GridConfig::default(), Theme::default(), (1280, 800), 1.0);
        let text = status_text(&m);
        assert!(text.starts_with("PISO_2/SECCION_503A"));
        assert!(text.contains("10x15 Grid"));
        assert!(text.contains("150 seats"));
        assert!(text.contains("Tool: Seat"));
    }
}
