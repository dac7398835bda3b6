//! Whole-grid edits and config form application

use crate::commands::Cmd;
use crate::config::FALLBACK_SECTION_CODE;
use crate::messages::GridMsg;
use crate::model::grid::CellKind;
use crate::model::naming::Naming;
use crate::model::ui::ConfigField;
use crate::model::AppModel;

use super::commit_and_persist;

pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::SelectTool(tool) => {
            if model.interaction.tool == tool {
                return None;
            }
            tracing::debug!("Tool: {}", tool.display_name());
            model.interaction.tool = tool;
            Some(Cmd::Redraw)
        }
        GridMsg::FillAll => set_all(model, CellKind::Seat),
        GridMsg::ClearAll => set_all(model, CellKind::Empty),
        GridMsg::ApplyNaming => {
            let naming = Naming::new(
                &model.section_config,
                &model.row_overrides,
                model.grid.rows(),
                model.grid.cols(),
            );
            model.grid.relabel(&naming);
            Some(Cmd::batch(vec![commit_and_persist(model), Cmd::Redraw]))
        }
    }
}

fn set_all(model: &mut AppModel, kind: CellKind) -> Option<Cmd> {
    model.grid.set_all(kind);
    Some(Cmd::batch(vec![commit_and_persist(model), Cmd::Redraw]))
}

/// Apply one config form field to the live section.
///
/// Size fields resize the grid, keeping surviving cells; the section code
/// renames the live section (outside a project); naming fields rebuild every
/// label.
pub fn apply_form_field(model: &mut AppModel, field: ConfigField) -> Option<Cmd> {
    match field {
        ConfigField::Rows | ConfigField::Cols => {
            let rows = model.ui.form.parsed_rows(model.config.default_rows);
            let cols = model.ui.form.parsed_cols(model.config.default_cols);
            model.ui.form.rows = rows.to_string();
            model.ui.form.cols = cols.to_string();
            if (rows, cols) == (model.grid.rows(), model.grid.cols()) {
                return None;
            }

            let naming = Naming::new(&model.section_config, &model.row_overrides, rows, cols);
            model.grid.resize(rows, cols, &naming);
            model.interaction.hovered = None;
            model.recenter();
        }
        ConfigField::SectionCode => {
            if model.project.is_loaded() {
                // Sections of a project are named by the layout
                model.ui.form.section_code = model.section_code.clone();
                return None;
            }
            let code = model.ui.form.parsed_code(FALLBACK_SECTION_CODE);
            if code == model.section_code {
                return None;
            }
            model.project.cache.remove(&model.section_code);
            tracing::debug!("Section renamed {} -> {}", model.section_code, code);
            model.section_code = code;
        }
        ConfigField::RowStart
        | ConfigField::ColStart
        | ConfigField::NamePattern
        | ConfigField::NamingType
        | ConfigField::InvertRows
        | ConfigField::InvertCols
        | ConfigField::ZeroPadding => {
            let config = model.ui.form.section_config();
            if config == model.section_config {
                return None;
            }
            model.section_config = config;
            let naming = Naming::new(
                &model.section_config,
                &model.row_overrides,
                model.grid.rows(),
                model.grid.cols(),
            );
            model.grid.relabel(&naming);
        }
    }

    Some(Cmd::batch(vec![commit_and_persist(model), Cmd::Redraw]))
}
