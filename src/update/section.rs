//! Project and section navigation handlers

use crate::commands::Cmd;
use crate::messages::SectionMsg;
use crate::model::layout::{node_key, section_tree, StadiumLayout};
use crate::model::project::DEFAULT_SECTION_CODE;
use crate::model::ui::{Modal, Notice};
use crate::model::AppModel;

use super::persist;

pub fn update_section(model: &mut AppModel, msg: SectionMsg) -> Option<Cmd> {
    match msg {
        SectionMsg::Switch(code) => switch_section(model, &code),
        SectionMsg::Next => step_section(model, 1),
        SectionMsg::Previous => step_section(model, -1),
        SectionMsg::ToggleNode(code) => {
            let key = node_key(&code);
            if !model.ui.expanded_nodes.remove(&key) {
                model.ui.expanded_nodes.insert(key);
            }
            Some(Cmd::Redraw)
        }
        SectionMsg::ScrollTree(rows) => {
            let visible = visible_tree_rows(model);
            let max = visible.saturating_sub(1);
            let current = model.ui.tree_scroll as i64;
            let next = (current + rows as i64).clamp(0, max as i64) as usize;
            if next == model.ui.tree_scroll {
                return None;
            }
            model.ui.tree_scroll = next;
            Some(Cmd::Redraw)
        }
        SectionMsg::RequestImport => Some(Cmd::ShowImportDialog),
        SectionMsg::LayoutFileLoaded { path, result } => match result {
            Ok(json) => {
                tracing::info!("Read layout from {}", path.display());
                import_layout(model, &json)
            }
            Err(e) => {
                model
                    .ui
                    .notify(Notice::error(format!("Could not read {}: {}", path.display(), e)));
                Some(Cmd::Redraw)
            }
        },
        SectionMsg::ImportLayout(json) => import_layout(model, &json),
        SectionMsg::RequestClose => {
            if !model.project.is_loaded() {
                return None;
            }
            model.ui.modal = Some(Modal::ConfirmCloseProject);
            Some(Cmd::Redraw)
        }
        SectionMsg::Close => close_project(model),
    }
}

/// Make `code` the live section.
///
/// The outgoing section is saved to the cache first. Switching to the
/// section that is already live and cached does nothing.
pub fn switch_section(model: &mut AppModel, code: &str) -> Option<Cmd> {
    if code.is_empty() {
        return None;
    }
    if code == model.section_code && model.project.cache.contains(code) {
        return None;
    }

    model.interaction.pointer = Default::default();
    model.commit_live_section();
    model.load_section(code);
    tracing::debug!("Switched to section {}", code);

    Some(Cmd::batch(vec![persist(model), Cmd::Redraw]))
}

fn step_section(model: &mut AppModel, offset: isize) -> Option<Cmd> {
    let next = model
        .project
        .index()
        .neighbor(&model.section_code, offset)?
        .to_string();
    switch_section(model, &next)
}

/// Parse a layout and make it the open project.
///
/// On any error the user is notified and nothing changes.
pub fn import_layout(model: &mut AppModel, json: &str) -> Option<Cmd> {
    let layout = match StadiumLayout::from_json(json) {
        Ok(layout) => layout,
        Err(e) => {
            model.ui.notify(Notice::error(e.to_string()));
            return Some(Cmd::Redraw);
        }
    };

    // Keep whatever was being edited before the import
    model.commit_live_section();

    let name = layout.display_name().to_string();
    model.project.load_layout(layout);
    model.ui.tree_scroll = 0;

    let stats = model.project.stats();
    tracing::info!(
        "Imported layout {}: {} parents, {} leaves",
        name,
        stats.parents,
        stats.leaves
    );

    let first = model.project.leaves().first().cloned()?;
    model.interaction.pointer = Default::default();
    model.load_section(&first);
    model.ui.notify(Notice::info(format!(
        "Loaded {} ({} sections)",
        name, stats.leaves
    )));

    Some(Cmd::batch(vec![persist(model), Cmd::Redraw]))
}

/// Drop the project and start over on the default section
fn close_project(model: &mut AppModel) -> Option<Cmd> {
    model.ui.modal = None;
    if !model.project.is_loaded() {
        return None;
    }

    model.project.close();
    model.ui.expanded_nodes.clear();
    model.ui.tree_scroll = 0;
    model.load_section(DEFAULT_SECTION_CODE);
    model.ui.notify(Notice::info("Project closed"));

    Some(Cmd::batch(vec![Cmd::ClearStorage, Cmd::Redraw]))
}

/// Number of rows the navigator currently shows
pub(crate) fn visible_tree_rows(model: &AppModel) -> usize {
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
            .len()
        })
        .unwrap_or(0)
}
