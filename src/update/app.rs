//! App-level message handlers (window, export, worker results)

use crate::commands::{Cmd, ExportPayload};
use crate::export::{archive_name, collect_archive_entries, csv_file_name, section_csv};
use crate::messages::AppMsg;
use crate::model::ui::Notice;
use crate::model::AppModel;

pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(width, height) => {
            if (width, height) == model.window_size {
                return None;
            }
            tracing::debug!("Window resized to {}x{}", width, height);
            model.window_size = (width, height);
            Some(Cmd::Redraw)
        }
        AppMsg::ScaleFactorChanged(factor) => {
            if factor <= 0.0 || factor == model.scale_factor {
                return None;
            }
            tracing::debug!("Scale factor changed to {}", factor);
            model.scale_factor = factor;
            Some(Cmd::Redraw)
        }
        AppMsg::ExportCsv => export_csv(model),
        AppMsg::ExportArchive => export_archive(model),
        AppMsg::ExportCompleted(result) => match result {
            Ok(Some(path)) => {
                model
                    .ui
                    .notify(Notice::info(format!("Exported to {}", path.display())));
                Some(Cmd::Redraw)
            }
            // Dialog cancelled
            Ok(None) => None,
            Err(e) => {
                model.ui.notify(Notice::error(format!("Export failed: {}", e)));
                Some(Cmd::Redraw)
            }
        },
        AppMsg::PersistCompleted(result) => {
            if let Err(e) = result {
                tracing::warn!("Failed to save project: {}", e);
            }
            None
        }
        AppMsg::Tick => model.ui.expire_notice().then_some(Cmd::Redraw),
        AppMsg::Quit => Some(Cmd::Quit),
    }
}

/// Export the live section as CSV
fn export_csv(model: &mut AppModel) -> Option<Cmd> {
    let naming = model.naming();
    match section_csv(&model.section_code, &model.grid, &naming) {
        Ok(csv) => Some(Cmd::SaveExport {
            suggested_name: csv_file_name(&model.section_code),
            payload: ExportPayload::Csv(csv),
        }),
        Err(e) => {
            model.ui.notify(Notice::error(e.to_string()));
            Some(Cmd::Redraw)
        }
    }
}

/// Export every configured section of the project as a ZIP archive
fn export_archive(model: &mut AppModel) -> Option<Cmd> {
    model.commit_live_section();

    match collect_archive_entries(&model.project) {
        Ok(entries) => Some(Cmd::SaveExport {
            suggested_name: archive_name(model.project.stadium_name()),
            payload: ExportPayload::Archive(entries),
        }),
        Err(e) => {
            model.ui.notify(Notice::error(e.to_string()));
            Some(Cmd::Redraw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::model::grid::CellKind;
    use crate::theme::Theme;

    fn model() -> AppModel {
        AppModel::new(GridConfig::default(), Theme::default(), (1280, 800), 1.0)
    }

    #[test]
    fn test_export_csv_names_file_after_section() {
        let mut m = model();
        m.grid.set_all(CellKind::Empty);
        m.grid.set_kind(0, CellKind::Seat);

        match update_app(&mut m, AppMsg::ExportCsv) {
            Some(Cmd::SaveExport {
                suggested_name,
                payload: ExportPayload::Csv(csv),
            }) => {
                assert_eq!(suggested_name, "PISO_2_SECCION_503A.csv");
                assert_eq!(csv.lines().count(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_archive_without_project_notifies() {
        let mut m = model();
        let cmd = update_app(&mut m, AppMsg::ExportArchive);
        assert!(matches!(cmd, Some(Cmd::Redraw)));
        let notice = m.ui.notice.as_ref().map(|n| n.text.as_str());
        assert_eq!(notice, Some("No stadium data loaded."));
    }

    #[test]
    fn test_cancelled_export_is_silent() {
        let mut m = model();
        assert!(update_app(&mut m, AppMsg::ExportCompleted(Ok(None))).is_none());
        assert!(m.ui.notice.is_none());
    }

    #[test]
    fn test_resize_keeps_viewport() {
        let mut m = model();
        let before = m.viewport.translate;
        update_app(&mut m, AppMsg::Resize(1600, 900));
        assert_eq!(m.window_size, (1600, 900));
        assert_eq!(m.viewport.translate, before);
    }
}
