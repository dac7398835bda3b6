//! Export and storage round trips against real files

mod common;

use std::io::{Cursor, Read};

use common::{stadium_model, test_model};

use grido::commands::{Cmd, ExportPayload};
use grido::export::{self, ExportError};
use grido::messages::{AppMsg, Msg, SectionMsg};
use grido::model::grid::CellKind;
use grido::persistence::{self, ProjectSnapshot, ProjectStore};
use grido::update::update;

fn switch(code: &str) -> Msg {
    Msg::Section(SectionMsg::Switch(code.to_string()))
}

fn archive_entries(cmd: Option<Cmd>) -> (String, Vec<export::ArchiveEntry>) {
    match cmd {
        Some(Cmd::SaveExport {
            suggested_name,
            payload: ExportPayload::Archive(entries),
        }) => (suggested_name, entries),
        other => panic!("expected archive export, got {:?}", other),
    }
}

// ========================================================================
// Storage
// ========================================================================

#[test]
fn test_store_round_trip_restores_project() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::new(dir.path().join("project.json"));

    let mut model = stadium_model();
    model.grid.set_kind(1, CellKind::Empty);
    update(&mut model, switch("C"));
    model.row_overrides.set(2, "VIP");

    store.save(&ProjectSnapshot::capture(&model)).unwrap();

    let snapshot = store.load().unwrap().expect("stored project");
    assert_eq!(snapshot.current_section_code, "C");
    assert_eq!(snapshot.all_sections, vec!["A", "B", "C"]);

    let mut restored = test_model();
    persistence::restore(&mut restored, snapshot);

    assert_eq!(restored.section_code, "C");
    assert_eq!(restored.project.leaves(), model.project.leaves());
    assert_eq!(restored.naming().row_label(2), "VIP");

    update(&mut restored, switch("A"));
    assert_eq!(restored.grid.cells()[1].kind, CellKind::Empty);
}

#[test]
fn test_missing_store_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::new(dir.path().join("absent.json"));

    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_corrupt_store_is_treated_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    std::fs::write(&path, "{ definitely not json").unwrap();
    let store = ProjectStore::new(&path);

    assert!(store.load().is_err());
    assert!(store.load_or_empty().is_none());
}

#[test]
fn test_clear_removes_stored_project() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::new(dir.path().join("project.json"));
    store.save(&ProjectSnapshot::capture(&stadium_model())).unwrap();

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::new(dir.path().join("project.json"));
    store.save(&ProjectSnapshot::capture(&test_model())).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["project.json"]);
}

// ========================================================================
// Archive export
// ========================================================================

#[test]
fn test_archive_groups_visited_sections_by_parent() {
    let mut model = stadium_model();
    update(&mut model, switch("C"));

    let (name, entries) = archive_entries(update(&mut model, Msg::App(AppMsg::ExportArchive)));

    assert_eq!(name, "Estadio_Test_layout.zip");
    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["P1/A.csv", "OTHERS/C.csv"]);
    assert!(entries[0].contents.starts_with("Section,Row,Seat\nA,1,1-1\n"));
}

#[test]
fn test_archive_skips_sections_without_seats() {
    let mut model = stadium_model();
    model.grid.set_all(CellKind::Empty);
    update(&mut model, switch("B"));

    let (_, entries) = archive_entries(update(&mut model, Msg::App(AppMsg::ExportArchive)));

    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["P1/B.csv"]);
}

#[test]
fn test_nothing_configured_is_an_error() {
    let mut model = stadium_model();
    model.grid.set_all(CellKind::Empty);
    model.commit_live_section();

    assert!(matches!(
        export::collect_archive_entries(&model.project),
        Err(ExportError::NoConfiguredSections)
    ));
}

#[test]
fn test_write_archive_produces_readable_zip() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = stadium_model();
    update(&mut model, switch("B"));
    let project = ProjectSnapshot::capture(&model).into_project();

    let path = export::write_archive(&project, &dir.path().join("out")).unwrap();
    assert_eq!(path.file_name().unwrap(), "Estadio_Test_layout.zip");

    let bytes = std::fs::read(&path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["P1/A.csv", "P1/B.csv"]);

    let mut csv = String::new();
    archive
        .by_name("P1/B.csv")
        .unwrap()
        .read_to_string(&mut csv)
        .unwrap();
    assert_eq!(csv.lines().count(), 1 + 10 * 15);
    assert!(csv.ends_with('\n'));
}
