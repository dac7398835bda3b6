//! CSV and ZIP export
//!
//! A section exports as one CSV row per seat:
//!
//! ```text
//! Section,Row,Seat
//! PISO_1/101,A,A-1
//! ```
//!
//! A project exports as a ZIP archive with one CSV per configured leaf
//! section, grouped into folders by parent section.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::model::grid::Grid;
use crate::model::layout::ORPHAN_PARENT;
use crate::model::naming::Naming;
use crate::model::project::Project;

/// Archive name stem used when the stadium has no name
pub const DEFAULT_ARCHIVE_STEM: &str = "stadium";

const CSV_HEADER: [&str; 3] = ["Section", "Row", "Seat"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No stadium data loaded.")]
    NoStadium,
    #[error("No configured sections to export.")]
    NoConfiguredSections,
    #[error("CSV generation failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Archive generation failed: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Archive generation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One file of the project archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// `<parent>/<leaf>.csv`
    pub path: String,
    pub contents: String,
}

/// Make a section code usable as a single path segment
pub fn sanitize_segment(code: &str) -> String {
    code.chars()
        .map(|c| match c {
            '/' | '\\' | ' ' => '_',
            c => c,
        })
        .collect()
}

/// File name for a single-section export
pub fn csv_file_name(section_code: &str) -> String {
    format!("{}.csv", sanitize_segment(section_code))
}

/// File name for a project archive: stadium name with whitespace runs
/// replaced by `_`, plus `_layout.zip`
pub fn archive_name(stadium_name: Option<&str>) -> String {
    let name = stadium_name
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_ARCHIVE_STEM);

    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }
    format!("{}_layout.zip", stem)
}

/// Serialize the seat cells of `grid` as CSV rows labelled with
/// `section_code`. Empty cells are skipped.
pub fn section_csv(section_code: &str, grid: &Grid, naming: &Naming) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for cell in grid.seats() {
        let row_label = naming.row_label(cell.row);
        writer.write_record([section_code, row_label.as_str(), cell.label.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// CSV files for every configured leaf section of the project, in layout
/// order. The live section must already be committed to the cache.
pub fn collect_archive_entries(project: &Project) -> Result<Vec<ArchiveEntry>, ExportError> {
    if !project.is_loaded() {
        return Err(ExportError::NoStadium);
    }

    let mut entries = Vec::new();
    for code in project.leaves() {
        let Some(entry) = project.cache.get(code) else {
            continue;
        };
        if !entry.is_configured() {
            continue;
        }

        let naming = Naming::new(
            &entry.config,
            &entry.row_overrides,
            entry.grid.rows(),
            entry.grid.cols(),
        );
        let contents = section_csv(code, &entry.grid, &naming)?;
        let parent = project.index().parent_of(code).unwrap_or(ORPHAN_PARENT);

        entries.push(ArchiveEntry {
            path: format!(
                "{}/{}",
                sanitize_segment(parent),
                csv_file_name(code)
            ),
            contents,
        });
    }

    if entries.is_empty() {
        return Err(ExportError::NoConfiguredSections);
    }

    tracing::debug!("Collected {} sections for archive export", entries.len());
    Ok(entries)
}

/// Zip `entries` in memory
pub fn build_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        writer.start_file(entry.path.as_str(), options)?;
        writer.write_all(entry.contents.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Build the project archive and write it into `out_dir`.
///
/// Returns the path of the written archive.
pub fn write_archive(project: &Project, out_dir: &Path) -> Result<PathBuf, ExportError> {
    let entries = collect_archive_entries(project)?;
    let bytes = build_archive(&entries)?;

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(archive_name(project.stadium_name()));
    std::fs::write(&path, bytes)?;

    tracing::info!("Wrote {} sections to {}", entries.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grid::CellKind;
    use crate::model::naming::{RowOverrides, SectionConfig};

    #[test]
    fn test_csv_has_header_plus_one_line_per_seat() {
        let config = SectionConfig::default();
        let overrides = RowOverrides::new();
        let naming = Naming::new(&config, &overrides, 1, 5);
        let mut grid = Grid::new(1, 5, &naming);
        grid.set_kind(1, CellKind::Empty);
        grid.set_kind(3, CellKind::Empty);

        let csv = section_csv("S1", &grid, &naming).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Section,Row,Seat");
        assert_eq!(lines[1], "S1,1,1-1");
        assert_eq!(lines[2], "S1,1,1-3");
        assert_eq!(lines[3], "S1,1,1-5");
    }

    #[test]
    fn test_row_column_uses_override() {
        let config = SectionConfig::default();
        let mut overrides = RowOverrides::new();
        overrides.set(1, "VIP");
        let naming = Naming::new(&config, &overrides, 1, 1);
        let grid = Grid::new(1, 1, &naming);
        let csv = section_csv("S", &grid, &naming).unwrap();
        assert_eq!(csv.lines().nth(1), Some("S,VIP,VIP-1"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(csv_file_name("PISO 2/SEC\\1"), "PISO_2_SEC_1.csv");
        assert_eq!(archive_name(Some("Estadio  Azteca Norte")), "Estadio_Azteca_Norte_layout.zip");
        assert_eq!(archive_name(None), "stadium_layout.zip");
        assert_eq!(archive_name(Some("")), "stadium_layout.zip");
    }
}
