//! Font discovery

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};

/// System font files tried when no font is configured
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load the UI font: the configured file first, then known system fonts.
///
/// Returns `None` when nothing usable is found; the renderer then draws
/// without text.
pub fn load_font(configured: Option<&Path>) -> Option<Font> {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        match load_font_file(&path) {
            Ok(font) => {
                tracing::info!("Using font {}", path.display());
                return Some(font);
            }
            Err(e) => tracing::debug!("Skipping font {}: {}", path.display(), e),
        }
    }

    tracing::warn!("No usable font found; text will not be drawn");
    None
}

fn load_font_file(path: &Path) -> Result<Font, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    Font::from_bytes(bytes, FontSettings::default()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_file_is_an_error() {
        assert!(load_font_file(Path::new("/nonexistent/font.ttf")).is_err());
    }

    #[test]
    fn test_garbage_font_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(load_font_file(&path).is_err());
    }
}
