//! Where grido keeps its files
//!
//! Everything lives under one directory: `$XDG_CONFIG_HOME/grido` or
//! `~/.config/grido` on Unix, `%APPDATA%\grido` on Windows.
//!
//! ```text
//! grido/
//!   config.yaml
//!   theme.yaml
//!   storage/stadium_grid_manager_data.json
//!   logs/grido.log.YYYY-MM-DD
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Prefix of the daily rotated log files
pub const LOG_PREFIX: &str = "grido.log";

/// Files grido reads or writes under its directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFile {
    Config,
    Theme,
    Project,
}

impl AppFile {
    fn relative(self) -> &'static str {
        match self {
            AppFile::Config => "config.yaml",
            AppFile::Theme => "theme.yaml",
            AppFile::Project => "storage/stadium_grid_manager_data.json",
        }
    }

    /// Absolute path, or `None` when the platform has no config directory
    pub fn path(self) -> Option<PathBuf> {
        root().map(|root| self.path_in(&root))
    }

    pub fn path_in(self, root: &Path) -> PathBuf {
        root.join(self.relative())
    }
}

pub fn root() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        dirs::config_dir()
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|base| base.join("grido"))
}

/// Create the log directory if needed and return it
pub fn logs_dir() -> io::Result<PathBuf> {
    let dir = root()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?
        .join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Newest log file in `dir`; date suffixes sort lexically
pub fn latest_log(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(LOG_PREFIX))
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_share_one_root() {
        let root = Path::new("/cfg/grido");
        assert_eq!(AppFile::Config.path_in(root), root.join("config.yaml"));
        assert_eq!(
            AppFile::Project.path_in(root),
            root.join("storage").join("stadium_grid_manager_data.json")
        );
    }

    #[test]
    fn test_latest_log_picks_newest_rotation() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["grido.log.2026-01-02", "grido.log.2026-01-10", "other.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(
            latest_log(dir.path()),
            Some(dir.path().join("grido.log.2026-01-10"))
        );
    }

    #[test]
    fn test_latest_log_none_without_logs() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_log(dir.path()), None);
    }
}
