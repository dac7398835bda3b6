//! Command-line argument parsing
//!
//! Supports:
//! - Launching the designer, optionally importing a layout file
//! - Starting fresh instead of restoring the stored project
//! - Listing the toolbox and exporting the stored project headlessly

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stadium seating-grid designer
#[derive(Parser, Debug)]
#[command(name = "grido", version, about = "Stadium seating-grid designer")]
pub struct CliArgs {
    /// Stadium layout JSON to import on startup
    #[arg(short, long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Start with an empty project (ignore stored data)
    #[arg(short = 'n', long)]
    pub fresh: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the tools of the toolbox
    Tools,
    /// Write the stored project's ZIP archive without opening a window
    Export {
        /// Destination directory
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,
        /// Project storage file (defaults to the standard location)
        #[arg(long, value_name = "FILE")]
        storage: Option<PathBuf>,
    },
    /// Open the log folder in the system file browser
    Logs,
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Open the designer window
    Designer {
        layout: Option<PathBuf>,
        restore: bool,
    },
    Tools,
    Export {
        out: PathBuf,
        storage: Option<PathBuf>,
    },
    Logs,
}

impl CliArgs {
    /// Convert parsed CLI args into a startup mode
    pub fn into_mode(self) -> Result<StartupMode, String> {
        match self.command {
            None => Ok(StartupMode::Designer {
                layout: self.layout,
                restore: !self.fresh,
            }),
            Some(_) if self.layout.is_some() => {
                Err("--layout only applies when launching the designer".to_string())
            }
            Some(Command::Tools) => Ok(StartupMode::Tools),
            Some(Command::Export { out, storage }) => Ok(StartupMode::Export { out, storage }),
            Some(Command::Logs) => Ok(StartupMode::Logs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StartupMode, String> {
        CliArgs::try_parse_from(args)
            .map_err(|e| e.to_string())?
            .into_mode()
    }

    #[test]
    fn test_no_args_restores_project() {
        assert_eq!(
            parse(&["grido"]).unwrap(),
            StartupMode::Designer {
                layout: None,
                restore: true
            }
        );
    }

    #[test]
    fn test_fresh_flag_skips_restore() {
        assert_eq!(
            parse(&["grido", "--fresh", "--layout", "stadium.json"]).unwrap(),
            StartupMode::Designer {
                layout: Some(PathBuf::from("stadium.json")),
                restore: false
            }
        );
    }

    #[test]
    fn test_export_subcommand() {
        assert_eq!(
            parse(&["grido", "export", "--out", "/tmp/out"]).unwrap(),
            StartupMode::Export {
                out: PathBuf::from("/tmp/out"),
                storage: None
            }
        );
    }

    #[test]
    fn test_export_requires_out() {
        assert!(parse(&["grido", "export"]).is_err());
    }

    #[test]
    fn test_layout_with_subcommand_is_rejected() {
        assert!(parse(&["grido", "--layout", "a.json", "tools"]).is_err());
    }
}
