//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::export::ArchiveEntry;
use crate::persistence::ProjectSnapshot;

/// Contents of an export, built before the save dialog opens
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPayload {
    /// One section as CSV text
    Csv(String),
    /// One CSV per configured leaf section, zipped by the runtime
    Archive(Vec<ArchiveEntry>),
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the window
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    /// Start the zoom debounce timer.
    /// After delay_ms, sends Msg::Viewport(ZoomSettled { revision })
    DebouncedZoomSettle { revision: u64, delay_ms: u64 },

    /// Write the project snapshot to storage (ordered, on the storage worker)
    PersistProject { snapshot: Box<ProjectSnapshot> },
    /// Delete the storage file (ordered with writes)
    ClearStorage,

    /// Ask for a destination and write the export there.
    /// Sends Msg::App(ExportCompleted) when done
    SaveExport {
        suggested_name: String,
        payload: ExportPayload,
    },

    /// Show native open file dialog for a layout JSON
    ShowImportDialog,
    /// Read a layout file; sends Msg::Section(LayoutFileLoaded)
    LoadLayoutFile { path: PathBuf },

    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands, dropping `None`s
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Timers and workers report back with their own messages
            Cmd::DebouncedZoomSettle { .. } => false,
            Cmd::PersistProject { .. } => false,
            Cmd::ClearStorage => false,
            Cmd::SaveExport { .. } => false,
            Cmd::ShowImportDialog => false,
            Cmd::LoadLayoutFile { .. } => false,
            // Quit doesn't need redraw - app is exiting
            Cmd::Quit => false,
        }
    }

    /// All leaf commands, with batches flattened
    pub fn flatten(&self) -> Vec<&Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
