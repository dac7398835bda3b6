//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=grid=debug` - state diffs produced by the update loop
//! - `RUST_LOG=grido::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/grido/logs/grido.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/grido/logs/grido.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the live section for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub section_code: String,
    pub rows: usize,
    pub cols: usize,
    pub seats: usize,
    pub pointer: &'static str,
    pub scale: f64,
    pub cached_sections: usize,
}

impl StateSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        Self {
            section_code: model.section_code.clone(),
            rows: model.grid.rows(),
            cols: model.grid.cols(),
            seats: model.grid.seat_count(),
            pointer: model.interaction.pointer.name(),
            scale: model.viewport.scale,
            cached_sections: model.project.cache.len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StateSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.section_code != other.section_code {
            changes.push(format!(
                "section: {} → {}",
                self.section_code, other.section_code
            ));
        }
        if (self.rows, self.cols) != (other.rows, other.cols) {
            changes.push(format!(
                "size: {}x{} → {}x{}",
                self.rows, self.cols, other.rows, other.cols
            ));
        }
        if self.seats != other.seats {
            changes.push(format!("seats: {} → {}", self.seats, other.seats));
        }
        if self.pointer != other.pointer {
            changes.push(format!("pointer: {} → {}", self.pointer, other.pointer));
        }
        if self.scale != other.scale {
            changes.push(format!("scale: {:.3} → {:.3}", self.scale, other.scale));
        }
        if self.cached_sections != other.cached_sections {
            changes.push(format!(
                "cache: {} → {}",
                self.cached_sections, other.cached_sections
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StateSnapshot {
        StateSnapshot {
            section_code: "A".into(),
            rows: 2,
            cols: 2,
            seats: 4,
            pointer: "Idle",
            scale: 1.0,
            cached_sections: 0,
        }
    }

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        assert_eq!(snapshot().diff(&snapshot()), None);
    }

    #[test]
    fn test_diff_lists_changes() {
        let after = StateSnapshot {
            seats: 3,
            pointer: "Painting",
            ..snapshot()
        };
        assert_eq!(
            snapshot().diff(&after).as_deref(),
            Some("seats: 4 → 3; pointer: Idle → Painting")
        );
    }
}
