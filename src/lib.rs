//! Grido - stadium seating-grid designer
//!
//! This crate provides the core types and logic for a pan/zoom seat grid
//! editor implementing the Elm Architecture pattern, plus the CSV/ZIP
//! exporters and project storage used by the desktop app and the CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dashboard;
pub mod export;
pub mod messages;
pub mod model;
pub mod persistence;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Theme;
