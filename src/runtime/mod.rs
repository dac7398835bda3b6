//! Runtime module - winit/platform integration
//!
//! This module contains platform-specific code for running the designer:
//! - `app` - ApplicationHandler, window management and command execution
//! - `input` - Keyboard event to message mapping
//! - `render` - Softbuffer surface and frame presentation

pub mod app;
pub mod input;
pub mod render;

pub use app::App;
