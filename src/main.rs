use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use grido::cli::{CliArgs, StartupMode};
use grido::commands::Cmd;
use grido::config::GridConfig;
use grido::persistence::{self, ProjectStore};
use grido::theme::Theme;
use grido::config_paths::{self, AppFile};
use grido::{dashboard, export, AppModel};

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    let mode = CliArgs::parse()
        .into_mode()
        .map_err(|e| anyhow::anyhow!(e))?;

    grido::tracing::init();

    match mode {
        StartupMode::Tools => {
            print!("{}", dashboard::render_listing());
            Ok(())
        }
        StartupMode::Export { out, storage } => {
            let store = match storage {
                Some(path) => ProjectStore::new(path),
                None => ProjectStore::default_location()?,
            };
            let snapshot = store
                .load()
                .with_context(|| format!("Failed to read {}", store.path().display()))?
                .with_context(|| format!("No project stored at {}", store.path().display()))?;

            let path = export::write_archive(&snapshot.into_project(), &out)
                .context("Failed to export project")?;
            println!("{}", path.display());
            Ok(())
        }
        StartupMode::Logs => {
            let dir = config_paths::logs_dir().context("Failed to create the log folder")?;
            if let Some(latest) = config_paths::latest_log(&dir) {
                println!("{}", latest.display());
            }
            open::that(&dir).with_context(|| format!("Failed to open {}", dir.display()))?;
            Ok(())
        }
        StartupMode::Designer { layout, restore } => run_designer(layout, restore),
    }
}

fn run_designer(layout: Option<std::path::PathBuf>, restore: bool) -> Result<()> {
    let config = GridConfig::load();
    // Leave an editable copy of the defaults on first launch
    if AppFile::Config.path().is_some_and(|path| !path.exists()) {
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
    }
    let theme = Theme::load();
    let mut model = AppModel::new(config, theme, (1280, 800), 1.0);

    let store = match ProjectStore::default_location() {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("Project storage unavailable: {}", e);
            None
        }
    };

    if restore {
        if let Some(snapshot) = store.as_ref().and_then(ProjectStore::load_or_empty) {
            persistence::restore(&mut model, snapshot);
            tracing::info!("Restored project, section {}", model.section_code);
        }
    }

    let startup_cmd = layout.map(|path| Cmd::LoadLayoutFile { path });

    let event_loop = EventLoop::new()?;
    let mut app = App::new(model, store, startup_cmd);
    event_loop.run_app(&mut app)?;

    Ok(())
}
