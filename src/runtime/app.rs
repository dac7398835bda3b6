use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{CursorIcon, Window};

use grido::commands::{Cmd, ExportPayload};
use grido::export;
use grido::messages::{AppMsg, CanvasMsg, Msg, PointerButton, SectionMsg, ViewportMsg};
use grido::model::viewport::Point;
use grido::model::AppModel;
use grido::persistence::{ProjectSnapshot, ProjectStore};
use grido::update::update;
use grido::view;

use super::input::key_msgs;
use super::render::Renderer;

const TICK_INTERVAL: Duration = Duration::from_millis(250);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Wheel pixels per scroll line
const LINE_DELTA_PX: f64 = 100.0;

/// Work for the storage thread; jobs run in the order they are sent
enum StorageJob {
    Save(Box<ProjectSnapshot>),
    Clear,
}

pub struct App {
    model: AppModel,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    last_tick: Instant,
    modifiers: ModifiersState,
    /// Last cursor position in logical window coordinates
    mouse_position: Option<Point>,
    pointer_in_canvas: bool,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    storage_tx: Sender<StorageJob>,
    /// Runs once the window exists
    startup_cmd: Option<Cmd>,
    quit_requested: bool,
}

impl App {
    pub fn new(model: AppModel, store: Option<ProjectStore>, startup_cmd: Option<Cmd>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let storage_tx = spawn_storage_worker(store, msg_tx.clone());

        Self {
            model,
            renderer: None,
            window: None,
            context: None,
            last_tick: Instant::now(),
            modifiers: ModifiersState::empty(),
            mouse_position: None,
            pointer_in_canvas: false,
            msg_tx,
            msg_rx,
            storage_tx,
            startup_cmd,
            quit_requested: false,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Grido")
            .with_inner_size(LogicalSize::new(1280, 800));

        let window = Rc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create graphics context: {}", e))?;

        let font = view::fonts::load_font(self.model.config.font_path.as_deref());
        if font.is_none() {
            tracing::warn!("No usable font found, labels will not be drawn");
        }

        let size = window.inner_size();
        self.model.window_size = (size.width, size.height);
        self.model.scale_factor = window.scale_factor();
        self.model.recenter();

        self.renderer = Some(Renderer::new(Rc::clone(&window), &context, font)?);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    /// Run messages through update, returning the combined command
    fn dispatch(&mut self, msgs: Vec<Msg>) -> Option<Cmd> {
        let cmds: Vec<Cmd> = msgs
            .into_iter()
            .map(|msg| Cmd::from(update(&mut self.model, msg)))
            .collect();
        match Cmd::batch(cmds) {
            Cmd::None => None,
            cmd => Some(cmd),
        }
    }

    fn canvas_point(&self, point: Point) -> Point {
        let canvas = self.model.canvas_rect();
        Point::new(point.x - canvas.x, point.y - canvas.y)
    }

    fn over_canvas(&self, point: Point) -> bool {
        self.model.ui.modal.is_none() && self.model.canvas_rect().contains(point)
    }

    fn update_cursor_icon(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let icon = if self.model.interaction.pointer.is_dragging_canvas() {
            CursorIcon::Grabbing
        } else if self.pointer_in_canvas {
            CursorIcon::Crosshair
        } else {
            CursorIcon::Default
        };
        window.set_cursor(icon);
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => {
                self.dispatch(vec![Msg::App(AppMsg::Resize(size.width, size.height))])
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.dispatch(vec![Msg::App(AppMsg::ScaleFactorChanged(*scale_factor))])
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                let msgs = key_msgs(
                    &self.model,
                    &event.logical_key,
                    self.modifiers.control_key() || self.modifiers.super_key(),
                    self.modifiers.shift_key(),
                );
                self.dispatch(msgs)
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.model.scale_factor.max(f64::EPSILON);
                let point = Point::new(position.x / scale, position.y / scale);
                self.mouse_position = Some(point);
                self.cursor_moved(point)
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                self.pointer_in_canvas = false;
                self.dispatch(vec![Msg::Canvas(CanvasMsg::PointerLeave)])
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let point = self.mouse_position?;
                match state {
                    ElementState::Pressed => self.mouse_pressed(point, *button),
                    ElementState::Released => {
                        if self.model.interaction.pointer.is_idle() {
                            return None;
                        }
                        let local = self.canvas_point(point);
                        self.dispatch(vec![Msg::Canvas(CanvasMsg::PointerUp {
                            x: local.x,
                            y: local.y,
                        })])
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let point = self.mouse_position?;
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -(*y as f64) * LINE_DELTA_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y,
                };
                if delta_y == 0.0 {
                    return None;
                }
                if self.over_canvas(point) {
                    let local = self.canvas_point(point);
                    return self.dispatch(vec![Msg::Canvas(CanvasMsg::Wheel {
                        delta_y,
                        x: local.x,
                        y: local.y,
                    })]);
                }
                let over_tree = self
                    .model
                    .sections_rect()
                    .is_some_and(|panel| panel.contains(point));
                if over_tree && self.model.ui.modal.is_none() {
                    let rows = if delta_y > 0.0 { 1 } else { -1 };
                    return self.dispatch(vec![Msg::Section(SectionMsg::ScrollTree(rows))]);
                }
                None
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render failed: {:#}", e);
                }
                None
            }
            _ => None,
        }
    }

    fn cursor_moved(&mut self, point: Point) -> Option<Cmd> {
        let in_canvas = self.over_canvas(point);
        let was_in_canvas = std::mem::replace(&mut self.pointer_in_canvas, in_canvas);
        let gesture = !self.model.interaction.pointer.is_idle();

        let cmd = if in_canvas || gesture {
            let local = self.canvas_point(point);
            self.dispatch(vec![Msg::Canvas(CanvasMsg::PointerMove {
                x: local.x,
                y: local.y,
            })])
        } else if was_in_canvas {
            self.dispatch(vec![Msg::Canvas(CanvasMsg::PointerLeave)])
        } else {
            None
        };

        self.update_cursor_icon();
        cmd
    }

    fn mouse_pressed(&mut self, point: Point, button: MouseButton) -> Option<Cmd> {
        let button = match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            _ => return None,
        };

        if self.over_canvas(point) {
            // Blur a focused input before the canvas takes the press
            let mut msgs = view::click_msgs(&self.model, point);
            let local = self.canvas_point(point);
            msgs.push(Msg::Canvas(CanvasMsg::PointerDown {
                x: local.x,
                y: local.y,
                button,
            }));
            let cmd = self.dispatch(msgs);
            self.update_cursor_icon();
            return cmd;
        }

        if button != PointerButton::Primary {
            return None;
        }
        let msgs = view::click_msgs(&self.model, point);
        self.dispatch(msgs)
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.model)?;
        }
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::DebouncedZoomSettle { revision, delay_ms } => {
                let tx = self.msg_tx.clone();
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(delay_ms));
                    let _ = tx.send(Msg::Viewport(ViewportMsg::ZoomSettled { revision }));
                });
            }
            Cmd::PersistProject { snapshot } => {
                if self.storage_tx.send(StorageJob::Save(snapshot)).is_err() {
                    tracing::error!("Storage worker is gone, project not saved");
                }
            }
            Cmd::ClearStorage => {
                if self.storage_tx.send(StorageJob::Clear).is_err() {
                    tracing::error!("Storage worker is gone, storage not cleared");
                }
            }
            Cmd::SaveExport {
                suggested_name,
                payload,
            } => {
                let tx = self.msg_tx.clone();
                thread::spawn(move || {
                    let result = save_export(&suggested_name, payload);
                    let _ = tx.send(Msg::App(AppMsg::ExportCompleted(result)));
                });
            }

            // =====================================================================
            // File Dialogs (using rfd)
            // =====================================================================
            Cmd::ShowImportDialog => {
                let tx = self.msg_tx.clone();
                thread::spawn(move || {
                    let picked = rfd::FileDialog::new()
                        .add_filter("Stadium layout", &["json"])
                        .pick_file();
                    if let Some(path) = picked {
                        let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                        let _ = tx.send(Msg::Section(SectionMsg::LayoutFileLoaded { path, result }));
                    }
                });
            }
            Cmd::LoadLayoutFile { path } => {
                let tx = self.msg_tx.clone();
                thread::spawn(move || {
                    let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                    let _ = tx.send(Msg::Section(SectionMsg::LayoutFileLoaded { path, result }));
                });
            }
            Cmd::Quit => {
                self.quit_requested = true;
            }
        }
    }

    fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = update(&mut self.model, msg) {
                if cmd.needs_redraw() {
                    needs_redraw = true;
                }
                self.process_cmd(cmd);
            }
        }
        needs_redraw
    }

    fn tick(&mut self) -> Option<Cmd> {
        update(&mut self.model, Msg::App(AppMsg::Tick))
    }
}

/// Ask where to save, then write the export. `Ok(None)` when cancelled.
fn save_export(suggested_name: &str, payload: ExportPayload) -> Result<Option<std::path::PathBuf>, String> {
    let (bytes, extension) = match payload {
        ExportPayload::Csv(text) => (text.into_bytes(), "csv"),
        ExportPayload::Archive(entries) => (
            export::build_archive(&entries).map_err(|e| e.to_string())?,
            "zip",
        ),
    };

    let Some(path) = rfd::FileDialog::new()
        .set_file_name(suggested_name)
        .add_filter(extension.to_uppercase(), &[extension])
        .save_file()
    else {
        return Ok(None);
    };

    std::fs::write(&path, bytes).map_err(|e| format!("{}: {}", path.display(), e))?;
    tracing::info!("Exported {}", path.display());
    Ok(Some(path))
}

fn spawn_storage_worker(store: Option<ProjectStore>, msg_tx: Sender<Msg>) -> Sender<StorageJob> {
    let (tx, rx) = mpsc::channel::<StorageJob>();
    thread::spawn(move || {
        for job in rx {
            let result = match (&store, job) {
                (None, _) => Err("no storage location available".to_string()),
                (Some(store), StorageJob::Save(snapshot)) => {
                    store.save(&snapshot).map_err(|e| e.to_string())
                }
                (Some(store), StorageJob::Clear) => store.clear().map_err(|e| e.to_string()),
            };
            if msg_tx.send(Msg::App(AppMsg::PersistCompleted(result))).is_err() {
                break;
            }
        }
    });
    tx
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            tracing::error!("Failed to open window: {:#}", e);
            event_loop.exit();
            return;
        }
        if let Some(cmd) = self.startup_cmd.take() {
            self.process_cmd(cmd);
        }
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let should_exit = matches!(event, WindowEvent::CloseRequested);
        let is_ours = self.window.as_ref().is_some_and(|w| w.id() == window_id);

        let should_redraw = if is_ours && !should_exit {
            match self.handle_event(&event) {
                Some(cmd) => {
                    let needs_redraw = cmd.needs_redraw();
                    self.process_cmd(cmd);
                    needs_redraw
                }
                None => false,
            }
        } else {
            false
        };

        if should_exit || self.quit_requested {
            event_loop.exit();
        } else if should_redraw {
            self.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME_INTERVAL));

        if self.process_async_messages() {
            self.request_redraw();
        }

        let now = Instant::now();
        if now.duration_since(self.last_tick) > TICK_INTERVAL {
            self.last_tick = now;
            if self.tick().is_some() {
                self.request_redraw();
            }
        }

        if self.quit_requested {
            event_loop.exit();
        }
    }
}
