//! Skyclad Iconoclast - launcher
//!
//! Pick a display mode and start the game in a separate process.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use skyclad::launcher::{
    LAUNCHER_SIZE, LAUNCHER_TITLE, LaunchRequest, LauncherAction, LauncherState, game_executable,
    spawn_game,
};
use skyclad::renderer::RenderState;

#[derive(Parser, Debug)]
#[command(name = "skyclad-launcher", version)]
#[command(about = "Choose a display mode and launch Skyclad Iconoclast")]
struct Cli {}

#[derive(Default)]
struct LauncherApp {
    form: LauncherState,
    renderer: Option<RenderState>,
    cursor: Vec2,
    error: Option<anyhow::Error>,
}

impl LauncherApp {
    fn init_renderer(&self, event_loop: &ActiveEventLoop) -> Result<RenderState> {
        let attributes = Window::default_attributes()
            .with_title(LAUNCHER_TITLE)
            .with_inner_size(PhysicalSize::new(
                LAUNCHER_SIZE.x as u32,
                LAUNCHER_SIZE.y as u32,
            ))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create launcher window")?,
        );
        pollster::block_on(RenderState::new(window, LAUNCHER_SIZE))
    }

    fn redraw(&self) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn handle(&mut self, event_loop: &ActiveEventLoop, action: Option<LauncherAction>) {
        let Some(action) = action else {
            return;
        };
        if let LauncherAction::Launch(request) = action {
            self.launch(event_loop, &request);
        }
        self.redraw();
    }

    fn launch(&mut self, event_loop: &ActiveEventLoop, request: &LaunchRequest) {
        let spawned = game_executable().and_then(|exe| spawn_game(&exe, request));
        match spawned {
            Ok(child) => {
                log::info!("Game started (pid {})", child.id());
                if request.close_launcher {
                    event_loop.exit();
                }
            }
            Err(e) => log::error!("Failed to launch game: {e}"),
        }
    }
}

impl ApplicationHandler for LauncherApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.init_renderer(event_loop) {
            Ok(renderer) => {
                renderer.window.request_redraw();
                self.renderer = Some(renderer);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(renderer) = self.renderer.as_ref() {
                    let physical = Vec2::new(position.x as f32, position.y as f32);
                    self.cursor = renderer.viewport().to_logical(physical);
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let action = self.form.click(self.cursor);
                self.handle(event_loop, action);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                let action = self.form.key(code);
                self.handle(event_loop, action);
            }

            WindowEvent::RedrawRequested => {
                let commands = self.form.compose();
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.render_or_recover(&commands);
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _cli = Cli::parse();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = LauncherApp::default();
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
