//! Skyclad Iconoclast - game binary
//!
//! Usage: `skyclad [windowed|fullscreen] [--seed N] [--config PATH]`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use skyclad::Settings;
use skyclad::audio::{AudioManager, SoundEffect};
use skyclad::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use skyclad::display::{DisplayMode, GAME_TITLE};
use skyclad::frame::{FrameClock, LoopState};
use skyclad::input::{Control, KeyboardState};
use skyclad::renderer::RenderState;
use skyclad::scene::{Palette, compose_frame};
use skyclad::settings::DEFAULT_SETTINGS_PATH;
use skyclad::sim::{GameEvent, GameState, TickInput, tick};

#[derive(Parser, Debug)]
#[command(name = "skyclad", version)]
#[command(about = "東方空想者 ~ Skyclad Iconoclast")]
struct Cli {
    /// "windowed" for 640x480, anything else for 1280x960 fullscreen
    mode: Option<String>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Settings file; defaults are used if it does not exist
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,
}

struct GameApp {
    mode: DisplayMode,
    settings: Settings,
    audio: AudioManager,
    palette: Palette,
    state: GameState,
    keyboard: KeyboardState,
    clock: FrameClock,
    loop_state: LoopState,
    /// Set when the clock schedules a frame; other redraws only re-render
    tick_pending: bool,
    renderer: Option<RenderState>,
    /// Startup failure inside the event loop, returned from `main`
    error: Option<anyhow::Error>,
}

impl GameApp {
    fn new(mode: DisplayMode, settings: Settings, audio: AudioManager, seed: u64) -> Self {
        Self {
            mode,
            clock: FrameClock::new(settings.target_fps),
            settings,
            audio,
            palette: Palette::default(),
            state: GameState::new(seed),
            keyboard: KeyboardState::default(),
            loop_state: LoopState::Running,
            tick_pending: false,
            renderer: None,
            error: None,
        }
    }

    fn init_renderer(&self, event_loop: &ActiveEventLoop) -> Result<RenderState> {
        let window = event_loop
            .create_window(self.mode.window_attributes(GAME_TITLE))
            .context("failed to create window")?;
        let window = Arc::new(window);
        if self.mode == DisplayMode::Fullscreen {
            self.mode.apply(&window);
        }

        let logical = Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        let mut renderer = pollster::block_on(RenderState::new(window, logical))?;
        renderer
            .load_sprites(&self.settings.assets)
            .context("failed to load sprites")?;
        Ok(renderer)
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        self.loop_state = LoopState::Stopped;
        event_loop.exit();
    }

    /// Advance one tick and play what it produced
    fn update(&mut self) {
        let input = TickInput {
            controls: self.settings.controls.resolve(self.keyboard.held()),
        };
        for event in tick(&mut self.state, &input) {
            match event {
                GameEvent::PlayerHit => self.audio.play(SoundEffect::Hit),
                GameEvent::Shot => self.audio.play(SoundEffect::Shoot),
                GameEvent::EnemySpawned { .. } | GameEvent::EnemyKilled { .. } => {}
            }
        }
    }

    fn render(&mut self) {
        let commands = compose_frame(&self.state, &self.palette);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render_or_recover(&commands);
        }
    }
}

impl ApplicationHandler for GameApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.init_renderer(event_loop) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                self.error = Some(e);
                self.stop(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.stop(event_loop),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }

            WindowEvent::Focused(focused) => {
                // Key releases are lost while unfocused
                if !focused {
                    self.keyboard.clear();
                }
                if self.settings.mute_on_blur {
                    self.audio.set_muted(self.settings.muted || !focused);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed if code == KeyCode::Escape => self.stop(event_loop),
                ElementState::Pressed => self.keyboard.press(code),
                ElementState::Released => self.keyboard.release(code),
            },

            WindowEvent::RedrawRequested => {
                if !self.loop_state.is_running() {
                    return;
                }
                if std::mem::take(&mut self.tick_pending) {
                    self.update();
                }
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.loop_state.is_running() {
            return;
        }
        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };

        let now = Instant::now();
        let deadline = if self.clock.is_due(now) {
            self.tick_pending = true;
            renderer.window.request_redraw();
            Some(self.clock.start_frame(now))
        } else {
            self.clock.next_deadline()
        };
        if let Some(deadline) = deadline {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mode = DisplayMode::from_arg(cli.mode.as_deref());
    let settings = Settings::load(&cli.config)
        .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!(
        "Starting {} ({} mode, seed {})",
        GAME_TITLE,
        mode.keyword(),
        seed
    );

    settings
        .assets
        .ensure_present()
        .context("game assets are incomplete")?;
    for control in Control::ALL {
        let keys: Vec<_> = settings.controls.keys_for(control).collect();
        log::debug!("{:?} bound to {:?}", control, keys);
    }

    let audio = AudioManager::load(&settings.assets, &settings)
        .context("failed to load sound effects")?;
    if !audio.is_available() {
        log::warn!("Running without sound");
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = GameApp::new(mode, settings, audio, seed);
    log::debug!("Frame time {:?}", app.clock.frame_duration());
    event_loop.run_app(&mut app).context("event loop failed")?;

    if let Some(e) = app.error {
        return Err(e);
    }
    log::info!(
        "Stopped after {} ticks with score {}",
        app.state.time_ticks,
        app.state.score()
    );
    Ok(())
}
