//! Skyclad Iconoclast - a small bullet-hell arcade shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, spawning, collisions, sin/score)
//! - `input`: Physical keys to logical controls
//! - `scene`: Render step, turns game state into draw commands
//! - `renderer`: wgpu pipeline that executes draw commands
//! - `launcher`: Resolution picker that spawns the game process

pub mod assets;
pub mod audio;
pub mod display;
pub mod frame;
pub mod input;
pub mod launcher;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Target frame rate; one simulation tick per frame
    pub const TARGET_FPS: u32 = 60;

    /// Logical playfield, shared by both display modes
    pub const PLAYFIELD_WIDTH: f32 = 640.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Player defaults
    pub const PLAYER_START: Vec2 = Vec2::new(320.0, 320.0);
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Focus halves the movement vector
    pub const FOCUS_FACTOR: f32 = 0.5;
    /// Friendly bullets leave from the sprite's nose
    pub const MUZZLE_OFFSET: Vec2 = Vec2::new(26.0, 0.0);

    /// Bullet speed in pixels per tick
    pub const BULLET_SPEED: f32 = 15.0;
    /// Headings in degrees, 0 = +x, y grows downward
    pub const PLAYER_BULLET_HEADING: f32 = -90.0;
    pub const ENEMY_BULLET_HEADING: f32 = 90.0;

    /// Enemy movement
    pub const ARC_RADIUS: f32 = 100.0;
    pub const ANCHOR_Y: f32 = 100.0;
    /// Anchored enemies pick x in 0..=ANCHOR_X_MAX
    pub const ANCHOR_X_MAX: i32 = 640;

    /// One in N chance per tick to spawn an enemy
    pub const ENEMY_SPAWN_ODDS: u32 = 31;
    /// One in N chance per tick for each enemy to fire
    pub const ENEMY_FIRE_ODDS: u32 = 11;
    /// Share of spawns that are large enemies
    pub const LARGE_ENEMY_CHANCE: f64 = 0.1;

    /// Collision thresholds (squared pixels)
    pub const PLAYER_HIT_RADIUS_SQ: f32 = 64.0;
    pub const ENEMY_KILL_RADIUS_SQ: f32 = 900.0;

    /// Sin meter
    pub const SIN_MAX: f32 = 300.0;
    pub const SIN_DECAY: f32 = 0.5;
    pub const SIN_KILL_BONUS: f32 = 5.0;
    pub const SIN_KILL_FACTOR: f32 = 2.0;

    /// Score per kill is KILL_BASE_SCORE * 30^(sin tier)
    pub const KILL_BASE_SCORE: f64 = 1000.0 * 1.2;
    pub const SIN_TIER_BASE: f64 = 30.0;
    pub const SIN_TIER_WIDTH: f32 = 100.0;
}

/// Polar to cartesian with the angle in degrees (screen space, y down).
///
/// Trig runs in f64: in f32, 90° converts to slightly more than pi/2 and the
/// negative cosine would walk a whole-pixel x one pixel left under `floor`.
#[inline]
pub fn polar_degrees(r: f32, degrees: f32) -> Vec2 {
    let theta = (degrees as f64).to_radians();
    let r = r as f64;
    Vec2::new((r * theta.cos()) as f32, (r * theta.sin()) as f32)
}
