//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::movement::Movement;
use super::scoring::Scoreboard;
use super::spawn::Spawner;
use crate::consts::*;
use crate::input::{Control, ControlState};
use crate::polar_degrees;

/// Rectangle the player and bullets live in, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Inclusive on all four edges
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self { pos: PLAYER_START }
    }
}

impl Player {
    /// Unit-ish translation for this frame's controls.
    ///
    /// Left beats right and up beats down, so each axis is -1, 0 or 1.
    /// Focus halves the whole vector.
    pub fn translation(controls: &ControlState) -> Vec2 {
        let mut t = Vec2::ZERO;
        if controls.is_held(Control::Left) {
            t.x = -1.0;
        } else if controls.is_held(Control::Right) {
            t.x = 1.0;
        }

        if controls.is_held(Control::Up) {
            t.y = -1.0;
        } else if controls.is_held(Control::Down) {
            t.y = 1.0;
        }

        if controls.is_held(Control::Focus) {
            t *= FOCUS_FACTOR;
        }
        t
    }

    /// Move by the controls' translation and clamp to the playfield
    pub fn update(&mut self, controls: &ControlState, playfield: &Playfield) {
        self.pos += Self::translation(controls) * PLAYER_SPEED;
        self.pos = playfield.clamp(self.pos);
    }

    /// Where friendly bullets appear
    pub fn muzzle(&self) -> Vec2 {
        self.pos + MUZZLE_OFFSET
    }
}

/// A bullet; friendly or hostile depending on which list holds it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Fixed at creation: BULLET_SPEED along the heading
    pub vel: Vec2,
}

impl Bullet {
    /// Spawn at `pos` travelling along `heading` (degrees, y down)
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            vel: polar_degrees(BULLET_SPEED, heading),
        }
    }

    /// Advance one tick, then floor to whole pixels
    pub fn update(&mut self) {
        self.pos = (self.pos + self.vel).floor();
    }

    pub fn on_screen(&self, playfield: &Playfield) -> bool {
        playfield.contains(self.pos)
    }
}

/// Enemy categories; only the sprite differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Small,
    Large,
    /// Reserved, never spawned yet
    Boss,
}

/// Stable enemy handle, never reused within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub movement: Movement,
    pub spawn_tick: u64,
    /// Derived from `movement`; refreshed every tick
    pub pos: Vec2,
}

impl Enemy {
    pub fn new(id: EnemyId, kind: EnemyKind, movement: Movement, spawn_tick: u64) -> Self {
        Self {
            id,
            kind,
            movement,
            spawn_tick,
            pos: movement.position_at(spawn_tick, spawn_tick),
        }
    }

    pub fn update(&mut self, now: u64) {
        self.pos = self.movement.position_at(self.spawn_tick, now);
    }

    /// A southward bullet from the enemy's position
    pub fn fire(&self) -> Bullet {
        Bullet::new(self.pos, ENEMY_BULLET_HEADING)
    }
}

/// Effects of a tick that the frame loop turns into sound or logs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// An enemy bullet grazed the player
    PlayerHit,
    /// Player fired a bullet
    Shot,
    EnemySpawned { id: EnemyId, kind: EnemyKind },
    EnemyKilled { id: EnemyId, score_delta: u64 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG and enemy id allocation
    pub spawner: Spawner,
    /// Simulation tick counter, also the enemy movement clock
    pub time_ticks: u64,
    pub playfield: Playfield,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub friendly_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub scoreboard: Scoreboard,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            spawner: Spawner::new(seed),
            time_ticks: 0,
            playfield: Playfield::default(),
            player: Player::default(),
            enemies: Vec::new(),
            friendly_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            scoreboard: Scoreboard::default(),
        }
    }

    pub fn sin(&self) -> f32 {
        self.scoreboard.sin
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score
    }
}
