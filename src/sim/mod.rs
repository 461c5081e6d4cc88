//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per frame, time measured in ticks
//! - Seeded RNG only
//! - Stable iteration order (enemies by spawn order, ids never reused)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod movement;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{enemies_hit, player_hit};
pub use movement::Movement;
pub use scoring::Scoreboard;
pub use spawn::Spawner;
pub use state::{Bullet, Enemy, EnemyId, EnemyKind, GameEvent, GameState, Player, Playfield};
pub use tick::{StepEnv, StepOutcome, TickInput, prune_bullets, step, tick};
