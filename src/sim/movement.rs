//! Enemy movement functions
//!
//! Enemies do not integrate a velocity. Their position is a pure function of
//! the movement variant and the ticks elapsed since they spawned.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::polar_degrees;

/// Arc centers
const TOP_LEFT: Vec2 = Vec2::new(0.0, 0.0);
const TOP_RIGHT: Vec2 = Vec2::new(PLAYFIELD_WIDTH, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    /// Sweeps around the top-left corner, one degree per tick
    ArcTopLeft,
    /// Mirror of `ArcTopLeft` around the top-right corner
    ArcTopRight,
    /// Parked at (x, ANCHOR_Y)
    Anchored { x: f32 },
}

impl Movement {
    /// Position at tick `now` for an enemy spawned at `spawn_tick`
    pub fn position_at(&self, spawn_tick: u64, now: u64) -> Vec2 {
        let elapsed = now.saturating_sub(spawn_tick) as f32;
        match *self {
            Movement::ArcTopLeft => TOP_LEFT + polar_degrees(ARC_RADIUS, -elapsed),
            Movement::ArcTopRight => TOP_RIGHT + polar_degrees(ARC_RADIUS, 180.0 + elapsed),
            Movement::Anchored { x } => Vec2::new(x, ANCHOR_Y),
        }
    }
}
