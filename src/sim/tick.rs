//! Per-frame simulation tick
//!
//! `step` is the raw update (movement, firing, spawning, sin decay).
//! `tick` wraps it with list bookkeeping, collisions and scoring, and reports
//! what happened as `GameEvent`s.

use super::collision::{enemies_hit, player_hit};
use super::scoring;
use super::spawn::Spawner;
use super::state::{Bullet, Enemy, GameEvent, GameState, Player, Playfield};
use crate::consts::*;
use crate::input::{Control, ControlState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub controls: ControlState,
}

/// Read-only context for one `step`
#[derive(Debug, Clone, Copy)]
pub struct StepEnv<'a> {
    /// Absolute tick; enemy movement is evaluated at this time
    pub now: u64,
    pub controls: &'a ControlState,
    pub playfield: &'a Playfield,
}

/// What a `step` produced for the caller to apply
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// Sin after this tick's decay
    pub sin: f32,
    pub new_enemy: Option<Enemy>,
    /// SHOOT is held; caller spawns the friendly bullet
    pub should_shoot: bool,
    pub enemy_bullets: Vec<Bullet>,
}

/// Advance entities by one tick.
///
/// Order matters:
/// 1. player moves and is clamped
/// 2. enemies jump to their movement position at `now`
/// 3. each enemy may fire (bullets returned, not moved this tick)
/// 4. every existing bullet moves
/// 5. maybe spawn an enemy
/// 6. sin decays
pub fn step<'b>(
    player: &mut Player,
    enemies: &mut [Enemy],
    bullets: impl IntoIterator<Item = &'b mut Bullet>,
    sin: f32,
    env: &StepEnv<'_>,
    spawner: &mut Spawner,
) -> StepOutcome {
    player.update(env.controls, env.playfield);

    for enemy in enemies.iter_mut() {
        enemy.update(env.now);
    }

    let mut enemy_bullets = Vec::new();
    for enemy in enemies.iter() {
        if spawner.roll(ENEMY_FIRE_ODDS) {
            enemy_bullets.push(enemy.fire());
        }
    }

    for bullet in bullets {
        bullet.update();
    }

    let new_enemy = if spawner.roll(ENEMY_SPAWN_ODDS) {
        Some(spawner.random_enemy(env.now))
    } else {
        None
    };

    StepOutcome {
        sin: scoring::decay(sin),
        new_enemy,
        should_shoot: env.controls.is_held(Control::Shoot),
        enemy_bullets,
    }
}

/// Drop every bullet that has left the playfield
pub fn prune_bullets(bullets: &mut Vec<Bullet>, playfield: &Playfield) {
    bullets.retain(|b| b.on_screen(playfield));
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;
    let playfield = state.playfield;
    let env = StepEnv {
        now: state.time_ticks,
        controls: &input.controls,
        playfield: &playfield,
    };

    let outcome = step(
        &mut state.player,
        &mut state.enemies,
        state
            .friendly_bullets
            .iter_mut()
            .chain(state.enemy_bullets.iter_mut()),
        state.scoreboard.sin,
        &env,
        &mut state.spawner,
    );
    state.scoreboard.sin = outcome.sin;

    if let Some(enemy) = outcome.new_enemy {
        log::debug!(
            "Spawned {:?} enemy {:?} ({:?}) at tick {}",
            enemy.kind,
            enemy.id,
            enemy.movement,
            state.time_ticks
        );
        events.push(GameEvent::EnemySpawned {
            id: enemy.id,
            kind: enemy.kind,
        });
        state.enemies.push(enemy);
    }

    state.enemy_bullets.extend(outcome.enemy_bullets);
    prune_bullets(&mut state.enemy_bullets, &playfield);
    prune_bullets(&mut state.friendly_bullets, &playfield);

    if player_hit(state.player.pos, &state.enemy_bullets) {
        events.push(GameEvent::PlayerHit);
    }

    for id in enemies_hit(&state.enemies, &state.friendly_bullets) {
        let score_delta = state.scoreboard.register_kill();
        state.enemies.retain(|e| e.id != id);
        log::debug!(
            "Killed enemy {:?} for {} (sin now {})",
            id,
            score_delta,
            state.scoreboard.sin
        );
        events.push(GameEvent::EnemyKilled { id, score_delta });
    }

    if outcome.should_shoot {
        state
            .friendly_bullets
            .push(Bullet::new(state.player.muzzle(), PLAYER_BULLET_HEADING));
        events.push(GameEvent::Shot);
    }

    events
}
