//! Collision detection
//!
//! Everything is a point with a radius, compared in squared distance so no
//! square root is needed. Nothing here mutates state; the caller applies
//! the effects.

use glam::Vec2;

use super::state::{Bullet, Enemy, EnemyId};
use crate::consts::{ENEMY_KILL_RADIUS_SQ, PLAYER_HIT_RADIUS_SQ};

/// True if any enemy bullet is within the player's hit radius (inclusive)
pub fn player_hit(player_pos: Vec2, enemy_bullets: &[Bullet]) -> bool {
    enemy_bullets
        .iter()
        .any(|b| player_pos.distance_squared(b.pos) <= PLAYER_HIT_RADIUS_SQ)
}

/// Enemies touched by any friendly bullet (strictly inside the kill radius),
/// in enemy list order
pub fn enemies_hit(enemies: &[Enemy], friendly_bullets: &[Bullet]) -> Vec<EnemyId> {
    enemies
        .iter()
        .filter(|e| {
            friendly_bullets
                .iter()
                .any(|b| e.pos.distance_squared(b.pos) < ENEMY_KILL_RADIUS_SQ)
        })
        .map(|e| e.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::movement::Movement;
    use crate::sim::state::EnemyKind;

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        let mut enemy = Enemy::new(EnemyId(id), EnemyKind::Small, Movement::Anchored { x }, 0);
        enemy.pos = Vec2::new(x, y);
        enemy
    }

    #[test]
    fn test_player_hit_close_bullet() {
        let player = Vec2::new(100.0, 100.0);
        // 3^2 = 9 <= 64
        assert!(player_hit(player, &[bullet_at(103.0, 100.0)]));
        // 10^2 = 100 > 64
        assert!(!player_hit(player, &[bullet_at(110.0, 100.0)]));
    }

    #[test]
    fn test_player_hit_radius_is_inclusive() {
        let player = Vec2::new(100.0, 100.0);
        assert!(player_hit(player, &[bullet_at(108.0, 100.0)]));
    }

    #[test]
    fn test_player_hit_empty() {
        assert!(!player_hit(Vec2::new(0.0, 0.0), &[]));
    }

    #[test]
    fn test_enemy_kill_threshold() {
        let enemies = [enemy_at(1, 200.0, 200.0)];
        // 20^2 = 400 < 900
        assert_eq!(enemies_hit(&enemies, &[bullet_at(220.0, 200.0)]), vec![EnemyId(1)]);
        // 35^2 = 1225 >= 900
        assert!(enemies_hit(&enemies, &[bullet_at(235.0, 200.0)]).is_empty());
        // Exactly 30 away is a miss
        assert!(enemies_hit(&enemies, &[bullet_at(230.0, 200.0)]).is_empty());
    }

    #[test]
    fn test_enemies_hit_keeps_list_order_and_equal_positions_apart() {
        // Two enemies on the same spot are still reported separately
        let enemies = [
            enemy_at(4, 50.0, 50.0),
            enemy_at(2, 400.0, 50.0),
            enemy_at(9, 50.0, 50.0),
        ];
        let bullets = [bullet_at(55.0, 55.0)];
        assert_eq!(enemies_hit(&enemies, &bullets), vec![EnemyId(4), EnemyId(9)]);
    }
}
