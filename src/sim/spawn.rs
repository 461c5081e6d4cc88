//! Random spawning
//!
//! Owns the run's seeded RNG so every random decision in the simulation goes
//! through one stream and a seed replays the same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::movement::Movement;
use super::state::{Enemy, EnemyId, EnemyKind};
use crate::consts::{ANCHOR_X_MAX, LARGE_ENEMY_CHANCE};

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// One-in-`odds` chance
    pub fn roll(&mut self, odds: u32) -> bool {
        self.rng.random_range(0..odds) == 0
    }

    /// Allocate a new enemy ID
    pub fn next_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// 90% small / 10% large
    pub fn random_kind(&mut self) -> EnemyKind {
        if self.rng.random_bool(LARGE_ENEMY_CHANCE) {
            EnemyKind::Large
        } else {
            EnemyKind::Small
        }
    }

    /// Uniform over the three movement patterns
    pub fn random_movement(&mut self) -> Movement {
        match self.rng.random_range(0..3u8) {
            0 => Movement::ArcTopLeft,
            1 => Movement::ArcTopRight,
            _ => Movement::Anchored {
                x: self.rng.random_range(0..=ANCHOR_X_MAX) as f32,
            },
        }
    }

    /// A fresh enemy anchored to `now`
    pub fn random_enemy(&mut self, now: u64) -> Enemy {
        let kind = self.random_kind();
        let movement = self.random_movement();
        Enemy::new(self.next_id(), kind, movement, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut spawner = Spawner::new(1);
        let a = spawner.next_id();
        let b = spawner.next_id();
        assert!(b > a);
    }

    #[test]
    fn test_roll_one_in_one_always_hits() {
        let mut spawner = Spawner::new(3);
        assert!((0..100).all(|_| spawner.roll(1)));
    }

    #[test]
    fn test_roll_rate_is_roughly_one_in_n() {
        let mut spawner = Spawner::new(42);
        let hits = (0..31_000).filter(|_| spawner.roll(31)).count();
        // Expect ~1000
        assert!((800..1200).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn test_kind_weights() {
        let mut spawner = Spawner::new(7);
        let large = (0..10_000)
            .filter(|_| spawner.random_kind() == EnemyKind::Large)
            .count();
        assert!((800..1200).contains(&large), "large = {large}");
    }

    #[test]
    fn test_movements_cover_all_variants_and_anchor_range() {
        let mut spawner = Spawner::new(11);
        let mut seen = [false; 3];
        for _ in 0..300 {
            match spawner.random_movement() {
                Movement::ArcTopLeft => seen[0] = true,
                Movement::ArcTopRight => seen[1] = true,
                Movement::Anchored { x } => {
                    seen[2] = true;
                    assert!((0.0..=640.0).contains(&x));
                    assert_eq!(x.fract(), 0.0);
                }
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_same_seed_same_enemies() {
        let mut a = Spawner::new(99);
        let mut b = Spawner::new(99);
        for now in 0..20 {
            let ea = a.random_enemy(now);
            let eb = b.random_enemy(now);
            assert_eq!(ea.id, eb.id);
            assert_eq!(ea.kind, eb.kind);
            assert_eq!(ea.movement, eb.movement);
        }
    }
}
