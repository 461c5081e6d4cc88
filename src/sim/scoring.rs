//! Sin meter and score
//!
//! Sin decays a little every tick and spikes on each kill. The score for a
//! kill grows by a factor of 30 for every full 100 points of sin.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One tick of decay, kept inside [0, SIN_MAX]
pub fn decay(sin: f32) -> f32 {
    (sin - SIN_DECAY).clamp(0.0, SIN_MAX)
}

/// Sin after a kill
pub fn jump(sin: f32) -> f32 {
    ((sin + SIN_KILL_BONUS) * SIN_KILL_FACTOR).min(SIN_MAX)
}

/// Completed 100-point tiers of sin, 0..=3
pub fn tier(sin: f32) -> u32 {
    (sin / SIN_TIER_WIDTH).floor().max(0.0) as u32
}

/// Score for a kill made at the given sin level
pub fn kill_score(sin: f32) -> u64 {
    (KILL_BASE_SCORE * SIN_TIER_BASE.powi(tier(sin) as i32)) as u64
}

/// Running score and sin for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub sin: f32,
}

impl Scoreboard {
    pub fn decay(&mut self) {
        self.sin = decay(self.sin);
    }

    /// Score one kill and return the points awarded.
    ///
    /// Points use the sin level before this kill's jump, so several kills in
    /// one frame ratchet the multiplier kill by kill.
    pub fn register_kill(&mut self) -> u64 {
        let delta = kill_score(self.sin);
        self.score = self.score.saturating_add(delta);
        self.sin = jump(self.sin);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decay_bounds() {
        assert_eq!(decay(0.0), 0.0);
        assert_eq!(decay(0.3), 0.0);
        assert_eq!(decay(300.0), 299.5);
        assert_eq!(decay(10.0), 9.5);
    }

    #[test]
    fn test_kill_score_tiers() {
        assert_eq!(kill_score(0.0), 1200);
        assert_eq!(kill_score(99.5), 1200);
        assert_eq!(kill_score(100.0), 36_000);
        assert_eq!(kill_score(250.0), 1_080_000);
        assert_eq!(kill_score(300.0), 32_400_000);
    }

    #[test]
    fn test_jump_formula() {
        assert_eq!(jump(0.0), 10.0);
        assert_eq!(jump(100.0), 210.0);
        // (148 + 5) * 2 = 306, capped
        assert_eq!(jump(148.0), 300.0);
    }

    #[test]
    fn test_register_kill_uses_pre_jump_sin() {
        let mut board = Scoreboard {
            score: 0,
            sin: 250.0,
        };
        let delta = board.register_kill();
        assert_eq!(delta, 1_080_000);
        assert_eq!(board.score, 1_080_000);
        assert_eq!(board.sin, 300.0);
    }

    #[test]
    fn test_consecutive_kills_ratchet() {
        let mut board = Scoreboard::default();
        // sin: 0 -> 10 -> 30 -> 70 -> 150
        let deltas: Vec<u64> = (0..5).map(|_| board.register_kill()).collect();
        assert_eq!(deltas, vec![1200, 1200, 1200, 1200, 36_000]);
        assert_eq!(board.sin, 300.0);
        assert_eq!(board.score, 4 * 1200 + 36_000);
    }

    proptest! {
        #[test]
        fn prop_decay_stays_in_range(sin in 0.0f32..=300.0) {
            let next = decay(sin);
            prop_assert!((0.0..=SIN_MAX).contains(&next));
            prop_assert!(next <= sin);
        }

        #[test]
        fn prop_kill_never_lowers_score_or_leaves_range(sin in 0.0f32..=300.0, score in 0u64..1_000_000_000) {
            let mut board = Scoreboard { score, sin };
            board.register_kill();
            prop_assert!(board.score > score);
            prop_assert!((0.0..=SIN_MAX).contains(&board.sin));
        }
    }
}
