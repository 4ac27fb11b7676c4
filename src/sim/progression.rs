//! Score, kill counting and level-ups

use serde::{Deserialize, Serialize};

/// Kills needed to leave `level`
pub fn kill_threshold(level: u32) -> u32 {
    10 + 5 * level
}

/// What happened when a kill pushed the player over a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The level just reached
    pub level: u32,
    /// Even levels grant a life
    pub extra_life: bool,
    /// First time the cap was reached
    pub reached_max: bool,
}

/// Score and level progress for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    pub level: u32,
    /// Kills since the last level-up
    pub enemies_defeated: u32,
    /// Kills needed for the next level-up
    pub next_level_at: u32,
    pub max_level: u32,
    max_level_announced: bool,
}

impl Progression {
    pub fn new(max_level: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            enemies_defeated: 0,
            next_level_at: kill_threshold(1),
            max_level: max_level.max(1),
            max_level_announced: false,
        }
    }

    pub fn at_max_level(&self) -> bool {
        self.level >= self.max_level
    }

    /// Award a kill and evaluate the level-up rule
    pub fn record_kill(&mut self, points: u64) -> Option<LevelUp> {
        self.score += points;
        self.enemies_defeated += 1;

        if self.enemies_defeated < self.next_level_at || self.at_max_level() {
            return None;
        }

        self.level += 1;
        self.enemies_defeated = 0;
        self.next_level_at = kill_threshold(self.level);

        let reached_max = self.at_max_level() && !self.max_level_announced;
        if reached_max {
            self.max_level_announced = true;
        }

        Some(LevelUp {
            level: self.level,
            extra_life: self.level % 2 == 0,
            reached_max,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.max_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_up_at_threshold() {
        let mut p = Progression::new(10);
        assert_eq!(p.next_level_at, 15);
        for _ in 0..14 {
            assert!(p.record_kill(10).is_none());
        }
        let up = p.record_kill(10).unwrap();
        assert_eq!(up.level, 2);
        assert!(up.extra_life);
        assert!(!up.reached_max);
        assert_eq!(p.level, 2);
        assert_eq!(p.enemies_defeated, 0);
        assert_eq!(p.next_level_at, 20);
        assert_eq!(p.score, 150);
    }

    #[test]
    fn test_odd_levels_grant_no_life() {
        let mut p = Progression::new(10);
        p.level = 2;
        p.next_level_at = kill_threshold(2);
        p.enemies_defeated = 19;
        let up = p.record_kill(10).unwrap();
        assert_eq!(up.level, 3);
        assert!(!up.extra_life);
    }

    #[test]
    fn test_cap_announced_once() {
        let mut p = Progression::new(3);
        p.level = 2;
        p.next_level_at = kill_threshold(2);
        p.enemies_defeated = 19;
        let up = p.record_kill(10).unwrap();
        assert_eq!(up.level, 3);
        assert!(up.reached_max);

        // Further kills never level past the cap
        for _ in 0..200 {
            assert!(p.record_kill(10).is_none());
        }
        assert_eq!(p.level, 3);
    }

    #[test]
    fn test_reset_keeps_cap() {
        let mut p = Progression::new(6);
        p.record_kill(30);
        p.reset();
        assert_eq!(p, Progression::new(6));
    }

    proptest! {
        #[test]
        fn prop_level_monotonic_and_capped(kills in 0usize..600, cap in 1u32..12) {
            let mut p = Progression::new(cap);
            let mut last_level = p.level;
            let mut last_score = p.score;
            for _ in 0..kills {
                p.record_kill(10);
                prop_assert!(p.level >= last_level);
                prop_assert!(p.level <= cap.max(1));
                prop_assert!(p.score > last_score);
                prop_assert!(p.level == cap || p.enemies_defeated < p.next_level_at);
                last_level = p.level;
                last_score = p.score;
            }
        }
    }
}
