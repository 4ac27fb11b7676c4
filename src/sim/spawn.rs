//! Enemy spawn cadence and type selection

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, EnemyKind, PowerUpKind};
use crate::consts::*;

/// Seconds between spawns at a given level (shrinks with level, floored)
pub fn spawn_interval(level: u32) -> f32 {
    (SPAWN_INTERVAL_BASE - SPAWN_INTERVAL_STEP * level as f32).max(SPAWN_INTERVAL_MIN)
}

/// Pick an enemy tier from a draw in [0, 100)
///
/// Both checks test the same draw; when both match, Elite wins.
pub fn choose_enemy_kind(level: u32, roll: u32) -> EnemyKind {
    let mut kind = EnemyKind::Basic;
    if level >= 3 && roll < 20 + level * 5 {
        kind = EnemyKind::Advanced;
    }
    if level >= 5 && roll < 10 + level * 2 {
        kind = EnemyKind::Elite;
    }
    kind
}

/// 1-in-`chance` power-up drop; the kind is uniform over all three
pub fn roll_power_up(rng: &mut impl Rng, chance: u32) -> Option<PowerUpKind> {
    if rng.random_range(0..chance.max(1)) != 0 {
        return None;
    }
    Some(PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())])
}

/// Periodic enemy emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnController {
    /// Seconds until the next enemy
    until_next: f32,
}

impl Default for SpawnController {
    fn default() -> Self {
        Self {
            until_next: FIRST_SPAWN_DELAY,
        }
    }
}

impl SpawnController {
    pub fn until_next(&self) -> f32 {
        self.until_next
    }

    /// Restart the cadence as for a fresh game
    pub fn rearm(&mut self) {
        self.until_next = FIRST_SPAWN_DELAY;
    }

    /// Advance the cadence by `dt`, returning the enemies due this tick
    ///
    /// Each firing re-arms with the interval for the current level. A long
    /// tick can emit more than one enemy.
    pub fn tick(&mut self, dt: f32, level: u32, rng: &mut impl Rng) -> Vec<Enemy> {
        let mut spawned = Vec::new();
        self.until_next -= dt;
        while self.until_next <= 0.0 {
            spawned.push(create_enemy(level, rng));
            self.until_next += spawn_interval(level);
        }
        spawned
    }
}

/// One enemy on the top edge at a random column
pub fn create_enemy(level: u32, rng: &mut impl Rng) -> Enemy {
    let columns = (PLAYFIELD_WIDTH - ENEMY_WIDTH) as u32;
    let x = rng.random_range(0..columns) as f32;
    let kind = choose_enemy_kind(level, rng.random_range(0..100));
    log::trace!("Spawning {:?} enemy at x={}", kind, x);
    Enemy::new(x, PLAYFIELD_HEIGHT, kind)
}
