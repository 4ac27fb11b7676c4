//! Demo-mode pilot
//!
//! Plays the game from a [`Snapshot`] the way the harness would relay a
//! human's input: held movement plus one-shot fire commands.

use std::cmp::Ordering;

use crate::sim::{GamePhase, Snapshot, TickInput};

/// Ticks between bullet volleys
const BULLET_COOLDOWN: u64 = 6;
/// Ticks between rockets
const ROCKET_COOLDOWN: u64 = 90;
/// Threats below this height get a rocket
const ROCKET_TRIGGER_HEIGHT: f32 = 250.0;
/// Horizontal slack before the pilot bothers moving
const DEADZONE: f32 = 4.0;

/// Simple tracking pilot
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    ticks: u64,
    last_bullet: Option<u64>,
    last_rocket: Option<u64>,
    auto_restart: bool,
}

impl Autopilot {
    pub fn new(auto_restart: bool) -> Self {
        Self {
            auto_restart,
            ..Self::default()
        }
    }

    fn ready(last: Option<u64>, now: u64, cooldown: u64) -> bool {
        last.is_none_or(|t| now.saturating_sub(t) >= cooldown)
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, snap: &Snapshot<'_>) -> TickInput {
        self.ticks += 1;

        if snap.phase == GamePhase::GameOver {
            return TickInput {
                restart: self.auto_restart,
                ..Default::default()
            };
        }

        let mut input = TickInput::default();
        let player_x = snap.player.center().x;

        // The lowest enemy is the most urgent one
        let threat = snap.enemies.iter().min_by(|a, b| {
            a.bounds
                .pos
                .y
                .partial_cmp(&b.bounds.pos.y)
                .unwrap_or(Ordering::Equal)
        });

        // With no pressing threat, go collect the nearest falling power-up
        let calm = threat.is_none_or(|e| e.bounds.pos.y > 2.0 * ROCKET_TRIGGER_HEIGHT);
        let pickup = snap
            .power_ups
            .iter()
            .filter(|_| calm)
            .min_by(|a, b| {
                let da = (a.bounds.center().x - player_x).abs();
                let db = (b.bounds.center().x - player_x).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            });

        let target_x = pickup
            .map(|p| p.bounds.center().x)
            .or_else(|| threat.map(|e| e.bounds.center().x));

        if let Some(target) = target_x {
            if target < player_x - DEADZONE {
                input.move_left = true;
            } else if target > player_x + DEADZONE {
                input.move_right = true;
            }
        }

        if let Some(enemy) = threat {
            if Self::ready(self.last_bullet, self.ticks, BULLET_COOLDOWN) {
                input.fire_bullet = true;
                self.last_bullet = Some(self.ticks);
            }
            if enemy.bounds.pos.y < ROCKET_TRIGGER_HEIGHT
                && Self::ready(self.last_rocket, self.ticks, ROCKET_COOLDOWN)
            {
                input.fire_rocket = true;
                self.last_rocket = Some(self.ticks);
            }
        }

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Enemy, EnemyKind, GameState};

    #[test]
    fn test_tracks_and_fires_at_threat() {
        let mut state = GameState::new(3);
        state.enemies.push(Enemy::new(700.0, 500.0, EnemyKind::Basic));
        let mut pilot = Autopilot::new(false);

        let input = pilot.next_input(&state.snapshot());
        assert!(input.move_right);
        assert!(input.fire_bullet);
        assert!(!input.fire_rocket);

        // Cooldown holds the next volley
        let input = pilot.next_input(&state.snapshot());
        assert!(!input.fire_bullet);
    }

    #[test]
    fn test_rockets_close_threats() {
        let mut state = GameState::new(3);
        state.enemies.push(Enemy::new(380.0, 150.0, EnemyKind::Elite));
        let mut pilot = Autopilot::new(false);
        let input = pilot.next_input(&state.snapshot());
        assert!(input.fire_rocket);
    }

    #[test]
    fn test_restarts_only_when_asked() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::GameOver;

        let input = Autopilot::new(true).next_input(&state.snapshot());
        assert!(input.restart);
        let input = Autopilot::new(false).next_input(&state.snapshot());
        assert!(!input.restart);
    }

    #[test]
    fn test_demo_run_scores() {
        let mut state = GameState::new(2024);
        let mut pilot = Autopilot::new(true);
        let mut best = 0;
        for _ in 0..3_000 {
            let input = pilot.next_input(&state.snapshot());
            state.advance(SIM_DT, &input);
            best = best.max(state.progression.score);
        }
        assert!(state.time_ticks > 0);
        assert!(best > 0);
    }
}
