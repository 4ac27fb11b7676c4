//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Order per
//! tick: commands, timers, movement, collision passes, player movement,
//! spawning.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    resolve_bullet_hits, resolve_pickups, resolve_player_hits, resolve_rocket_hits,
};
use super::entity::{Bullet, Rgb, Rocket};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input intents for a single tick (deterministic)
///
/// Movement flags are held state; the rest are one-shot commands consumed by
/// the tick they are handed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Fire a bullet (or a spread volley with multi-shot)
    pub fire_bullet: bool,
    pub fire_rocket: bool,
    /// Start a new game (only honoured after game over)
    pub restart: bool,
    pub quit: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        state.request_quit();
        return;
    }

    if input.restart {
        state.restart();
    }

    // Nothing moves while the game is over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.time += dt;

    fire_weapons(state, input);
    update_timers(state, dt);

    if advance_entities(state, dt) {
        return;
    }

    resolve_bullet_hits(state);
    resolve_rocket_hits(state);
    if resolve_player_hits(state) {
        return;
    }
    resolve_pickups(state);

    move_player(state, input, dt);

    let level = state.progression.level;
    for enemy in state.spawner.tick(dt, level, &mut state.rng) {
        state.enemies.push(enemy);
    }
}

fn fire_weapons(state: &mut GameState, input: &TickInput) {
    let nose = state.player.nose();

    if input.fire_bullet {
        let x = nose.x - BULLET_WIDTH / 2.0;
        if state.effects.multi_shot() {
            for angle in [0.0, -SPREAD_ANGLE, SPREAD_ANGLE] {
                state.bullets.push(Bullet::new(x, nose.y, angle));
            }
        } else {
            state.bullets.push(Bullet::new(x, nose.y, 0.0));
        }
    }

    if input.fire_rocket {
        let x = nose.x - ROCKET_WIDTH / 2.0;
        state.rockets.push(Rocket::new(x, nose.y, state.time));
        state.burst(nose, 10, Rgb::FIRE);
    }
}

fn update_timers(state: &mut GameState, dt: f32) {
    for kind in state.effects.tick(dt) {
        state.notifications.push(kind.expired_message());
    }
}

/// Move every pool by velocity * dt and drop what left the playfield
///
/// Returns true if an enemy breaching the base ended the game.
fn advance_entities(state: &mut GameState, dt: f32) -> bool {
    state.bullets.update_retain(|bullet| {
        bullet.bounds.pos += bullet.velocity() * dt;
        !bullet.out_of_bounds()
    });

    state.rockets.update_retain(|rocket| {
        rocket.bounds.pos += rocket.velocity() * dt;
        !rocket.out_of_bounds()
    });

    let level = state.progression.level;
    let time = state.time;
    let mut breaches = 0;
    state.enemies.update_retain(|enemy| {
        enemy.bounds.pos += enemy.velocity(level, time) * dt;
        let max_x = PLAYFIELD_WIDTH - enemy.bounds.size.x;
        enemy.bounds.pos.x = enemy.bounds.pos.x.clamp(0.0, max_x);
        if enemy.breached_base() {
            breaches += 1;
            return false;
        }
        true
    });

    state.power_ups.update_retain(|power_up| {
        power_up.bounds.pos += power_up.velocity() * dt;
        !power_up.out_of_bounds()
    });

    state.explosions.update_retain(|explosion| explosion.update(dt));
    state.particles.update_retain(|particle| particle.update(dt));

    for _ in 0..breaches {
        if state.lose_life() {
            return true;
        }
        state
            .notifications
            .push("Enemy reached the base! Life lost.");
    }
    false
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut dir = Vec2::ZERO;
    if input.move_left {
        dir.x -= 1.0;
    }
    if input.move_right {
        dir.x += 1.0;
    }
    if input.move_up {
        dir.y += 1.0;
    }
    if input.move_down {
        dir.y -= 1.0;
    }

    let speed = PLAYER_SPEED * state.effects.speed_multiplier();
    state.player.bounds.pos += dir * speed * dt;
    state.player.clamp_to_playfield();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Enemy, EnemyKind, PowerUp, PowerUpKind};

    fn fire() -> TickInput {
        TickInput {
            fire_bullet: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fire_single_and_spread() {
        let mut state = GameState::new(1);
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.bullets.len(), 1);

        state.effects.activate(PowerUpKind::MultiShot);
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.bullets.len(), 4);
        let angles: Vec<f32> = state.bullets.iter().skip(1).map(|b| b.angle).collect();
        assert_eq!(angles, vec![0.0, -SPREAD_ANGLE, SPREAD_ANGLE]);
    }

    #[test]
    fn test_projectiles_move_by_velocity_times_dt() {
        let mut state = GameState::new(1);
        tick(
            &mut state,
            &TickInput {
                fire_bullet: true,
                fire_rocket: true,
                ..Default::default()
            },
            SIM_DT,
        );
        let nose = state.player.nose();
        let bullet = state.bullets[0];
        assert!((bullet.bounds.pos.y - (nose.y + BULLET_SPEED * SIM_DT)).abs() < 1e-3);
        let rocket = state.rockets[0];
        assert!((rocket.bounds.pos.y - (nose.y + ROCKET_SPEED * SIM_DT)).abs() < 1e-3);
        // Exhaust burst
        assert_eq!(state.particles.len(), 10);
    }

    #[test]
    fn test_enemy_descends_before_collisions() {
        let mut state = GameState::new(1);
        state.enemies.push(Enemy::new(100.0, 400.0, EnemyKind::Basic));
        tick(&mut state, &TickInput::default(), SIM_DT);
        let expected = 400.0 - ENEMY_BASE_SPEED * 1.1 * SIM_DT;
        assert!((state.enemies[0].bounds.pos.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_bullets_leave_playfield() {
        let mut state = GameState::new(1);
        state.bullets.push(Bullet::new(100.0, PLAYFIELD_HEIGHT - 1.0, 0.0));
        state.bullets.push(Bullet::new(2.0, 300.0, -1.2));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_breach_costs_life() {
        let mut state = GameState::new(1);
        state.enemies.push(Enemy::new(600.0, 1.0, EnemyKind::Basic));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(
            state.notifications().next(),
            Some("Enemy reached the base! Life lost.")
        );
    }

    #[test]
    fn test_breach_on_last_life_ends_game() {
        let mut state = GameState::new(1);
        state.lives = 1;
        state.enemies.push(Enemy::new(600.0, 1.0, EnemyKind::Basic));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_power_up_expires_with_notification() {
        let mut state = GameState::new(1);
        state.effects.activate(PowerUpKind::SpeedBoost);
        let ticks = (SPEED_BOOST_DURATION / SIM_DT).ceil() as usize + 1;
        for _ in 0..ticks {
            // Keep the field empty so nothing else touches lives or the log
            state.enemies.clear();
            tick(&mut state, &TickInput::default(), SIM_DT);
            let snap = state.snapshot();
            assert_eq!(snap.speed_boost, snap.effects.speed_boost.remaining() > 0.0);
        }
        assert!(!state.snapshot().speed_boost);
        let expired = state
            .notifications()
            .filter(|m| *m == "Speed boost deactivated")
            .count();
        assert_eq!(expired, 1);
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = GameState::new(1);
        let start = state.player.bounds.pos;
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &right, SIM_DT);
        assert!((state.player.bounds.pos.x - (start.x + PLAYER_SPEED * SIM_DT)).abs() < 1e-3);

        let down = TickInput {
            move_down: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &down, SIM_DT);
        }
        assert_eq!(state.player.bounds.pos.y, 0.0);
    }

    #[test]
    fn test_speed_boost_doubles_movement() {
        let mut state = GameState::new(1);
        state.effects.activate(PowerUpKind::SpeedBoost);
        let start = state.player.bounds.pos.x;
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left, SIM_DT);
        let moved = start - state.player.bounds.pos.x;
        assert!((moved - 2.0 * PLAYER_SPEED * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn test_game_over_freezes_and_restart_recovers() {
        let mut state = GameState::new(1);
        state.lives = 1;
        let pos = state.player.bounds.pos;
        state.enemies.push(Enemy::new(pos.x, pos.y + 2.0, EnemyKind::Basic));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Fire and spawning are ignored while the game is over
        let ticks = state.time_ticks;
        for _ in 0..200 {
            tick(&mut state, &fire(), SIM_DT);
        }
        assert_eq!(state.time_ticks, ticks);
        assert!(state.bullets.is_empty());

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.progression.score, 0);
        assert!(state.enemies.is_empty());
        assert!(state.explosions.is_empty());
        assert!(state.effects.invulnerable());
    }

    #[test]
    fn test_restart_while_playing_is_noop() {
        let mut state = GameState::new(1);
        state.progression.score = 70;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.progression.score, 70);
    }

    #[test]
    fn test_quit_raises_flag() {
        let mut state = GameState::new(1);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &quit, SIM_DT);
        assert!(state.quit_requested());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_spawner_feeds_enemies() {
        let mut state = GameState::new(1);
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemies[0].bounds.pos.y <= PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_pickup_during_tick() {
        let mut state = GameState::new(1);
        let pos = state.player.bounds.pos;
        state
            .power_ups
            .push(PowerUp::new(pos.x + 10.0, pos.y + 5.0, PowerUpKind::Shield, 0.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.effects.shield());
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_scenario_level_up_through_kills() {
        let mut state = GameState::new(1);
        state.progression.enemies_defeated = 14;
        state.enemies.push(Enemy::new(100.0, 300.0, EnemyKind::Basic));
        state.bullets.push(Bullet::new(110.0, 290.0, 0.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.progression.level, 2);
        assert_eq!(state.progression.enemies_defeated, 0);
        assert_eq!(state.progression.next_level_at, 20);
        assert_eq!(state.lives, 4);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                move_left: true,
                fire_bullet: true,
                ..Default::default()
            },
            TickInput {
                fire_rocket: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                move_up: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..2_000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.progression, state2.progression);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.enemies.as_slice(), state2.enemies.as_slice());
        assert_eq!(state1.particles.len(), state2.particles.len());
    }
}
