//! Collision detection and resolution
//!
//! Overlap is a plain AABB separating-axis test. Resolution runs as four
//! passes in a fixed order; each pass marks what it consumes and sweeps its
//! pools when it finishes, so later passes never see a removed entity.

use super::entity::{Aabb, Enemy, Rgb};
use super::state::GameState;
use crate::consts::{HIT_INVULNERABILITY, SHIELD_ABSORB_INVULNERABILITY};

/// AABB overlap, touching edges count as overlapping
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    !(a.right() < b.left()
        || a.left() > b.right()
        || a.top() < b.bottom()
        || a.bottom() > b.top())
}

/// Which weapon finished an enemy (drives rewards and effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weapon {
    Bullet,
    Rocket,
}

/// Explosion, burst, drop roll, score and kill count for a destroyed enemy
fn destroy_enemy(state: &mut GameState, enemy: &Enemy, weapon: Weapon) {
    let center = enemy.bounds.center();
    let tier = enemy.kind.tier();
    let (points, chance) = match weapon {
        Weapon::Bullet => {
            let size = 30.0 + tier as f32 * 10.0;
            let count = 10 + tier as usize * 5;
            state.blast(center, size, Rgb::FIRE, count, Rgb::FIRE);
            (enemy.kind.bullet_reward(), state.config.power_up_chance)
        }
        Weapon::Rocket => {
            state.blast(center, 50.0, Rgb::FIRE, 20, Rgb::ROCKET_BLAST);
            (enemy.kind.rocket_reward(), state.config.power_up_chance / 2)
        }
    };
    state.maybe_drop_power_up(enemy.bounds.pos, chance);
    state.record_kill(points);
}

/// Pass 1: each bullet damages the first live enemy it overlaps
pub fn resolve_bullet_hits(state: &mut GameState) {
    for b in 0..state.bullets.len() {
        let bullet = state.bullets[b].bounds;
        let target = state
            .enemies
            .live_indices()
            .find(|&e| overlaps(&bullet, &state.enemies[e].bounds));
        let Some(e) = target else {
            continue;
        };

        state.bullets.mark(b);
        if state.enemies[e].take_hit() {
            state.enemies.mark(e);
            let enemy = state.enemies[e];
            destroy_enemy(state, &enemy, Weapon::Bullet);
        }
    }
    state.bullets.sweep();
    state.enemies.sweep();
}

/// Pass 2: each rocket's blast destroys the first live enemy it reaches
pub fn resolve_rocket_hits(state: &mut GameState) {
    for r in 0..state.rockets.len() {
        let blast = state.rockets[r].blast_region();
        let target = state
            .enemies
            .live_indices()
            .find(|&e| overlaps(&blast, &state.enemies[e].bounds));
        let Some(e) = target else {
            continue;
        };

        state.rockets.mark(r);
        state.enemies.mark(e);
        let enemy = state.enemies[e];
        destroy_enemy(state, &enemy, Weapon::Rocket);
    }
    state.rockets.sweep();
    state.enemies.sweep();
}

/// Pass 3: enemies ramming the player
///
/// Skipped while invulnerable. Returns true if the collision ended the game.
pub fn resolve_player_hits(state: &mut GameState) -> bool {
    if state.effects.invulnerable() {
        return false;
    }

    let player = state.player.bounds;
    for e in 0..state.enemies.len() {
        if state.enemies.is_marked(e) || !overlaps(&player, &state.enemies[e].bounds) {
            continue;
        }

        state.enemies.mark(e);
        let center = state.enemies[e].bounds.center();
        state.blast(center, 40.0, Rgb::RED, 15, Rgb::HULL_SPARKS);

        if state.effects.shield() {
            state.effects.consume_shield(SHIELD_ABSORB_INVULNERABILITY);
            state.notifications.push("Shield absorbed a collision!");
            continue;
        }

        if state.lose_life() {
            let center = player.center();
            state.blast(center, 80.0, Rgb::RED, 40, Rgb::WRECKAGE);
            state.enemies.sweep();
            return true;
        }
        state.notifications.push("Ship damaged! Life lost.");
        state.effects.invulnerability.grant(HIT_INVULNERABILITY);
    }
    state.enemies.sweep();
    false
}

/// Pass 4: collect every overlapping power-up
pub fn resolve_pickups(state: &mut GameState) {
    let player = state.player.bounds;
    for p in 0..state.power_ups.len() {
        let power_up = state.power_ups[p];
        if !overlaps(&player, &power_up.bounds) {
            continue;
        }
        state.power_ups.mark(p);
        log::debug!("Picked up {:?}", power_up.kind);
        state.activate_power_up(power_up.kind);
        state.burst(power_up.bounds.center(), 15, Rgb::PICKUP);
    }
    state.power_ups.sweep();
}
