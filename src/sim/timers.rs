//! Power-up and invulnerability countdowns
//!
//! Each effect is an [`EffectTimer`]; the "is this effect on" flag is derived
//! from the remaining time and is never stored separately.

use serde::{Deserialize, Serialize};

use super::entity::PowerUpKind;
use crate::consts::SPEED_BOOST_MULTIPLIER;

/// A single countdown in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTimer {
    remaining: f32,
}

impl EffectTimer {
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Set to the full grant, replacing whatever was left
    pub fn grant(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Count down; returns true only on the tick the timer runs out
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }
}

/// All timed effects on the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub shield: EffectTimer,
    pub multi_shot: EffectTimer,
    pub speed_boost: EffectTimer,
    pub invulnerability: EffectTimer,
}

impl Effects {
    fn timer_mut(&mut self, kind: PowerUpKind) -> &mut EffectTimer {
        match kind {
            PowerUpKind::MultiShot => &mut self.multi_shot,
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::SpeedBoost => &mut self.speed_boost,
        }
    }

    pub fn shield(&self) -> bool {
        self.shield.is_active()
    }

    pub fn multi_shot(&self) -> bool {
        self.multi_shot.is_active()
    }

    pub fn invulnerable(&self) -> bool {
        self.invulnerability.is_active()
    }

    /// Player speed factor (2x while boosted)
    pub fn speed_multiplier(&self) -> f32 {
        if self.speed_boost.is_active() {
            SPEED_BOOST_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Start or refresh a power-up at its full duration
    pub fn activate(&mut self, kind: PowerUpKind) {
        self.timer_mut(kind).grant(kind.duration());
    }

    /// Shield soaked a hit: drop it and grant a short grace window
    pub fn consume_shield(&mut self, grace: f32) {
        self.shield.clear();
        self.invulnerability.grant(grace);
    }

    /// Advance every countdown, returning the power-ups that ran out this tick
    pub fn tick(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let expired = PowerUpKind::ALL
            .into_iter()
            .filter(|kind| self.timer_mut(*kind).tick(dt))
            .collect();
        self.invulnerability.tick(dt);
        expired
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
