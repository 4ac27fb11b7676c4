//! Entity records stored in the simulation pools
//!
//! Every spatial entity carries an [`Aabb`]. Entities are plain values: pools
//! own them, nothing refers to them by identity.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::box_center;
use crate::consts::*;

/// Axis-aligned box: lower-left corner plus size (y-up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(2.0 * margin),
        }
    }
}

/// RGB color for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const FIRE: Rgb = Rgb(1.0, 0.5, 0.0);
    pub const ROCKET_BLAST: Rgb = Rgb(1.0, 0.3, 0.0);
    pub const RED: Rgb = Rgb(1.0, 0.0, 0.0);
    pub const HULL_SPARKS: Rgb = Rgb(1.0, 0.2, 0.2);
    pub const WRECKAGE: Rgb = Rgb(1.0, 0.5, 0.2);
    pub const PICKUP: Rgb = Rgb(0.5, 1.0, 1.0);
}

/// A player bullet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub bounds: Aabb,
    /// Radians from straight up (positive leans right)
    pub angle: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, BULLET_WIDTH, BULLET_HEIGHT),
            angle,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.angle.sin(), self.angle.cos()) * BULLET_SPEED
    }

    /// Off the top edge or either side
    pub fn out_of_bounds(&self) -> bool {
        let b = &self.bounds;
        b.bottom() > PLAYFIELD_HEIGHT || b.left() < 0.0 || b.left() > PLAYFIELD_WIDTH
    }
}

/// A player rocket (area damage, ignores health)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub bounds: Aabb,
    /// Simulation time the rocket was fired (drives flame animation)
    pub spawned_at: f32,
}

impl Rocket {
    pub fn new(x: f32, y: f32, spawned_at: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, ROCKET_WIDTH, ROCKET_HEIGHT),
            spawned_at,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(0.0, ROCKET_SPEED)
    }

    /// Hit region including the blast margin
    pub fn blast_region(&self) -> Aabb {
        self.bounds.expanded(BLAST_MARGIN)
    }

    pub fn out_of_bounds(&self) -> bool {
        self.bounds.bottom() > PLAYFIELD_HEIGHT
    }
}

/// Enemy tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    /// Weaves side to side
    Advanced,
    /// Weaves faster and wider
    Elite,
}

impl EnemyKind {
    /// 0 for Basic, 1 for Advanced, 2 for Elite
    pub fn tier(&self) -> u8 {
        match self {
            EnemyKind::Basic => 0,
            EnemyKind::Advanced => 1,
            EnemyKind::Elite => 2,
        }
    }

    pub fn max_health(&self) -> u8 {
        1 + self.tier()
    }

    pub fn speed_multiplier(&self) -> f32 {
        1.0 + 0.2 * self.tier() as f32
    }

    /// Score for a bullet kill
    pub fn bullet_reward(&self) -> u64 {
        10 * (self.tier() as u64 + 1)
    }

    /// Score for a rocket kill
    pub fn rocket_reward(&self) -> u64 {
        30 * (self.tier() as u64 + 1)
    }
}

/// A descending enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub bounds: Aabb,
    pub kind: EnemyKind,
    pub health: u8,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        Self::with_health(x, y, kind, kind.max_health())
    }

    /// Enemy with explicit health; a zero value is clamped to 1
    pub fn with_health(x: f32, y: f32, kind: EnemyKind, health: u8) -> Self {
        Self {
            bounds: Aabb::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            kind,
            health: health.max(1),
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.kind.speed_multiplier()
    }

    /// Velocity for this tick: descent scaled by level plus the tier's weave
    pub fn velocity(&self, level: u32, time: f32) -> Vec2 {
        let descent = ENEMY_BASE_SPEED * self.speed_multiplier()
            * (1.0 + level as f32 * ENEMY_LEVEL_SPEEDUP);
        let y = self.bounds.pos.y;
        let weave = match self.kind {
            EnemyKind::Basic => 0.0,
            EnemyKind::Advanced => (time * 2.0 + y * 0.01).sin() * 2.0,
            EnemyKind::Elite => (time * 3.0 + y * 0.02).sin() * 3.0,
        };
        Vec2::new(weave * ENEMY_WEAVE_SCALE, -descent)
    }

    /// Apply one point of damage, returns true if this killed the enemy
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    /// Crossed the bottom (base) edge
    pub fn breached_base(&self) -> bool {
        self.bounds.bottom() < 0.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    MultiShot,
    Shield,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::MultiShot,
        PowerUpKind::Shield,
        PowerUpKind::SpeedBoost,
    ];

    /// Full grant duration in seconds
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::MultiShot => MULTI_SHOT_DURATION,
            PowerUpKind::Shield => SHIELD_DURATION,
            PowerUpKind::SpeedBoost => SPEED_BOOST_DURATION,
        }
    }

    pub fn activated_message(&self) -> &'static str {
        match self {
            PowerUpKind::MultiShot => "Multi-shot activated!",
            PowerUpKind::Shield => "Shield activated!",
            PowerUpKind::SpeedBoost => "Speed boost activated!",
        }
    }

    pub fn expired_message(&self) -> &'static str {
        match self {
            PowerUpKind::MultiShot => "Multi-shot deactivated",
            PowerUpKind::Shield => "Shield deactivated",
            PowerUpKind::SpeedBoost => "Speed boost deactivated",
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub bounds: Aabb,
    pub kind: PowerUpKind,
    /// Simulation time of the drop (drives bob/rotation in the renderer)
    pub spawned_at: f32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind, spawned_at: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            spawned_at,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(0.0, -POWER_UP_FALL_SPEED)
    }

    pub fn out_of_bounds(&self) -> bool {
        self.bounds.bottom() < 0.0
    }
}

/// A cosmetic spark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    /// Random spark at `origin` using the burst table
    pub fn random(rng: &mut impl Rng, origin: Vec2, color: Rgb) -> Self {
        let angle = rng.random_range(0..628) as f32 / 100.0;
        let speed = 1.0 + rng.random_range(0..200) as f32 / 100.0;
        let life = 0.5 + rng.random_range(0..100) as f32 / 100.0;
        let size = 1.0 + rng.random_range(0..30) as f32 / 10.0;
        Self {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed * PARTICLE_SPEED_SCALE,
            life,
            max_life: life,
            size,
            color,
        }
    }

    /// Fade factor: 1.0 when fresh, 0.0 when spent
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).max(0.0)
    }

    /// Move and age; returns false once spent
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.life -= dt;
        self.life > 0.0
    }
}

/// A growing, fading blast ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub size: f32,
    pub life: f32,
    pub color: Rgb,
}

impl Explosion {
    pub fn new(pos: Vec2, size: f32, color: Rgb) -> Self {
        Self {
            pos,
            size,
            life: EXPLOSION_LIFETIME,
            color,
        }
    }

    pub fn alpha(&self) -> f32 {
        (self.life / EXPLOSION_LIFETIME).max(0.0)
    }

    /// Grow and fade; returns false once invisible
    pub fn update(&mut self, dt: f32) -> bool {
        self.size += EXPLOSION_GROWTH * dt;
        self.life -= dt;
        self.alpha() > 0.0
    }
}
