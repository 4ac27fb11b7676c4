//! Skyguard - a vertical arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, timers, spawning, progression)
//! - `config`: Data-driven tunables loaded from JSON
//! - `autopilot`: Demo-mode input generator for the headless harness
//! - `error`: Errors raised at the fallible edges (config loading)

pub mod autopilot;
pub mod config;
pub mod error;
pub mod sim;

pub use config::SimConfig;
pub use error::ConfigError;

/// Game configuration constants
///
/// Speeds are in playfield units per second. The playfield is y-up: enemies
/// enter at the top edge and the player's base is the bottom edge.
pub mod consts {
    /// Fixed simulation timestep (~60 Hz)
    pub const SIM_DT: f32 = 0.016;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player craft
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_START_X: f32 = PLAYFIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 312.5;
    pub const STARTING_LIVES: u8 = 3;

    /// Projectiles
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 750.0;
    /// Angular offset of the outer bullets in a multi-shot volley (radians)
    pub const SPREAD_ANGLE: f32 = 0.2;
    pub const ROCKET_WIDTH: f32 = 12.0;
    pub const ROCKET_HEIGHT: f32 = 30.0;
    pub const ROCKET_SPEED: f32 = 437.5;
    /// Rocket hit-test expansion on every side
    pub const BLAST_MARGIN: f32 = 10.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 20.0;
    pub const ENEMY_BASE_SPEED: f32 = 125.0;
    /// Extra descent speed per level (fraction of base)
    pub const ENEMY_LEVEL_SPEEDUP: f32 = 0.1;
    /// Converts the per-frame weave offsets of advanced tiers to per-second
    pub const ENEMY_WEAVE_SCALE: f32 = 62.5;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_FALL_SPEED: f32 = 62.5;
    /// 1-in-N drop chance for a bullet kill (rockets use N/2)
    pub const POWER_UP_CHANCE: u32 = 15;
    pub const SHIELD_DURATION: f32 = 15.0;
    pub const MULTI_SHOT_DURATION: f32 = 10.0;
    pub const SPEED_BOOST_DURATION: f32 = 8.0;
    pub const SPEED_BOOST_MULTIPLIER: f32 = 2.0;

    /// Invulnerability windows (seconds)
    pub const SHIELD_ABSORB_INVULNERABILITY: f32 = 1.0;
    pub const HIT_INVULNERABILITY: f32 = 3.0;
    pub const RESTART_INVULNERABILITY: f32 = 3.0;

    /// Progression
    pub const MAX_LEVEL: u32 = 10;

    /// Spawning (seconds)
    pub const FIRST_SPAWN_DELAY: f32 = 1.0;
    pub const SPAWN_INTERVAL_BASE: f32 = 1.5;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.1;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.3;

    /// Cosmetic effects
    pub const EXPLOSION_LIFETIME: f32 = 0.4;
    pub const EXPLOSION_GROWTH: f32 = 125.0;
    /// Converts the per-frame particle speeds of the burst table to per-second
    pub const PARTICLE_SPEED_SCALE: f32 = 62.5;

    /// Maximum notifications kept for the HUD
    pub const MAX_NOTIFICATIONS: usize = 4;
}

/// Center of a box given its lower-left corner and size
#[inline]
pub fn box_center(pos: glam::Vec2, size: glam::Vec2) -> glam::Vec2 {
    pos + size * 0.5
}
