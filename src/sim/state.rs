//! Game state and core simulation types
//!
//! [`GameState`] owns every mutable resource of a session: the entity pools,
//! timers, progression, lives and the RNG. Constructing one starts a new game.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{
    Aabb, Bullet, Enemy, Explosion, Particle, PowerUp, PowerUpKind, Rgb, Rocket,
};
use super::notify::Notifications;
use super::pool::Pool;
use super::progression::{LevelUp, Progression};
use super::spawn::{SpawnController, roll_power_up};
use super::tick::{TickInput, tick};
use super::timers::Effects;
use crate::config::SimConfig;
use crate::consts::*;
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// The player's craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            bounds: Aabb::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

impl Player {
    /// Top-center of the craft, where projectiles leave
    pub fn nose(&self) -> Vec2 {
        Vec2::new(
            self.bounds.pos.x + self.bounds.size.x / 2.0,
            self.bounds.top(),
        )
    }

    /// Keep the craft fully inside the playfield
    pub fn clamp_to_playfield(&mut self) {
        let max = Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT) - self.bounds.size;
        self.bounds.pos = self.bounds.pos.clamp(Vec2::ZERO, max);
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tunables this session was created with
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(super) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub effects: Effects,
    pub progression: Progression,
    pub lives: u8,
    pub bullets: Pool<Bullet>,
    pub rockets: Pool<Rocket>,
    pub enemies: Pool<Enemy>,
    pub power_ups: Pool<PowerUp>,
    pub particles: Pool<Particle>,
    pub explosions: Pool<Explosion>,
    pub spawner: SpawnController,
    pub notifications: Notifications,
    /// Simulation clock in seconds
    pub time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    quit_requested: bool,
}

impl GameState {
    /// Create a new game with default tunables and the given seed
    pub fn new(seed: u64) -> Self {
        Self::from_valid_config(SimConfig::with_seed(seed))
    }

    /// Create a new game from a config (a missing seed means 0)
    ///
    /// Rejects configs that fail [`SimConfig::validate`].
    pub fn with_config(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SimConfig) -> Self {
        let seed = config.seed.unwrap_or_default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player: Player::default(),
            effects: Effects::default(),
            progression: Progression::new(config.max_level),
            lives: config.starting_lives,
            bullets: Pool::new(),
            rockets: Pool::new(),
            enemies: Pool::new(),
            power_ups: Pool::new(),
            particles: Pool::new(),
            explosions: Pool::new(),
            spawner: SpawnController::default(),
            notifications: Notifications::default(),
            time: 0.0,
            time_ticks: 0,
            quit_requested: false,
            config,
        }
    }

    /// Advance the game by one fixed timestep
    pub fn advance(&mut self, dt: f32, input: &TickInput) {
        tick(self, input, dt);
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            player: self.player.bounds,
            shield: self.effects.shield(),
            multi_shot: self.effects.multi_shot(),
            speed_boost: self.effects.speed_multiplier() > 1.0,
            invulnerable: self.effects.invulnerable(),
            effects: &self.effects,
            score: self.progression.score,
            level: self.progression.level,
            max_level: self.progression.max_level,
            lives: self.lives,
            enemies_defeated: self.progression.enemies_defeated,
            next_level_at: self.progression.next_level_at,
            time: self.time,
            bullets: self.bullets.as_slice(),
            rockets: self.rockets.as_slice(),
            enemies: self.enemies.as_slice(),
            power_ups: self.power_ups.as_slice(),
            particles: self.particles.as_slice(),
            explosions: self.explosions.as_slice(),
            notifications: &self.notifications,
        }
    }

    /// Recent status messages, newest first
    pub fn notifications(&self) -> impl Iterator<Item = &str> {
        self.notifications.iter()
    }

    /// Whether a quit command has been received
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(super) fn request_quit(&mut self) {
        log::info!("Quit requested at tick {}", self.time_ticks);
        self.quit_requested = true;
    }

    /// Start a new game if the current one is over; no-op while playing
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.reset();
        true
    }

    /// Return every session value to its new-game state
    ///
    /// The RNG keeps its stream; it is seeded once per process run.
    pub fn reset(&mut self) {
        self.bullets.clear();
        self.rockets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.explosions.clear();
        self.notifications.clear();

        self.player = Player::default();
        self.effects.reset();
        self.effects
            .invulnerability
            .grant(self.config.restart_invulnerability);
        self.progression.reset();
        self.lives = self.config.starting_lives;
        self.spawner.rearm();
        self.phase = GamePhase::Playing;

        log::info!("New game started (seed {})", self.seed);
        self.notifications.push("Game started! Good luck!");
    }

    /// Spawn an explosion plus a particle burst at `center`
    pub(super) fn blast(
        &mut self,
        center: Vec2,
        size: f32,
        color: Rgb,
        particle_count: usize,
        particle_color: Rgb,
    ) {
        self.explosions.push(Explosion::new(center, size, color));
        self.burst(center, particle_count, particle_color);
    }

    /// Emit `count` random sparks at `origin`
    pub(super) fn burst(&mut self, origin: Vec2, count: usize, color: Rgb) {
        for _ in 0..count {
            let particle = Particle::random(&mut self.rng, origin, color);
            self.particles.push(particle);
        }
    }

    /// Roll a 1-in-`chance` drop at `pos`
    pub(super) fn maybe_drop_power_up(&mut self, pos: Vec2, chance: u32) {
        if let Some(kind) = roll_power_up(&mut self.rng, chance) {
            log::debug!("Power-up {:?} dropped at ({}, {})", kind, pos.x, pos.y);
            self.power_ups
                .push(PowerUp::new(pos.x, pos.y, kind, self.time));
        }
    }

    /// Score a kill and apply any resulting level-up
    pub(super) fn record_kill(&mut self, points: u64) {
        if let Some(up) = self.progression.record_kill(points) {
            self.apply_level_up(up);
        }
    }

    fn apply_level_up(&mut self, up: LevelUp) {
        log::info!("Level up: {} (score {})", up.level, self.progression.score);
        self.notifications.push(format!("LEVEL {}!", up.level));
        if up.extra_life {
            self.lives = self.lives.saturating_add(1);
            self.notifications.push("Extra life awarded!");
        }
        if up.reached_max {
            self.notifications.push("MAXIMUM LEVEL REACHED!");
        }
    }

    /// Grant a collected power-up
    pub(super) fn activate_power_up(&mut self, kind: PowerUpKind) {
        self.effects.activate(kind);
        self.notifications.push(kind.activated_message());
    }

    /// Take one life; returns true if that ended the game
    pub(super) fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over at level {} with score {}",
                self.progression.level,
                self.progression.score
            );
            return true;
        }
        false
    }
}

/// Borrowed, read-only view of a [`GameState`] after a tick
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub player: Aabb,
    pub shield: bool,
    pub multi_shot: bool,
    pub speed_boost: bool,
    pub invulnerable: bool,
    /// Remaining time on each effect
    pub effects: &'a Effects,
    pub score: u64,
    pub level: u32,
    pub max_level: u32,
    pub lives: u8,
    pub enemies_defeated: u32,
    pub next_level_at: u32,
    pub time: f32,
    pub bullets: &'a [Bullet],
    pub rockets: &'a [Rocket],
    pub enemies: &'a [Enemy],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub explosions: &'a [Explosion],
    pub notifications: &'a Notifications,
}
