//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed pass order, mark-then-sweep removal
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod notify;
pub mod pool;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::overlaps;
pub use entity::{
    Aabb, Bullet, Enemy, EnemyKind, Explosion, Particle, PowerUp, PowerUpKind, Rgb, Rocket,
};
pub use notify::Notifications;
pub use pool::Pool;
pub use progression::{LevelUp, Progression, kill_threshold};
pub use spawn::{SpawnController, choose_enemy_kind, spawn_interval};
pub use state::{GamePhase, GameState, Player, Snapshot};
pub use tick::{TickInput, tick};
pub use timers::{EffectTimer, Effects};
