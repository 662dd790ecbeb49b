//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering, audio or platform dependencies; those are reached through
//!   the event queue on `GameState`

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod events;
pub mod mask;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod rect;
pub mod sprite;
pub mod stars;
pub mod state;
pub mod tick;

pub use enemy::{
    Cruiser, CruiserPhase, Enemy, EnemyContext, Fighter, Frigate, RepositionLeg,
};
pub use entity::{Body, EntityIds};
pub use events::{ExplosionSize, GameEvent};
pub use mask::Mask;
pub use player::Player;
pub use powerup::PowerUp;
pub use projectile::{Projectile, ProjectileKind, Side};
pub use rect::Rect;
pub use sprite::Sprite;
pub use stars::{Star, StarField};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
