//! Hostile ships
//!
//! Fighter, Frigate and Cruiser share the `Enemy` capability surface. The tick
//! drives each one through `update` and `decide`, and the collision passes
//! work on `&mut dyn Enemy` without caring which variant they hold.
//!
//! Projectiles an enemy fires go into its own outbox. The tick drains every
//! outbox into the enemy-bullet collection it owns, so no bullet list is
//! shared between ships.

pub mod cruiser;
pub mod fighter;
pub mod frigate;

pub use cruiser::{Cruiser, CruiserPhase, RepositionLeg};
pub use fighter::Fighter;
pub use frigate::Frigate;

use rand_pcg::Pcg32;

use super::entity::{Body, EntityIds};
use super::events::GameEvent;
use super::mask::Mask;
use super::projectile::Projectile;
use super::rect::Rect;
use super::sprite::Sprite;

/// What an enemy may read and produce during its turn
pub struct EnemyContext<'a> {
    /// Player bounding box, `None` while the player is down
    pub target: Option<Rect>,
    pub ids: &'a mut EntityIds,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
}

pub trait Enemy {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn health(&self) -> i32;

    fn set_health(&mut self, health: i32);

    /// Flag the hit so the next update shows one flash frame
    fn mark_hit(&mut self);

    /// Frame the renderer should draw and collisions should test
    fn sprite(&self) -> Sprite;

    /// Move and run the variant's own state machine
    fn update(&mut self, ctx: &mut EnemyContext);

    /// Attack decision; may queue projectiles in the outbox
    fn decide(&mut self, _ctx: &mut EnemyContext) {}

    /// Destruction effects; marks the body dead
    fn die(&mut self, ctx: &mut EnemyContext);

    /// Take everything fired since the last drain
    fn drain_fired(&mut self) -> Vec<Projectile>;

    /// Death threshold
    fn is_destroyed(&self) -> bool {
        self.health() <= 0
    }

    fn damage(&mut self, amount: i32) {
        self.set_health(self.health() - amount);
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn rect(&self) -> Rect {
        self.body().rect()
    }

    fn mask(&self) -> &'static Mask {
        self.sprite().mask()
    }

    /// Cosmetic rotation in degrees
    fn rotation(&self) -> f32 {
        0.0
    }
}
