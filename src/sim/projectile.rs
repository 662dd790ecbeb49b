//! Bullets, missiles and beams

use glam::Vec2;

use super::entity::Body;
use super::events::GameEvent;
use super::rect::Rect;
use super::sprite::Sprite;

/// Who fired the projectile; the collision passes only pair a projectile
/// with the opposing side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

/// Projectile flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Player cannon round
    PlayerShot,
    /// Aimed fighter shot or cruiser side-shot
    EnemyShot,
    /// Frigate missile, falls straight down
    Missile,
    /// Cruiser beam pulse, passes through lesser enemies
    Beam,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    pub owner: Side,
    pub kind: ProjectileKind,
    /// Id of the ship that fired it, when the tick needs to recall its volley
    pub source: Option<u32>,
    /// Ticks alive, drives the enemy-shot flicker
    age: u32,
}

impl Projectile {
    /// Create a projectile centred on `center` moving at `vel` per tick
    pub fn new(id: u32, kind: ProjectileKind, center: Vec2, vel: Vec2) -> Self {
        let owner = match kind {
            ProjectileKind::PlayerShot => Side::Player,
            _ => Side::Enemy,
        };
        let size = Self::sprite_for(kind, 0).size();
        let mut body = Body::centered(id, center, size);
        body.vel = vel;
        Self {
            body,
            owner,
            kind,
            source: None,
            age: 0,
        }
    }

    /// Tag the projectile with the id of the ship that fired it
    pub fn with_source(mut self, id: u32) -> Self {
        self.source = Some(id);
        self
    }

    fn sprite_for(kind: ProjectileKind, age: u32) -> Sprite {
        match kind {
            ProjectileKind::PlayerShot => Sprite::PlayerShot,
            ProjectileKind::EnemyShot if age % 2 == 0 => Sprite::EnemyShotA,
            ProjectileKind::EnemyShot => Sprite::EnemyShotB,
            ProjectileKind::Missile => Sprite::Missile,
            ProjectileKind::Beam => Sprite::Beam,
        }
    }

    pub fn sprite(&self) -> Sprite {
        Self::sprite_for(self.kind, self.age)
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_beam(&self) -> bool {
        self.kind == ProjectileKind::Beam
    }

    /// Advance one tick; leaving the play area kills the projectile
    pub fn update(&mut self) {
        self.age = self.age.wrapping_add(1);
        self.body.advance();
        self.body.kill_if_exited();
    }

    /// Impact notification for the renderer; the projectile itself is unchanged
    pub fn on_hit(&self) -> GameEvent {
        GameEvent::HitFlash { rect: self.rect() }
    }
}
