//! Frigate: crosses the screen left to right and drops a missile when it
//! passes directly over the player

use glam::Vec2;

use super::{Enemy, EnemyContext};
use crate::audio::SoundEffect;
use crate::consts::SCREEN_WIDTH;
use crate::sim::entity::Body;
use crate::sim::events::{ExplosionSize, GameEvent};
use crate::sim::projectile::{Projectile, ProjectileKind};
use crate::sim::sprite::Sprite;

pub const FRIGATE_HEALTH: i32 = 50;
pub const FRIGATE_SPEED: f32 = 1.0;
pub const MISSILE_SPEED: f32 = 4.0;
/// Rows a frigate can cruise along (top edge)
pub const SPAWN_ROWS: [f32; 6] = [50.0, 100.0, 150.0, 200.0, 250.0, 300.0];

#[derive(Debug, Clone)]
pub struct Frigate {
    pub body: Body,
    pub health: i32,
    pub is_hit: bool,
    pub flashing: bool,
    fired: Vec<Projectile>,
}

impl Frigate {
    /// New frigate parked just off the left edge with its top at `top`
    pub fn new(id: u32, top: f32) -> Self {
        let mut body = Body::new(id, Vec2::new(0.0, top), Sprite::Frigate.size());
        body.set_right(0.0);
        body.vel = Vec2::new(FRIGATE_SPEED, 0.0);
        Self {
            body,
            health: FRIGATE_HEALTH,
            is_hit: false,
            flashing: false,
            fired: Vec::new(),
        }
    }

    fn launch_missile(&mut self, ctx: &mut EnemyContext) {
        let r = self.body.rect();
        let missile = Projectile::new(
            ctx.ids.next_id(),
            ProjectileKind::Missile,
            Vec2::new(r.center_x() as f32, r.bottom() as f32),
            Vec2::new(0.0, MISSILE_SPEED),
        );
        self.fired.push(missile);
    }
}

impl Enemy for Frigate {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }

    fn mark_hit(&mut self) {
        self.is_hit = true;
    }

    fn sprite(&self) -> Sprite {
        if self.flashing {
            Sprite::FrigateHit
        } else {
            Sprite::Frigate
        }
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.flashing = self.is_hit;
        self.is_hit = false;

        if self.is_destroyed() {
            self.die(ctx);
            return;
        }

        self.body.advance();
        // Escaping past the right edge costs the player nothing
        if self.body.rect().left() >= SCREEN_WIDTH as i32 {
            self.body.kill();
        }
    }

    /// Exact centre alignment only; a narrow window on purpose
    fn decide(&mut self, ctx: &mut EnemyContext) {
        let Some(target) = ctx.target else { return };
        if self.body.rect().center_x() == target.center_x() {
            self.launch_missile(ctx);
        }
    }

    fn die(&mut self, ctx: &mut EnemyContext) {
        if !self.body.alive {
            return;
        }
        self.body.kill();
        ctx.events.push(GameEvent::Sound(SoundEffect::Explode));
        ctx.events.push(GameEvent::Explosion {
            pos: self.body.center(),
            size: ExplosionSize::Large,
        });
    }

    fn drain_fired(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.fired)
    }
}
