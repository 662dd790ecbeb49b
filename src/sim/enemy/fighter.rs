//! Fighter: dives in, takes one aimed shot, then peels away
//!
//! ```text
//! descending --(player in window)--> fire once --> retreating --> off-screen
//! ```

use glam::Vec2;

use super::{Enemy, EnemyContext};
use crate::audio::SoundEffect;
use crate::consts::{SCREEN_HALF_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::entity::Body;
use crate::sim::events::{ExplosionSize, GameEvent};
use crate::sim::projectile::{Projectile, ProjectileKind};
use crate::sim::rect::Rect;
use crate::sim::sprite::Sprite;
use crate::{angle_between, velocity_from_angle};

pub const FIGHTER_HEALTH: i32 = 2;
/// Shots per firing decision
pub const BULLETS_MAX: usize = 1;
pub const FIGHTER_SHOT_SPEED: f32 = 5.0;
/// Columns a fighter can enter from
pub const SPAWN_LANES: [f32; 9] = [
    50.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 750.0,
];

/// Maximum gap from the fighter's bottom down to the player's top for a shot
const FIRE_WINDOW_Y: i32 = 300;
/// Maximum horizontal gap to the player for a shot
const FIRE_WINDOW_X: i32 = 500;
/// Fighters below this row no longer shoot
const FIRE_CEILING_Y: i32 = 900;
/// Past this row the dive slows down
const SLOW_ROW: i32 = 300;
const ENTRY_SPEED: f32 = 3.0;
const CRUISE_SPEED: f32 = 2.0;
const RETREAT_SPEED: f32 = 4.0;
/// Horizontal acceleration while retreating (px/tick²)
const DRIFT_STEP: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Fighter {
    pub body: Body,
    pub health: i32,
    pub is_hit: bool,
    /// Showing the hit frame this tick
    pub flashing: bool,
    has_shot: bool,
    /// Accumulated horizontal drift
    drift: f32,
    angle: f32,
    fired: Vec<Projectile>,
}

impl Fighter {
    /// New fighter entering at the top of the screen with its left edge at `x`
    pub fn new(id: u32, x: f32) -> Self {
        let mut body = Body::new(id, Vec2::new(x, 0.0), Sprite::Fighter.size());
        body.vel = Vec2::new(0.0, ENTRY_SPEED);
        Self {
            body,
            health: FIGHTER_HEALTH,
            is_hit: false,
            flashing: false,
            has_shot: false,
            drift: 0.0,
            angle: 0.0,
            fired: Vec::new(),
        }
    }

    pub fn has_shot(&self) -> bool {
        self.has_shot
    }

    /// Whether the player sits inside this fighter's firing window: below it,
    /// within reach on both axes
    pub fn in_firing_window(&self, target: &Rect) -> bool {
        let r = self.body.rect();
        !self.has_shot
            && (0..=FIRE_WINDOW_Y).contains(&(target.top() - r.bottom()))
            && (target.center_x() - r.center_x()).abs() <= FIRE_WINDOW_X
            && r.top() <= FIRE_CEILING_Y
    }

    fn shoot(&mut self, target: &Rect, ctx: &mut EnemyContext) {
        let r = self.body.rect();
        let muzzle = Vec2::new(r.center_x() as f32, r.bottom() as f32);
        let angle = angle_between(muzzle, target.center());
        for _ in 0..BULLETS_MAX {
            let vel = velocity_from_angle(angle, FIGHTER_SHOT_SPEED);
            self.fired.push(Projectile::new(
                ctx.ids.next_id(),
                ProjectileKind::EnemyShot,
                muzzle,
                vel,
            ));
            ctx.events.push(GameEvent::Sound(SoundEffect::EnemyShoot));
        }
        self.has_shot = true;
    }

    fn movement(&mut self) {
        let r = self.body.rect();
        if r.bottom() > SLOW_ROW {
            self.body.vel.y = CRUISE_SPEED;
        }
        if r.left() <= 0 || r.right() >= SCREEN_WIDTH as i32 {
            self.body.kill();
            return;
        }
        if self.has_shot {
            self.body.vel.y = RETREAT_SPEED;
            if r.center_x() as f32 > SCREEN_HALF_WIDTH {
                self.drift += DRIFT_STEP;
            } else {
                self.drift -= DRIFT_STEP;
            }
        }
        self.body.pos.x += self.body.vel.x + self.drift;
        self.body.pos.y += self.body.vel.y;
        self.angle += self.drift.to_degrees() / 180.0;
    }
}

impl Enemy for Fighter {
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
            Sprite::FighterHit
        } else {
            Sprite::Fighter
        }
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.flashing = self.is_hit;
        self.is_hit = false;

        if self.body.rect().top() >= SCREEN_HEIGHT as i32 {
            self.body.kill();
        } else {
            self.movement();
        }

        if self.is_destroyed() {
            self.die(ctx);
        }
    }

    fn decide(&mut self, ctx: &mut EnemyContext) {
        let Some(target) = ctx.target else { return };
        if self.in_firing_window(&target) {
            self.shoot(&target, ctx);
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
            size: ExplosionSize::Small,
        });
    }

    fn drain_fired(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.fired)
    }

    fn rotation(&self) -> f32 {
        self.angle
    }
}
