//! The player's ship
//!
//! Lives are owned by the game state, not the ship. The ship tracks its own
//! death/arrival cycle:
//!
//! ```text
//! arriving -> active (briefly invulnerable) -> dead -> respawning + arriving -> ...
//! ```

use glam::Vec2;

use super::entity::{Body, EntityIds};
use super::events::{ExplosionSize, GameEvent};
use super::projectile::{Projectile, ProjectileKind};
use super::rect::Rect;
use super::sprite::Sprite;
use crate::audio::SoundEffect;
use crate::consts::{SCREEN_HALF_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::Tuning;

/// Pixels per tick under player control
pub const PLAYER_SPEED: f32 = 6.0;
/// Pixels per tick while jumping in
pub const ARRIVE_SPEED: f32 = 5.0;
/// Player bullet speed (upward)
pub const PLAYER_SHOT_SPEED: f32 = 12.0;
/// Top edge of the ship once it has arrived
pub const HOME_Y: f32 = SCREEN_HEIGHT - 150.0;
/// Where the ship appears before jumping in
const STAGING_Y: f32 = SCREEN_HEIGHT + 20.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Raised by power-ups; sets fire rate, spread and bullet piercing
    pub power_level: u32,
    pub dead: bool,
    /// Coming back after a death (set together with `arriving`)
    pub respawning: bool,
    /// Flying in from below the screen; the star field runs at hyperdrive speed
    pub arriving: bool,
    /// Post-arrival grace period
    pub invulnerable: bool,
    /// Bullets fired by the player and still in flight
    pub bullets: Vec<Projectile>,
    respawn_timer: u32,
    invulnerable_timer: u32,
    fire_cooldown: u32,
    respawn_delay: u32,
    invulnerable_ticks: u32,
}

impl Player {
    pub fn new(id: u32, tuning: &Tuning) -> Self {
        let size = Sprite::Player.size();
        let mut body = Body::new(id, Vec2::ZERO, size);
        body.set_center_x(SCREEN_HALF_WIDTH);
        body.pos.y = STAGING_Y;
        Self {
            body,
            power_level: tuning.player_start_power,
            dead: false,
            respawning: false,
            arriving: true,
            invulnerable: false,
            bullets: Vec::new(),
            respawn_timer: 0,
            invulnerable_timer: 0,
            fire_cooldown: 0,
            respawn_delay: tuning.respawn_delay_ticks,
            invulnerable_ticks: tuning.invulnerable_ticks,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Player
    }

    /// Whether enemies and their bullets can hurt the ship this tick
    pub fn is_vulnerable(&self) -> bool {
        !(self.dead || self.arriving || self.respawning || self.invulnerable)
    }

    /// Whether input is applied to the ship
    pub fn is_controllable(&self) -> bool {
        !self.dead && !self.arriving
    }

    /// Move along `dir` (components in -1..=1), kept inside the screen
    pub fn steer(&mut self, dir: Vec2) {
        self.body.vel = dir * PLAYER_SPEED;
        self.body.advance();
        let max = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) - self.body.size;
        self.body.pos = self.body.pos.clamp(Vec2::ZERO, max);
    }

    /// Ticks between shots at the current power level
    pub fn fire_interval(&self) -> u32 {
        12u32.saturating_sub(2 * self.power_level).max(4)
    }

    /// Fire if the cannon has cooled down; otherwise a silent no-op
    pub fn fire(&mut self, ids: &mut EntityIds, events: &mut Vec<GameEvent>) {
        if self.fire_cooldown > 0 || !self.is_controllable() {
            return;
        }
        let r = self.rect();
        let muzzle = Vec2::new(r.center_x() as f32, r.top() as f32);
        let up = Vec2::new(0.0, -PLAYER_SHOT_SPEED);

        let volley: Vec<(Vec2, Vec2)> = match self.power_level {
            0 | 1 => vec![(muzzle, up)],
            2 | 3 => vec![
                (muzzle - Vec2::new(10.0, 0.0), up),
                (muzzle + Vec2::new(10.0, 0.0), up),
            ],
            _ => vec![
                (muzzle, up),
                (muzzle - Vec2::new(14.0, -8.0), Vec2::new(-2.0, -PLAYER_SHOT_SPEED)),
                (muzzle + Vec2::new(14.0, 8.0), Vec2::new(2.0, -PLAYER_SHOT_SPEED)),
            ],
        };
        for (at, vel) in volley {
            self.bullets
                .push(Projectile::new(ids.next_id(), ProjectileKind::PlayerShot, at, vel));
        }
        self.fire_cooldown = self.fire_interval();
        events.push(GameEvent::Sound(SoundEffect::PlayerShoot));
    }

    /// Advance timers, the arrival run and the bullets in flight
    pub fn update(&mut self, events: &mut Vec<GameEvent>) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        if self.dead {
            self.respawn_timer = self.respawn_timer.saturating_sub(1);
            if self.respawn_timer == 0 {
                self.begin_respawn(events);
            }
        } else if self.arriving {
            self.body.pos.y -= ARRIVE_SPEED;
            if self.body.pos.y <= HOME_Y {
                self.body.pos.y = HOME_Y;
                self.arriving = false;
                self.respawning = false;
                self.invulnerable = self.invulnerable_ticks > 0;
                self.invulnerable_timer = self.invulnerable_ticks;
            }
        } else if self.invulnerable {
            self.invulnerable_timer = self.invulnerable_timer.saturating_sub(1);
            if self.invulnerable_timer == 0 {
                self.invulnerable = false;
            }
        }

        for bullet in &mut self.bullets {
            bullet.update();
        }
        self.bullets.retain(|b| b.body.alive);
    }

    fn begin_respawn(&mut self, events: &mut Vec<GameEvent>) {
        self.dead = false;
        self.respawning = true;
        self.arriving = true;
        self.body.vel = Vec2::ZERO;
        self.body.set_center_x(SCREEN_HALF_WIDTH);
        self.body.pos.y = STAGING_Y;
        events.push(GameEvent::Sound(SoundEffect::Takeoff));
    }

    /// Ship destroyed; the caller deducts the life
    pub fn die(&mut self, events: &mut Vec<GameEvent>) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.invulnerable = false;
        self.body.vel = Vec2::ZERO;
        self.respawn_timer = self.respawn_delay.max(1);
        events.push(GameEvent::Sound(SoundEffect::Explode));
        events.push(GameEvent::Explosion {
            pos: self.body.center(),
            size: ExplosionSize::Large,
        });
    }

    /// Victory exit: straight up with no screen clamp
    pub fn fly_off(&mut self) {
        self.arriving = false;
        self.respawning = false;
        self.body.vel = Vec2::new(0.0, -PLAYER_SPEED);
        self.body.advance();
    }

    pub fn collect_power_up(&mut self) {
        self.power_level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrived_player() -> Player {
        let tuning = Tuning {
            invulnerable_ticks: 0,
            ..Tuning::default()
        };
        let mut player = Player::new(1, &tuning);
        let mut events = Vec::new();
        while player.arriving {
            player.update(&mut events);
        }
        player
    }

    #[test]
    fn test_arrival_reaches_home_row() {
        let mut player = Player::new(1, &Tuning::default());
        assert!(player.arriving);
        assert!(!player.is_vulnerable());
        let mut events = Vec::new();
        for _ in 0..200 {
            player.update(&mut events);
        }
        assert!(!player.arriving);
        assert_eq!(player.body.pos.y, HOME_Y);
    }

    #[test]
    fn test_steer_is_clamped() {
        let mut player = arrived_player();
        for _ in 0..500 {
            player.steer(Vec2::new(-1.0, -1.0));
        }
        assert_eq!(player.body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut player = arrived_player();
        let mut ids = EntityIds::default();
        let mut events = Vec::new();
        player.fire(&mut ids, &mut events);
        player.fire(&mut ids, &mut events);
        assert_eq!(player.bullets.len(), 1);
        for _ in 0..player.fire_interval() {
            player.update(&mut events);
        }
        player.fire(&mut ids, &mut events);
        assert_eq!(player.bullets.len(), 2);
    }

    #[test]
    fn test_spread_grows_with_power() {
        let mut ids = EntityIds::default();
        let mut events = Vec::new();
        for (level, expected) in [(1, 1), (2, 2), (3, 2), (4, 3), (7, 3)] {
            let mut player = arrived_player();
            player.power_level = level;
            player.fire(&mut ids, &mut events);
            assert_eq!(player.bullets.len(), expected, "power {level}");
        }
    }

    #[test]
    fn test_death_then_respawn_cycle() {
        let mut player = arrived_player();
        let mut events = Vec::new();
        player.die(&mut events);
        assert!(player.dead);
        assert!(!player.is_controllable());
        for _ in 0..Tuning::default().respawn_delay_ticks {
            player.update(&mut events);
        }
        assert!(!player.dead);
        assert!(player.respawning);
        assert!(player.arriving);
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Takeoff)));
    }

    #[test]
    fn test_fly_off_leaves_screen() {
        let mut player = arrived_player();
        for _ in 0..400 {
            player.fly_off();
        }
        assert!(player.rect().bottom() <= 0);
    }
}
