//! Cruiser: the boss
//!
//! ```text
//! Approaching --(bottom at mid-screen)--> Holding
//! Holding --(250 ticks)--> Charging --(150 ticks)--> FiringBeam
//! FiringBeam --(20 pulses, one every 5 ticks)--> Holding + reposition pending
//! ```
//!
//! While holding with a reposition pending, the cruiser runs one leg of the
//! cycle middle -> left -> middle -> right -> middle, one leg per volley.
//! Below half health it also fires side-shots on every 10th pixel column.

use glam::Vec2;
use rand::Rng;

use super::{Enemy, EnemyContext};
use crate::audio::{MusicTrack, SoundEffect};
use crate::consts::{SCREEN_HALF_HEIGHT, SCREEN_HALF_WIDTH, SCREEN_WIDTH};
use crate::sim::entity::Body;
use crate::sim::events::{ExplosionSize, GameEvent};
use crate::sim::projectile::{Projectile, ProjectileKind};
use crate::sim::sprite::Sprite;

pub const CRUISER_HEALTH: i32 = 1000;
pub const IDLE_TICKS_BEFORE_CHARGE: u32 = 250;
pub const CHARGE_TICKS: u32 = 150;
pub const BEAM_PULSE_INTERVAL: u32 = 5;
pub const BEAM_PULSES: u32 = 20;
pub const BEAM_SPEED: f32 = 8.0;
pub const SIDE_SHOT_SPEED: f32 = 5.0;
/// How close to the side edges the cruiser travels
pub const REPOSITION_INSET: i32 = 100;
const APPROACH_SPEED: f32 = 1.0;
const REPOSITION_SPEED: f32 = 1.0;
/// Explosions in the destruction sequence before the final blast
const WRECK_BLASTS: usize = 9;

/// Attack state; charging and firing are mutually exclusive by construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CruiserPhase {
    Approaching,
    Holding { idle_ticks: u32 },
    Charging { ticks: u32 },
    FiringBeam { beam_timer: u32, pulses: u32 },
}

/// One leg of the repositioning cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositionLeg {
    MiddleToLeft,
    LeftToMiddle,
    MiddleToRight,
    RightToMiddle,
}

impl RepositionLeg {
    pub fn next(self) -> Self {
        match self {
            RepositionLeg::MiddleToLeft => RepositionLeg::LeftToMiddle,
            RepositionLeg::LeftToMiddle => RepositionLeg::MiddleToRight,
            RepositionLeg::MiddleToRight => RepositionLeg::RightToMiddle,
            RepositionLeg::RightToMiddle => RepositionLeg::MiddleToLeft,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cruiser {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub is_hit: bool,
    pub flashing: bool,
    pub phase: CruiserPhase,
    pub leg: RepositionLeg,
    /// A beam volley finished and the next leg has not completed yet
    pub reposition_pending: bool,
    fired: Vec<Projectile>,
}

impl Cruiser {
    /// New cruiser centred horizontally, just above the top edge
    pub fn new(id: u32) -> Self {
        let mut body = Body::new(id, Vec2::ZERO, Sprite::Cruiser.size());
        body.set_center_x(SCREEN_HALF_WIDTH);
        body.set_bottom(0.0);
        body.vel = Vec2::new(0.0, APPROACH_SPEED);
        Self {
            body,
            health: CRUISER_HEALTH,
            max_health: CRUISER_HEALTH,
            is_hit: false,
            flashing: false,
            phase: CruiserPhase::Approaching,
            leg: RepositionLeg::MiddleToLeft,
            reposition_pending: false,
            fired: Vec::new(),
        }
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.phase, CruiserPhase::Charging { .. })
    }

    pub fn is_firing(&self) -> bool {
        matches!(self.phase, CruiserPhase::FiringBeam { .. })
    }

    /// Remaining health as 0.0..=1.0, for the HUD bar
    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    fn step_phase(&mut self, ctx: &mut EnemyContext) {
        if self.phase == CruiserPhase::Approaching
            && self.body.rect().bottom() == SCREEN_HALF_HEIGHT as i32
        {
            self.body.vel.y = 0.0;
            self.phase = CruiserPhase::Holding { idle_ticks: 0 };
        }

        match self.phase {
            CruiserPhase::Approaching => {}
            CruiserPhase::Holding { idle_ticks } => {
                let idle_ticks = idle_ticks + 1;
                self.phase = if idle_ticks >= IDLE_TICKS_BEFORE_CHARGE {
                    self.body.vel.x = 0.0;
                    CruiserPhase::Charging { ticks: 0 }
                } else {
                    CruiserPhase::Holding { idle_ticks }
                };
            }
            CruiserPhase::Charging { ticks } => {
                self.reposition_pending = false;
                ctx.events.push(GameEvent::Sound(SoundEffect::Charging));
                let ticks = ticks + 1;
                self.phase = if ticks >= CHARGE_TICKS {
                    CruiserPhase::FiringBeam {
                        beam_timer: 0,
                        pulses: 0,
                    }
                } else {
                    CruiserPhase::Charging { ticks }
                };
            }
            CruiserPhase::FiringBeam { beam_timer, pulses } => {
                let mut beam_timer = beam_timer + 1;
                let mut pulses = pulses;
                if beam_timer >= BEAM_PULSE_INTERVAL {
                    beam_timer = 0;
                    pulses += 1;
                    self.fire_beam(ctx);
                }
                self.phase = if pulses >= BEAM_PULSES {
                    self.reposition_pending = true;
                    CruiserPhase::Holding { idle_ticks: 0 }
                } else {
                    CruiserPhase::FiringBeam { beam_timer, pulses }
                };
            }
        }
    }

    /// Drive the current leg; finishing it clears the pending flag
    fn reposition(&mut self, ctx: &mut EnemyContext) {
        let r = self.body.rect();
        let mid = SCREEN_HALF_WIDTH as i32;
        let (moving, dir) = match self.leg {
            RepositionLeg::MiddleToLeft => (r.left() > REPOSITION_INSET, -1.0),
            RepositionLeg::LeftToMiddle => (r.center_x() < mid, 1.0),
            RepositionLeg::MiddleToRight => {
                (r.right() < SCREEN_WIDTH as i32 - REPOSITION_INSET, 1.0)
            }
            RepositionLeg::RightToMiddle => (r.center_x() > mid, -1.0),
        };
        if moving {
            self.body.vel.x = dir * REPOSITION_SPEED;
        } else {
            self.body.vel.x = 0.0;
            self.leg = self.leg.next();
            self.reposition_pending = false;
        }

        if self.health < self.max_health / 2 && r.center_x() % 10 == 0 {
            self.fire_side_shots(ctx);
        }
    }

    fn fire_beam(&mut self, ctx: &mut EnemyContext) {
        let r = self.body.rect();
        self.fired.push(Projectile::new(
            ctx.ids.next_id(),
            ProjectileKind::Beam,
            Vec2::new(r.center_x() as f32, (r.bottom() - 60) as f32),
            Vec2::new(0.0, BEAM_SPEED),
        )
        .with_source(self.body.id));
        ctx.events.push(GameEvent::Sound(SoundEffect::FiringBeam));
    }

    /// Mirrored pair from both flanks
    fn fire_side_shots(&mut self, ctx: &mut EnemyContext) {
        let r = self.body.rect();
        let spread: f32 = ctx.rng.random_range(0.5..=1.5);
        let y = (r.top() + 100) as f32;
        for (x, dx) in [(r.left() as f32, -spread), (r.right() as f32, spread)] {
            self.fired.push(
                Projectile::new(
                    ctx.ids.next_id(),
                    ProjectileKind::EnemyShot,
                    Vec2::new(x, y),
                    Vec2::new(dx, SIDE_SHOT_SPEED),
                )
                .with_source(self.body.id),
            );
        }
    }

    /// Discard everything queued but not yet handed to the tick
    pub fn clear_fired(&mut self) {
        self.fired.clear();
    }
}

impl Enemy for Cruiser {
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
        if self.is_firing() {
            Sprite::CruiserFiring
        } else if self.flashing {
            Sprite::CruiserHit
        } else {
            Sprite::Cruiser
        }
    }

    fn update(&mut self, ctx: &mut EnemyContext) {
        self.flashing = self.is_hit;
        self.is_hit = false;

        self.step_phase(ctx);

        if self.reposition_pending && !self.is_charging() && !self.is_firing() {
            self.reposition(ctx);
        }

        let r = self.body.rect();
        if r.left() > 0 && r.right() < SCREEN_WIDTH as i32 {
            self.body.advance();
        }
    }

    /// Strictly below one, unlike the `<= 0` the lesser ships use
    fn is_destroyed(&self) -> bool {
        self.health < 1
    }

    fn die(&mut self, ctx: &mut EnemyContext) {
        if !self.body.alive {
            return;
        }
        let core = self.body.center();
        for _ in 0..WRECK_BLASTS {
            let offset = Vec2::new(
                (ctx.rng.random_range(0..10) * 20 - 100) as f32,
                (ctx.rng.random_range(0..10) * 20 - 100) as f32,
            );
            ctx.events.push(GameEvent::Explosion {
                pos: core + offset,
                size: ExplosionSize::Large,
            });
            ctx.events.push(GameEvent::Sound(SoundEffect::Explode));
        }
        ctx.events.push(GameEvent::Explosion {
            pos: core,
            size: ExplosionSize::Final,
        });
        ctx.events.push(GameEvent::Sound(SoundEffect::BlowUp));
        ctx.events.push(GameEvent::Music(MusicTrack::Stage));
        self.fired.clear();
        self.body.kill();
    }

    fn drain_fired(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::test_support::Harness;
    use proptest::prelude::*;

    /// Cruiser already parked at mid-screen
    fn parked() -> (Cruiser, Harness) {
        let mut h = Harness::new();
        let mut cruiser = Cruiser::new(1);
        while cruiser.phase == CruiserPhase::Approaching {
            cruiser.update(&mut h.ctx(None));
        }
        (cruiser, h)
    }

    /// Run one full idle -> charge -> fire -> reposition round
    fn run_round(cruiser: &mut Cruiser, h: &mut Harness) {
        let total = IDLE_TICKS_BEFORE_CHARGE + CHARGE_TICKS + BEAM_PULSES * BEAM_PULSE_INTERVAL;
        for _ in 0..total {
            cruiser.update(&mut h.ctx(None));
        }
        while cruiser.reposition_pending {
            cruiser.update(&mut h.ctx(None));
        }
    }

    #[test]
    fn test_halts_exactly_at_half_height() {
        let (cruiser, _) = parked();
        assert_eq!(cruiser.rect().bottom(), SCREEN_HALF_HEIGHT as i32);
        assert_eq!(cruiser.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_attack_cycle_timings() {
        let (mut cruiser, mut h) = parked();
        for _ in 0..IDLE_TICKS_BEFORE_CHARGE {
            cruiser.update(&mut h.ctx(None));
        }
        assert!(cruiser.is_charging());

        for _ in 0..CHARGE_TICKS {
            assert!(!(cruiser.is_charging() && cruiser.is_firing()));
            cruiser.update(&mut h.ctx(None));
        }
        assert!(cruiser.is_firing());
        let charge_cues = h
            .events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundEffect::Charging))
            .count();
        assert_eq!(charge_cues as u32, CHARGE_TICKS);

        let mut beams = 0;
        for _ in 0..BEAM_PULSES * BEAM_PULSE_INTERVAL {
            cruiser.update(&mut h.ctx(None));
            beams += cruiser.drain_fired().iter().filter(|p| p.is_beam()).count();
        }
        assert_eq!(beams as u32, BEAM_PULSES);
        assert!(!cruiser.is_firing());
        assert!(cruiser.reposition_pending);
    }

    #[test]
    fn test_first_leg_stops_at_left_inset() {
        let (mut cruiser, mut h) = parked();
        run_round(&mut cruiser, &mut h);
        assert_eq!(cruiser.rect().left(), REPOSITION_INSET);
        assert_eq!(cruiser.leg, RepositionLeg::LeftToMiddle);
        assert_eq!(cruiser.body.vel.x, 0.0);
    }

    #[test]
    fn test_side_shots_only_below_half_health() {
        let (mut cruiser, mut h) = parked();
        run_round(&mut cruiser, &mut h);
        let healthy_shots = cruiser
            .drain_fired()
            .iter()
            .filter(|p| !p.is_beam())
            .count();
        assert_eq!(healthy_shots, 0);

        cruiser.health = cruiser.max_health / 2 - 1;
        run_round(&mut cruiser, &mut h);
        let shots: Vec<_> = cruiser
            .drain_fired()
            .into_iter()
            .filter(|p| !p.is_beam())
            .collect();
        assert!(!shots.is_empty());
        assert_eq!(shots.len() % 2, 0);
        for pair in shots.chunks(2) {
            assert_eq!(pair[0].body.vel.x, -pair[1].body.vel.x);
            assert_eq!(pair[0].body.vel.y, SIDE_SHOT_SPEED);
        }
    }

    #[test]
    fn test_destruction_threshold_is_strict() {
        let mut cruiser = Cruiser::new(1);
        cruiser.health = 1;
        assert!(!cruiser.is_destroyed());
        cruiser.damage(1);
        assert!(cruiser.is_destroyed());
    }

    #[test]
    fn test_destruction_sequence() {
        let mut h = Harness::new();
        let mut cruiser = Cruiser::new(1);
        cruiser.die(&mut h.ctx(None));
        assert!(!cruiser.is_alive());
        let blasts = h
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Explosion { .. }))
            .count();
        assert_eq!(blasts, WRECK_BLASTS + 1);
        assert!(h.events.contains(&GameEvent::Music(MusicTrack::Stage)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]
        #[test]
        fn reposition_cycle_returns_to_start(cycles in 1usize..3) {
            let (mut cruiser, mut h) = parked();
            let start_leg = cruiser.leg;
            let start_x = cruiser.rect().center_x();
            for _ in 0..cycles * 4 {
                run_round(&mut cruiser, &mut h);
            }
            prop_assert_eq!(cruiser.leg, start_leg);
            prop_assert_eq!(cruiser.rect().center_x(), start_x);
        }
    }
}
