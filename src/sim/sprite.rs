//! Sprite frames known to the simulation
//!
//! The simulation never loads images. Each frame carries the size of its
//! artwork and a silhouette mask so collisions match what is drawn.

use std::sync::OnceLock;

use glam::Vec2;

use super::mask::Mask;

/// Every frame an entity can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    PlayerShot,
    Fighter,
    FighterHit,
    Frigate,
    FrigateHit,
    Cruiser,
    CruiserHit,
    CruiserFiring,
    EnemyShotA,
    EnemyShotB,
    Missile,
    Beam,
    /// Power-up animation frame (0..POWERUP_FRAMES)
    PowerUp(u8),
}

/// Number of power-up animation frames
pub const POWERUP_FRAMES: u8 = 3;

static PLAYER_MASK: OnceLock<Mask> = OnceLock::new();
static PLAYER_SHOT_MASK: OnceLock<Mask> = OnceLock::new();
static FIGHTER_MASK: OnceLock<Mask> = OnceLock::new();
static FRIGATE_MASK: OnceLock<Mask> = OnceLock::new();
static CRUISER_MASK: OnceLock<Mask> = OnceLock::new();
static ENEMY_SHOT_MASK: OnceLock<Mask> = OnceLock::new();
static MISSILE_MASK: OnceLock<Mask> = OnceLock::new();
static BEAM_MASK: OnceLock<Mask> = OnceLock::new();
static POWERUP_MASK: OnceLock<Mask> = OnceLock::new();

impl Sprite {
    /// Artwork size in pixels
    pub fn size(&self) -> Vec2 {
        match self {
            Sprite::Player => Vec2::new(48.0, 56.0),
            Sprite::PlayerShot => Vec2::new(6.0, 18.0),
            Sprite::Fighter | Sprite::FighterHit => Vec2::new(48.0, 48.0),
            Sprite::Frigate | Sprite::FrigateHit => Vec2::new(160.0, 64.0),
            Sprite::Cruiser | Sprite::CruiserHit | Sprite::CruiserFiring => {
                Vec2::new(200.0, 300.0)
            }
            Sprite::EnemyShotA | Sprite::EnemyShotB => Vec2::new(10.0, 10.0),
            Sprite::Missile => Vec2::new(10.0, 30.0),
            Sprite::Beam => Vec2::new(40.0, 60.0),
            Sprite::PowerUp(_) => Vec2::new(40.0, 40.0),
        }
    }

    /// Silhouette used for pixel-accurate hit tests
    pub fn mask(&self) -> &'static Mask {
        let size = self.size();
        let (w, h) = (size.x as i32, size.y as i32);
        match self {
            Sprite::Player => PLAYER_MASK.get_or_init(|| Mask::wedge_up(w, h)),
            Sprite::PlayerShot => PLAYER_SHOT_MASK.get_or_init(|| Mask::solid(w, h)),
            Sprite::Fighter | Sprite::FighterHit => {
                FIGHTER_MASK.get_or_init(|| Mask::wedge_down(w, h))
            }
            Sprite::Frigate | Sprite::FrigateHit => {
                FRIGATE_MASK.get_or_init(|| Mask::ellipse(w, h))
            }
            Sprite::Cruiser | Sprite::CruiserHit | Sprite::CruiserFiring => {
                CRUISER_MASK.get_or_init(|| Mask::ellipse(w, h))
            }
            Sprite::EnemyShotA | Sprite::EnemyShotB => {
                ENEMY_SHOT_MASK.get_or_init(|| Mask::ellipse(w, h))
            }
            Sprite::Missile => MISSILE_MASK.get_or_init(|| Mask::solid(w, h)),
            Sprite::Beam => BEAM_MASK.get_or_init(|| Mask::solid(w, h)),
            Sprite::PowerUp(_) => POWERUP_MASK.get_or_init(|| Mask::ellipse(w, h)),
        }
    }

    /// Asset name the renderer resolves
    pub fn asset_name(&self) -> &'static str {
        match self {
            Sprite::Player => "player.png",
            Sprite::PlayerShot => "player_shot.png",
            Sprite::Fighter => "fighter.png",
            Sprite::FighterHit => "fighter_hit.png",
            Sprite::Frigate => "frigate.png",
            Sprite::FrigateHit => "frigate_hit.png",
            Sprite::Cruiser => "cruiser.png",
            Sprite::CruiserHit => "cruiser_hit.png",
            Sprite::CruiserFiring => "cruiser_firing.png",
            Sprite::EnemyShotA => "enemy_shot_a.png",
            Sprite::EnemyShotB => "enemy_shot_b.png",
            Sprite::Missile => "missile.png",
            Sprite::Beam => "beam.png",
            Sprite::PowerUp(0) => "POWERUP/powerup_a.png",
            Sprite::PowerUp(1) => "POWERUP/powerup_b.png",
            Sprite::PowerUp(_) => "POWERUP/powerup_c.png",
        }
    }
}
