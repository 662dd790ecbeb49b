//! Outbound notifications produced by the simulation
//!
//! The sim never calls audio or rendering directly. It queues events on the
//! game state and the host drains them after each tick.

use glam::Vec2;

use super::rect::Rect;
use crate::audio::{MusicTrack, SoundEffect};

/// Explosion sizes the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionSize {
    Small,
    Large,
    Final,
}

/// Something the host should present
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Play a one-shot effect
    Sound(SoundEffect),
    /// Switch the background track
    Music(MusicTrack),
    /// Impact spark where a bullet struck
    HitFlash { rect: Rect },
    /// Explosion centred on a point
    Explosion { pos: Vec2, size: ExplosionSize },
    /// The boss arrived
    BossSpawned,
    /// The boss was destroyed
    BossDefeated,
    /// The player lost a life
    PlayerDied { lives_left: u32 },
    /// The run ended with no lives left
    GameOver,
}
