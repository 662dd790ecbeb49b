//! Power-up pickup dropped by destroyed enemies

use glam::Vec2;

use super::entity::Body;
use super::events::GameEvent;
use super::rect::Rect;
use super::sprite::{POWERUP_FRAMES, Sprite};
use crate::audio::SoundEffect;

/// Ticks each animation frame is shown
const FRAME_TICKS: u32 = 10;
const FALL_SPEED: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub body: Body,
    frame: u8,
    frame_timer: u32,
}

impl PowerUp {
    /// Drop a power-up at the top-left corner of a destroyed enemy
    pub fn new(id: u32, at: Vec2) -> Self {
        let mut body = Body::new(id, at, Sprite::PowerUp(0).size());
        body.vel = Vec2::new(0.0, FALL_SPEED);
        Self {
            body,
            frame: 0,
            frame_timer: 0,
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::PowerUp(self.frame)
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn update(&mut self) {
        self.frame_timer += 1;
        if self.frame_timer >= FRAME_TICKS {
            self.frame_timer = 0;
            self.frame = (self.frame + 1) % POWERUP_FRAMES;
        }
        self.body.advance();
        self.body.kill_if_exited();
    }

    /// Collected by the player; removed from play
    pub fn on_pickup(&mut self) -> GameEvent {
        self.body.kill();
        GameEvent::Sound(SoundEffect::PowerUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_cycles_through_frames() {
        let mut p = PowerUp::new(1, Vec2::new(100.0, 100.0));
        let mut seen = Vec::new();
        for _ in 0..(FRAME_TICKS * POWERUP_FRAMES as u32) {
            p.update();
            if seen.last() != Some(&p.sprite()) {
                seen.push(p.sprite());
            }
        }
        assert_eq!(
            seen,
            vec![
                Sprite::PowerUp(0),
                Sprite::PowerUp(1),
                Sprite::PowerUp(2),
                Sprite::PowerUp(0),
            ]
        );
    }

    #[test]
    fn test_pickup_removes() {
        let mut p = PowerUp::new(1, Vec2::new(100.0, 100.0));
        assert_eq!(p.on_pickup(), GameEvent::Sound(SoundEffect::PowerUp));
        assert!(!p.body.alive);
    }
}
