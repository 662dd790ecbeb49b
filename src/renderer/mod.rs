//! Rendering seam
//!
//! The sim never draws. After each tick the runner captures a `Frame` (what
//! to draw where, plus HUD numbers) and hands it to a `RenderSink`. Nothing a
//! sink returns feeds back into the simulation.

use glam::Vec2;
use thiserror::Error;

use crate::sim::{GamePhase, GameState, Rect, Sprite, Star};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render backend unavailable: {0}")]
    Unavailable(String),
}

/// One sprite to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub sprite: Sprite,
    /// Degrees, cosmetic only
    pub rotation: f32,
}

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub kills: u32,
    pub lives: u32,
    pub power_level: u32,
    /// Cruiser health bar, present while the cruiser is on screen
    pub boss_health: Option<f32>,
    pub phase: GamePhase,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub tick: u64,
    /// Star field steps to draw this frame (streaks at high speed)
    pub star_speed: u32,
    pub stars: Vec<Star>,
    /// Back to front
    pub items: Vec<DrawItem>,
    pub hud: Hud,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let mut items = Vec::with_capacity(state.entity_count() + 1);

        let item = |id, pos, sprite, rotation| DrawItem {
            id,
            pos,
            sprite,
            rotation,
        };
        for p in &state.powerups {
            items.push(item(p.body.id, p.body.pos, p.sprite(), 0.0));
        }
        for e in state.enemies() {
            items.push(item(e.body().id, e.body().pos, e.sprite(), e.rotation()));
        }
        if !state.player.dead {
            let p = &state.player;
            items.push(item(p.body.id, p.body.pos, p.sprite(), 0.0));
        }
        for b in state.player.bullets.iter().chain(&state.enemy_bullets) {
            items.push(item(b.body.id, b.body.pos, b.sprite(), 0.0));
        }

        Self {
            tick: state.time_ticks,
            star_speed: state.star_speed,
            stars: state.stars.stars.clone(),
            items,
            hud: Hud {
                kills: state.kill_count,
                lives: state.lives,
                power_level: state.player.power_level,
                boss_health: state.boss.as_ref().map(|b| b.health_fraction()),
                phase: state.phase,
            },
        }
    }
}

/// Drawing backend
pub trait RenderSink {
    fn draw_frame(&mut self, frame: &Frame) -> Result<(), RenderError>;

    /// One-shot white flash over a hit
    fn flash(&mut self, rect: Rect) -> Result<(), RenderError>;
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn draw_frame(&mut self, _frame: &Frame) -> Result<(), RenderError> {
        Ok(())
    }

    fn flash(&mut self, _rect: Rect) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Headless renderer that logs a HUD line once a second
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    flashes: u64,
}

impl LogRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn flashes(&self) -> u64 {
        self.flashes
    }
}

impl RenderSink for LogRenderer {
    fn draw_frame(&mut self, frame: &Frame) -> Result<(), RenderError> {
        self.frames += 1;
        if frame.tick % 60 == 0 {
            let hud = &frame.hud;
            log::debug!(
                "t={} {:?} kills={} lives={} power={} sprites={} boss={:?}",
                frame.tick,
                hud.phase,
                hud.kills,
                hud.lives,
                hud.power_level,
                frame.items.len(),
                hud.boss_health,
            );
        }
        Ok(())
    }

    fn flash(&mut self, rect: Rect) -> Result<(), RenderError> {
        self.flashes += 1;
        log::trace!("flash at {rect:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Cruiser, Fighter};
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_lists_live_entities() {
        let mut state = GameState::with_tuning(1, Tuning::immediate());
        state.fighters.push(Fighter::new(50, 100.0));
        state.boss = Some(Cruiser::new(51));

        let frame = Frame::capture(&state);
        assert_eq!(frame.items.len(), 3);
        assert!(frame.items.iter().any(|i| i.sprite == Sprite::Player));
        assert_eq!(frame.hud.boss_health, Some(1.0));
        assert_eq!(frame.hud.lives, 3);
        assert_eq!(frame.stars.len(), state.stars.stars.len());
    }

    #[test]
    fn test_dead_player_not_drawn() {
        let mut state = GameState::new(1);
        state.player.dead = true;
        let frame = Frame::capture(&state);
        assert!(frame.items.iter().all(|i| i.sprite != Sprite::Player));
        assert_eq!(frame.hud.boss_health, None);
    }
}
