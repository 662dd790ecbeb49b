//! Shared entity base
//!
//! Every simulated object carries a `Body`: identity, float position of its
//! top-left corner, per-tick velocity, artwork size and the alive flag.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Position, motion and liveness of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: u32,
    /// Top-left corner (pixels)
    pub pos: Vec2,
    /// Displacement applied once per tick (pixels)
    pub vel: Vec2,
    pub size: Vec2,
    /// Dead bodies are purged from their collection before the next pass reads it
    pub alive: bool,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            alive: true,
        }
    }

    /// Body whose centre sits at `center`
    pub fn centered(id: u32, center: Vec2, size: Vec2) -> Self {
        Self::new(id, center - size / 2.0, size)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_center_x(&mut self, x: f32) {
        self.pos.x = x - self.size.x / 2.0;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    /// Move by velocity once
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Kill the body once it has fully left the play area along an axis it moves on
    pub fn kill_if_exited(&mut self) {
        let r = self.rect();
        let gone_vertically =
            self.vel.y != 0.0 && (r.bottom() <= 0 || r.top() >= SCREEN_HEIGHT as i32);
        let gone_horizontally =
            self.vel.x != 0.0 && (r.right() <= 0 || r.left() >= SCREEN_WIDTH as i32);
        if gone_vertically || gone_horizontally {
            self.alive = false;
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// Hands out unique entity ids for one run
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}
