//! Integer pixel rectangles
//!
//! Bounding boxes are snapped to whole pixels so that the "exact alignment"
//! rules (frigate firing, boss halting at mid-screen) compare integers.

use glam::Vec2;

/// Axis-aligned bounding box in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Snap a float top-left position and size to pixels
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
            w: size.x as i32,
            h: size.y as i32,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x() as f32, self.center_y() as f32)
    }

    /// Overlap test with shared edges not counting as contact
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True when no pixel of the rect lies inside `bounds` grown by `margin`
    pub fn outside(&self, bounds: &Rect, margin: i32) -> bool {
        self.right() < bounds.left() - margin
            || self.left() > bounds.right() + margin
            || self.bottom() < bounds.top() - margin
            || self.top() > bounds.bottom() + margin
    }
}
