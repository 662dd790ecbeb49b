//! Hit tests between entities
//!
//! Most pairs use pixel masks: the cheap box test rejects far pairs, then
//! the silhouettes decide. Enemy bullets against the player use the plain
//! box test, which is deliberately more forgiving to the bullets.

use super::rect::Rect;
use super::sprite::Sprite;

/// Pixel-accurate test between two sprites placed at their bounding boxes
pub fn mask_collide(a: Sprite, a_rect: &Rect, b: Sprite, b_rect: &Rect) -> bool {
    a_rect.overlaps(b_rect) && a.mask().overlaps(a_rect, b.mask(), b_rect)
}

/// Bounding-box test
pub fn rect_collide(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}
