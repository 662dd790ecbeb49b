//! Pixel collision masks
//!
//! A mask is the opaque silhouette of a sprite frame. Two entities collide
//! when at least one pixel is opaque in both masks after placing each mask at
//! its entity's top-left corner.

use super::rect::Rect;

/// Opaque-pixel bitmap, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build a mask by evaluating `opaque(x, y)` for every pixel
    pub fn from_fn(width: i32, height: i32, opaque: impl Fn(i32, i32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height).max(0) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self { width, height, bits }
    }

    /// Fully opaque rectangle
    pub fn solid(width: i32, height: i32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Ellipse inscribed in the bounding box
    pub fn ellipse(width: i32, height: i32) -> Self {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let nx = (x as f32 + 0.5 - rx) / rx;
            let ny = (y as f32 + 0.5 - ry) / ry;
            nx * nx + ny * ny <= 1.0
        })
    }

    /// Triangle with its base on the top edge and apex at the bottom centre
    pub fn wedge_down(width: i32, height: i32) -> Self {
        let half = width as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let span = half * (1.0 - y as f32 / height as f32);
            (x as f32 + 0.5 - half).abs() <= span.max(0.5)
        })
    }

    /// Triangle with its apex on the top edge and base at the bottom
    pub fn wedge_up(width: i32, height: i32) -> Self {
        let half = width as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let span = half * ((y + 1) as f32 / height as f32);
            (x as f32 + 0.5 - half).abs() <= span.max(0.5)
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the pixel at local coordinates is opaque (out of range is clear)
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Test two masks placed at the top-left corners of `at` and `other_at`
    pub fn overlaps(&self, at: &Rect, other: &Mask, other_at: &Rect) -> bool {
        let x0 = at.x.max(other_at.x);
        let y0 = at.y.max(other_at.y);
        let x1 = (at.x + self.width).min(other_at.x + other.width);
        let y1 = (at.y + self.height).min(other_at.y + other.height);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for wy in y0..y1 {
            for wx in x0..x1 {
                if self.get(wx - at.x, wy - at.y) && other.get(wx - other_at.x, wy - other_at.y) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ellipse_corners_are_clear() {
        let m = Mask::ellipse(40, 40);
        assert!(!m.get(0, 0));
        assert!(!m.get(39, 39));
        assert!(m.get(20, 20));
    }

    #[test]
    fn test_bounding_boxes_overlap_but_silhouettes_do_not() {
        let a = Mask::ellipse(40, 40);
        let b = Mask::ellipse(40, 40);
        // Corner to corner: boxes share a 4x4 patch, the circles do not reach it
        let at = Rect::new(0, 0, 40, 40);
        let other_at = Rect::new(36, 36, 40, 40);
        assert!(at.overlaps(&other_at));
        assert!(!a.overlaps(&at, &b, &other_at));
    }

    #[test]
    fn test_solid_masks_match_rect_overlap() {
        let a = Mask::solid(10, 10);
        let b = Mask::solid(5, 5);
        assert!(a.overlaps(&Rect::new(0, 0, 10, 10), &b, &Rect::new(9, 9, 5, 5)));
        assert!(!a.overlaps(&Rect::new(0, 0, 10, 10), &b, &Rect::new(10, 0, 5, 5)));
    }

    #[test]
    fn test_wedges_have_opaque_apex() {
        let down = Mask::wedge_down(48, 48);
        assert!(down.get(24, 47));
        assert!(down.get(0, 0));
        let up = Mask::wedge_up(48, 56);
        assert!(up.get(24, 0));
        assert!(!up.get(0, 0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(dx in -60i32..60, dy in -60i32..60) {
            let a = Mask::ellipse(40, 30);
            let b = Mask::wedge_down(24, 36);
            let ra = Rect::new(0, 0, 40, 30);
            let rb = Rect::new(dx, dy, 24, 36);
            prop_assert_eq!(a.overlaps(&ra, &b, &rb), b.overlaps(&rb, &a, &ra));
        }
    }
}
