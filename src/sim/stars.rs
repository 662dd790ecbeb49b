//! Scrolling star field
//!
//! Purely cosmetic. The tick only decides how many steps it advances per
//! frame (`star_speed`).

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// One background star; `speed` doubles as its size and brightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: u8,
}

impl Star {
    /// Grey level for the renderer
    pub fn brightness(&self) -> u8 {
        match self.speed {
            1 => 100,
            2 => 190,
            _ => 255,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    pub fn new(count: usize, rng: &mut Pcg32) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.random_range(0.0..SCREEN_WIDTH - 1.0),
                y: rng.random_range(0.0..SCREEN_HEIGHT - 1.0),
                speed: rng.random_range(1..=3),
            })
            .collect();
        Self { stars }
    }

    /// Scroll `steps` times; stars leaving the bottom re-enter at the top
    pub fn advance(&mut self, steps: u32, rng: &mut Pcg32) {
        for _ in 0..steps {
            for star in &mut self.stars {
                star.y += star.speed as f32;
                if star.y >= SCREEN_HEIGHT {
                    star.y = 0.0;
                    star.x = rng.random_range(0.0..SCREEN_WIDTH);
                    star.speed = rng.random_range(1..=3);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_stars_stay_on_screen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = StarField::new(100, &mut rng);
        for _ in 0..500 {
            field.advance(10, &mut rng);
        }
        assert_eq!(field.stars.len(), 100);
        assert!(field.stars.iter().all(|s| s.y >= 0.0 && s.y < SCREEN_HEIGHT));
        assert!(field.stars.iter().all(|s| (1..=3).contains(&s.speed)));
    }
}
