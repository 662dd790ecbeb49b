//! Saturn Strike - a vertically scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, enemy AI, collisions, game state)
//! - `audio`: Fire-and-forget sound sink
//! - `renderer`: Per-tick draw snapshot handed to an external renderer
//! - `platform`: Input sources (intent snapshots)
//! - `runner`: Fixed-rate loop tying the collaborators together
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use runner::{RunOutcome, Runner};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Play area dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 1000.0;
    pub const SCREEN_HALF_WIDTH: f32 = SCREEN_WIDTH / 2.0;
    pub const SCREEN_HALF_HEIGHT: f32 = SCREEN_HEIGHT / 2.0;
}

/// Angle (radians) of the line from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Velocity of magnitude `speed` along `angle`
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_magnitude() {
        let angle = angle_between(Vec2::new(10.0, 10.0), Vec2::new(310.0, 260.0));
        let v = velocity_from_angle(angle, 5.0);
        assert!((v.length() - 5.0).abs() < 1e-4);
        assert!(v.x > 0.0 && v.y > 0.0);
    }
}
