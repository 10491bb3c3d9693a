//! Fruit Helix - A helix tower drop arcade game
//!
//! Core modules:
//! - `levels`: Static level catalog (floors, time limit, fruit frequency)
//! - `sim`: Deterministic simulation (tower generation, gap resolution, game state)
//! - `game`: Screen flow and the input surface the presentation layer drives
//! - `persistence`: Key/value storage and unlocked-level progress
//! - `settings`: Player preferences

pub mod game;
pub mod levels;
pub mod persistence;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Game, LevelDenied};
pub use levels::{LEVELS, LevelConfig, MAX_LEVEL};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation frame length in milliseconds (60 Hz, matching the browser frame budget)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frame length in seconds
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum frames per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_SPAWN_Y: f32 = 150.0;
    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.3;

    /// Tower geometry
    pub const TOWER_RADIUS: f32 = 80.0;
    /// Vertical position of the first platform
    pub const PLATFORM_BASE_Y: f32 = 200.0;
    /// Vertical spacing between platforms
    pub const PLATFORM_GAP: f32 = 50.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    /// Angular width of every platform gap (radians)
    pub const GAP_WIDTH: f32 = std::f32::consts::FRAC_PI_3;

    /// Camera keeps the ball this far below the top of the view
    pub const CAMERA_LEAD: f32 = 300.0;
    /// Exponential smoothing factor for the camera, per frame
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    /// Distance past the bottom of the view before the ball counts as lost
    pub const OVERFLOW_MARGIN: f32 = 100.0;

    /// Run defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Scoring
    pub const GAP_PASS_SCORE: u32 = 10;
    pub const FRUIT_SCORE: u32 = 50;
    /// Points per second left on the clock at level completion
    pub const TIME_BONUS_PER_SECOND: u32 = 10;

    /// Speed boost multiplier while a banana is active
    pub const SPEED_BOOST_MULTIPLIER: f32 = 2.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed angular distance from `from` to `to`, in (-π, π]
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut delta = wrap_angle(to - from);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_angle_delta_takes_short_way() {
        assert!((angle_delta(0.1, TAU - 0.1) + 0.2).abs() < 1e-5);
        assert!((angle_delta(TAU - 0.1, 0.1) - 0.2).abs() < 1e-5);
        assert!((angle_delta(0.0, PI / 2.0) - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(consts::TOWER_RADIUS, PI / 2.0);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - consts::TOWER_RADIUS).abs() < 1e-4);
    }
}
