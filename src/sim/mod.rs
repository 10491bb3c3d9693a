//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platforms top to bottom)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod fruit;
pub mod gap;
pub mod state;
pub mod tick;
pub mod tower;

pub use autopilot::steer;
pub use clock::SimClock;
pub use fruit::{Fruit, FruitEffect, FruitKind};
pub use gap::{BALL_ANGLE, Crossing, angle_in_gap, resolve, swept_into_band};
pub use state::{
    Ball, GameEvent, GameOverReason, GamePhase, GameSession, LevelCompletion, RunState, Snapshot,
};
pub use tick::{TickInput, collect_fruit, countdown_tick, level_complete, lose_life, tick};
pub use tower::{Platform, Tower, generate_platforms, platform_y};
