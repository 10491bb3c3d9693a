//! Fruit power-ups
//!
//! Three kinds of fruit sit on the solid part of platforms. Landing on a
//! platform collects its fruit and applies the effect.

use serde::{Deserialize, Serialize};

/// Fruit catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    /// Banana - doubles rotation speed for a while
    Speed,
    /// Apple - extra life
    Life,
    /// Chocolate - extra seconds on the clock
    Time,
}

/// What a fruit does when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruitEffect {
    SpeedBoost { duration_ms: u32 },
    ExtraLife,
    BonusTime { bonus_secs: u32 },
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Speed, FruitKind::Life, FruitKind::Time];

    pub fn effect(self) -> FruitEffect {
        match self {
            FruitKind::Speed => FruitEffect::SpeedBoost { duration_ms: 5000 },
            FruitKind::Life => FruitEffect::ExtraLife,
            FruitKind::Time => FruitEffect::BonusTime { bonus_secs: 5 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FruitKind::Speed => "Banana",
            FruitKind::Life => "Apple",
            FruitKind::Time => "Chocolate",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            FruitKind::Speed => "🍌",
            FruitKind::Life => "🍎",
            FruitKind::Time => "🍫",
        }
    }

    /// Banner text shown when collected
    pub fn powerup_message(self) -> &'static str {
        match self {
            FruitKind::Speed => "🍌 Speed Boost!",
            FruitKind::Life => "🍎 +1 Life!",
            FruitKind::Time => "🍫 +5 Seconds!",
        }
    }
}

/// A fruit placed on a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub kind: FruitKind,
    /// Angle on the ring (radians, unwrapped; never inside the platform gap)
    pub angle: f32,
    /// One-way flag, false until picked up
    pub collected: bool,
}

impl Fruit {
    pub fn new(kind: FruitKind, angle: f32) -> Self {
        Self {
            kind,
            angle,
            collected: false,
        }
    }

    /// Mark as collected. Returns the kind only the first time.
    pub fn take(&mut self) -> Option<FruitKind> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.kind)
    }
}
