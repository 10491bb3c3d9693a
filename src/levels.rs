//! Level catalog
//!
//! Five hand-tuned levels. Each level adds floors and takes time off the
//! clock; the values are design data and are not enforced in code.

use serde::Serialize;

/// Highest level id
pub const MAX_LEVEL: u8 = 5;

/// Immutable per-level parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelConfig {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    /// Number of platforms in the tower
    pub floors: u32,
    /// Countdown start (seconds)
    pub time_limit_secs: u32,
    /// Probability that a platform carries a fruit, in [0, 1]
    pub fruit_frequency: f32,
    pub difficulty: f32,
}

impl LevelConfig {
    /// Whether a level follows this one
    pub fn has_next(&self) -> bool {
        self.id < MAX_LEVEL
    }
}

pub const LEVELS: [LevelConfig; MAX_LEVEL as usize] = [
    LevelConfig {
        id: 1,
        name: "Sunny Meadow",
        description: "A bright and welcoming world!",
        floors: 10,
        time_limit_secs: 60,
        fruit_frequency: 0.4,
        difficulty: 1.0,
    },
    LevelConfig {
        id: 2,
        name: "Ocean Breeze",
        description: "Dive into the refreshing ocean!",
        floors: 12,
        time_limit_secs: 55,
        fruit_frequency: 0.35,
        difficulty: 1.2,
    },
    LevelConfig {
        id: 3,
        name: "Forest Dream",
        description: "Explore the enchanted forest!",
        floors: 14,
        time_limit_secs: 50,
        fruit_frequency: 0.35,
        difficulty: 1.4,
    },
    LevelConfig {
        id: 4,
        name: "Desert Sunset",
        description: "Race against the setting sun!",
        floors: 16,
        time_limit_secs: 50,
        fruit_frequency: 0.3,
        difficulty: 1.6,
    },
    LevelConfig {
        id: 5,
        name: "Space Journey",
        description: "The final frontier awaits!",
        floors: 18,
        time_limit_secs: 45,
        fruit_frequency: 0.3,
        difficulty: 1.8,
    },
];

/// Look up a level by id (1-based)
pub fn level(id: u8) -> Option<&'static LevelConfig> {
    if id == 0 {
        return None;
    }
    LEVELS.get(id as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bounds() {
        assert!(level(0).is_none());
        assert_eq!(level(1).map(|l| l.name), Some("Sunny Meadow"));
        assert_eq!(level(MAX_LEVEL).map(|l| l.floors), Some(18));
        assert!(level(MAX_LEVEL + 1).is_none());
    }

    #[test]
    fn test_levels_get_harder() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].floors > pair[0].floors);
            assert!(pair[1].time_limit_secs <= pair[0].time_limit_secs);
            assert!(pair[1].difficulty > pair[0].difficulty);
        }
    }

    #[test]
    fn test_ids_match_positions() {
        for (i, config) in LEVELS.iter().enumerate() {
            assert_eq!(config.id as usize, i + 1);
            assert!((0.0..=1.0).contains(&config.fruit_frequency));
        }
        assert!(!LEVELS[4].has_next());
        assert!(LEVELS[0].has_next());
    }
}
