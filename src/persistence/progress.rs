//! Unlocked-level progress
//!
//! Stored as a single decimal integer. Anything that does not parse to a
//! level in 1..=MAX_LEVEL reads back as 1.

use super::store::KeyValueStore;
use crate::levels::MAX_LEVEL;

/// Storage key for the highest unlocked level
pub const PROGRESS_KEY: &str = "fruit_helix_unlocked_levels";

#[derive(Debug, Clone)]
pub struct Progress {
    unlocked: u8,
}

impl Default for Progress {
    fn default() -> Self {
        Self { unlocked: 1 }
    }
}

impl Progress {
    /// Read progress from `store`, falling back to level 1
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get(PROGRESS_KEY) else {
            log::info!("No saved progress, starting at level 1");
            return Self::default();
        };

        match parse_unlocked(&raw) {
            Some(unlocked) => {
                log::info!("Loaded progress: {} level(s) unlocked", unlocked);
                Self { unlocked }
            }
            None => {
                log::warn!("Ignoring malformed progress value {:?}", raw);
                Self::default()
            }
        }
    }

    /// Highest unlocked level, always within 1..=MAX_LEVEL
    pub fn unlocked_levels(&self) -> u8 {
        self.unlocked
    }

    pub fn is_unlocked(&self, level: u8) -> bool {
        (1..=self.unlocked).contains(&level)
    }

    /// Raise the unlocked level and save; returns whether anything changed
    pub fn unlock(&mut self, level: u8, store: &mut impl KeyValueStore) -> bool {
        let level = level.min(MAX_LEVEL);
        if level <= self.unlocked {
            return false;
        }
        self.unlocked = level;
        store.set(PROGRESS_KEY, &level.to_string());
        log::info!("Unlocked level {}", level);
        true
    }
}

fn parse_unlocked(raw: &str) -> Option<u8> {
    let value: u8 = raw.trim().parse().ok()?;
    (1..=MAX_LEVEL).contains(&value).then_some(value)
}
