//! Game settings and preferences
//!
//! Persisted separately from progress, as JSON under its own key.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Rotation intent while an arrow key is held (radians per frame)
    pub keyboard_rotation_step: f32,
    /// Horizontal drag distance that equals one keyboard step (pixels)
    pub touch_pixels_per_step: f32,

    // === Audio ===
    pub sound_enabled: bool,
    pub music_enabled: bool,

    // === Accessibility ===
    /// Reduced motion (no camera easing, no particle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyboard_rotation_step: 0.05,
            touch_pixels_per_step: 50.0,
            sound_enabled: true,
            music_enabled: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "fruit_helix_settings";

    /// Rotation intent from the arrow keys; both or neither held cancels out
    pub fn keyboard_intent(&self, left: bool, right: bool) -> f32 {
        match (left, right) {
            (true, false) => -self.keyboard_rotation_step,
            (false, true) => self.keyboard_rotation_step,
            _ => 0.0,
        }
    }

    /// Rotation intent from a horizontal drag of `dx` pixels
    pub fn touch_intent(&self, dx: f32) -> f32 {
        if self.touch_pixels_per_step <= 0.0 {
            return 0.0;
        }
        dx / self.touch_pixels_per_step * self.keyboard_rotation_step
    }

    /// Load settings from `store`, using defaults when missing or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to `store`
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_keyboard_intent() {
        let settings = Settings::default();
        assert_eq!(settings.keyboard_intent(true, false), -0.05);
        assert_eq!(settings.keyboard_intent(false, true), 0.05);
        assert_eq!(settings.keyboard_intent(true, true), 0.0);
        assert_eq!(settings.keyboard_intent(false, false), 0.0);
    }

    #[test]
    fn test_touch_intent_scales_with_drag() {
        let settings = Settings::default();
        assert!((settings.touch_intent(50.0) - 0.05).abs() < 1e-6);
        assert!((settings.touch_intent(-100.0) + 0.1).abs() < 1e-6);
        assert_eq!(settings.touch_intent(0.0), 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            sound_enabled: false,
            keyboard_rotation_step: 0.08,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_bad_json() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"music_enabled":false}"#);
        let loaded = Settings::load(&store);
        assert!(!loaded.music_enabled);
        assert_eq!(loaded.keyboard_rotation_step, 0.05);

        store.set(Settings::STORAGE_KEY, "not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
