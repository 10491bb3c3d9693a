//! Browser entry point
//!
//! Exposes the controller to a JavaScript presentation layer. Structured
//! data (snapshots, events) crosses the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::Game;
use crate::persistence::LocalStorage;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Fruit Helix starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorage>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            game: Game::new(LocalStorage, seed),
        }
    }

    pub fn show_level_select(&mut self) -> bool {
        self.game.show_level_select()
    }

    /// False when the level is unknown or still locked
    pub fn start_level(&mut self, id: u8) -> bool {
        match self.game.start_level(id) {
            Ok(()) => true,
            Err(e) => {
                log::info!("Level request denied: {}", e);
                false
            }
        }
    }

    pub fn retry_level(&mut self) -> bool {
        self.game.retry_level()
    }

    pub fn next_level(&mut self) -> bool {
        self.game.next_level()
    }

    pub fn return_to_menu(&mut self) -> bool {
        self.game.return_to_menu()
    }

    pub fn pause(&mut self) -> bool {
        self.game.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.game.resume()
    }

    pub fn set_rotation_intent(&mut self, intent: f32) {
        self.game.set_rotation_intent(intent);
    }

    /// Arrow keys currently held
    pub fn key_down(&mut self, left: bool, right: bool) {
        let intent = self.game.settings().keyboard_intent(left, right);
        self.game.set_rotation_intent(intent);
    }

    /// Horizontal drag since the last touch event, in CSS pixels
    pub fn touch_drag(&mut self, dx: f32) {
        let intent = self.game.settings().touch_intent(dx);
        self.game.set_rotation_intent(intent);
    }

    /// Advance by one animation frame (`dt_ms` since the previous one)
    pub fn update(&mut self, dt_ms: f64) -> u32 {
        self.game.update((dt_ms / 1000.0) as f32)
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|e| {
            log::warn!("Snapshot encode failed: {}", e);
            String::from("null")
        })
    }

    pub fn drain_events_json(&mut self) -> String {
        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Event encode failed: {}", e);
            String::from("[]")
        })
    }

    pub fn unlocked_levels(&self) -> u8 {
        self.game.unlocked_levels()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
