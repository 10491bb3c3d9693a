//! Game controller
//!
//! Owns the current session, the fixed-timestep clock, saved progress and
//! settings, and turns presentation requests (start, retry, pause, ...) into
//! phase transitions. Requests that make no sense in the current phase are
//! ignored and reported as `false`.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::levels::{self, LevelConfig, MAX_LEVEL};
use crate::persistence::{KeyValueStore, Progress};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameSession, SimClock, Snapshot, TickInput};

/// Why a level could not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelDenied {
    /// No level with this id
    Unknown(u8),
    /// Level exists but has not been unlocked yet
    Locked { requested: u8, unlocked: u8 },
}

impl fmt::Display for LevelDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelDenied::Unknown(id) => write!(f, "level {} does not exist", id),
            LevelDenied::Locked { requested, unlocked } => write!(
                f,
                "level {} is locked ({} of {} unlocked)",
                requested, unlocked, MAX_LEVEL
            ),
        }
    }
}

impl std::error::Error for LevelDenied {}

pub struct Game<S: KeyValueStore> {
    store: S,
    progress: Progress,
    settings: Settings,
    session: GameSession,
    clock: SimClock,
    /// Draws one tower seed per level start
    rng: Pcg32,
    rotation_intent: f32,
    /// Events carried over from replaced sessions or raised by the controller
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore> Game<S> {
    /// Load progress and settings from `store` and open on the menu
    pub fn new(store: S, seed: u64) -> Self {
        let progress = Progress::load(&store);
        let settings = Settings::load(&store);
        Self {
            store,
            progress,
            settings,
            session: GameSession::idle(),
            clock: SimClock::new(),
            rng: Pcg32::seed_from_u64(seed),
            rotation_intent: 0.0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.session.run.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn unlocked_levels(&self) -> u8 {
        self.progress.unlocked_levels()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings and persist them
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(&mut self.store);
    }

    /// Menu -> LevelSelect
    pub fn show_level_select(&mut self) -> bool {
        if self.phase() != GamePhase::Menu {
            return false;
        }
        self.session.run.phase = GamePhase::LevelSelect;
        true
    }

    /// Start level `id` if it exists and is unlocked
    pub fn start_level(&mut self, id: u8) -> Result<(), LevelDenied> {
        let config = levels::level(id).ok_or(LevelDenied::Unknown(id))?;
        if !self.progress.is_unlocked(id) {
            return Err(LevelDenied::Locked {
                requested: id,
                unlocked: self.progress.unlocked_levels(),
            });
        }
        self.begin(config);
        Ok(())
    }

    /// Replay the current level after it ended
    pub fn retry_level(&mut self) -> bool {
        if !matches!(self.phase(), GamePhase::LevelComplete | GamePhase::GameOver) {
            return false;
        }
        let config = self.session.config;
        self.begin(&config);
        true
    }

    /// Move on after finishing a level; no-op on the last level
    pub fn next_level(&mut self) -> bool {
        if self.phase() != GamePhase::LevelComplete {
            return false;
        }
        let current = self.session.run.level;
        if current >= MAX_LEVEL {
            return false;
        }
        self.start_level(current + 1).is_ok()
    }

    /// Abandon whatever is running and go back to the title screen
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase() == GamePhase::Menu {
            return false;
        }
        self.replace_session(GameSession::idle());
        log::info!("Returned to menu");
        true
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase() != GamePhase::Playing {
            return false;
        }
        self.session.run.phase = GamePhase::Paused;
        log::info!("Paused");
        true
    }

    /// Paused -> Playing, continuing from the exact paused state
    pub fn resume(&mut self) -> bool {
        if self.phase() != GamePhase::Paused {
            return false;
        }
        self.session.run.phase = GamePhase::Playing;
        log::info!("Resumed");
        true
    }

    /// Signed rotation per frame; applies until changed
    pub fn set_rotation_intent(&mut self, intent: f32) {
        self.rotation_intent = intent;
    }

    /// Advance by `dt` seconds of host time; returns the frames simulated
    pub fn update(&mut self, dt: f32) -> u32 {
        let input = TickInput {
            rotation_intent: self.rotation_intent,
        };
        let frames = self.clock.advance(&mut self.session, &input, dt);
        self.save_unlock();
        frames
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.session.snapshot()
    }

    /// Take every event raised since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.events);
        events.append(&mut self.session.drain_events());
        events
    }

    fn begin(&mut self, config: &LevelConfig) {
        let seed: u64 = self.rng.random();
        self.replace_session(GameSession::new(config, seed));
        self.clock.reset();
        self.rotation_intent = 0.0;
        log::info!(
            "Starting level {} ({}) with seed {}",
            config.id,
            config.name,
            seed
        );
    }

    fn replace_session(&mut self, session: GameSession) {
        let old = std::mem::replace(&mut self.session, session);
        self.events.extend(old.events);
    }

    /// Persist an unlock requested by a completed level
    fn save_unlock(&mut self) {
        let Some(level) = self.session.pending_unlock.take() else {
            return;
        };
        if self.progress.unlock(level, &mut self.store) {
            self.session.emit(GameEvent::LeveledUp { unlocked: level });
        }
    }
}
