//! Game state and core simulation types
//!
//! A `GameSession` owns everything one level attempt mutates. It is built
//! fresh on every level start and handed explicitly to the tick functions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fruit::FruitKind;
use super::tower::{Platform, Tower, generate_platforms};
use crate::consts::*;
use crate::levels::{LEVELS, LevelConfig};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Menu,
    /// Choosing among unlocked levels
    LevelSelect,
    /// Active gameplay
    Playing,
    /// Physics and countdown frozen
    Paused,
    /// Ball reached the bottom of the tower
    LevelComplete,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    OutOfLives,
    TimeExpired,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::OutOfLives => "No lives left!",
            GameOverReason::TimeExpired => "Time's up!",
        }
    }
}

/// Discrete events for sound and UI triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GapPassed { floor: u32 },
    Bounced { floor: u32 },
    FruitCollected(FruitKind),
    SpeedBoostEnded,
    /// A new level was unlocked
    LeveledUp { unlocked: u8 },
    LifeLost { lives_left: u8 },
    LevelComplete { score: u32, time_bonus: u32 },
    GameOver(GameOverReason),
}

/// The ball. Only its vertical position changes; the tower turns around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// `x` is fixed at the tower axis, `y` grows downward
    pub pos: Vec2,
    pub vel_y: f32,
    pub radius: f32,
    pub gravity: f32,
    /// Resting on a platform
    pub grounded: bool,
    /// 1 normally, 2 while a Speed fruit is active
    pub speed_multiplier: f32,
    /// Session clock time (ms) at which the boost wears off
    pub speed_boost_expires_ms: Option<f64>,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH / 2.0, BALL_SPAWN_Y),
            vel_y: 0.0,
            radius: BALL_RADIUS,
            gravity: GRAVITY,
            grounded: false,
            speed_multiplier: 1.0,
            speed_boost_expires_ms: None,
        }
    }
}

impl Ball {
    /// Lowest point of the ball
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Put the ball back at `y` with no velocity
    pub fn respawn_at(&mut self, y: f32) {
        self.pos.y = y;
        self.vel_y = 0.0;
        self.grounded = false;
    }
}

/// Score, lives and clock for one level attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    /// Always within [0, MAX_LIVES]
    pub lives: u8,
    pub time_remaining_secs: u32,
    pub level: u8,
    pub phase: GamePhase,
}

/// Summary kept after the ball reaches the bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCompletion {
    pub level: u8,
    pub score: u32,
    pub time_bonus: u32,
    pub final_score: u32,
    pub has_next: bool,
}

/// Everything a single level attempt owns
#[derive(Debug, Clone, Serialize)]
pub struct GameSession {
    /// Seed the tower was generated from
    pub seed: u64,
    pub config: LevelConfig,
    pub run: RunState,
    pub ball: Ball,
    pub tower: Tower,
    /// Frames simulated while playing
    pub time_ticks: u64,
    pub completion: Option<LevelCompletion>,
    pub game_over: Option<GameOverReason>,
    /// Level to unlock, picked up once by the controller
    #[serde(skip)]
    pub pending_unlock: Option<u8>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a level with a freshly generated tower
    pub fn new(config: &LevelConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = generate_platforms(config, &mut rng);
        Self::with_platforms(config, seed, platforms)
    }

    /// Start a level on a given platform layout
    pub fn with_platforms(config: &LevelConfig, seed: u64, platforms: Vec<Platform>) -> Self {
        Self {
            seed,
            config: *config,
            run: RunState {
                score: 0,
                lives: STARTING_LIVES,
                time_remaining_secs: config.time_limit_secs,
                level: config.id,
                phase: GamePhase::Playing,
            },
            ball: Ball::default(),
            tower: Tower::new(platforms),
            time_ticks: 0,
            completion: None,
            game_over: None,
            pending_unlock: None,
            events: Vec::new(),
        }
    }

    /// Idle session shown behind the menus
    pub fn idle() -> Self {
        let mut session = Self::with_platforms(&LEVELS[0], 0, Vec::new());
        session.run.phase = GamePhase::Menu;
        session
    }

    /// Session clock in milliseconds (frozen while not playing)
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * FRAME_MS
    }

    pub fn is_playing(&self) -> bool {
        self.run.phase == GamePhase::Playing
    }

    /// Depth the ball must pass to finish the level
    ///
    /// One gap span below the last platform; with no platforms, the spawn height.
    pub fn completion_depth(&self) -> f32 {
        match self.tower.last_platform_y() {
            Some(y) => y + PLATFORM_GAP,
            None => BALL_SPAWN_Y,
        }
    }

    /// 1-based floor the ball is currently on, clamped to the tower
    pub fn current_floor(&self) -> u32 {
        let floors = self.tower.platforms.len() as i64;
        if floors == 0 {
            return 1;
        }
        let floor = ((self.ball.pos.y - PLATFORM_BASE_Y) / PLATFORM_GAP).floor() as i64 + 1;
        floor.clamp(1, floors) as u32
    }

    /// Milliseconds of Speed boost left
    pub fn speed_boost_remaining_ms(&self) -> Option<f64> {
        self.ball
            .speed_boost_expires_ms
            .map(|expires| (expires - self.now_ms()).max(0.0))
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Immutable view for the presentation layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.run.phase,
            level: self.run.level,
            level_name: self.config.name,
            score: self.run.score,
            lives: self.run.lives,
            time_remaining_secs: self.run.time_remaining_secs,
            current_floor: self.current_floor(),
            total_floors: self.tower.platforms.len() as u32,
            speed_boost_remaining_ms: self.speed_boost_remaining_ms(),
            ball: &self.ball,
            tower: &self.tower,
            completion: self.completion,
            game_over: self.game_over,
        }
    }
}

/// Read-only state handed to rendering each frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub level: u8,
    pub level_name: &'static str,
    pub score: u32,
    pub lives: u8,
    pub time_remaining_secs: u32,
    pub current_floor: u32,
    pub total_floors: u32,
    pub speed_boost_remaining_ms: Option<f64>,
    pub ball: &'a Ball,
    pub tower: &'a Tower,
    pub completion: Option<LevelCompletion>,
    pub game_over: Option<GameOverReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(&LEVELS[0], 12345);
        assert_eq!(session.run.score, 0);
        assert_eq!(session.run.lives, 3);
        assert_eq!(session.run.time_remaining_secs, 60);
        assert_eq!(session.run.phase, GamePhase::Playing);
        assert_eq!(session.tower.platforms.len(), 10);
        assert_eq!(session.tower.rotation, 0.0);
        assert_eq!(session.ball.pos.y, BALL_SPAWN_Y);
        assert_eq!(session.ball.speed_multiplier, 1.0);
    }

    #[test]
    fn test_completion_depth() {
        let session = GameSession::new(&LEVELS[0], 1);
        // Last platform at 200 + 9 * 50 = 650
        assert!((session.completion_depth() - 700.0).abs() < 1e-4);

        let empty = GameSession::with_platforms(&LEVELS[0], 1, Vec::new());
        assert_eq!(empty.completion_depth(), BALL_SPAWN_Y);
    }

    #[test]
    fn test_current_floor_clamped() {
        let mut session = GameSession::new(&LEVELS[0], 1);
        assert_eq!(session.current_floor(), 1);
        session.ball.pos.y = 260.0;
        assert_eq!(session.current_floor(), 2);
        session.ball.pos.y = 5000.0;
        assert_eq!(session.current_floor(), 10);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(&LEVELS[1], 9);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"level_name\":\"Ocean Breeze\""));
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}
