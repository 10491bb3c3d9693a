//! Fixed timestep driver
//!
//! Turns variable frame times from the host into whole simulation frames and
//! one-second countdown ticks. Nothing accumulates unless the session is
//! playing, so a pause freezes physics, the countdown and any running boost.

use serde::{Deserialize, Serialize};

use super::state::GameSession;
use super::tick::{TickInput, countdown_tick, tick};
use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Largest host frame accepted in one call (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Unsimulated time (seconds)
    accumulator: f32,
    /// Time toward the next countdown tick (seconds)
    second_accumulator: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget partial frames (level start, retry)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.second_accumulator = 0.0;
    }

    /// Advance by `dt` seconds of host time; returns the number of frames run
    pub fn advance(&mut self, session: &mut GameSession, input: &TickInput, dt: f32) -> u32 {
        if !session.is_playing() {
            return 0;
        }

        let dt = dt.clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            tick(session, input);
            self.accumulator -= FRAME_DT;
            substeps += 1;
            if !session.is_playing() {
                self.accumulator = 0.0;
                return substeps;
            }
        }

        self.second_accumulator += dt;
        while self.second_accumulator >= 1.0 {
            self.second_accumulator -= 1.0;
            countdown_tick(session);
            if !session.is_playing() {
                self.second_accumulator = 0.0;
                break;
            }
        }

        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LEVELS;
    use crate::sim::state::GamePhase;
    use crate::sim::tower::Platform;

    fn resting_session() -> GameSession {
        // Solid ring under the ball so the level never ends by falling
        GameSession::with_platforms(&LEVELS[0], 0, vec![Platform::new(200.0, 3.0)])
    }

    #[test]
    fn test_runs_whole_frames() {
        let mut clock = SimClock::new();
        let mut session = resting_session();
        let frames = clock.advance(&mut session, &TickInput::default(), FRAME_DT * 3.5);
        assert_eq!(frames, 3);
        assert_eq!(session.time_ticks, 3);
        // The half frame carries over
        let frames = clock.advance(&mut session, &TickInput::default(), FRAME_DT * 0.6);
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_substeps_capped() {
        let mut clock = SimClock::new();
        let mut session = resting_session();
        // Long stalls are clamped to MAX_FRAME_TIME (about six frames)
        let frames = clock.advance(&mut session, &TickInput::default(), 10.0);
        assert!((5..=MAX_SUBSTEPS).contains(&frames));
        assert_eq!(session.time_ticks, frames as u64);
    }

    #[test]
    fn test_countdown_once_per_second() {
        let mut clock = SimClock::new();
        let mut session = resting_session();
        for _ in 0..300 {
            clock.advance(&mut session, &TickInput::default(), 0.025);
        }
        // 7.5 seconds of host time
        assert_eq!(session.run.time_remaining_secs, 53);
    }

    #[test]
    fn test_paused_clock_does_not_accumulate() {
        let mut clock = SimClock::new();
        let mut session = resting_session();
        clock.advance(&mut session, &TickInput::default(), 0.05);
        session.run.phase = GamePhase::Paused;
        for _ in 0..100 {
            assert_eq!(clock.advance(&mut session, &TickInput::default(), 0.1), 0);
        }
        session.run.phase = GamePhase::Playing;
        clock.advance(&mut session, &TickInput::default(), 0.05);
        assert_eq!(session.run.time_remaining_secs, 60);
    }

    #[test]
    fn test_time_runs_out() {
        let mut clock = SimClock::new();
        let mut session = resting_session();
        session.run.time_remaining_secs = 1;
        for _ in 0..100 {
            clock.advance(&mut session, &TickInput::default(), 0.05);
        }
        assert_eq!(session.run.phase, GamePhase::GameOver);
        assert_eq!(session.run.time_remaining_secs, 0);
    }
}
