//! Demo autopilot
//!
//! Steers the tower the way a player would: turn the next gap under the
//! ball, but land first on a ring that still carries fruit.

use std::f32::consts::PI;

use super::gap::BALL_ANGLE;
use super::state::GameSession;
use crate::angle_delta;
use crate::consts::GAP_WIDTH;

/// Rotation intent for this frame, in units of `step` (radians per frame)
pub fn steer(session: &GameSession, step: f32) -> f32 {
    let bottom = session.ball.bottom();
    let Some(platform) = session.tower.platforms.iter().find(|p| p.y >= bottom) else {
        return 0.0;
    };

    let gap_center = platform.gap_start + GAP_WIDTH / 2.0 + session.tower.rotation;
    let target = if platform.pending_fruit().is_some() && !session.ball.grounded {
        // Middle of the solid arc
        gap_center + PI
    } else {
        gap_center
    };

    // Rotation needed to bring `target` round to the ball
    let delta = angle_delta(target, BALL_ANGLE);
    let per_frame = step * session.ball.speed_multiplier;
    if delta.abs() < per_frame / 2.0 {
        0.0
    } else {
        step * delta.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::levels::LEVELS;
    use crate::sim::clock::SimClock;
    use crate::sim::state::GamePhase;
    use crate::sim::tick::TickInput;
    use crate::sim::tower::Platform;

    #[test]
    fn test_steers_short_way_round() {
        // Gap centre just past the ball, counter-clockwise
        let session = GameSession::with_platforms(
            &LEVELS[0],
            0,
            vec![Platform::new(200.0, 0.3 - GAP_WIDTH / 2.0)],
        );
        assert_eq!(steer(&session, 0.05), -0.05);

        let session = GameSession::with_platforms(
            &LEVELS[0],
            0,
            vec![Platform::new(200.0, -0.3 - GAP_WIDTH / 2.0)],
        );
        assert_eq!(steer(&session, 0.05), 0.05);
    }

    #[test]
    fn test_holds_when_aligned() {
        let session =
            GameSession::with_platforms(&LEVELS[0], 0, vec![Platform::new(200.0, -GAP_WIDTH / 2.0)]);
        assert_eq!(steer(&session, 0.05), 0.0);
    }

    #[test]
    fn test_no_platforms_left() {
        let session = GameSession::with_platforms(&LEVELS[0], 0, Vec::new());
        assert_eq!(steer(&session, 0.05), 0.0);
    }

    #[test]
    fn test_autopilot_clears_every_level() {
        for (i, config) in LEVELS.iter().enumerate() {
            let mut session = GameSession::new(config, 1000 + i as u64);
            let mut clock = SimClock::new();
            for _ in 0..(config.time_limit_secs * 60) {
                let input = TickInput {
                    rotation_intent: steer(&session, 0.05),
                };
                clock.advance(&mut session, &input, FRAME_DT);
                if !session.is_playing() {
                    break;
                }
            }
            assert_eq!(session.run.phase, GamePhase::LevelComplete, "level {}", config.id);
        }
    }
}
