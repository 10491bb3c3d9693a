//! Fixed timestep simulation tick
//!
//! Two entry points drive a session: `tick` once per frame for physics and
//! `countdown_tick` once per second for the level clock. Both do nothing
//! unless the session is playing.

use super::fruit::FruitEffect;
use super::gap::{Crossing, resolve, swept_into_band};
use super::state::{GameEvent, GameOverReason, GamePhase, GameSession, LevelCompletion};
use crate::consts::*;
use crate::levels::MAX_LEVEL;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Signed rotation per frame requested by the player, before the speed boost
    pub rotation_intent: f32,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    if !session.is_playing() {
        return;
    }

    session.time_ticks += 1;
    expire_speed_boost(session);

    // Rotate the tower
    session.tower.rotation_speed = input.rotation_intent * session.ball.speed_multiplier;
    session.tower.rotation += session.tower.rotation_speed;

    // Gravity
    let prev_bottom = session.ball.bottom();
    session.ball.vel_y += session.ball.gravity;
    session.ball.pos.y += session.ball.vel_y;

    resolve_platforms(session, prev_bottom);

    // Reached the bottom of the tower
    if session.ball.pos.y > session.completion_depth() {
        level_complete(session);
        return;
    }

    // Fell far below the view without finishing
    if session.ball.pos.y > session.tower.scroll_offset + CANVAS_HEIGHT + OVERFLOW_MARGIN {
        lose_life(session);
        if !session.is_playing() {
            return;
        }
    }

    // Camera follows the ball
    let target = (session.ball.pos.y - CAMERA_LEAD).max(0.0);
    session.tower.scroll_offset += (target - session.tower.scroll_offset) * CAMERA_SMOOTHING;
}

/// Check every platform the ball's bottom swept through this frame
fn resolve_platforms(session: &mut GameSession, prev_bottom: f32) {
    let rotation = session.tower.rotation;
    let bottom = session.ball.bottom();
    let vel_y = session.ball.vel_y;

    for idx in 0..session.tower.platforms.len() {
        let platform = &mut session.tower.platforms[idx];
        if !swept_into_band(prev_bottom, bottom, vel_y, platform.y) {
            platform.pass_latched = false;
            continue;
        }
        if platform.pass_latched {
            continue;
        }

        let floor = idx as u32 + 1;
        match resolve(rotation, platform) {
            Crossing::Pass => {
                platform.pass_latched = true;
                session.ball.grounded = false;
                session.run.score += GAP_PASS_SCORE;
                session.emit(GameEvent::GapPassed { floor });
                log::debug!("Passed floor {} (score {})", floor, session.run.score);
            }
            Crossing::Bounce => {
                let surface = platform.y;
                let has_fruit = platform.pending_fruit().is_some();

                let landed = !session.ball.grounded;
                session.ball.pos.y = surface - session.ball.radius;
                session.ball.vel_y = 0.0;
                session.ball.grounded = true;
                if landed {
                    session.emit(GameEvent::Bounced { floor });
                }

                if has_fruit {
                    collect_fruit(session, idx);
                }
                // Ball now rests on this ring; nothing below can be reached this frame
                break;
            }
        }
    }
}

/// Collect the fruit on platform `platform_idx` and apply its effect
///
/// Returns false (and changes nothing) if there is no fruit or it was
/// already collected.
pub fn collect_fruit(session: &mut GameSession, platform_idx: usize) -> bool {
    let Some(kind) = session
        .tower
        .platforms
        .get_mut(platform_idx)
        .and_then(|p| p.fruit.as_mut())
        .and_then(|f| f.take())
    else {
        return false;
    };

    match kind.effect() {
        FruitEffect::SpeedBoost { duration_ms } => {
            // A second banana restarts the timer rather than stacking
            session.ball.speed_multiplier = SPEED_BOOST_MULTIPLIER;
            session.ball.speed_boost_expires_ms = Some(session.now_ms() + duration_ms as f64);
        }
        FruitEffect::ExtraLife => {
            session.run.lives = (session.run.lives + 1).min(MAX_LIVES);
        }
        FruitEffect::BonusTime { bonus_secs } => {
            session.run.time_remaining_secs += bonus_secs;
        }
    }

    session.run.score += FRUIT_SCORE;
    session.emit(GameEvent::FruitCollected(kind));
    log::debug!("Collected {} {}", kind.emoji(), kind.name());
    true
}

/// Drop the Speed boost once its expiry time has passed
fn expire_speed_boost(session: &mut GameSession) {
    let Some(expires) = session.ball.speed_boost_expires_ms else {
        return;
    };
    if session.now_ms() >= expires {
        session.ball.speed_multiplier = 1.0;
        session.ball.speed_boost_expires_ms = None;
        session.emit(GameEvent::SpeedBoostEnded);
    }
}

/// Lose a life; out of lives ends the run, otherwise respawn near the camera
pub fn lose_life(session: &mut GameSession) {
    if !session.is_playing() {
        return;
    }

    session.run.lives = session.run.lives.saturating_sub(1);
    session.emit(GameEvent::LifeLost {
        lives_left: session.run.lives,
    });

    if session.run.lives == 0 {
        game_over(session, GameOverReason::OutOfLives);
    } else {
        let respawn_y = BALL_SPAWN_Y + session.tower.scroll_offset;
        session.ball.respawn_at(respawn_y);
        log::info!("Life lost, {} left", session.run.lives);
    }
}

/// One second of the level clock
pub fn countdown_tick(session: &mut GameSession) {
    if !session.is_playing() {
        return;
    }

    session.run.time_remaining_secs = session.run.time_remaining_secs.saturating_sub(1);
    if session.run.time_remaining_secs == 0 {
        game_over(session, GameOverReason::TimeExpired);
    }
}

/// Finish the level: compute the time bonus and request the next unlock
pub fn level_complete(session: &mut GameSession) {
    if !session.is_playing() {
        return;
    }

    let level = session.run.level;
    let score = session.run.score;
    let time_bonus = session.run.time_remaining_secs * TIME_BONUS_PER_SECOND;

    if level < MAX_LEVEL {
        session.pending_unlock = Some(level + 1);
    }

    session.completion = Some(LevelCompletion {
        level,
        score,
        time_bonus,
        final_score: score + time_bonus,
        has_next: level < MAX_LEVEL,
    });
    session.run.phase = GamePhase::LevelComplete;
    session.emit(GameEvent::LevelComplete { score, time_bonus });
    log::info!(
        "Level {} complete: score {} + time bonus {}",
        level,
        score,
        time_bonus
    );
}

/// End the run (once)
fn game_over(session: &mut GameSession, reason: GameOverReason) {
    if session.run.phase == GamePhase::GameOver {
        return;
    }
    session.run.phase = GamePhase::GameOver;
    session.game_over = Some(reason);
    session.emit(GameEvent::GameOver(reason));
    log::info!(
        "Game over on level {}: {} (score {})",
        session.run.level,
        reason.as_str(),
        session.run.score
    );
}
