//! Gap geometry and the pass-or-bounce decision
//!
//! The ball never moves sideways: it sits at angle 0 while the tower turns
//! around it. A platform's gap is an angular interval in tower space, so the
//! ball falls through when the rotated interval covers angle 0.
//!
//! Gap bounds are stored unwrapped (`gap_end` may exceed 2π) and only wrapped
//! here, at query time.

use serde::{Deserialize, Serialize};

use super::tower::Platform;
use crate::consts::PLATFORM_HEIGHT;
use crate::wrap_angle;

/// Angular position of the ball relative to the tower
pub const BALL_ANGLE: f32 = 0.0;

/// Outcome of the ball reaching a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossing {
    /// Gap is under the ball, it falls through
    Pass,
    /// Solid ring under the ball, it lands
    Bounce,
}

/// Check if an angle lies inside a gap after rotating the gap by `rotation`
///
/// Bounds are inclusive on both ends.
pub fn angle_in_gap(theta: f32, gap_start: f32, gap_end: f32, rotation: f32) -> bool {
    let theta = wrap_angle(theta);
    let start = wrap_angle(gap_start + rotation);
    let end = wrap_angle(gap_end + rotation);

    if start <= end {
        // No wraparound
        theta >= start && theta <= end
    } else {
        // Gap straddles 0/2π
        theta >= start || theta <= end
    }
}

/// Decide whether the ball passes through `platform` at the given tower rotation
pub fn resolve(rotation: f32, platform: &Platform) -> Crossing {
    if angle_in_gap(BALL_ANGLE, platform.gap_start, platform.gap_end, rotation) {
        Crossing::Pass
    } else {
        Crossing::Bounce
    }
}

/// Check if the ball's bottom edge swept through a platform's band this frame
///
/// `prev_bottom..=bottom` is the path of the ball's lowest point; the band is
/// `[platform_y, platform_y + PLATFORM_HEIGHT]`. Only downward motion counts,
/// so a resting or rising ball never triggers a check.
pub fn swept_into_band(prev_bottom: f32, bottom: f32, velocity_y: f32, platform_y: f32) -> bool {
    if velocity_y <= 0.0 {
        return false;
    }
    let band_top = platform_y;
    let band_bottom = platform_y + PLATFORM_HEIGHT;
    // Resting exactly on the surface is outside the band; any further descent enters it
    bottom > band_top && prev_bottom <= band_bottom
}
