//! Tower of ring platforms and its generator

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::fruit::{Fruit, FruitKind};
use crate::consts::*;
use crate::levels::LevelConfig;
use crate::polar_to_cartesian;

/// A ring platform with one angular gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Absolute vertical position of the ring's top surface
    pub y: f32,
    /// Gap start (radians, tower space)
    pub gap_start: f32,
    /// Gap end, always `gap_start + GAP_WIDTH` (may exceed 2π)
    pub gap_end: f32,
    pub fruit: Option<Fruit>,
    /// Set after a pass until the ball leaves the band (one score per crossing)
    #[serde(skip)]
    pub pass_latched: bool,
}

impl Platform {
    pub fn new(y: f32, gap_start: f32) -> Self {
        Self {
            y,
            gap_start,
            gap_end: gap_start + GAP_WIDTH,
            fruit: None,
            pass_latched: false,
        }
    }

    pub fn with_fruit(mut self, kind: FruitKind, angle: f32) -> Self {
        self.fruit = Some(Fruit::new(kind, angle));
        self
    }

    /// Uncollected fruit, if any
    pub fn pending_fruit(&self) -> Option<&Fruit> {
        self.fruit.as_ref().filter(|f| !f.collected)
    }
}

/// The rotating tower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    /// Accumulated rotation (radians, unbounded)
    pub rotation: f32,
    /// Signed rotation per frame, already scaled by the ball's speed multiplier
    pub rotation_speed: f32,
    /// Smoothed camera offset following the ball
    pub scroll_offset: f32,
    pub radius: f32,
    /// Ordered top to bottom
    pub platforms: Vec<Platform>,
}

impl Tower {
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self {
            rotation: 0.0,
            rotation_speed: 0.0,
            scroll_offset: 0.0,
            radius: TOWER_RADIUS,
            platforms,
        }
    }

    /// Vertical position of the lowest platform, if any
    pub fn last_platform_y(&self) -> Option<f32> {
        self.platforms.last().map(|p| p.y)
    }

    /// Position of a fruit around the ring in view space (x across, y depth)
    ///
    /// The ball sits at angle 0, so a fruit at offset 0 is right under it.
    pub fn fruit_offset(&self, fruit: &Fruit) -> glam::Vec2 {
        polar_to_cartesian(self.radius, fruit.angle + self.rotation)
    }
}

/// Vertical position of platform `index`
pub fn platform_y(index: u32) -> f32 {
    PLATFORM_BASE_Y + index as f32 * PLATFORM_GAP
}

/// Generate the platform stack for a level
///
/// Spacing is fixed; gap angles, fruit placement and fruit kinds are drawn
/// from `rng`. Fruits are placed on the solid part of the ring only.
pub fn generate_platforms<R: Rng + ?Sized>(config: &LevelConfig, rng: &mut R) -> Vec<Platform> {
    use std::f32::consts::TAU;

    let fruit_chance = config.fruit_frequency.clamp(0.0, 1.0) as f64;
    let mut platforms = Vec::with_capacity(config.floors as usize);

    for i in 0..config.floors {
        let gap_start = rng.random_range(0.0..TAU);
        let mut platform = Platform::new(platform_y(i), gap_start);

        if rng.random_bool(fruit_chance) {
            let kind = FruitKind::ALL[rng.random_range(0..FruitKind::ALL.len())];
            // Uniform over the complement [gap_end, gap_start + 2π)
            let angle = platform.gap_end + rng.random::<f32>() * (TAU - GAP_WIDTH);
            platform = platform.with_fruit(kind, angle);
        }

        platforms.push(platform);
    }

    log::debug!(
        "Generated level {} tower: {} floors, {} fruits",
        config.id,
        platforms.len(),
        platforms.iter().filter(|p| p.fruit.is_some()).count()
    );

    platforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LEVELS;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::TAU;

    #[test]
    fn test_spacing_is_fixed() {
        let mut rng = Pcg32::seed_from_u64(7);
        let platforms = generate_platforms(&LEVELS[0], &mut rng);
        assert_eq!(platforms.len(), 10);
        assert_eq!(platforms[0].y, PLATFORM_BASE_Y);
        for pair in platforms.windows(2) {
            assert!((pair[1].y - pair[0].y - PLATFORM_GAP).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_floors_is_empty() {
        let config = LevelConfig {
            floors: 0,
            ..LEVELS[0]
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate_platforms(&config, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_tower() {
        let a = generate_platforms(&LEVELS[2], &mut Pcg32::seed_from_u64(42));
        let b = generate_platforms(&LEVELS[2], &mut Pcg32::seed_from_u64(42));
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.gap_start, pb.gap_start);
            assert_eq!(pa.fruit.as_ref().map(|f| f.kind), pb.fruit.as_ref().map(|f| f.kind));
        }
    }

    #[test]
    fn test_fruit_frequency_extremes() {
        let always = LevelConfig {
            fruit_frequency: 1.0,
            ..LEVELS[4]
        };
        let never = LevelConfig {
            fruit_frequency: 0.0,
            ..LEVELS[4]
        };
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(generate_platforms(&always, &mut rng).iter().all(|p| p.fruit.is_some()));
        assert!(generate_platforms(&never, &mut rng).iter().all(|p| p.fruit.is_none()));
    }

    #[test]
    fn test_fruit_offset_follows_rotation() {
        let mut tower = Tower::new(vec![Platform::new(200.0, 1.0).with_fruit(FruitKind::Life, 2.0)]);
        let fruit = tower.platforms[0].fruit.clone().unwrap();
        tower.rotation = -2.0;
        let offset = tower.fruit_offset(&fruit);
        // Rotated under the ball: angle 0, straight ahead
        assert!((offset.x - TOWER_RADIUS).abs() < 1e-3);
        assert!(offset.y.abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn generated_gaps_and_fruits_are_well_formed(seed in any::<u64>(), level_idx in 0usize..5) {
            let config = LevelConfig { fruit_frequency: 1.0, ..LEVELS[level_idx] };
            let platforms = generate_platforms(&config, &mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(platforms.len(), config.floors as usize);
            for p in &platforms {
                prop_assert!((0.0..TAU).contains(&p.gap_start));
                prop_assert!((p.gap_end - p.gap_start - GAP_WIDTH).abs() < 1e-5);
                let fruit = p.fruit.as_ref().unwrap();
                prop_assert!(!fruit.collected);
                // Offset from the gap start lands in the solid arc [GAP_WIDTH, 2π)
                let offset = fruit.angle - p.gap_start;
                prop_assert!(offset >= GAP_WIDTH - 1e-5);
                prop_assert!(offset < TAU + 1e-5);
            }
        }
    }
}
