//! Catch detection, scoring and star placement
//!
//! Stars are caught by proximity: the ball only has to pass within two radii
//! of a star's centre. Each catch with the same ball is worth one point more
//! than the previous one.

use glam::Vec2;
use rand::Rng;

/// True when the ball is close enough to catch the star (inclusive)
#[inline]
pub fn caught(ball: Vec2, star: Vec2, ball_radius: f32) -> bool {
    ball.distance(star) <= 2.0 * ball_radius
}

/// Catches made with the current ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatchTally {
    count: u32,
}

impl CatchTally {
    /// Count a catch and return the points it is worth
    pub fn record(&mut self) -> u32 {
        self.count += 1;
        self.count
    }

    /// New ball, start over
    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Inclusive pixel rectangle stars may be placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRegion {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl PlacementRegion {
    /// Standard region for a screen of the given size
    pub fn for_screen(width: u32, height: u32) -> Self {
        use crate::consts::*;
        let max_x = (width as i32 - STAR_RIGHT_MARGIN).max(STAR_MIN_X);
        let max_y = (height as i32 - STAR_BOTTOM_MARGIN).max(STAR_MIN_Y);
        Self {
            min_x: STAR_MIN_X,
            max_x,
            min_y: STAR_MIN_Y,
            max_y,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x as f32
            && p.x <= self.max_x as f32
            && p.y >= self.min_y as f32
            && p.y <= self.max_y as f32
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(self.min_x..=self.max_x) as f32,
            rng.random_range(self.min_y..=self.max_y) as f32,
        )
    }
}

/// Place `count` stars, keeping them at least `min_separation` apart.
///
/// A candidate that keeps colliding is accepted after `attempts` rejections,
/// so a crowded region degrades to overlapping stars instead of stalling.
pub fn scatter_stars<R: Rng>(
    rng: &mut R,
    count: usize,
    region: PlacementRegion,
    min_separation: f32,
    attempts: u32,
) -> Vec<Vec2> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(count);
    while placed.len() < count {
        let mut candidate = region.sample(rng);
        let mut rejected = 0;
        while placed.iter().any(|p| p.distance(candidate) < min_separation) {
            if rejected >= attempts {
                log::warn!("star placement gave up after {} tries at {:?}", attempts, candidate);
                break;
            }
            rejected += 1;
            candidate = region.sample(rng);
        }
        placed.push(candidate);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_catch_boundary_is_inclusive() {
        let ball = Vec2::new(40.0, 30.0);
        assert!(caught(ball, Vec2::new(46.0, 30.0), 3.0));
        assert!(!caught(ball, Vec2::new(46.01, 30.0), 3.0));
    }

    #[test]
    fn test_tally_escalates_and_resets() {
        let mut tally = CatchTally::default();
        assert_eq!(tally.record(), 1);
        assert_eq!(tally.record(), 2);
        assert_eq!(tally.record(), 3);
        tally.reset();
        assert_eq!(tally.record(), 1);
    }

    #[test]
    fn test_scatter_respects_region_and_spacing() {
        let mut rng = Pcg32::seed_from_u64(7);
        let region = PlacementRegion::for_screen(128, 64);
        let stars = scatter_stars(&mut rng, 5, region, 7.0, 32);
        assert_eq!(stars.len(), 5);
        for (i, a) in stars.iter().enumerate() {
            assert!(region.contains(*a));
            for b in &stars[i + 1..] {
                assert!(a.distance(*b) >= 7.0);
            }
        }
    }

    #[test]
    fn test_scatter_terminates_when_crowded() {
        let mut rng = Pcg32::seed_from_u64(1);
        let region = PlacementRegion {
            min_x: 0,
            max_x: 2,
            min_y: 0,
            max_y: 2,
        };
        let stars = scatter_stars(&mut rng, 20, region, 50.0, 4);
        assert_eq!(stars.len(), 20);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let region = PlacementRegion::for_screen(128, 64);
        let a = scatter_stars(&mut Pcg32::seed_from_u64(99), 5, region, 7.0, 32);
        let b = scatter_stars(&mut Pcg32::seed_from_u64(99), 5, region, 7.0, 32);
        assert_eq!(a, b);
    }
}
