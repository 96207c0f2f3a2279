//! The running direction that successive placement attempts follow.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random walk over directions from the planet center.
///
/// Each step either jitters the current direction, which keeps trees in
/// clusters, or jumps to a fresh uniformly distributed direction.
#[derive(Clone, Debug)]
pub struct DirectionWalk {
    direction: Vec3,
    rng: ChaCha8Rng,
}

impl DirectionWalk {
    /// Start at +X with a seeded generator.
    pub fn new(seed: u64) -> Self {
        Self {
            direction: Vec3::X,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current direction. Not necessarily unit length after jitter steps.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Advance by one attempt and return the new direction.
    ///
    /// `grouping_chance` is a percentage; `neighbor_distance` bounds the
    /// per-axis jitter.
    pub fn step(&mut self, grouping_chance: f32, neighbor_distance: f32) -> Vec3 {
        if self.rng.random::<f32>() * 100.0 < grouping_chance {
            let d = neighbor_distance.abs();
            self.direction += Vec3::new(
                self.rng.random_range(-d..=d),
                self.rng.random_range(-d..=d),
                self.rng.random_range(-d..=d),
            );
        } else {
            self.direction = self.random_unit();
        }
        self.direction
    }

    /// Uniform point on the unit sphere.
    fn random_unit(&mut self) -> Vec3 {
        let theta = self.rng.random::<f32>() * TAU;
        let phi = (1.0 - 2.0 * self.rng.random::<f32>()).acos();
        Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_along_x() {
        assert_eq!(DirectionWalk::new(1).direction(), Vec3::X);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let mut a = DirectionWalk::new(99);
        let mut b = DirectionWalk::new(99);
        for _ in 0..200 {
            assert_eq!(a.step(50.0, 0.1), b.step(50.0, 0.1));
        }
    }

    #[test]
    fn test_full_grouping_stays_near_start() {
        let mut walk = DirectionWalk::new(5);
        for _ in 0..10 {
            let dir = walk.step(100.0, 0.01);
            assert!((dir - Vec3::X).length() < 0.2, "grouped walk drifted to {dir:?}");
        }
    }

    #[test]
    fn test_zero_neighbor_distance_keeps_direction() {
        let mut walk = DirectionWalk::new(5);
        for _ in 0..10 {
            assert_eq!(walk.step(100.0, 0.0), Vec3::X);
        }
    }

    #[test]
    fn test_no_grouping_gives_unit_vectors() {
        let mut walk = DirectionWalk::new(17);
        let mut sum = Vec3::ZERO;
        for _ in 0..2000 {
            let dir = walk.step(0.0, 0.5);
            assert!((dir.length() - 1.0).abs() < 1e-5, "length {}", dir.length());
            sum += dir;
        }
        // Uniform directions roughly cancel out.
        assert!((sum / 2000.0).length() < 0.1, "mean direction {:?}", sum / 2000.0);
    }
}
