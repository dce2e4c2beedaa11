//! Background stars scattered uniformly through a cube around the origin.

use glam::Vec3;
use rand::Rng;

/// A point cloud of stars.
#[derive(Clone, Debug)]
pub struct Starfield {
    pub points: Vec<Vec3>,
    /// Edge length of the cube the points were drawn from.
    pub spread: f32,
    /// Point size in world units.
    pub point_size: f32,
    pub opacity: f32,
    pub rotation_y: f32,
}

impl Starfield {
    pub const POINT_SIZE: f32 = 0.5;
    pub const OPACITY: f32 = 0.8;
    /// Spin in radians per second of scaled elapsed time.
    pub const SPIN_RATE: f32 = 0.001;

    /// Draw `count` points with every coordinate uniform in
    /// `[-spread/2, spread/2)`.
    pub fn generate<R: Rng>(rng: &mut R, count: u32, spread: f32) -> Self {
        let points = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.random::<f32>() - 0.5) * spread,
                    (rng.random::<f32>() - 0.5) * spread,
                    (rng.random::<f32>() - 0.5) * spread,
                )
            })
            .collect();
        Self {
            points,
            spread,
            point_size: Self::POINT_SIZE,
            opacity: Self::OPACITY,
            rotation_y: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_points_stay_inside_cube() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let stars = Starfield::generate(&mut rng, 1000, 200.0);
        assert_eq!(stars.len(), 1000);
        assert!(
            stars
                .points
                .iter()
                .all(|p| p.abs().max_element() <= 100.0)
        );
    }

    #[test]
    fn test_same_seed_same_sky() {
        let a = Starfield::generate(&mut ChaCha8Rng::seed_from_u64(42), 50, 200.0);
        let b = Starfield::generate(&mut ChaCha8Rng::seed_from_u64(42), 50, 200.0);
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn test_empty_field() {
        let stars = Starfield::generate(&mut ChaCha8Rng::seed_from_u64(1), 0, 200.0);
        assert!(stars.is_empty());
    }
}
