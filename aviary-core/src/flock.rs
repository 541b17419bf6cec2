use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::boid::{Boid, Viewport};
use crate::config::{FlockConfig, MAX_BIRD_COUNT, MIN_BIRD_COUNT};
use crate::error::FlockError;
use crate::integrator;
use crate::vector::Vector2D;

/// Picks a flock size in `[MIN_BIRD_COUNT, MAX_BIRD_COUNT]`.
pub fn random_count<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.gen_range(MIN_BIRD_COUNT..=MAX_BIRD_COUNT)
}

/// A fixed population of birds.
///
/// The next frame is computed into a back buffer from the current one and the
/// two are swapped, so every bird reacts to the same pre-tick snapshot and a
/// rejected frame never leaves the flock half updated.
#[derive(Debug, Clone)]
pub struct Flock {
    boids: Vec<Boid>,
    back: Vec<Boid>,
    config: FlockConfig,
}

impl Flock {
    /// Spawns `count` birds across `viewport` using `rng`.
    pub fn spawn<R: Rng + ?Sized>(
        count: usize,
        viewport: Viewport,
        config: FlockConfig,
        rng: &mut R,
    ) -> Result<Self, FlockError> {
        if count == 0 {
            return Err(FlockError::EmptyFlock);
        }
        viewport.validate()?;
        config.validate()?;

        let boids: Vec<Boid> = (0..count)
            .map(|id| Boid::random(id as u32, viewport, &mut *rng))
            .collect();

        log::debug!(
            "spawned flock of {} birds in {}x{}",
            count,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            back: Vec::with_capacity(boids.len()),
            boids,
            config,
        })
    }

    /// Reproducible spawn from a seed.
    pub fn seeded(
        count: usize,
        width: f32,
        height: f32,
        config: FlockConfig,
        seed: u64,
    ) -> Result<Self, FlockError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::spawn(count, Viewport::new(width, height), config, &mut rng)
    }

    /// Seeded spawn with the population size also drawn from the seed.
    pub fn seeded_random_count(
        width: f32,
        height: f32,
        config: FlockConfig,
        seed: u64,
    ) -> Result<Self, FlockError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let count = random_count(&mut rng);
        Self::spawn(count, Viewport::new(width, height), config, &mut rng)
    }

    #[cfg(feature = "std")]
    pub fn new(count: usize, width: f32, height: f32) -> Result<Self, FlockError> {
        Self::seeded(count, width, height, FlockConfig::default(), rand::random())
    }

    #[cfg(feature = "std")]
    pub fn with_random_count(width: f32, height: f32) -> Result<Self, FlockError> {
        Self::seeded_random_count(width, height, FlockConfig::default(), rand::random())
    }

    /// Builds a flock from birds the caller has already placed.
    pub fn from_boids(boids: Vec<Boid>, config: FlockConfig) -> Result<Self, FlockError> {
        if boids.is_empty() {
            return Err(FlockError::EmptyFlock);
        }
        config.validate()?;

        let mut ids: Vec<u32> = Vec::with_capacity(boids.len());
        for boid in &boids {
            if !boid.is_finite() {
                return Err(FlockError::InvalidBird { id: boid.id });
            }
            ids.push(boid.id);
        }
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(FlockError::DuplicateId(pair[0]));
        }

        Ok(Self {
            back: Vec::with_capacity(boids.len()),
            boids,
            config,
        })
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Replaces the tunables; takes effect on the next frame.
    pub fn set_config(&mut self, config: FlockConfig) -> Result<(), FlockError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Owned copy of the current frame for a renderer running elsewhere.
    pub fn snapshot(&self) -> Vec<Boid> {
        self.boids.clone()
    }

    /// Moves every bird forward by one frame.
    ///
    /// `pointer` is `None` when the cursor is not over the page. The viewport
    /// is read fresh on every call.
    pub fn advance(
        &mut self,
        pointer: Option<Vector2D>,
        viewport: Viewport,
    ) -> Result<&[Boid], FlockError> {
        viewport.validate()?;
        if let Some(p) = pointer {
            if !p.is_finite() {
                return Err(FlockError::InvalidPointer { x: p.x, y: p.y });
            }
        }

        self.back.clear();
        for boid in &self.boids {
            let next = integrator::step(boid, &self.boids, pointer, viewport, &self.config);
            self.back.push(next);
        }
        core::mem::swap(&mut self.boids, &mut self.back);

        Ok(&self.boids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn still(id: u32, x: f32, y: f32) -> Boid {
        Boid::new(id, Vector2D::new(x, y), Vector2D::zero())
    }

    #[test]
    fn test_flock_creation() {
        let flock = Flock::seeded(50, 800.0, 600.0, FlockConfig::default(), 1).unwrap();
        assert_eq!(flock.len(), 50);
        let ids: Vec<u32> = flock.boids().iter().map(|b| b.id).collect();
        assert_eq!(ids, (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn test_random_count_in_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let count = random_count(&mut rng);
            assert!((MIN_BIRD_COUNT..=MAX_BIRD_COUNT).contains(&count));
        }
    }

    #[test]
    fn test_seeded_random_count_flock() {
        let flock = Flock::seeded_random_count(800.0, 600.0, FlockConfig::default(), 5).unwrap();
        assert!((MIN_BIRD_COUNT..=MAX_BIRD_COUNT).contains(&flock.len()));
    }

    #[test]
    fn test_empty_flock_rejected() {
        assert_eq!(
            Flock::seeded(0, 800.0, 600.0, FlockConfig::default(), 1).unwrap_err(),
            FlockError::EmptyFlock
        );
        assert_eq!(
            Flock::from_boids(vec![], FlockConfig::default()).unwrap_err(),
            FlockError::EmptyFlock
        );
    }

    #[test]
    fn test_spawn_rejects_bad_viewport() {
        let err = Flock::seeded(10, f32::NAN, 600.0, FlockConfig::default(), 1).unwrap_err();
        assert!(matches!(err, FlockError::InvalidViewport { .. }));
    }

    #[test]
    fn test_from_boids_rejects_duplicates_and_nan() {
        let dup = vec![still(3, 0.0, 0.0), still(3, 5.0, 5.0)];
        assert_eq!(
            Flock::from_boids(dup, FlockConfig::default()).unwrap_err(),
            FlockError::DuplicateId(3)
        );

        let nan = vec![still(1, f32::NAN, 0.0)];
        assert_eq!(
            Flock::from_boids(nan, FlockConfig::default()).unwrap_err(),
            FlockError::InvalidBird { id: 1 }
        );
    }

    #[test]
    fn test_flock_update_moves_birds() {
        let mut flock = Flock::seeded(10, 800.0, 600.0, FlockConfig::default(), 9).unwrap();
        let initial = flock.snapshot();

        flock.advance(None, Viewport::new(800.0, 600.0)).unwrap();

        let changed = flock
            .boids()
            .iter()
            .zip(initial.iter())
            .any(|(b, before)| b.position != before.position);
        assert!(changed);
    }

    #[test]
    fn test_rejected_advance_leaves_flock_untouched() {
        let mut flock = Flock::seeded(10, 800.0, 600.0, FlockConfig::default(), 2).unwrap();
        let before = flock.snapshot();

        let err = flock
            .advance(None, Viewport::new(-1.0, 600.0))
            .unwrap_err();
        assert!(matches!(err, FlockError::InvalidViewport { .. }));

        let err = flock
            .advance(
                Some(Vector2D::new(f32::INFINITY, 0.0)),
                Viewport::new(800.0, 600.0),
            )
            .unwrap_err();
        assert!(matches!(err, FlockError::InvalidPointer { .. }));

        assert_eq!(flock.boids(), before.as_slice());
    }

    #[test]
    fn test_set_config_validates() {
        let mut flock = Flock::seeded(3, 800.0, 600.0, FlockConfig::default(), 2).unwrap();
        let bad = FlockConfig {
            max_speed: -1.0,
            ..FlockConfig::default()
        };
        assert!(flock.set_config(bad).is_err());
        assert_eq!(flock.config(), &FlockConfig::default());

        let calmer = FlockConfig {
            responsiveness: 1.0,
            ..FlockConfig::default()
        };
        flock.set_config(calmer).unwrap();
        assert_eq!(flock.config().responsiveness, 1.0);
    }

    #[test]
    fn test_update_is_simultaneous() {
        // Mirror-image pair: a sequential update would break the symmetry.
        let boids = vec![still(0, 100.0, 100.0), still(1, 110.0, 100.0)];
        let mut flock = Flock::from_boids(boids, FlockConfig::default()).unwrap();
        let out = flock.advance(None, Viewport::new(1000.0, 1000.0)).unwrap();

        let left_shift = 100.0 - out[0].position.x;
        let right_shift = out[1].position.x - 110.0;
        assert!((left_shift - right_shift).abs() < 1e-4);
        assert_eq!(out[0].position.y, out[1].position.y);
    }
}
