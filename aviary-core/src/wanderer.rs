use core::f32::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::boid::Viewport;
use crate::config::{non_negative, positive};
use crate::error::FlockError;
use crate::vector::{atan2, cos, sin, Vector2D, EPSILON};

/// Tunables for the single meandering bird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WandererConfig {
    pub bird_size: f32,
    pub flight_speed: f32,
    /// How quickly the velocity eases toward the target velocity each frame.
    pub turn_strength: f32,
    pub vertical_variation: f32,
    pub mouse_avoid_distance: f32,
    pub mouse_avoid_strength: f32,
    /// Distance from an edge where the bird starts steering back in.
    pub margin: f32,
    pub margin_gain: f32,
    /// Simulated seconds per frame.
    pub time_step: f32,
}

impl Default for WandererConfig {
    fn default() -> Self {
        Self {
            bird_size: 10.0,
            flight_speed: 1.5,
            turn_strength: 0.05,
            vertical_variation: 2.0,
            mouse_avoid_distance: 600.0,
            mouse_avoid_strength: 10.0,
            margin: 100.0,
            margin_gain: 0.01,
            time_step: 0.016,
        }
    }
}

impl WandererConfig {
    pub fn validate(&self) -> Result<(), FlockError> {
        non_negative(self.bird_size, "bird_size must not be negative")?;
        non_negative(self.flight_speed, "flight_speed must not be negative")?;
        positive(self.turn_strength, "turn_strength must be positive")?;
        non_negative(self.vertical_variation, "vertical_variation must not be negative")?;
        positive(self.mouse_avoid_distance, "mouse_avoid_distance must be positive")?;
        non_negative(self.mouse_avoid_strength, "mouse_avoid_strength must not be negative")?;
        non_negative(self.margin, "margin must not be negative")?;
        non_negative(self.margin_gain, "margin_gain must not be negative")?;
        positive(self.time_step, "time_step must be positive")?;
        Ok(())
    }
}

const MEANDER_STRENGTH: f32 = 1.2;
const MAX_AVOID_INTENSITY: f32 = 0.8;
const MAX_PANIC_TURN: f32 = 0.1;

/// A lone bird on a slow sinusoidal course that shies away from the pointer.
///
/// Unlike [`crate::Flock`] it keeps its own clock, and it re-rolls its height
/// into the middle band of the viewport whenever it leaves through a side edge.
#[derive(Debug, Clone)]
pub struct Wanderer {
    pub position: Vector2D,
    pub velocity: Vector2D,
    time: f32,
    config: WandererConfig,
    rng: SmallRng,
}

fn middle_band<R: Rng + ?Sized>(rng: &mut R, height: f32) -> f32 {
    rng.gen::<f32>() * height * 0.6 + height * 0.2
}

impl Wanderer {
    pub fn seeded(
        viewport: Viewport,
        config: WandererConfig,
        seed: u64,
    ) -> Result<Self, FlockError> {
        viewport.validate()?;
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let position = Vector2D::new(
            rng.gen_range(0.0..viewport.width),
            middle_band(&mut rng, viewport.height),
        );
        Ok(Self {
            position,
            velocity: Vector2D::new(config.flight_speed, 0.0),
            time: 0.0,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &WandererConfig {
        &self.config
    }

    pub fn elapsed(&self) -> f32 {
        self.time
    }

    pub fn heading_degrees(&self) -> f32 {
        atan2(self.velocity.y, self.velocity.x).to_degrees()
    }

    fn target_velocity(&self, viewport: Viewport) -> Vector2D {
        let t = self.time;
        let cfg = &self.config;

        let meander = sin(t * 0.13) * PI * 0.7 + sin(t * 0.07) * PI * 0.3;
        let forward = Vector2D::new(cos(meander), sin(meander)) * MEANDER_STRENGTH;
        let flight_noise = sin(t * 0.7) * 0.5 + sin(t * 1.3) * 0.3;
        let vertical_noise = sin(t * 0.4) * cfg.vertical_variation;

        let mut target = Vector2D::new(
            cfg.flight_speed * forward.x + flight_noise * 0.5,
            cfg.flight_speed * forward.y + vertical_noise,
        );

        let pos = self.position;
        if pos.x < cfg.margin {
            target.x += (cfg.margin - pos.x) * cfg.margin_gain;
            target.y += sin(t * 2.0) * 0.5;
        }
        if pos.x > viewport.width - cfg.margin {
            target.x -= (pos.x - (viewport.width - cfg.margin)) * cfg.margin_gain;
            target.y += sin(t * 2.0) * 0.5;
        }
        if pos.y < cfg.margin {
            target.y += (cfg.margin - pos.y) * cfg.margin_gain;
        }
        if pos.y > viewport.height - cfg.margin {
            target.y -= (pos.y - (viewport.height - cfg.margin)) * cfg.margin_gain;
        }

        target
    }

    /// Advances the bird by one frame.
    pub fn advance(
        &mut self,
        pointer: Option<Vector2D>,
        viewport: Viewport,
    ) -> Result<Vector2D, FlockError> {
        viewport.validate()?;
        if let Some(p) = pointer {
            if !p.is_finite() {
                return Err(FlockError::InvalidPointer { x: p.x, y: p.y });
            }
        }

        self.time += self.config.time_step;
        let mut target = self.target_velocity(viewport);
        let mut turn = self.config.turn_strength;

        if let Some(pointer) = pointer {
            let offset = self.position - pointer;
            let distance = offset.magnitude();
            if distance > EPSILON && distance < self.config.mouse_avoid_distance {
                let away = offset / distance;
                let intensity = ((self.config.mouse_avoid_distance - distance)
                    / self.config.mouse_avoid_distance)
                    .min(MAX_AVOID_INTENSITY);
                target += away * (self.config.mouse_avoid_strength * intensity);
                turn = (self.config.turn_strength * 3.0).min(MAX_PANIC_TURN);
            }
        }

        self.velocity += (target - self.velocity) * turn;
        let mut next = self.position + self.velocity;

        let size = self.config.bird_size;
        if next.x > viewport.width + size {
            next.x = -size;
            next.y = middle_band(&mut self.rng, viewport.height);
        }
        if next.x < -size {
            next.x = viewport.width + size;
            next.y = middle_band(&mut self.rng, viewport.height);
        }
        if next.y > viewport.height + size {
            next.y = -size;
        }
        if next.y < -size {
            next.y = viewport.height + size;
        }

        self.position = next;
        Ok(next)
    }
}
