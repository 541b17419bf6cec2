use crate::error::FlockError;
use crate::vector::{atan2, Vector2D};

/// Size of the area birds fly in, re-supplied by the host every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        let usable = |dim: f32| dim.is_finite() && dim > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(FlockError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// A single bird
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    /// Stable for the bird's lifetime; renderers derive colour and opacity from it.
    pub id: u32,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Boid {
    pub fn new(id: u32, position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            id,
            position,
            velocity,
        }
    }

    /// Spawns a bird anywhere in the viewport with a velocity in [-1, 1) per axis.
    pub fn random<R: rand::Rng + ?Sized>(id: u32, viewport: Viewport, rng: &mut R) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..viewport.width),
            rng.gen_range(0.0..viewport.height),
        );
        let velocity = Vector2D::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        Self::new(id, position, velocity)
    }

    /// Direction of travel in degrees, as used to rotate the rendered glyph.
    pub fn heading_degrees(&self) -> f32 {
        atan2(self.velocity.y, self.velocity.x).to_degrees()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Adds `force` to the velocity, caps the speed and moves the bird.
    pub fn update(&mut self, force: Vector2D, max_safe_speed: f32) {
        self.velocity += force;
        self.velocity = self.velocity.limit(max_safe_speed);
        self.position += self.velocity;
    }

    /// Toroidal wraparound: leaving past `margin` on one side re-enters on the other.
    pub fn wrap_edges(&mut self, viewport: Viewport, margin: f32) {
        self.position.x = wrap_axis(self.position.x, viewport.width, margin);
        self.position.y = wrap_axis(self.position.y, viewport.height, margin);
    }
}

fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    let mut value = value;
    if value > extent + margin {
        value = -margin;
    }
    if value < -margin {
        value = extent + margin;
    }
    value
}
