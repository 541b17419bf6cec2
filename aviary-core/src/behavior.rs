//! Steering rules.
//!
//! Each rule looks at one bird and the birds around it and returns a bounded
//! steering vector. A neighbor only counts when it sits strictly inside the
//! radius and further than [`EPSILON`] away, so coincident birds exert no force.

use crate::boid::Boid;
use crate::vector::{Vector2D, EPSILON};

/// Turns a desired direction into a steering delta: full `max_speed` along
/// `direction`, minus the current velocity, clamped to `max_force`.
fn steer_towards(boid: &Boid, direction: Vector2D, max_speed: f32, max_force: f32) -> Vector2D {
    let length = direction.magnitude();
    if length <= EPSILON {
        return Vector2D::zero();
    }
    let desired = direction / length * max_speed;
    (desired - boid.velocity).limit(max_force)
}

fn in_range(distance: f32, radius: f32) -> bool {
    distance > EPSILON && distance < radius
}

/// Pushes away from crowding neighbors, harder the closer they are.
pub fn separation<'a, I>(
    boid: &Boid,
    neighbors: I,
    radius: f32,
    max_speed: f32,
    max_force: f32,
) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0;

    for other in neighbors {
        let offset = boid.position - other.position;
        let distance = offset.magnitude();
        if in_range(distance, radius) {
            // Unit direction, then weighted by 1/distance.
            steering += offset / (distance + EPSILON) / distance;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }
    steer_towards(boid, steering / count as f32, max_speed, max_force)
}

/// Matches the average velocity of nearby birds.
pub fn alignment<'a, I>(
    boid: &Boid,
    neighbors: I,
    radius: f32,
    max_speed: f32,
    max_force: f32,
) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in neighbors {
        if in_range(boid.position.distance(&other.position), radius) {
            sum += other.velocity;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }
    steer_towards(boid, sum / count as f32, max_speed, max_force)
}

/// Pulls toward the centre of nearby birds.
pub fn cohesion<'a, I>(
    boid: &Boid,
    neighbors: I,
    radius: f32,
    max_speed: f32,
    max_force: f32,
) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in neighbors {
        if in_range(boid.position.distance(&other.position), radius) {
            sum += other.position;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }
    let centre = sum / count as f32;
    steer_towards(boid, centre - boid.position, max_speed, max_force)
}

/// Flees the pointer with a linear falloff, scaled by `panic` before the clamp.
pub fn avoid_pointer(
    boid: &Boid,
    pointer: Vector2D,
    radius: f32,
    max_speed: f32,
    panic: f32,
    max_force: f32,
) -> Vector2D {
    let offset = boid.position - pointer;
    let distance = offset.magnitude();
    if !in_range(distance, radius) {
        return Vector2D::zero();
    }

    let desired = offset / (distance + EPSILON) * max_speed;
    let intensity = (radius - distance) / radius;
    ((desired - boid.velocity) * (intensity * panic)).limit(max_force)
}
