use crate::behavior;
use crate::boid::{Boid, Viewport};
use crate::config::FlockConfig;
use crate::vector::Vector2D;

/// Weighted sum of every force acting on `boid` this frame.
///
/// `flock` is the pre-tick snapshot and may contain `boid` itself; it is
/// skipped by id.
pub fn steering_force(
    boid: &Boid,
    flock: &[Boid],
    pointer: Option<Vector2D>,
    config: &FlockConfig,
) -> Vector2D {
    let others = || flock.iter().filter(move |other| other.id != boid.id);

    let sep = behavior::separation(
        boid,
        others(),
        config.separation_radius,
        config.max_speed,
        config.max_force,
    ) * config.separation_weight;
    let ali = behavior::alignment(
        boid,
        others(),
        config.alignment_radius,
        config.max_speed,
        config.max_force,
    ) * config.alignment_weight;
    let coh = behavior::cohesion(
        boid,
        others(),
        config.cohesion_radius,
        config.max_speed,
        config.max_force,
    ) * config.cohesion_weight;

    let avoid = match pointer {
        Some(pointer) => behavior::avoid_pointer(
            boid,
            pointer,
            config.mouse_avoid_radius,
            config.max_speed,
            config.panic,
            config.mouse_avoid_force,
        ),
        None => Vector2D::zero(),
    };

    (sep + ali + coh) * config.responsiveness + avoid + Vector2D::new(0.0, -config.upward_bias)
}

/// Computes the next state of `boid` without touching the snapshot it was read from.
pub fn step(
    boid: &Boid,
    flock: &[Boid],
    pointer: Option<Vector2D>,
    viewport: Viewport,
    config: &FlockConfig,
) -> Boid {
    let force = steering_force(boid, flock, pointer, config);
    let mut next = boid.clone();
    next.update(force, config.max_safe_speed);
    next.wrap_edges(viewport, config.agent_size);
    next
}
