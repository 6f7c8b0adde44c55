use crate::objects::body::Body;

/// Advances a body by `dt` using average-velocity (trapezoidal) integration.
///
/// The impulse is applied as an instantaneous velocity change, the force as a
/// constant acceleration over `dt`, and the body moves by the mean of its old
/// and new velocities. Static bodies ignore both and keep their velocity.
pub fn integrate(body: &mut Body, dt: f64) {
    let old_velocity = body.velocity();

    let mut velocity = old_velocity;
    if !body.is_static() {
        // Skipped for infinite mass, where an infinite force would give 0 * inf
        let inv_mass = 1.0 / body.mass();
        velocity += body.impulse() * inv_mass;
        velocity += body.force() * (dt * inv_mass);
    }
    body.set_velocity(velocity);

    let average_velocity = (old_velocity + velocity) * 0.5;
    body.set_centroid(body.centroid() + average_velocity * dt);

    body.clear_accumulators();
}
