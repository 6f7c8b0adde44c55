use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::world::BodySet;

pub mod collision;
pub mod drag;
pub mod gravity;
pub mod spring;

// Re-export the generator types for easier access
pub use collision::{
    Collision, CollisionHandler, Detection, DestructiveCollision, PhysicsCollision,
};
pub use drag::Drag;
pub use gravity::{NewtonianGravity, WrappingGravity};
pub use spring::Spring;

/// Something that pushes bodies around once per scene step.
///
/// Generators hold the ids of the bodies they act on plus whatever state they
/// need. Dropping the generator releases that state.
pub trait ForceGenerator {
    /// Accumulates forces and impulses on the bodies this generator knows about.
    fn apply(&mut self, bodies: &mut BodySet);
}

impl<F> ForceGenerator for F
where
    F: FnMut(&mut BodySet),
{
    fn apply(&mut self, bodies: &mut BodySet) {
        self(bodies)
    }
}

/// Applies an attraction of `magnitude` along `direction` (which points from
/// `body_b` to `body_a`): `body_a` is pulled back, `body_b` forward.
pub(crate) fn attract(body_a: &mut Body, body_b: &mut Body, direction: Vec2, magnitude: f64) {
    let force = direction.normalize() * magnitude;
    body_a.add_force(-force);
    body_b.add_force(force);
}
