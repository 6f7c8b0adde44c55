use super::ForceGenerator;
use crate::collision::{find_circle_collision, find_collision};
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::world::{BodyId, BodySet};

/// Reaction to two bodies touching.
///
/// `axis` is the unit contact axis pointing from `body_a` towards `body_b`.
pub trait CollisionHandler {
    fn on_collision(&mut self, body_a: &mut Body, body_b: &mut Body, axis: Vec2);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&mut Body, &mut Body, Vec2),
{
    fn on_collision(&mut self, body_a: &mut Body, body_b: &mut Body, axis: Vec2) {
        self(body_a, body_b, axis)
    }
}

/// Removes both bodies on contact.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DestructiveCollision;

impl CollisionHandler for DestructiveCollision {
    fn on_collision(&mut self, body_a: &mut Body, body_b: &mut Body, _axis: Vec2) {
        body_a.remove();
        body_b.remove();
    }
}

/// Bounces the bodies apart with an impulse along the contact axis.
///
/// `elasticity` 1.0 is perfectly elastic, 0.0 perfectly inelastic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsCollision {
    pub elasticity: f64,
}

impl PhysicsCollision {
    pub fn new(elasticity: f64) -> Self {
        Self { elasticity }
    }
}

impl CollisionHandler for PhysicsCollision {
    fn on_collision(&mut self, body_a: &mut Body, body_b: &mut Body, axis: Vec2) {
        let reduced_mass = match (body_a.is_static(), body_b.is_static()) {
            (true, true) => return,
            (true, false) => body_b.mass(),
            (false, true) => body_a.mass(),
            (false, false) => {
                body_a.mass() * body_b.mass() / (body_a.mass() + body_b.mass())
            }
        };

        let relative_speed = (axis.dot(body_a.velocity()) - axis.dot(body_b.velocity())).abs();
        // Push b away from a whichever way the axis was oriented
        let side = if axis.dot(body_b.centroid() - body_a.centroid()) < 0.0 {
            -1.0
        } else {
            1.0
        };

        let impulse = axis * (reduced_mass * (1.0 + self.elasticity) * relative_speed * side);
        log::trace!("collision impulse {:?}", impulse);
        body_a.add_impulse(-impulse);
        body_b.add_impulse(impulse);
    }
}

/// Geometric test used to decide whether two bodies touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Detection {
    /// Separating Axis Theorem on the body outlines.
    #[default]
    Polygon,
    /// Centroid distance against the sum of the bodies' radii.
    Circle,
}

/// Watches a pair of bodies and calls `handler` whenever they touch while
/// moving towards each other.
pub struct Collision<H> {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub detection: Detection,
    pub handler: H,
}

impl<H: CollisionHandler> Collision<H> {
    pub fn new(body_a: BodyId, body_b: BodyId, handler: H) -> Self {
        Self {
            body_a,
            body_b,
            detection: Detection::Polygon,
            handler,
        }
    }

    pub fn with_detection(mut self, detection: Detection) -> Self {
        self.detection = detection;
        self
    }
}

impl<H: CollisionHandler> ForceGenerator for Collision<H> {
    fn apply(&mut self, bodies: &mut BodySet) {
        let Some((a, b)) = bodies.pair_mut(self.body_a, self.body_b) else {
            return;
        };

        // Bodies already separating are left alone
        let closing = (a.velocity() - b.velocity()).dot(b.centroid() - a.centroid());
        if closing < 0.0 {
            return;
        }

        let info = match self.detection {
            Detection::Polygon => find_collision(a.polygon(), b.polygon()),
            Detection::Circle => find_circle_collision(a, b),
        };
        if let Some(axis) = info.contact_axis() {
            log::trace!("{:?} and {:?} collided along {:?}", self.body_a, self.body_b, axis);
            self.handler.on_collision(a, b, axis);
        }
    }
}
