use super::{attract, ForceGenerator};
use crate::math::vec2::Vec2;
use crate::world::{BodyId, BodySet};

/// Mutual inverse-square attraction between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub g: f64,
    /// Distances below this are clamped to keep the force finite.
    pub min_distance: f64,
}

impl NewtonianGravity {
    pub const DEFAULT_MIN_DISTANCE: f64 = 20.0;

    pub fn new(g: f64, body_a: BodyId, body_b: BodyId) -> Self {
        Self {
            body_a,
            body_b,
            g,
            min_distance: Self::DEFAULT_MIN_DISTANCE,
        }
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }
}

impl ForceGenerator for NewtonianGravity {
    fn apply(&mut self, bodies: &mut BodySet) {
        let Some((a, b)) = bodies.pair_mut(self.body_a, self.body_b) else {
            return;
        };
        let displacement = a.centroid() - b.centroid();
        let magnitude = inverse_square(self.g, a.mass(), b.mass(), displacement, self.min_distance);
        attract(a, b, displacement, magnitude);
    }
}

/// Gravity on a `width` x `height` torus: bodies attract along the shortest
/// path, which may cross the edges of the play area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappingGravity {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub g: f64,
    pub width: f64,
    pub height: f64,
    pub min_distance: f64,
}

impl WrappingGravity {
    pub fn new(g: f64, body_a: BodyId, body_b: BodyId, width: f64, height: f64) -> Self {
        Self {
            body_a,
            body_b,
            g,
            width,
            height,
            min_distance: NewtonianGravity::DEFAULT_MIN_DISTANCE,
        }
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }
}

impl ForceGenerator for WrappingGravity {
    fn apply(&mut self, bodies: &mut BodySet) {
        let Some((a, b)) = bodies.pair_mut(self.body_a, self.body_b) else {
            return;
        };
        let displacement =
            wrapped_displacement(a.centroid() - b.centroid(), self.width, self.height);
        let magnitude = inverse_square(self.g, a.mass(), b.mass(), displacement, self.min_distance);
        attract(a, b, displacement, magnitude);
    }
}

fn inverse_square(g: f64, mass_a: f64, mass_b: f64, displacement: Vec2, min_distance: f64) -> f64 {
    let distance = displacement.magnitude().max(min_distance);
    g * mass_a * mass_b / (distance * distance)
}

/// Folds each component of `displacement` into `[-size/2, size/2]`.
pub fn wrapped_displacement(displacement: Vec2, width: f64, height: f64) -> Vec2 {
    Vec2::new(fold(displacement.x, width), fold(displacement.y, height))
}

fn fold(delta: f64, size: f64) -> f64 {
    if delta > size / 2.0 {
        delta - size
    } else if delta < -size / 2.0 {
        delta + size
    } else {
        delta
    }
}
