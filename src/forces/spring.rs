use super::{attract, ForceGenerator};
use crate::world::{BodyId, BodySet};

/// Hooke spring with zero rest length: pulls two bodies together with a force
/// proportional to their distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub k: f64,
}

impl Spring {
    pub fn new(k: f64, body_a: BodyId, body_b: BodyId) -> Self {
        Self { body_a, body_b, k }
    }
}

impl ForceGenerator for Spring {
    fn apply(&mut self, bodies: &mut BodySet) {
        let Some((a, b)) = bodies.pair_mut(self.body_a, self.body_b) else {
            return;
        };
        let displacement = a.centroid() - b.centroid();
        attract(a, b, displacement, self.k * displacement.magnitude());
    }
}
