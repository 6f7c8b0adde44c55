use super::ForceGenerator;
use crate::world::{BodyId, BodySet};

/// Linear drag: a force of `-gamma * velocity` on one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub body: BodyId,
    pub gamma: f64,
}

impl Drag {
    pub fn new(gamma: f64, body: BodyId) -> Self {
        Self { body, gamma }
    }
}

impl ForceGenerator for Drag {
    fn apply(&mut self, bodies: &mut BodySet) {
        if let Some(body) = bodies.get_mut(self.body) {
            let velocity = body.velocity();
            body.add_force(velocity * -self.gamma);
        }
    }
}
