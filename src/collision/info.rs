use crate::math::vec2::Vec2;

/// Result of a collision test between two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the two shapes overlap.
    pub collided: bool,
    /// Unit vector pointing from the first shape towards the second, along
    /// which the shapes overlap the least. Zero when `collided` is false.
    pub axis: Vec2,
}

impl CollisionInfo {
    pub fn miss() -> Self {
        Self {
            collided: false,
            axis: Vec2::ZERO,
        }
    }

    pub fn hit(axis: Vec2) -> Self {
        Self {
            collided: true,
            axis,
        }
    }

    /// The contact axis, if the shapes collided.
    pub fn contact_axis(&self) -> Option<Vec2> {
        self.collided.then_some(self.axis)
    }
}
