// Defines an Axis-Aligned Bounding Box

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        // Ensure min coordinates are <= max coordinates
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Checks if this AABB overlaps with another AABB.
    /// Boxes that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }

    /// Grows the box so that it contains `point`.
    pub fn expand_to(&mut self, point: Vec2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }
}
