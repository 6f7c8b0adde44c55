use super::info::CollisionInfo;
use crate::math::vec2::Vec2;
use crate::objects::body::Body;
use crate::shapes::Polygon;

/// Checks for collision between two bodies treated as circles of their `radius()`.
/// The axis points from the first centroid towards the second.
pub fn find_circle_collision(body_a: &Body, body_b: &Body) -> CollisionInfo {
    let dist_vec = body_b.centroid() - body_a.centroid();
    let radii_sum = body_a.radius() + body_b.radius();

    // Compare squares to skip the root on the common no-hit path
    if dist_vec.magnitude_squared() < radii_sum * radii_sum {
        CollisionInfo::hit(dist_vec.normalize())
    } else {
        CollisionInfo::miss()
    }
}

/// Checks two convex polygons for overlap using the Separating Axis Theorem.
///
/// On a hit, the axis is the edge normal with the least overlap, oriented
/// from `shape_a` towards `shape_b`. Shapes that only touch do not collide.
pub fn find_collision(shape_a: &Polygon, shape_b: &Polygon) -> CollisionInfo {
    // Cheap reject before building axes
    if !shape_a.bounding_box().overlaps(&shape_b.bounding_box()) {
        return CollisionInfo::miss();
    }

    let axes = shape_a
        .edge_normals()
        .into_iter()
        .chain(shape_b.edge_normals());

    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::ZERO; // Minimum Translation Vector axis
    let mut b_behind_a = false;

    for axis in axes {
        // Repeated vertices give zero-length edges with no usable normal
        if axis == Vec2::ZERO {
            continue;
        }

        let (min_a, max_a) = shape_a.project(axis);
        let (min_b, max_b) = shape_b.project(axis);

        if !(min_a < max_b && min_b < max_a) {
            // Separating axis found, no collision
            return CollisionInfo::miss();
        }

        let overlap = (max_a - min_b).min(max_b - min_a);
        if overlap < min_overlap {
            min_overlap = overlap;
            mtv_axis = axis;
            b_behind_a = min_b + max_b < min_a + max_a;
        }
    }

    if b_behind_a {
        mtv_axis = -mtv_axis;
    }
    log::trace!("SAT contact along {:?}, overlap {:.4}", mtv_axis, min_overlap);
    CollisionInfo::hit(mtv_axis)
}
