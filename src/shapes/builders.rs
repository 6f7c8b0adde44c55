//! Ready-made outlines for common game pieces.
//!
//! Every builder returns vertices in counter-clockwise order, laid out around
//! the origin. Move them into place with [`Polygon::translate`] or
//! [`crate::Body::set_centroid`].

use std::f64::consts::PI;

use super::Polygon;
use crate::math::vec2::Vec2;

/// Radius of a star's inner dips relative to its tips.
const STAR_DIP_RATIO: f64 = 0.35;
/// Angle left open for the pacman's mouth. Wider than a half turn, so the
/// remaining slice stays convex.
const PACMAN_MOUTH: f64 = 4.0 * PI / 3.0;
/// Number of arc segments in a pacman outline.
const PACMAN_SEGMENTS: usize = 300;

/// Axis-aligned square of side `side`, centred on the origin.
pub fn square(side: f64) -> Polygon {
    rectangle(side, side)
}

/// Axis-aligned rectangle `length` wide (x) and `height` tall (y), centred on the origin.
pub fn rectangle(height: f64, length: f64) -> Polygon {
    let (hx, hy) = (length / 2.0, height / 2.0);
    Polygon::new(vec![
        Vec2::new(hx, hy),
        Vec2::new(-hx, hy),
        Vec2::new(-hx, -hy),
        Vec2::new(hx, -hy),
    ])
}

/// Regular polygon with `sides` vertices at distance `radius` from the origin.
/// The first vertex is straight up at `(0, radius)`.
pub fn ngon(sides: usize, radius: f64) -> Polygon {
    let step = 2.0 * PI / sides as f64;
    let top = Vec2::new(0.0, radius);
    Polygon::new((0..sides).map(|i| top.rotate(step * i as f64)).collect())
}

/// Star with `points` tips at `radius`, alternating with dips closer to the centre.
pub fn star(points: usize, radius: f64) -> Polygon {
    let theta = PI / points as f64;
    let tip = Vec2::new(0.0, radius);
    let dip = (tip * STAR_DIP_RATIO).rotate(theta);
    let mut vertices = Vec::with_capacity(points * 2);
    for i in 0..points {
        let angle = 2.0 * theta * i as f64;
        vertices.push(tip.rotate(angle));
        vertices.push(dip.rotate(angle));
    }
    Polygon::new(vertices)
}

/// Convex `2π/3` circular slice of `radius`, its tip at the origin and the open
/// side of the mouth facing +x.
pub fn pacman(radius: f64) -> Polygon {
    let body_angle = 2.0 * PI - PACMAN_MOUTH;
    let step = body_angle / PACMAN_SEGMENTS as f64;
    let start = Vec2::new(radius, 0.0).rotate(PACMAN_MOUTH / 2.0);
    let mut vertices = Vec::with_capacity(PACMAN_SEGMENTS + 2);
    vertices.push(Vec2::ZERO);
    vertices.extend((0..=PACMAN_SEGMENTS).map(|i| start.rotate(step * i as f64)));
    Polygon::new(vertices)
}

/// Rocket hull with its nose at `(height, 0)` and `detail` points per side.
pub fn ship(detail: usize, height: f64, width: f64) -> Polygon {
    let d = detail as f64;
    let hull_point = |i: usize, side: f64| {
        let i = i as f64;
        // Built nose-up, then turned to face +x.
        Vec2::new(side * i * width / d / 2.0, height - i * i * height / d / d)
            .rotate(3.0 * PI / 2.0)
    };
    let mut vertices = Vec::with_capacity(detail * 2);
    vertices.extend((0..detail).map(|i| hull_point(i, -1.0)));
    vertices.extend((1..detail).rev().map(|i| hull_point(i, 1.0)));
    Polygon::new(vertices)
}

/// Arc of `sides` points at `radius`, spanning `angle` radians centred on +y,
/// closed by the chord between its ends.
pub fn rounded_paddle(sides: usize, radius: f64, angle: f64) -> Polygon {
    let step = angle / sides as f64;
    let start = Vec2::new(0.0, radius).rotate(-angle / 2.0);
    Polygon::new((0..sides).map(|i| start.rotate(step * i as f64)).collect())
}
