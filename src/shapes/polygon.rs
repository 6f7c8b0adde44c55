use crate::collision::AABB;
use crate::error::GeometryError;
use crate::math::vec2::Vec2;

/// A simple polygon defined by its vertices in world space.
/// Vertices are ordered counter-clockwise; the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Creates a new polygon from a vector of vertices.
    ///
    /// Panics if fewer than 3 vertices are provided or the polygon has no area.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        match Self::try_new(vertices) {
            Ok(polygon) => polygon,
            Err(err) => panic!("invalid polygon: {}", err),
        }
    }

    /// Creates a new polygon, reporting why the vertices are unusable instead of panicking.
    pub fn try_new(vertices: Vec<Vec2>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if let Some(index) = vertices
            .iter()
            .position(|v| !v.x.is_finite() || !v.y.is_finite())
        {
            return Err(GeometryError::NonFiniteVertex { index });
        }
        let polygon = Polygon { vertices };
        if polygon.signed_area() == 0.0 {
            return Err(GeometryError::DegenerateArea);
        }
        Ok(polygon)
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn into_vertices(self) -> Vec<Vec2> {
        self.vertices
    }

    /// Iterates over the edges as `(start, end)` pairs, including the closing edge.
    fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area from the Shoelace formula; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|(v1, v2)| v1.cross(v2)).sum::<f64>() / 2.0
    }

    /// Calculates the area of the polygon using the Shoelace formula.
    pub fn calculate_area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Calculates the centroid (center of mass for uniform density) of the polygon.
    pub fn calculate_centroid(&self) -> Vec2 {
        let mut weighted = Vec2::ZERO;
        for (v1, v2) in self.edges() {
            weighted += (v1 + v2) * v1.cross(v2);
        }
        weighted / (6.0 * self.signed_area())
    }

    /// Moves every vertex by `translation`.
    pub fn translate(&mut self, translation: Vec2) {
        for vertex in &mut self.vertices {
            *vertex += translation;
        }
    }

    /// Rotates every vertex by `angle` radians (CCW) about `pivot`.
    pub fn rotate(&mut self, angle: f64, pivot: Vec2) {
        self.translate(-pivot);
        for vertex in &mut self.vertices {
            *vertex = vertex.rotate(angle);
        }
        self.translate(pivot);
    }

    /// Returns the outward-facing unit normal of every edge, closing edge included.
    /// Assumes vertices are ordered counter-clockwise.
    pub fn edge_normals(&self) -> Vec<Vec2> {
        self.edges()
            .map(|(v1, v2)| (-(v2 - v1).perpendicular()).normalize())
            .collect()
    }

    /// Projects every vertex onto `axis` and returns the `(min, max)` interval.
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        self.vertices
            .iter()
            .map(|v| v.dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
                (min.min(d), max.max(d))
            })
    }

    /// Axis-aligned bounds of the vertex set.
    /// Grown from the first vertex, so it stays tight far from the origin.
    pub fn bounding_box(&self) -> AABB {
        let first = self.vertices[0];
        let mut aabb = AABB::new(first, first);
        for &vertex in &self.vertices[1..] {
            aabb.expand_to(vertex);
        }
        aabb
    }
}
