//! Validation errors for geometry handed to the engine.

use thiserror::Error;

/// Reasons a vertex list cannot be used as a body shape.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon must have at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("polygon vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    #[error("polygon has zero area (collinear or repeated vertices)")]
    DegenerateArea,
}
