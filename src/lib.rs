//! A small 2D rigid-body physics core for arcade games.
//!
//! Bodies are convex polygons with mass and velocity. Forces are generators
//! registered on a [`Scene`], which applies them, retires the ones whose bodies
//! were removed and integrates the survivors once per [`Scene::tick`].

pub mod collision;
pub mod common;
pub mod error;
pub mod forces;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{find_circle_collision, find_collision, CollisionInfo, AABB};
pub use common::RgbColor;
pub use error::GeometryError;
pub use forces::{
    Collision, CollisionHandler, Detection, DestructiveCollision, Drag, ForceGenerator,
    NewtonianGravity, PhysicsCollision, Spring, WrappingGravity,
};
pub use math::vec2::Vec2;
pub use objects::{Body, ImageHandle};
pub use shapes::Polygon;
pub use world::{BodyId, BodySet, ForceEntry, Scene};
