pub mod aabb;
pub mod detection;
pub mod info;

// Re-export key types
pub use aabb::AABB;
pub use detection::{find_circle_collision, find_collision};
pub use info::CollisionInfo;
