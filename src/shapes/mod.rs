pub mod builders;
pub mod polygon;

// Re-export the specific shape types
pub use builders::{ngon, pacman, rectangle, rounded_paddle, ship, square, star};
pub use polygon::Polygon;
