use std::any::Any;
use std::fmt;

use crate::common::RgbColor;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

/// Opaque reference to an image owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// A rigid polygon with mass, velocity and accumulated force/impulse.
///
/// The body's shape lives in world space. Its centroid is always the
/// geometric centroid of that shape: moving the body translates every vertex.
pub struct Body {
    // Dropped first so game data goes before the shape it describes.
    info: Option<Box<dyn Any>>,
    shape: Polygon,
    centroid: Vec2,

    // Physical state
    mass: f64, // f64::INFINITY for immovable bodies
    velocity: Vec2,
    force: Vec2,
    impulse: Vec2,
    elasticity: f64,
    rotation: f64, // Radians

    removed: bool,

    // Presentation, only read by the renderer
    color: RgbColor,
    radius: f64,
    image: Option<ImageHandle>,
    depth: i32,
}

impl Body {
    pub const DEFAULT_ELASTICITY: f64 = 1.0;

    /// Creates a body at rest from a shape in world coordinates.
    ///
    /// Panics unless `mass` is positive; pass `f64::INFINITY` for a static body.
    pub fn new(shape: Polygon, mass: f64, color: RgbColor) -> Self {
        assert!(mass > 0.0, "Body mass must be positive or infinite, got {}", mass);
        let centroid = shape.calculate_centroid();
        Self {
            info: None,
            shape,
            centroid,
            mass,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            impulse: Vec2::ZERO,
            elasticity: Self::DEFAULT_ELASTICITY,
            rotation: 0.0,
            removed: false,
            color,
            radius: 0.0,
            image: None,
            depth: 0,
        }
    }

    /// Creates a body carrying game-specific data. The body owns `info` and
    /// drops it when the body itself is dropped.
    pub fn with_info<T: Any>(shape: Polygon, mass: f64, color: RgbColor, info: T) -> Self {
        let mut body = Self::new(shape, mass, color);
        body.info = Some(Box::new(info));
        body
    }

    /// Returns a copy of the current outline, safe to hand to a renderer.
    pub fn shape(&self) -> Polygon {
        self.shape.clone()
    }

    /// Borrows the current outline.
    pub fn polygon(&self) -> &Polygon {
        &self.shape
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Moves the body so its centroid sits at `centroid`.
    pub fn set_centroid(&mut self, centroid: Vec2) {
        self.shape.translate(centroid - self.centroid);
        self.centroid = centroid;
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// True for bodies with infinite mass.
    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Adds `delta` to the velocity.
    pub fn accelerate(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Adds `speed` to the velocity along the direction the body faces.
    pub fn accelerate_forward(&mut self, speed: f64) {
        self.accelerate(Vec2::new(speed, 0.0).rotate(self.rotation));
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Accumulates a force to be applied over the next tick.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Replaces the accumulated force.
    pub fn set_force(&mut self, force: Vec2) {
        self.force = force;
    }

    pub fn impulse(&self) -> Vec2 {
        self.impulse
    }

    /// Accumulates an impulse to be applied at the start of the next tick.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.impulse += impulse;
    }

    /// Should typically be called after integration in each simulation step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.impulse = Vec2::ZERO;
    }

    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    pub fn set_elasticity(&mut self, elasticity: f64) {
        self.elasticity = elasticity;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Turns the shape about its centroid so that it faces `angle`.
    pub fn set_rotation(&mut self, angle: f64) {
        self.shape.rotate(angle - self.rotation, self.centroid);
        self.rotation = angle;
    }

    pub fn color(&self) -> RgbColor {
        self.color
    }

    pub fn set_color(&mut self, color: RgbColor) {
        self.color = color;
    }

    /// Radius used by circle collision tests and for drawing.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn image(&self) -> Option<ImageHandle> {
        self.image
    }

    pub fn set_image(&mut self, image: Option<ImageHandle>) {
        self.image = image;
    }

    /// Draw order; higher values are drawn later.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    pub fn has_info(&self) -> bool {
        self.info.is_some()
    }

    /// Borrows the attached data if it is a `T`.
    pub fn info<T: Any>(&self) -> Option<&T> {
        self.info.as_deref()?.downcast_ref()
    }

    pub fn info_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.info.as_deref_mut()?.downcast_mut()
    }

    /// Attaches new data, dropping whatever was attached before.
    pub fn set_info<T: Any>(&mut self, info: T) {
        self.info = Some(Box::new(info));
    }

    /// Detaches and returns the data, leaving the body without any.
    pub fn take_info(&mut self) -> Option<Box<dyn Any>> {
        self.info.take()
    }

    /// Marks the body for removal. It stays valid until the owning scene's next tick.
    pub fn remove(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Distance between the centroids of two bodies.
    pub fn distance(&self, other: &Body) -> f64 {
        self.centroid.distance(other.centroid)
    }

    /// Advances the body by `dt`, consuming its accumulated force and impulse.
    pub fn tick(&mut self, dt: f64) {
        integrator::integrate(self, dt);
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("centroid", &self.centroid)
            .field("mass", &self.mass)
            .field("velocity", &self.velocity)
            .field("force", &self.force)
            .field("impulse", &self.impulse)
            .field("rotation", &self.rotation)
            .field("removed", &self.removed)
            .field("has_info", &self.info.is_some())
            .finish_non_exhaustive()
    }
}
