//! Display colour carried by bodies for the renderer.

/// A colour to display on the screen.
/// Each component is expected to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);
    pub const WHITE: RgbColor = RgbColor::new(1.0, 1.0, 1.0);
    pub const RED: RgbColor = RgbColor::new(1.0, 0.0, 0.0);
    pub const GREEN: RgbColor = RgbColor::new(0.0, 1.0, 0.0);
    pub const BLUE: RgbColor = RgbColor::new(0.0, 0.0, 1.0);
    pub const YELLOW: RgbColor = RgbColor::new(1.0, 1.0, 0.0);
    pub const MAGENTA: RgbColor = RgbColor::new(1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        RgbColor { r, g, b }
    }

    /// Creates a colour, clamping every component into `[0, 1]`.
    pub fn clamped(r: f32, g: f32, b: f32) -> Self {
        RgbColor {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        RgbColor::BLACK
    }
}
