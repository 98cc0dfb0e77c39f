//! Linear RGBA color

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// Linear RGBA color, each component in 0.0-1.0
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new color from RGBA components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Grayscale color with the given white level and alpha
    pub const fn white(white: f32, alpha: f32) -> Self {
        Self::new(white, white, white, alpha)
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Clamp every component into 0.0-1.0
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Components as an array
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_helper() {
        let c = Color::white(0.0, 1.0);
        assert_eq!(c, Color::BLACK);
        assert_eq!(Color::white(1.0, 0.1).a, 0.1);
    }

    #[test]
    fn test_clamped() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0).clamped();
        assert_eq!(c.to_array(), [1.0, 0.0, 0.5, 1.0]);
    }
}
