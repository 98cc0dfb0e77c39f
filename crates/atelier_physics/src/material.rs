//! Physical material properties for collision response

use serde::{Serialize, Deserialize};

/// Physical material properties for collision response
///
/// Friction values are coefficients (0.0 = ice, 1.0 = rubber); restitution is
/// bounciness (0.0 = no bounce, 1.0 = perfect bounce).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Friction while at rest
    pub static_friction: f32,
    /// Friction while sliding
    pub dynamic_friction: f32,
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            static_friction: 0.8,
            dynamic_friction: 0.6,
            restitution: 0.0,
        }
    }
}

impl PhysicsMaterial {
    /// Create a new physics material
    ///
    /// Values are clamped to the range [0.0, 1.0].
    pub fn new(static_friction: f32, dynamic_friction: f32, restitution: f32) -> Self {
        Self {
            static_friction: static_friction.clamp(0.0, 1.0),
            dynamic_friction: dynamic_friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_values() {
        let material = PhysicsMaterial::new(1.5, -0.5, 2.0);
        assert_eq!(material.static_friction, 1.0);
        assert_eq!(material.dynamic_friction, 0.0);
        assert_eq!(material.restitution, 1.0);
    }

    #[test]
    fn test_default_has_no_bounce() {
        assert_eq!(PhysicsMaterial::default().restitution, 0.0);
    }
}
