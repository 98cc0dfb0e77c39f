//! 3D math value types for Atelier
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Color`] - Linear RGBA color
//! - [`BoundingBox`] - Axis-aligned box given by min/max corners

mod vec3;
mod color;
pub mod bounds;

pub use vec3::Vec3;
pub use color::Color;
pub use bounds::BoundingBox;
