//! Physics-facing component values for Atelier
//!
//! Nothing here simulates. These are the plain values an entity carries so
//! that the host's physics engine can simulate it:
//! - Collision shapes, including convex shapes derived from a mesh
//! - Physics body parameters (mode, mass, locks, material)
//! - Collision components with group/mask filtering
//! - A registry of named collision groups

pub mod body;
pub mod collision;
pub mod groups;
pub mod material;
pub mod shapes;

// Re-export commonly used types
pub use body::{AxisLocks, BodyMode, PhysicsBodyComponent, DEFAULT_DENSITY, MIN_MASS};
pub use collision::{CollisionComponent, CollisionFilter, CollisionGroup, CollisionMode};
pub use groups::{CollisionGroupRegistry, GroupError};
pub use material::PhysicsMaterial;
pub use shapes::{ShapeError, ShapeResource};
