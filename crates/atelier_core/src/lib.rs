//! Core scene types for Atelier
//!
//! This crate provides the scene the editor works on:
//!
//! - [`World`] - Container for all entities, including the bounding box walls
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`Entity`] - A named, positioned node owning a [`ComponentSet`]
//! - [`Component`] - Physics body, collision, model or input target
//! - [`Material`] - Render materials carried by a [`ModelComponent`]
//! - [`SceneHost`] - The read/write contract editors use to reach the scene
//! - [`EntityTemplate`] - Parameters for the default component bundle

mod bundle;
mod component;
mod entity;
mod error;
mod host;
mod material;
mod model;
mod walls;
mod world;

pub use bundle::{default_collision, default_physics_body, EntityTemplate};
pub use component::{Component, ComponentSet, ComponentType};
pub use entity::{DirtyFlags, Entity, EntityRole};
pub use error::SceneError;
pub use host::SceneHost;
pub use material::{
    Blending, FaceCulling, Material, MaterialKind, OcclusionMaterial, PhysicallyBasedMaterial,
    SimpleMaterial, TriangleFillMode, UnlitMaterial,
};
pub use model::{InputTargetComponent, InputTypes, ModelComponent};
pub use walls::{Face, WALL_THICKNESS};
pub use world::{EntityKey, SceneEvent, World};

// Re-export commonly used types for convenience
pub use atelier_math::{BoundingBox, Color, Vec3};
pub use atelier_physics::{CollisionComponent, PhysicsBodyComponent};
