//! Parametric meshes for Atelier
//!
//! This crate provides:
//! - [`MeshResource`] - Indexed triangle mesh handed to the renderer
//! - [`MeshEngine`] - The mesh generation collaborator
//! - [`PrimitiveMeshEngine`] - In-process engine that tessellates primitives
//! - [`MeshDescriptor`] - Editable parameter set for each [`MeshKind`]
//!
//! Descriptors are a closed enum. Every operation over them (`fields`,
//! `field`, `set_field`, `to_mesh`) matches all variants, so a new kind
//! fails to compile until it is wired into each of them.

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod mesh;
pub mod text;

pub use descriptor::{
    BoxDescriptor, ConeDescriptor, CylinderDescriptor, ExtrudingTextDescriptor, FieldDescriptor,
    FieldError, FieldType, FieldValue, MeshDescriptor, MeshKind, PlaneXYDescriptor,
    PlaneXZDescriptor, SphereDescriptor, TextDescriptor,
};
pub use engine::{MeshEngine, PrimitiveMeshEngine, TextMeshRequest};
pub use error::EngineError;
pub use mesh::MeshResource;
pub use text::{AttributedText, Font, TextRun};
