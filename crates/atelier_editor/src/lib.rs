//! Editing layer for Atelier
//!
//! This crate provides:
//! - [`ComponentSession`] - Stage, commit or discard edits to one component
//! - [`CascadeRules`] - Secondary updates run after a commit
//! - [`NavigationStack`] - Open screens, pruned when their entity goes away
//! - [`MaterialList`] - A model's materials with per-session identities
//! - [`MeshPicker`] - Descriptor form with deferred text mesh delivery
//!
//! Nothing here owns scene state. Sessions work on copies read through a
//! [`SceneHost`](atelier_core::SceneHost) and write back only on commit.

pub mod cascade;
pub mod error;
pub mod materials;
pub mod mesh_picker;
pub mod navigation;
pub mod session;

pub use cascade::{
    AppliedCascade, CascadeConfig, CascadeContext, CascadeRule, CascadeRules, CommitReport,
    MODEL_REGENERATES_COLLISION, MODEL_REGENERATES_PHYSICS_BODY,
};
pub use error::{CascadeError, EditorError};
pub use materials::{MaterialEntry, MaterialId, MaterialList};
pub use mesh_picker::{GeneratedMesh, MeshPicker, MeshRequest, MeshTicket};
pub use navigation::{NavigationEntry, NavigationStack};
pub use session::{ComponentDefaults, ComponentSession, EditableComponent, SessionPhase};
