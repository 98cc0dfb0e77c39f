//! Model and input target components

use bitflags::bitflags;
use atelier_mesh::{EngineError, MeshDescriptor, MeshEngine, MeshResource};

use crate::material::Material;

/// Renderable mesh plus its ordered material list
#[derive(Clone, Debug, PartialEq)]
pub struct ModelComponent {
    pub mesh: MeshResource,
    /// The parameters `mesh` was generated from, if it came from a descriptor
    pub descriptor: Option<MeshDescriptor>,
    pub materials: Vec<Material>,
    /// Extra margin added to the mesh bounds for culling, in [-1, 1]
    pub bounds_margin: f32,
}

impl ModelComponent {
    /// Wrap an existing mesh
    pub fn new(mesh: MeshResource, materials: Vec<Material>) -> Self {
        Self {
            mesh,
            descriptor: None,
            materials,
            bounds_margin: 0.0,
        }
    }

    /// Generate the mesh for `descriptor` and keep the descriptor alongside it
    pub fn from_descriptor<E: MeshEngine + ?Sized>(
        descriptor: MeshDescriptor,
        materials: Vec<Material>,
        engine: &E,
    ) -> Result<Self, EngineError> {
        let mesh = descriptor.to_mesh(engine)?;
        Ok(Self {
            mesh,
            descriptor: Some(descriptor),
            materials,
            bounds_margin: 0.0,
        })
    }

    /// Default model: the default box with a black metallic material
    pub fn default_with<E: MeshEngine + ?Sized>(engine: &E) -> Result<Self, EngineError> {
        Self::from_descriptor(MeshDescriptor::default(), vec![Material::default_model()], engine)
    }

    /// Replace the mesh and the descriptor it came from
    pub fn set_mesh(&mut self, mesh: MeshResource, descriptor: Option<MeshDescriptor>) {
        self.mesh = mesh;
        self.descriptor = descriptor;
    }

    pub fn with_bounds_margin(mut self, margin: f32) -> Self {
        self.bounds_margin = margin.clamp(-1.0, 1.0);
        self
    }
}

bitflags! {
    /// Kinds of input an entity accepts
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct InputTypes: u8 {
        /// Touching the entity with a hand
        const DIRECT = 1 << 0;
        /// Gaze and pinch
        const INDIRECT = 1 << 1;
        const ALL = Self::DIRECT.bits() | Self::INDIRECT.bits();
    }
}

/// Marks an entity as a target for user interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputTargetComponent {
    pub is_enabled: bool,
    pub allowed_input_types: InputTypes,
}

impl Default for InputTargetComponent {
    fn default() -> Self {
        Self {
            is_enabled: true,
            allowed_input_types: InputTypes::ALL,
        }
    }
}
