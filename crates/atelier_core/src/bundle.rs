//! Default component bundles
//!
//! Collision and physics body defaults are derived from a model's mesh. The
//! "add entity" action and the component editors both build them here.

use atelier_math::Vec3;
use atelier_mesh::{MeshDescriptor, MeshEngine};
use atelier_physics::{
    BodyMode, CollisionComponent, CollisionFilter, CollisionGroup, CollisionMode,
    PhysicsBodyComponent, ShapeError, ShapeResource, DEFAULT_DENSITY,
};

use crate::component::ComponentSet;
use crate::error::SceneError;
use crate::material::Material;
use crate::model::{InputTargetComponent, ModelComponent};

/// Collision component enclosing a model's mesh
///
/// Uses a convex shape, colliding mode, and a filter that only meets the
/// default group.
pub fn default_collision(model: &ModelComponent) -> Result<CollisionComponent, ShapeError> {
    let shape = ShapeResource::generate_convex(&model.mesh)?;
    Ok(CollisionComponent::new(vec![shape])
        .with_mode(CollisionMode::Colliding)
        .with_filter(CollisionFilter::new(CollisionGroup::DEFAULT, CollisionGroup::DEFAULT)))
}

/// Physics body whose shape and mass come from a model's mesh
pub fn default_physics_body(
    model: &ModelComponent,
    density: f32,
    mode: BodyMode,
) -> Result<PhysicsBodyComponent, ShapeError> {
    let shape = ShapeResource::generate_convex(&model.mesh)?;
    Ok(PhysicsBodyComponent::from_shapes(vec![shape], density).with_mode(mode))
}

/// Parameters for a newly added entity
#[derive(Clone, Debug, PartialEq)]
pub struct EntityTemplate {
    pub position: Vec3,
    pub mesh: MeshDescriptor,
    pub materials: Vec<Material>,
    /// Density used to derive the body's mass (kg/m³)
    pub density: f32,
    pub body_mode: BodyMode,
}

impl Default for EntityTemplate {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            mesh: MeshDescriptor::default(),
            materials: vec![Material::default_model()],
            density: DEFAULT_DENSITY,
            body_mode: BodyMode::Dynamic,
        }
    }
}

impl EntityTemplate {
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshDescriptor) -> Self {
        self.mesh = mesh;
        self
    }

    /// Build the default bundle: model, physics body, collision and input target
    pub fn build_components<E: MeshEngine + ?Sized>(&self, engine: &E) -> Result<ComponentSet, SceneError> {
        let model = ModelComponent::from_descriptor(self.mesh.clone(), self.materials.clone(), engine)?;
        let body = default_physics_body(&model, self.density, self.body_mode)?;
        let collision = default_collision(&model)?;
        Ok(ComponentSet::new()
            .with(model)
            .with(body)
            .with(collision)
            .with(InputTargetComponent::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_mesh::PrimitiveMeshEngine;
    use crate::component::ComponentType;

    #[test]
    fn test_default_bundle_has_four_components() {
        let engine = PrimitiveMeshEngine::new();
        let set = EntityTemplate::default().build_components(&engine).unwrap();
        for ty in ComponentType::ALL {
            assert!(set.contains(ty), "missing {}", ty);
        }
    }

    #[test]
    fn test_default_body_mass_from_box() {
        let engine = PrimitiveMeshEngine::new();
        let set = EntityTemplate::default().build_components(&engine).unwrap();
        // 0.1 m box at 10 000 kg/m³
        let mass = set.physics_body().unwrap().mass;
        assert!((mass - 10.0).abs() < 1e-2, "mass was {}", mass);
    }

    #[test]
    fn test_default_collision_settings() {
        let engine = PrimitiveMeshEngine::new();
        let model = ModelComponent::default_with(&engine).unwrap();
        let collision = default_collision(&model).unwrap();
        assert_eq!(collision.mode, CollisionMode::Colliding);
        assert_eq!(collision.filter.mask, CollisionGroup::DEFAULT);
        assert!(!collision.is_static);
        assert!(matches!(collision.shapes[..], [ShapeResource::Convex { .. }]));
    }

    #[test]
    fn test_static_template_body_ignores_gravity() {
        let engine = PrimitiveMeshEngine::new();
        let template = EntityTemplate {
            body_mode: BodyMode::Static,
            ..EntityTemplate::default()
        };
        let set = template.build_components(&engine).unwrap();
        assert!(!set.physics_body().unwrap().is_affected_by_gravity);
    }
}
