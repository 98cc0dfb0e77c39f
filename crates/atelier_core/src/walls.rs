//! Bounding box walls
//!
//! The scene encloses its volume in six thin walls, one per face of the
//! bounding box:
//!
//! ```text
//!      +---------------+
//!     /|     upper    /|
//!    +--------------+  |         y+
//!    | |            |  |         |
//!    |l|    far     | r|         +- x+
//!    | |            |  |        /
//!    | +------------|--+       z+
//!    |/    lower    | /
//!    +--------------+/
//! ```
//!
//! Walls are sensors: they report contacts but never push anything.

use std::fmt;

use atelier_math::{BoundingBox, Vec3};
use atelier_mesh::{MeshEngine, MeshResource};
use atelier_physics::{
    BodyMode, CollisionComponent, CollisionFilter, PhysicsBodyComponent, ShapeResource,
};
use serde::{Serialize, Deserialize};

use crate::component::ComponentSet;
use crate::error::SceneError;
use crate::material::Material;
use crate::model::ModelComponent;

/// Thickness of each wall along its face normal
pub const WALL_THICKNESS: f32 = 1e-3;

/// A face of the scene's bounding box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// -X
    Left,
    /// +X
    Right,
    /// -Y
    Lower,
    /// +Y
    Upper,
    /// -Z
    Near,
    /// +Z
    Far,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::Left, Face::Right, Face::Lower, Face::Upper, Face::Near, Face::Far];

    pub fn label(self) -> &'static str {
        match self {
            Face::Left => "Left",
            Face::Right => "Right",
            Face::Lower => "Lower",
            Face::Upper => "Upper",
            Face::Near => "Near",
            Face::Far => "Far",
        }
    }

    /// Center position and full size of this face's wall
    pub fn placement(self, bounds: &BoundingBox) -> (Vec3, Vec3) {
        let min = bounds.min;
        let max = bounds.max;
        let c = bounds.center();
        let e = bounds.extents();
        let t = WALL_THICKNESS;
        match self {
            Face::Left => (Vec3::new(min.x, c.y, c.z), Vec3::new(t, e.y, e.z)),
            Face::Right => (Vec3::new(max.x, c.y, c.z), Vec3::new(t, e.y, e.z)),
            Face::Lower => (Vec3::new(c.x, min.y, c.z), Vec3::new(e.x, t, e.z)),
            Face::Upper => (Vec3::new(c.x, max.y, c.z), Vec3::new(e.x, t, e.z)),
            Face::Near => (Vec3::new(c.x, c.y, min.z), Vec3::new(e.x, e.y, t)),
            Face::Far => (Vec3::new(c.x, c.y, max.z), Vec3::new(e.x, e.y, t)),
        }
    }

    /// Components for a wall of the given size
    ///
    /// Static sensor collision, static gravity-free body, translucent model.
    pub fn wall_components<E: MeshEngine + ?Sized>(self, size: Vec3, engine: &E) -> Result<ComponentSet, SceneError> {
        let shape = ShapeResource::generate_box(size);
        let collision = CollisionComponent::new(vec![shape.clone()])
            .with_static(true)
            .with_filter(CollisionFilter::sensor());
        let mut body = PhysicsBodyComponent::default()
            .with_mass(1.0)
            .with_mode(BodyMode::Static)
            .with_gravity(false);
        body.set_shapes(vec![shape]);
        let mut mesh: MeshResource = engine.generate_box(size, 0.0, 0.0)?;
        mesh.name = format!("{} wall", self.label());
        let model = ModelComponent::new(mesh, vec![Material::wall()]);
        Ok(ComponentSet::new().with(model).with(body).with(collision))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_mesh::PrimitiveMeshEngine;

    fn unit_bounds() -> BoundingBox {
        BoundingBox::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 2.0))
    }

    #[test]
    fn test_walls_sit_on_faces() {
        let bounds = unit_bounds();
        let (left, _) = Face::Left.placement(&bounds);
        let (upper, _) = Face::Upper.placement(&bounds);
        let (far, _) = Face::Far.placement(&bounds);
        assert_eq!(left, Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(upper, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(far, Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_walls_are_thin_along_normal() {
        let bounds = unit_bounds();
        for face in Face::ALL {
            let (_, size) = face.placement(&bounds);
            assert!((size.min_element() - WALL_THICKNESS).abs() < 1e-9, "{} wall", face);
        }
    }

    #[test]
    fn test_wall_components() {
        let engine = PrimitiveMeshEngine::new();
        let set = Face::Near
            .wall_components(Vec3::new(2.0, 2.0, WALL_THICKNESS), &engine)
            .unwrap();
        let collision = set.collision().unwrap();
        assert!(collision.is_static);
        assert_eq!(collision.filter, CollisionFilter::sensor());
        let body = set.physics_body().unwrap();
        assert_eq!(body.mode, BodyMode::Static);
        assert!(!body.is_affected_by_gravity);
        assert_eq!(body.shapes.len(), 1);
        let model = set.model().unwrap();
        assert!(model.materials[0].is_translucent());
        assert_eq!(model.mesh.name, "Near wall");
        assert!(set.input_target().is_none());
    }
}
