//! Collision shapes
//!
//! These are the shape values stored on collision and physics body
//! components, separate from the renderable meshes in atelier_mesh.

use std::collections::HashSet;
use std::f32::consts::PI;
use std::fmt;

use atelier_math::{BoundingBox, Vec3};
use atelier_mesh::MeshResource;

/// Error building a shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The source mesh has no vertices
    EmptyMesh(String),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::EmptyMesh(name) => write!(f, "Cannot build a shape from empty mesh '{}'", name),
        }
    }
}

impl std::error::Error for ShapeError {}

/// A collision shape in the owning entity's local space
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeResource {
    /// Axis-aligned box with full `size`, centered at `offset`
    Box { size: Vec3, offset: Vec3 },
    /// Sphere centered at `offset`
    Sphere { radius: f32, offset: Vec3 },
    /// The convex hull of a point set
    Convex { points: Vec<Vec3> },
}

impl ShapeResource {
    /// Box centered at the origin
    pub fn generate_box(size: Vec3) -> Self {
        ShapeResource::Box { size, offset: Vec3::ZERO }
    }

    /// Sphere centered at the origin
    pub fn generate_sphere(radius: f32) -> Self {
        ShapeResource::Sphere { radius, offset: Vec3::ZERO }
    }

    /// Convex shape enclosing every vertex of a mesh
    ///
    /// Duplicate vertices are dropped; the hull itself is left to the
    /// physics engine.
    pub fn generate_convex(mesh: &MeshResource) -> Result<Self, ShapeError> {
        if mesh.positions.is_empty() {
            return Err(ShapeError::EmptyMesh(mesh.name.clone()));
        }
        let mut seen = HashSet::with_capacity(mesh.positions.len());
        let points: Vec<Vec3> = mesh
            .positions
            .iter()
            .copied()
            .filter(|p| seen.insert([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]))
            .collect();
        log::debug!(
            "convex shape from '{}': {} of {} vertices kept",
            mesh.name,
            points.len(),
            mesh.vertex_count()
        );
        Ok(ShapeResource::Convex { points })
    }

    /// Local-space bounds
    pub fn bounds(&self) -> BoundingBox {
        match self {
            ShapeResource::Box { size, offset } => BoundingBox::from_center_size(*offset, *size),
            ShapeResource::Sphere { radius, offset } => {
                BoundingBox::from_center_size(*offset, Vec3::splat(radius * 2.0))
            }
            ShapeResource::Convex { points } => BoundingBox::from_points(points),
        }
    }

    /// Enclosed volume
    ///
    /// Convex shapes use their bounding box, an upper bound.
    pub fn volume(&self) -> f32 {
        match self {
            ShapeResource::Box { size, .. } => (size.x * size.y * size.z).abs(),
            ShapeResource::Sphere { radius, .. } => 4.0 / 3.0 * PI * radius.powi(3),
            ShapeResource::Convex { .. } => self.bounds().volume(),
        }
    }

    /// Same shape moved by `delta`
    pub fn translated(&self, delta: Vec3) -> Self {
        match self {
            ShapeResource::Box { size, offset } => ShapeResource::Box { size: *size, offset: *offset + delta },
            ShapeResource::Sphere { radius, offset } => {
                ShapeResource::Sphere { radius: *radius, offset: *offset + delta }
            }
            ShapeResource::Convex { points } => ShapeResource::Convex {
                points: points.iter().map(|p| *p + delta).collect(),
            },
        }
    }
}
