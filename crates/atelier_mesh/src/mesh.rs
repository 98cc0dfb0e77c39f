//! Indexed triangle meshes

use atelier_math::{BoundingBox, Vec3};

/// A generated mesh: vertex positions plus a triangle index list
///
/// Produced by a [`MeshEngine`](crate::MeshEngine). Meshes are plain values;
/// they are regenerated from their descriptor on demand rather than cached.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshResource {
    /// Human readable name of the primitive that produced this mesh
    pub name: String,
    /// Vertex positions in local space
    pub positions: Vec<Vec3>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
    bounds: BoundingBox,
}

impl MeshResource {
    /// Create a mesh from positions and triangle indices
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.len() % 3 == 0, "triangle list length must be a multiple of 3");
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < positions.len()),
            "index out of range"
        );
        let bounds = BoundingBox::from_points(&positions);
        Self {
            name: name.into(),
            positions,
            indices,
            bounds,
        }
    }

    /// Local-space bounds of the mesh
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as vertex position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Vertex data as raw bytes for upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshResource {
        MeshResource::new(
            "triangle",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_bounds() {
        let mesh = triangle();
        assert_eq!(mesh.bounds().min, Vec3::ZERO);
        assert_eq!(mesh.bounds().max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_triangles_iter() {
        let mesh = triangle();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[Vec3::ZERO, Vec3::X, Vec3::Y]]);
    }

    #[test]
    fn test_position_bytes_len() {
        let mesh = triangle();
        assert_eq!(mesh.position_bytes().len(), 3 * 12);
    }
}
