//! Mesh generation
//!
//! [`MeshEngine`] is the seam to whatever actually builds meshes. The editor
//! only ever asks it for primitives by parameters. [`PrimitiveMeshEngine`]
//! tessellates them in-process.

use std::f32::consts::{PI, TAU};

use atelier_math::Vec3;

use crate::error::EngineError;
use crate::mesh::MeshResource;
use crate::text::Font;

/// Parameters for a text mesh
#[derive(Clone, Debug, PartialEq)]
pub struct TextMeshRequest {
    /// Text spans with their resolved font
    pub runs: Vec<(String, Font)>,
    /// Depth of the extruded glyphs
    pub extrusion_depth: f32,
    /// Bevel radius on glyph edges
    pub chamfer_radius: f32,
}

/// Generates mesh resources from primitive parameters
///
/// Implementations may reject parameters that produce degenerate geometry.
/// Errors are reported, never retried.
pub trait MeshEngine {
    /// Box centered at the origin with optional rounded corners
    fn generate_box(
        &self,
        size: Vec3,
        major_corner_radius: f32,
        minor_corner_radius: f32,
    ) -> Result<MeshResource, EngineError>;

    /// Plane in the XY plane facing +Z
    fn generate_plane_xy(&self, width: f32, height: f32, corner_radius: f32) -> Result<MeshResource, EngineError> {
        let width = positive("width", width)?;
        let height = positive("height", height)?;
        let radius = clamp_corner_radius(non_negative("corner_radius", corner_radius)?, width, height);
        let outline = rounded_rect(width * 0.5, height * 0.5, radius, self.segments / 4);
        Ok(flat_outline("xy_plane", &outline, |x, y| Vec3::new(x, y, 0.0)))
    }

    fn generate_plane_xz(&self, width: f32, depth: f32, corner_radius: f32) -> Result<MeshResource, EngineError> {
        let width = positive("width", width)?;
        let depth = positive("depth", depth)?;
        let radius = clamp_corner_radius(non_negative("corner_radius", corner_radius)?, width, depth);
        let outline = rounded_rect(width * 0.5, depth * 0.5, radius, self.segments / 4);
        // outline y runs toward -z so the plane faces +y
        Ok(flat_outline("xz_plane", &outline, |x, y| Vec3::new(x, 0.0, -y)))
    }

    fn generate_sphere(&self, radius: f32) -> Result<MeshResource, EngineError>;

    /// Cone with its base centered at the origin, apex on +Y
    fn generate_cone(&self, height: f32, radius: f32) -> Result<MeshResource, EngineError>;

    /// Cylinder centered at the origin along Y
    fn generate_cylinder(&self, height: f32, radius: f32) -> Result<MeshResource, EngineError>;

    /// Extruded text
    fn generate_text(&self, request: &TextMeshRequest) -> Result<MeshResource, EngineError>;
}

/// In-process mesh engine producing indexed triangle lists
///
/// Plane corner radii are clamped to half the shorter side and rounded with
/// `segments / 4` steps per corner. Box corner radii are validated only; the
/// box is tessellated with sharp corners.
#[derive(Clone, Debug)]
pub struct PrimitiveMeshEngine {
    /// Segments around curved primitives (sphere, cone, cylinder)
    pub segments: u32,
    /// Latitude rings on spheres
    pub rings: u32,
}

impl Default for PrimitiveMeshEngine {
    fn default() -> Self {
        Self {
            segments: 24,
            rings: 12,
        }
    }
}

impl PrimitiveMeshEngine {
    /// Create an engine with default tessellation
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of segments around curved primitives (minimum 3)
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(3);
        self
    }
}

fn finite(parameter: &'static str, value: f32) -> Result<f32, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite { parameter })
    }
}

fn positive(parameter: &'static str, value: f32) -> Result<f32, EngineError> {
    let value = finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::Degenerate { parameter, value })
    }
}

fn non_negative(parameter: &'static str, value: f32) -> Result<f32, EngineError> {
    let value = finite(parameter, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::Degenerate { parameter, value })
    }
}

/// 8 corners, 12 triangles, counter-clockwise from outside
fn cuboid(name: &str, center: Vec3, size: Vec3, positions: &mut Vec<Vec3>, indices: &mut Vec<u32>) {
    let h = size * 0.5;
    let base = positions.len() as u32;
    for i in 0..8u32 {
        let sx = if i & 1 == 0 { -h.x } else { h.x };
        let sy = if i & 2 == 0 { -h.y } else { h.y };
        let sz = if i & 4 == 0 { -h.z } else { h.z };
        positions.push(center + Vec3::new(sx, sy, sz));
    }
    const FACES: [[u32; 6]; 6] = [
        [0, 2, 1, 1, 2, 3], // -z
        [4, 5, 6, 5, 7, 6], // +z
        [0, 1, 4, 1, 5, 4], // -y
        [2, 6, 3, 3, 6, 7], // +y
        [0, 4, 2, 2, 4, 6], // -x
        [1, 3, 5, 3, 7, 5], // +x
    ];
    for face in FACES {
        indices.extend(face.iter().map(|i| base + i));
    }
    log::trace!("tessellated cuboid for {}", name);
}

fn quad(name: &str, corners: [Vec3; 4]) -> MeshResource {
    MeshResource::new(name, corners.to_vec(), vec![0, 1, 2, 0, 2, 3])
}

/// Largest usable corner radius for a `width` x `height` rectangle
fn clamp_corner_radius(radius: f32, width: f32, height: f32) -> f32 {
    radius.min(0.5 * width.min(height))
}

/// Counter-clockwise outline of a rounded rectangle centered on the origin
///
/// A zero radius yields the four sharp corners.
fn rounded_rect(half_w: f32, half_h: f32, radius: f32, steps: u32) -> Vec<(f32, f32)> {
    let corners = [(-half_w, -half_h), (half_w, -half_h), (half_w, half_h), (-half_w, half_h)];
    if radius <= 0.0 {
        return corners.to_vec();
    }
    let steps = steps.max(1);
    let mut outline = Vec::with_capacity(4 * (steps as usize + 1));
    // arc start angles for the corners in outline order
    let starts = [PI, 1.5 * PI, 0.0, 0.5 * PI];
    for ((x, y), start) in corners.into_iter().zip(starts) {
        let cx = x - radius * x.signum();
        let cy = y - radius * y.signum();
        for i in 0..=steps {
            let angle = start + 0.5 * PI * i as f32 / steps as f32;
            outline.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
        }
    }
    outline
}

/// Flat mesh from an outline; sharp outlines become a single quad
fn flat_outline(name: &str, outline: &[(f32, f32)], place: impl Fn(f32, f32) -> Vec3) -> MeshResource {
    if outline.len() == 4 {
        let corners = [0, 1, 2, 3].map(|i| place(outline[i].0, outline[i].1));
        return quad(name, corners);
    }
    let mut positions: Vec<Vec3> = outline.iter().map(|&(a, b)| place(a, b)).collect();
    let center = positions.len() as u32;
    positions.push(place(0.0, 0.0));
    let mut indices = Vec::with_capacity(outline.len() * 3);
    fan(center, 0, outline.len() as u32, false, &mut indices);
    MeshResource::new(name, positions, indices)
}

/// Ring of `segments` points in the XZ plane at height `y`
fn ring(y: f32, radius: f32, segments: u32) -> impl Iterator<Item = Vec3> {
    (0..segments).map(move |s| {
        let angle = TAU * s as f32 / segments as f32;
        Vec3::new(radius * angle.cos(), y, radius * angle.sin())
    })
}

/// Fan of triangles from `center` to a ring starting at `first`
fn fan(center: u32, first: u32, segments: u32, flip: bool, indices: &mut Vec<u32>) {
    for s in 0..segments {
        let a = first + s;
        let b = first + (s + 1) % segments;
        if flip {
            indices.extend([center, b, a]);
        } else {
            indices.extend([center, a, b]);
        }
    }
}

impl MeshEngine for PrimitiveMeshEngine {
    fn generate_box(
        &self,
        size: Vec3,
        major_corner_radius: f32,
        minor_corner_radius: f32,
    ) -> Result<MeshResource, EngineError> {
        positive("size.x", size.x)?;
        positive("size.y", size.y)?;
        positive("size.z", size.z)?;
        non_negative("major_corner_radius", major_corner_radius)?;
        non_negative("minor_corner_radius", minor_corner_radius)?;

        let mut positions = Vec::with_capacity(8);
        let mut indices = Vec::with_capacity(36);
        cuboid("box", Vec3::ZERO, size, &mut positions, &mut indices);
        Ok(MeshResource::new("box", positions, indices))
    }

    fn generate_plane_xy(&self, width: f32, height: f32, corner_radius: f32) -> Result<MeshResource, EngineError> {
        let w = positive("width", width)? * 0.5;
        let h = positive("height", height)? * 0.5;
        non_negative("corner_radius", corner_radius)?;
        Ok(quad(
            "xy_plane",
            [
                Vec3::new(-w, -h, 0.0),
                Vec3::new(w, -h, 0.0),
                Vec3::new(w, h, 0.0),
                Vec3::new(-w, h, 0.0),
            ],
        ))
    }

    fn generate_plane_xz(&self, width: f32, depth: f32, corner_radius: f32) -> Result<MeshResource, EngineError> {
        let w = positive("width", width)? * 0.5;
        let d = positive("depth", depth)? * 0.5;
        non_negative("corner_radius", corner_radius)?;
        Ok(quad(
            "xz_plane",
            [
                Vec3::new(-w, 0.0, d),
                Vec3::new(w, 0.0, d),
                Vec3::new(w, 0.0, -d),
                Vec3::new(-w, 0.0, -d),
            ],
        ))
    }

    fn generate_sphere(&self, radius: f32) -> Result<MeshResource, EngineError> {
        let radius = positive("radius", radius)?;
        let segments = self.segments.max(3);
        let rings = self.rings.max(2);

        let mut positions = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
        for r in 0..=rings {
            let phi = PI * r as f32 / rings as f32;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();
            for s in 0..=segments {
                let theta = TAU * s as f32 / segments as f32;
                positions.push(Vec3::new(ring_radius * theta.cos(), y, ring_radius * theta.sin()));
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
        for r in 0..rings {
            for s in 0..segments {
                let a = r * stride + s;
                let b = a + stride;
                indices.extend([a, a + 1, b, a + 1, b + 1, b]);
            }
        }
        Ok(MeshResource::new("sphere", positions, indices))
    }

    fn generate_cone(&self, height: f32, radius: f32) -> Result<MeshResource, EngineError> {
        let height = positive("height", height)?;
        let radius = positive("radius", radius)?;
        let segments = self.segments.max(3);

        let mut positions: Vec<Vec3> = ring(0.0, radius, segments).collect();
        let apex = positions.len() as u32;
        positions.push(Vec3::new(0.0, height, 0.0));
        let base_center = positions.len() as u32;
        positions.push(Vec3::ZERO);

        let mut indices = Vec::with_capacity((segments * 6) as usize);
        fan(apex, 0, segments, true, &mut indices);
        fan(base_center, 0, segments, false, &mut indices);
        Ok(MeshResource::new("cone", positions, indices))
    }

    fn generate_cylinder(&self, height: f32, radius: f32) -> Result<MeshResource, EngineError> {
        let half = positive("height", height)? * 0.5;
        let radius = positive("radius", radius)?;
        let segments = self.segments.max(3);

        let mut positions: Vec<Vec3> = ring(-half, radius, segments).collect();
        positions.extend(ring(half, radius, segments));
        let bottom_center = positions.len() as u32;
        positions.push(Vec3::new(0.0, -half, 0.0));
        let top_center = positions.len() as u32;
        positions.push(Vec3::new(0.0, half, 0.0));

        let mut indices = Vec::with_capacity((segments * 12) as usize);
        for s in 0..segments {
            let a = s;
            let b = (s + 1) % segments;
            let c = a + segments;
            let d = b + segments;
            indices.extend([a, c, b, b, c, d]);
        }
        fan(bottom_center, 0, segments, false, &mut indices);
        fan(top_center, segments, segments, true, &mut indices);
        Ok(MeshResource::new("cylinder", positions, indices))
    }

    fn generate_text(&self, request: &TextMeshRequest) -> Result<MeshResource, EngineError> {
        let depth = positive("extrusion_depth", request.extrusion_depth)?;
        non_negative("chamfer_radius", request.chamfer_radius)?;

        let mut positions = Vec::new();
        let mut indices = Vec::new();
        let mut pen_x = 0.0_f32;
        let mut baseline = 0.0_f32;
        let mut line_height = 0.0_f32;

        for (text, font) in &request.runs {
            if font.family.trim().is_empty() {
                return Err(EngineError::InvalidFont("empty family name".to_string()));
            }
            let size = positive("font.size", font.size)?;
            let advance = size * 0.6;
            line_height = line_height.max(size * 1.2);

            for ch in text.chars() {
                if ch == '\n' {
                    pen_x = 0.0;
                    baseline -= line_height;
                    continue;
                }
                if !ch.is_whitespace() {
                    let glyph = Vec3::new(advance * 0.8, size, depth);
                    let center = Vec3::new(pen_x + advance * 0.5, baseline + size * 0.5, depth * 0.5);
                    cuboid("glyph", center, glyph, &mut positions, &mut indices);
                }
                pen_x += advance;
            }
        }

        if positions.is_empty() {
            return Err(EngineError::EmptyText);
        }
        Ok(MeshResource::new("text", positions, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_geometry() {
        let engine = PrimitiveMeshEngine::new();
        let mesh = engine.generate_box(Vec3::new(0.2, 0.4, 0.6), 0.0, 0.0).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.bounds().min, Vec3::new(-0.1, -0.2, -0.3));
        assert_eq!(mesh.bounds().max, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_box_rejects_zero_extent() {
        let engine = PrimitiveMeshEngine::new();
        let err = engine.generate_box(Vec3::new(0.1, 0.0, 0.1), 0.0, 0.0).unwrap_err();
        assert_eq!(err, EngineError::Degenerate { parameter: "size.y", value: 0.0 });
    }

    #[test]
    fn test_box_accepts_large_corner_radius() {
        let engine = PrimitiveMeshEngine::new();
        assert!(engine.generate_box(Vec3::splat(0.1), 0.2, 0.05).is_ok());
    }

    #[test]
    fn test_planes_are_flat() {
        let engine = PrimitiveMeshEngine::new();
        let xy = engine.generate_plane_xy(0.1, 0.2, 0.0).unwrap();
        assert!(xy.positions.iter().all(|p| p.z == 0.0));
        let xz = engine.generate_plane_xz(0.1, 0.2, 0.0).unwrap();
        assert!(xz.positions.iter().all(|p| p.y == 0.0));
        assert_eq!(xz.triangle_count(), 2);
    }

    #[test]
    fn test_plane_corner_radius_rounds_outline() {
        let engine = PrimitiveMeshEngine::new();
        let sharp = engine.generate_plane_xy(0.2, 0.2, 0.0).unwrap();
        let rounded = engine.generate_plane_xy(0.2, 0.2, 0.05).unwrap();
        assert!(rounded.vertex_count() > sharp.vertex_count());
        // corner point is cut off by the rounding
        let corner_dist = (0.1f32 * 0.1 * 2.0).sqrt();
        assert!(rounded
            .positions
            .iter()
            .all(|p| (p.x * p.x + p.y * p.y).sqrt() < corner_dist - 1e-4));
        assert!((rounded.bounds().max.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_plane_corner_radius_clamped() {
        let engine = PrimitiveMeshEngine::new();
        let huge = engine.generate_plane_xz(0.2, 0.1, 5.0).unwrap();
        let half = engine.generate_plane_xz(0.2, 0.1, 0.05).unwrap();
        assert_eq!(huge.positions, half.positions);
        assert!(huge.positions.iter().all(|p| p.y == 0.0));
        let b = huge.bounds();
        assert!((b.max.z - 0.05).abs() < 1e-6 && (b.min.x + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let engine = PrimitiveMeshEngine::new();
        let mesh = engine.generate_sphere(0.5).unwrap();
        for p in &mesh.positions {
            assert!((p.length() - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_rejects_nan() {
        let engine = PrimitiveMeshEngine::new();
        let err = engine.generate_sphere(f32::NAN).unwrap_err();
        assert_eq!(err, EngineError::NonFinite { parameter: "radius" });
    }

    #[test]
    fn test_cone_and_cylinder_heights() {
        let engine = PrimitiveMeshEngine::new().with_segments(8);
        let cone = engine.generate_cone(0.3, 0.1).unwrap();
        assert!((cone.bounds().max.y - 0.3).abs() < 1e-6);
        assert_eq!(cone.triangle_count(), 16);

        let cylinder = engine.generate_cylinder(0.4, 0.1).unwrap();
        assert!((cylinder.bounds().extents().y - 0.4).abs() < 1e-6);
        assert_eq!(cylinder.triangle_count(), 32);
    }

    #[test]
    fn test_text_one_glyph_per_visible_char() {
        let engine = PrimitiveMeshEngine::new();
        let request = TextMeshRequest {
            runs: vec![("a b".to_string(), Font::system(0.1))],
            extrusion_depth: 0.01,
            chamfer_radius: 0.0,
        };
        let mesh = engine.generate_text(&request).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
    }

    #[test]
    fn test_text_rejects_blank() {
        let engine = PrimitiveMeshEngine::new();
        let request = TextMeshRequest {
            runs: vec![("   ".to_string(), Font::system(0.1))],
            extrusion_depth: 0.01,
            chamfer_radius: 0.0,
        };
        assert_eq!(engine.generate_text(&request).unwrap_err(), EngineError::EmptyText);
    }

    #[test]
    fn test_text_rejects_unnamed_font() {
        let engine = PrimitiveMeshEngine::new();
        let request = TextMeshRequest {
            runs: vec![("a".to_string(), Font::new(" ", 0.1))],
            extrusion_depth: 0.01,
            chamfer_radius: 0.0,
        };
        assert!(matches!(engine.generate_text(&request), Err(EngineError::InvalidFont(_))));
    }
}
