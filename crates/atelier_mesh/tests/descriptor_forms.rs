//! Integration tests driving descriptors the way a form does
//!
//! A form only knows the field list; these tests walk it generically and
//! regenerate meshes through the public engine.

use atelier_mesh::{
    EngineError, FieldType, FieldValue, MeshDescriptor, MeshEngine, MeshKind, MeshResource,
    PrimitiveMeshEngine, TextMeshRequest,
};
use atelier_math::Vec3;
use std::cell::Cell;

/// Engine wrapper that counts calls
struct CountingEngine {
    inner: PrimitiveMeshEngine,
    calls: Cell<usize>,
}

impl CountingEngine {
    fn new() -> Self {
        Self {
            inner: PrimitiveMeshEngine::new(),
            calls: Cell::new(0),
        }
    }

    fn bump(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl MeshEngine for CountingEngine {
    fn generate_box(&self, size: Vec3, major: f32, minor: f32) -> Result<MeshResource, EngineError> {
        self.bump();
        self.inner.generate_box(size, major, minor)
    }

    fn generate_plane_xy(&self, width: f32, height: f32, corner_radius: f32) -> Result<MeshResource, EngineError> {
        self.bump();
        self.inner.generate_plane_xy(width, height, corner_radius)
    }

    fn generate_plane_xz(&self, width: f32, depth: f32, corner_radius: f32) -> Result<MeshResource, EngineError> {
        self.bump();
        self.inner.generate_plane_xz(width, depth, corner_radius)
    }

    fn generate_sphere(&self, radius: f32) -> Result<MeshResource, EngineError> {
        self.bump();
        self.inner.generate_sphere(radius)
    }

    fn generate_cone(&self, height: f32, radius: f32) -> Result<MeshResource, EngineError> {
        self.bump();
        self.inner.generate_cone(height, radius)
    }

    fn generate_cylinder(&self, height: f32, radius: f32) -> Result<MeshResource, EngineError> {
        self.bump();
        self.inner.generate_cylinder(height, radius)
    }

    fn generate_text(&self, request: &TextMeshRequest) -> Result<MeshResource, EngineError> {
        self.bump();
        self.inner.generate_text(request)
    }
}

/// Set every float field to the midpoint of its range
fn midpoint_all(mut descriptor: MeshDescriptor) -> MeshDescriptor {
    for field in descriptor.fields() {
        if let FieldType::FloatRange { min, max } = field.field_type {
            descriptor.set_field(field.identifier, FieldValue::Float((min + max) * 0.5));
        }
    }
    descriptor
}

#[test]
fn test_generic_form_walk_produces_meshes() {
    let engine = PrimitiveMeshEngine::new();
    for kind in MeshKind::ALL {
        let descriptor = midpoint_all(kind.default_descriptor());
        for field in descriptor.fields() {
            if let FieldType::FloatRange { min, max } = field.field_type {
                let v = descriptor.field(field.identifier).as_float().unwrap();
                assert_eq!(v, (min + max) * 0.5);
            }
        }
        let mesh = descriptor.to_mesh(&engine);
        assert!(mesh.is_ok(), "{}: {:?}", kind, mesh.err());
    }
}

#[test]
fn test_box_midpoint_extents() {
    let engine = PrimitiveMeshEngine::new();
    let mesh = midpoint_all(MeshKind::Box.default_descriptor())
        .to_mesh(&engine)
        .unwrap();
    let extents = mesh.bounds().extents();
    assert!((extents.x - 0.5).abs() < 1e-6);
    assert!((extents.y - 0.5).abs() < 1e-6);
    assert!((extents.z - 0.5).abs() < 1e-6);
}

#[test]
fn test_to_mesh_is_not_cached() {
    let engine = CountingEngine::new();
    let descriptor = MeshKind::Cone.default_descriptor();
    let a = descriptor.to_mesh(&engine).unwrap();
    let b = descriptor.to_mesh(&engine).unwrap();
    assert_eq!(a, b);
    assert_eq!(engine.calls.get(), 2);
}

#[test]
fn test_minimum_of_range_is_rejected_by_engine_not_registry() {
    let engine = PrimitiveMeshEngine::new();
    let descriptor = MeshKind::PlaneXZ.default_descriptor();
    let zero = FieldValue::Float(0.0);

    // 0.0 is inside the declared range...
    assert!(descriptor.validate_field("width", &zero).is_ok());

    // ...but the engine refuses the degenerate plane.
    let err = descriptor.with_field("width", zero).to_mesh(&engine).unwrap_err();
    assert_eq!(err, EngineError::Degenerate { parameter: "width", value: 0.0 });
}

#[test]
fn test_text_descriptor_edits() {
    let engine = PrimitiveMeshEngine::new();
    let descriptor = MeshKind::Text
        .default_descriptor()
        .with_field("text", FieldValue::String("AB".to_string()));
    let mesh = descriptor.to_mesh(&engine).unwrap();
    // two glyph boxes
    assert_eq!(mesh.vertex_count(), 16);

    let blank = descriptor.with_field("text", FieldValue::String(String::new()));
    assert_eq!(blank.to_mesh(&engine).unwrap_err(), EngineError::EmptyText);
}
