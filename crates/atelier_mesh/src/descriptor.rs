//! Mesh descriptors
//!
//! A [`MeshDescriptor`] is the editable parameter set behind a primitive
//! mesh. Each kind declares its fields as a static list of
//! [`FieldDescriptor`]s; a form can be built by walking [`MeshDescriptor::fields`]
//! and reading/writing values by identifier, without knowing the concrete kind.
//!
//! Identifiers are fixed per kind. Asking for an identifier the kind does not
//! declare, or writing a value of the wrong type, is a wiring bug and panics.

use std::fmt;

use atelier_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::engine::{MeshEngine, TextMeshRequest};
use crate::error::EngineError;
use crate::mesh::MeshResource;
use crate::text::{AttributedText, Font};

/// The primitive mesh kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    Box,
    PlaneXY,
    PlaneXZ,
    Sphere,
    Cone,
    Cylinder,
    Text,
    ExtrudingText,
}

impl MeshKind {
    /// Every kind, in picker order
    pub const ALL: [MeshKind; 8] = [
        MeshKind::Box,
        MeshKind::PlaneXY,
        MeshKind::PlaneXZ,
        MeshKind::Sphere,
        MeshKind::Cone,
        MeshKind::Cylinder,
        MeshKind::Text,
        MeshKind::ExtrudingText,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            MeshKind::Box => "box",
            MeshKind::PlaneXY => "xy_plane",
            MeshKind::PlaneXZ => "xz_plane",
            MeshKind::Sphere => "sphere",
            MeshKind::Cone => "cone",
            MeshKind::Cylinder => "cylinder",
            MeshKind::Text => "text",
            MeshKind::ExtrudingText => "extruding_text",
        }
    }

    /// True if the engine may deliver this kind's mesh later
    pub fn is_deferred(self) -> bool {
        matches!(self, MeshKind::Text | MeshKind::ExtrudingText)
    }

    /// The default parameter set for this kind
    pub fn default_descriptor(self) -> MeshDescriptor {
        match self {
            MeshKind::Box => MeshDescriptor::Box(BoxDescriptor::default()),
            MeshKind::PlaneXY => MeshDescriptor::PlaneXY(PlaneXYDescriptor::default()),
            MeshKind::PlaneXZ => MeshDescriptor::PlaneXZ(PlaneXZDescriptor::default()),
            MeshKind::Sphere => MeshDescriptor::Sphere(SphereDescriptor::default()),
            MeshKind::Cone => MeshDescriptor::Cone(ConeDescriptor::default()),
            MeshKind::Cylinder => MeshDescriptor::Cylinder(CylinderDescriptor::default()),
            MeshKind::Text => MeshDescriptor::Text(TextDescriptor::default()),
            MeshKind::ExtrudingText => MeshDescriptor::ExtrudingText(ExtrudingTextDescriptor::default()),
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The type of value a field holds, with its valid range
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldType {
    /// A float constrained to `min..=max`
    FloatRange { min: f32, max: f32 },
    String,
    Font,
    RichText,
}

/// An editable field of a descriptor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldDescriptor {
    /// Stable key used with [`MeshDescriptor::field`] / [`MeshDescriptor::set_field`]
    pub identifier: &'static str,
    /// Label shown next to the control
    pub display_name: &'static str,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    const fn float(identifier: &'static str, display_name: &'static str, min: f32, max: f32) -> Self {
        Self {
            identifier,
            display_name,
            field_type: FieldType::FloatRange { min, max },
        }
    }

    const fn of(identifier: &'static str, display_name: &'static str, field_type: FieldType) -> Self {
        Self {
            identifier,
            display_name,
            field_type,
        }
    }
}

/// A field value read from or written to a descriptor
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Float(f32),
    String(String),
    Font(Font),
    RichText(AttributedText),
}

impl FieldValue {
    fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Font(_) => "font",
            FieldValue::RichText(_) => "rich text",
        }
    }

    fn matches(&self, field_type: &FieldType) -> bool {
        matches!(
            (self, field_type),
            (FieldValue::Float(_), FieldType::FloatRange { .. })
                | (FieldValue::String(_), FieldType::String)
                | (FieldValue::Font(_), FieldType::Font)
                | (FieldValue::RichText(_), FieldType::RichText)
        )
    }

    /// The float payload, if this is a float
    pub fn as_float(&self) -> Option<f32> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// A user-correctable problem with a field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Float outside the field's declared range
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// Font with an unusable size or family
    InvalidFont { field: &'static str, reason: String },
}

impl FieldError {
    /// Identifier of the field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::OutOfRange { field, .. } => field,
            FieldError::InvalidFont { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::OutOfRange { field, value, min, max } => {
                write!(f, "'{}' must be within {}..={} (got {})", field, min, max, value)
            }
            FieldError::InvalidFont { field, reason } => {
                write!(f, "'{}' has an invalid font: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for FieldError {}

// --- Concrete descriptors ---

/// Box with rounded corners
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxDescriptor {
    pub size: Vec3,
    pub major_corner_radius: f32,
    pub minor_corner_radius: f32,
}

impl Default for BoxDescriptor {
    fn default() -> Self {
        Self {
            size: Vec3::splat(0.1),
            major_corner_radius: 0.2,
            minor_corner_radius: 0.05,
        }
    }
}

/// Plane in XY (vertical, facing the viewer)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneXYDescriptor {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
}

impl Default for PlaneXYDescriptor {
    fn default() -> Self {
        Self {
            width: 0.1,
            height: 0.1,
            corner_radius: 0.0,
        }
    }
}

/// Plane in XZ (horizontal, like a floor)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneXZDescriptor {
    pub width: f32,
    pub depth: f32,
    pub corner_radius: f32,
}

impl Default for PlaneXZDescriptor {
    fn default() -> Self {
        Self {
            width: 0.1,
            depth: 0.1,
            corner_radius: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescriptor {
    pub radius: f32,
}

impl Default for SphereDescriptor {
    fn default() -> Self {
        Self { radius: 0.1 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConeDescriptor {
    pub height: f32,
    pub radius: f32,
}

impl Default for ConeDescriptor {
    fn default() -> Self {
        Self {
            height: 0.1,
            radius: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CylinderDescriptor {
    pub height: f32,
    pub radius: f32,
}

impl Default for CylinderDescriptor {
    fn default() -> Self {
        Self {
            height: 0.1,
            radius: 0.1,
        }
    }
}

/// Plain string rendered in a single font
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextDescriptor {
    pub text: String,
    pub extrusion_depth: f32,
    pub font: Font,
}

impl Default for TextDescriptor {
    fn default() -> Self {
        Self {
            text: "Hello".to_string(),
            extrusion_depth: 0.01,
            font: Font::default(),
        }
    }
}

/// Attributed text with per-run fonts, extruded with an optional chamfer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtrudingTextDescriptor {
    pub content: AttributedText,
    pub extrusion_depth: f32,
    pub chamfer_radius: f32,
    /// Font for runs that carry none
    pub default_font: Font,
}

impl Default for ExtrudingTextDescriptor {
    fn default() -> Self {
        Self {
            content: AttributedText::plain("Hello"),
            extrusion_depth: 0.01,
            chamfer_radius: 0.0,
            default_font: Font::default(),
        }
    }
}

const BOX_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::float("size.x", "Width", 0.0, 1.0),
    FieldDescriptor::float("size.y", "Height", 0.0, 1.0),
    FieldDescriptor::float("size.z", "Depth", 0.0, 1.0),
    FieldDescriptor::float("major_corner_radius", "Major Corner Radius", 0.0, 1.0),
    FieldDescriptor::float("minor_corner_radius", "Minor Corner Radius", 0.0, 1.0),
];

const PLANE_XY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::float("width", "Width", 0.0, 1.0),
    FieldDescriptor::float("height", "Height", 0.0, 1.0),
    FieldDescriptor::float("corner_radius", "Corner Radius", 0.0, 1.0),
];

const PLANE_XZ_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::float("width", "Width", 0.0, 1.0),
    FieldDescriptor::float("depth", "Depth", 0.0, 1.0),
    FieldDescriptor::float("corner_radius", "Corner Radius", 0.0, 1.0),
];

const SPHERE_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::float("radius", "Radius", 0.0, 1.0)];

const CONE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::float("height", "Height", 0.0, 1.0),
    FieldDescriptor::float("radius", "Radius", 0.0, 1.0),
];

const CYLINDER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::float("height", "Height", 0.0, 1.0),
    FieldDescriptor::float("radius", "Radius", 0.0, 1.0),
];

const TEXT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::of("text", "Text", FieldType::String),
    FieldDescriptor::float("extrusion_depth", "Extrusion Depth", 0.0, 0.5),
    FieldDescriptor::of("font", "Font", FieldType::Font),
];

const EXTRUDING_TEXT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::of("content", "Content", FieldType::RichText),
    FieldDescriptor::float("extrusion_depth", "Extrusion Depth", 0.0, 0.5),
    FieldDescriptor::float("chamfer_radius", "Chamfer Radius", 0.0, 0.1),
    FieldDescriptor::of("default_font", "Default Font", FieldType::Font),
];

/// An editable parameter set for one primitive mesh kind
///
/// Two descriptors are equal only if they are the same kind with equal fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshDescriptor {
    Box(BoxDescriptor),
    PlaneXY(PlaneXYDescriptor),
    PlaneXZ(PlaneXZDescriptor),
    Sphere(SphereDescriptor),
    Cone(ConeDescriptor),
    Cylinder(CylinderDescriptor),
    Text(TextDescriptor),
    ExtrudingText(ExtrudingTextDescriptor),
}

impl Default for MeshDescriptor {
    fn default() -> Self {
        MeshKind::Box.default_descriptor()
    }
}

impl MeshDescriptor {
    /// The kind of this descriptor
    pub fn kind(&self) -> MeshKind {
        match self {
            MeshDescriptor::Box(_) => MeshKind::Box,
            MeshDescriptor::PlaneXY(_) => MeshKind::PlaneXY,
            MeshDescriptor::PlaneXZ(_) => MeshKind::PlaneXZ,
            MeshDescriptor::Sphere(_) => MeshKind::Sphere,
            MeshDescriptor::Cone(_) => MeshKind::Cone,
            MeshDescriptor::Cylinder(_) => MeshKind::Cylinder,
            MeshDescriptor::Text(_) => MeshKind::Text,
            MeshDescriptor::ExtrudingText(_) => MeshKind::ExtrudingText,
        }
    }

    /// The ordered list of editable fields
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            MeshDescriptor::Box(_) => BOX_FIELDS,
            MeshDescriptor::PlaneXY(_) => PLANE_XY_FIELDS,
            MeshDescriptor::PlaneXZ(_) => PLANE_XZ_FIELDS,
            MeshDescriptor::Sphere(_) => SPHERE_FIELDS,
            MeshDescriptor::Cone(_) => CONE_FIELDS,
            MeshDescriptor::Cylinder(_) => CYLINDER_FIELDS,
            MeshDescriptor::Text(_) => TEXT_FIELDS,
            MeshDescriptor::ExtrudingText(_) => EXTRUDING_TEXT_FIELDS,
        }
    }

    /// Look up the declaration of a field
    ///
    /// # Panics
    /// If `identifier` is not declared by this kind.
    pub fn field_descriptor(&self, identifier: &str) -> &'static FieldDescriptor {
        self.fields()
            .iter()
            .find(|f| f.identifier == identifier)
            .unwrap_or_else(|| panic!("{} descriptor has no field '{}'", self.kind(), identifier))
    }

    fn float_slot(&mut self, identifier: &str) -> Option<&mut f32> {
        let slot = match (self, identifier) {
            (MeshDescriptor::Box(d), "size.x") => &mut d.size.x,
            (MeshDescriptor::Box(d), "size.y") => &mut d.size.y,
            (MeshDescriptor::Box(d), "size.z") => &mut d.size.z,
            (MeshDescriptor::Box(d), "major_corner_radius") => &mut d.major_corner_radius,
            (MeshDescriptor::Box(d), "minor_corner_radius") => &mut d.minor_corner_radius,
            (MeshDescriptor::PlaneXY(d), "width") => &mut d.width,
            (MeshDescriptor::PlaneXY(d), "height") => &mut d.height,
            (MeshDescriptor::PlaneXY(d), "corner_radius") => &mut d.corner_radius,
            (MeshDescriptor::PlaneXZ(d), "width") => &mut d.width,
            (MeshDescriptor::PlaneXZ(d), "depth") => &mut d.depth,
            (MeshDescriptor::PlaneXZ(d), "corner_radius") => &mut d.corner_radius,
            (MeshDescriptor::Sphere(d), "radius") => &mut d.radius,
            (MeshDescriptor::Cone(d), "height") => &mut d.height,
            (MeshDescriptor::Cone(d), "radius") => &mut d.radius,
            (MeshDescriptor::Cylinder(d), "height") => &mut d.height,
            (MeshDescriptor::Cylinder(d), "radius") => &mut d.radius,
            (MeshDescriptor::Text(d), "extrusion_depth") => &mut d.extrusion_depth,
            (MeshDescriptor::ExtrudingText(d), "extrusion_depth") => &mut d.extrusion_depth,
            (MeshDescriptor::ExtrudingText(d), "chamfer_radius") => &mut d.chamfer_radius,
            _ => return None,
        };
        Some(slot)
    }

    fn string_slot(&mut self, identifier: &str) -> Option<&mut String> {
        match (self, identifier) {
            (MeshDescriptor::Text(d), "text") => Some(&mut d.text),
            _ => None,
        }
    }

    fn font_slot(&mut self, identifier: &str) -> Option<&mut Font> {
        match (self, identifier) {
            (MeshDescriptor::Text(d), "font") => Some(&mut d.font),
            (MeshDescriptor::ExtrudingText(d), "default_font") => Some(&mut d.default_font),
            _ => None,
        }
    }

    fn rich_text_slot(&mut self, identifier: &str) -> Option<&mut AttributedText> {
        match (self, identifier) {
            (MeshDescriptor::ExtrudingText(d), "content") => Some(&mut d.content),
            _ => None,
        }
    }

    fn float_value(&self, identifier: &str) -> Option<f32> {
        let value = match (self, identifier) {
            (MeshDescriptor::Box(d), "size.x") => d.size.x,
            (MeshDescriptor::Box(d), "size.y") => d.size.y,
            (MeshDescriptor::Box(d), "size.z") => d.size.z,
            (MeshDescriptor::Box(d), "major_corner_radius") => d.major_corner_radius,
            (MeshDescriptor::Box(d), "minor_corner_radius") => d.minor_corner_radius,
            (MeshDescriptor::PlaneXY(d), "width") => d.width,
            (MeshDescriptor::PlaneXY(d), "height") => d.height,
            (MeshDescriptor::PlaneXY(d), "corner_radius") => d.corner_radius,
            (MeshDescriptor::PlaneXZ(d), "width") => d.width,
            (MeshDescriptor::PlaneXZ(d), "depth") => d.depth,
            (MeshDescriptor::PlaneXZ(d), "corner_radius") => d.corner_radius,
            (MeshDescriptor::Sphere(d), "radius") => d.radius,
            (MeshDescriptor::Cone(d), "height") => d.height,
            (MeshDescriptor::Cone(d), "radius") => d.radius,
            (MeshDescriptor::Cylinder(d), "height") => d.height,
            (MeshDescriptor::Cylinder(d), "radius") => d.radius,
            (MeshDescriptor::Text(d), "extrusion_depth") => d.extrusion_depth,
            (MeshDescriptor::ExtrudingText(d), "extrusion_depth") => d.extrusion_depth,
            (MeshDescriptor::ExtrudingText(d), "chamfer_radius") => d.chamfer_radius,
            _ => return None,
        };
        Some(value)
    }

    /// Read a field by identifier
    ///
    /// # Panics
    /// If `identifier` is not one of [`fields`](Self::fields).
    pub fn field(&self, identifier: &str) -> FieldValue {
        let declared = self.field_descriptor(identifier);
        let value = match (declared.field_type, self, identifier) {
            (FieldType::FloatRange { .. }, _, _) => self.float_value(identifier).map(FieldValue::Float),
            (FieldType::String, MeshDescriptor::Text(d), "text") => Some(FieldValue::String(d.text.clone())),
            (FieldType::Font, MeshDescriptor::Text(d), "font") => Some(FieldValue::Font(d.font.clone())),
            (FieldType::Font, MeshDescriptor::ExtrudingText(d), "default_font") => {
                Some(FieldValue::Font(d.default_font.clone()))
            }
            (FieldType::RichText, MeshDescriptor::ExtrudingText(d), "content") => {
                Some(FieldValue::RichText(d.content.clone()))
            }
            _ => None,
        };
        value.unwrap_or_else(|| panic!("{} field '{}' is declared but not wired", self.kind(), identifier))
    }

    /// Write a field by identifier
    ///
    /// No range check is applied here; see [`validate_field`](Self::validate_field).
    ///
    /// # Panics
    /// If `identifier` is not declared by this kind, or `value` has the wrong type.
    pub fn set_field(&mut self, identifier: &str, value: FieldValue) {
        let kind = self.kind();
        let declared = self.field_descriptor(identifier);
        if !value.matches(&declared.field_type) {
            panic!(
                "{} field '{}' expects {:?}, got a {} value",
                kind,
                identifier,
                declared.field_type,
                value.type_name()
            );
        }
        let wired = match value {
            FieldValue::Float(v) => self.float_slot(identifier).map(|slot| *slot = v),
            FieldValue::String(v) => self.string_slot(identifier).map(|slot| *slot = v),
            FieldValue::Font(v) => self.font_slot(identifier).map(|slot| *slot = v),
            FieldValue::RichText(v) => self.rich_text_slot(identifier).map(|slot| *slot = v),
        };
        if wired.is_none() {
            panic!("{} field '{}' is declared but not wired", kind, identifier);
        }
    }

    /// Consuming variant of [`set_field`](Self::set_field)
    pub fn with_field(mut self, identifier: &str, value: FieldValue) -> Self {
        self.set_field(identifier, value);
        self
    }

    /// Check a candidate value against the field's declared constraints
    ///
    /// # Panics
    /// Same conditions as [`set_field`](Self::set_field).
    pub fn validate_field(&self, identifier: &str, value: &FieldValue) -> Result<(), FieldError> {
        let declared = self.field_descriptor(identifier);
        if !value.matches(&declared.field_type) {
            panic!(
                "{} field '{}' expects {:?}, got a {} value",
                self.kind(),
                identifier,
                declared.field_type,
                value.type_name()
            );
        }
        match (declared.field_type, value) {
            (FieldType::FloatRange { min, max }, FieldValue::Float(v)) => {
                if v.is_finite() && *v >= min && *v <= max {
                    Ok(())
                } else {
                    Err(FieldError::OutOfRange {
                        field: declared.identifier,
                        value: *v,
                        min,
                        max,
                    })
                }
            }
            (FieldType::Font, FieldValue::Font(font)) => validate_font(declared.identifier, font),
            (FieldType::RichText, FieldValue::RichText(text)) => text
                .runs
                .iter()
                .filter_map(|run| run.font.as_ref())
                .try_for_each(|font| validate_font(declared.identifier, font)),
            _ => Ok(()),
        }
    }

    /// Generate the mesh for this descriptor
    ///
    /// Pure: the result is not cached, calling twice asks the engine twice.
    pub fn to_mesh<E: MeshEngine + ?Sized>(&self, engine: &E) -> Result<MeshResource, EngineError> {
        match self {
            MeshDescriptor::Box(d) => engine.generate_box(d.size, d.major_corner_radius, d.minor_corner_radius),
            MeshDescriptor::PlaneXY(d) => engine.generate_plane_xy(d.width, d.height, d.corner_radius),
            MeshDescriptor::PlaneXZ(d) => engine.generate_plane_xz(d.width, d.depth, d.corner_radius),
            MeshDescriptor::Sphere(d) => engine.generate_sphere(d.radius),
            MeshDescriptor::Cone(d) => engine.generate_cone(d.height, d.radius),
            MeshDescriptor::Cylinder(d) => engine.generate_cylinder(d.height, d.radius),
            MeshDescriptor::Text(d) => engine.generate_text(&TextMeshRequest {
                runs: vec![(d.text.clone(), d.font.clone())],
                extrusion_depth: d.extrusion_depth,
                chamfer_radius: 0.0,
            }),
            MeshDescriptor::ExtrudingText(d) => engine.generate_text(&TextMeshRequest {
                runs: d
                    .content
                    .runs
                    .iter()
                    .map(|run| {
                        let font = run.font.clone().unwrap_or_else(|| d.default_font.clone());
                        (run.text.clone(), font)
                    })
                    .collect(),
                extrusion_depth: d.extrusion_depth,
                chamfer_radius: d.chamfer_radius,
            }),
        }
    }
}

fn validate_font(field: &'static str, font: &Font) -> Result<(), FieldError> {
    if font.family.trim().is_empty() {
        return Err(FieldError::InvalidFont {
            field,
            reason: "family name is empty".to_string(),
        });
    }
    if !(font.size.is_finite() && font.size > 0.0) {
        return Err(FieldError::InvalidFont {
            field,
            reason: format!("size must be positive (got {})", font.size),
        });
    }
    Ok(())
}
