//! Render materials carried by a model component
//!
//! Materials are plain values. Rendering them is the host's job; this module
//! only describes the parameters each material kind exposes.

use std::fmt;

use atelier_math::Color;
use serde::{Serialize, Deserialize};

/// Which triangle faces are culled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceCulling {
    None,
    #[default]
    Back,
    Front,
}

impl FaceCulling {
    pub const ALL: [FaceCulling; 3] = [FaceCulling::None, FaceCulling::Back, FaceCulling::Front];

    pub fn label(self) -> &'static str {
        match self {
            FaceCulling::None => "None",
            FaceCulling::Back => "Back",
            FaceCulling::Front => "Front",
        }
    }
}

/// How triangles are rasterized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleFillMode {
    #[default]
    Fill,
    Lines,
}

impl TriangleFillMode {
    pub const ALL: [TriangleFillMode; 2] = [TriangleFillMode::Fill, TriangleFillMode::Lines];

    pub fn label(self) -> &'static str {
        match self {
            TriangleFillMode::Fill => "Fill",
            TriangleFillMode::Lines => "Lines",
        }
    }
}

/// Opaque or alpha-blended output
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blending {
    #[default]
    Opaque,
    /// Blended with the given opacity in [0, 1]
    Transparent { opacity: f32 },
}

impl Blending {
    /// Effective opacity (1.0 when opaque)
    pub fn opacity(self) -> f32 {
        match self {
            Blending::Opaque => 1.0,
            Blending::Transparent { opacity } => opacity,
        }
    }

    /// Transparent blending with the opacity clamped to [0, 1]
    pub fn transparent(opacity: f32) -> Self {
        Blending::Transparent { opacity: opacity.clamp(0.0, 1.0) }
    }
}

/// Lit material with a tint and simple metallic/roughness response
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleMaterial {
    pub tint: Color,
    pub emissive: Color,
    /// 0.0 = dielectric, 1.0 = metal
    pub metallic: f32,
    pub roughness: f32,
    pub face_culling: FaceCulling,
    pub triangle_fill_mode: TriangleFillMode,
    pub reads_depth: bool,
    pub writes_depth: bool,
    /// Use the tint's alpha as opacity
    pub uses_transparency: bool,
}

impl Default for SimpleMaterial {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            emissive: Color::CLEAR,
            metallic: 0.0,
            roughness: 0.5,
            face_culling: FaceCulling::Back,
            triangle_fill_mode: TriangleFillMode::Fill,
            reads_depth: true,
            writes_depth: true,
            uses_transparency: false,
        }
    }
}

impl SimpleMaterial {
    /// Material with the given tint, metallic or not
    ///
    /// Transparency is enabled when the tint is not fully opaque.
    pub fn new(tint: Color, is_metallic: bool) -> Self {
        Self {
            tint,
            metallic: if is_metallic { 1.0 } else { 0.0 },
            uses_transparency: tint.a < 1.0,
            ..Self::default()
        }
    }
}

/// Material unaffected by scene lighting
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnlitMaterial {
    pub tint: Color,
    pub blending: Blending,
    pub face_culling: FaceCulling,
    pub triangle_fill_mode: TriangleFillMode,
    pub reads_depth: bool,
    pub writes_depth: bool,
    pub applies_post_process_tone_map: bool,
}

impl Default for UnlitMaterial {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            blending: Blending::Opaque,
            face_culling: FaceCulling::Back,
            triangle_fill_mode: TriangleFillMode::Fill,
            reads_depth: true,
            writes_depth: true,
            applies_post_process_tone_map: true,
        }
    }
}

/// Physically based material
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicallyBasedMaterial {
    pub base_color: Color,
    pub metallic: f32,
    pub roughness: f32,
    pub specular: f32,
    pub clearcoat: f32,
    pub emissive_color: Color,
    pub emissive_intensity: f32,
    /// Fragments with opacity below this are discarded; `None` disables the test
    pub opacity_threshold: Option<f32>,
    pub blending: Blending,
    pub face_culling: FaceCulling,
}

impl Default for PhysicallyBasedMaterial {
    fn default() -> Self {
        Self {
            base_color: Color::WHITE,
            metallic: 0.0,
            roughness: 0.5,
            specular: 0.5,
            clearcoat: 0.0,
            emissive_color: Color::BLACK,
            emissive_intensity: 1.0,
            opacity_threshold: None,
            blending: Blending::Opaque,
            face_culling: FaceCulling::Back,
        }
    }
}

/// Invisible material that hides virtual content behind it
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcclusionMaterial {
    pub reads_depth: bool,
    pub receives_dynamic_lighting: bool,
}

impl Default for OcclusionMaterial {
    fn default() -> Self {
        Self {
            reads_depth: true,
            receives_dynamic_lighting: false,
        }
    }
}

/// Material kinds in picker order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Simple,
    Unlit,
    PhysicallyBased,
    Occlusion,
    Skybox,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 5] = [
        MaterialKind::Simple,
        MaterialKind::Unlit,
        MaterialKind::PhysicallyBased,
        MaterialKind::Occlusion,
        MaterialKind::Skybox,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MaterialKind::Simple => "Simple Material",
            MaterialKind::Unlit => "Unlit Material",
            MaterialKind::PhysicallyBased => "Physically Based Material",
            MaterialKind::Occlusion => "Occlusion Material",
            MaterialKind::Skybox => "Skybox Material",
        }
    }

    /// A freshly added material of this kind
    pub fn default_material(self) -> Material {
        match self {
            MaterialKind::Simple => Material::Simple(SimpleMaterial::default()),
            MaterialKind::Unlit => Material::Unlit(UnlitMaterial::default()),
            MaterialKind::PhysicallyBased => Material::PhysicallyBased(PhysicallyBasedMaterial::default()),
            MaterialKind::Occlusion => Material::Occlusion(OcclusionMaterial::default()),
            MaterialKind::Skybox => Material::Skybox,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A material in a model's ordered material list
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    Simple(SimpleMaterial),
    Unlit(UnlitMaterial),
    PhysicallyBased(PhysicallyBasedMaterial),
    Occlusion(OcclusionMaterial),
    /// Image-based environment; nothing to configure
    Skybox,
}

impl Default for Material {
    fn default() -> Self {
        Material::Simple(SimpleMaterial::default())
    }
}

impl Material {
    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Simple(_) => MaterialKind::Simple,
            Material::Unlit(_) => MaterialKind::Unlit,
            Material::PhysicallyBased(_) => MaterialKind::PhysicallyBased,
            Material::Occlusion(_) => MaterialKind::Occlusion,
            Material::Skybox => MaterialKind::Skybox,
        }
    }

    /// The default model material: black and metallic
    pub fn default_model() -> Self {
        Material::Simple(SimpleMaterial::new(Color::white(0.0, 1.0), true))
    }

    /// Translucent white used for scene walls
    pub fn wall() -> Self {
        Material::Simple(SimpleMaterial::new(Color::white(1.0, 0.1), true))
    }

    /// True if the material blends with what is behind it
    pub fn is_translucent(&self) -> bool {
        match self {
            Material::Simple(m) => m.uses_transparency && m.tint.a < 1.0,
            Material::Unlit(m) => m.blending.opacity() < 1.0,
            Material::PhysicallyBased(m) => m.blending.opacity() < 1.0,
            Material::Occlusion(_) | Material::Skybox => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips() {
        for kind in MaterialKind::ALL {
            assert_eq!(kind.default_material().kind(), kind);
        }
    }

    #[test]
    fn test_default_model_material() {
        match Material::default_model() {
            Material::Simple(m) => {
                assert_eq!(m.tint, Color::BLACK);
                assert_eq!(m.metallic, 1.0);
                assert!(!m.uses_transparency);
            }
            other => panic!("Expected Simple material, got {:?}", other),
        }
    }

    #[test]
    fn test_wall_material_is_translucent() {
        assert!(Material::wall().is_translucent());
        assert!(!Material::default_model().is_translucent());
    }

    #[test]
    fn test_transparent_blending_clamps() {
        assert_eq!(Blending::transparent(2.0).opacity(), 1.0);
        assert_eq!(Blending::transparent(-1.0).opacity(), 0.0);
        assert_eq!(Blending::Opaque.opacity(), 1.0);
    }

    #[test]
    fn test_unlit_transparency() {
        let material = Material::Unlit(UnlitMaterial {
            blending: Blending::transparent(0.5),
            ..UnlitMaterial::default()
        });
        assert!(material.is_translucent());
    }

    #[test]
    fn test_picker_labels() {
        assert_eq!(MaterialKind::PhysicallyBased.to_string(), "Physically Based Material");
        assert_eq!(FaceCulling::ALL.len(), 3);
        assert_eq!(TriangleFillMode::Lines.label(), "Lines");
    }
}
