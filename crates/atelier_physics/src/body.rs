//! Physics body component

use serde::{Serialize, Deserialize};

use crate::material::PhysicsMaterial;
use crate::shapes::ShapeResource;

/// Density used when a body's mass is derived from its shapes (kg/m³)
pub const DEFAULT_DENSITY: f32 = 10_000.0;

/// Lower bound on derived mass, so flat shapes still get a usable body
pub const MIN_MASS: f32 = 0.001;

/// How the physics engine treats a body
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMode {
    /// Never moves
    Static,
    /// Moved by the app, pushes dynamic bodies
    Kinematic,
    /// Moved by the simulation
    #[default]
    Dynamic,
}

impl BodyMode {
    /// All modes in picker order
    pub const ALL: [BodyMode; 3] = [BodyMode::Static, BodyMode::Kinematic, BodyMode::Dynamic];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            BodyMode::Static => "Static",
            BodyMode::Kinematic => "Kinematic",
            BodyMode::Dynamic => "Dynamic",
        }
    }
}

/// Per-axis lock flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisLocks {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisLocks {
    pub const NONE: Self = Self { x: false, y: false, z: false };
    pub const ALL: Self = Self { x: true, y: true, z: true };
}

/// Physics body parameters attached to an entity
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsBodyComponent {
    /// Shapes used for mass properties
    pub shapes: Vec<ShapeResource>,
    /// Mass in kilograms
    pub mass: f32,
    pub material: PhysicsMaterial,
    pub mode: BodyMode,
    pub is_affected_by_gravity: bool,
    pub is_continuous_collision_detection_enabled: bool,
    pub is_rotation_locked: AxisLocks,
    pub is_translation_locked: AxisLocks,
}

impl Default for PhysicsBodyComponent {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            mass: 1.0,
            material: PhysicsMaterial::default(),
            mode: BodyMode::Dynamic,
            is_affected_by_gravity: true,
            is_continuous_collision_detection_enabled: false,
            is_rotation_locked: AxisLocks::NONE,
            is_translation_locked: AxisLocks::NONE,
        }
    }
}

impl PhysicsBodyComponent {
    /// Create a body whose mass is derived from its shapes at the given density
    pub fn from_shapes(shapes: Vec<ShapeResource>, density: f32) -> Self {
        let mass = Self::mass_for(&shapes, density);
        Self {
            shapes,
            mass,
            ..Self::default()
        }
    }

    /// Mass of a shape set at the given density, never below [`MIN_MASS`]
    pub fn mass_for(shapes: &[ShapeResource], density: f32) -> f32 {
        let volume: f32 = shapes.iter().map(ShapeResource::volume).sum();
        (volume * density).max(MIN_MASS)
    }

    /// Set the body mode
    ///
    /// Static bodies are never affected by gravity.
    pub fn with_mode(mut self, mode: BodyMode) -> Self {
        self.mode = mode;
        if mode == BodyMode::Static {
            self.is_affected_by_gravity = false;
        }
        self
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set whether this body is affected by gravity
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.is_affected_by_gravity = affected;
        self
    }

    /// Set the physics material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Replace the shapes, keeping the current mass
    pub fn set_shapes(&mut self, shapes: Vec<ShapeResource>) {
        self.shapes = shapes;
    }
}
