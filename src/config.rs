//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ATL_SECTION__KEY`)

use atelier_core::{BoundingBox, EntityTemplate, Vec3};
use atelier_editor::CascadeConfig;
use atelier_mesh::{BoxDescriptor, MeshDescriptor};
use atelier_physics::{BodyMode, DEFAULT_DENSITY};
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bounding box around the scene
    #[serde(default)]
    pub scene: SceneConfig,
    /// Defaults for newly added entities
    #[serde(default)]
    pub entity: EntityConfig,
    /// Physics body defaults
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Which cascade rules run after a commit
    #[serde(default)]
    pub cascade: CascadeConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ATL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ATL_ENTITY__NAME_PREFIX=Thing -> entity.name_prefix = "Thing"
        figment = figment.merge(Env::prefixed("ATL_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no scene can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.scene.bounds_size;
        if !(size.x > 0.0 && size.y > 0.0 && size.z > 0.0) {
            return Err(ConfigError::invalid(format!(
                "scene.bounds_size must be positive, got {:?}",
                size
            )));
        }
        let box_size = self.entity.default_box_size;
        if !(box_size.x > 0.0 && box_size.y > 0.0 && box_size.z > 0.0) {
            return Err(ConfigError::invalid(format!(
                "entity.default_box_size must be positive, got {:?}",
                box_size
            )));
        }
        if !(self.physics.density > 0.0) {
            return Err(ConfigError::invalid("density must be positive"));
        }
        Ok(())
    }
}

/// Scene bounds configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Center of the bounding box
    pub bounds_center: Vec3,
    /// Full size of the bounding box in meters
    pub bounds_size: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bounds_center: Vec3::ZERO,
            bounds_size: Vec3::splat(2.0),
        }
    }
}

impl SceneConfig {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center_size(self.bounds_center, self.bounds_size)
    }
}

/// New entity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Names are this prefix followed by a running number
    pub name_prefix: String,
    /// Size of the box mesh a new entity starts with
    pub default_box_size: Vec3,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            name_prefix: "Entity".to_string(),
            default_box_size: Vec3::splat(0.1),
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Density used to derive mass from a mesh (kg/m³)
    pub density: f32,
    /// Mode of the physics body a new entity starts with
    pub default_mode: BodyMode,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            default_mode: BodyMode::Dynamic,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Template for the "add entity" action
    pub fn entity_template(&self) -> EntityTemplate {
        let mesh = MeshDescriptor::Box(BoxDescriptor {
            size: self.entity.default_box_size,
            ..BoxDescriptor::default()
        });
        EntityTemplate {
            mesh,
            density: self.physics.density,
            body_mode: self.physics.default_mode,
            ..EntityTemplate::default()
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.entity.name_prefix, "Entity");
        assert_eq!(config.physics.density, DEFAULT_DENSITY);
        assert!(config.cascade.model_regenerates_collision);
        assert!(!config.cascade.model_regenerates_physics_body);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("name_prefix"));
        assert!(toml.contains("model_regenerates_collision"));
        assert!(toml.contains("default_mode = \"dynamic\""));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [cascade]
            model_regenerates_physics_body = true
            "#,
        )
        .unwrap();
        assert!(config.cascade.model_regenerates_physics_body);
        assert!(config.cascade.skip_static_collision);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_rejects_degenerate_bounds() {
        let mut config = AppConfig::default();
        config.scene.bounds_size = Vec3::new(2.0, 0.0, 2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_entity_template_uses_config() {
        let mut config = AppConfig::default();
        config.entity.default_box_size = Vec3::splat(0.25);
        config.physics.default_mode = BodyMode::Kinematic;
        let template = config.entity_template();
        match &template.mesh {
            MeshDescriptor::Box(b) => assert_eq!(b.size, Vec3::splat(0.25)),
            other => panic!("Expected box mesh, got {:?}", other),
        }
        assert_eq!(template.body_mode, BodyMode::Kinematic);
    }

    #[test]
    fn test_scene_bounding_box() {
        let scene = SceneConfig::default();
        let bounds = scene.bounding_box();
        assert_eq!(bounds.min, Vec3::splat(-1.0));
        assert_eq!(bounds.max, Vec3::splat(1.0));
    }
}
