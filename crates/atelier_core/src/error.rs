//! Scene error types

use std::fmt;

use atelier_mesh::EngineError;
use atelier_physics::ShapeError;

use crate::world::EntityKey;

/// Error modifying the scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The mesh engine refused to generate a mesh
    Engine(EngineError),
    /// A collision shape could not be built
    Shape(ShapeError),
    /// The key does not refer to a live entity
    UnknownEntity(EntityKey),
    /// Walls are owned by the scene and cannot be edited directly
    WallEntity(EntityKey),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Engine(e) => write!(f, "Mesh engine error: {}", e),
            SceneError::Shape(e) => write!(f, "Shape error: {}", e),
            SceneError::UnknownEntity(key) => write!(f, "Entity {:?} does not exist", key),
            SceneError::WallEntity(key) => write!(f, "Entity {:?} is a scene wall", key),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Engine(e) => Some(e),
            SceneError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for SceneError {
    fn from(e: EngineError) -> Self {
        SceneError::Engine(e)
    }
}

impl From<ShapeError> for SceneError {
    fn from(e: ShapeError) -> Self {
        SceneError::Shape(e)
    }
}
