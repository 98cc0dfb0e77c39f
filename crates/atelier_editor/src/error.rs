//! Editor error types

use std::fmt;

use atelier_core::{ComponentType, EntityKey, SceneError};
use atelier_mesh::EngineError;
use atelier_physics::ShapeError;

/// Error surfaced to the user by an editing operation
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// A default component needs sibling data the entity does not have
    MissingDependency {
        entity: EntityKey,
        component: ComponentType,
        requires: ComponentType,
    },
    /// The mesh engine refused the parameters; the draft is kept
    EngineRejected(EngineError),
    /// The entity is not (or no longer) in the scene
    UnknownEntity(EntityKey),
    /// The session was discarded or never loaded
    SessionClosed,
    /// Any other scene failure
    Scene(SceneError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::MissingDependency { entity, component, requires } => write!(
                f,
                "Cannot create a {} component for {:?}: it needs a {} component",
                component, entity, requires
            ),
            EditorError::EngineRejected(e) => write!(f, "Mesh rejected: {}", e),
            EditorError::UnknownEntity(key) => write!(f, "Entity {:?} no longer exists", key),
            EditorError::SessionClosed => write!(f, "Editing session is closed"),
            EditorError::Scene(e) => write!(f, "Scene error: {}", e),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::EngineRejected(e) => Some(e),
            EditorError::Scene(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for EditorError {
    fn from(e: EngineError) -> Self {
        EditorError::EngineRejected(e)
    }
}

impl From<SceneError> for EditorError {
    fn from(e: SceneError) -> Self {
        match e {
            SceneError::UnknownEntity(key) => EditorError::UnknownEntity(key),
            SceneError::Engine(e) => EditorError::EngineRejected(e),
            other => EditorError::Scene(other),
        }
    }
}

/// A cascade rule that could not be applied after a commit
///
/// Cascade failures are logged and reported; they never undo the commit.
#[derive(Debug, Clone, PartialEq)]
pub enum CascadeError {
    /// The new shape could not be derived
    Shape { rule: &'static str, source: ShapeError },
    /// Writing the target component failed
    Scene { rule: &'static str, source: SceneError },
}

impl CascadeError {
    /// Name of the rule that failed
    pub fn rule(&self) -> &'static str {
        match self {
            CascadeError::Shape { rule, .. } | CascadeError::Scene { rule, .. } => rule,
        }
    }
}

impl fmt::Display for CascadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CascadeError::Shape { rule, source } => write!(f, "Cascade '{}' failed: {}", rule, source),
            CascadeError::Scene { rule, source } => write!(f, "Cascade '{}' failed: {}", rule, source),
        }
    }
}

impl std::error::Error for CascadeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CascadeError::Shape { source, .. } => Some(source),
            CascadeError::Scene { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_error_conversion() {
        let engine = EngineError::EmptyText;
        assert_eq!(
            EditorError::from(SceneError::Engine(engine.clone())),
            EditorError::EngineRejected(engine)
        );
    }

    #[test]
    fn test_cascade_error_names_rule() {
        let err = CascadeError::Shape {
            rule: "model_regenerates_collision",
            source: ShapeError::EmptyMesh("empty".into()),
        };
        assert_eq!(err.rule(), "model_regenerates_collision");
        assert!(err.to_string().contains("empty"));
    }
}
