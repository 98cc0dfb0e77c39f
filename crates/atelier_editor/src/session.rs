//! Component editing sessions
//!
//! A session stages edits to one component type on one entity:
//!
//! ```text
//! Unloaded --load--> Loaded(original, draft) --commit--> Committed
//!                          |                               |
//!                          +--discard--> Discarded <-------+
//! ```
//!
//! Loading copies the entity's component, or synthesizes a default from the
//! entity's other components. Edits only touch the draft. Committing writes
//! the draft back and runs the cascade rules. A committed session stays
//! usable: further edits and commits are allowed until it is discarded.

use atelier_core::{
    default_collision, default_physics_body, Component, ComponentSet, ComponentType, EntityKey,
    InputTargetComponent, ModelComponent, SceneHost,
};
use atelier_mesh::MeshEngine;
use atelier_physics::{BodyMode, CollisionComponent, PhysicsBodyComponent, DEFAULT_DENSITY};

use crate::cascade::{CascadeRules, CommitReport};
use crate::error::EditorError;

/// Inputs used when a component has to be synthesized
#[derive(Clone, Copy)]
pub struct ComponentDefaults<'a> {
    pub engine: &'a dyn MeshEngine,
    /// Density for derived body mass (kg/m³)
    pub density: f32,
    pub body_mode: BodyMode,
}

impl<'a> ComponentDefaults<'a> {
    pub fn new(engine: &'a dyn MeshEngine) -> Self {
        Self {
            engine,
            density: DEFAULT_DENSITY,
            body_mode: BodyMode::Dynamic,
        }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_body_mode(mut self, mode: BodyMode) -> Self {
        self.body_mode = mode;
        self
    }
}

/// A component type that can be edited in a [`ComponentSession`]
pub trait EditableComponent: Clone + PartialEq + Into<Component> {
    const TYPE: ComponentType;

    /// Borrow `Self` out of a type-erased component
    fn extract(component: &Component) -> Option<&Self>;

    /// Default value for an entity that has no component of this type
    fn synthesize(entity: EntityKey, siblings: &ComponentSet, defaults: &ComponentDefaults<'_>) -> Result<Self, EditorError>;
}

/// Model a default depends on, or `MissingDependency`
fn required_model<'s>(
    entity: EntityKey,
    component: ComponentType,
    siblings: &'s ComponentSet,
) -> Result<&'s ModelComponent, EditorError> {
    siblings.model().ok_or(EditorError::MissingDependency {
        entity,
        component,
        requires: ComponentType::Model,
    })
}

impl EditableComponent for PhysicsBodyComponent {
    const TYPE: ComponentType = ComponentType::PhysicsBody;

    fn extract(component: &Component) -> Option<&Self> {
        match component {
            Component::PhysicsBody(c) => Some(c),
            _ => None,
        }
    }

    fn synthesize(entity: EntityKey, siblings: &ComponentSet, defaults: &ComponentDefaults<'_>) -> Result<Self, EditorError> {
        let model = required_model(entity, Self::TYPE, siblings)?;
        // a model with an empty mesh is as good as no model
        default_physics_body(model, defaults.density, defaults.body_mode).map_err(|_| EditorError::MissingDependency {
            entity,
            component: Self::TYPE,
            requires: ComponentType::Model,
        })
    }
}

impl EditableComponent for CollisionComponent {
    const TYPE: ComponentType = ComponentType::Collision;

    fn extract(component: &Component) -> Option<&Self> {
        match component {
            Component::Collision(c) => Some(c),
            _ => None,
        }
    }

    fn synthesize(entity: EntityKey, siblings: &ComponentSet, _defaults: &ComponentDefaults<'_>) -> Result<Self, EditorError> {
        let model = required_model(entity, Self::TYPE, siblings)?;
        default_collision(model).map_err(|_| EditorError::MissingDependency {
            entity,
            component: Self::TYPE,
            requires: ComponentType::Model,
        })
    }
}

impl EditableComponent for ModelComponent {
    const TYPE: ComponentType = ComponentType::Model;

    fn extract(component: &Component) -> Option<&Self> {
        match component {
            Component::Model(c) => Some(c),
            _ => None,
        }
    }

    fn synthesize(_entity: EntityKey, _siblings: &ComponentSet, defaults: &ComponentDefaults<'_>) -> Result<Self, EditorError> {
        Ok(ModelComponent::default_with(defaults.engine)?)
    }
}

impl EditableComponent for InputTargetComponent {
    const TYPE: ComponentType = ComponentType::InputTarget;

    fn extract(component: &Component) -> Option<&Self> {
        match component {
            Component::InputTarget(c) => Some(c),
            _ => None,
        }
    }

    fn synthesize(_entity: EntityKey, _siblings: &ComponentSet, _defaults: &ComponentDefaults<'_>) -> Result<Self, EditorError> {
        Ok(InputTargetComponent::default())
    }
}

/// Lifecycle phase of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Unloaded,
    Loaded,
    Committed,
    Discarded,
}

/// Stages edits to one component of type `C` on one entity
#[derive(Clone, Debug)]
pub struct ComponentSession<C: EditableComponent> {
    entity: EntityKey,
    phase: SessionPhase,
    /// `(original, draft)` while loaded or committed
    staged: Option<(C, C)>,
    /// The entity had this component when the session loaded
    existed: bool,
}

impl<C: EditableComponent> ComponentSession<C> {
    /// An unloaded session for `entity`
    pub fn new(entity: EntityKey) -> Self {
        Self {
            entity,
            phase: SessionPhase::Unloaded,
            staged: None,
            existed: false,
        }
    }

    /// Create and load a session in one step
    pub fn open(entity: EntityKey, host: &dyn SceneHost, defaults: &ComponentDefaults<'_>) -> Result<Self, EditorError> {
        let mut session = Self::new(entity);
        session.load(host, defaults)?;
        Ok(session)
    }

    /// Copy the entity's component into the session, or synthesize a default
    ///
    /// On error the session stays where it was.
    pub fn load(&mut self, host: &dyn SceneHost, defaults: &ComponentDefaults<'_>) -> Result<(), EditorError> {
        let components = host.components(self.entity).ok_or(EditorError::UnknownEntity(self.entity))?;
        let (component, existed) = match components.get(C::TYPE).and_then(C::extract) {
            Some(existing) => (existing.clone(), true),
            None => (C::synthesize(self.entity, components, defaults)?, false),
        };
        log::debug!(
            "loaded {} session for {:?} ({})",
            C::TYPE,
            self.entity,
            if existed { "existing" } else { "synthesized" }
        );
        self.staged = Some((component.clone(), component));
        self.existed = existed;
        self.phase = SessionPhase::Loaded;
        Ok(())
    }

    pub fn entity(&self) -> EntityKey {
        self.entity
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn is_open(&self) -> bool {
        matches!(self.phase, SessionPhase::Loaded | SessionPhase::Committed)
    }

    /// The in-progress copy
    pub fn draft(&self) -> Option<&C> {
        self.staged.as_ref().map(|(_, draft)| draft)
    }

    /// The value as loaded, or as last committed
    pub fn original(&self) -> Option<&C> {
        self.staged.as_ref().map(|(original, _)| original)
    }

    /// True if the draft differs from the original
    pub fn has_changes(&self) -> bool {
        self.staged.as_ref().is_some_and(|(original, draft)| original != draft)
    }

    /// True if the entity already had the component when loaded
    pub fn component_existed(&self) -> bool {
        self.existed
    }

    /// Apply a change to the draft
    pub fn edit(&mut self, mutate: impl FnOnce(&mut C)) -> Result<(), EditorError> {
        if !self.is_open() {
            return Err(EditorError::SessionClosed);
        }
        let (_, draft) = self.staged.as_mut().ok_or(EditorError::SessionClosed)?;
        mutate(draft);
        self.phase = SessionPhase::Loaded;
        Ok(())
    }

    /// Write the draft to the entity, then run the cascade rules
    ///
    /// Cascade failures land in the report; they do not fail the commit.
    pub fn commit(&mut self, host: &mut dyn SceneHost, cascades: &CascadeRules) -> Result<CommitReport, EditorError> {
        if !self.is_open() {
            return Err(EditorError::SessionClosed);
        }
        let draft = self.draft().cloned().ok_or(EditorError::SessionClosed)?;
        let previous = host.component(self.entity, C::TYPE);
        let committed: Component = draft.clone().into();
        host.set_component(self.entity, committed.clone())?;
        log::debug!("committed {} on {:?}", C::TYPE, self.entity);

        let report = cascades.apply(host, self.entity, &committed, previous.as_ref());
        self.staged = Some((draft.clone(), draft));
        self.existed = true;
        self.phase = SessionPhase::Committed;
        Ok(report)
    }

    /// End the session without writing anything
    pub fn discard(&mut self) {
        if self.phase != SessionPhase::Discarded {
            log::debug!("discarded {} session for {:?}", C::TYPE, self.entity);
        }
        self.staged = None;
        self.phase = SessionPhase::Discarded;
    }

    /// Remove the component from the entity directly, ending the session
    ///
    /// Returns whether a component was removed. Removing twice is fine.
    pub fn remove_component(&mut self, host: &mut dyn SceneHost) -> Result<bool, EditorError> {
        let existed = host.component(self.entity, C::TYPE).is_some();
        host.remove_component(self.entity, C::TYPE)?;
        if existed {
            log::debug!("removed {} from {:?}", C::TYPE, self.entity);
        }
        self.staged = None;
        self.phase = SessionPhase::Discarded;
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{EntityTemplate, World};
    use atelier_mesh::PrimitiveMeshEngine;

    fn world_with_entity(engine: &PrimitiveMeshEngine) -> (World, EntityKey) {
        let mut world = World::new();
        let key = world
            .spawn_default_entity("a", &EntityTemplate::default(), engine)
            .unwrap();
        (world, key)
    }

    #[test]
    fn test_load_existing_component() {
        let engine = PrimitiveMeshEngine::new();
        let (world, key) = world_with_entity(&engine);
        let session = ComponentSession::<PhysicsBodyComponent>::open(key, &world, &ComponentDefaults::new(&engine)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert!(session.component_existed());
        assert_eq!(session.draft(), world.get_entity(key).unwrap().components().physics_body());
        assert!(!session.has_changes());
    }

    #[test]
    fn test_edit_does_not_touch_entity() {
        let engine = PrimitiveMeshEngine::new();
        let (world, key) = world_with_entity(&engine);
        let mut session = ComponentSession::<PhysicsBodyComponent>::open(key, &world, &ComponentDefaults::new(&engine)).unwrap();
        session.edit(|body| body.mass = 50.0).unwrap();
        session.edit(|body| body.mass = 51.0).unwrap();
        assert!(session.has_changes());
        assert_eq!(session.draft().unwrap().mass, 51.0);
        assert_ne!(world.get_entity(key).unwrap().components().physics_body().unwrap().mass, 51.0);
    }

    #[test]
    fn test_commit_writes_draft() {
        let engine = PrimitiveMeshEngine::new();
        let (mut world, key) = world_with_entity(&engine);
        let mut session = ComponentSession::<PhysicsBodyComponent>::open(key, &world, &ComponentDefaults::new(&engine)).unwrap();
        session.edit(|body| body.mass = 50.0).unwrap();
        let report = session.commit(&mut world, &CascadeRules::default()).unwrap();
        assert!(report.cascades_applied.is_empty());
        assert_eq!(session.phase(), SessionPhase::Committed);
        assert!(!session.has_changes());
        assert_eq!(world.get_entity(key).unwrap().components().physics_body().unwrap().mass, 50.0);
    }

    #[test]
    fn test_discard_writes_nothing() {
        let engine = PrimitiveMeshEngine::new();
        let (mut world, key) = world_with_entity(&engine);
        let version = world.version();
        let mut session = ComponentSession::<PhysicsBodyComponent>::open(key, &world, &ComponentDefaults::new(&engine)).unwrap();
        session.edit(|body| body.mass = 50.0).unwrap();
        session.discard();
        assert_eq!(world.version(), version);
        assert_eq!(session.edit(|_| {}), Err(EditorError::SessionClosed));
        assert_eq!(
            session.commit(&mut world, &CascadeRules::default()).unwrap_err(),
            EditorError::SessionClosed
        );
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_unloaded_session_is_closed() {
        let engine = PrimitiveMeshEngine::new();
        let (_world, key) = world_with_entity(&engine);
        let mut session = ComponentSession::<CollisionComponent>::new(key);
        assert_eq!(session.phase(), SessionPhase::Unloaded);
        assert_eq!(session.edit(|_| {}), Err(EditorError::SessionClosed));
    }

    #[test]
    fn test_synthesize_model_needs_nothing() {
        let engine = PrimitiveMeshEngine::new();
        let (mut world, key) = world_with_entity(&engine);
        world.take_component(key, ComponentType::Model).unwrap();
        let session = ComponentSession::<ModelComponent>::open(key, &world, &ComponentDefaults::new(&engine)).unwrap();
        assert!(!session.component_existed());
        assert_eq!(session.draft().unwrap().materials.len(), 1);
    }

    #[test]
    fn test_load_unknown_entity() {
        let engine = PrimitiveMeshEngine::new();
        let (mut world, key) = world_with_entity(&engine);
        world.remove_entity(key);
        let err = ComponentSession::<InputTargetComponent>::open(key, &world, &ComponentDefaults::new(&engine)).unwrap_err();
        assert_eq!(err, EditorError::UnknownEntity(key));
    }

    #[test]
    fn test_synthesized_body_uses_defaults() {
        let engine = PrimitiveMeshEngine::new();
        let (mut world, key) = world_with_entity(&engine);
        world.take_component(key, ComponentType::PhysicsBody).unwrap();
        let defaults = ComponentDefaults::new(&engine)
            .with_density(1000.0)
            .with_body_mode(BodyMode::Kinematic);
        let session = ComponentSession::<PhysicsBodyComponent>::open(key, &world, &defaults).unwrap();
        let body = session.draft().unwrap();
        assert_eq!(body.mode, BodyMode::Kinematic);
        assert!((body.mass - 1.0).abs() < 1e-3, "mass was {}", body.mass);
    }

    #[test]
    fn test_remove_component_twice() {
        let engine = PrimitiveMeshEngine::new();
        let (mut world, key) = world_with_entity(&engine);
        let mut session = ComponentSession::<CollisionComponent>::new(key);
        assert!(session.remove_component(&mut world).unwrap());
        assert!(!session.remove_component(&mut world).unwrap());
        assert_eq!(session.phase(), SessionPhase::Discarded);
    }
}
