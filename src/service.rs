//! Authoring service
//!
//! The [`AuthoringService`] bundles what a UI host needs to drive an editing
//! surface: the scene, the mesh engine, the open screens, the named collision
//! groups and the cascade rules built from configuration.
//!
//! # Example
//! ```ignore
//! let mut service = AuthoringService::new(AppConfig::default())?;
//! let key = service.add_entity()?;
//! service.navigation_mut().push(NavigationEntry::EntitySettings(key));
//!
//! let mut session = service.open_session::<PhysicsBodyComponent>(key)?;
//! session.edit(|body| body.mass = 50.0)?;
//! service.commit(&mut session)?;
//! ```

use atelier_core::{BoundingBox, Entity, EntityKey, SceneError, World};
use atelier_editor::{
    CascadeRules, CommitReport, ComponentDefaults, ComponentSession, EditableComponent, EditorError,
    NavigationEntry, NavigationStack,
};
use atelier_mesh::{MeshEngine, PrimitiveMeshEngine};
use atelier_physics::CollisionGroupRegistry;

use crate::config::AppConfig;

/// Scene plus editor state for one authoring surface
pub struct AuthoringService {
    config: AppConfig,
    engine: Box<dyn MeshEngine>,
    world: World,
    navigation: NavigationStack,
    groups: CollisionGroupRegistry,
    cascades: CascadeRules,
    /// Number given to the next added entity
    next_entity_number: u32,
}

impl AuthoringService {
    /// Create a service backed by the built-in primitive engine
    pub fn new(config: AppConfig) -> Result<Self, SceneError> {
        Self::with_engine(config, Box::new(PrimitiveMeshEngine::new()))
    }

    /// Create a service backed by `engine`, with walls around the configured bounds
    pub fn with_engine(config: AppConfig, engine: Box<dyn MeshEngine>) -> Result<Self, SceneError> {
        let mut world = World::new();
        world.set_bounding_box(config.scene.bounding_box(), engine.as_ref())?;
        world.drain_events();
        let cascades = CascadeRules::from_config(&config.cascade, config.physics.density);
        log::info!(
            "authoring service ready ({} cascade rules)",
            cascades.rules().len()
        );
        Ok(Self {
            config,
            engine,
            world,
            navigation: NavigationStack::new(),
            groups: CollisionGroupRegistry::new(),
            cascades,
            next_entity_number: 1,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn MeshEngine {
        self.engine.as_ref()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationStack {
        &mut self.navigation
    }

    pub fn groups(&self) -> &CollisionGroupRegistry {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut CollisionGroupRegistry {
        &mut self.groups
    }

    pub fn cascades(&self) -> &CascadeRules {
        &self.cascades
    }

    // --- Entities ---

    /// Add an entity with the default component bundle
    ///
    /// Names are the configured prefix and a running number ("Entity 1").
    pub fn add_entity(&mut self) -> Result<EntityKey, SceneError> {
        let name = format!("{} {}", self.config.entity.name_prefix, self.next_entity_number);
        let template = self.config.entity_template();
        let key = self
            .world
            .spawn_default_entity(name, &template, self.engine.as_ref())?;
        self.next_entity_number += 1;
        self.sync_navigation();
        Ok(key)
    }

    /// Remove a user entity and close every screen that edits it
    pub fn remove_entity(&mut self, key: EntityKey) -> Result<Entity, EditorError> {
        let is_wall = self
            .world
            .get_entity(key)
            .ok_or(EditorError::UnknownEntity(key))?
            .is_wall();
        if is_wall {
            return Err(SceneError::WallEntity(key).into());
        }
        let entity = self
            .world
            .remove_entity(key)
            .ok_or(EditorError::UnknownEntity(key))?;
        self.sync_navigation();
        Ok(entity)
    }

    /// Rebuild the walls around `bounds`
    pub fn set_bounding_box(&mut self, bounds: BoundingBox) -> Result<(), SceneError> {
        self.world.set_bounding_box(bounds, self.engine.as_ref())?;
        self.sync_navigation();
        Ok(())
    }

    // --- Sessions ---

    /// Defaults used when a session synthesizes a component
    pub fn defaults(&self) -> ComponentDefaults<'_> {
        ComponentDefaults::new(self.engine.as_ref())
            .with_density(self.config.physics.density)
            .with_body_mode(self.config.physics.default_mode)
    }

    /// Open an editing session on one component of `key`
    pub fn open_session<C: EditableComponent>(&self, key: EntityKey) -> Result<ComponentSession<C>, EditorError> {
        ComponentSession::open(key, &self.world, &self.defaults())
    }

    /// Commit `session` to the scene and run the configured cascades
    pub fn commit<C: EditableComponent>(
        &mut self,
        session: &mut ComponentSession<C>,
    ) -> Result<CommitReport, EditorError> {
        let report = session.commit(&mut self.world, &self.cascades)?;
        self.sync_navigation();
        Ok(report)
    }

    /// Remove the session's component from its entity
    pub fn remove_component<C: EditableComponent>(
        &mut self,
        session: &mut ComponentSession<C>,
    ) -> Result<bool, EditorError> {
        let removed = session.remove_component(&mut self.world)?;
        self.sync_navigation();
        Ok(removed)
    }

    // --- Navigation ---

    /// Drain the scene's pending events and prune screens whose entity is
    /// gone; returns the pruned entries
    ///
    /// Every mutating call on the service ends here.
    pub fn sync_navigation(&mut self) -> Vec<NavigationEntry> {
        for event in self.world.drain_events() {
            log::trace!("scene event {:?}", event);
        }
        let pruned = self.navigation.sync(&self.world);
        for entry in &pruned {
            log::debug!("closed '{}' screen", entry.title());
        }
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{default_physics_body, ComponentType, Face, ModelComponent, SceneHost, Vec3};
    use atelier_mesh::MeshKind;
    use atelier_physics::{BodyMode, PhysicsBodyComponent};

    #[test]
    fn test_new_service_has_walls_and_no_entities() {
        let service = AuthoringService::new(AppConfig::default()).unwrap();
        assert_eq!(service.world().walls().count(), Face::ALL.len());
        assert!(service.world().live_entities().is_empty());
        assert!(service.navigation().is_empty());
    }

    #[test]
    fn test_add_entity_names_count_up() {
        let mut service = AuthoringService::new(AppConfig::default()).unwrap();
        let a = service.add_entity().unwrap();
        let b = service.add_entity().unwrap();
        assert_eq!(service.world().get_entity(a).unwrap().name, "Entity 1");
        assert_eq!(service.world().get_entity(b).unwrap().name, "Entity 2");
    }

    #[test]
    fn test_add_entity_uses_configured_mode() {
        let mut config = AppConfig::default();
        config.entity.name_prefix = "Prop".to_string();
        config.physics.default_mode = BodyMode::Static;
        let mut service = AuthoringService::new(config).unwrap();
        let key = service.add_entity().unwrap();

        let entity = service.world().get_entity(key).unwrap();
        assert_eq!(entity.name, "Prop 1");
        assert_eq!(entity.components().physics_body().map(|b| b.mode), Some(BodyMode::Static));
    }

    #[test]
    fn test_remove_wall_refused() {
        let mut service = AuthoringService::new(AppConfig::default()).unwrap();
        let wall = service.world().wall(Face::Lower).unwrap();
        let err = service.remove_entity(wall).unwrap_err();
        assert_eq!(err, EditorError::Scene(SceneError::WallEntity(wall)));
        assert!(service.world().get_entity(wall).is_some());
    }

    #[test]
    fn test_remove_entity_prunes_navigation() {
        let mut service = AuthoringService::new(AppConfig::default()).unwrap();
        let a = service.add_entity().unwrap();
        let b = service.add_entity().unwrap();
        service.navigation_mut().push(NavigationEntry::EntitySettings(a));
        service.navigation_mut().push(NavigationEntry::Model(b));
        service.navigation_mut().push(NavigationEntry::Collision(a));

        service.remove_entity(a).unwrap();
        assert_eq!(service.navigation().entries(), &[NavigationEntry::Model(b)]);
        assert_eq!(service.remove_entity(a).unwrap_err(), EditorError::UnknownEntity(a));
    }

    #[test]
    fn test_commit_through_service() {
        let mut service = AuthoringService::new(AppConfig::default()).unwrap();
        let key = service.add_entity().unwrap();
        let mut session = service.open_session::<PhysicsBodyComponent>(key).unwrap();
        session.edit(|body| body.mass = 50.0).unwrap();
        service.commit(&mut session).unwrap();
        assert_eq!(
            service.world().components(key).and_then(|c| c.physics_body()).map(|b| b.mass),
            Some(50.0)
        );

        assert!(service.remove_component(&mut session).unwrap());
        assert!(!service.world().components(key).unwrap().contains(ComponentType::PhysicsBody));
    }

    #[test]
    fn test_scene_events_do_not_accumulate() {
        let mut service = AuthoringService::new(AppConfig::default()).unwrap();
        for _ in 0..500 {
            let key = service.add_entity().unwrap();
            service.remove_entity(key).unwrap();
        }
        assert!(service.world().pending_events().is_empty());
        assert!(service.world().live_entities().is_empty());

        let key = service.add_entity().unwrap();
        let mut session = service.open_session::<PhysicsBodyComponent>(key).unwrap();
        session.edit(|body| body.mass = 2.0).unwrap();
        service.commit(&mut session).unwrap();
        service.set_bounding_box(BoundingBox::from_center_size(Vec3::ZERO, Vec3::ONE)).unwrap();
        assert!(service.world().pending_events().is_empty());
    }

    #[test]
    fn test_mesh_swap_rederives_mass_with_configured_density() {
        let mut config = AppConfig::default();
        config.physics.density = 500.0;
        config.cascade.model_regenerates_physics_body = true;
        let mut service = AuthoringService::new(config).unwrap();
        let key = service.add_entity().unwrap();

        let mut session = service.open_session::<ModelComponent>(key).unwrap();
        let sphere = MeshKind::Sphere.default_descriptor();
        let mesh = sphere.to_mesh(service.engine()).unwrap();
        session.edit(|model| model.set_mesh(mesh, Some(sphere))).unwrap();
        service.commit(&mut session).unwrap();

        let components = service.world().components(key).unwrap();
        let expected = default_physics_body(components.model().unwrap(), 500.0, BodyMode::Dynamic).unwrap();
        assert_eq!(components.physics_body().map(|b| b.mass), Some(expected.mass));
    }

    #[test]
    fn test_set_bounding_box_moves_walls() {
        let mut service = AuthoringService::new(AppConfig::default()).unwrap();
        let bounds = BoundingBox::from_center_size(Vec3::ZERO, Vec3::splat(4.0));
        service.set_bounding_box(bounds).unwrap();
        assert_eq!(service.world().bounding_box(), Some(bounds));
        let lower = service.world().wall(Face::Lower).unwrap();
        assert_eq!(service.world().get_entity(lower).unwrap().position().y, -2.0);
    }
}
