//! World container for entities
//!
//! The World owns every entity in the scene: the user's entities, in the
//! order they were added, and the six bounding box walls. Walls are never
//! reported as live entities.
//!
//! Every structural change bumps [`World::version`] and queues a
//! [`SceneEvent`]. Observers either compare versions or drain the events.

use atelier_math::{BoundingBox, Vec3};
use atelier_mesh::MeshEngine;
use slotmap::{new_key_type, SlotMap};

use crate::bundle::EntityTemplate;
use crate::component::{Component, ComponentType};
use crate::entity::Entity;
use crate::error::SceneError;
use crate::walls::Face;

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Uses generational indexing: once an entity is removed its key never
    /// resolves again, even if the slot is reused.
    pub struct EntityKey;
}

/// A structural change to the scene
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    EntityAdded(EntityKey),
    EntityRemoved(EntityKey),
    ComponentChanged { entity: EntityKey, component_type: ComponentType },
    ComponentRemoved { entity: EntityKey, component_type: ComponentType },
    /// The walls were rebuilt for new bounds
    BoundsChanged(BoundingBox),
}

/// The scene containing all entities
pub struct World {
    /// All entities, user and wall (using generational keys)
    entities: SlotMap<EntityKey, Entity>,
    /// User entities in insertion order
    order: Vec<EntityKey>,
    /// Wall entities, one per face
    walls: Vec<(Face, EntityKey)>,
    bounds: Option<BoundingBox>,
    version: u64,
    events: Vec<SceneEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
            walls: Vec::new(),
            bounds: None,
            version: 0,
            events: Vec::new(),
        }
    }

    fn record(&mut self, event: SceneEvent) {
        self.version += 1;
        self.events.push(event);
    }

    /// Monotonic counter bumped by every structural change
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Events recorded since the last drain, oldest first
    pub fn pending_events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Take the queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    // --- User entities ---

    /// Add a user entity, returning its key
    ///
    /// Wall entities cannot be added this way; see [`set_bounding_box`](Self::set_bounding_box).
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        debug_assert!(!entity.is_wall(), "walls are created by set_bounding_box");
        let name = entity.name.clone();
        let key = self.entities.insert(entity);
        self.order.push(key);
        self.record(SceneEvent::EntityAdded(key));
        log::info!("added entity '{}' ({:?})", name, key);
        key
    }

    /// Create an entity with the default component bundle
    pub fn spawn_default_entity<E: MeshEngine + ?Sized>(
        &mut self,
        name: impl Into<String>,
        template: &EntityTemplate,
        engine: &E,
    ) -> Result<EntityKey, SceneError> {
        let components = template.build_components(engine)?;
        let entity = Entity::new(name)
            .with_position(template.position)
            .with_components(components);
        Ok(self.add_entity(entity))
    }

    /// Remove a user entity
    ///
    /// Returns `None` for unknown keys and for walls.
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        if self.entities.get(key)?.is_wall() {
            log::warn!("refusing to remove wall entity {:?}", key);
            return None;
        }
        let entity = self.entities.remove(key)?;
        self.order.retain(|k| *k != key);
        self.record(SceneEvent::EntityRemoved(key));
        log::info!("removed entity '{}' ({:?})", entity.name, key);
        Some(entity)
    }

    /// Get a reference to an entity (user or wall) by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// True if `key` is a live user entity
    pub fn is_live(&self, key: EntityKey) -> bool {
        self.entities.get(key).is_some_and(|e| !e.is_wall())
    }

    /// User entity keys in insertion order
    pub fn live_entities(&self) -> &[EntityKey] {
        &self.order
    }

    /// Iterate over user entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.order.iter().filter_map(|k| self.entities.get(*k).map(|e| (*k, e)))
    }

    /// Number of user entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    /// True if there are no user entities
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Find the first user entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<EntityKey> {
        self.iter().find(|(_, e)| e.name == name).map(|(k, _)| k)
    }

    fn user_entity_mut(&mut self, key: EntityKey) -> Result<&mut Entity, SceneError> {
        match self.entities.get_mut(key) {
            Some(e) if e.is_wall() => Err(SceneError::WallEntity(key)),
            Some(e) => Ok(e),
            None => Err(SceneError::UnknownEntity(key)),
        }
    }

    /// Move a user entity
    pub fn set_position(&mut self, key: EntityKey, position: Vec3) -> Result<(), SceneError> {
        self.user_entity_mut(key)?.set_position(position);
        Ok(())
    }

    /// Rename a user entity
    pub fn rename(&mut self, key: EntityKey, name: impl Into<String>) -> Result<(), SceneError> {
        self.user_entity_mut(key)?.name = name.into();
        Ok(())
    }

    /// Insert or replace a component on a user entity
    pub fn insert_component(&mut self, key: EntityKey, component: Component) -> Result<(), SceneError> {
        let component_type = component.component_type();
        self.user_entity_mut(key)?.set_component(component);
        self.record(SceneEvent::ComponentChanged { entity: key, component_type });
        log::debug!("set {} on {:?}", component_type, key);
        Ok(())
    }

    /// Remove a component type from a user entity
    ///
    /// Removing an absent component is not an error and records nothing.
    pub fn take_component(
        &mut self,
        key: EntityKey,
        component_type: ComponentType,
    ) -> Result<Option<Component>, SceneError> {
        let removed = self.user_entity_mut(key)?.remove_component(component_type);
        if removed.is_some() {
            self.record(SceneEvent::ComponentRemoved { entity: key, component_type });
            log::debug!("removed {} from {:?}", component_type, key);
        }
        Ok(removed)
    }

    /// Clear dirty flags on every entity
    pub fn clear_all_dirty(&mut self) {
        for (_, entity) in &mut self.entities {
            entity.clear_dirty();
        }
    }

    /// Keys of entities with any dirty flag set
    pub fn dirty_entities(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.entities.iter().filter(|(_, e)| e.is_dirty()).map(|(k, _)| k)
    }

    // --- Walls ---

    /// Current bounding box, if walls have been built
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Rebuild the six walls around `bounds`
    ///
    /// The old walls are only replaced once every new wall has been built.
    pub fn set_bounding_box<E: MeshEngine + ?Sized>(
        &mut self,
        bounds: BoundingBox,
        engine: &E,
    ) -> Result<(), SceneError> {
        let mut built = Vec::with_capacity(Face::ALL.len());
        for face in Face::ALL {
            let (position, size) = face.placement(&bounds);
            let components = face.wall_components(size, engine)?;
            built.push((face, Entity::wall(face, position, components)));
        }

        for (_, key) in self.walls.drain(..) {
            self.entities.remove(key);
        }
        for (face, entity) in built {
            let key = self.entities.insert(entity);
            self.walls.push((face, key));
        }
        self.bounds = Some(bounds);
        self.record(SceneEvent::BoundsChanged(bounds));
        log::debug!("rebuilt walls for bounds {:?}", bounds);
        Ok(())
    }

    /// Wall keys in [`Face::ALL`] order
    pub fn walls(&self) -> impl Iterator<Item = (Face, EntityKey)> + '_ {
        self.walls.iter().copied()
    }

    /// Key of the wall on a face
    pub fn wall(&self, face: Face) -> Option<EntityKey> {
        self.walls.iter().find(|(f, _)| *f == face).map(|(_, k)| *k)
    }
}
