//! The scene host contract
//!
//! Editors never hold on to entities. They read components out of a
//! [`SceneHost`], edit copies, and write them back through it.

use crate::component::{Component, ComponentSet, ComponentType};
use crate::error::SceneError;
use crate::world::{EntityKey, World};

/// Read and write access to the live entities of a scene
pub trait SceneHost {
    /// User entity keys in display order
    fn live_entities(&self) -> Vec<EntityKey>;

    /// True if `entity` is a live user entity
    fn contains(&self, entity: EntityKey) -> bool;

    /// All components of a live entity
    fn components(&self, entity: EntityKey) -> Option<&ComponentSet>;

    /// A copy of one component
    fn component(&self, entity: EntityKey, component_type: ComponentType) -> Option<Component> {
        self.components(entity)?.get(component_type).cloned()
    }

    /// Insert or replace a component
    fn set_component(&mut self, entity: EntityKey, component: Component) -> Result<(), SceneError>;

    /// Remove a component type; removing an absent component succeeds
    fn remove_component(&mut self, entity: EntityKey, component_type: ComponentType) -> Result<(), SceneError>;

    /// Counter that changes whenever the live entity set or a component changes
    fn version(&self) -> u64;
}

impl SceneHost for World {
    fn live_entities(&self) -> Vec<EntityKey> {
        World::live_entities(self).to_vec()
    }

    fn contains(&self, entity: EntityKey) -> bool {
        self.is_live(entity)
    }

    fn components(&self, entity: EntityKey) -> Option<&ComponentSet> {
        self.get_entity(entity)
            .filter(|e| !e.is_wall())
            .map(|e| e.components())
    }

    fn set_component(&mut self, entity: EntityKey, component: Component) -> Result<(), SceneError> {
        self.insert_component(entity, component)
    }

    fn remove_component(&mut self, entity: EntityKey, component_type: ComponentType) -> Result<(), SceneError> {
        self.take_component(entity, component_type).map(|_| ())
    }

    fn version(&self) -> u64 {
        World::version(self)
    }
}
