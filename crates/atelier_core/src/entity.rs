//! Entity type
//!
//! An Entity is a named, positioned node in the scene that owns a set of
//! components.

use bitflags::bitflags;
use atelier_math::Vec3;

use crate::component::{Component, ComponentSet, ComponentType};
use crate::walls::Face;

bitflags! {
    /// Flags indicating which parts of an entity have changed and need updating
    ///
    /// The host reads these to decide what to push to its engine, then
    /// clears them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Position has changed
        const TRANSFORM = 1 << 0;
        /// Model mesh has changed
        const MESH = 1 << 1;
        /// Model materials have changed
        const MATERIAL = 1 << 2;
        /// A component was added, replaced or removed
        const COMPONENTS = 1 << 3;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits()
            | Self::MESH.bits()
            | Self::MATERIAL.bits()
            | Self::COMPONENTS.bits();
    }
}

/// Who owns an entity's lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityRole {
    /// Added and removed by the user
    User,
    /// One of the bounding box walls, managed by the scene
    Wall(Face),
}

/// An entity in the scene
#[derive(Clone, Debug)]
pub struct Entity {
    /// Display name
    pub name: String,
    /// Position in scene space
    position: Vec3,
    components: ComponentSet,
    role: EntityRole,
    /// Dirty flags for change tracking (what needs pushing to the engine)
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a user entity with no components
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            components: ComponentSet::new(),
            role: EntityRole::User,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Create the wall entity for a face
    pub fn wall(face: Face, position: Vec3, components: ComponentSet) -> Self {
        Self {
            name: format!("{} Wall", face.label()),
            position,
            components,
            role: EntityRole::Wall(face),
            dirty: DirtyFlags::ALL,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_components(mut self, components: ComponentSet) -> Self {
        self.components = components;
        self
    }

    pub fn role(&self) -> EntityRole {
        self.role
    }

    pub fn is_wall(&self) -> bool {
        matches!(self.role, EntityRole::Wall(_))
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    pub fn component(&self, component_type: ComponentType) -> Option<&Component> {
        self.components.get(component_type)
    }

    pub fn has_component(&self, component_type: ComponentType) -> bool {
        self.components.contains(component_type)
    }

    // --- Mutation (marks dirty) ---

    /// Set the position and mark the transform as dirty
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Insert or replace a component, returning the previous one
    pub fn set_component(&mut self, component: Component) -> Option<Component> {
        let flags = Self::flags_for(component.component_type());
        let previous = self.components.insert(component);
        self.mark_dirty(flags);
        previous
    }

    /// Remove a component type; no-op if absent
    pub fn remove_component(&mut self, component_type: ComponentType) -> Option<Component> {
        let removed = self.components.remove(component_type);
        if removed.is_some() {
            self.mark_dirty(Self::flags_for(component_type));
        }
        removed
    }

    fn flags_for(component_type: ComponentType) -> DirtyFlags {
        match component_type {
            ComponentType::Model => DirtyFlags::COMPONENTS | DirtyFlags::MESH | DirtyFlags::MATERIAL,
            _ => DirtyFlags::COMPONENTS,
        }
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InputTargetComponent;
    use atelier_physics::PhysicsBodyComponent;

    #[test]
    fn test_new_entity_is_dirty_user_entity() {
        let entity = Entity::new("cube");
        assert!(entity.is_dirty());
        assert_eq!(entity.dirty_flags(), DirtyFlags::ALL);
        assert_eq!(entity.role(), EntityRole::User);
        assert!(entity.components().is_empty());
    }

    #[test]
    fn test_removed_entity_can_be_reported() {
        let entity = Entity::new("cube").with_position(Vec3::new(1.0, 0.0, 0.0));
        let result: Result<(), Entity> = Err(entity.clone());
        let shown = format!("{:?}", result.unwrap_err());
        assert!(shown.contains("cube"));
        assert_eq!(entity.position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_position_marks_transform() {
        let mut entity = Entity::new("cube");
        entity.clear_dirty();
        entity.set_position(Vec3::X);
        assert_eq!(entity.dirty_flags(), DirtyFlags::TRANSFORM);
        assert_eq!(entity.position(), Vec3::X);
    }

    #[test]
    fn test_set_component_marks_components() {
        let mut entity = Entity::new("cube");
        entity.clear_dirty();
        entity.set_component(PhysicsBodyComponent::default().into());
        assert_eq!(entity.dirty_flags(), DirtyFlags::COMPONENTS);
        assert!(entity.has_component(ComponentType::PhysicsBody));
    }

    #[test]
    fn test_remove_absent_component_stays_clean() {
        let mut entity = Entity::new("cube");
        entity.clear_dirty();
        assert!(entity.remove_component(ComponentType::Model).is_none());
        assert!(!entity.is_dirty());
    }

    #[test]
    fn test_remove_component() {
        let mut entity = Entity::new("cube")
            .with_components(ComponentSet::new().with(InputTargetComponent::default()));
        entity.clear_dirty();
        assert!(entity.remove_component(ComponentType::InputTarget).is_some());
        assert!(entity.dirty_flags().contains(DirtyFlags::COMPONENTS));
    }

    #[test]
    fn test_wall_entity() {
        let entity = Entity::wall(Face::Upper, Vec3::Y, ComponentSet::new());
        assert!(entity.is_wall());
        assert_eq!(entity.name, "Upper Wall");
        assert_eq!(entity.role(), EntityRole::Wall(Face::Upper));
    }
}
