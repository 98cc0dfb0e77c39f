//! Components attached to entities
//!
//! An entity holds at most one component per [`ComponentType`]. Components
//! are plain values: reading one copies it out, writing one replaces
//! whatever was there.

use std::collections::BTreeMap;
use std::fmt;

use atelier_physics::{CollisionComponent, PhysicsBodyComponent};
use serde::{Serialize, Deserialize};

use crate::model::{InputTargetComponent, ModelComponent};

/// The type tag of a component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    PhysicsBody,
    Collision,
    Model,
    InputTarget,
}

impl ComponentType {
    /// Every component type, in the order the add-component screen lists them
    pub const ALL: [ComponentType; 4] = [
        ComponentType::PhysicsBody,
        ComponentType::Collision,
        ComponentType::Model,
        ComponentType::InputTarget,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComponentType::PhysicsBody => "Physics Body",
            ComponentType::Collision => "Collision",
            ComponentType::Model => "Model",
            ComponentType::InputTarget => "Input Target",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A component value of any type
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    PhysicsBody(PhysicsBodyComponent),
    Collision(CollisionComponent),
    Model(ModelComponent),
    InputTarget(InputTargetComponent),
}

impl Component {
    pub fn component_type(&self) -> ComponentType {
        match self {
            Component::PhysicsBody(_) => ComponentType::PhysicsBody,
            Component::Collision(_) => ComponentType::Collision,
            Component::Model(_) => ComponentType::Model,
            Component::InputTarget(_) => ComponentType::InputTarget,
        }
    }
}

impl From<PhysicsBodyComponent> for Component {
    fn from(c: PhysicsBodyComponent) -> Self {
        Component::PhysicsBody(c)
    }
}

impl From<CollisionComponent> for Component {
    fn from(c: CollisionComponent) -> Self {
        Component::Collision(c)
    }
}

impl From<ModelComponent> for Component {
    fn from(c: ModelComponent) -> Self {
        Component::Model(c)
    }
}

impl From<InputTargetComponent> for Component {
    fn from(c: InputTargetComponent) -> Self {
        Component::InputTarget(c)
    }
}

/// The components of one entity, at most one per type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentSet {
    components: BTreeMap<ComponentType, Component>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component, returning the one it replaced
    pub fn insert(&mut self, component: impl Into<Component>) -> Option<Component> {
        let component = component.into();
        self.components.insert(component.component_type(), component)
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.insert(component);
        self
    }

    pub fn remove(&mut self, component_type: ComponentType) -> Option<Component> {
        self.components.remove(&component_type)
    }

    pub fn get(&self, component_type: ComponentType) -> Option<&Component> {
        self.components.get(&component_type)
    }

    pub fn contains(&self, component_type: ComponentType) -> bool {
        self.components.contains_key(&component_type)
    }

    /// Component types present, in [`ComponentType`] order
    pub fn types(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.components.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn model(&self) -> Option<&ModelComponent> {
        match self.get(ComponentType::Model) {
            Some(Component::Model(c)) => Some(c),
            _ => None,
        }
    }

    pub fn physics_body(&self) -> Option<&PhysicsBodyComponent> {
        match self.get(ComponentType::PhysicsBody) {
            Some(Component::PhysicsBody(c)) => Some(c),
            _ => None,
        }
    }

    pub fn collision(&self) -> Option<&CollisionComponent> {
        match self.get(ComponentType::Collision) {
            Some(Component::Collision(c)) => Some(c),
            _ => None,
        }
    }

    pub fn input_target(&self) -> Option<&InputTargetComponent> {
        match self.get(ComponentType::InputTarget) {
            Some(Component::InputTarget(c)) => Some(c),
            _ => None,
        }
    }
}
