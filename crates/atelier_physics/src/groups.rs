//! Named collision groups
//!
//! The registry hands out user groups one bit at a time and keeps a display
//! name for each. `DEFAULT`, `SCENE_UNDERSTANDING` and `ALL` always exist and
//! are protected.

use std::collections::BTreeMap;
use std::fmt;

use crate::collision::CollisionGroup;

/// Error modifying the group registry
#[derive(Debug, Clone, PartialEq)]
pub enum GroupError {
    /// The group is built in and cannot be changed
    Protected(CollisionGroup),
    /// The group was never registered
    Unknown(CollisionGroup),
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::Protected(g) => write!(f, "Collision group {:#x} is protected", g.bits()),
            GroupError::Unknown(g) => write!(f, "Collision group {:#x} is not registered", g.bits()),
        }
    }
}

impl std::error::Error for GroupError {}

/// Registry of collision groups and their display names
#[derive(Clone, Debug)]
pub struct CollisionGroupRegistry {
    /// Keyed by raw bits so iteration is in ascending bit order
    names: BTreeMap<u32, String>,
}

impl Default for CollisionGroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionGroupRegistry {
    /// Registry containing only the protected groups
    pub fn new() -> Self {
        let mut names = BTreeMap::new();
        names.insert(CollisionGroup::DEFAULT.bits(), "Default".to_string());
        names.insert(CollisionGroup::SCENE_UNDERSTANDING.bits(), "Scene Understanding".to_string());
        names.insert(CollisionGroup::ALL.bits(), "All".to_string());
        Self { names }
    }

    /// True for the built-in groups
    pub fn is_protected(group: CollisionGroup) -> bool {
        group == CollisionGroup::DEFAULT
            || group == CollisionGroup::SCENE_UNDERSTANDING
            || group == CollisionGroup::ALL
    }

    /// Union of every registered group except `ALL`
    fn occupied(&self) -> CollisionGroup {
        self.names
            .keys()
            .map(|bits| CollisionGroup::from_bits_retain(*bits))
            .filter(|g| *g != CollisionGroup::ALL)
            .fold(CollisionGroup::empty(), |acc, g| acc | g)
    }

    /// True once every user bit is taken
    pub fn is_full(&self) -> bool {
        self.occupied().contains(CollisionGroup::USER_BITS)
    }

    /// Register a new group on the lowest free user bit
    ///
    /// Returns `None` when every user bit is taken.
    pub fn add_group(&mut self, name: impl Into<String>) -> Option<CollisionGroup> {
        let occupied = self.occupied();
        let group = (0..31)
            .map(|bit| CollisionGroup::from_bits_retain(1 << bit))
            .find(|g| !occupied.contains(*g))?;
        let name = name.into();
        log::debug!("registered collision group {:#x} '{}'", group.bits(), name);
        self.names.insert(group.bits(), name);
        Some(group)
    }

    /// Rename a user group
    pub fn rename(&mut self, group: CollisionGroup, name: impl Into<String>) -> Result<(), GroupError> {
        if Self::is_protected(group) {
            return Err(GroupError::Protected(group));
        }
        match self.names.get_mut(&group.bits()) {
            Some(slot) => {
                *slot = name.into();
                Ok(())
            }
            None => Err(GroupError::Unknown(group)),
        }
    }

    /// Remove a user group, freeing its bit
    pub fn remove(&mut self, group: CollisionGroup) -> Result<String, GroupError> {
        if Self::is_protected(group) {
            return Err(GroupError::Protected(group));
        }
        self.names.remove(&group.bits()).ok_or(GroupError::Unknown(group))
    }

    /// Display name of a registered group
    pub fn name(&self, group: CollisionGroup) -> Option<&str> {
        self.names.get(&group.bits()).map(String::as_str)
    }

    /// Registered groups in ascending bit order
    pub fn iter(&self) -> impl Iterator<Item = (CollisionGroup, &str)> {
        self.names
            .iter()
            .map(|(bits, name)| (CollisionGroup::from_bits_retain(*bits), name.as_str()))
    }

    /// Number of registered groups
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; the protected groups are always present
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add `group` to `selection` if absent, remove it if present
    pub fn toggle(selection: &mut CollisionGroup, group: CollisionGroup) {
        if selection.contains(group) {
            selection.remove(group);
        } else {
            selection.insert(group);
        }
    }
}
