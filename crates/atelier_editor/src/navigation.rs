//! Navigation stack
//!
//! The editor's screens form a stack. Most screens edit one entity; when that
//! entity leaves the scene the screen has nothing left to show, so it is
//! pruned. Screens without a target entity are never pruned.

use std::collections::HashSet;

use atelier_core::{EntityKey, SceneHost};

/// An open editor screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationEntry {
    EntitySettings(EntityKey),
    AddComponent(EntityKey),
    PhysicsBody(EntityKey),
    Collision(EntityKey),
    Model(EntityKey),
    /// Browse the bounding box faces
    Faces,
    /// Browse and rename collision groups
    CollisionGroups,
}

impl NavigationEntry {
    /// The entity this screen edits, if any
    pub fn target(&self) -> Option<EntityKey> {
        match self {
            NavigationEntry::EntitySettings(e)
            | NavigationEntry::AddComponent(e)
            | NavigationEntry::PhysicsBody(e)
            | NavigationEntry::Collision(e)
            | NavigationEntry::Model(e) => Some(*e),
            NavigationEntry::Faces | NavigationEntry::CollisionGroups => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NavigationEntry::EntitySettings(_) => "Entity Settings",
            NavigationEntry::AddComponent(_) => "Add Component",
            NavigationEntry::PhysicsBody(_) => "Physics Body",
            NavigationEntry::Collision(_) => "Collision",
            NavigationEntry::Model(_) => "Model",
            NavigationEntry::Faces => "Faces",
            NavigationEntry::CollisionGroups => "Collision Groups",
        }
    }
}

/// Ordered stack of open screens, bottom first
#[derive(Clone, Debug, Default)]
pub struct NavigationStack {
    entries: Vec<NavigationEntry>,
    /// Host version seen by the last [`sync`](Self::sync)
    synced_version: Option<u64>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: NavigationEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<NavigationEntry> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&NavigationEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pop screens until the topmost entity settings screen is on top
    ///
    /// Returns false, leaving the stack untouched, if there is no entity
    /// settings screen.
    pub fn pop_to_entity_settings(&mut self) -> bool {
        let found = self
            .entries
            .iter()
            .rposition(|e| matches!(e, NavigationEntry::EntitySettings(_)));
        match found {
            Some(index) => {
                self.entries.truncate(index + 1);
                true
            }
            None => false,
        }
    }

    /// Remove entries whose target entity fails `is_live`
    ///
    /// Removal runs in descending index order; survivors keep their order.
    /// Returns the removed entries, bottom first.
    fn prune(&mut self, is_live: impl Fn(EntityKey) -> bool) -> Vec<NavigationEntry> {
        let stale: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.target().is_some_and(|e| !is_live(e)))
            .map(|(index, _)| index)
            .collect();

        let mut removed = Vec::with_capacity(stale.len());
        for &index in stale.iter().rev() {
            removed.push(self.entries.remove(index));
        }
        removed.reverse();
        if !removed.is_empty() {
            log::debug!("pruned {} navigation entries", removed.len());
        }
        removed
    }

    /// Prune entries whose target is not in `live`
    pub fn reconcile(&mut self, live: &HashSet<EntityKey>) -> Vec<NavigationEntry> {
        self.prune(|e| live.contains(&e))
    }

    /// Reconcile against `host` if its version moved since the last sync
    pub fn sync(&mut self, host: &dyn SceneHost) -> Vec<NavigationEntry> {
        let version = host.version();
        if self.synced_version == Some(version) {
            return Vec::new();
        }
        self.synced_version = Some(version);
        self.prune(|e| host.contains(e))
    }
}
