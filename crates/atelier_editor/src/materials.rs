//! Material list editing
//!
//! Materials have no identity of their own, and two entries may hold equal
//! values. The list hands each material a [`MaterialId`] when it enters the
//! list; the id stays with the material through moves and edits.

use std::fmt;

use atelier_core::{Material, MaterialKind};

/// Identity of a material within one [`MaterialList`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u64);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material#{}", self.0)
    }
}

/// One material with its list identity
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialEntry {
    pub id: MaterialId,
    pub material: Material,
}

/// The ordered materials of a model being edited
#[derive(Clone, Debug, Default)]
pub struct MaterialList {
    entries: Vec<MaterialEntry>,
    next_id: u64,
}

impl MaterialList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign ids to existing materials in order
    pub fn from_materials(materials: impl IntoIterator<Item = Material>) -> Self {
        let mut list = Self::new();
        for material in materials {
            list.push(material);
        }
        list
    }

    fn allocate(&mut self) -> MaterialId {
        let id = MaterialId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a material, returning its new id
    pub fn push(&mut self, material: Material) -> MaterialId {
        let id = self.allocate();
        self.entries.push(MaterialEntry { id, material });
        id
    }

    /// Append the default material of `kind`
    pub fn add(&mut self, kind: MaterialKind) -> MaterialId {
        self.push(kind.default_material())
    }

    fn index_of(&self, id: MaterialId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.index_of(id).map(|i| &self.entries[i].material)
    }

    pub fn remove(&mut self, id: MaterialId) -> Option<Material> {
        let index = self.index_of(id)?;
        Some(self.entries.remove(index).material)
    }

    /// Move a material to `index` (clamped to the end)
    ///
    /// Returns false for unknown ids.
    pub fn move_to(&mut self, id: MaterialId, index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let entry = self.entries.remove(from);
        let to = index.min(self.entries.len());
        self.entries.insert(to, entry);
        true
    }

    /// Replace the material with `id` by the result of `f`
    pub fn edit(&mut self, id: MaterialId, f: impl FnOnce(&mut Material)) -> bool {
        match self.index_of(id) {
            Some(i) => {
                f(&mut self.entries[i].material);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<MaterialId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Materials in list order, without ids
    pub fn to_materials(&self) -> Vec<Material> {
        self.entries.iter().map(|e| e.material).collect()
    }

    pub fn into_materials(self) -> Vec<Material> {
        self.entries.into_iter().map(|e| e.material).collect()
    }
}
