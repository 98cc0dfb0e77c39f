//! Collision component and filtering
//!
//! Collision filtering uses group/mask bit sets: an object belongs to one or
//! more groups and declares which groups it collides with.

use bitflags::bitflags;

use crate::shapes::ShapeResource;

bitflags! {
    /// Collision groups, one bit each
    ///
    /// Bits 0-30 are available to the user (see
    /// [`CollisionGroupRegistry`](crate::CollisionGroupRegistry)); bit 31 is
    /// reserved for scene understanding.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct CollisionGroup: u32 {
        /// Default group for most objects
        const DEFAULT = 1 << 0;
        /// Reconstructed real-world geometry
        const SCENE_UNDERSTANDING = 1 << 31;
        /// Every group
        const ALL = 0xFFFF_FFFF;
    }
}

impl CollisionGroup {
    /// Bits a user-defined group may occupy
    pub const USER_BITS: Self = Self::from_bits_retain(u32::MAX >> 1);
}

/// Collision filter determining what an object collides with
///
/// Two objects A and B collide if:
/// - (A.group & B.mask) != 0, AND
/// - (B.group & A.mask) != 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which group(s) this object belongs to
    pub group: CollisionGroup,
    /// Which group(s) this object can collide with
    pub mask: CollisionGroup,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            group: CollisionGroup::DEFAULT,
            mask: CollisionGroup::ALL,
        }
    }
}

impl CollisionFilter {
    /// Create a new collision filter with specified group and mask
    pub fn new(group: CollisionGroup, mask: CollisionGroup) -> Self {
        Self { group, mask }
    }

    /// Filter for sensors: reports contacts but never collides
    pub fn sensor() -> Self {
        Self {
            group: CollisionGroup::empty(),
            mask: CollisionGroup::empty(),
        }
    }

    /// Check if this filter allows collision with another filter
    pub fn collides_with(&self, other: &Self) -> bool {
        self.group.intersects(other.mask) && other.group.intersects(self.mask)
    }
}

/// How contacts on a collision component are handled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionMode {
    /// Engine default handling
    #[default]
    Default,
    /// Reports contacts without a collision response
    Trigger,
    /// Reports contacts and responds to them
    Colliding,
}

impl CollisionMode {
    /// All modes in picker order
    pub const ALL: [CollisionMode; 3] = [CollisionMode::Default, CollisionMode::Trigger, CollisionMode::Colliding];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            CollisionMode::Default => "Default",
            CollisionMode::Trigger => "Trigger",
            CollisionMode::Colliding => "Colliding",
        }
    }
}

/// Collision volume attached to an entity
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionComponent {
    pub shapes: Vec<ShapeResource>,
    pub mode: CollisionMode,
    /// Static colliders never move; the engine may optimize them
    pub is_static: bool,
    pub filter: CollisionFilter,
}

impl CollisionComponent {
    /// Create a collision component with the given shapes and default settings
    pub fn new(shapes: Vec<ShapeResource>) -> Self {
        Self {
            shapes,
            ..Self::default()
        }
    }

    /// Set the mode
    pub fn with_mode(mut self, mode: CollisionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether the collider is static
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}
