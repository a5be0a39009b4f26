//! Entity identity and ID allocation

use std::fmt;

use tracing::warn;

/// Entity ID type - signed 32-bit handle
pub type EntityId = i32;

/// Entity struct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    pub id: EntityId,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Entity ID allocator.
///
/// IDs climb from 1 up to `EntityId::MAX`, after which the counter wraps back
/// to 0 and keeps climbing. Wrapped IDs are not checked against live entities,
/// so after 2^31 allocations a new entity can share an ID with a live one.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    pub(crate) lowest_unassigned_entity_id: EntityId,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            lowest_unassigned_entity_id: 0,
        }
    }

    /// Advance the counter and hand out the new value.
    pub fn generate_new_entity_id(&mut self) -> EntityId {
        if self.lowest_unassigned_entity_id == EntityId::MAX {
            warn!("entity id counter exhausted, wrapping to 0");
            self.lowest_unassigned_entity_id = 0;
        } else {
            self.lowest_unassigned_entity_id += 1;
        }
        self.lowest_unassigned_entity_id
    }

    /// The most recently issued ID (0 before any allocation).
    pub fn lowest_unassigned_entity_id(&self) -> EntityId {
        self.lowest_unassigned_entity_id
    }
}
