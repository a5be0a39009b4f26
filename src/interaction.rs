//! Callback shapes game code passes around alongside the registry.
//!
//! The registry never calls these itself.

use crate::ecs::{EntityId, EntityManager};

/// Decides whether `entity_id` may interact with `interacting_entity_id`.
pub type InteractionFunc = Box<dyn Fn(&mut EntityManager, EntityId, EntityId) -> bool>;

/// Decides whether something can be used given the registry state.
pub type UsageFunc = Box<dyn Fn(&EntityManager) -> bool>;
