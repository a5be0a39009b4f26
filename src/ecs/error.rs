//! Registry error types.

use super::EntityId;

/// Errors raised by the checked registry operations.
///
/// The default operations never fail; only the `try_` variants on
/// [`EntityManager`](super::EntityManager) produce these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The target entity is not in the live-entity collection.
    #[error("entity {0} is not alive")]
    EntityNotAlive(EntityId),
}
