//! Entity Component System (ECS) registry
//!
//! Entities are integer handles; components are opaque values filed by class
//! name under the ID of the entity they belong to.

pub mod component;
pub mod entity;
pub mod error;
pub mod manager;

pub use component::{AsAny, Component, ComponentClass};
pub use entity::{Entity, EntityAllocator, EntityId};
pub use error::RegistryError;
pub use manager::EntityManager;
