pub mod components;
pub mod ecs;
pub mod interaction;
pub mod scenario;

pub use ecs::{Component, ComponentClass, Entity, EntityId, EntityManager, RegistryError};
pub use scenario::{Scenario, ScenarioLoader, ScenarioReport};
