//! EntityManager - central registry of entities and their components

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::entity::EntityAllocator;
use super::{Component, ComponentClass, Entity, EntityId, RegistryError};

/// Rows of one component class, keyed by entity ID.
type ComponentRows = HashMap<EntityId, Box<dyn Component>>;

/// EntityManager holds all entities and their components
#[derive(Debug, Default)]
pub struct EntityManager {
    allocator: EntityAllocator,
    entities: Vec<Entity>,
    components_by_class: HashMap<String, ComponentRows>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: Vec::new(),
            components_by_class: HashMap::new(),
        }
    }

    /// Create a new entity and record it as live
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.allocator.generate_new_entity_id());
        self.entities.push(entity);
        debug!(entity_id = entity.id, "created entity");
        entity
    }

    /// Remove an entity and every component filed under its ID.
    ///
    /// Unknown IDs are ignored.
    pub fn remove_entity(&mut self, entity_id: EntityId) {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.id != entity_id);
        let removed_entities = before - self.entities.len();

        let mut removed_components = 0;
        for rows in self.components_by_class.values_mut() {
            if rows.remove(&entity_id).is_some() {
                removed_components += 1;
            }
        }

        debug!(
            entity_id,
            removed_entities,
            removed_components,
            "removed entity"
        );
    }

    /// Attach a component, replacing any previous one of the same class.
    ///
    /// The ID is not checked against the live entities; see
    /// [`EntityManager::try_add_component_to_entity`] for the checked form.
    pub fn add_component_to_entity(&mut self, entity_id: EntityId, component: Box<dyn Component>) {
        if !self.is_alive(entity_id) {
            debug!(
                entity_id,
                class = component.component_name(),
                "attaching component to an entity that is not alive"
            );
        }

        let class = component.component_name().to_owned();
        trace!(entity_id, class = %class, "adding component");
        self.components_by_class
            .entry(class)
            .or_default()
            .insert(entity_id, component);
    }

    /// Attach components in order; later ones overwrite earlier ones of the same class.
    pub fn add_components_to_entity<I>(&mut self, entity_id: EntityId, components: I)
    where
        I: IntoIterator<Item = Box<dyn Component>>,
    {
        for component in components {
            self.add_component_to_entity(entity_id, component);
        }
    }

    /// Like [`EntityManager::add_component_to_entity`], but refuses IDs that are not alive.
    pub fn try_add_component_to_entity(
        &mut self,
        entity_id: EntityId,
        component: Box<dyn Component>,
    ) -> Result<(), RegistryError> {
        self.ensure_alive(entity_id)?;
        self.add_component_to_entity(entity_id, component);
        Ok(())
    }

    /// Checked batch attach. Nothing is attached when the entity is not alive.
    pub fn try_add_components_to_entity<I>(
        &mut self,
        entity_id: EntityId,
        components: I,
    ) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Box<dyn Component>>,
    {
        self.ensure_alive(entity_id)?;
        self.add_components_to_entity(entity_id, components);
        Ok(())
    }

    /// Look up the component of `class_name` attached to `entity_id`
    pub fn get_component_of_class(
        &self,
        class_name: &str,
        entity_id: EntityId,
    ) -> Option<&(dyn Component + 'static)> {
        self.components_by_class
            .get(class_name)?
            .get(&entity_id)
            .map(|component| &**component)
    }

    /// IDs of every entity holding a component of `class_name`
    pub fn get_all_entities_possessing_components_of_class(
        &self,
        class_name: &str,
    ) -> HashSet<EntityId> {
        self.components_by_class
            .get(class_name)
            .map(|rows| rows.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Typed lookup through the component's class name
    pub fn get_component<T: ComponentClass>(&self, entity_id: EntityId) -> Option<&T> {
        self.get_component_of_class(T::CLASS_NAME, entity_id)?
            .downcast_ref::<T>()
    }

    /// Mutable typed lookup
    pub fn get_component_mut<T: ComponentClass>(&mut self, entity_id: EntityId) -> Option<&mut T> {
        self.components_by_class
            .get_mut(T::CLASS_NAME)?
            .get_mut(&entity_id)?
            .downcast_mut::<T>()
    }

    pub fn entities_with<T: ComponentClass>(&self) -> HashSet<EntityId> {
        self.get_all_entities_possessing_components_of_class(T::CLASS_NAME)
    }

    /// Check if an entity holds a component of `class_name`
    pub fn has_component(&self, class_name: &str, entity_id: EntityId) -> bool {
        self.components_by_class
            .get(class_name)
            .is_some_and(|rows| rows.contains_key(&entity_id))
    }

    /// Live entities, in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Get number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Check if any live entity carries `entity_id`
    pub fn is_alive(&self, entity_id: EntityId) -> bool {
        self.entities.iter().any(|entity| entity.id == entity_id)
    }

    /// Class names that have had at least one component attached
    pub fn component_classes(&self) -> impl Iterator<Item = &str> {
        self.components_by_class.keys().map(String::as_str)
    }

    pub fn lowest_unassigned_entity_id(&self) -> EntityId {
        self.allocator.lowest_unassigned_entity_id()
    }

    fn ensure_alive(&self, entity_id: EntityId) -> Result<(), RegistryError> {
        if self.is_alive(entity_id) {
            Ok(())
        } else {
            Err(RegistryError::EntityNotAlive(entity_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Speed(i32);

    impl Component for Speed {
        fn component_name(&self) -> &str {
            Self::CLASS_NAME
        }
    }

    impl ComponentClass for Speed {
        const CLASS_NAME: &'static str = "Speed";
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Health(i32);

    impl Component for Health {
        fn component_name(&self) -> &str {
            Self::CLASS_NAME
        }
    }

    impl ComponentClass for Health {
        const CLASS_NAME: &'static str = "Health";
    }

    #[test]
    fn test_create_entities() {
        let mut manager = EntityManager::new();

        let entity = manager.create_entity();
        let second_entity = manager.create_entity();

        assert_eq!(entity.id, 1);
        assert_eq!(second_entity.id, 2);
        assert!(manager.contains_entity(entity));
        assert!(manager.contains_entity(second_entity));
        assert_eq!(manager.entity_count(), 2);
    }

    #[test]
    fn test_create_entities_full_capacity() {
        let mut manager = EntityManager::new();
        manager.allocator.lowest_unassigned_entity_id = EntityId::MAX - 1;

        let entity = manager.create_entity();
        let second_entity = manager.create_entity();

        assert_eq!(entity.id, EntityId::MAX);
        assert_eq!(second_entity.id, 0);
        assert!(manager.contains_entity(entity));
        assert!(manager.contains_entity(second_entity));
    }

    #[test]
    fn test_wrapped_id_can_collide_with_live_entity() {
        let mut manager = EntityManager::new();
        let first = manager.create_entity();
        manager.allocator.lowest_unassigned_entity_id = EntityId::MAX;

        manager.create_entity();
        let collided = manager.create_entity();

        assert_eq!(collided, first);
        assert_eq!(manager.entity_count(), 3);

        manager.remove_entity(first.id);
        assert!(!manager.is_alive(first.id));
        assert_eq!(manager.entity_count(), 1);
    }

    #[test]
    fn test_class_maps_created_lazily() {
        let mut manager = EntityManager::new();
        let entity = manager.create_entity();

        assert!(manager.get_component_of_class("Speed", entity.id).is_none());
        assert_eq!(manager.component_classes().count(), 0);

        manager.add_component_to_entity(entity.id, Box::new(Speed(32)));

        assert_eq!(manager.component_classes().collect::<Vec<_>>(), vec!["Speed"]);
        assert!(manager.get_component_of_class("Health", entity.id).is_none());
        assert_eq!(manager.component_classes().count(), 1);
    }

    #[test]
    fn test_add_overwrites_same_class() {
        let mut manager = EntityManager::new();
        let entity = manager.create_entity();

        manager.add_components_to_entity(
            entity.id,
            vec![
                Box::new(Speed(1)) as Box<dyn Component>,
                Box::new(Health(10)),
                Box::new(Speed(2)),
            ],
        );

        assert_eq!(manager.get_component::<Speed>(entity.id), Some(&Speed(2)));
        assert_eq!(manager.get_component::<Health>(entity.id), Some(&Health(10)));
    }

    #[test]
    fn test_orphaned_component_is_kept() {
        let mut manager = EntityManager::new();

        manager.add_component_to_entity(42, Box::new(Health(5)));

        assert!(!manager.is_alive(42));
        assert!(manager.has_component("Health", 42));
        assert_eq!(
            manager.get_all_entities_possessing_components_of_class("Health"),
            HashSet::from([42])
        );
    }

    #[test]
    fn test_checked_add_rejects_dead_entity() {
        let mut manager = EntityManager::new();
        let entity = manager.create_entity();

        assert_eq!(
            manager.try_add_component_to_entity(99, Box::new(Speed(3))),
            Err(RegistryError::EntityNotAlive(99))
        );
        assert!(manager.try_add_component_to_entity(entity.id, Box::new(Speed(3))).is_ok());

        manager.remove_entity(entity.id);
        let result = manager.try_add_components_to_entity(
            entity.id,
            vec![Box::new(Speed(4)) as Box<dyn Component>, Box::new(Health(1))],
        );
        assert_eq!(result, Err(RegistryError::EntityNotAlive(entity.id)));
        assert!(!manager.has_component("Speed", entity.id));
        assert!(!manager.has_component("Health", entity.id));
    }

    #[test]
    fn test_get_component_mut() {
        let mut manager = EntityManager::new();
        let entity = manager.create_entity();
        manager.add_component_to_entity(entity.id, Box::new(Health(10)));

        if let Some(health) = manager.get_component_mut::<Health>(entity.id) {
            health.0 -= 3;
        }

        assert_eq!(manager.get_component::<Health>(entity.id), Some(&Health(7)));
        assert!(manager.get_component_mut::<Speed>(entity.id).is_none());
    }

    #[test]
    fn test_remove_absent_entity_is_noop() {
        let mut manager = EntityManager::new();
        let entity = manager.create_entity();
        manager.add_component_to_entity(entity.id, Box::new(Speed(1)));

        manager.remove_entity(1234);

        assert!(manager.is_alive(entity.id));
        assert!(manager.has_component("Speed", entity.id));
        assert_eq!(manager.lowest_unassigned_entity_id(), 1);
    }
}
