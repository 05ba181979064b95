//! The record store.
//!
//! Holds entities in load order, with indexes for lookup by id and by
//! case-insensitive name. Positions in the store are the entity indexes
//! used by every graph engine.

use crate::entity::{Entity, EntityId};
use crate::error::LoadError;
use std::collections::{HashMap, HashSet};

/// Ordered collection of entities with a fixed capacity ceiling.
#[derive(Debug, Clone)]
pub struct RecordStore {
    entities: Vec<Entity>,

    /// Maps ids to the first entity inserted with that id.
    id_index: HashMap<EntityId, usize>,

    /// Maps lowercased names to the first entity inserted with that name.
    name_index: HashMap<String, usize>,

    capacity: usize,
}

impl RecordStore {
    /// Creates an empty store that accepts at most `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::new(),
            id_index: HashMap::new(),
            name_index: HashMap::new(),
            capacity,
        }
    }

    /// Builds a store from entities in order.
    ///
    /// Fails as a whole if the entities do not fit; no partial store is
    /// returned.
    pub fn from_entities<I>(entities: I, capacity: usize) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut store = Self::with_capacity(capacity);
        for entity in entities {
            store.insert(entity)?;
        }
        Ok(store)
    }

    /// Appends an entity and returns its index.
    ///
    /// Duplicate ids and names are accepted; lookups keep resolving to the
    /// entity inserted first.
    pub fn insert(&mut self, entity: Entity) -> Result<usize, LoadError> {
        if self.entities.len() >= self.capacity {
            return Err(LoadError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let index = self.entities.len();
        self.id_index.entry(entity.id).or_insert(index);
        self.name_index
            .entry(entity.name.to_lowercase())
            .or_insert(index);
        self.entities.push(entity);

        Ok(index)
    }

    /// Finds an entity by name, ignoring case.
    pub fn by_name(&self, name: &str) -> Option<usize> {
        self.name_index.get(&name.to_lowercase()).copied()
    }

    /// Finds an entity by id.
    pub fn by_id(&self, id: EntityId) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    /// Gets an entity by index.
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    /// Declared peers of `index` that resolve to entities, as indexes.
    ///
    /// Keeps declaration order; dangling and repeated ids are removed.
    pub fn resolved_peers(&self, index: usize) -> Vec<usize> {
        let Some(entity) = self.get(index) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        entity
            .peers
            .iter()
            .filter_map(|&id| self.by_id(id))
            .filter(|&peer| seen.insert(peer))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over entities in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}
