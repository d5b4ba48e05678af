//! Entity records with explicit roles and arena-based storage.

use bastion_common::{EntityId, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::structure::StructureHealth;

/// Error types for entity operations.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity not found
    #[error("Entity not found: {0}")]
    NotFound(EntityId),
    /// Entity already despawned
    #[error("Entity already despawned: {0}")]
    AlreadyDespawned(EntityId),
    /// Operation requires a different role
    #[error("Entity {id} has role {actual:?}, expected {expected:?}")]
    WrongRole {
        /// Entity ID
        id: EntityId,
        /// Role required by the operation
        expected: EntityRole,
        /// Role the entity actually has
        actual: EntityRole,
    },
}

/// Result type for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Role of an entity in a siege. Resolved once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRole {
    /// The defending player
    Player,
    /// AI-controlled attacker
    Hostile,
    /// Defended, repairable structure
    Structure,
}

impl EntityRole {
    /// Whether hostiles may direct attacks at this role.
    #[must_use]
    pub const fn is_attackable_by_hostiles(self) -> bool {
        matches!(self, Self::Player | Self::Structure)
    }
}

/// Hit points for mobile entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Creates a new health pool at full.
    #[must_use]
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// Returns current health.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Returns maximum health.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Applies damage, returning the amount actually removed.
    pub fn damage(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        before - self.current
    }

    /// Checks if dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// An entity taking part in a siege.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    role: EntityRole,
    position: Vec2,
    health: Option<Health>,
    structure: Option<StructureHealth>,
}

impl Entity {
    /// Creates a player at a position.
    #[must_use]
    pub fn player(position: Vec2, max_health: f32) -> Self {
        Self {
            id: EntityId::new(),
            role: EntityRole::Player,
            position,
            health: Some(Health::new(max_health)),
            structure: None,
        }
    }

    /// Creates a hostile at a position.
    #[must_use]
    pub fn hostile(position: Vec2, max_health: f32) -> Self {
        Self {
            id: EntityId::new(),
            role: EntityRole::Hostile,
            position,
            health: Some(Health::new(max_health)),
            structure: None,
        }
    }

    /// Creates a defended structure at a position.
    #[must_use]
    pub fn home_structure(position: Vec2, max_health: f32) -> Self {
        Self {
            id: EntityId::new(),
            role: EntityRole::Structure,
            position,
            health: None,
            structure: Some(StructureHealth::new(max_health)),
        }
    }

    /// Returns the entity's unique ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity role.
    #[must_use]
    pub const fn role(&self) -> EntityRole {
        self.role
    }

    /// Returns the entity's position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Sets the entity's position. Only the physics mover calls this.
    pub fn set_position(&mut self, pos: Vec2) {
        self.position = pos;
    }

    /// Returns hit points for players and hostiles.
    #[must_use]
    pub const fn health(&self) -> Option<&Health> {
        self.health.as_ref()
    }

    /// Mutable hit points.
    pub fn health_mut(&mut self) -> Option<&mut Health> {
        self.health.as_mut()
    }

    /// Returns structure health for structures.
    #[must_use]
    pub const fn structure(&self) -> Option<&StructureHealth> {
        self.structure.as_ref()
    }

    /// Mutable structure health.
    pub fn structure_mut(&mut self) -> Option<&mut StructureHealth> {
        self.structure.as_mut()
    }
}

/// Arena-based entity storage.
///
/// Uses a free list for slot reuse and a map from ID to slot for lookup.
#[derive(Debug, Default)]
pub struct EntityArena {
    entities: Vec<Option<Entity>>,
    free_list: Vec<usize>,
    id_to_index: ahash::AHashMap<EntityId, usize>,
}

impl EntityArena {
    /// Creates a new empty entity arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_index.len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_index.is_empty()
    }

    /// Returns the total slot count (including free slots).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entities.len()
    }

    /// Inserts a pre-built entity.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();

        let index = if let Some(free_index) = self.free_list.pop() {
            self.entities[free_index] = Some(entity);
            free_index
        } else {
            let index = self.entities.len();
            self.entities.push(Some(entity));
            index
        };

        self.id_to_index.insert(id, index);
        id
    }

    /// Despawns an entity by ID.
    pub fn despawn(&mut self, id: EntityId) -> EntityResult<Entity> {
        let index = self
            .id_to_index
            .remove(&id)
            .ok_or(EntityError::NotFound(id))?;

        let entity = self.entities[index]
            .take()
            .ok_or(EntityError::AlreadyDespawned(id))?;

        self.free_list.push(index);
        Ok(entity)
    }

    /// Gets a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> EntityResult<&Entity> {
        let index = self.id_to_index.get(&id).ok_or(EntityError::NotFound(id))?;

        self.entities[*index]
            .as_ref()
            .ok_or(EntityError::NotFound(id))
    }

    /// Gets a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> EntityResult<&mut Entity> {
        let index = self.id_to_index.get(&id).ok_or(EntityError::NotFound(id))?;

        self.entities[*index]
            .as_mut()
            .ok_or(EntityError::NotFound(id))
    }

    /// Gets an entity and checks its role.
    pub fn get_with_role(&self, id: EntityId, expected: EntityRole) -> EntityResult<&Entity> {
        let entity = self.get(id)?;
        if entity.role() == expected {
            Ok(entity)
        } else {
            Err(EntityError::WrongRole {
                id,
                expected,
                actual: entity.role(),
            })
        }
    }

    /// Checks if an entity with the given ID exists.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Returns an iterator over all live entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter_map(|opt| opt.as_ref())
    }

    /// Returns an iterator over entities with a specific role.
    pub fn iter_by_role(&self, role: EntityRole) -> impl Iterator<Item = &Entity> {
        self.iter().filter(move |e| e.role() == role)
    }
}
