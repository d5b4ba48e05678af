//! Arena-backed world.
//!
//! `ArenaWorld` stores every entity in an [`EntityArena`] and implements the
//! contracts the orchestrator consumes: proximity queries, damage access and
//! a velocity sink integrated by the caller. `RegionTrigger` turns positions
//! into region membership events once per tick.

use ahash::{AHashMap, AHashSet};
use bastion_common::{EntityId, Vec2};
use tracing::trace;

use crate::attack::{CombatWorld, Damageable, ProximityHit};
use crate::entity::{Entity, EntityArena, EntityResult, EntityRole, Health};
use crate::orchestrator::{PhysicsMover, SiegeWorld};
use crate::region::{RegionBounds, RegionEvent};
use crate::structure::StructureHealth;
use crate::targeting::{StructureCandidate, TargetRef};

/// World of players, hostiles and one home structure.
#[derive(Debug, Default)]
pub struct ArenaWorld {
    arena: EntityArena,
    player: Option<EntityId>,
    structure: Option<EntityId>,
    velocities: AHashMap<EntityId, Vec2>,
}

impl ArenaWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying entity storage.
    #[must_use]
    pub const fn arena(&self) -> &EntityArena {
        &self.arena
    }

    /// Spawns the player. Replaces the tracked player if one exists.
    pub fn spawn_player(&mut self, position: Vec2, max_health: f32) -> EntityId {
        let id = self.arena.spawn(Entity::player(position, max_health));
        self.player = Some(id);
        id
    }

    /// Spawns the home structure. Replaces the tracked structure if one exists.
    pub fn spawn_structure(&mut self, position: Vec2, max_health: f32) -> EntityId {
        let id = self.arena.spawn(Entity::home_structure(position, max_health));
        self.structure = Some(id);
        id
    }

    /// Spawns a hostile.
    pub fn spawn_hostile(&mut self, position: Vec2, max_health: f32) -> EntityId {
        self.arena.spawn(Entity::hostile(position, max_health))
    }

    /// Removes an entity and any pending velocity.
    pub fn despawn(&mut self, id: EntityId) -> EntityResult<Entity> {
        self.velocities.remove(&id);
        if self.player == Some(id) {
            self.player = None;
        }
        if self.structure == Some(id) {
            self.structure = None;
        }
        self.arena.despawn(id)
    }

    /// Teleports an entity.
    pub fn set_position(&mut self, id: EntityId, position: Vec2) -> EntityResult<()> {
        self.arena.get_mut(id)?.set_position(position);
        Ok(())
    }

    /// Player ID, if spawned.
    #[must_use]
    pub const fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// Player health, if spawned.
    #[must_use]
    pub fn player_health(&self) -> Option<Health> {
        let id = self.player?;
        self.arena
            .get_with_role(id, EntityRole::Player)
            .ok()?
            .health()
            .copied()
    }

    /// Structure ID, if spawned.
    #[must_use]
    pub const fn structure_id(&self) -> Option<EntityId> {
        self.structure
    }

    /// Structure health, if spawned.
    #[must_use]
    pub fn structure_health(&self) -> Option<StructureHealth> {
        let id = self.structure?;
        self.arena
            .get_with_role(id, EntityRole::Structure)
            .ok()?
            .structure()
            .copied()
    }

    /// Restores the structure to full health. Returns false without one.
    pub fn repair_structure(&mut self) -> bool {
        let Some(id) = self.structure else {
            return false;
        };
        match self.arena.get_mut(id).ok().and_then(Entity::structure_mut) {
            Some(health) => {
                health.repair();
                true
            },
            None => false,
        }
    }

    /// Velocity applied on the latest tick.
    #[must_use]
    pub fn velocity_of(&self, id: EntityId) -> Option<Vec2> {
        self.velocities.get(&id).copied()
    }

    /// Moves every entity by its applied velocity.
    pub fn integrate(&mut self, dt: f32) {
        for (id, velocity) in &self.velocities {
            if let Ok(entity) = self.arena.get_mut(*id) {
                let next = entity.position() + *velocity * dt;
                if next.is_finite() {
                    entity.set_position(next);
                }
            }
        }
    }
}

impl PhysicsMover for ArenaWorld {
    fn apply_velocity(&mut self, id: EntityId, velocity: Vec2) {
        self.velocities.insert(id, velocity);
    }
}

impl CombatWorld for ArenaWorld {
    fn query_proximity(&self, origin: Vec2, radius: f32) -> Vec<ProximityHit> {
        self.arena
            .iter()
            .filter(|e| e.position().distance(origin) <= radius)
            .map(|e| ProximityHit {
                id: e.id(),
                role: e.role(),
                position: e.position(),
            })
            .collect()
    }

    fn damageable_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
        let entity = self.arena.get_mut(id).ok()?;
        match entity.role() {
            EntityRole::Structure => entity.structure_mut().map(|s| s as &mut dyn Damageable),
            EntityRole::Player | EntityRole::Hostile => {
                entity.health_mut().map(|h| h as &mut dyn Damageable)
            },
        }
    }
}

impl SiegeWorld for ArenaWorld {
    fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.arena.get(id).ok().map(Entity::position)
    }

    fn player(&self) -> Option<TargetRef> {
        let entity = self.arena.get(self.player?).ok()?;
        if entity.health().is_some_and(Health::is_dead) {
            return None;
        }
        Some(TargetRef::new(entity.id(), entity.position()))
    }

    fn home_structure(&self) -> Option<StructureCandidate> {
        let entity = self.arena.get(self.structure?).ok()?;
        let broken = entity.structure().map_or(true, StructureHealth::is_broken);
        Some(StructureCandidate::new(entity.id(), entity.position(), broken))
    }
}

/// Emits enter/exit events by diffing positions against a rectangle.
#[derive(Debug, Clone)]
pub struct RegionTrigger {
    bounds: RegionBounds,
    hostiles_inside: AHashSet<EntityId>,
    player_inside: bool,
}

impl RegionTrigger {
    /// Creates a trigger with nothing inside.
    #[must_use]
    pub fn new(bounds: RegionBounds) -> Self {
        Self {
            bounds,
            hostiles_inside: AHashSet::new(),
            player_inside: false,
        }
    }

    /// Watched rectangle.
    #[must_use]
    pub const fn bounds(&self) -> &RegionBounds {
        &self.bounds
    }

    /// Events since the previous scan.
    pub fn scan(&mut self, world: &ArenaWorld) -> Vec<RegionEvent> {
        let mut events = Vec::new();

        let player_now = world
            .player_id()
            .and_then(|id| world.position_of(id))
            .is_some_and(|p| self.bounds.contains(p));
        if player_now != self.player_inside {
            self.player_inside = player_now;
            events.push(if player_now {
                RegionEvent::PlayerEntered
            } else {
                RegionEvent::PlayerExited
            });
        }

        let mut seen = AHashSet::new();
        for entity in world.arena().iter_by_role(EntityRole::Hostile) {
            let id = entity.id();
            seen.insert(id);
            let inside = self.bounds.contains(entity.position());
            if inside && self.hostiles_inside.insert(id) {
                events.push(RegionEvent::HostileEntered(id));
            } else if !inside && self.hostiles_inside.remove(&id) {
                events.push(RegionEvent::HostileExited(id));
            }
        }

        // Hostiles that vanished while inside count as exits.
        let mut vanished: Vec<EntityId> = self
            .hostiles_inside
            .iter()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        vanished.sort_unstable();
        for id in vanished {
            self.hostiles_inside.remove(&id);
            events.push(RegionEvent::HostileExited(id));
        }

        if !events.is_empty() {
            trace!(count = events.len(), "region events");
        }
        events
    }
}
