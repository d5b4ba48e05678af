//! Scripted siege world.

use bastion_common::EntityId;
use bastion_siege::{ArenaWorld, RegionBounds, RegionEvent, RegionTrigger, SiegeWorld};
use glam::Vec2;
use tracing::debug;

use crate::config::SimConfig;

/// Player walking a closed loop of waypoints.
#[derive(Debug, Clone)]
pub struct Patrol {
    waypoints: Vec<Vec2>,
    next: usize,
    speed: f32,
    jitter: f32,
}

impl Patrol {
    /// Creates a patrol. An empty path leaves the player standing still.
    #[must_use]
    pub fn new(waypoints: Vec<Vec2>, speed: f32, jitter: f32) -> Self {
        Self {
            waypoints,
            next: 0,
            speed: speed.max(0.0),
            jitter: jitter.clamp(0.0, 0.9),
        }
    }

    /// Index of the waypoint being walked to.
    #[must_use]
    pub const fn next_waypoint(&self) -> usize {
        self.next
    }

    /// Position after walking for `dt` from `from`.
    pub fn step(&mut self, from: Vec2, dt: f32, rng: &mut fastrand::Rng) -> Vec2 {
        let Some(&target) = self.waypoints.get(self.next) else {
            return from;
        };
        let noise = 1.0 + self.jitter * (rng.f32() * 2.0 - 1.0);
        let reach = self.speed * noise * dt;

        let delta = target - from;
        let distance = delta.length();
        if distance <= reach {
            self.next = (self.next + 1) % self.waypoints.len();
            return target;
        }
        from + delta / distance * reach
    }
}

/// Arena world plus the scripted parts of a run.
#[derive(Debug)]
pub struct SimWorld {
    arena: ArenaWorld,
    trigger: RegionTrigger,
    patrol: Patrol,
    rng: fastrand::Rng,
    hostiles: Vec<EntityId>,
}

impl SimWorld {
    /// Builds the structure, player and hostile ring described by `config`.
    #[must_use]
    pub fn build(config: &SimConfig) -> Self {
        let bounds = RegionBounds::from_center(config.region_center, config.region_half_extents);
        let mut arena = ArenaWorld::new();

        arena.spawn_structure(bounds.center(), config.structure_health);
        let start = config
            .player_path
            .first()
            .copied()
            .unwrap_or(bounds.center());
        arena.spawn_player(start, config.player_health);

        let count = config.hostile_count;
        let hostiles = (0..count)
            .map(|i| {
                let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
                let offset = Vec2::from_angle(angle) * config.spawn_radius;
                arena.spawn_hostile(bounds.center() + offset, config.hostile_health)
            })
            .collect::<Vec<_>>();

        debug!(hostiles = hostiles.len(), "sim world built");

        Self {
            arena,
            trigger: RegionTrigger::new(bounds),
            patrol: Patrol::new(
                config.player_path.clone(),
                config.player_speed,
                config.patrol_jitter,
            ),
            rng: fastrand::Rng::with_seed(config.seed),
            hostiles,
        }
    }

    /// Entity storage handed to the orchestrator.
    pub fn arena_mut(&mut self) -> &mut ArenaWorld {
        &mut self.arena
    }

    /// Entity storage.
    #[must_use]
    pub const fn arena(&self) -> &ArenaWorld {
        &self.arena
    }

    /// Hostiles spawned at build time.
    #[must_use]
    pub fn hostiles(&self) -> &[EntityId] {
        &self.hostiles
    }

    /// Next simulated frame length with jitter applied.
    pub fn frame_time(&mut self, base: f32, jitter: f32) -> f32 {
        base * (1.0 + jitter * (self.rng.f32() * 2.0 - 1.0))
    }

    /// Walks the player along the patrol.
    pub fn step_player(&mut self, dt: f32) {
        let Some(id) = self.arena.player_id() else {
            return;
        };
        let Some(from) = self.arena.position_of(id) else {
            return;
        };
        let waypoint = self.patrol.next_waypoint();
        let to = self.patrol.step(from, dt, &mut self.rng);
        if self.patrol.next_waypoint() != waypoint {
            debug!(waypoint, "player reached waypoint");
        }
        if self.arena.set_position(id, to).is_err() {
            debug!(player = %id, "player missing from arena");
        }
    }

    /// Region membership changes since the last call.
    pub fn region_events(&mut self) -> Vec<RegionEvent> {
        self.trigger.scan(&self.arena)
    }

    /// Integrates applied velocities.
    pub fn integrate(&mut self, dt: f32) {
        self.arena.integrate(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_places_ring_outside_region() {
        let config = SimConfig::default();
        let world = SimWorld::build(&config);
        let bounds = RegionBounds::from_center(config.region_center, config.region_half_extents);

        assert_eq!(world.hostiles().len(), config.hostile_count as usize);
        for id in world.hostiles() {
            let pos = world.arena().position_of(*id).expect("hostile");
            assert!(!bounds.contains(pos));
            assert!((pos.distance(bounds.center()) - config.spawn_radius).abs() < 1e-3);
        }
        assert!(world.arena().home_structure().is_some());
        assert!(world.arena().player().is_some());
    }

    #[test]
    fn test_patrol_visits_waypoints_in_order() {
        let mut patrol = Patrol::new(vec![Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)], 10.0, 0.0);
        let mut rng = fastrand::Rng::with_seed(1);

        let p = patrol.step(Vec2::ZERO, 1.0, &mut rng);
        assert_eq!(p, Vec2::new(1.0, 0.0));
        assert_eq!(patrol.next_waypoint(), 1);

        let p = patrol.step(p, 1.0, &mut rng);
        assert_eq!(p, Vec2::new(1.0, 1.0));
        assert_eq!(patrol.next_waypoint(), 0);
    }

    #[test]
    fn test_patrol_partial_step() {
        let mut patrol = Patrol::new(vec![Vec2::new(10.0, 0.0)], 2.0, 0.0);
        let mut rng = fastrand::Rng::with_seed(1);
        let p = patrol.step(Vec2::ZERO, 0.5, &mut rng);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert_eq!(patrol.next_waypoint(), 0);
    }

    #[test]
    fn test_player_entry_reported() {
        let config = SimConfig::default();
        let mut world = SimWorld::build(&config);
        assert_eq!(world.region_events(), vec![RegionEvent::PlayerEntered]);
        assert!(world.region_events().is_empty());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let config = SimConfig::default();
        let mut a = SimWorld::build(&config);
        let mut b = SimWorld::build(&config);
        for _ in 0..10 {
            assert_eq!(a.frame_time(0.02, 0.1), b.frame_time(0.02, 0.1));
        }
    }
}
