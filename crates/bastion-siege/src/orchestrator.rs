//! Per-tick siege driver.
//!
//! The orchestrator owns every hostile's private state and runs the pipeline
//! once per fixed tick:
//!
//! 1. snapshot containment from the region tracker
//! 2. select a target for each hostile
//! 3. steer (radial + orbit) and add knockback
//! 4. hand the velocity to the physics mover
//! 5. advance the attack state machine
//!
//! Position integration, collision response and damage bookkeeping stay with
//! the caller's world.

use std::collections::BTreeMap;

use bastion_common::{angle_between, BastionResult, EntityId, Vec2};
use tracing::{debug, info, warn};

use crate::attack::{AttackContext, AttackController, AttackEvent, CombatWorld};
use crate::feedback::FeedbackSink;
use crate::knockback::KnockbackAccumulator;
use crate::region::{Containment, RegionTracker, ZoneTracker};
use crate::steering::{AngularGap, MovementSolver, SteerGoal, SteeringPhase, SteeringState};
use crate::targeting::{StructureCandidate, TargetDecision, TargetRef, TargetSelector};
use crate::tuning::SiegeTuning;

/// Receives the final velocity for each hostile once per tick.
pub trait PhysicsMover {
    /// Sets the velocity to integrate for `id` this tick.
    fn apply_velocity(&mut self, id: EntityId, velocity: Vec2);
}

/// Everything the orchestrator needs from the game world.
pub trait SiegeWorld: CombatWorld + PhysicsMover {
    /// Current position of an entity, or `None` once it is gone.
    fn position_of(&self, id: EntityId) -> Option<Vec2>;

    /// The defended player, if present.
    fn player(&self) -> Option<TargetRef>;

    /// The home structure, if present.
    fn home_structure(&self) -> Option<StructureCandidate>;
}

/// Private state of one hostile.
#[derive(Debug, Clone)]
pub struct HostileAgent {
    id: EntityId,
    gap_preference: f32,
    containment: Containment,
    steering: SteeringState,
    steer_target: Option<EntityId>,
    attack: AttackController,
    knockback: KnockbackAccumulator,
    decision: Option<TargetDecision>,
}

impl HostileAgent {
    fn new(id: EntityId, gap_preference: f32) -> Self {
        Self {
            id,
            gap_preference,
            containment: Containment::OUTSIDE,
            steering: SteeringState::new(),
            steer_target: None,
            attack: AttackController::new(),
            knockback: KnockbackAccumulator::new(),
            decision: None,
        }
    }

    /// Hostile ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Containment cached on the latest tick.
    #[must_use]
    pub const fn containment(&self) -> Containment {
        self.containment
    }

    /// Steering state.
    #[must_use]
    pub const fn steering(&self) -> &SteeringState {
        &self.steering
    }

    /// Attack state machine.
    #[must_use]
    pub const fn attack(&self) -> &AttackController {
        &self.attack
    }

    /// Pending knockback.
    #[must_use]
    pub const fn knockback(&self) -> &KnockbackAccumulator {
        &self.knockback
    }

    /// Target decision from the latest tick.
    #[must_use]
    pub const fn decision(&self) -> Option<&TargetDecision> {
        self.decision.as_ref()
    }
}

/// Counters for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickSummary {
    /// Hostiles processed
    pub hostiles: usize,
    /// Hostiles dropped because the world no longer has them
    pub pruned: usize,
    /// Windups started
    pub windups_started: u32,
    /// Unique targets damaged
    pub hits: u32,
    /// Structure hits
    pub structure_hits: u32,
    /// Player hits
    pub player_hits: u32,
    /// Total damage applied
    pub damage: f32,
}

/// One-time diagnostics.
#[derive(Debug, Default, Clone, Copy)]
struct DiagnosticLatch {
    missing_tracker: bool,
    missing_structure: bool,
}

/// Drives target selection, steering, knockback and attacks for all hostiles.
#[derive(Debug)]
pub struct SiegeOrchestrator<R: RegionTracker = ZoneTracker> {
    tuning: SiegeTuning,
    selector: TargetSelector,
    solver: MovementSolver,
    tracker: Option<R>,
    hostiles: BTreeMap<EntityId, HostileAgent>,
    spawned: u32,
    latch: DiagnosticLatch,
}

/// Orbit preference for the n-th spawned hostile: alternating sides, shrinking magnitude.
#[must_use]
pub fn gap_preference_for(index: u32) -> f32 {
    let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
    let step = (index / 2) % 4;
    sign * (1.0 - 0.25 * step as f32)
}

impl<R: RegionTracker> SiegeOrchestrator<R> {
    /// Creates an orchestrator. `tracker` may be absent.
    pub fn new(tuning: SiegeTuning, tracker: Option<R>) -> BastionResult<Self> {
        tuning.validate()?;
        Ok(Self {
            selector: TargetSelector::new(tuning.selector),
            solver: MovementSolver::new(tuning.steering),
            tuning,
            tracker,
            hostiles: BTreeMap::new(),
            spawned: 0,
            latch: DiagnosticLatch::default(),
        })
    }

    /// Emits start-up diagnostics against the current world.
    pub fn initialize<W: SiegeWorld + ?Sized>(&mut self, world: &W) {
        info!(
            hostiles = self.hostiles.len(),
            structure_targeting = self.tuning.structure_targeting,
            "siege orchestrator initialized"
        );
        self.check_tracker();
        if self.tuning.structure_targeting && world.home_structure().is_none() {
            self.warn_missing_structure();
        }
    }

    /// Active tuning.
    #[must_use]
    pub const fn tuning(&self) -> &SiegeTuning {
        &self.tuning
    }

    /// The region tracker, if one was supplied.
    #[must_use]
    pub fn tracker(&self) -> Option<&R> {
        self.tracker.as_ref()
    }

    /// Mutable region tracker for feeding trigger events.
    pub fn tracker_mut(&mut self) -> Option<&mut R> {
        self.tracker.as_mut()
    }

    /// Registers a hostile with an automatically assigned orbit preference.
    pub fn spawn_hostile(&mut self, id: EntityId) {
        let preference = gap_preference_for(self.spawned);
        self.spawn_hostile_with_gap(id, preference);
    }

    /// Registers a hostile with an explicit orbit preference.
    pub fn spawn_hostile_with_gap(&mut self, id: EntityId, gap_preference: f32) {
        self.spawned = self.spawned.wrapping_add(1);
        self.hostiles.insert(id, HostileAgent::new(id, gap_preference));
        debug!(hostile = %id, gap_preference, "hostile registered");
    }

    /// Discards a hostile's state. Any windup in progress never lands.
    pub fn despawn_hostile(&mut self, id: EntityId) -> bool {
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.forget(id);
        }
        self.hostiles.remove(&id).is_some()
    }

    /// Adds a knockback impulse to a hostile. Returns false for unknown hostiles.
    pub fn apply_knockback(&mut self, id: EntityId, direction: Vec2, magnitude: f32) -> bool {
        match self.hostiles.get_mut(&id) {
            Some(agent) => {
                agent.knockback.add_impulse(direction, magnitude);
                true
            },
            None => false,
        }
    }

    /// Read access to a hostile's state.
    #[must_use]
    pub fn hostile(&self, id: EntityId) -> Option<&HostileAgent> {
        self.hostiles.get(&id)
    }

    /// All registered hostiles in ID order.
    pub fn hostiles(&self) -> impl Iterator<Item = &HostileAgent> {
        self.hostiles.values()
    }

    /// Number of registered hostiles.
    #[must_use]
    pub fn hostile_count(&self) -> usize {
        self.hostiles.len()
    }

    /// Runs one fixed tick of `elapsed` seconds.
    pub fn tick<W, F>(&mut self, elapsed: f32, world: &mut W, feedback: &F) -> TickSummary
    where
        W: SiegeWorld + ?Sized,
        F: FeedbackSink + ?Sized,
    {
        let dt = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let mut summary = TickSummary::default();

        self.check_tracker();

        let gone: Vec<EntityId> = self
            .hostiles
            .keys()
            .filter(|id| world.position_of(**id).is_none())
            .copied()
            .collect();
        for id in &gone {
            self.despawn_hostile(*id);
        }
        summary.pruned = gone.len();
        if summary.pruned > 0 {
            debug!(pruned = summary.pruned, "dropped hostiles missing from world");
        }

        let player = world.player();
        let home = if self.tuning.structure_targeting {
            let home = world.home_structure();
            if home.is_none() {
                self.warn_missing_structure();
            }
            home
        } else {
            None
        };

        // Decisions first so orbit spacing can see every hostile's bearing.
        let mut plans = Vec::with_capacity(self.hostiles.len());
        for agent in self.hostiles.values_mut() {
            let Some(position) = world.position_of(agent.id) else {
                continue;
            };
            agent.containment = Containment::capture(self.tracker.as_ref(), agent.id);
            agent.decision =
                self.selector
                    .select(position, agent.containment, player.as_ref(), home.as_ref());
            plans.push((agent.id, position, agent.decision));
        }

        for (index, &(id, position, decision)) in plans.iter().enumerate() {
            let Some(agent) = self.hostiles.get_mut(&id) else {
                continue;
            };
            summary.hostiles += 1;

            let target_id = decision.map(|d| d.steer_target.id);
            if target_id != agent.steer_target {
                if target_id.is_some() {
                    agent.steering.retarget();
                }
                agent.steer_target = target_id;
            }

            let goal = decision.map(|d| SteerGoal::new(d.steer_target.position, d.target_type));
            let gap = AngularGap {
                preference: agent.gap_preference,
                other: nearest_bearing_gap(index, &plans),
            };

            let previous_phase = agent.steering.phase;
            let steer = self
                .solver
                .compute(position, goal.as_ref(), gap, &mut agent.steering);
            if agent.steering.phase != previous_phase {
                debug!(
                    hostile = %id,
                    phase = ?agent.steering.phase,
                    distance = ?agent.steering.previous_distance,
                    "steering phase changed"
                );
            }

            let knockback = agent.knockback.consume(dt, &self.tuning.knockback);
            world.apply_velocity(id, steer.combined() + knockback);

            let ctx = AttackContext {
                attacker: id,
                position,
                holding: agent.steering.phase == SteeringPhase::Hold,
                containment: agent.containment,
                target: decision.map(|d| (d.attack_target, d.target_type)),
            };
            match agent
                .attack
                .tick(dt, &self.tuning.attack, &ctx, world, feedback)
            {
                AttackEvent::WindupStarted => summary.windups_started += 1,
                AttackEvent::Resolved(r) => {
                    summary.hits += r.hits;
                    summary.structure_hits += r.structure_hits;
                    summary.player_hits += r.player_hits;
                    summary.damage += r.damage;
                },
                AttackEvent::Idle | AttackEvent::Recovered => {},
            }
        }

        summary
    }

    fn check_tracker(&mut self) {
        if self.tracker.is_none() && !self.latch.missing_tracker {
            self.latch.missing_tracker = true;
            warn!("no region tracker supplied; treating every hostile and the player as outside");
        }
    }

    fn warn_missing_structure(&mut self) {
        if !self.latch.missing_structure {
            self.latch.missing_structure = true;
            warn!("structure targeting enabled but no home structure found; targeting player only");
        }
    }
}

/// Smallest bearing separation between plan `index` and any other hostile
/// steering toward the same target. `PI` when alone.
fn nearest_bearing_gap(index: usize, plans: &[(EntityId, Vec2, Option<TargetDecision>)]) -> f32 {
    let (_, position, Some(decision)) = plans[index] else {
        return std::f32::consts::PI;
    };
    let center = decision.steer_target.position;
    let offset = position - center;
    if offset == Vec2::ZERO {
        return std::f32::consts::PI;
    }
    let bearing = offset.y.atan2(offset.x);

    plans
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .filter_map(|(_, &(_, other_pos, other_decision))| {
            let other_decision = other_decision?;
            if other_decision.steer_target.id != decision.steer_target.id {
                return None;
            }
            let o = other_pos - center;
            (o != Vec2::ZERO).then(|| angle_between(bearing, o.y.atan2(o.x)))
        })
        .fold(std::f32::consts::PI, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::{Damageable, ProximityHit};
    use crate::entity::{EntityRole, Health};
    use crate::feedback::{FeedbackBus, FeedbackCue};
    use crate::region::RegionEvent;
    use crate::structure::StructureHealth;
    use crate::targeting::TargetType;

    const DT: f32 = 1.0 / 30.0;

    struct Hostile {
        id: EntityId,
        position: Vec2,
    }

    struct TestWorld {
        player: Option<(EntityId, Vec2, Health)>,
        structure: Option<(EntityId, Vec2, StructureHealth)>,
        hostiles: Vec<Hostile>,
        velocities: BTreeMap<EntityId, Vec2>,
    }

    impl TestWorld {
        fn new() -> Self {
            Self {
                player: Some((EntityId::from_raw(1), Vec2::new(0.0, 0.0), Health::new(50.0))),
                structure: Some((
                    EntityId::from_raw(2),
                    Vec2::new(0.0, 0.0),
                    StructureHealth::new(5.0),
                )),
                hostiles: Vec::new(),
                velocities: BTreeMap::new(),
            }
        }

        fn add_hostile(&mut self, raw: u64, position: Vec2) -> EntityId {
            let id = EntityId::from_raw(raw);
            self.hostiles.push(Hostile { id, position });
            id
        }

        fn integrate(&mut self, dt: f32) {
            for h in &mut self.hostiles {
                if let Some(v) = self.velocities.get(&h.id) {
                    h.position += *v * dt;
                }
            }
        }
    }

    impl PhysicsMover for TestWorld {
        fn apply_velocity(&mut self, id: EntityId, velocity: Vec2) {
            self.velocities.insert(id, velocity);
        }
    }

    impl CombatWorld for TestWorld {
        fn query_proximity(&self, origin: Vec2, radius: f32) -> Vec<ProximityHit> {
            let mut hits = Vec::new();
            if let Some((id, pos, _)) = self.structure {
                if pos.distance(origin) <= radius {
                    hits.push(ProximityHit { id, role: EntityRole::Structure, position: pos });
                }
            }
            if let Some((id, pos, _)) = self.player {
                if pos.distance(origin) <= radius {
                    hits.push(ProximityHit { id, role: EntityRole::Player, position: pos });
                }
            }
            hits
        }

        fn damageable_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
            if let Some((sid, _, health)) = self.structure.as_mut() {
                if *sid == id {
                    return Some(health);
                }
            }
            if let Some((pid, _, health)) = self.player.as_mut() {
                if *pid == id {
                    return Some(health);
                }
            }
            None
        }
    }

    impl SiegeWorld for TestWorld {
        fn position_of(&self, id: EntityId) -> Option<Vec2> {
            self.hostiles.iter().find(|h| h.id == id).map(|h| h.position)
        }

        fn player(&self) -> Option<TargetRef> {
            self.player.map(|(id, pos, _)| TargetRef::new(id, pos))
        }

        fn home_structure(&self) -> Option<StructureCandidate> {
            self.structure
                .map(|(id, pos, health)| StructureCandidate::new(id, pos, health.is_broken()))
        }
    }

    #[test]
    fn test_gap_preferences_alternate_and_never_zero() {
        let prefs: Vec<f32> = (0..8).map(gap_preference_for).collect();
        assert_eq!(prefs[0], 1.0);
        assert_eq!(prefs[1], -1.0);
        assert_eq!(prefs[2], 0.75);
        assert_eq!(prefs[7], -0.25);
        assert!(prefs.iter().all(|p| *p != 0.0));
    }

    #[test]
    fn test_missing_tracker_degrades_to_outside() {
        let mut world = TestWorld::new();
        let id = world.add_hostile(100, Vec2::new(10.0, 0.0));
        let mut orch: SiegeOrchestrator =
            SiegeOrchestrator::new(SiegeTuning::default(), None).expect("valid tuning");
        orch.spawn_hostile(id);
        orch.initialize(&world);

        let summary = orch.tick(DT, &mut world, &FeedbackBus::default());
        assert_eq!(summary.hostiles, 1);

        let agent = orch.hostile(id).expect("registered");
        assert_eq!(agent.containment(), Containment::OUTSIDE);
        assert_eq!(
            agent.decision().map(|d| d.target_type),
            Some(TargetType::Structure)
        );
        assert!(world.velocities[&id].x < 0.0);
    }

    #[test]
    fn test_breached_hostile_switches_to_player() {
        let mut world = TestWorld::new();
        world.player = Some((EntityId::from_raw(1), Vec2::new(0.0, 5.0), Health::new(50.0)));
        let id = world.add_hostile(100, Vec2::new(3.0, 0.0));

        let mut orch = SiegeOrchestrator::new(SiegeTuning::default(), Some(ZoneTracker::new()))
            .expect("valid tuning");
        orch.spawn_hostile(id);

        orch.tick(DT, &mut world, &FeedbackBus::default());
        assert_eq!(
            orch.hostile(id).and_then(|a| a.decision()).map(|d| d.target_type),
            Some(TargetType::Structure)
        );

        orch.tracker_mut()
            .expect("tracker")
            .apply(RegionEvent::HostileEntered(id));
        orch.tick(DT, &mut world, &FeedbackBus::default());

        let agent = orch.hostile(id).expect("registered");
        assert!(agent.containment().enemy_inside);
        assert_eq!(agent.decision().map(|d| d.target_type), Some(TargetType::Player));
    }

    #[test]
    fn test_knockback_without_target_moves_hostile() {
        let mut world = TestWorld::new();
        world.player = None;
        world.structure = None;
        let id = world.add_hostile(100, Vec2::new(3.0, 0.0));

        let mut orch: SiegeOrchestrator =
            SiegeOrchestrator::new(SiegeTuning::default(), None).expect("valid tuning");
        orch.spawn_hostile(id);
        assert!(orch.apply_knockback(id, Vec2::new(1.0, 0.0), 4.0));

        orch.tick(DT, &mut world, &FeedbackBus::default());
        assert!(orch.hostile(id).and_then(|a| a.decision()).is_none());
        let v = world.velocities[&id];
        assert!(v.length() > 0.0);

        world.integrate(DT);
        assert!(world.position_of(id).expect("present").x > 3.0);
    }

    #[test]
    fn test_unknown_hostile_knockback_rejected() {
        let mut orch: SiegeOrchestrator =
            SiegeOrchestrator::new(SiegeTuning::default(), None).expect("valid tuning");
        assert!(!orch.apply_knockback(EntityId::from_raw(9), Vec2::X, 1.0));
    }

    #[test]
    fn test_hostile_missing_from_world_is_pruned() {
        let mut world = TestWorld::new();
        let id = world.add_hostile(100, Vec2::new(1.0, 0.0));
        let mut orch: SiegeOrchestrator =
            SiegeOrchestrator::new(SiegeTuning::default(), None).expect("valid tuning");
        orch.spawn_hostile(id);

        world.hostiles.clear();
        let summary = orch.tick(DT, &mut world, &FeedbackBus::default());
        assert_eq!(summary.pruned, 1);
        assert_eq!(orch.hostile_count(), 0);
    }

    #[test]
    fn test_siege_damages_structure_until_broken_then_targets_player() {
        let mut world = TestWorld::new();
        world.player = Some((EntityId::from_raw(1), Vec2::new(0.0, 30.0), Health::new(50.0)));
        let id = world.add_hostile(100, Vec2::new(8.0, 0.0));
        let bus = FeedbackBus::new(4096);

        let mut orch = SiegeOrchestrator::new(SiegeTuning::default(), Some(ZoneTracker::new()))
            .expect("valid tuning");
        orch.spawn_hostile(id);

        let mut total = TickSummary::default();
        for _ in 0..2000 {
            let s = orch.tick(DT, &mut world, &bus);
            total.structure_hits += s.structure_hits;
            world.integrate(DT);
            if world.structure.is_some_and(|(_, _, h)| h.is_broken()) {
                break;
            }
        }

        assert_eq!(total.structure_hits, 5);
        let cues = bus.drain();
        assert_eq!(
            cues.iter()
                .filter(|c| matches!(c, FeedbackCue::StructureBroken { .. }))
                .count(),
            1
        );

        orch.tick(DT, &mut world, &bus);
        assert_eq!(
            orch.hostile(id).and_then(|a| a.decision()).map(|d| d.target_type),
            Some(TargetType::Player)
        );
    }

    #[test]
    fn test_despawn_mid_windup_applies_no_damage() {
        let mut world = TestWorld::new();
        let id = world.add_hostile(100, Vec2::new(1.5, 0.0));
        let bus = FeedbackBus::new(64);
        let mut orch: SiegeOrchestrator =
            SiegeOrchestrator::new(SiegeTuning::default(), None).expect("valid tuning");
        orch.spawn_hostile(id);

        let s = orch.tick(DT, &mut world, &bus);
        assert_eq!(s.windups_started, 1);

        assert!(orch.despawn_hostile(id));
        for _ in 0..60 {
            orch.tick(DT, &mut world, &bus);
        }
        assert_eq!(world.structure.expect("structure").2.current(), 5.0);
    }

    #[test]
    fn test_target_switch_restarts_chase() {
        let mut world = TestWorld::new();
        world.player = Some((EntityId::from_raw(1), Vec2::new(0.0, 30.0), Health::new(50.0)));
        let id = world.add_hostile(100, Vec2::new(1.5, 0.0));
        let mut orch: SiegeOrchestrator =
            SiegeOrchestrator::new(SiegeTuning::default(), None).expect("valid tuning");
        orch.spawn_hostile(id);

        orch.tick(DT, &mut world, &FeedbackBus::default());
        assert!(orch.hostile(id).expect("registered").steering().is_holding());

        world.structure = Some((EntityId::from_raw(2), Vec2::ZERO, StructureHealth::new(0.0)));
        orch.tick(DT, &mut world, &FeedbackBus::default());

        let agent = orch.hostile(id).expect("registered");
        assert_eq!(agent.decision().map(|d| d.target_type), Some(TargetType::Player));
        assert_eq!(agent.steering().phase, SteeringPhase::Chase);
        assert_eq!(agent.steering().outrun_counter, 0);
        // Full chase speed toward the player, not hold correction.
        assert!(world.velocities[&id].y > 3.5);
    }

    #[test]
    fn test_forgotten_hostiles_leave_tracker() {
        let mut world = TestWorld::new();
        let pruned = world.add_hostile(100, Vec2::new(1.0, 0.0));
        let despawned = world.add_hostile(101, Vec2::new(-1.0, 0.0));

        let mut orch = SiegeOrchestrator::new(SiegeTuning::default(), Some(ZoneTracker::new()))
            .expect("valid tuning");
        orch.spawn_hostile(pruned);
        orch.spawn_hostile(despawned);
        orch.tracker_mut().expect("tracker").apply_all([
            RegionEvent::HostileEntered(pruned),
            RegionEvent::HostileEntered(despawned),
        ]);
        orch.tick(DT, &mut world, &FeedbackBus::default());
        assert_eq!(orch.tracker().expect("tracker").hostiles_inside(), 2);

        assert!(orch.despawn_hostile(despawned));
        world.hostiles.retain(|h| h.id != pruned);
        let summary = orch.tick(DT, &mut world, &FeedbackBus::default());

        assert_eq!(summary.pruned, 1);
        assert_eq!(orch.hostile_count(), 0);
        assert_eq!(orch.tracker().expect("tracker").hostiles_inside(), 0);
    }

    #[test]
    fn test_orbit_spacing_gap() {
        let target = TargetRef::new(EntityId::from_raw(1), Vec2::ZERO);
        let decision = Some(TargetDecision {
            steer_target: target,
            attack_target: target,
            target_type: TargetType::Player,
            near_gate: false,
        });
        let plans = vec![
            (EntityId::from_raw(10), Vec2::new(1.0, 0.0), decision),
            (EntityId::from_raw(11), Vec2::new(0.0, 1.0), decision),
            (EntityId::from_raw(12), Vec2::new(-1.0, 0.0), None),
        ];

        let gap = nearest_bearing_gap(0, &plans);
        assert!((gap - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(nearest_bearing_gap(2, &plans), std::f32::consts::PI);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let mut tuning = SiegeTuning::default();
        tuning.steering.release_margin = 0.0;
        assert!(SiegeOrchestrator::<ZoneTracker>::new(tuning, None).is_err());
    }
}
