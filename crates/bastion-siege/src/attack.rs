//! Gated hostile attacks.
//!
//! This module provides:
//! - The containment gate deciding whether structure damage is allowed
//! - Attack phases (ready, windup, cooldown) driven by tick counters
//! - Hit resolution against a proximity query, deduplicated by target

use ahash::AHashSet;
use bastion_common::{finite_distance, EntityId, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::entity::{EntityRole, Health};
use crate::feedback::{FeedbackCue, FeedbackSink};
use crate::region::Containment;
use crate::structure::{DamageOutcome, StructureHealth};
use crate::targeting::{TargetRef, TargetType};

/// Whether a hostile may currently damage the home structure.
///
/// A hostile outside the region always may. One that breached the region may
/// keep hitting the structure only while the player is still outside.
#[must_use]
pub const fn can_damage(enemy_inside: bool, player_inside: bool) -> bool {
    !enemy_inside || !player_inside
}

/// Anything that can take damage.
pub trait Damageable {
    /// Applies damage and reports what happened.
    fn take_damage(&mut self, amount: f32) -> DamageOutcome;
}

impl Damageable for StructureHealth {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        StructureHealth::take_damage(self, amount)
    }
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let was_alive = !self.is_dead();
        let applied = self.damage(amount);
        DamageOutcome {
            applied,
            broke: was_alive && self.is_dead(),
        }
    }
}

/// One shape found by a proximity query. Multi-shape targets may appear more than once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityHit {
    /// Owning entity
    pub id: EntityId,
    /// Role of the owning entity
    pub role: EntityRole,
    /// Position reported with feedback cues
    pub position: Vec2,
}

/// World access needed to resolve an attack.
pub trait CombatWorld {
    /// Shapes within `radius` of `origin`.
    fn query_proximity(&self, origin: Vec2, radius: f32) -> Vec<ProximityHit>;

    /// Damage capability of an entity, if it still exists.
    fn damageable_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable>;
}

/// Attack tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackParams {
    /// Delay between committing to an attack and applying damage (seconds).
    pub windup_seconds: f32,
    /// Delay after damage before the next attack (seconds).
    pub cooldown_seconds: f32,
    /// Reach used for both the start check and hit resolution.
    pub attack_range: f32,
    /// Damage per hit.
    pub damage: f32,
}

impl Default for AttackParams {
    fn default() -> Self {
        Self {
            windup_seconds: 0.4,
            cooldown_seconds: 1.2,
            attack_range: 2.5,
            damage: 1.0,
        }
    }
}

/// Attack phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Free to start an attack.
    #[default]
    Ready,
    /// Committed; damage lands when the timer runs out.
    Windup,
    /// Recovering after an attack.
    Cooldown,
}

/// Per-hostile attack memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackState {
    /// Current phase
    pub phase: AttackPhase,
    /// Seconds left in the current phase
    pub timer: f32,
}

/// Inputs for one attack tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackContext {
    /// Attacking hostile
    pub attacker: EntityId,
    /// Attacker position
    pub position: Vec2,
    /// Steering is in `Hold`
    pub holding: bool,
    /// Containment snapshot for this tick
    pub containment: Containment,
    /// Current attack target and its classification
    pub target: Option<(TargetRef, TargetType)>,
}

/// Damage applied while resolving one windup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackResolution {
    /// Unique targets damaged
    pub hits: u32,
    /// Structure hits among them
    pub structure_hits: u32,
    /// Player hits among them
    pub player_hits: u32,
    /// Total damage applied
    pub damage: f32,
}

/// What changed on an attack tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackEvent {
    /// Nothing changed.
    Idle,
    /// A windup began.
    WindupStarted,
    /// A windup finished and hits were applied.
    Resolved(AttackResolution),
    /// Cooldown finished.
    Recovered,
}

/// Per-hostile attack state machine: `Ready -> Windup -> Cooldown -> Ready`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackController {
    state: AttackState,
}

impl AttackController {
    /// Creates a controller in `Ready`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AttackState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> AttackPhase {
        self.state.phase
    }

    /// Advances the state machine by `dt` seconds.
    pub fn tick<W: CombatWorld + ?Sized, F: FeedbackSink + ?Sized>(
        &mut self,
        dt: f32,
        params: &AttackParams,
        ctx: &AttackContext,
        world: &mut W,
        feedback: &F,
    ) -> AttackEvent {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.state.phase {
            AttackPhase::Ready => {
                if !Self::can_begin(params, ctx) {
                    return AttackEvent::Idle;
                }
                self.state = AttackState {
                    phase: AttackPhase::Windup,
                    timer: params.windup_seconds.max(0.0),
                };
                debug!(attacker = %ctx.attacker, "attack windup started");
                feedback.raise(FeedbackCue::WindupStarted {
                    attacker: ctx.attacker,
                    position: ctx.position,
                });
                AttackEvent::WindupStarted
            },
            AttackPhase::Windup => {
                self.state.timer -= dt;
                if self.state.timer > 0.0 {
                    return AttackEvent::Idle;
                }
                let resolution = Self::resolve(params, ctx, world, feedback);
                self.state = AttackState {
                    phase: AttackPhase::Cooldown,
                    timer: params.cooldown_seconds.max(0.0),
                };
                AttackEvent::Resolved(resolution)
            },
            AttackPhase::Cooldown => {
                self.state.timer -= dt;
                if self.state.timer > 0.0 {
                    return AttackEvent::Idle;
                }
                self.state = AttackState::default();
                AttackEvent::Recovered
            },
        }
    }

    fn can_begin(params: &AttackParams, ctx: &AttackContext) -> bool {
        if !ctx.holding || !params.attack_range.is_finite() || params.attack_range <= 0.0 {
            return false;
        }
        let Some((target, target_type)) = ctx.target else {
            return false;
        };
        if target_type == TargetType::Structure
            && !can_damage(ctx.containment.enemy_inside, ctx.containment.player_inside)
        {
            return false;
        }
        finite_distance(ctx.position, target.position)
            .is_some_and(|distance| distance <= params.attack_range)
    }

    fn resolve<W: CombatWorld + ?Sized, F: FeedbackSink + ?Sized>(
        params: &AttackParams,
        ctx: &AttackContext,
        world: &mut W,
        feedback: &F,
    ) -> AttackResolution {
        let mut resolution = AttackResolution::default();
        if !params.attack_range.is_finite() || params.attack_range <= 0.0 {
            return resolution;
        }

        let gate_open = can_damage(ctx.containment.enemy_inside, ctx.containment.player_inside);
        let mut seen = AHashSet::new();

        for hit in world.query_proximity(ctx.position, params.attack_range) {
            if hit.id == ctx.attacker
                || !hit.role.is_attackable_by_hostiles()
                || !seen.insert(hit.id)
            {
                continue;
            }
            if hit.role == EntityRole::Structure && !gate_open {
                trace!(attacker = %ctx.attacker, target = %hit.id, "structure damage gated");
                continue;
            }
            let Some(target) = world.damageable_mut(hit.id) else {
                continue;
            };
            let outcome = target.take_damage(params.damage);
            if outcome.applied <= 0.0 {
                continue;
            }

            resolution.hits += 1;
            resolution.damage += outcome.applied;
            match hit.role {
                EntityRole::Structure => {
                    resolution.structure_hits += 1;
                    feedback.raise(FeedbackCue::StructureHit {
                        structure: hit.id,
                        attacker: ctx.attacker,
                        position: hit.position,
                        amount: outcome.applied,
                    });
                    if outcome.broke {
                        debug!(structure = %hit.id, "structure broken");
                        feedback.raise(FeedbackCue::StructureBroken {
                            structure: hit.id,
                            position: hit.position,
                        });
                    }
                },
                EntityRole::Player => {
                    resolution.player_hits += 1;
                    feedback.raise(FeedbackCue::PlayerHit {
                        player: hit.id,
                        attacker: ctx.attacker,
                        position: hit.position,
                        amount: outcome.applied,
                    });
                },
                EntityRole::Hostile => {},
            }
        }

        debug!(attacker = %ctx.attacker, hits = resolution.hits, "attack resolved");
        resolution
    }
}
