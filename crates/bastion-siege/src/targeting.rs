//! Target selection for hostiles.
//!
//! Selection is a pure function of the hostile's position, its containment
//! flags and the available candidates. Nothing here is cached between ticks.

use bastion_common::{EntityId, Vec2};
use serde::{Deserialize, Serialize};

use crate::region::Containment;

/// Classification of what a hostile is engaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// The defending player (mobile, orbited).
    Player,
    /// The home structure (stationary, never orbited).
    Structure,
}

/// A candidate target: identity plus current position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRef {
    /// Entity ID
    pub id: EntityId,
    /// Current position
    pub position: Vec2,
}

impl TargetRef {
    /// Creates a target reference.
    #[must_use]
    pub const fn new(id: EntityId, position: Vec2) -> Self {
        Self { id, position }
    }
}

/// The home structure as seen by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureCandidate {
    /// Identity and position
    pub target: TargetRef,
    /// Whether the structure is broken
    pub broken: bool,
}

impl StructureCandidate {
    /// Creates a structure candidate.
    #[must_use]
    pub const fn new(id: EntityId, position: Vec2, broken: bool) -> Self {
        Self {
            target: TargetRef::new(id, position),
            broken,
        }
    }
}

/// What a hostile steers toward and attacks this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetDecision {
    /// Where steering goes
    pub steer_target: TargetRef,
    /// What the attack controller aims at
    pub attack_target: TargetRef,
    /// Classification of the target
    pub target_type: TargetType,
    /// The hostile is within the pass-through radius of the home structure
    pub near_gate: bool,
}

impl TargetDecision {
    fn engage(target: TargetRef, target_type: TargetType, near_gate: bool) -> Self {
        Self {
            steer_target: target,
            attack_target: target,
            target_type,
            near_gate,
        }
    }
}

/// Selector tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorParams {
    /// Radius around the home structure treated as the gate opening.
    pub pass_through_radius: f32,
}

impl Default for SelectorParams {
    fn default() -> Self {
        Self {
            pass_through_radius: 1.5,
        }
    }
}

/// Chooses between the player and the home structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetSelector {
    params: SelectorParams,
}

impl TargetSelector {
    /// Creates a selector.
    #[must_use]
    pub const fn new(params: SelectorParams) -> Self {
        Self { params }
    }

    /// Selector tunables.
    #[must_use]
    pub const fn params(&self) -> &SelectorParams {
        &self.params
    }

    /// Picks the target for one hostile.
    ///
    /// Returns `None` only when there is nothing to engage: no player and no
    /// intact structure.
    #[must_use]
    pub fn select(
        &self,
        enemy_position: Vec2,
        containment: Containment,
        player: Option<&TargetRef>,
        home_structure: Option<&StructureCandidate>,
    ) -> Option<TargetDecision> {
        let near_gate = home_structure.is_some_and(|s| {
            enemy_position.distance(s.target.position) <= self.params.pass_through_radius
        });

        let intact = home_structure.filter(|s| !s.broken);

        match (intact, player) {
            // Nothing left to defend: the player is the only target.
            (None, Some(p)) => Some(TargetDecision::engage(*p, TargetType::Player, near_gate)),
            (None, None) => None,
            // A hostile that breached the region goes for the player.
            (Some(_), Some(p)) if containment.enemy_inside => {
                Some(TargetDecision::engage(*p, TargetType::Player, near_gate))
            },
            (Some(s), _) => Some(TargetDecision::engage(
                s.target,
                TargetType::Structure,
                near_gate,
            )),
        }
    }
}
