//! # Bastion Siege
//!
//! Siege AI for hostiles attacking a defended region.
//!
//! This crate provides the per-tick decision layer for hostiles:
//! - Target selection between the player and the home structure
//! - Hysteresis steering (chase/hold) with orbit spacing around the player
//! - Knockback accumulation independent of targeting
//! - Windup/cooldown attacks with the region damage gate
//! - Region containment tracking
//! - Feedback cues for presentation
//! - An orchestrator tying the above together over a caller-supplied world
//! - An arena-backed world with a region trigger for headless runs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod attack;
pub mod entity;
pub mod feedback;
pub mod knockback;
pub mod orchestrator;
pub mod region;
pub mod steering;
pub mod structure;
pub mod targeting;
pub mod tuning;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::attack::*;
    pub use crate::entity::*;
    pub use crate::feedback::*;
    pub use crate::knockback::*;
    pub use crate::orchestrator::*;
    pub use crate::region::*;
    pub use crate::steering::*;
    pub use crate::structure::*;
    pub use crate::targeting::*;
    pub use crate::tuning::*;
    pub use crate::world::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_common::{EntityId, Vec2};

    #[test]
    fn test_gate_blocks_only_when_both_inside() {
        assert!(can_damage(false, false));
        assert!(can_damage(false, true));
        assert!(can_damage(true, false));
        assert!(!can_damage(true, true));
    }

    #[test]
    fn test_default_tuning_builds_orchestrator() {
        let orch: SiegeOrchestrator = SiegeOrchestrator::new(SiegeTuning::default(), None)
            .expect("default tuning is valid");
        assert_eq!(orch.hostile_count(), 0);
        assert!(orch.tracker().is_none());
    }

    #[test]
    fn test_zone_tracker_feeds_containment() {
        let hostile = EntityId::from_raw(7);
        let mut zone = ZoneTracker::new();
        zone.apply(RegionEvent::PlayerEntered);
        zone.apply(RegionEvent::HostileEntered(hostile));

        let c = Containment::capture(Some(&zone), hostile);
        assert!(c.enemy_inside && c.player_inside);

        let decision = TargetSelector::default().select(
            Vec2::ZERO,
            c,
            Some(&TargetRef::new(EntityId::from_raw(1), Vec2::X)),
            Some(&StructureCandidate::new(EntityId::from_raw(2), Vec2::Y, false)),
        );
        assert_eq!(decision.map(|d| d.target_type), Some(TargetType::Player));
    }
}
