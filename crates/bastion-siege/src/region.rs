//! Protected region membership.
//!
//! This module provides:
//! - The `RegionTracker` contract consumed by the siege core
//! - Per-hostile cached containment flags
//! - `ZoneTracker`, an event-driven tracker fed by an external spatial trigger
//! - `RegionBounds` for callers that need to run the trigger themselves

use ahash::AHashSet;
use bastion_common::{EntityId, Vec2};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Reports whether hostiles and the player are inside the protected region.
pub trait RegionTracker {
    /// Whether the given hostile is inside the region.
    fn is_inside(&self, hostile: EntityId) -> bool;

    /// Whether the defended player is inside the region.
    fn is_player_inside(&self) -> bool;

    /// Drops any membership held for a hostile that no longer exists.
    fn forget(&mut self, _hostile: EntityId) {}
}

/// Containment flags for one hostile, captured once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containment {
    /// The hostile is inside the region.
    pub enemy_inside: bool,
    /// The player is inside the region.
    pub player_inside: bool,
}

impl Containment {
    /// Flags used when no tracker is available.
    pub const OUTSIDE: Self = Self {
        enemy_inside: false,
        player_inside: false,
    };

    /// Creates containment flags.
    #[must_use]
    pub const fn new(enemy_inside: bool, player_inside: bool) -> Self {
        Self {
            enemy_inside,
            player_inside,
        }
    }

    /// Reads a snapshot for `hostile`, defaulting to outside without a tracker.
    #[must_use]
    pub fn capture<R: RegionTracker + ?Sized>(tracker: Option<&R>, hostile: EntityId) -> Self {
        tracker.map_or(Self::OUTSIDE, |t| Self {
            enemy_inside: t.is_inside(hostile),
            player_inside: t.is_player_inside(),
        })
    }
}

/// Membership change reported by a spatial trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionEvent {
    /// A hostile crossed into the region.
    HostileEntered(EntityId),
    /// A hostile left the region.
    HostileExited(EntityId),
    /// The player crossed into the region.
    PlayerEntered,
    /// The player left the region.
    PlayerExited,
}

/// Event-driven region tracker.
///
/// Membership only changes through `apply`, so every read within a tick sees
/// the same snapshot.
#[derive(Debug, Default, Clone)]
pub struct ZoneTracker {
    inside: AHashSet<EntityId>,
    player_inside: bool,
}

impl ZoneTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one membership event.
    pub fn apply(&mut self, event: RegionEvent) {
        trace!(?event, "region event");
        match event {
            RegionEvent::HostileEntered(id) => {
                self.inside.insert(id);
            },
            RegionEvent::HostileExited(id) => {
                self.inside.remove(&id);
            },
            RegionEvent::PlayerEntered => self.player_inside = true,
            RegionEvent::PlayerExited => self.player_inside = false,
        }
    }

    /// Applies a batch of events in order.
    pub fn apply_all<I: IntoIterator<Item = RegionEvent>>(&mut self, events: I) {
        for event in events {
            self.apply(event);
        }
    }

    /// Number of hostiles inside.
    #[must_use]
    pub fn hostiles_inside(&self) -> usize {
        self.inside.len()
    }
}

impl RegionTracker for ZoneTracker {
    fn is_inside(&self, hostile: EntityId) -> bool {
        self.inside.contains(&hostile)
    }

    fn is_player_inside(&self) -> bool {
        self.player_inside
    }

    fn forget(&mut self, hostile: EntityId) {
        if self.inside.remove(&hostile) {
            trace!(%hostile, "forgot hostile inside region");
        }
    }
}

/// Axis-aligned rectangle describing the protected region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl RegionBounds {
    /// Creates bounds from two corners in any order.
    #[must_use]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates bounds from a center and half-extents.
    #[must_use]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents.abs(), center + half_extents.abs())
    }

    /// Center of the region.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether a point lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::from_center(Vec2::ZERO, Vec2::splat(8.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_without_tracker_is_outside() {
        let flags = Containment::capture::<ZoneTracker>(None, EntityId::from_raw(1));
        assert_eq!(flags, Containment::OUTSIDE);
    }

    #[test]
    fn test_zone_tracker_events() {
        let mut tracker = ZoneTracker::new();
        let a = EntityId::from_raw(1);
        let b = EntityId::from_raw(2);

        tracker.apply_all([
            RegionEvent::HostileEntered(a),
            RegionEvent::HostileEntered(b),
            RegionEvent::PlayerEntered,
        ]);
        assert!(tracker.is_inside(a));
        assert!(tracker.is_player_inside());
        assert_eq!(tracker.hostiles_inside(), 2);

        tracker.apply(RegionEvent::HostileExited(a));
        tracker.apply(RegionEvent::PlayerExited);
        assert!(!tracker.is_inside(a));
        assert!(tracker.is_inside(b));
        assert!(!tracker.is_player_inside());

        tracker.forget(b);
        assert_eq!(tracker.hostiles_inside(), 0);
    }

    #[test]
    fn test_capture_with_tracker() {
        let mut tracker = ZoneTracker::new();
        let id = EntityId::from_raw(3);
        tracker.apply(RegionEvent::HostileEntered(id));

        let flags = Containment::capture(Some(&tracker), id);
        assert_eq!(flags, Containment::new(true, false));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = RegionBounds::new(Vec2::new(4.0, 4.0), Vec2::new(-4.0, -4.0));
        assert_eq!(bounds.min, Vec2::new(-4.0, -4.0));
        assert!(bounds.contains(Vec2::ZERO));
        assert!(bounds.contains(Vec2::new(4.0, -4.0)));
        assert!(!bounds.contains(Vec2::new(4.1, 0.0)));
        assert_eq!(bounds.center(), Vec2::ZERO);
    }
}
