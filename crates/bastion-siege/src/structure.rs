//! Defended structure health.

use serde::{Deserialize, Serialize};

/// Result of applying damage to a structure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub applied: f32,
    /// Whether this hit took the target from intact to broken.
    pub broke: bool,
}

impl DamageOutcome {
    /// Outcome for a hit that changed nothing.
    pub const NONE: Self = Self {
        applied: 0.0,
        broke: false,
    };
}

/// Health of a defended structure. Broken once `current <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureHealth {
    current: f32,
    max: f32,
}

impl StructureHealth {
    /// Creates a structure at full health.
    #[must_use]
    pub fn new(max: f32) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        Self { current: max, max }
    }

    /// Current health.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Maximum health.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Whether the structure is broken.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.current <= 0.0
    }

    /// Applies damage. Non-positive or non-finite amounts are ignored.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !amount.is_finite() || amount <= 0.0 || self.is_broken() {
            return DamageOutcome::NONE;
        }
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        DamageOutcome {
            applied: before - self.current,
            broke: self.is_broken(),
        }
    }

    /// Restores full health and clears the broken state.
    pub fn repair(&mut self) {
        self.current = self.max;
    }
}
