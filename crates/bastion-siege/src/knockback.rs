//! Knockback impulses.
//!
//! Knockback is an additive velocity term that lives beside steering. It is
//! applied every tick whether or not the hostile has a target.

use bastion_common::{clamp_length, safe_direction, Vec2};
use serde::{Deserialize, Serialize};

/// Knockback tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackParams {
    /// Fraction of the impulse velocity lost per second.
    pub decay_per_second: f32,
    /// Speeds below this snap to zero.
    pub rest_speed: f32,
    /// Upper bound on accumulated impulse speed.
    pub max_speed: f32,
}

impl Default for KnockbackParams {
    fn default() -> Self {
        Self {
            decay_per_second: 6.0,
            rest_speed: 0.05,
            max_speed: 20.0,
        }
    }
}

/// One knockback impulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnockbackImpulse {
    /// Push direction (need not be normalized)
    pub direction: Vec2,
    /// Push speed
    pub magnitude: f32,
}

impl KnockbackImpulse {
    /// Velocity contributed by this impulse, or zero if degenerate.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        if !self.magnitude.is_finite() || self.magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        safe_direction(self.direction) * self.magnitude
    }
}

/// Accumulated knockback velocity for one hostile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnockbackAccumulator {
    velocity: Vec2,
}

impl KnockbackAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an impulse. Zero-length directions and non-positive magnitudes are ignored.
    pub fn add_impulse(&mut self, direction: Vec2, magnitude: f32) {
        self.push(KnockbackImpulse {
            direction,
            magnitude,
        });
    }

    /// Adds a prepared impulse.
    pub fn push(&mut self, impulse: KnockbackImpulse) {
        self.velocity += impulse.velocity();
    }

    /// Current knockback velocity without decaying it.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether any knockback is pending.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Returns this tick's knockback velocity and decays the remainder.
    pub fn consume(&mut self, dt: f32, params: &KnockbackParams) -> Vec2 {
        let out = clamp_length(self.velocity, params.max_speed);

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let keep = (1.0 - params.decay_per_second.max(0.0) * dt).max(0.0);
        self.velocity = out * keep;
        if self.velocity.length() < params.rest_speed {
            self.velocity = Vec2::ZERO;
        }
        out
    }
}
