//! Hysteresis steering for hostiles.
//!
//! Each hostile owns a [`SteeringState`] with two phases:
//! - `Chase`: close the distance at full speed
//! - `Hold`: stay near `hold_radius`, nudging back when pushed out of band
//!
//! Entering `Hold` happens as soon as the target is within `hold_radius`.
//! Leaving it requires the target to stay beyond
//! `hold_radius + release_margin` for `outrun_frames` consecutive ticks, so
//! positional noise at the boundary never flips the phase back and forth.
//!
//! Player targets additionally get a tangential (orbit) component so several
//! hostiles fan out around the player instead of stacking on one bearing.

use bastion_common::{finite_distance, perpendicular, safe_direction, Vec2};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::targeting::TargetType;

/// Steering phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteeringPhase {
    /// Closing in on the target.
    #[default]
    Chase,
    /// Holding position at the engagement radius.
    Hold,
}

/// How the distance to the target moved since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceTrend {
    /// Distance shrank by more than the noise floor.
    Approaching,
    /// Distance grew by more than the noise floor.
    Receding,
    /// Change within the noise floor.
    #[default]
    Steady,
}

impl DistanceTrend {
    /// Classifies a distance change against a noise floor.
    #[must_use]
    pub fn classify(previous: Option<f32>, current: f32, epsilon: f32) -> Self {
        let Some(previous) = previous else {
            return Self::Steady;
        };
        let delta = current - previous;
        let epsilon = epsilon.max(0.0);
        if delta < -epsilon {
            Self::Approaching
        } else if delta > epsilon {
            Self::Receding
        } else {
            Self::Steady
        }
    }
}

/// Per-hostile steering memory. Never shared between hostiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringState {
    /// Current phase
    pub phase: SteeringPhase,
    /// Distance to the target on the previous tick
    pub previous_distance: Option<f32>,
    /// Trend computed on the latest tick
    pub distance_trend: DistanceTrend,
    /// Unit direction toward the target on the latest tick
    pub last_direction: Vec2,
    /// Consecutive ticks spent beyond the release threshold while holding
    pub outrun_counter: u32,
}

impl SteeringState {
    /// Fresh state in `Chase`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the hostile is holding at engagement range.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.phase == SteeringPhase::Hold
    }

    /// Starts over against a different target: back to `Chase` with no history.
    pub fn retarget(&mut self) {
        self.phase = SteeringPhase::Chase;
        self.forget_target();
    }

    fn forget_target(&mut self) {
        self.previous_distance = None;
        self.distance_trend = DistanceTrend::Steady;
        self.outrun_counter = 0;
    }
}

/// Steering tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringParams {
    /// Distance at which a chasing hostile starts holding.
    pub hold_radius: f32,
    /// Width of the hysteresis band beyond `hold_radius`. Must be positive.
    pub release_margin: f32,
    /// Extra release distance while the hostile is still approaching.
    pub reseat_bias: f32,
    /// Chase speed (units per second).
    pub speed: f32,
    /// Base orbit speed around player targets.
    pub orbit_base: f32,
    /// Upper bound on orbit speed.
    pub max_tangent: f32,
    /// Consecutive out-of-band ticks before `Hold` releases to `Chase`.
    pub outrun_frames: u32,
    /// Noise floor for distance trend detection.
    pub epsilon_distance: f32,
    /// Hold correction speed as a fraction of `speed`.
    pub hold_correction: f32,
    /// How much crowding widens the orbit (0 = never).
    pub crowding_gain: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            hold_radius: 2.0,
            release_margin: 0.5,
            reseat_bias: 0.25,
            speed: 4.0,
            orbit_base: 1.5,
            max_tangent: 3.0,
            outrun_frames: 6,
            epsilon_distance: 0.01,
            hold_correction: 0.35,
            crowding_gain: 1.0,
        }
    }
}

impl SteeringParams {
    /// Distance beyond which a holding hostile counts as outrun.
    #[must_use]
    pub fn release_threshold(&self) -> f32 {
        self.hold_radius + self.release_margin
    }

    /// Lower edge of the undisturbed band while holding.
    #[must_use]
    pub fn crowd_threshold(&self) -> f32 {
        (self.hold_radius - self.release_margin).max(0.0)
    }
}

/// Where to steer and what kind of target it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteerGoal {
    /// Target position
    pub position: Vec2,
    /// Target classification
    pub target_type: TargetType,
}

impl SteerGoal {
    /// Creates a steering goal.
    #[must_use]
    pub const fn new(position: Vec2, target_type: TargetType) -> Self {
        Self {
            position,
            target_type,
        }
    }
}

/// Angular spacing inputs for the orbit component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularGap {
    /// Signed per-hostile orbit preference. Sign picks the orbit direction.
    pub preference: f32,
    /// Smallest bearing separation (radians) to another hostile on the same target.
    pub other: f32,
}

impl AngularGap {
    /// A lone hostile with the given preference.
    #[must_use]
    pub const fn alone(preference: f32) -> Self {
        Self {
            preference,
            other: std::f32::consts::PI,
        }
    }
}

impl Default for AngularGap {
    fn default() -> Self {
        Self::alone(0.0)
    }
}

/// Radial and tangential velocity, kept apart so the caller can add knockback.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SteeringOutput {
    /// Velocity along the line to the target
    pub radial: Vec2,
    /// Velocity perpendicular to the line to the target
    pub tangent: Vec2,
}

impl SteeringOutput {
    /// No movement.
    pub const ZERO: Self = Self {
        radial: Vec2::ZERO,
        tangent: Vec2::ZERO,
    };

    /// Sum of both components.
    #[must_use]
    pub fn combined(&self) -> Vec2 {
        self.radial + self.tangent
    }
}

/// Turns a goal and a steering state into a desired velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementSolver {
    params: SteeringParams,
}

impl MovementSolver {
    /// Creates a solver.
    #[must_use]
    pub const fn new(params: SteeringParams) -> Self {
        Self { params }
    }

    /// Solver tunables.
    #[must_use]
    pub const fn params(&self) -> &SteeringParams {
        &self.params
    }

    /// Computes this tick's steering velocity and advances `state`.
    ///
    /// An absent goal (or non-finite geometry) yields zero velocity and
    /// clears distance history, leaving the phase untouched.
    pub fn compute(
        &self,
        current: Vec2,
        goal: Option<&SteerGoal>,
        gap: AngularGap,
        state: &mut SteeringState,
    ) -> SteeringOutput {
        let Some(goal) = goal else {
            state.forget_target();
            return SteeringOutput::ZERO;
        };
        let Some(distance) = finite_distance(current, goal.position) else {
            state.forget_target();
            return SteeringOutput::ZERO;
        };
        let direction = safe_direction(goal.position - current);

        state.distance_trend = DistanceTrend::classify(
            state.previous_distance,
            distance,
            self.params.epsilon_distance,
        );
        self.advance_phase(distance, state);

        let radial = match state.phase {
            SteeringPhase::Chase => direction * self.params.speed.max(0.0),
            SteeringPhase::Hold => self.hold_correction(distance, direction),
        };
        let tangent = match goal.target_type {
            TargetType::Player => self.orbit(direction, gap),
            TargetType::Structure => Vec2::ZERO,
        };

        state.previous_distance = Some(distance);
        state.last_direction = direction;

        SteeringOutput { radial, tangent }
    }

    fn advance_phase(&self, distance: f32, state: &mut SteeringState) {
        let p = &self.params;
        match state.phase {
            SteeringPhase::Chase => {
                if distance <= p.hold_radius {
                    trace!(distance, "steering: chase -> hold");
                    state.phase = SteeringPhase::Hold;
                    state.outrun_counter = 0;
                }
            },
            SteeringPhase::Hold => {
                let mut threshold = p.release_threshold();
                if state.distance_trend == DistanceTrend::Approaching {
                    threshold += p.reseat_bias.max(0.0);
                }

                if distance > threshold {
                    state.outrun_counter = state.outrun_counter.saturating_add(1);
                    if state.outrun_counter >= p.outrun_frames.max(1) {
                        trace!(distance, ticks = state.outrun_counter, "steering: hold -> chase");
                        state.phase = SteeringPhase::Chase;
                        state.outrun_counter = 0;
                    }
                } else {
                    state.outrun_counter = 0;
                }
            },
        }
    }

    /// Small pull back toward the band; zero while inside it.
    fn hold_correction(&self, distance: f32, direction: Vec2) -> Vec2 {
        let p = &self.params;
        let margin = p.release_margin;
        if margin <= 0.0 {
            return Vec2::ZERO;
        }
        let strength = p.speed.max(0.0) * p.hold_correction.max(0.0);

        let outer = p.release_threshold();
        let inner = p.crowd_threshold();
        if distance > outer {
            let ratio = ((distance - outer) / margin).clamp(0.0, 1.0);
            direction * strength * ratio
        } else if distance < inner {
            let ratio = ((inner - distance) / margin).clamp(0.0, 1.0);
            -direction * strength * ratio
        } else {
            Vec2::ZERO
        }
    }

    fn orbit(&self, direction: Vec2, gap: AngularGap) -> Vec2 {
        let p = &self.params;
        if direction == Vec2::ZERO || !gap.preference.is_finite() {
            return Vec2::ZERO;
        }
        let other = if gap.other.is_finite() {
            gap.other
        } else {
            std::f32::consts::PI
        };
        let crowding = 1.0 - (other / std::f32::consts::PI).clamp(0.0, 1.0);
        let spread = 1.0 + p.crowding_gain.max(0.0) * crowding;

        let limit = p.max_tangent.max(0.0);
        let magnitude = (p.orbit_base * gap.preference * spread).clamp(-limit, limit);
        perpendicular(direction) * magnitude
    }
}
