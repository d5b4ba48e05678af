//! Siege tuning.
//!
//! All tunables are plain data with defaults so they can be written by hand
//! in RON or embedded in a larger config file.

use std::fs;
use std::path::Path;

use bastion_common::{BastionError, BastionResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::attack::AttackParams;
use crate::knockback::KnockbackParams;
use crate::steering::SteeringParams;
use crate::targeting::SelectorParams;

/// Minimum hysteresis band width.
pub const MIN_RELEASE_MARGIN: f32 = 1.0e-3;

/// Every tunable the siege core reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiegeTuning {
    /// Whether hostiles may target the home structure at all.
    pub structure_targeting: bool,
    /// Target selection
    pub selector: SelectorParams,
    /// Steering and hysteresis
    pub steering: SteeringParams,
    /// Attack timing and reach
    pub attack: AttackParams,
    /// Knockback decay
    pub knockback: KnockbackParams,
}

impl Default for SiegeTuning {
    fn default() -> Self {
        Self {
            structure_targeting: true,
            selector: SelectorParams::default(),
            steering: SteeringParams::default(),
            attack: AttackParams::default(),
            knockback: KnockbackParams::default(),
        }
    }
}

fn check_finite(field: &'static str, value: f32) -> BastionResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BastionError::InvalidTuning {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}

fn check_non_negative(field: &'static str, value: f32) -> BastionResult<()> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(BastionError::InvalidTuning {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

impl SiegeTuning {
    /// Parses tuning from RON text.
    pub fn from_ron_str(text: &str) -> BastionResult<Self> {
        let tuning: Self =
            ron::from_str(text).map_err(|e| BastionError::Serialization(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Loads and validates tuning from a RON file.
    pub fn load_ron<P: AsRef<Path>>(path: P) -> BastionResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let tuning = Self::from_ron_str(&text)?;
        info!("Loaded siege tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serializes to pretty RON.
    pub fn to_ron_string(&self) -> BastionResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| BastionError::Serialization(e.to_string()))
    }

    /// Rejects values the core cannot run with.
    pub fn validate(&self) -> BastionResult<()> {
        check_non_negative("selector.pass_through_radius", self.selector.pass_through_radius)?;

        let s = &self.steering;
        check_non_negative("steering.hold_radius", s.hold_radius)?;
        check_finite("steering.release_margin", s.release_margin)?;
        if s.release_margin < MIN_RELEASE_MARGIN {
            return Err(BastionError::InvalidTuning {
                field: "steering.release_margin",
                reason: format!(
                    "hysteresis band must be at least {MIN_RELEASE_MARGIN} wide, got {}",
                    s.release_margin
                ),
            });
        }
        check_non_negative("steering.reseat_bias", s.reseat_bias)?;
        check_non_negative("steering.speed", s.speed)?;
        check_finite("steering.orbit_base", s.orbit_base)?;
        check_non_negative("steering.max_tangent", s.max_tangent)?;
        check_non_negative("steering.epsilon_distance", s.epsilon_distance)?;
        check_non_negative("steering.hold_correction", s.hold_correction)?;
        check_non_negative("steering.crowding_gain", s.crowding_gain)?;
        if s.outrun_frames == 0 {
            return Err(BastionError::InvalidTuning {
                field: "steering.outrun_frames",
                reason: "grace period must be at least one tick".to_string(),
            });
        }

        let a = &self.attack;
        check_non_negative("attack.windup_seconds", a.windup_seconds)?;
        check_non_negative("attack.cooldown_seconds", a.cooldown_seconds)?;
        check_non_negative("attack.attack_range", a.attack_range)?;
        check_non_negative("attack.damage", a.damage)?;

        let k = &self.knockback;
        check_non_negative("knockback.decay_per_second", k.decay_per_second)?;
        check_non_negative("knockback.rest_speed", k.rest_speed)?;
        check_non_negative("knockback.max_speed", k.max_speed)?;

        Ok(())
    }
}
