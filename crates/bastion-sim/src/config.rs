//! Simulation configuration.
//!
//! Loaded from TOML. Missing or unreadable files fall back to defaults so a
//! bare `bastion-sim` invocation always runs something.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use bastion_common::BastionResult;
use bastion_siege::SiegeTuning;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "bastion.toml";

/// Headless siege parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Timing ===
    /// Fixed simulation ticks per second
    pub tick_rate: u32,
    /// Simulated wall-clock frame length fed to the accumulator
    pub frame_seconds: f32,
    /// Relative frame length jitter (0.0 - 0.9)
    pub frame_jitter: f32,
    /// Simulated seconds to run
    pub duration_seconds: f32,
    /// RNG seed for jitter and patrol noise
    pub seed: u64,

    // === Region ===
    /// Center of the protected region; the structure sits here
    pub region_center: Vec2,
    /// Half-extents of the protected region
    pub region_half_extents: Vec2,

    // === Entities ===
    /// Hostiles spawned on the ring
    pub hostile_count: u32,
    /// Ring radius around the region center
    pub spawn_radius: f32,
    /// Hostile hit points
    pub hostile_health: f32,
    /// Structure hit points
    pub structure_health: f32,
    /// Player hit points
    pub player_health: f32,

    // === Player patrol ===
    /// Waypoints the player walks in a loop
    pub player_path: Vec<Vec2>,
    /// Player walking speed
    pub player_speed: f32,
    /// Relative per-tick speed noise (0.0 - 0.9)
    pub patrol_jitter: f32,

    // === Run ===
    /// Restore the structure after the run
    pub repair_at_end: bool,
    /// Feedback queue capacity
    pub feedback_capacity: usize,
    /// Where to write the JSON report
    pub report_path: Option<PathBuf>,
    /// RON tuning file; overrides `[tuning]` when set
    pub tuning_path: Option<PathBuf>,
    /// Inline siege tuning
    pub tuning: SiegeTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_rate: 60,
            frame_seconds: 1.0 / 50.0,
            frame_jitter: 0.1,
            duration_seconds: 60.0,
            seed: 0x5eed,

            // Region
            region_center: Vec2::ZERO,
            region_half_extents: Vec2::splat(6.0),

            // Entities
            hostile_count: 6,
            spawn_radius: 16.0,
            hostile_health: 10.0,
            structure_health: 20.0,
            player_health: 100.0,

            // Player patrol
            player_path: vec![
                Vec2::new(3.0, 3.0),
                Vec2::new(-3.0, 3.0),
                Vec2::new(-3.0, -3.0),
                Vec2::new(3.0, -3.0),
            ],
            player_speed: 2.5,
            patrol_jitter: 0.2,

            // Run
            repair_at_end: false,
            feedback_capacity: 1024,
            report_path: None,
            tuning_path: None,
            tuning: SiegeTuning::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str::<Self>(&contents) {
                    Ok(mut config) => {
                        config.validate();
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values to runnable ranges.
    pub fn validate(&mut self) {
        self.tick_rate = self.tick_rate.clamp(10, 240);
        self.frame_seconds = finite_or(self.frame_seconds, 1.0 / 50.0).clamp(0.001, 0.25);
        self.frame_jitter = finite_or(self.frame_jitter, 0.0).clamp(0.0, 0.9);
        self.duration_seconds = finite_or(self.duration_seconds, 60.0).clamp(0.0, 3600.0);

        self.region_half_extents = finite_vec_or(self.region_half_extents, Vec2::splat(6.0))
            .abs()
            .max(Vec2::splat(0.5));
        self.region_center = finite_vec_or(self.region_center, Vec2::ZERO);

        self.hostile_count = self.hostile_count.min(256);
        let min_radius = self.region_half_extents.length() + 1.0;
        self.spawn_radius = finite_or(self.spawn_radius, min_radius).max(min_radius);
        self.hostile_health = finite_or(self.hostile_health, 10.0).max(1.0);
        self.structure_health = finite_or(self.structure_health, 20.0).max(1.0);
        self.player_health = finite_or(self.player_health, 100.0).max(1.0);

        self.player_path.retain(|p| p.is_finite());
        if self.player_path.is_empty() {
            self.player_path.push(self.region_center);
        }
        self.player_speed = finite_or(self.player_speed, 2.5).clamp(0.0, 50.0);
        self.patrol_jitter = finite_or(self.patrol_jitter, 0.0).clamp(0.0, 0.9);

        self.feedback_capacity = self.feedback_capacity.clamp(16, 65_536);
    }

    /// Total fixed ticks in a run.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        (self.duration_seconds.max(0.0) * self.tick_rate as f32).ceil() as u64
    }

    /// Tuning to run with: the RON file if configured, otherwise the inline table.
    pub fn resolve_tuning(&self) -> BastionResult<SiegeTuning> {
        match &self.tuning_path {
            Some(path) => SiegeTuning::load_ron(path),
            None => {
                self.tuning.validate()?;
                Ok(self.tuning.clone())
            },
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn finite_vec_or(value: Vec2, fallback: Vec2) -> Vec2 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
