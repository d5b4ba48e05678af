//! Siege run loop and report.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bastion_siege::{
    FeedbackBus, FeedbackCue, SiegeOrchestrator, SiegeWorld, TickSummary, ZoneTracker,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::timing::FixedTimestep;
use crate::world::SimWorld;

/// Outcome of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    /// Fixed ticks simulated
    pub ticks: u64,
    /// Simulated seconds
    pub simulated_seconds: f32,
    /// Hostiles alive at the end
    pub hostiles: usize,
    /// Windups started
    pub windups_started: u64,
    /// Structure hits landed
    pub structure_hits: u64,
    /// Player hits landed
    pub player_hits: u64,
    /// Total damage dealt
    pub damage_dealt: f32,
    /// Structure health at the end
    pub structure_health: f32,
    /// Structure maximum health
    pub structure_max_health: f32,
    /// Whether the structure broke during the run
    pub structure_broken: bool,
    /// Tick on which the structure broke
    pub broken_at_tick: Option<u64>,
    /// Whether the structure was repaired after the run
    pub repaired: bool,
    /// Player health at the end
    pub player_health: f32,
    /// Whether the run ended because the player fell
    pub player_defeated: bool,
    /// Feedback cues seen, by kind
    pub cues: BTreeMap<String, u64>,
}

impl SimReport {
    fn absorb(&mut self, summary: &TickSummary) {
        self.windups_started += u64::from(summary.windups_started);
        self.structure_hits += u64::from(summary.structure_hits);
        self.player_hits += u64::from(summary.player_hits);
        self.damage_dealt += summary.damage;
    }

    /// Writes the report as pretty JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
        info!("Wrote report to {}", path.display());
        Ok(())
    }
}

/// Runs a full siege as configured.
pub fn run(config: &SimConfig) -> Result<SimReport> {
    let tuning = config
        .resolve_tuning()
        .context("invalid siege tuning")?;

    let mut world = SimWorld::build(config);
    let mut orchestrator = SiegeOrchestrator::new(tuning, Some(ZoneTracker::new()))?;
    for id in world.hostiles() {
        orchestrator.spawn_hostile(*id);
    }
    orchestrator.initialize(world.arena());

    let cues = Arc::new(Mutex::new(BTreeMap::<String, u64>::new()));
    let mut bus = FeedbackBus::new(config.feedback_capacity);
    let tally = Arc::clone(&cues);
    bus.subscribe(move |cue: &FeedbackCue| {
        debug!(kind = cue.kind(), "cue");
        *tally.lock().entry(cue.kind().to_string()).or_insert(0) += 1;
    });

    let mut timing = FixedTimestep::new(config.tick_rate);
    let dt = timing.fixed_dt();
    let total_ticks = config.total_ticks();
    let mut report = SimReport::default();

    info!(
        hostiles = world.hostiles().len(),
        ticks = total_ticks,
        "siege started"
    );

    'run: while report.ticks < total_ticks {
        let frame = world.frame_time(config.frame_seconds, config.frame_jitter);
        for _ in 0..timing.accumulate(frame) {
            if report.ticks >= total_ticks {
                break 'run;
            }

            world.step_player(dt);
            let events = world.region_events();
            if let Some(zone) = orchestrator.tracker_mut() {
                zone.apply_all(events);
            }

            let summary = orchestrator.tick(dt, world.arena_mut(), &bus);
            world.integrate(dt);
            bus.dispatch();

            report.absorb(&summary);
            report.ticks += 1;

            if report.broken_at_tick.is_none()
                && world.arena().structure_health().is_some_and(|h| h.is_broken())
            {
                report.broken_at_tick = Some(report.ticks);
                info!(tick = report.ticks, "structure broken");
            }
            if world.arena().player().is_none() {
                report.player_defeated = true;
                warn!(tick = report.ticks, "player defeated");
                break 'run;
            }
        }
    }

    debug!(carry = timing.remainder(), "unsimulated frame time");
    report.simulated_seconds = report.ticks as f32 * dt;
    report.hostiles = orchestrator.hostile_count();
    report.structure_broken = report.broken_at_tick.is_some();

    if config.repair_at_end && world.arena_mut().repair_structure() {
        report.repaired = true;
        info!("structure repaired");
    }
    if let Some(health) = world.arena().structure_health() {
        report.structure_health = health.current();
        report.structure_max_health = health.max();
    }
    report.player_health = world.arena().player_health().map_or(0.0, |h| h.current());
    report.cues = cues.lock().clone();

    info!(
        ticks = report.ticks,
        structure_hits = report.structure_hits,
        player_hits = report.player_hits,
        structure_health = report.structure_health,
        broken = report.structure_broken,
        "siege finished"
    );

    if let Some(path) = &config.report_path {
        report.write_json(path)?;
    }
    Ok(report)
}
