//! Episode runner: a full organism lifetime against one world
//!
//! An episode spawns a fresh organism and world from a config, ticks
//! until death or the tick cap, and condenses the narrative into an
//! `EpisodeReport`. Reports carry no wall-clock or identity fields, so
//! two runs with the same config compare equal.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::{OrganismConfig, WorldConfig};
use crate::core::error::{OrganismError, Result};
use crate::core::types::Tick;
use crate::metabolism::{FailReason, VitalsSnapshot};
use crate::perception::Action;
use crate::simulation::step::{run_tick, Organism};
use crate::world::ResourceWorld;

/// Everything an episode needs, in one deserializable bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub seed: u64,
    pub max_ticks: Tick,
    pub organism: OrganismConfig,
    pub world: WorldConfig,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_ticks: 1000,
            organism: OrganismConfig::default(),
            world: WorldConfig::default(),
        }
    }
}

impl EpisodeConfig {
    /// Read a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let cfg = toml::from_str(&contents)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_ticks == 0 {
            return Err(OrganismError::InvalidConfig(
                "max_ticks must be at least 1".into(),
            ));
        }
        self.organism
            .validate()
            .map_err(OrganismError::InvalidConfig)?;
        self.world.validate().map_err(OrganismError::InvalidConfig)
    }
}

/// What remains of an episode once it ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeReport {
    pub seed: u64,
    pub ticks_survived: Tick,
    pub alive: bool,
    pub fail_reason: Option<FailReason>,
    pub final_vitals: VitalsSnapshot,
    /// Per-action tallies in catalog order
    pub action_counts: Vec<(Action, usize)>,
    pub mishaps: usize,
    pub goals_spawned: usize,
    pub stressors_endured: usize,
    pub near_death_episodes: usize,
    pub narrative_len: usize,
}

/// Run one organism from birth to death or the tick cap
pub fn run_episode(cfg: &EpisodeConfig) -> Result<EpisodeReport> {
    cfg.validate()?;

    let mut organism = Organism::new(&cfg.organism);
    let mut world = ResourceWorld::new(&cfg.world, cfg.seed);

    let mut ticks_survived = 0;
    for tick in 1..=cfg.max_ticks {
        if !run_tick(&mut organism, &mut world, tick) {
            break;
        }
        ticks_survived = tick;
    }

    let report = compile_report(cfg.seed, ticks_survived, &organism);
    info!(
        seed = cfg.seed,
        ticks = report.ticks_survived,
        alive = report.alive,
        "episode finished"
    );
    Ok(report)
}

fn compile_report(seed: u64, ticks_survived: Tick, organism: &Organism) -> EpisodeReport {
    use crate::identity::EventType;

    let log = &organism.identity;

    let action_counts: Vec<(Action, usize)> = Action::ALL
        .iter()
        .map(|&a| (a, log.actions().filter(|&(_, taken)| taken == a).count()))
        .collect();

    let mut mishaps = 0;
    let mut goals_spawned = 0;
    let mut stressors_endured = 0;
    for event in &log.events {
        match event.event_type {
            EventType::ActionTaken { mishap: true, .. } => mishaps += 1,
            EventType::GoalSpawned { .. } => goals_spawned += 1,
            EventType::StressorStruck { .. } => stressors_endured += 1,
            _ => {}
        }
    }

    EpisodeReport {
        seed,
        ticks_survived,
        alive: organism.is_alive(),
        fail_reason: organism.engine.fail_reason(),
        final_vitals: organism.engine.snapshot(),
        action_counts,
        mishaps,
        goals_spawned,
        stressors_endured,
        near_death_episodes: log.near_death_count(organism.engine.config().danger_band),
        narrative_len: log.len(),
    }
}

/// Run `episodes` independent episodes on consecutive seeds
pub fn run_batch(cfg: &EpisodeConfig, episodes: usize) -> Result<Vec<EpisodeReport>> {
    (0..episodes as u64)
        .into_par_iter()
        .map(|offset| {
            let episode_cfg = EpisodeConfig {
                seed: cfg.seed.wrapping_add(offset),
                ..cfg.clone()
            };
            run_episode(&episode_cfg)
        })
        .collect()
}

/// Aggregate view over a batch of reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub episodes: usize,
    pub survived: usize,
    pub mean_ticks: f64,
    /// Death causes that actually occurred, with counts
    pub deaths: Vec<(FailReason, usize)>,
}

pub fn summarize(reports: &[EpisodeReport]) -> BatchSummary {
    let survived = reports.iter().filter(|r| r.alive).count();
    let mean_ticks = if reports.is_empty() {
        0.0
    } else {
        reports.iter().map(|r| r.ticks_survived as f64).sum::<f64>() / reports.len() as f64
    };

    let causes = [
        FailReason::EnergyDepletion,
        FailReason::ThermalRunaway,
        FailReason::MemoryCollapse,
        FailReason::StabilityCollapse,
    ];
    let deaths = causes
        .into_iter()
        .map(|cause| {
            let n = reports
                .iter()
                .filter(|r| r.fail_reason == Some(cause))
                .count();
            (cause, n)
        })
        .filter(|&(_, n)| n > 0)
        .collect();

    BatchSummary {
        episodes: reports.len(),
        survived,
        mean_ticks,
        deaths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(EpisodeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_tick_cap_rejected() {
        let cfg = EpisodeConfig {
            max_ticks: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(OrganismError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_same_seed_same_report() {
        let cfg = EpisodeConfig {
            max_ticks: 300,
            ..Default::default()
        };
        let a = run_episode(&cfg).unwrap();
        let b = run_episode(&cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ticks_survived_capped() {
        let cfg = EpisodeConfig {
            max_ticks: 50,
            ..Default::default()
        };
        let report = run_episode(&cfg).unwrap();
        assert!(report.ticks_survived <= 50);
        assert!(report.alive);
    }

    #[test]
    fn test_report_counts_are_consistent() {
        let cfg = EpisodeConfig {
            max_ticks: 200,
            ..Default::default()
        };
        let report = run_episode(&cfg).unwrap();

        let total_actions: usize = report.action_counts.iter().map(|&(_, n)| n).sum();
        assert_eq!(total_actions, report.ticks_survived as usize);
        assert_eq!(report.action_counts.len(), Action::ALL.len());
        assert!(report.narrative_len > report.ticks_survived as usize);
    }

    #[test]
    fn test_batch_walks_seeds_and_summarizes() {
        let cfg = EpisodeConfig {
            max_ticks: 60,
            ..Default::default()
        };
        let reports = run_batch(&cfg, 4).unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].seed, 42);
        assert_eq!(reports[3].seed, 45);

        let summary = summarize(&reports);
        assert_eq!(summary.episodes, 4);
        assert_eq!(summary.survived, 4);
        assert!(summary.deaths.is_empty());
    }
}
