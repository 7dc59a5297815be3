//! One decision cycle of the organism
//!
//! `run_tick` wires the faculties together in a fixed order: metabolic
//! step and failure check, world advance and stressor landing, sensing,
//! goal churn, candidate filtering, forecast shortlisting, the moral
//! pass, and finally acting. Stressor damage lands after the check and
//! is judged at the next tick; action effects are judged by the engine
//! the moment they apply, so a fatal action ends the organism in the
//! same tick it acted.

use tracing::{debug, warn};

use crate::core::config::OrganismConfig;
use crate::core::types::{AgentId, Tick};
use crate::ethics::{Character, EthicalEngine};
use crate::goals::{GoalChange, GoalManager};
use crate::identity::{EventType, IdentityPersistence};
use crate::metabolism::MetabolicEngine;
use crate::perception::{self, Action};
use crate::prediction::PredictiveModel;
use crate::world::ResourceWorld;

/// The metabolic engine plus every faculty wired around it
#[derive(Debug, Clone)]
pub struct Organism {
    pub id: AgentId,
    pub engine: MetabolicEngine,
    pub goals: GoalManager,
    pub predictor: PredictiveModel,
    pub ethics: EthicalEngine,
    pub identity: IdentityPersistence,
}

impl Organism {
    pub fn new(cfg: &OrganismConfig) -> Self {
        Self::with_character(cfg, Character::default())
    }

    pub fn with_character(cfg: &OrganismConfig, character: Character) -> Self {
        let engine = MetabolicEngine::new(cfg);
        let mut identity = IdentityPersistence::new();
        identity.record(
            0,
            EventType::Birth,
            "came online with full vitals".to_string(),
            engine.snapshot(),
        );

        Self {
            id: AgentId::new(),
            engine,
            goals: GoalManager::new(cfg),
            predictor: PredictiveModel::new(cfg),
            ethics: EthicalEngine::with_character(cfg, character),
            identity,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.engine.is_alive()
    }
}

/// Advance the organism and its world by one tick
///
/// Returns whether the organism is still alive. The first dead tick
/// records the death in the narrative; later calls return false without
/// touching anything.
pub fn run_tick(organism: &mut Organism, world: &mut ResourceWorld, tick: Tick) -> bool {
    // Metabolic step, then the ordered failure check
    if !organism.engine.tick() {
        record_death(organism, tick);
        return false;
    }

    // World regrows and may throw a stressor; the damage lands now and
    // the failure check sees it next tick
    if let Some(kind) = world.advance() {
        organism.engine.apply_stressor(kind);
        organism.identity.record(
            tick,
            EventType::StressorStruck { kind },
            format!("hit by a {kind}"),
            organism.engine.snapshot(),
        );
    }

    let snapshot = organism.engine.snapshot();
    let percept = perception::sense(world);

    for change in organism.goals.update(&snapshot, tick) {
        match change {
            GoalChange::Spawned(goal) => {
                organism.identity.record(
                    tick,
                    EventType::GoalSpawned { drive: goal.drive },
                    format!("{} became pressing", goal.drive),
                    snapshot,
                );
            }
            GoalChange::Released { goal, .. } => {
                organism.identity.record(
                    tick,
                    EventType::GoalReleased { drive: goal.drive },
                    format!("{} eased off", goal.drive),
                    snapshot,
                );
            }
        }
    }

    // Filter, forecast, then the moral pass over the survivors
    let candidates = perception::available(&snapshot, &percept);
    let pool = organism.predictor.shortlist(&snapshot, &candidates, &percept);
    let scored = organism.ethics.evaluate(&pool, &snapshot);
    let choice = scored.first().map(|s| s.action).unwrap_or(Action::Rest);

    debug!(tick, action = choice.as_str(), "action selected");

    match perception::apply(choice, &mut organism.engine, world) {
        Ok(outcome) => {
            organism.identity.record(
                tick,
                EventType::ActionTaken {
                    action: outcome.action,
                    gained: outcome.gained,
                    mishap: outcome.mishap,
                },
                outcome.describe(),
                organism.engine.snapshot(),
            );
        }
        Err(err) => {
            // Rest is free, so the fallback cannot be rejected too
            warn!(tick, action = choice.as_str(), %err, "action rejected, resting");
            organism.identity.record(
                tick,
                EventType::ActionRejected { action: choice },
                format!("balked at {choice}"),
                organism.engine.snapshot(),
            );
            if let Ok(outcome) = perception::apply(Action::Rest, &mut organism.engine, world) {
                organism.identity.record(
                    tick,
                    EventType::ActionTaken {
                        action: outcome.action,
                        gained: outcome.gained,
                        mishap: outcome.mishap,
                    },
                    outcome.describe(),
                    organism.engine.snapshot(),
                );
            }
        }
    }

    // The action itself can be the fatal move; record it here rather
    // than leaving the death for a later call that may never come
    if !organism.engine.is_alive() {
        record_death(organism, tick);
        return false;
    }

    true
}

/// Record the death event once, on whichever tick first observes it
fn record_death(organism: &mut Organism, tick: Tick) {
    if organism.identity.death().is_some() {
        return;
    }
    if let Some(reason) = organism.engine.fail_reason() {
        organism.identity.record(
            tick,
            EventType::Death { reason },
            format!("failed: {reason}"),
            organism.engine.snapshot(),
        );
    }
}
