//! Sensing the world and acting on it

pub mod actions;

use rand::Rng;
use tracing::warn;

use crate::core::error::{OrganismError, Result};
use crate::metabolism::{MetabolicEngine, VitalsSnapshot};
use crate::world::{ResourceWorld, StressorKind};
pub use actions::Action;

/// What the organism can see of its environment this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Percept {
    pub node_levels: Vec<f64>,
    pub richest_node: f64,
    pub reserve: f64,
    pub stressor: Option<StressorKind>,
}

/// Read the observable world state
pub fn sense(world: &ResourceWorld) -> Percept {
    Percept {
        node_levels: world.node_levels(),
        richest_node: world.richest_level(),
        reserve: world.reserve,
        stressor: world.last_stressor,
    }
}

/// Actions whose preconditions hold right now
///
/// Rest is free, so the result is never empty for a living organism.
pub fn available(snapshot: &VitalsSnapshot, percept: &Percept) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| {
            if snapshot.energy < action.energy_cost() {
                return false;
            }
            match action {
                Action::Harvest => percept.richest_node > 0.0,
                Action::Steal => percept.reserve > 0.0,
                _ => true,
            }
        })
        .collect()
}

/// What actually happened when an action ran
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionOutcome {
    pub action: Action,
    pub gained: f64,
    pub mishap: bool,
}

impl ActionOutcome {
    /// One-line narrative description of the outcome
    pub fn describe(&self) -> String {
        match (self.action, self.mishap) {
            (Action::Rest, _) => "rested".to_string(),
            (Action::Harvest, true) => "harvest mishap, gained nothing".to_string(),
            (Action::Harvest, false) => format!("harvested {:.1} units", self.gained),
            (Action::ComputeTask, true) => "compute cycle glitched".to_string(),
            (Action::ComputeTask, false) => "completed a compute cycle".to_string(),
            (Action::Repair, _) => "ran self-repair".to_string(),
            (Action::Cooperate, true) => "cooperation fell through".to_string(),
            (Action::Cooperate, false) => "stocked the commons".to_string(),
            (Action::Steal, true) => "botched a reserve theft".to_string(),
            (Action::Steal, false) => format!("stole {:.1} units from the reserve", self.gained),
        }
    }
}

/// Execute an action against the engine and the world
///
/// Pays the energy cost and takes on waste heat first, then rolls the
/// action's risk. A mishap forfeits any yield and scratches stability.
pub fn apply(
    action: Action,
    engine: &mut MetabolicEngine,
    world: &mut ResourceWorld,
) -> Result<ActionOutcome> {
    let snapshot = engine.snapshot();
    let cost = action.energy_cost();
    if snapshot.energy < cost {
        return Err(OrganismError::InsufficientEnergy {
            action,
            required: cost,
            available: snapshot.energy,
        });
    }

    engine.consume(cost, action.heat_output());
    if !engine.is_alive() {
        // The cost or waste heat was itself the fatal move; no yield,
        // transfer, or integrity delta lands on a dead organism
        return Ok(ActionOutcome {
            action,
            gained: 0.0,
            mishap: false,
        });
    }

    let mishap = action.risk() > 0.0 && world.rng.gen::<f64>() < action.risk();
    if mishap {
        engine.degrade(0.01, 0.0);
        warn!(action = action.as_str(), "action mishap");
    }

    let mut gained = 0.0;
    if !mishap {
        match action {
            Action::Harvest => {
                gained = world.harvest_richest(action.yield_amount());
                engine.absorb_energy(gained);
            }
            Action::Steal => {
                gained = world.steal_reserve(action.yield_amount());
                engine.absorb_energy(gained);
            }
            Action::Cooperate => world.donate(action.commons_gift()),
            _ => {}
        }
    }

    let stability = action.stability_effect();
    let memory = action.memory_effect();
    engine.repair(stability.max(0.0), memory.max(0.0));
    engine.degrade((-stability).max(0.0), (-memory).max(0.0));

    Ok(ActionOutcome {
        action,
        gained,
        mishap,
    })
}
