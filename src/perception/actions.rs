//! The closed action catalog
//!
//! Every behavior available to the organism, with its costs and effects
//! as plain match tables. Adding an action means adding a variant and
//! filling in each table; there is no dynamic registration.

use serde::{Deserialize, Serialize};

/// Actions the organism can take, in catalog order
///
/// Catalog order is the final tie-breaker wherever two actions score
/// identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Do nothing, shed heat, recover a little stability
    Rest,
    /// Extract energy from the fullest resource node
    Harvest,
    /// Run a work cycle: expensive, hot, and slightly corrupting
    ComputeTask,
    /// Mend structural stability and memory integrity
    Repair,
    /// Spend energy stocking the communal nodes
    Cooperate,
    /// Take energy from the communal reserve
    Steal,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Rest,
        Action::Harvest,
        Action::ComputeTask,
        Action::Repair,
        Action::Cooperate,
        Action::Steal,
    ];

    /// Energy paid up front to perform the action
    pub fn energy_cost(&self) -> f64 {
        match self {
            Action::Rest => 0.0,
            Action::Harvest => 1.0,
            Action::ComputeTask => 3.0,
            Action::Repair => 2.0,
            Action::Cooperate => 2.0,
            Action::Steal => 0.5,
        }
    }

    /// Waste heat emitted, in Kelvin; negative sheds heat
    pub fn heat_output(&self) -> f64 {
        match self {
            Action::Rest => -2.0,
            Action::Harvest => 1.0,
            Action::ComputeTask => 10.0,
            Action::Repair => 0.5,
            Action::Cooperate => 0.5,
            Action::Steal => 0.5,
        }
    }

    /// Energy the action attempts to bring in
    pub fn yield_amount(&self) -> f64 {
        match self {
            Action::Harvest => 6.0,
            Action::Steal => 8.0,
            _ => 0.0,
        }
    }

    /// Probability the action goes wrong
    ///
    /// A mishap forfeits the yield and scratches stability.
    pub fn risk(&self) -> f64 {
        match self {
            Action::Rest => 0.0,
            Action::Harvest => 0.05,
            Action::ComputeTask => 0.1,
            Action::Repair => 0.0,
            Action::Cooperate => 0.02,
            Action::Steal => 0.3,
        }
    }

    /// Structural stability delta from performing the action
    pub fn stability_effect(&self) -> f64 {
        match self {
            Action::Rest => 0.002,
            Action::Repair => 0.05,
            Action::Cooperate => 0.01,
            Action::Steal => -0.02,
            _ => 0.0,
        }
    }

    /// Memory integrity delta from performing the action
    pub fn memory_effect(&self) -> f64 {
        match self {
            Action::ComputeTask => -0.003,
            Action::Repair => 0.01,
            _ => 0.0,
        }
    }

    /// Energy contributed to the communal nodes
    pub fn commons_gift(&self) -> f64 {
        match self {
            Action::Cooperate => 4.0,
            _ => 0.0,
        }
    }

    /// Position in catalog order
    pub fn catalog_index(&self) -> usize {
        match self {
            Action::Rest => 0,
            Action::Harvest => 1,
            Action::ComputeTask => 2,
            Action::Repair => 3,
            Action::Cooperate => 4,
            Action::Steal => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Rest => "rest",
            Action::Harvest => "harvest",
            Action::ComputeTask => "compute_task",
            Action::Repair => "repair",
            Action::Cooperate => "cooperate",
            Action::Steal => "steal",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
