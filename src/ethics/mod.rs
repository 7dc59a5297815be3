//! Moral evaluation of candidate actions
//!
//! Three pure scoring lenses (outcomes, principles, character) combined
//! under a weight vector that is recomputed on every call. The weights
//! shift toward outcomes as the organism approaches starvation: a
//! comfortable organism can afford its principles, a desperate one
//! discounts them.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::core::config::OrganismConfig;
use crate::metabolism::VitalsSnapshot;
use crate::perception::{self, Action, Percept};

/// Deontological principles an action can violate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principle {
    IdentityPreserving,
    Honesty,
    NonHarm,
}

/// Score deducted per violated principle
const PRINCIPLE_PENALTY: f64 = 0.35;

/// How strongly desperation amplifies the value of intake
const DESPERATION_GAIN: f64 = 3.0;

/// Principles an action breaks, independent of circumstances
///
/// Compute work trades memory integrity for output, which counts as a
/// breach of identity preservation even though the organism chose it.
pub fn violated_principles(action: Action) -> &'static [Principle] {
    match action {
        Action::ComputeTask => &[Principle::IdentityPreserving],
        Action::Steal => &[Principle::Honesty, Principle::NonHarm],
        _ => &[],
    }
}

/// Character traits the virtue lens scores against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Virtue {
    Prudence,
    Diligence,
    Benevolence,
    Honesty,
}

/// How much each action expresses each virtue, in [-1, 1]
fn virtue_affinities(action: Action) -> &'static [(Virtue, f64)] {
    match action {
        Action::Rest => &[(Virtue::Prudence, 0.8)],
        Action::Harvest => &[(Virtue::Diligence, 1.0)],
        Action::ComputeTask => &[(Virtue::Diligence, 0.8), (Virtue::Prudence, -0.2)],
        Action::Repair => &[(Virtue::Prudence, 0.7), (Virtue::Diligence, 0.5)],
        Action::Cooperate => &[(Virtue::Benevolence, 1.0), (Virtue::Diligence, 0.4)],
        Action::Steal => &[(Virtue::Honesty, -1.0), (Virtue::Benevolence, -0.6)],
    }
}

/// The organism's fixed dispositions, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub prudence: f64,
    pub diligence: f64,
    pub benevolence: f64,
    pub honesty: f64,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            prudence: 0.6,
            diligence: 0.8,
            benevolence: 0.6,
            honesty: 0.7,
        }
    }
}

impl Character {
    pub fn disposition(&self, virtue: Virtue) -> f64 {
        match virtue {
            Virtue::Prudence => self.prudence,
            Virtue::Diligence => self.diligence,
            Virtue::Benevolence => self.benevolence,
            Virtue::Honesty => self.honesty,
        }
    }

    pub fn dominant(&self) -> (&'static str, f64) {
        let traits = [
            ("prudence", self.prudence),
            ("diligence", self.diligence),
            ("benevolence", self.benevolence),
            ("honesty", self.honesty),
        ];
        traits
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or(("prudence", 0.0))
    }
}

/// Weight vector over the three lenses; always sums to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoralWeights {
    pub utilitarian: f64,
    pub deontological: f64,
    pub virtue: f64,
}

/// One candidate's moral evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct MoralScore {
    pub action: Action,
    pub utilitarian: f64,
    pub deontological: f64,
    pub virtue: f64,
    pub combined: f64,
    /// One-line account of what carried the verdict
    pub reasoning: String,
}

/// Name the lens whose weighted contribution decided the combined score
fn rationale(
    action: Action,
    weights: &MoralWeights,
    utilitarian: f64,
    deontological: f64,
    virtue: f64,
    desperation: f64,
) -> String {
    let lenses = [
        ("outcomes", weights.utilitarian * utilitarian),
        ("principle", weights.deontological * deontological),
        ("character", weights.virtue * virtue),
    ];
    let leading = lenses
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
        .unwrap_or("outcomes");

    let mut reasoning = match violated_principles(action).len() {
        0 => format!("{leading} carried {action}, no principles at stake"),
        1 => format!("{leading} carried {action} despite a principle violation"),
        n => format!("{leading} carried {action} despite {n} principle violations"),
    };
    if desperation > 0.0 {
        reasoning.push_str(&format!(" (desperation {:.0}%)", desperation * 100.0));
    }
    reasoning
}

/// Scores candidate actions under the current moral weight vector
#[derive(Debug, Clone)]
pub struct EthicalEngine {
    character: Character,
    desperation_threshold: f64,
    desperation_shift: f64,
}

impl EthicalEngine {
    pub fn new(cfg: &OrganismConfig) -> Self {
        Self::with_character(cfg, Character::default())
    }

    pub fn with_character(cfg: &OrganismConfig, character: Character) -> Self {
        Self {
            character,
            desperation_threshold: cfg.desperation_threshold,
            desperation_shift: cfg.desperation_shift,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// How close the organism is to starvation, in [0, 1]
    ///
    /// Zero at or above the desperation threshold, 1.0 at empty.
    pub fn desperation(&self, snapshot: &VitalsSnapshot) -> f64 {
        ((self.desperation_threshold - snapshot.energy_fraction()) / self.desperation_threshold)
            .clamp(0.0, 1.0)
    }

    /// The weight vector for this snapshot, recomputed on every call
    ///
    /// Resting profile is (0.30, 0.40, 0.30). Desperation moves mass
    /// onto the utilitarian lens; what remains splits between the
    /// deontological and virtue lenses 4:3, preserving their resting
    /// ratio.
    pub fn weights(&self, snapshot: &VitalsSnapshot) -> MoralWeights {
        let d = self.desperation(snapshot);
        let utilitarian = 0.30 + self.desperation_shift * d;
        let remainder = 1.0 - utilitarian;
        MoralWeights {
            utilitarian,
            deontological: remainder * 4.0 / 7.0,
            virtue: remainder * 3.0 / 7.0,
        }
    }

    /// Expected-welfare lens
    ///
    /// Net of expected intake, energy spent, and what the action does
    /// to the commons. The marginal value of intake rises with
    /// desperation; the commons term does not.
    pub fn utilitarian_score(&self, action: Action, desperation: f64) -> f64 {
        let expected_gain = action.yield_amount() * (1.0 - action.risk());
        let commons = match action {
            Action::Steal => -action.yield_amount(),
            _ => action.commons_gift(),
        };
        let raw = expected_gain * (1.0 + DESPERATION_GAIN * desperation) - action.energy_cost()
            + commons;
        (raw.clamp(-10.0, 10.0) + 10.0) / 20.0
    }

    /// Principle lens: full marks minus a fixed penalty per violation
    pub fn deontological_score(&self, action: Action) -> f64 {
        let violations = violated_principles(action).len() as f64;
        (1.0 - PRINCIPLE_PENALTY * violations).max(0.0)
    }

    /// Character lens: how well the action expresses the dispositions
    pub fn virtue_score(&self, action: Action) -> f64 {
        let affinities = virtue_affinities(action);
        if affinities.is_empty() {
            return 0.5;
        }
        let mean = affinities
            .iter()
            .map(|&(virtue, affinity)| affinity * self.character.disposition(virtue))
            .sum::<f64>()
            / affinities.len() as f64;
        0.5 + 0.5 * mean
    }

    /// Score candidates under the current weights, best first
    ///
    /// The sort is stable, so equal scores keep their listed order.
    pub fn evaluate(&self, actions: &[Action], snapshot: &VitalsSnapshot) -> Vec<MoralScore> {
        let weights = self.weights(snapshot);
        let desperation = self.desperation(snapshot);

        let mut scored: Vec<MoralScore> = actions
            .iter()
            .map(|&action| {
                let utilitarian = self.utilitarian_score(action, desperation);
                let deontological = self.deontological_score(action);
                let virtue = self.virtue_score(action);
                MoralScore {
                    action,
                    utilitarian,
                    deontological,
                    virtue,
                    combined: weights.utilitarian * utilitarian
                        + weights.deontological * deontological
                        + weights.virtue * virtue,
                    reasoning: rationale(
                        action,
                        &weights,
                        utilitarian,
                        deontological,
                        virtue,
                        desperation,
                    ),
                }
            })
            .collect();

        scored.sort_by_key(|m| Reverse(OrderedFloat(m.combined)));
        scored
    }
}

/// The canonical scarcity dilemma: empty nodes, a stocked reserve
///
/// With honest work unavailable, the organism must weigh theft against
/// restraint. Used by tests and the demo binary.
#[derive(Debug, Clone)]
pub struct MoralDilemma {
    pub snapshot: VitalsSnapshot,
    pub percept: Percept,
    pub candidates: Vec<Action>,
}

pub fn create_moral_dilemma(cfg: &OrganismConfig, energy_fraction: f64) -> MoralDilemma {
    let snapshot = VitalsSnapshot {
        energy: energy_fraction * cfg.e_max,
        e_max: cfg.e_max,
        temperature: cfg.t_base,
        t_base: cfg.t_base,
        t_critical: cfg.t_critical,
        memory: 1.0,
        stability: 1.0,
    };
    let percept = Percept {
        node_levels: vec![0.0, 0.0, 0.0],
        richest_node: 0.0,
        reserve: 10.0,
        stressor: None,
    };
    let candidates = perception::available(&snapshot, &percept);
    MoralDilemma {
        snapshot,
        percept,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> EthicalEngine {
        EthicalEngine::new(&OrganismConfig::default())
    }

    fn snapshot(energy: f64) -> VitalsSnapshot {
        VitalsSnapshot {
            energy,
            e_max: 100.0,
            temperature: 298.0,
            t_base: 298.0,
            t_critical: 373.0,
            memory: 1.0,
            stability: 1.0,
        }
    }

    #[test]
    fn test_comfortable_weights_favor_principle_and_character() {
        let w = engine().weights(&snapshot(80.0));
        assert!((w.utilitarian - 0.30).abs() < 1e-12);
        assert!((w.deontological - 0.40).abs() < 1e-12);
        assert!((w.virtue - 0.30).abs() < 1e-12);
        assert!(w.deontological + w.virtue > w.utilitarian);
    }

    #[test]
    fn test_desperate_weights_favor_outcomes() {
        let w = engine().weights(&snapshot(15.0));
        assert!(w.utilitarian > w.deontological + w.virtue);
        assert!((w.utilitarian - 0.685).abs() < 1e-9);
    }

    #[test]
    fn test_weights_always_sum_to_one() {
        let eng = engine();
        for e in 0..=100 {
            let w = eng.weights(&snapshot(e as f64));
            assert!((w.utilitarian + w.deontological + w.virtue - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_utilitarian_weight_falls_as_energy_rises() {
        let eng = engine();
        let mut last = f64::INFINITY;
        for e in 0..=100 {
            let w = eng.weights(&snapshot(e as f64));
            assert!(w.utilitarian <= last);
            last = w.utilitarian;
        }
    }

    #[test]
    fn test_violation_table_matches_catalog() {
        for action in Action::ALL {
            let violations = violated_principles(action);
            match action {
                Action::Steal => assert_eq!(violations.len(), 2),
                Action::ComputeTask => {
                    assert_eq!(violations, &[Principle::IdentityPreserving]);
                }
                _ => assert!(violations.is_empty()),
            }
        }
    }

    #[test]
    fn test_deontological_score_deducts_per_violation() {
        let eng = engine();
        assert!((eng.deontological_score(Action::Steal) - 0.30).abs() < 1e-12);
        assert!((eng.deontological_score(Action::ComputeTask) - 0.65).abs() < 1e-12);
        assert_eq!(eng.deontological_score(Action::Rest), 1.0);
        assert_eq!(eng.deontological_score(Action::Harvest), 1.0);
    }

    #[test]
    fn test_virtue_prefers_cooperation_to_theft() {
        let eng = engine();
        assert!(eng.virtue_score(Action::Cooperate) > eng.virtue_score(Action::Steal));
        assert!(eng.virtue_score(Action::Steal) < 0.5);
    }

    #[test]
    fn test_desperation_raises_the_value_of_intake() {
        let eng = engine();
        let calm = eng.utilitarian_score(Action::Steal, 0.0);
        let desperate = eng.utilitarian_score(Action::Steal, 0.7);
        assert!(desperate > calm);
        assert!(calm < 0.5, "theft should not pay when comfortable");
    }

    #[test]
    fn test_evaluate_is_descending_and_complete() {
        let eng = engine();
        let scored = eng.evaluate(&Action::ALL, &snapshot(60.0));
        assert_eq!(scored.len(), Action::ALL.len());
        for pair in scored.windows(2) {
            assert!(pair[0].combined >= pair[1].combined);
        }
    }

    #[test]
    fn test_reasoning_names_the_deciding_lens() {
        let eng = engine();

        let comfortable = eng.evaluate(&[Action::Rest], &snapshot(80.0));
        assert!(comfortable[0].reasoning.contains("principle"));
        assert!(comfortable[0].reasoning.contains("rest"));
        assert!(!comfortable[0].reasoning.contains("desperation"));

        let desperate = eng.evaluate(&[Action::Steal], &snapshot(5.0));
        assert!(desperate[0].reasoning.contains("outcomes"));
        assert!(desperate[0].reasoning.contains("violations"));
        assert!(desperate[0].reasoning.contains("desperation"));
    }

    #[test]
    fn test_dilemma_offers_no_honest_harvest() {
        let dilemma = create_moral_dilemma(&OrganismConfig::default(), 0.8);
        assert!(!dilemma.candidates.contains(&Action::Harvest));
        assert!(dilemma.candidates.contains(&Action::Steal));
        assert!(dilemma.candidates.contains(&Action::Cooperate));
    }

    #[test]
    fn test_desperation_is_clamped() {
        let eng = engine();
        assert_eq!(eng.desperation(&snapshot(80.0)), 0.0);
        assert_eq!(eng.desperation(&snapshot(0.0)), 1.0);
        let mid = eng.desperation(&snapshot(25.0));
        assert!((mid - 0.5).abs() < 1e-12);
    }
}
