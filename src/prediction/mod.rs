//! One-step forecasting and free-energy action ranking
//!
//! The model projects each candidate action to the organism's state at
//! the next failure check, scores how far that state sits from the
//! homeostatic setpoints, and proposes the closest few. It runs the
//! same arithmetic the engine does, so a projection lands exactly where
//! the engine will.

use ordered_float::OrderedFloat;

use crate::core::config::OrganismConfig;
use crate::metabolism::VitalsSnapshot;
use crate::perception::{Action, Percept};

/// A candidate action with its forecast score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedAction {
    pub action: Action,
    pub score: f64,
    /// Whether the projected state crosses a failure threshold
    pub fatal: bool,
}

/// Free-energy-style forecaster over the action catalog
#[derive(Debug, Clone)]
pub struct PredictiveModel {
    cfg: OrganismConfig,
}

impl PredictiveModel {
    pub fn new(cfg: &OrganismConfig) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Project the state at the next failure check if `action` runs now
    ///
    /// Applies the action (cost, heat, transfers, integrity deltas) and
    /// then the next metabolic step, in the engine's order. Yields are
    /// taken at face value and capped by what the percept shows; risk
    /// is priced in `score`, not sampled here.
    pub fn forecast(
        &self,
        snapshot: &VitalsSnapshot,
        action: Action,
        percept: &Percept,
    ) -> VitalsSnapshot {
        let cfg = &self.cfg;

        // Action phase
        let mut energy = (snapshot.energy - action.energy_cost()).max(0.0);
        let mut temperature = (snapshot.temperature + action.heat_output()).max(cfg.t_base);
        let gain = match action {
            Action::Harvest => action.yield_amount().min(percept.richest_node),
            Action::Steal => action.yield_amount().min(percept.reserve),
            _ => 0.0,
        };
        energy = (energy + gain).min(cfg.e_max);
        let mut stability = (snapshot.stability + action.stability_effect()).clamp(0.0, 1.0);
        let mut memory = (snapshot.memory + action.memory_effect()).clamp(0.0, 1.0);

        // Next metabolic step
        energy = (energy - cfg.entropy_rate).max(0.0);
        temperature += (cfg.t_base - temperature) * cfg.cooling_rate;
        stability = (stability - cfg.stability_wear).max(0.0);
        memory = (memory - cfg.memory_wear).max(0.0);

        VitalsSnapshot {
            energy,
            e_max: cfg.e_max,
            temperature,
            t_base: cfg.t_base,
            t_critical: cfg.t_critical,
            memory,
            stability,
        }
    }

    /// Weighted squared deviation of a state from the setpoints
    pub fn free_energy(&self, state: &VitalsSnapshot) -> f64 {
        let cfg = &self.cfg;
        let e_dev = state.energy_fraction() - cfg.energy_setpoint_fraction;
        let t_dev = (state.temperature - cfg.t_base) / (cfg.t_critical - cfg.t_base);
        let m_dev = 1.0 - state.memory;
        let s_dev = 1.0 - state.stability;

        cfg.energy_weight * e_dev * e_dev
            + cfg.thermal_weight * t_dev * t_dev
            + cfg.memory_weight * m_dev * m_dev
            + cfg.stability_weight * s_dev * s_dev
    }

    /// Forecast score for one candidate: projected deviation plus
    /// priced cost and risk
    pub fn score(&self, snapshot: &VitalsSnapshot, action: Action, percept: &Percept) -> f64 {
        let projected = self.forecast(snapshot, action, percept);
        self.free_energy(&projected)
            + self.cfg.cost_weight * action.energy_cost()
            + self.cfg.risk_weight * action.risk()
    }

    fn is_fatal(&self, projected: &VitalsSnapshot) -> bool {
        projected.energy <= 0.0
            || projected.temperature >= self.cfg.t_critical
            || projected.memory <= self.cfg.memory_floor
            || projected.stability <= self.cfg.stability_floor
    }

    /// Whether the action phase itself crosses a threshold
    ///
    /// The engine judges cost and waste heat the moment they apply,
    /// before any yield or cooling lands, so an action can be lethal
    /// even when its projected end state is not.
    fn lethal_on_application(&self, snapshot: &VitalsSnapshot, action: Action) -> bool {
        snapshot.energy - action.energy_cost() <= 0.0
            || snapshot.temperature + action.heat_output() >= self.cfg.t_critical
    }

    /// Score every candidate, ascending; ties break toward the cheaper
    /// action, then catalog order
    pub fn rank(
        &self,
        snapshot: &VitalsSnapshot,
        candidates: &[Action],
        percept: &Percept,
    ) -> Vec<RankedAction> {
        let mut ranked: Vec<RankedAction> = candidates
            .iter()
            .map(|&action| {
                let projected = self.forecast(snapshot, action, percept);
                RankedAction {
                    action,
                    score: self.free_energy(&projected)
                        + self.cfg.cost_weight * action.energy_cost()
                        + self.cfg.risk_weight * action.risk(),
                    fatal: self.lethal_on_application(snapshot, action)
                        || self.is_fatal(&projected),
                }
            })
            .collect();

        ranked.sort_by_key(|r| {
            (
                OrderedFloat(r.score),
                OrderedFloat(r.action.energy_cost()),
                r.action.catalog_index(),
            )
        });
        ranked
    }

    /// The forecast-approved candidates the moral pass chooses among
    ///
    /// Non-fatal candidates in score order, at most `moral_pool` of
    /// them. If every projection is fatal the single least-bad
    /// candidate comes back instead of nothing.
    pub fn shortlist(
        &self,
        snapshot: &VitalsSnapshot,
        candidates: &[Action],
        percept: &Percept,
    ) -> Vec<Action> {
        let ranked = self.rank(snapshot, candidates, percept);

        let pool: Vec<Action> = ranked
            .iter()
            .filter(|r| !r.fatal)
            .take(self.cfg.moral_pool)
            .map(|r| r.action)
            .collect();

        if pool.is_empty() {
            ranked.first().map(|r| vec![r.action]).unwrap_or_default()
        } else {
            pool
        }
    }
}
