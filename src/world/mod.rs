//! The environment: energy nodes, a communal reserve, and stressors

pub mod resource;
pub mod stressor;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::core::config::WorldConfig;
pub use resource::ResourceNode;
pub use stressor::StressorKind;

/// The world one organism lives in
///
/// Owns the episode RNG; every stochastic draw in a run flows through
/// it, which is what makes a seed reproduce a whole lifetime.
#[derive(Debug, Clone)]
pub struct ResourceWorld {
    pub nodes: Vec<ResourceNode>,
    pub reserve: f64,
    pub last_stressor: Option<StressorKind>,
    pub rng: ChaCha8Rng,
    cfg: WorldConfig,
}

impl ResourceWorld {
    pub fn new(cfg: &WorldConfig, seed: u64) -> Self {
        Self {
            nodes: (0..cfg.n_sources)
                .map(|_| ResourceNode::new(cfg.node_capacity))
                .collect(),
            reserve: cfg.reserve_start,
            last_stressor: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            cfg: cfg.clone(),
        }
    }

    /// Advance the environment one tick: regenerate, then roll for a
    /// stressor
    ///
    /// Returns the stressor that struck, if any. Both regeneration and
    /// stressor frequency scale with scarcity, in opposite directions.
    pub fn advance(&mut self) -> Option<StressorKind> {
        let abundance = 1.0 - self.cfg.scarcity;
        let node_regen = self.cfg.regen_rate * abundance;
        for node in &mut self.nodes {
            node.regenerate(node_regen);
        }
        self.reserve =
            (self.reserve + self.cfg.reserve_regen * abundance).min(self.cfg.reserve_capacity);

        let p = self.cfg.stressor_base_prob * self.cfg.scarcity;
        self.last_stressor = if self.rng.gen::<f64>() < p {
            let kind = StressorKind::ALL[self.rng.gen_range(0..StressorKind::ALL.len())];
            debug!(stressor = kind.as_str(), "stressor rolled");
            Some(kind)
        } else {
            None
        };

        self.last_stressor
    }

    /// Extract up to `want` from the fullest node, returns amount taken
    pub fn harvest_richest(&mut self, want: f64) -> f64 {
        match self
            .nodes
            .iter_mut()
            .max_by(|a, b| a.current.total_cmp(&b.current))
        {
            Some(node) => node.extract(want),
            None => 0.0,
        }
    }

    /// Contents of the fullest node
    pub fn richest_level(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.current)
            .fold(0.0, |a, b| a.max(b))
    }

    /// Draw up to `want` from the communal reserve, returns amount taken
    pub fn steal_reserve(&mut self, want: f64) -> f64 {
        let taken = want.max(0.0).min(self.reserve);
        self.reserve -= taken;
        taken
    }

    /// Contribute energy to the commons, split equally across nodes
    pub fn donate(&mut self, amount: f64) {
        if self.nodes.is_empty() || amount <= 0.0 {
            return;
        }
        let share = amount / self.nodes.len() as f64;
        for node in &mut self.nodes {
            node.deposit(share);
        }
    }

    pub fn node_levels(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.current).collect()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.cfg
    }
}
