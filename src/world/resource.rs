//! Harvestable energy nodes
//!
//! A node holds extractable energy that depletes when harvested and
//! regenerates each tick, scaled down by world scarcity.

use serde::{Deserialize, Serialize};

/// A single harvestable energy source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub current: f64,
    pub capacity: f64,
}

impl ResourceNode {
    /// Create a node at full capacity
    pub fn new(capacity: f64) -> Self {
        Self {
            current: capacity,
            capacity,
        }
    }

    /// Extract energy, returns amount actually extracted
    pub fn extract(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.current);
        self.current -= taken;
        taken
    }

    /// Regenerate toward capacity
    pub fn regenerate(&mut self, amount: f64) {
        self.current = (self.current + amount.max(0.0)).min(self.capacity);
    }

    /// Add contributed energy toward capacity
    pub fn deposit(&mut self, amount: f64) {
        self.current = (self.current + amount.max(0.0)).min(self.capacity);
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}
