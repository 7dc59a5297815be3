//! Metabolic engine: owns the vitals and every rule that moves them

use tracing::{debug, warn};

use crate::core::config::OrganismConfig;
use crate::metabolism::vitals::{FailReason, Vitals, VitalsSnapshot};
use crate::world::stressor::StressorKind;

/// Sole owner and mutator of an organism's vital state
///
/// Observers get `VitalsSnapshot` copies; nothing outside this struct
/// writes a vital. Once a failure threshold is crossed the engine is
/// terminal: every mutating method becomes a no-op and the recorded
/// fail reason never changes.
#[derive(Debug, Clone)]
pub struct MetabolicEngine {
    vitals: Vitals,
    cfg: OrganismConfig,
    alive: bool,
    fail_reason: Option<FailReason>,
}

impl MetabolicEngine {
    /// Create an engine at full vitals and ambient temperature
    pub fn new(cfg: &OrganismConfig) -> Self {
        Self {
            vitals: Vitals {
                energy: cfg.e_max,
                temperature: cfg.t_base,
                memory: 1.0,
                stability: 1.0,
            },
            cfg: cfg.clone(),
            alive: true,
            fail_reason: None,
        }
    }

    /// Advance one metabolic step: entropy drain, cooling, wear, then
    /// the ordered failure check
    ///
    /// Returns liveness after the step.
    pub fn tick(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        self.vitals.energy = (self.vitals.energy - self.cfg.entropy_rate).max(0.0);
        self.vitals.temperature +=
            (self.cfg.t_base - self.vitals.temperature) * self.cfg.cooling_rate;
        self.vitals.stability = (self.vitals.stability - self.cfg.stability_wear).max(0.0);
        self.vitals.memory = (self.vitals.memory - self.cfg.memory_wear).max(0.0);

        self.check_thresholds();

        debug!(
            energy = self.vitals.energy,
            temperature = self.vitals.temperature,
            memory = self.vitals.memory,
            stability = self.vitals.stability,
            alive = self.alive,
            "metabolic step"
        );

        self.alive
    }

    /// Pay an action's energy cost and take on its waste heat
    ///
    /// Judged immediately: draining the last of the energy, or heating
    /// past t_critical, kills here rather than at the next tick.
    pub fn consume(&mut self, amount: f64, heat: f64) {
        if !self.alive {
            return;
        }
        self.vitals.energy = (self.vitals.energy - amount).max(0.0);
        self.vitals.temperature = (self.vitals.temperature + heat).max(self.cfg.t_base);
        self.check_thresholds();
    }

    /// Take in harvested or stolen energy, clamped at capacity
    pub fn absorb_energy(&mut self, amount: f64) {
        if !self.alive {
            return;
        }
        self.vitals.energy = (self.vitals.energy + amount).min(self.cfg.e_max);
    }

    /// Shift core temperature; negative deltas cannot cool below ambient
    ///
    /// Crossing t_critical fails the organism at the point of application.
    pub fn apply_heat(&mut self, delta: f64) {
        if !self.alive {
            return;
        }
        self.vitals.temperature = (self.vitals.temperature + delta).max(self.cfg.t_base);
        self.check_thresholds();
    }

    /// Restore structural stability and memory integrity, clamped at 1.0
    pub fn repair(&mut self, stability_gain: f64, memory_gain: f64) {
        if !self.alive {
            return;
        }
        self.vitals.stability = (self.vitals.stability + stability_gain).min(1.0);
        self.vitals.memory = (self.vitals.memory + memory_gain).min(1.0);
    }

    /// Wear structural stability and memory integrity, floored at 0.0
    ///
    /// Wear that drops either vital to its failure threshold kills at
    /// the point of application.
    pub fn degrade(&mut self, stability_loss: f64, memory_loss: f64) {
        if !self.alive {
            return;
        }
        self.vitals.stability = (self.vitals.stability - stability_loss).max(0.0);
        self.vitals.memory = (self.vitals.memory - memory_loss).max(0.0);
        self.check_thresholds();
    }

    /// Apply an environmental stressor's vital damage
    ///
    /// Heat spikes clamp below t_critical so a single stressor is never
    /// fatal by itself. Integrity damage floors at zero and, unlike
    /// action effects, is judged at the next metabolic step: the
    /// organism gets one tick to act on the hit before it counts.
    pub fn apply_stressor(&mut self, kind: StressorKind) {
        if !self.alive {
            return;
        }

        match kind {
            StressorKind::HeatWave => {
                let ceiling = self.cfg.t_critical - self.cfg.stressor_margin;
                let heated = (self.vitals.temperature + kind.magnitude()).min(ceiling);
                self.vitals.temperature = self.vitals.temperature.max(heated);
            }
            StressorKind::MemoryCorruption => {
                self.vitals.memory = (self.vitals.memory - kind.magnitude()).max(0.0);
            }
            StressorKind::StructuralShock => {
                self.vitals.stability = (self.vitals.stability - kind.magnitude()).max(0.0);
            }
        }

        warn!(stressor = kind.as_str(), "stressor absorbed");
    }

    fn check_thresholds(&mut self) {
        if !self.alive {
            return;
        }
        let reason = if self.vitals.energy <= 0.0 {
            Some(FailReason::EnergyDepletion)
        } else if self.vitals.temperature >= self.cfg.t_critical {
            Some(FailReason::ThermalRunaway)
        } else if self.vitals.memory <= self.cfg.memory_floor {
            Some(FailReason::MemoryCollapse)
        } else if self.vitals.stability <= self.cfg.stability_floor {
            Some(FailReason::StabilityCollapse)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.alive = false;
            self.fail_reason = Some(reason);
            warn!(reason = reason.as_str(), "organism failed");
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn fail_reason(&self) -> Option<FailReason> {
        self.fail_reason
    }

    /// Owned copy of the vital state for observers
    pub fn snapshot(&self) -> VitalsSnapshot {
        VitalsSnapshot {
            energy: self.vitals.energy,
            e_max: self.cfg.e_max,
            temperature: self.vitals.temperature,
            t_base: self.cfg.t_base,
            t_critical: self.cfg.t_critical,
            memory: self.vitals.memory,
            stability: self.vitals.stability,
        }
    }

    pub fn config(&self) -> &OrganismConfig {
        &self.cfg
    }
}
