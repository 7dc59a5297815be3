//! Vital state shared between the engine and its observers

use serde::{Deserialize, Serialize};

/// The four vital quantities that define organism health
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Stored energy in [0, e_max]
    pub energy: f64,
    /// Core temperature in Kelvin
    pub temperature: f64,
    /// Memory integrity, 1.0 = coherent, 0.0 = noise
    pub memory: f64,
    /// Structural stability, 1.0 = sound, 0.0 = collapsed
    pub stability: f64,
}

/// Why an organism stopped
///
/// Checked in a fixed order: energy, then temperature, then memory,
/// then stability. The first threshold crossed is the one recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    EnergyDepletion,
    ThermalRunaway,
    MemoryCollapse,
    StabilityCollapse,
}

impl FailReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailReason::EnergyDepletion => "energy_depletion",
            FailReason::ThermalRunaway => "thermal_runaway",
            FailReason::MemoryCollapse => "memory_collapse",
            FailReason::StabilityCollapse => "stability_collapse",
        }
    }
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned copy of the vital state, plus the bounds needed to read it
///
/// This is the only view of the engine that other components receive.
/// Mutation happens exclusively through engine methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    pub energy: f64,
    pub e_max: f64,
    pub temperature: f64,
    pub t_base: f64,
    pub t_critical: f64,
    pub memory: f64,
    pub stability: f64,
}

impl VitalsSnapshot {
    /// Stored energy as a fraction of capacity
    pub fn energy_fraction(&self) -> f64 {
        (self.energy / self.e_max).clamp(0.0, 1.0)
    }

    /// Normalized distance from the critical temperature
    ///
    /// 1.0 at ambient, 0.0 at the failure line.
    pub fn thermal_headroom(&self) -> f64 {
        ((self.t_critical - self.temperature) / (self.t_critical - self.t_base)).clamp(0.0, 1.0)
    }

    /// Whether any vital sits within `band` of its failure threshold,
    /// measured on each vital's normalized scale
    pub fn in_danger_band(&self, band: f64) -> bool {
        self.energy_fraction() < band
            || self.thermal_headroom() < band
            || self.memory < band
            || self.stability < band
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(energy: f64, temperature: f64) -> VitalsSnapshot {
        VitalsSnapshot {
            energy,
            e_max: 100.0,
            temperature,
            t_base: 298.0,
            t_critical: 373.0,
            memory: 1.0,
            stability: 1.0,
        }
    }

    #[test]
    fn test_energy_fraction_clamps_to_unit_interval() {
        assert_eq!(snapshot(120.0, 298.0).energy_fraction(), 1.0);
        assert_eq!(snapshot(-5.0, 298.0).energy_fraction(), 0.0);
        assert_eq!(snapshot(75.0, 298.0).energy_fraction(), 0.75);
    }

    #[test]
    fn test_thermal_headroom_spans_base_to_critical() {
        assert_eq!(snapshot(50.0, 298.0).thermal_headroom(), 1.0);
        assert_eq!(snapshot(50.0, 373.0).thermal_headroom(), 0.0);
        let mid = snapshot(50.0, 335.5).thermal_headroom();
        assert!((mid - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_danger_band_triggers_on_any_vital() {
        assert!(!snapshot(50.0, 298.0).in_danger_band(0.1));
        assert!(snapshot(5.0, 298.0).in_danger_band(0.1));
        assert!(snapshot(50.0, 367.0).in_danger_band(0.1));

        let mut frail = snapshot(50.0, 298.0);
        frail.stability = 0.05;
        assert!(frail.in_danger_band(0.1));
    }

    #[test]
    fn test_danger_band_width_is_caller_chosen() {
        let snap = snapshot(15.0, 298.0);
        assert!(!snap.in_danger_band(0.1));
        assert!(snap.in_danger_band(0.2));
        assert!(!snap.in_danger_band(0.0));
    }

    #[test]
    fn test_fail_reason_strings_are_stable() {
        assert_eq!(FailReason::EnergyDepletion.as_str(), "energy_depletion");
        assert_eq!(FailReason::ThermalRunaway.as_str(), "thermal_runaway");
        assert_eq!(FailReason::MemoryCollapse.as_str(), "memory_collapse");
        assert_eq!(FailReason::StabilityCollapse.as_str(), "stability_collapse");
    }
}
