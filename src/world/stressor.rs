//! Environmental stressors
//!
//! Stressors are sudden external insults rolled stochastically each
//! tick. Frequency scales with scarcity; a zero-scarcity world never
//! produces one.

use serde::{Deserialize, Serialize};

/// Kinds of environmental insult the world can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressorKind {
    /// Ambient heat spike, clamped below the critical temperature
    HeatWave,
    /// Sudden loss of memory integrity
    MemoryCorruption,
    /// Sudden loss of structural stability
    StructuralShock,
}

impl StressorKind {
    pub const ALL: [StressorKind; 3] = [
        StressorKind::HeatWave,
        StressorKind::MemoryCorruption,
        StressorKind::StructuralShock,
    ];

    /// Damage magnitude, in the units of the vital it strikes
    ///
    /// Heat waves are Kelvin; the other two are integrity fractions.
    pub fn magnitude(&self) -> f64 {
        match self {
            StressorKind::HeatWave => 20.0,
            StressorKind::MemoryCorruption => 0.15,
            StressorKind::StructuralShock => 0.12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressorKind::HeatWave => "heat_wave",
            StressorKind::MemoryCorruption => "memory_corruption",
            StressorKind::StructuralShock => "structural_shock",
        }
    }
}

impl std::fmt::Display for StressorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
