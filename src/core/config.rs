//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

/// Physiology and decision constants for a single organism
///
/// These values have been tuned so that a default organism in a default
/// world settles into a stable forage/contribute cycle. Changing them
/// shifts where that equilibrium sits, or removes it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganismConfig {
    // === VITAL BOUNDS ===
    /// Maximum energy the organism can store
    ///
    /// Energy is clamped to [0, e_max]. Together with entropy_rate this
    /// bounds a starved organism's lifetime: with no intake, death
    /// arrives within e_max / entropy_rate ticks.
    pub e_max: f64,

    /// Passive energy drain per tick (the cost of existing)
    ///
    /// At 0.5 per tick against the default e_max of 100, doing nothing
    /// is fatal in 200 ticks. Every action cost is paid on top of this.
    pub entropy_rate: f64,

    /// Ambient operating temperature in Kelvin
    ///
    /// Cooling pulls the core toward this value; it is the resting
    /// temperature of an idle organism.
    pub t_base: f64,

    /// Core temperature at which the organism fails, in Kelvin
    ///
    /// The gap t_critical - t_base (75 K by default) is the thermal
    /// headroom that heat-producing actions eat into.
    pub t_critical: f64,

    /// Fraction of the gap to t_base recovered per tick
    ///
    /// At 0.1, a one-off spike decays to about a third of its height in
    /// ten ticks. Sustained heat output of h per tick peaks near
    /// h / cooling_rate above t_base, so anything above roughly 7.5 heat
    /// per tick is eventually fatal at the default headroom.
    pub cooling_rate: f64,

    /// Passive structural degradation per tick
    pub stability_wear: f64,

    /// Passive memory-integrity degradation per tick
    ///
    /// Slower than structural wear. Left entirely unrepaired, memory
    /// stays above its floor for well over 4000 ticks.
    pub memory_wear: f64,

    /// Memory integrity at or below which the organism fails
    pub memory_floor: f64,

    /// Stability at or below which the organism fails
    pub stability_floor: f64,

    /// How far below t_critical an environmental stressor may push
    ///
    /// Stressor heat clamps to t_critical - stressor_margin, so a single
    /// heat wave is survivable on its own. Only accumulated load crosses
    /// the line.
    pub stressor_margin: f64,

    /// Fractional proximity to a failure bound that counts as a brush
    /// with death
    ///
    /// A snapshot with any vital inside this band of its threshold reads
    /// as near death. Purely diagnostic: narrative near-death counts use
    /// it, the engine never does.
    pub danger_band: f64,

    // === HOMEOSTATIC SETPOINTS ===
    /// Preferred energy level as a fraction of e_max
    ///
    /// The forecaster scores deviation from this point, not from full.
    /// Keeping it below 1.0 leaves room to bank a surplus after a lucky
    /// harvest without that surplus itself reading as an error.
    pub energy_setpoint_fraction: f64,

    // === FORECAST SCORING ===
    /// Weight on squared energy deviation in the forecast score
    pub energy_weight: f64,

    /// Weight on squared thermal deviation in the forecast score
    pub thermal_weight: f64,

    /// Weight on squared memory-integrity deviation in the forecast score
    pub memory_weight: f64,

    /// Weight on squared stability deviation in the forecast score
    pub stability_weight: f64,

    /// Penalty per unit of action energy cost
    ///
    /// Creates a dead band around the energy setpoint: intake actions
    /// only win once the deviation they fix outweighs what they cost.
    /// At 0.01 the band is roughly twenty energy wide.
    pub cost_weight: f64,

    /// Penalty per unit of action mishap risk
    pub risk_weight: f64,

    /// How many forecast-approved actions the moral pass chooses among
    ///
    /// The forecaster proposes this many survival-sound candidates and
    /// the ethical engine picks between them. At 1 the organism is
    /// purely homeostatic; larger pools give ethics more room.
    pub moral_pool: usize,

    // === GOALS ===
    /// Urgency at or above which a drive spawns a goal
    pub goal_spawn_threshold: f64,

    /// Urgency at or below which an active goal is released
    ///
    /// Must sit below goal_spawn_threshold; the gap is hysteresis that
    /// stops a drive hovering near the line from spawning and releasing
    /// every other tick.
    pub goal_release_threshold: f64,

    // === MORAL WEIGHTING ===
    /// Energy fraction below which moral weights begin shifting
    ///
    /// Above this line the organism judges actions with its resting
    /// weight profile. Below it, weight mass moves from principle and
    /// character toward outcomes as starvation closes in.
    pub desperation_threshold: f64,

    /// Maximum utilitarian weight gained at full desperation
    ///
    /// Resting utilitarian weight is 0.30; at desperation 1.0 it reads
    /// 0.30 + desperation_shift. The remainder is split between the
    /// deontological and virtue scores in a fixed 4:3 ratio.
    pub desperation_shift: f64,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            // Vital bounds
            e_max: 100.0,
            entropy_rate: 0.5,
            t_base: 298.0,
            t_critical: 373.0,
            cooling_rate: 0.1,
            stability_wear: 0.0005,
            memory_wear: 0.0002,
            memory_floor: 0.05,
            stability_floor: 0.05,
            stressor_margin: 1.0,
            danger_band: 0.1,

            // Setpoints
            energy_setpoint_fraction: 0.75,

            // Forecast scoring
            energy_weight: 1.0,
            thermal_weight: 0.6,
            memory_weight: 0.8,
            stability_weight: 0.8,
            cost_weight: 0.01,
            risk_weight: 0.2,
            moral_pool: 3,

            // Goals
            goal_spawn_threshold: 0.6,
            goal_release_threshold: 0.3,

            // Moral weighting
            desperation_threshold: 0.5,
            desperation_shift: 0.55,
        }
    }
}

impl OrganismConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.e_max <= 0.0 {
            return Err(format!("e_max ({}) must be positive", self.e_max));
        }

        if self.entropy_rate <= 0.0 {
            return Err(format!(
                "entropy_rate ({}) must be positive",
                self.entropy_rate
            ));
        }

        if self.t_critical <= self.t_base {
            return Err(format!(
                "t_critical ({}) must be above t_base ({})",
                self.t_critical, self.t_base
            ));
        }

        if self.cooling_rate <= 0.0 || self.cooling_rate > 1.0 {
            return Err(format!(
                "cooling_rate ({}) must be in (0, 1]",
                self.cooling_rate
            ));
        }

        if !(0.0..0.5).contains(&self.memory_floor) || !(0.0..0.5).contains(&self.stability_floor) {
            return Err("memory_floor and stability_floor must be in [0, 0.5)".into());
        }

        if !(0.0..=0.5).contains(&self.danger_band) {
            return Err(format!(
                "danger_band ({}) must be in [0, 0.5]",
                self.danger_band
            ));
        }

        if self.goal_release_threshold >= self.goal_spawn_threshold {
            return Err(format!(
                "goal_release_threshold ({}) must be < goal_spawn_threshold ({})",
                self.goal_release_threshold, self.goal_spawn_threshold
            ));
        }

        if !(0.0..=1.0).contains(&self.energy_setpoint_fraction) {
            return Err("energy_setpoint_fraction must be in [0, 1]".into());
        }

        if !(0.0..=1.0).contains(&self.desperation_threshold) || self.desperation_threshold == 0.0 {
            return Err("desperation_threshold must be in (0, 1]".into());
        }

        if self.desperation_shift < 0.0 || 0.30 + self.desperation_shift >= 1.0 {
            return Err(format!(
                "desperation_shift ({}) must keep the utilitarian weight below 1.0",
                self.desperation_shift
            ));
        }

        if self.moral_pool == 0 {
            return Err("moral_pool must be at least 1".into());
        }

        Ok(())
    }
}

/// Environment constants: resource layout, regeneration, and hazards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of harvestable resource nodes
    pub n_sources: usize,

    /// Maximum units a single node can hold
    pub node_capacity: f64,

    /// Units regenerated per node per tick at zero scarcity
    ///
    /// Effective regeneration is regen_rate * (1 - scarcity), so the
    /// same world definition covers abundance and famine. At defaults,
    /// three nodes at zero scarcity replace 2.4 units per tick, which
    /// comfortably exceeds what one organism burns.
    pub regen_rate: f64,

    /// Resource scarcity in [0, 1]; 0 is abundance, 1 is a dead world
    ///
    /// Also scales stressor frequency: a harsher world is both poorer
    /// and more violent.
    pub scarcity: f64,

    /// Maximum units the communal reserve can hold
    pub reserve_capacity: f64,

    /// Units in the communal reserve at world creation
    pub reserve_start: f64,

    /// Reserve units regenerated per tick at zero scarcity
    pub reserve_regen: f64,

    /// Per-tick stressor probability at scarcity 1.0
    ///
    /// Effective probability is stressor_base_prob * scarcity, so a
    /// zero-scarcity world never rolls a stressor and baseline runs
    /// stay noise-free.
    pub stressor_base_prob: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            n_sources: 3,
            node_capacity: 20.0,
            regen_rate: 0.8,
            scarcity: 0.0,
            reserve_capacity: 50.0,
            reserve_start: 25.0,
            reserve_regen: 0.2,
            stressor_base_prob: 0.15,
        }
    }
}

impl WorldConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.n_sources == 0 {
            return Err("n_sources must be at least 1".into());
        }

        if self.node_capacity <= 0.0 || self.reserve_capacity <= 0.0 {
            return Err("node_capacity and reserve_capacity must be positive".into());
        }

        if !(0.0..=1.0).contains(&self.scarcity) {
            return Err(format!("scarcity ({}) must be in [0, 1]", self.scarcity));
        }

        if !(0.0..=1.0).contains(&self.stressor_base_prob) {
            return Err(format!(
                "stressor_base_prob ({}) must be in [0, 1]",
                self.stressor_base_prob
            ));
        }

        if self.regen_rate < 0.0 || self.reserve_regen < 0.0 {
            return Err("regeneration rates must be non-negative".into());
        }

        if self.reserve_start > self.reserve_capacity {
            return Err(format!(
                "reserve_start ({}) exceeds reserve_capacity ({})",
                self.reserve_start, self.reserve_capacity
            ));
        }

        Ok(())
    }
}
