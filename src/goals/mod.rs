//! Drives, urgency, and goal lifecycle
//!
//! Each drive couples to one vital reading and shares a single urgency
//! curve. Goals are bookkeeping over drives: spawned when urgency
//! crosses the spawn threshold, released when it falls back below the
//! release threshold, never duplicated per drive. Finished goals move
//! to a completed set rather than being dropped.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use tracing::info;

use crate::core::config::OrganismConfig;
use crate::core::error::{OrganismError, Result};
use crate::core::types::{GoalId, Tick};
use crate::metabolism::VitalsSnapshot;

/// The organism's four drives, each coupled to one vital reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveKind {
    Survival,
    ThermalRegulation,
    StructuralIntegrity,
    CoherentIdentity,
}

impl DriveKind {
    pub const ALL: [DriveKind; 4] = [
        DriveKind::Survival,
        DriveKind::ThermalRegulation,
        DriveKind::StructuralIntegrity,
        DriveKind::CoherentIdentity,
    ];

    /// Reading at which the drive's urgency is exactly 0.5
    pub fn crisis_point(&self) -> f64 {
        match self {
            DriveKind::Survival => 0.25,
            DriveKind::ThermalRegulation => 0.25,
            DriveKind::StructuralIntegrity => 0.25,
            DriveKind::CoherentIdentity => 0.5,
        }
    }

    /// Relative importance when several goals are active
    pub fn base_priority(&self) -> f64 {
        match self {
            DriveKind::Survival => 1.0,
            DriveKind::ThermalRegulation => 0.9,
            DriveKind::StructuralIntegrity => 0.8,
            DriveKind::CoherentIdentity => 0.7,
        }
    }

    /// The vital reading this drive watches, 1.0 = satisfied
    pub fn reading(&self, snapshot: &VitalsSnapshot) -> f64 {
        match self {
            DriveKind::Survival => snapshot.energy_fraction(),
            DriveKind::ThermalRegulation => snapshot.thermal_headroom(),
            DriveKind::StructuralIntegrity => snapshot.stability,
            DriveKind::CoherentIdentity => snapshot.memory,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriveKind::Survival => "survival",
            DriveKind::ThermalRegulation => "thermal_regulation",
            DriveKind::StructuralIntegrity => "structural_integrity",
            DriveKind::CoherentIdentity => "coherent_identity",
        }
    }
}

impl std::fmt::Display for DriveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shared urgency curve
///
/// Linear in the coupled reading, clamped to [0, 1]; worth 1.0 at a
/// reading of zero and exactly 0.5 at the drive's crisis point. Every
/// drive uses this one function with its own crisis point.
pub fn urgency(reading: f64, crisis_point: f64) -> f64 {
    (1.0 - reading / (2.0 * crisis_point)).clamp(0.0, 1.0)
}

/// An active goal: a drive that has crossed its spawn threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub drive: DriveKind,
    /// base_priority x urgency, frozen at spawn
    pub priority: f64,
    pub created_at: Tick,
}

/// What changed in the goal set during one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalChange {
    Spawned(Goal),
    Released { goal: Goal, urgency: f64 },
}

/// Owns the active and completed goal sets
#[derive(Debug, Clone)]
pub struct GoalManager {
    active: Vec<Goal>,
    completed: Vec<Goal>,
    next_id: u64,
    spawn_threshold: f64,
    release_threshold: f64,
}

impl GoalManager {
    pub fn new(cfg: &OrganismConfig) -> Self {
        Self {
            active: Vec::new(),
            completed: Vec::new(),
            next_id: 0,
            spawn_threshold: cfg.goal_spawn_threshold,
            release_threshold: cfg.goal_release_threshold,
        }
    }

    /// Re-derive urgency for every drive and reconcile the goal set
    ///
    /// A drive gets at most one active goal. Priority is frozen at
    /// spawn; the gap between the two thresholds keeps a drive
    /// hovering near the line from churning.
    pub fn update(&mut self, snapshot: &VitalsSnapshot, tick: Tick) -> Vec<GoalChange> {
        let mut changes = Vec::new();

        for drive in DriveKind::ALL {
            let u = urgency(drive.reading(snapshot), drive.crisis_point());

            if u >= self.spawn_threshold {
                if !self.has_goal(drive) {
                    let goal = Goal {
                        id: GoalId(self.next_id),
                        drive,
                        priority: drive.base_priority() * u,
                        created_at: tick,
                    };
                    self.next_id += 1;
                    self.active.push(goal);
                    info!(goal = %goal.id, drive = drive.as_str(), urgency = u, "goal spawned");
                    changes.push(GoalChange::Spawned(goal));
                }
            } else if u <= self.release_threshold {
                if let Some(pos) = self.active.iter().position(|g| g.drive == drive) {
                    let goal = self.active.remove(pos);
                    self.completed.push(goal);
                    info!(goal = %goal.id, drive = drive.as_str(), urgency = u, "goal released");
                    changes.push(GoalChange::Released { goal, urgency: u });
                }
            }
        }

        changes
    }

    /// Highest-priority active goal; ties go to the earliest id
    pub fn top_goal(&self) -> Option<&Goal> {
        self.active
            .iter()
            .max_by_key(|g| (OrderedFloat(g.priority), Reverse(g.id)))
    }

    /// Move a goal from the active set to the completed set
    pub fn complete(&mut self, id: GoalId) -> Result<Goal> {
        match self.active.iter().position(|g| g.id == id) {
            Some(pos) => {
                let goal = self.active.remove(pos);
                self.completed.push(goal);
                Ok(goal)
            }
            None => Err(OrganismError::GoalNotFound(id)),
        }
    }

    pub fn has_goal(&self, drive: DriveKind) -> bool {
        self.active.iter().any(|g| g.drive == drive)
    }

    pub fn active(&self) -> &[Goal] {
        &self.active
    }

    /// Every goal ever completed or released, in completion order
    pub fn completed(&self) -> &[Goal] {
        &self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn manager() -> GoalManager {
        GoalManager::new(&OrganismConfig::default())
    }

    #[test]
    fn test_urgency_is_half_at_the_crisis_point() {
        for drive in DriveKind::ALL {
            let c = drive.crisis_point();
            assert!((urgency(c, c) - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_urgency_is_monotone_nonincreasing() {
        let mut last = f64::INFINITY;
        for step in 0..=100 {
            let reading = step as f64 / 100.0;
            let u = urgency(reading, 0.25);
            assert!(u <= last);
            last = u;
        }
    }

    #[test]
    fn test_urgency_saturates_at_both_ends() {
        assert_eq!(urgency(0.0, 0.25), 1.0);
        assert_eq!(urgency(0.5, 0.25), 0.0);
        assert_eq!(urgency(1.0, 0.25), 0.0);
    }

    #[test]
    fn test_low_energy_spawns_a_survival_goal() {
        let mut mgr = manager();
        let changes = mgr.update(&snapshot(19.0), 5);

        assert_eq!(changes.len(), 1);
        assert!(matches!(
            changes[0],
            GoalChange::Spawned(Goal {
                drive: DriveKind::Survival,
                ..
            })
        ));
        assert!(mgr.has_goal(DriveKind::Survival));
    }

    #[test]
    fn test_moderate_energy_spawns_nothing() {
        let mut mgr = manager();
        // urgency(0.21, 0.25) = 0.58, under the 0.6 spawn threshold
        assert!(mgr.update(&snapshot(21.0), 5).is_empty());
    }

    #[test]
    fn test_no_duplicate_goal_per_drive() {
        let mut mgr = manager();
        mgr.update(&snapshot(15.0), 1);
        let again = mgr.update(&snapshot(10.0), 2);

        assert!(again.is_empty());
        assert_eq!(mgr.active().len(), 1);
    }

    #[test]
    fn test_hysteresis_band_holds_the_goal() {
        let mut mgr = manager();
        mgr.update(&snapshot(15.0), 1);

        // urgency(0.25) = 0.5: between release (0.3) and spawn (0.6)
        assert!(mgr.update(&snapshot(25.0), 2).is_empty());
        assert!(mgr.has_goal(DriveKind::Survival));

        // urgency(0.4) = 0.2: below release, goal goes
        let changes = mgr.update(&snapshot(40.0), 3);
        assert!(matches!(changes[0], GoalChange::Released { .. }));
        assert!(!mgr.has_goal(DriveKind::Survival));
    }

    #[test]
    fn test_priority_is_frozen_at_spawn() {
        let mut mgr = manager();
        mgr.update(&snapshot(15.0), 1);
        let before = mgr.active()[0].priority;
        assert!((before - 0.7).abs() < 1e-12);

        mgr.update(&snapshot(5.0), 2);
        assert_eq!(mgr.active()[0].priority, before);
    }

    #[test]
    fn test_top_goal_prefers_priority_then_earliest_id() {
        let mut mgr = manager();
        mgr.active.push(Goal {
            id: GoalId(0),
            drive: DriveKind::Survival,
            priority: 0.7,
            created_at: 1,
        });
        mgr.active.push(Goal {
            id: GoalId(1),
            drive: DriveKind::ThermalRegulation,
            priority: 0.9,
            created_at: 2,
        });
        mgr.active.push(Goal {
            id: GoalId(2),
            drive: DriveKind::StructuralIntegrity,
            priority: 0.9,
            created_at: 3,
        });

        let top = mgr.top_goal().unwrap();
        assert_eq!(top.id, GoalId(1));
    }

    #[test]
    fn test_complete_unknown_goal_is_an_error() {
        let mut mgr = manager();
        let err = mgr.complete(GoalId(99));
        assert!(matches!(err, Err(OrganismError::GoalNotFound(GoalId(99)))));
        assert!(mgr.completed().is_empty());
    }

    #[test]
    fn test_complete_moves_the_goal_to_the_completed_set() {
        let mut mgr = manager();
        mgr.update(&snapshot(15.0), 1);
        let id = mgr.active()[0].id;

        let completed = mgr.complete(id).unwrap();
        assert_eq!(completed.id, id);
        assert!(mgr.active().is_empty());
        assert_eq!(mgr.completed().len(), 1);
        assert_eq!(mgr.completed()[0].id, id);
    }

    #[test]
    fn test_hysteresis_release_lands_in_the_completed_set() {
        let mut mgr = manager();
        mgr.update(&snapshot(15.0), 1);
        mgr.update(&snapshot(40.0), 2);

        assert!(mgr.active().is_empty());
        assert_eq!(mgr.completed().len(), 1);
        assert_eq!(mgr.completed()[0].drive, DriveKind::Survival);
    }

    #[test]
    fn test_completed_goal_does_not_block_a_fresh_spawn() {
        let mut mgr = manager();
        mgr.update(&snapshot(15.0), 1);
        mgr.update(&snapshot(40.0), 2);
        mgr.update(&snapshot(15.0), 3);

        assert!(mgr.has_goal(DriveKind::Survival));
        assert_eq!(mgr.completed().len(), 1);
        assert_ne!(mgr.active()[0].id, mgr.completed()[0].id);
    }
}
