//! End-to-end survival properties
//!
//! These tests run whole lifetimes through the public API and verify
//! the headline behaviors:
//! - Starvation is bounded by capacity over entropy
//! - An abundant world sustains the organism indefinitely
//! - Sustained computation overheats the core
//! - Scarcity grinds the organism down and the death is recorded
//! - The narrative accounts for every tick lived

use homeostat::core::config::{OrganismConfig, WorldConfig};
use homeostat::identity::EventType;
use homeostat::metabolism::FailReason;
use homeostat::perception::{self, Action};
use homeostat::simulation::{run_episode, run_tick, EpisodeConfig, Organism};
use homeostat::world::ResourceWorld;

fn barren_world() -> WorldConfig {
    WorldConfig {
        node_capacity: 0.001,
        regen_rate: 0.0,
        reserve_start: 0.0,
        reserve_regen: 0.0,
        scarcity: 1.0,
        stressor_base_prob: 0.0,
        ..Default::default()
    }
}

// ============================================================================
// Starvation Bound
// ============================================================================

#[test]
fn test_starved_organism_dies_of_energy_depletion_within_bound() {
    let cfg = EpisodeConfig {
        seed: 11,
        max_ticks: 400,
        world: barren_world(),
        ..Default::default()
    };
    let report = run_episode(&cfg).unwrap();

    let bound = (cfg.organism.e_max / cfg.organism.entropy_rate).ceil() as u64 + 1;
    assert!(!report.alive);
    assert_eq!(report.fail_reason, Some(FailReason::EnergyDepletion));
    assert!(
        report.ticks_survived < bound,
        "survived {} ticks with nothing to eat",
        report.ticks_survived
    );
    assert_eq!(report.final_vitals.energy, 0.0);
}

// ============================================================================
// Baseline Viability
// ============================================================================

#[test]
fn test_abundant_world_sustains_a_thousand_ticks() {
    let report = run_episode(&EpisodeConfig::default()).unwrap();

    assert!(report.alive);
    assert_eq!(report.ticks_survived, 1000);
    assert_eq!(report.fail_reason, None);
    assert_eq!(report.stressors_endured, 0);
    assert!(report.final_vitals.energy_fraction() > 0.25);

    // Birth plus one action per tick; no goals fire in abundance
    assert_eq!(report.goals_spawned, 0);
    assert_eq!(report.narrative_len, 1001);

    let computes = report
        .action_counts
        .iter()
        .find(|&&(action, _)| action == Action::ComputeTask)
        .map(|&(_, n)| n)
        .unwrap();
    assert_eq!(computes, 0, "compute should never beat upkeep in abundance");
}

// ============================================================================
// Thermal Runaway
// ============================================================================

#[test]
fn test_sustained_compute_overheats_the_core() {
    let mut organism = Organism::new(&OrganismConfig::default());
    let mut world = ResourceWorld::new(&WorldConfig::default(), 3);

    let mut ticks = 0;
    for _ in 0..40 {
        perception::apply(Action::ComputeTask, &mut organism.engine, &mut world).unwrap();
        if !organism.engine.tick() {
            break;
        }
        ticks += 1;
    }

    assert_eq!(
        organism.engine.fail_reason(),
        Some(FailReason::ThermalRunaway)
    );
    // Heat output 10.0 against cooling 0.1: the post-burst peak crosses
    // critical on the 14th compute, so 13 full ticks are survived
    assert!((12..=15).contains(&ticks), "died after {} ticks", ticks);
    let snap = organism.engine.snapshot();
    assert!(snap.energy > 0.0, "heat must kill before starvation does");
}

// ============================================================================
// Endurance Under Scarcity
// ============================================================================

#[test]
fn test_scarce_world_grinds_the_organism_down() {
    let cfg = EpisodeConfig {
        seed: 1,
        max_ticks: 400,
        organism: OrganismConfig {
            e_max: 20.0,
            ..Default::default()
        },
        world: WorldConfig {
            scarcity: 0.99,
            ..Default::default()
        },
    };
    let report = run_episode(&cfg).unwrap();

    assert!(!report.alive, "a 20-unit tank cannot outlast a dead world");
    assert!(report.fail_reason.is_some());
    assert!(report.ticks_survived > 5);
    assert!(report.ticks_survived < 400);
    assert!(report.stressors_endured > 0);
    assert!(
        report.near_death_episodes >= 1,
        "death must be preceded by at least one recorded brush with it"
    );
}

// ============================================================================
// Narrative Accounting
// ============================================================================

#[test]
fn test_narrative_accounts_for_every_tick_lived() {
    let mut organism = Organism::new(&OrganismConfig::default());
    let mut world = ResourceWorld::new(&WorldConfig::default(), 5);

    for tick in 1..=120 {
        assert!(run_tick(&mut organism, &mut world, tick));
    }

    let log = &organism.identity;
    assert!(matches!(log.events[0].event_type, EventType::Birth));

    for tick in 1..=120 {
        let taken = log
            .events_at(tick)
            .filter(|e| matches!(e.event_type, EventType::ActionTaken { .. }))
            .count();
        assert_eq!(taken, 1, "tick {} should record exactly one action", tick);
    }

    for (i, event) in log.events.iter().enumerate() {
        assert_eq!(event.id, i as u64, "event ids must be dense and ordered");
    }
    for pair in log.events.windows(2) {
        assert!(pair[0].tick <= pair[1].tick);
    }
}
