//! Homeostat - Entry Point
//!
//! Interactive console around a single organism and its world. Advance
//! ticks by hand, watch vitals and goals shift, and read back the
//! narrative the organism writes about itself.

use homeostat::core::config::{OrganismConfig, WorldConfig};
use homeostat::core::error::Result;
use homeostat::core::types::Tick;
use homeostat::simulation::{run_tick, Organism};
use homeostat::world::ResourceWorld;

use std::io::{self, Write};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("homeostat=info")
        .init();

    tracing::info!("Homeostat starting...");

    let organism_cfg = OrganismConfig::default();
    let world_cfg = WorldConfig::default();

    let mut organism = Organism::new(&organism_cfg);
    let mut world = ResourceWorld::new(&world_cfg, 42);
    let mut tick: Tick = 0;

    println!("\n=== HOMEOSTAT ===");
    println!("An artificial organism trying to stay alive");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance one tick");
    println!("  run <n>         - Run n ticks (stops on death)");
    println!("  status / s      - Show detailed status");
    println!("  goals           - List active goals");
    println!("  log <n>         - Show the last n narrative events");
    println!("  quit / q        - Exit");
    println!();

    loop {
        display_status(&organism, &world, tick);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            if organism.is_alive() {
                tick += 1;
                run_tick(&mut organism, &mut world, tick);
                match organism.identity.last() {
                    Some(event) => println!("Tick {}: {}", tick, event.description),
                    None => println!("Tick {} complete.", tick),
                }
            } else {
                println!("The organism is dead. Nothing stirs.");
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&organism, &world, tick);
            continue;
        }

        if input == "goals" {
            display_goals(&organism);
            continue;
        }

        if let Some(rest) = input.strip_prefix("log ") {
            if let Ok(n) = rest.parse::<usize>() {
                for event in organism.identity.tail(n) {
                    println!("  [{}] {}", event.tick, event.description);
                }
            } else {
                println!("Usage: log <number>");
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.parse::<u64>() {
                println!("Running {} ticks...", n);
                let mut ran = 0;
                for _ in 0..n {
                    if !organism.is_alive() {
                        break;
                    }
                    tick += 1;
                    run_tick(&mut organism, &mut world, tick);
                    ran += 1;
                }
                if organism.is_alive() {
                    println!("Completed {} ticks. Now at tick {}.", ran, tick);
                } else {
                    let cause = organism
                        .engine
                        .fail_reason()
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    println!("Organism died at tick {} ({}).", tick, cause);
                }
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, status, goals, log <n>, quit");
    }

    println!(
        "\nGoodbye! {} ticks elapsed, {} narrative events, organism {}.",
        tick,
        organism.identity.len(),
        if organism.is_alive() { "alive" } else { "dead" }
    );
    Ok(())
}

/// One-line summary shown before each prompt
fn display_status(organism: &Organism, world: &ResourceWorld, tick: Tick) {
    let snap = organism.engine.snapshot();
    let goal = organism
        .goals
        .top_goal()
        .map(|g| g.drive.to_string())
        .unwrap_or_else(|| "none".to_string());

    println!();
    println!(
        "--- Tick {} | Energy {:.0}% | Temp {:.1}K | Top goal: {} | Reserve {:.1} ---",
        tick,
        snap.energy_fraction() * 100.0,
        snap.temperature,
        goal,
        world.reserve
    );
    println!();
}

fn display_detailed_status(organism: &Organism, world: &ResourceWorld, tick: Tick) {
    let snap = organism.engine.snapshot();

    println!();
    println!("=== Status (Tick {}) ===", tick);
    println!(
        "  Vitals: Energy {:.1}/{:.1}, Temp {:.1}K (critical {:.1}K)",
        snap.energy, snap.e_max, snap.temperature, snap.t_critical
    );
    println!(
        "  Integrity: Memory {:.0}%, Stability {:.0}%",
        snap.memory * 100.0,
        snap.stability * 100.0
    );
    if snap.in_danger_band(organism.engine.config().danger_band) {
        println!("  WARNING: a vital is inside the danger band");
    }

    let (trait_name, level) = organism.ethics.character().dominant();
    let weights = organism.ethics.weights(&snap);
    println!(
        "  Character: dominant trait {} ({:.0}%), desperation {:.0}%",
        trait_name,
        level * 100.0,
        organism.ethics.desperation(&snap) * 100.0
    );
    println!(
        "  Moral weights: utilitarian {:.2}, deontological {:.2}, virtue {:.2}",
        weights.utilitarian, weights.deontological, weights.virtue
    );

    let levels = world.node_levels();
    let shown: Vec<String> = levels.iter().map(|l| format!("{:.1}", l)).collect();
    println!(
        "  World: nodes [{}], reserve {:.1}, last stressor: {}",
        shown.join(", "),
        world.reserve,
        world
            .last_stressor
            .map(|k| k.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "  Narrative: {} events, {} brushes with death",
        organism.identity.len(),
        organism
            .identity
            .near_death_count(organism.engine.config().danger_band)
    );
    println!();
}

fn display_goals(organism: &Organism) {
    let active = organism.goals.active();
    if active.is_empty() {
        println!("No active goals.");
        return;
    }
    println!();
    for goal in active {
        println!(
            "  {} - {} (priority {:.2}, since tick {})",
            goal.id, goal.drive, goal.priority, goal.created_at
        );
    }
    println!();
}
