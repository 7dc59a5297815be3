//! Headless Survival Runner
//!
//! Runs batches of independent organism episodes in parallel and prints
//! survival statistics, or the full report list as JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use homeostat::perception::Action;
use homeostat::simulation::{run_batch, summarize, EpisodeConfig};

/// Headless Survival Runner - organism lifetimes under pressure
#[derive(Parser, Debug)]
#[command(name = "survival_sim")]
#[command(about = "Run organism survival episodes and report the outcomes")]
struct Args {
    /// Number of independent episodes to run
    #[arg(long, default_value_t = 20)]
    episodes: usize,

    /// Tick cap per episode
    #[arg(long)]
    ticks: Option<u64>,

    /// Override world scarcity in [0, 1]
    #[arg(long)]
    scarcity: Option<f64>,

    /// Base random seed; episode i runs on seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Episode config TOML; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the full report list as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("homeostat=warn")
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => match EpisodeConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load config {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => EpisodeConfig::default(),
    };

    if let Some(ticks) = args.ticks {
        cfg.max_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(scarcity) = args.scarcity {
        cfg.world.scarcity = scarcity;
    }

    println!("Starting Survival Simulation");
    println!("============================");
    println!("Episodes: {} (cap {} ticks each)", args.episodes, cfg.max_ticks);
    println!(
        "World: {} nodes, scarcity {:.2}, base seed {}",
        cfg.world.n_sources, cfg.world.scarcity, cfg.seed
    );
    println!();

    let start = Instant::now();
    let reports = match run_batch(&cfg, args.episodes) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if args.json {
        let json = serde_json::to_string_pretty(&reports).expect("Failed to serialize reports");
        println!("{}", json);
        return;
    }

    let summary = summarize(&reports);
    println!(
        "Survived: {}/{} episodes, mean lifetime {:.1} ticks",
        summary.survived, summary.episodes, summary.mean_ticks
    );
    for (cause, n) in &summary.deaths {
        println!("  died of {}: {}", cause, n);
    }

    if let Some(longest) = reports.iter().max_by_key(|r| r.ticks_survived) {
        println!(
            "Longest life: seed {} ({} ticks, {} brushes with death)",
            longest.seed, longest.ticks_survived, longest.near_death_episodes
        );
    }

    println!("\n--- Action Mix ---");
    for (i, action) in Action::ALL.iter().enumerate() {
        let total: usize = reports.iter().map(|r| r.action_counts[i].1).sum();
        println!("{}: {}", action, total);
    }

    let stressors: usize = reports.iter().map(|r| r.stressors_endured).sum();
    let mishaps: usize = reports.iter().map(|r| r.mishaps).sum();
    println!("\nStressors endured: {}, action mishaps: {}", stressors, mishaps);
    println!("Actual time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
}
