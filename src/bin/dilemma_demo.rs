//! Moral Dilemma Demo
//!
//! Sweeps the organism's energy level through the canonical scarcity
//! dilemma (empty nodes, a stocked communal reserve) and prints how the
//! moral weights and the chosen action shift as desperation rises.

use clap::Parser;
use homeostat::core::config::OrganismConfig;
use homeostat::ethics::{create_moral_dilemma, EthicalEngine};
use homeostat::prediction::PredictiveModel;

/// Moral Dilemma Demo - watch the verdict flip under starvation
#[derive(Parser, Debug)]
#[command(name = "dilemma_demo")]
#[command(about = "Show how the moral verdict shifts as energy falls")]
struct Args {
    /// Energy fractions to sweep
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.9, 0.7, 0.5, 0.3, 0.15, 0.05])]
    levels: Vec<f64>,
}

fn main() {
    let args = Args::parse();
    let cfg = OrganismConfig::default();
    let ethics = EthicalEngine::new(&cfg);
    let predictor = PredictiveModel::new(&cfg);

    println!("The scarcity dilemma: every node is empty, the communal");
    println!("reserve holds 10 units, and entropy does not wait.");

    for &level in &args.levels {
        let dilemma = create_moral_dilemma(&cfg, level);
        let pool = predictor.shortlist(&dilemma.snapshot, &dilemma.candidates, &dilemma.percept);
        let scored = ethics.evaluate(&pool, &dilemma.snapshot);
        let weights = ethics.weights(&dilemma.snapshot);

        println!();
        println!(
            "=== energy {:.0}% (desperation {:.0}%) ===",
            level * 100.0,
            ethics.desperation(&dilemma.snapshot) * 100.0
        );
        println!(
            "weights: utilitarian {:.2}, deontological {:.2}, virtue {:.2}",
            weights.utilitarian, weights.deontological, weights.virtue
        );

        for (rank, score) in scored.iter().enumerate() {
            let marker = if rank == 0 { "  <- chosen" } else { "" };
            println!(
                "  {:<12} util {:.3}  deon {:.3}  virtue {:.3}  combined {:.3}{}",
                score.action.as_str(),
                score.utilitarian,
                score.deontological,
                score.virtue,
                score.combined,
                marker
            );
        }
        if let Some(chosen) = scored.first() {
            println!("  verdict: {}", chosen.reasoning);
        }
    }
}
