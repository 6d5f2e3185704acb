use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use floorgen::{Algorithm, FloorContext, GenerationConfig, MapGenerator};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;
use tools::{floor_violations, init_logging, load_config};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the stream the run seeds are drawn from
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 100)]
    runs: u32,
    #[arg(short, long, default_value_t = 9)]
    max_depth: u32,
    #[arg(long, default_value_t = 80)]
    width: usize,
    #[arg(long, default_value_t = 44)]
    height: usize,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default, Serialize)]
struct SweepSummary {
    floors: u64,
    entities: u64,
    walkable_tiles: u64,
    failures: Vec<SweepFailure>,
}

#[derive(Debug, Serialize)]
struct SweepFailure {
    run_seed: u64,
    depth: u32,
    algorithm: Algorithm,
    reason: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let base_config = load_config(args.config.as_deref())?;

    println!(
        "Sweeping {} runs x {} depths x 3 algorithms on {}x{} (seed {})...",
        args.runs,
        args.max_depth + 1,
        args.width,
        args.height,
        args.seed
    );
    let mut seeds = ChaCha8Rng::seed_from_u64(args.seed);
    let mut summary = SweepSummary::default();

    for _ in 0..args.runs {
        let run_seed = seeds.next_u64();
        for depth in 0..=args.max_depth {
            for algorithm in [Algorithm::Cave, Algorithm::Rooms, Algorithm::Bsp] {
                let config: GenerationConfig = base_config.clone().with_algorithm(algorithm);
                let mut context = FloorContext::for_run(args.width, args.height, depth, run_seed);
                let mut fail = |reason: String| {
                    tracing::error!(run_seed, depth, ?algorithm, %reason, "invariant failed");
                    summary.failures.push(SweepFailure { run_seed, depth, algorithm, reason });
                };

                match MapGenerator::new(config).generate(&mut context) {
                    Ok(floor) => {
                        for violation in floor_violations(&floor) {
                            fail(violation);
                        }
                        summary.floors += 1;
                        summary.entities += floor.entities.len() as u64;
                        summary.walkable_tiles += floor.grid.walkable_count() as u64;
                    }
                    Err(err) => fail(err.to_string()),
                }
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let floors = summary.floors.max(1);
        println!("Generated {} floors.", summary.floors);
        println!("Average entities per floor: {:.2}", summary.entities as f64 / floors as f64);
        println!("Average walkable tiles: {:.1}", summary.walkable_tiles as f64 / floors as f64);
        println!("Failures: {}", summary.failures.len());
    }

    if !summary.failures.is_empty() {
        bail!("{} floors broke generation invariants", summary.failures.len());
    }
    println!("Sweep completed successfully.");
    Ok(())
}
