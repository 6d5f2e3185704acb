use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use floorgen::{FloorContext, MapGenerator};
use tools::{AlgorithmArg, describe_entity, generate_runtime_seed, init_logging, load_config};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 80)]
    width: usize,
    #[arg(long, default_value_t = 44)]
    height: usize,
    #[arg(short, long, default_value_t = 0)]
    depth: u32,
    /// Run seed; a fresh one is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Base algorithm; rotates with depth when omitted
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,
    /// Path to a JSON generation config
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Log every generation stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(algorithm) = args.algorithm {
        config = config.with_algorithm(algorithm.into());
    }
    let seed = args.seed.unwrap_or_else(generate_runtime_seed);
    tracing::debug!(seed, depth = args.depth, "generating floor");

    let mut context = FloorContext::for_run(args.width, args.height, args.depth, seed);
    let floor = MapGenerator::new(config)
        .generate(&mut context)
        .with_context(|| format!("Failed to generate floor for seed {seed}"))?;

    match args.format {
        OutputFormat::Ascii => {
            print!("{}", floor.render_ascii());
            println!("Seed: {seed}");
            println!("Depth: {} ({:?})", floor.depth, floor.algorithm);
            println!("Entry: {:?}  Stairs: {:?}", floor.entry_tile, floor.down_stairs_tile);
            for entity in &floor.entities {
                println!("  {}", describe_entity(entity));
            }
            println!("Fingerprint: {:016x}", floor.fingerprint());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&floor)
                .with_context(|| "Failed to serialize floor JSON")?;
            println!("{json}");
        }
    }

    Ok(())
}
