//! Shared plumbing for the floor generation command-line tools.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::ValueEnum;
use floorgen::mapgen::connect::find_regions;
use floorgen::{
    Algorithm, EntityPlacement, GeneratedFloor, GenerationConfig, TileKind, derive_floor_seed,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Cave,
    Rooms,
    Bsp,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Cave => Algorithm::Cave,
            AlgorithmArg::Rooms => Algorithm::Rooms,
            AlgorithmArg::Bsp => Algorithm::Bsp,
        }
    }
}

/// Installs a stderr subscriber; `RUST_LOG` wins over the `verbose` default.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

/// Reads a JSON generation config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<GenerationConfig> {
    let Some(path) = path else {
        return Ok(GenerationConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config JSON: {}", path.display()))
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    derive_floor_seed(entropy, 0)
}

/// One listing line: display name, archetype id and coordinates.
pub fn describe_entity(entity: &EntityPlacement) -> String {
    format!(
        "{} [{}] at ({}, {})",
        entity.archetype.name(),
        entity.archetype.id(),
        entity.pos.x,
        entity.pos.y
    )
}

/// Every floor-level rule the generator promises, as human-readable violations.
pub fn floor_violations(floor: &GeneratedFloor) -> Vec<String> {
    let grid = &floor.grid;
    let mut violations = Vec::new();

    let open_border = grid.border_positions().filter(|&pos| grid.get(pos).walkable).count();
    if open_border > 0 {
        violations.push(format!("{open_border} walkable border tiles"));
    }
    let regions = find_regions(grid).len();
    if regions != 1 {
        violations.push(format!("{regions} walkable regions"));
    }
    if floor.entry_tile == floor.down_stairs_tile {
        violations.push(format!("entry and stairs share {:?}", floor.entry_tile));
    }
    if grid.kind_at(floor.down_stairs_tile) != TileKind::DownStairs {
        violations.push(format!("stairs tile {:?} is not marked", floor.down_stairs_tile));
    }

    let mut occupied = BTreeSet::from([floor.entry_tile, floor.down_stairs_tile]);
    for entity in &floor.entities {
        if !grid.is_walkable(entity.pos) {
            violations.push(format!("{:?} on blocked tile {:?}", entity.archetype, entity.pos));
        } else if !occupied.insert(entity.pos) {
            violations.push(format!("{:?} shares tile {:?}", entity.archetype, entity.pos));
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use floorgen::{Archetype, Pos, generate_floor_from_seed};

    use super::*;

    #[test]
    fn missing_path_uses_default_config() {
        let config = load_config(None).expect("defaults always load");
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn loads_partial_config_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"algorithm":"rooms","rooms":{{"max_rooms":4}}}}"#).expect("write config");

        let config = load_config(Some(file.path())).expect("config should parse");

        assert_eq!(config.algorithm, Some(Algorithm::Rooms));
        assert_eq!(config.rooms.max_rooms, 4);
        assert_eq!(config.cave, GenerationConfig::default().cave);
    }

    #[test]
    fn malformed_config_reports_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write config");

        let err = load_config(Some(&path)).expect_err("malformed JSON should fail");
        assert!(format!("{err:#}").contains("broken.json"), "unexpected error: {err:#}");
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_config(Some(&dir.path().join("missing.json"))).expect_err("no file");
        assert!(format!("{err:#}").contains("Failed to read config file"));
    }

    #[test]
    fn generated_floor_has_no_violations() {
        let floor = generate_floor_from_seed(80, 44, 4, 31_337).expect("floor");
        assert_eq!(floor_violations(&floor), Vec::<String>::new());
    }

    #[test]
    fn tampered_floor_reports_violations() {
        let mut floor = generate_floor_from_seed(40, 25, 0, 8).expect("floor");
        floor.down_stairs_tile = floor.entry_tile;
        let violations = floor_violations(&floor);
        assert!(violations.iter().any(|violation| violation.contains("entry and stairs")));
    }

    #[test]
    fn entity_listing_names_the_archetype_id() {
        let entity = EntityPlacement { archetype: Archetype::Goblin, pos: Pos::new(12, 7) };
        assert_eq!(describe_entity(&entity), "Goblin [monster_goblin] at (12, 7)");
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }

    #[test]
    fn algorithm_arguments_map_onto_generator_algorithms() {
        assert_eq!(Algorithm::from(AlgorithmArg::Bsp), Algorithm::Bsp);
        assert_eq!(Algorithm::from(AlgorithmArg::Cave), Algorithm::Cave);
    }
}
