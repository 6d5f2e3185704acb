//! Procedural floor generation split into one submodule per stage.

pub mod config;
pub mod connect;
pub mod grid;
pub mod model;
pub mod progression;

mod bsp;
mod cellular;
mod decorate;
mod dig;
mod generator;
mod rooms;
mod seed;
mod spawns;

use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;

pub use bsp::{BspNode, BspNodeId, BspTree, PartitionRect};
pub use config::{Algorithm, GenerationConfig};
pub use connect::{ConnectionReport, find_regions};
pub use decorate::decorate;
pub use generator::MapGenerator;
pub use grid::{GridView, GridViewMut, TileGrid};
pub use model::{EntityPlacement, GeneratedFloor};
pub use rooms::Room;
pub use seed::{FloorContext, derive_floor_seed};

/// Generates one floor with the default configuration from the caller's random stream.
pub fn generate_floor(
    width: usize,
    height: usize,
    depth: u32,
    rng: &mut ChaCha8Rng,
) -> Result<GeneratedFloor, GenerationError> {
    MapGenerator::default().generate_with(width, height, depth, rng)
}

/// Generates `depth` of the run identified by `run_seed`.
pub fn generate_floor_from_seed(
    width: usize,
    height: usize,
    depth: u32,
    run_seed: u64,
) -> Result<GeneratedFloor, GenerationError> {
    MapGenerator::default().generate(&mut FloorContext::for_run(width, height, depth, run_seed))
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn generate_floor_matches_map_generator_output() {
        let seed = 123_u64;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let from_helper = generate_floor(60, 30, 2, &mut rng).expect("valid size");

        let mut context = FloorContext::from_seed(60, 30, 2, seed);
        let from_generator = MapGenerator::default().generate(&mut context).expect("valid size");

        assert_eq!(from_helper, from_generator);
    }

    #[test]
    fn run_seed_gives_each_depth_its_own_stream() {
        let first = generate_floor_from_seed(50, 30, 3, 77).expect("valid size");
        let again = generate_floor_from_seed(50, 30, 3, 77).expect("valid size");
        let other = generate_floor_from_seed(50, 30, 6, 77).expect("valid size");

        assert_eq!(first.fingerprint(), again.fingerprint());
        assert_ne!(first.fingerprint(), other.fingerprint());
        assert_ne!(derive_floor_seed(77, 3), derive_floor_seed(77, 6));
    }
}
