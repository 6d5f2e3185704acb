//! High-level floor generation orchestration that composes every generation stage.

mod pipeline;

use rand_chacha::rand_core::Rng;

use crate::error::GenerationError;

use super::config::GenerationConfig;
use super::connect::connect_regions;
use super::decorate::decorate;
use super::grid::TileGrid;
use super::model::GeneratedFloor;
use super::progression::algorithm_for_depth;
use super::seed::FloorContext;
use super::spawns::populate;

#[derive(Clone, Debug, Default)]
pub struct MapGenerator {
    config: GenerationConfig,
}

impl MapGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, context: &mut FloorContext) -> Result<GeneratedFloor, GenerationError> {
        self.generate_with(context.width, context.height, context.depth, &mut context.rng)
    }

    /// Runs validation, base layout, connectivity repair, decoration and population.
    ///
    /// The random stream is consumed in that order, so equal inputs give equal floors.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        depth: u32,
        rng: &mut R,
    ) -> Result<GeneratedFloor, GenerationError> {
        self.config.validate(width, height, depth)?;
        let algorithm = self.config.algorithm.unwrap_or_else(|| algorithm_for_depth(depth));

        let mut grid = TileGrid::filled_with_walls(width, height);
        pipeline::carve_base(&mut grid, rng, algorithm, &self.config);
        pipeline::ensure_open_space(&mut grid);
        let report = connect_regions(&mut grid, rng)?;
        pipeline::seal_border(&mut grid);

        let decorated = decorate(&mut grid, rng, &self.config.decor);
        let population = populate(&mut grid, rng, depth, &self.config.population);

        log::info!(
            "generated {width}x{height} {algorithm:?} floor at depth {depth}: {} regions joined by \
             {} tunnels, {decorated} decorated tiles, {} entities",
            report.regions_found,
            report.tunnels_carved,
            population.entities.len()
        );

        Ok(GeneratedFloor {
            grid,
            depth,
            algorithm,
            entry_tile: population.entry_tile,
            down_stairs_tile: population.down_stairs_tile,
            entities: population.entities,
        })
    }
}
