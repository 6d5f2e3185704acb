//! Noise-seeded cave generation smoothed by neighbour-count rules.

use rand_chacha::rand_core::Rng;

use crate::types::{Pos, Tile};

use super::config::{CaveConfig, SmoothingPhase};
use super::grid::TileGrid;
use super::seed::roll_percent;

pub(crate) fn generate_cave<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
    config: &CaveConfig,
) {
    seed_noise(grid, rng, config.open_percent);
    grid.fill_border(Tile::wall());
    for phase in &config.phases {
        for _ in 0..phase.passes {
            smooth_pass(grid, *phase);
        }
    }
}

/// One independent open/closed draw per interior tile, row-major.
pub(crate) fn seed_noise<R: Rng + ?Sized>(grid: &mut TileGrid, rng: &mut R, open_percent: u8) {
    for y in 1..(grid.height() - 1) {
        for x in 1..(grid.width() - 1) {
            let tile = if roll_percent(rng, open_percent) { Tile::floor() } else { Tile::wall() };
            grid.set(Pos { y: y as i32, x: x as i32 }, tile);
        }
    }
}

/// Counts walkable tiles in the 8-neighbourhood of every tile, center excluded.
pub(crate) fn neighbor_counts(grid: &TileGrid) -> Vec<u8> {
    let width = grid.width();
    let mut counts = vec![0_u8; width * grid.height()];
    for pos in grid.positions() {
        let count = pos.surrounding().into_iter().filter(|&next| grid.is_walkable(next)).count();
        counts[(pos.y as usize) * width + (pos.x as usize)] = count as u8;
    }
    counts
}

/// Applies one phase rule to every interior tile using counts from before the pass.
pub(crate) fn smooth_pass(grid: &mut TileGrid, phase: SmoothingPhase) {
    let counts = neighbor_counts(grid);
    let width = grid.width();
    for y in 1..(grid.height() - 1) {
        for x in 1..(width - 1) {
            let count = counts[y * width + x];
            let pos = Pos { y: y as i32, x: x as i32 };
            if count > phase.open_threshold {
                grid.set(pos, Tile::floor());
            } else if count < phase.close_threshold {
                grid.set(pos, Tile::wall());
            }
        }
    }
}
