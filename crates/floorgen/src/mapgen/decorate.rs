//! Cosmetic terrain variants laid over plain floor tiles.

use rand_chacha::rand_core::Rng;

use crate::types::{Pos, TileKind};

use super::config::DecorConfig;
use super::grid::TileGrid;
use super::seed::random_usize;

const VEGETATION: [TileKind; 3] = [TileKind::LooseGrass, TileKind::Grass, TileKind::DenseGrass];
const RUBBLE: [TileKind; 2] = [TileKind::LooseRubble, TileKind::Rubble];
const ROCK: [TileKind; 2] = [TileKind::Stalactite, TileKind::Stalagmite];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Feature {
    Vegetation,
    Rubble,
    Rock,
    Spill,
}

fn roll_feature<R: Rng + ?Sized>(rng: &mut R, config: &DecorConfig) -> Option<Feature> {
    let roll = random_usize(rng, 0, 999) as u32;
    let buckets = [
        (config.vegetation_permille, Feature::Vegetation),
        (config.rubble_permille, Feature::Rubble),
        (config.rock_permille, Feature::Rock),
        (config.spill_permille, Feature::Spill),
    ];
    let mut threshold = 0_u32;
    for (permille, feature) in buckets {
        threshold += u32::from(permille);
        if roll < threshold {
            return Some(feature);
        }
    }
    None
}

fn pick<R: Rng + ?Sized>(rng: &mut R, variants: &[TileKind]) -> TileKind {
    variants[random_usize(rng, 0, variants.len() - 1)]
}

/// Random walk of `ShallowWater` from `start`; returns how many floor tiles it covered.
fn spill<R: Rng + ?Sized>(grid: &mut TileGrid, rng: &mut R, start: Pos, steps: usize) -> usize {
    let mut changed = 0;
    let mut current = start;
    for _ in 0..steps {
        if grid.kind_at(current) == TileKind::Floor {
            grid.set_kind(current, TileKind::ShallowWater);
            changed += 1;
        }
        let next = current.orthogonal_neighbors()[random_usize(rng, 0, 3)];
        if !grid.is_walkable(next) {
            break;
        }
        current = next;
    }
    changed
}

/// Rolls once per `Floor` tile in row-major order and returns the number of tiles changed.
///
/// Only `Floor` tiles are ever rewritten and every variant is walkable, so the walkable
/// set and its connectivity are unchanged.
pub fn decorate<R: Rng + ?Sized>(grid: &mut TileGrid, rng: &mut R, config: &DecorConfig) -> usize {
    let mut changed = 0;
    let positions: Vec<Pos> = grid.positions().collect();
    for pos in positions {
        if grid.kind_at(pos) != TileKind::Floor {
            continue;
        }
        let Some(feature) = roll_feature(rng, config) else {
            continue;
        };
        let kind = match feature {
            Feature::Vegetation => pick(rng, &VEGETATION),
            Feature::Rubble => pick(rng, &RUBBLE),
            Feature::Rock => pick(rng, &ROCK),
            Feature::Spill => {
                changed += spill(grid, rng, pos, config.spill_steps);
                continue;
            }
        };
        grid.set_kind(pos, kind);
        changed += 1;
    }
    log::debug!("decorated {changed} tiles");
    changed
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;
    use crate::types::Tile;

    fn open_room(width: usize, height: usize) -> TileGrid {
        let mut grid = TileGrid::filled_with_walls(width, height);
        grid.slice_mut(1, 1, width - 2, height - 2).fill(Tile::floor());
        grid
    }

    fn walkable_mask(grid: &TileGrid) -> Vec<bool> {
        grid.tiles().iter().map(|tile| tile.walkable).collect()
    }

    #[test]
    fn decoration_preserves_walkability() {
        let mut grid = open_room(40, 20);
        let before = walkable_mask(&grid);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let changed = decorate(&mut grid, &mut rng, &DecorConfig::default());

        assert!(changed > 0);
        assert_eq!(walkable_mask(&grid), before);
        let decorated = grid.tiles().iter().filter(|tile| tile.kind.is_decoration()).count();
        assert_eq!(decorated, changed);
    }

    #[test]
    fn zero_chances_leave_grid_untouched() {
        let mut grid = open_room(20, 12);
        let snapshot = grid.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = DecorConfig {
            vegetation_permille: 0,
            rubble_permille: 0,
            rock_permille: 0,
            spill_permille: 0,
            spill_steps: 12,
        };

        assert_eq!(decorate(&mut grid, &mut rng, &config), 0);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn all_walls_is_a_no_op() {
        let mut grid = TileGrid::filled_with_walls(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(decorate(&mut grid, &mut rng, &DecorConfig::default()), 0);
    }

    #[test]
    fn spill_walk_stays_on_walkable_tiles() {
        let mut grid = TileGrid::filled_with_walls(5, 5);
        grid.set(Pos::new(2, 2), Tile::floor());
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let changed = spill(&mut grid, &mut rng, Pos::new(2, 2), 20);

        assert_eq!(changed, 1);
        assert_eq!(grid.kind_at(Pos::new(2, 2)), TileKind::ShallowWater);
        assert_eq!(grid.walkable_count(), 1);
    }

    #[test]
    fn full_vegetation_chance_covers_every_floor_tile() {
        let mut grid = open_room(12, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = DecorConfig {
            vegetation_permille: 1000,
            rubble_permille: 0,
            rock_permille: 0,
            spill_permille: 0,
            spill_steps: 0,
        };

        let changed = decorate(&mut grid, &mut rng, &config);

        assert_eq!(changed, 10 * 6);
        for pos in grid.walkable_positions() {
            assert!(VEGETATION.contains(&grid.kind_at(pos)), "{pos:?} not vegetation");
        }
    }
}
