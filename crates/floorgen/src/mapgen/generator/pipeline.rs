//! Individual floor-construction stages the generator runs in a fixed order.

use rand_chacha::rand_core::Rng;

use crate::types::Tile;

use super::super::bsp::generate_bsp;
use super::super::cellular::generate_cave;
use super::super::config::{Algorithm, GenerationConfig};
use super::super::grid::TileGrid;
use super::super::rooms::generate_rooms;

/// Walkable tiles a floor needs so the entry point and the stairs can differ.
pub(super) const MIN_WALKABLE_TILES: usize = 2;

pub(super) fn carve_base<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
    algorithm: Algorithm,
    config: &GenerationConfig,
) {
    match algorithm {
        Algorithm::Cave => generate_cave(grid, rng, &config.cave),
        Algorithm::Rooms => {
            generate_rooms(grid, rng, &config.rooms);
        }
        Algorithm::Bsp => {
            let layout = generate_bsp(grid, rng, &config.bsp);
            log::debug!(
                "bsp kept {} rooms across {} leaves",
                layout.rooms.len(),
                layout.tree.leaves().len()
            );
        }
    }
}

/// Opens a small room around the grid center when the base generator left too little floor.
///
/// Returns whether the fallback room was carved.
pub(super) fn ensure_open_space(grid: &mut TileGrid) -> bool {
    if grid.walkable_count() >= MIN_WALKABLE_TILES {
        return false;
    }
    let (center_x, center_y) = (grid.width() / 2, grid.height() / 2);
    grid.slice_mut(center_x - 1, center_y - 1, center_x + 1, center_y + 1).fill(Tile::floor());
    log::debug!("no usable floor left, carved fallback room at ({center_x}, {center_y})");
    true
}

pub(super) fn seal_border(grid: &mut TileGrid) {
    debug_assert!(
        grid.border_positions().all(|pos| !grid.get(pos).walkable),
        "a generator opened the outer wall ring"
    );
    grid.fill_border(Tile::wall());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;

    #[test]
    fn fallback_room_stays_inside_the_smallest_grid() {
        let mut grid = TileGrid::filled_with_walls(8, 8);
        assert!(ensure_open_space(&mut grid));
        assert_eq!(grid.walkable_count(), 9);
        assert!(grid.walkable_positions().into_iter().all(|pos| grid.is_interior(pos)));
    }

    #[test]
    fn fallback_room_is_skipped_when_floor_exists() {
        let mut grid = TileGrid::filled_with_walls(10, 10);
        grid.slice_mut(2, 2, 3, 2).fill(Tile::floor());
        assert!(!ensure_open_space(&mut grid));
        assert_eq!(grid.walkable_count(), 2);
    }

    #[test]
    fn single_floor_tile_still_triggers_fallback() {
        let mut grid = TileGrid::filled_with_walls(10, 10);
        grid.set(Pos::new(2, 2), Tile::floor());
        assert!(ensure_open_space(&mut grid));
        assert_eq!(grid.walkable_count(), 10);
    }
}
