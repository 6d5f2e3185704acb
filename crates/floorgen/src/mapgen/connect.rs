//! Connectivity repair: flood-fill regions, then tunnel between the closest ones.

use std::collections::VecDeque;

use rand_chacha::rand_core::Rng;

use crate::error::GenerationError;
use crate::types::Pos;

use super::dig::carve_tunnel;
use super::grid::TileGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionReport {
    pub regions_found: usize,
    pub tunnels_carved: usize,
}

/// 4-connected walkable components, each in BFS discovery order, seeded row-major.
pub fn find_regions(grid: &TileGrid) -> Vec<Vec<Pos>> {
    let width = grid.width();
    let mut visited = vec![false; width * grid.height()];
    let index = |pos: Pos| (pos.y as usize) * width + (pos.x as usize);
    let mut regions = Vec::new();

    for start in grid.positions() {
        if visited[index(start)] || !grid.get(start).walkable {
            continue;
        }
        visited[index(start)] = true;
        let mut region = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            region.push(pos);
            for next in pos.orthogonal_neighbors() {
                if grid.is_walkable(next) && !visited[index(next)] {
                    visited[index(next)] = true;
                    queue.push_back(next);
                }
            }
        }
        regions.push(region);
    }
    regions
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self { parent: (0..len).collect() }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, left: usize, right: usize) -> bool {
        let (left, right) = (self.find(left), self.find(right));
        if left == right {
            return false;
        }
        self.parent[right] = left;
        true
    }
}

/// The cell of `regions[own]` closest to any cell of another region.
fn representative(regions: &[Vec<Pos>], own: usize) -> Pos {
    let mut best = regions[own][0];
    let mut best_distance = u64::MAX;
    for &cell in &regions[own] {
        let others = regions.iter().enumerate().filter(|(index, _)| *index != own);
        for (_, other) in others {
            for &target in other {
                let distance = cell.distance_squared(target);
                if distance < best_distance {
                    best_distance = distance;
                    best = cell;
                }
            }
        }
    }
    best
}

/// Joins every walkable region into one and verifies the result with a second flood fill.
pub fn connect_regions<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
) -> Result<ConnectionReport, GenerationError> {
    let regions = find_regions(grid);
    let regions_found = regions.len();
    log::debug!("connector found {regions_found} regions");
    if regions_found < 2 {
        return Ok(ConnectionReport { regions_found, tunnels_carved: 0 });
    }

    let points: Vec<Pos> =
        (0..regions_found).map(|index| representative(&regions, index)).collect();
    let mut pairs = Vec::with_capacity(regions_found * (regions_found - 1) / 2);
    for left in 0..regions_found {
        for right in (left + 1)..regions_found {
            pairs.push((points[left].distance_squared(points[right]), left, right));
        }
    }
    pairs.sort_unstable();

    let mut components = DisjointSet::new(regions_found);
    let mut tunnels_carved = 0;
    for (_, left, right) in pairs {
        if tunnels_carved == regions_found - 1 {
            break;
        }
        if components.union(left, right) {
            carve_tunnel(grid, rng, points[left], points[right]);
            tunnels_carved += 1;
        }
    }

    let remaining = find_regions(grid).len();
    if remaining != 1 {
        return Err(GenerationError::ConnectivityViolation { regions: remaining });
    }
    Ok(ConnectionReport { regions_found, tunnels_carved })
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;
    use crate::types::Tile;

    fn two_blocks() -> TileGrid {
        let mut grid = TileGrid::filled_with_walls(30, 20);
        grid.slice_mut(2, 2, 6, 6).fill(Tile::floor());
        grid.slice_mut(20, 10, 24, 14).fill(Tile::floor());
        grid
    }

    #[test]
    fn separated_blocks_are_two_regions() {
        let regions = find_regions(&two_blocks());
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].len(), 25);
        assert_eq!(regions[0][0], Pos::new(2, 2));
        assert_eq!(regions[1][0], Pos::new(20, 10));
    }

    #[test]
    fn diagonal_contact_does_not_join_regions() {
        let mut grid = TileGrid::filled_with_walls(6, 6);
        grid.set(Pos::new(2, 2), Tile::floor());
        grid.set(Pos::new(3, 3), Tile::floor());
        assert_eq!(find_regions(&grid).len(), 2);
    }

    #[test]
    fn disconnected_blocks_are_joined_by_one_tunnel() {
        let mut grid = two_blocks();
        let before = grid.walkable_count();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let report = connect_regions(&mut grid, &mut rng).expect("blocks can be joined");

        assert_eq!(report, ConnectionReport { regions_found: 2, tunnels_carved: 1 });
        assert_eq!(find_regions(&grid).len(), 1);
        assert!(grid.walkable_count() > before);
    }

    #[test]
    fn representatives_face_each_other() {
        let regions = find_regions(&two_blocks());
        assert_eq!(representative(&regions, 0), Pos::new(6, 6));
        assert_eq!(representative(&regions, 1), Pos::new(20, 10));
    }

    #[test]
    fn single_region_is_untouched() {
        let mut grid = TileGrid::filled_with_walls(10, 10);
        grid.slice_mut(1, 1, 8, 8).fill(Tile::floor());
        let snapshot = grid.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let report = connect_regions(&mut grid, &mut rng).expect("already connected");

        assert_eq!(report.tunnels_carved, 0);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn many_scattered_cells_end_up_connected() {
        let mut grid = TileGrid::filled_with_walls(25, 25);
        for y in (2..23).step_by(4) {
            for x in (2..23).step_by(5) {
                grid.set(Pos::new(x, y), Tile::floor());
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let report = connect_regions(&mut grid, &mut rng).expect("cells can be joined");

        assert_eq!(report.regions_found, 6 * 5);
        assert_eq!(report.tunnels_carved, report.regions_found - 1);
        assert_eq!(find_regions(&grid).len(), 1);
    }
}
