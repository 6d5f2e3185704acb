//! Tunnel routing shared by every generator that links two points.

use rand_chacha::rand_core::Rng;

use crate::types::{Pos, Tile};

use super::grid::TileGrid;
use super::seed::coin_flip;

/// Integer line from `start` to `end`, both endpoints included.
pub(crate) fn line(start: Pos, end: Pos) -> Vec<Pos> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let step_x = if start.x < end.x { 1 } else { -1 };
    let step_y = if start.y < end.y { 1 } else { -1 };

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut current = start;
    let mut error = dx + dy;
    loop {
        points.push(current);
        if current == end {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += step_x;
        }
        if doubled <= dx {
            error += dx;
            current.y += step_y;
        }
    }
    points
}

/// Two axis-aligned legs through the corner `(end.x, start.y)` or `(start.x, end.y)`.
pub(crate) fn l_path(start: Pos, end: Pos, horizontal_first: bool) -> Vec<Pos> {
    let corner = if horizontal_first {
        Pos { y: start.y, x: end.x }
    } else {
        Pos { y: end.y, x: start.x }
    };
    let mut path = line(start, corner);
    path.extend(line(corner, end).into_iter().skip(1));
    path
}

/// Carves a randomly oriented L-shaped tunnel and returns how many tiles it opened.
pub(crate) fn carve_tunnel<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
    start: Pos,
    end: Pos,
) -> usize {
    let horizontal_first = coin_flip(rng);
    let mut opened = 0;
    for pos in l_path(start, end, horizontal_first) {
        debug_assert!(grid.is_interior(pos), "tunnel step {pos:?} touches the border");
        if !grid.get(pos).walkable {
            grid.set(pos, Tile::floor());
            opened += 1;
        }
    }
    opened
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;

    #[test]
    fn line_includes_both_endpoints() {
        let points = line(Pos::new(2, 3), Pos::new(6, 3));
        assert_eq!(points.first(), Some(&Pos::new(2, 3)));
        assert_eq!(points.last(), Some(&Pos::new(6, 3)));
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn line_to_self_is_a_single_point() {
        assert_eq!(line(Pos::new(4, 4), Pos::new(4, 4)), vec![Pos::new(4, 4)]);
    }

    #[test]
    fn l_path_moves_one_axis_at_a_time() {
        for horizontal_first in [true, false] {
            let path = l_path(Pos::new(9, 2), Pos::new(3, 7), horizontal_first);
            assert_eq!(path.len(), 6 + 5 + 1);
            for pair in path.windows(2) {
                let step = pair[0].x.abs_diff(pair[1].x) + pair[0].y.abs_diff(pair[1].y);
                assert_eq!(step, 1, "diagonal or repeated step in {path:?}");
            }
        }
    }

    #[test]
    fn carved_tunnel_links_the_endpoints() {
        let mut grid = TileGrid::filled_with_walls(12, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let opened = carve_tunnel(&mut grid, &mut rng, Pos::new(2, 2), Pos::new(9, 7));

        assert_eq!(opened, 7 + 5 + 1);
        assert!(grid.is_walkable(Pos::new(2, 2)));
        assert!(grid.is_walkable(Pos::new(9, 7)));
    }
}
