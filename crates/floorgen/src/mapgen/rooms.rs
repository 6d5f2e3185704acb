//! Rectangular room chaining: the room geometry type and the room-by-room generator.

use rand_chacha::rand_core::Rng;
use serde::Serialize;

use crate::types::{Pos, Tile};

use super::config::RoomConfig;
use super::dig::carve_tunnel;
use super::grid::TileGrid;
use super::seed::{random_i32, random_usize, roll_percent};

/// Room rectangle whose outermost ring is wall; `width`/`height` include that ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    /// The floor area without the wall ring, if the room is big enough to have one.
    pub fn inner(self) -> Option<Room> {
        (self.width >= 3 && self.height >= 3).then(|| Room {
            x: self.x + 1,
            y: self.y + 1,
            width: self.width - 2,
            height: self.height - 2,
        })
    }

    /// Inclusive overlap, so rooms sharing a wall tile intersect.
    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn fits_in(self, grid: &TileGrid) -> bool {
        self.right() < grid.width() && self.bottom() < grid.height()
    }

    pub(crate) fn carve(self, grid: &mut TileGrid) {
        grid.slice_mut(self.x, self.y, self.right(), self.bottom())
            .fill_ringed(Tile::wall(), Tile::floor());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    North,
    South,
    East,
    West,
}

/// Places up to `max_rooms` rooms within the attempt budget and links each to its predecessor.
pub(crate) fn generate_rooms<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
    config: &RoomConfig,
) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::new();
    let mut out_of_bounds = 0_usize;
    let mut overlapping = 0_usize;

    for _ in 0..config.attempts {
        if rooms.len() >= config.max_rooms {
            break;
        }
        let room_width = random_usize(rng, config.min_size, config.max_size);
        let room_height = random_usize(rng, config.min_size, config.max_size);

        let origin = match rooms.last() {
            Some(previous) if roll_percent(rng, config.chain_percent) => {
                Some(offset_origin(rng, previous, room_width, room_height, config.max_gap))
            }
            _ => random_origin(rng, grid, room_width, room_height),
        };
        let Some(candidate) = origin
            .and_then(|(x, y)| Some((usize::try_from(x).ok()?, usize::try_from(y).ok()?)))
            .map(|(x, y)| Room { x, y, width: room_width, height: room_height })
            .filter(|room| room.fits_in(grid))
        else {
            out_of_bounds += 1;
            continue;
        };

        if rooms.iter().any(|existing| existing.intersects(&candidate)) {
            overlapping += 1;
            continue;
        }

        candidate.carve(grid);
        if let Some(previous) = rooms.last() {
            carve_tunnel(grid, rng, previous.center(), candidate.center());
        }
        rooms.push(candidate);
    }

    if rooms.len() < config.max_rooms {
        log::warn!(
            "placed {} of {} rooms ({out_of_bounds} out of bounds, {overlapping} overlapping)",
            rooms.len(),
            config.max_rooms
        );
    }
    rooms
}

fn random_origin<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &TileGrid,
    room_width: usize,
    room_height: usize,
) -> Option<(i32, i32)> {
    if room_width > grid.width() || room_height > grid.height() {
        return None;
    }
    let x = random_usize(rng, 0, grid.width() - room_width);
    let y = random_usize(rng, 0, grid.height() - room_height);
    Some((x as i32, y as i32))
}

fn offset_origin<R: Rng + ?Sized>(
    rng: &mut R,
    previous: &Room,
    room_width: usize,
    room_height: usize,
    max_gap: usize,
) -> (i32, i32) {
    let direction = match random_usize(rng, 0, 3) {
        0 => Direction::North,
        1 => Direction::South,
        2 => Direction::East,
        _ => Direction::West,
    };
    let gap = random_usize(rng, 1, max_gap) as i32;
    let (width, height) = (room_width as i32, room_height as i32);
    let (left, top) = (previous.x as i32, previous.y as i32);
    let (right, bottom) = (previous.right() as i32, previous.bottom() as i32);

    match direction {
        Direction::North => (random_i32(rng, left - width + 1, right), top - gap - height),
        Direction::South => (random_i32(rng, left - width + 1, right), bottom + 1 + gap),
        Direction::East => (right + 1 + gap, random_i32(rng, top - height + 1, bottom)),
        Direction::West => (left - gap - width, random_i32(rng, top - height + 1, bottom)),
    }
}
