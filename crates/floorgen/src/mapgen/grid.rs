//! Dense tile storage and the sub-rectangle views generators work through.

use serde::Serialize;

use crate::types::{Pos, Tile, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, fill: Tile) -> Self {
        Self { width, height, tiles: vec![fill; width * height] }
    }

    pub fn filled_with_walls(width: usize, height: usize) -> Self {
        Self::new(width, height, Tile::wall())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// True for tiles strictly inside the outer wall ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x > 0
            && pos.y > 0
            && (pos.x as usize) < self.width - 1
            && (pos.y as usize) < self.height - 1
    }

    pub fn get(&self, pos: Pos) -> &Tile {
        &self.tiles[self.index(pos)]
    }

    pub fn set(&mut self, pos: Pos, tile: Tile) {
        let index = self.index(pos);
        self.tiles[index] = tile;
    }

    pub fn set_kind(&mut self, pos: Pos, kind: TileKind) {
        self.set(pos, kind.tile());
    }

    pub fn kind_at(&self, pos: Pos) -> TileKind {
        self.get(pos).kind
    }

    /// Out-of-bounds positions read as non-walkable so neighbourhood scans need no guard.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.get(pos).walkable
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn walkable_positions(&self) -> Vec<Pos> {
        self.positions().filter(|&pos| self.get(pos).walkable).collect()
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.walkable).count()
    }

    pub fn border_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(|&pos| !self.is_interior(pos))
    }

    pub fn fill_border(&mut self, tile: Tile) {
        let border: Vec<Pos> = self.border_positions().collect();
        for pos in border {
            self.set(pos, tile);
        }
    }

    /// Read-only window over the inclusive rectangle `(x0, y0)..=(x1, y1)`.
    pub fn slice(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> GridView<'_> {
        self.check_window(x0, y0, x1, y1);
        GridView { grid: self, x0, y0, x1, y1 }
    }

    pub fn slice_mut(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> GridViewMut<'_> {
        self.check_window(x0, y0, x1, y1);
        GridViewMut { grid: self, x0, y0, x1, y1 }
    }

    fn check_window(&self, x0: usize, y0: usize, x1: usize, y1: usize) {
        assert!(
            x0 <= x1 && y0 <= y1 && x1 < self.width && y1 < self.height,
            "window ({x0},{y0})..=({x1},{y1}) outside {}x{} grid",
            self.width,
            self.height
        );
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(
            self.in_bounds(pos),
            "tile {pos:?} outside {}x{} grid",
            self.width,
            self.height
        );
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

pub struct GridView<'a> {
    grid: &'a TileGrid,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl GridView<'_> {
    pub fn width(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0 + 1
    }

    /// Tile at a position relative to the window origin.
    pub fn get(&self, local: Pos) -> &Tile {
        assert!(
            local.x >= 0
                && local.y >= 0
                && (local.x as usize) < self.width()
                && (local.y as usize) < self.height(),
            "local {local:?} outside {}x{} window",
            self.width(),
            self.height()
        );
        self.grid.get(Pos { y: local.y + self.y0 as i32, x: local.x + self.x0 as i32 })
    }

    /// Grid-space positions covered by the window, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.y0..=self.y1)
            .flat_map(move |y| (self.x0..=self.x1).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn walkable_count(&self) -> usize {
        self.positions().filter(|&pos| self.grid.get(pos).walkable).count()
    }
}

pub struct GridViewMut<'a> {
    grid: &'a mut TileGrid,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl GridViewMut<'_> {
    pub fn fill(&mut self, tile: Tile) {
        for y in self.y0..=self.y1 {
            for x in self.x0..=self.x1 {
                self.grid.set(Pos { y: y as i32, x: x as i32 }, tile);
            }
        }
    }

    /// Walls the outer ring of the window and fills everything inside it.
    pub fn fill_ringed(&mut self, ring: Tile, inside: Tile) {
        for y in self.y0..=self.y1 {
            for x in self.x0..=self.x1 {
                let on_ring = x == self.x0 || x == self.x1 || y == self.y0 || y == self.y1;
                let tile = if on_ring { ring } else { inside };
                self.grid.set(Pos { y: y as i32, x: x as i32 }, tile);
            }
        }
    }
}
