//! Public data models for a finished floor and the entities placed on it.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::content::Archetype;
use crate::types::Pos;

use super::config::Algorithm;
use super::grid::TileGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EntityPlacement {
    pub archetype: Archetype,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedFloor {
    pub grid: TileGrid,
    pub depth: u32,
    pub algorithm: Algorithm,
    pub entry_tile: Pos,
    pub down_stairs_tile: Pos,
    /// Placement order: monsters with their companions first, then items.
    pub entities: Vec<EntityPlacement>,
}

impl GeneratedFloor {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        bytes.extend(self.depth.to_le_bytes());
        bytes.push(self.algorithm.code());
        for tile in self.grid.tiles() {
            bytes.push(tile.kind.code());
        }
        bytes.extend(self.entry_tile.y.to_le_bytes());
        bytes.extend(self.entry_tile.x.to_le_bytes());
        bytes.extend(self.down_stairs_tile.y.to_le_bytes());
        bytes.extend(self.down_stairs_tile.x.to_le_bytes());

        bytes.extend((self.entities.len() as u32).to_le_bytes());
        for entity in &self.entities {
            bytes.push(entity.archetype.code());
            bytes.extend(entity.pos.y.to_le_bytes());
            bytes.extend(entity.pos.x.to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub fn entity_at(&self, pos: Pos) -> Option<&EntityPlacement> {
        self.entities.iter().find(|entity| entity.pos == pos)
    }

    /// Plain-text rendering: entity glyphs over tile glyphs, one line per row.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.grid.width() + 1) * self.grid.height());
        for pos in self.grid.positions() {
            let glyph = match self.entity_at(pos) {
                Some(entity) => entity.archetype.glyph(),
                None => self.grid.get(pos).light.glyph,
            };
            out.push(glyph);
            if pos.x as usize == self.grid.width() - 1 {
                out.push('\n');
            }
        }
        out
    }
}
