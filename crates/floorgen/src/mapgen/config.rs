//! Tunable generation parameters with defaults that reproduce the reference dungeon.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

use super::progression::{self, SpawnTable};

pub const MIN_GRID_SIDE: usize = 8;
const MAX_BSP_DEPTH: u32 = 8;
const MAX_NEIGHBOR_COUNT: u8 = 8;
const MIN_ROOM_SIDE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Cave,
    Rooms,
    Bsp,
}

impl Algorithm {
    pub fn code(self) -> u8 {
        match self {
            Self::Cave => 0,
            Self::Rooms => 1,
            Self::Bsp => 2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base algorithm; `None` rotates through all of them by depth.
    pub algorithm: Option<Algorithm>,
    pub cave: CaveConfig,
    pub rooms: RoomConfig,
    pub bsp: BspConfig,
    pub decor: DecorConfig,
    pub population: PopulationConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingPhase {
    pub passes: u32,
    /// A tile with fewer walkable neighbours than this becomes wall.
    pub close_threshold: u8,
    /// A tile with more walkable neighbours than this becomes floor.
    pub open_threshold: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub open_percent: u8,
    pub phases: Vec<SmoothingPhase>,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            open_percent: 50,
            phases: vec![
                SmoothingPhase { passes: 7, close_threshold: 3, open_threshold: 5 },
                SmoothingPhase { passes: 4, close_threshold: 4, open_threshold: 4 },
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub max_rooms: usize,
    /// Outer room size including the wall ring.
    pub min_size: usize,
    pub max_size: usize,
    pub attempts: usize,
    /// Chance that a candidate is offset from the previous room instead of placed anywhere.
    pub chain_percent: u8,
    pub max_gap: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_rooms: 12,
            min_size: 5,
            max_size: 11,
            attempts: 200,
            chain_percent: 75,
            max_gap: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    pub split_depth: u32,
    pub min_padding: usize,
    pub max_padding: usize,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self { split_depth: 3, min_padding: 2, max_padding: 3 }
    }
}

/// Per-mille chances rolled once per floor tile, checked in field order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorConfig {
    pub vegetation_permille: u16,
    pub rubble_permille: u16,
    pub rock_permille: u16,
    pub spill_permille: u16,
    pub spill_steps: usize,
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self {
            vegetation_permille: 60,
            rubble_permille: 40,
            rock_permille: 20,
            spill_permille: 4,
            spill_steps: 12,
        }
    }
}

impl DecorConfig {
    pub fn total_permille(&self) -> u32 {
        u32::from(self.vegetation_permille)
            + u32::from(self.rubble_permille)
            + u32::from(self.rock_permille)
            + u32::from(self.spill_permille)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// `(min_depth, max_count)` rows; the highest row not above the depth wins.
    pub max_monsters_by_depth: Vec<(u32, usize)>,
    pub max_items_by_depth: Vec<(u32, usize)>,
    pub monsters: SpawnTable,
    pub items: SpawnTable,
    pub placement_attempts: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            max_monsters_by_depth: progression::MAX_MONSTERS_BY_DEPTH.to_vec(),
            max_items_by_depth: progression::MAX_ITEMS_BY_DEPTH.to_vec(),
            monsters: progression::default_monster_table(),
            items: progression::default_item_table(),
            placement_attempts: 256,
        }
    }
}

impl GenerationConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn validate(&self, width: usize, height: usize, depth: u32) -> Result<(), GenerationError> {
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(GenerationError::GridTooSmall { width, height, min: MIN_GRID_SIDE });
        }

        self.validate_cave()?;
        self.validate_rooms(width, height)?;
        self.validate_bsp()?;

        if self.decor.total_permille() > 1000 {
            return Err(GenerationError::ThresholdOutOfRange {
                field: "decor total permille",
                value: self.decor.total_permille() as usize,
            });
        }

        self.validate_population(depth)
    }

    fn validate_cave(&self) -> Result<(), GenerationError> {
        if self.cave.open_percent == 0 {
            return Err(GenerationError::NoOpenTiles);
        }
        if self.cave.open_percent > 100 {
            return Err(GenerationError::ThresholdOutOfRange {
                field: "cave.open_percent",
                value: usize::from(self.cave.open_percent),
            });
        }
        for phase in &self.cave.phases {
            for (field, value) in [
                ("cave.close_threshold", phase.close_threshold),
                ("cave.open_threshold", phase.open_threshold),
            ] {
                if value > MAX_NEIGHBOR_COUNT {
                    return Err(GenerationError::ThresholdOutOfRange {
                        field,
                        value: usize::from(value),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_rooms(&self, width: usize, height: usize) -> Result<(), GenerationError> {
        let rooms = &self.rooms;
        if rooms.min_size > rooms.max_size {
            return Err(GenerationError::InvalidRange {
                field: "rooms.size",
                min: rooms.min_size,
                max: rooms.max_size,
            });
        }
        if rooms.min_size < MIN_ROOM_SIDE {
            return Err(GenerationError::ThresholdOutOfRange {
                field: "rooms.min_size",
                value: rooms.min_size,
            });
        }
        if rooms.min_size > width.min(height) {
            let size = rooms.min_size;
            return Err(GenerationError::RoomSizeExceedsGrid { size, width, height });
        }
        if rooms.chain_percent > 100 {
            return Err(GenerationError::ThresholdOutOfRange {
                field: "rooms.chain_percent",
                value: usize::from(rooms.chain_percent),
            });
        }
        if rooms.max_gap == 0 {
            return Err(GenerationError::ThresholdOutOfRange { field: "rooms.max_gap", value: 0 });
        }
        Ok(())
    }

    fn validate_bsp(&self) -> Result<(), GenerationError> {
        let bsp = &self.bsp;
        if bsp.min_padding > bsp.max_padding {
            return Err(GenerationError::InvalidRange {
                field: "bsp.padding",
                min: bsp.min_padding,
                max: bsp.max_padding,
            });
        }
        if bsp.min_padding == 0 {
            return Err(GenerationError::ThresholdOutOfRange { field: "bsp.min_padding", value: 0 });
        }
        if bsp.split_depth > MAX_BSP_DEPTH {
            return Err(GenerationError::ThresholdOutOfRange {
                field: "bsp.split_depth",
                value: bsp.split_depth as usize,
            });
        }
        Ok(())
    }

    fn validate_population(&self, depth: u32) -> Result<(), GenerationError> {
        let population = &self.population;
        for (max_by_depth, table) in [
            (&population.max_monsters_by_depth, &population.monsters),
            (&population.max_items_by_depth, &population.items),
        ] {
            let max_count = progression::max_value_for_depth(max_by_depth, depth);
            if max_count > 0 && table.unlocked(depth).is_empty() {
                return Err(GenerationError::EmptySpawnTable { depth });
            }
        }
        Ok(())
    }
}
