pub mod content;
pub mod error;
pub mod mapgen;
pub mod types;

pub use content::{Archetype, Category, MonsterStats, monster_stats};
pub use error::GenerationError;
pub use mapgen::{
    Algorithm, EntityPlacement, FloorContext, GeneratedFloor, GenerationConfig, MapGenerator,
    TileGrid, derive_floor_seed, generate_floor, generate_floor_from_seed,
};
pub use types::*;
