//! Failure modes of a floor generation call.
//!
//! Everything here aborts the whole call: no partially built floor is ever returned.
//! Placement shortfalls are not errors and never show up in this type.

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum")]
    GridTooSmall { width: usize, height: usize, min: usize },

    #[error("invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange { field: &'static str, min: usize, max: usize },

    #[error("room size {size} does not fit inside a {width}x{height} grid")]
    RoomSizeExceedsGrid { size: usize, width: usize, height: usize },

    #[error("{field} is {value}, outside the accepted range")]
    ThresholdOutOfRange { field: &'static str, value: usize },

    #[error("cave open chance is zero, no floor tiles would ever be seeded")]
    NoOpenTiles,

    #[error("spawn table unlocks nothing at depth {depth}")]
    EmptySpawnTable { depth: u32 },

    /// Connectivity repair finished with more than one walkable region left.
    #[error("connectivity repair left {regions} disjoint walkable regions")]
    ConnectivityViolation { regions: usize },
}
