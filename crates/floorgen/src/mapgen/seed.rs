//! Seed derivation, the per-floor random stream, and the draw helpers every stage uses.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Parameters and random source for one floor's generation.
///
/// The stream is advanced in a fixed stage order, so two contexts built from the same
/// seed reproduce the same floor.
pub struct FloorContext {
    pub width: usize,
    pub height: usize,
    pub depth: u32,
    pub rng: ChaCha8Rng,
}

impl FloorContext {
    pub fn new(width: usize, height: usize, depth: u32, rng: ChaCha8Rng) -> Self {
        Self { width, height, depth, rng }
    }

    pub fn from_seed(width: usize, height: usize, depth: u32, seed: u64) -> Self {
        Self::new(width, height, depth, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Context for `depth` of a run, with a stream independent of every other depth.
    pub fn for_run(width: usize, height: usize, depth: u32, run_seed: u64) -> Self {
        Self::from_seed(width, height, depth, derive_floor_seed(run_seed, depth))
    }
}

pub fn derive_floor_seed(run_seed: u64, depth: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(depth).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Uniform draw from the inclusive range `min_value..=max_value`.
pub(crate) fn random_usize<R: Rng + ?Sized>(
    rng: &mut R,
    min_value: usize,
    max_value: usize,
) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value) as u64 + 1;
    min_value + (rng.next_u64() % range_size) as usize
}

pub(crate) fn random_i32<R: Rng + ?Sized>(rng: &mut R, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let range_size = (i64::from(max_value) - i64::from(min_value)) as u64 + 1;
    (i64::from(min_value) + (rng.next_u64() % range_size) as i64) as i32
}

/// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
pub(crate) fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

pub(crate) fn random_fraction<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + (high - low) * random_unit(rng)
}

pub(crate) fn roll_percent<R: Rng + ?Sized>(rng: &mut R, percent: u8) -> bool {
    random_usize(rng, 0, 99) < usize::from(percent)
}

pub(crate) fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.next_u64() & 1 == 0
}

/// Index into `weights` drawn proportionally to each weight, `None` when all are zero.
pub(crate) fn pick_weighted<R: Rng + ?Sized>(rng: &mut R, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|&weight| u64::from(weight)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.next_u64() % total;
    for (index, &weight) in weights.iter().enumerate() {
        let weight = u64::from(weight);
        if roll < weight {
            return Some(index);
        }
        roll -= weight;
    }
    None
}
