//! Uniform-random seed point sampling
//!
//! Produces pairwise-distinct integer coordinates within grid bounds by
//! rejection sampling. Deterministic for a fixed RNG seed.

use crate::error::{Result, TerrainError};
use crate::partition::GridPoint;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Sample `count` distinct uniform cell coordinates on a width x length grid
///
/// # Arguments
///
/// * `count` - Number of seed points to produce
/// * `width` / `length` - Grid bounds
/// * `rng_seed` - Seed for the deterministic ChaCha8 generator
///
/// # Errors
///
/// Returns `InvalidConfig` if `count` is zero or exceeds the cell count
/// (distinctness would be impossible).
pub fn sample_seed_points(
    count: usize,
    width: u32,
    length: u32,
    rng_seed: u64,
) -> Result<Vec<GridPoint>> {
    let cells = width as usize * length as usize;
    if count == 0 {
        return Err(TerrainError::InvalidConfig(
            "seed point count must be positive".to_string(),
        ));
    }
    if count > cells {
        return Err(TerrainError::InvalidConfig(format!(
            "cannot place {} distinct seeds on a grid of {} cells",
            count, cells
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    let mut taken = HashSet::with_capacity(count);
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..length) as i32;
        if taken.insert((x, y)) {
            points.push((x, y));
        }
    }
    Ok(points)
}
