//! Partition generation pipeline
//!
//! Samples seed points and optionally relaxes them into a uniform layout.

mod lloyd;
mod points;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::sample_seed_points;

use crate::config::TerrainConfig;
use crate::error::Result;
use crate::partition::VoronoiPartition;

/// Build a relaxed partition from configuration (heights stay zero)
///
/// Steps: sample distinct seed points, compute the partition, then run
/// Lloyd's relaxation if the config asks for any iterations.
pub fn generate_partition(config: &TerrainConfig) -> Result<VoronoiPartition> {
    let seeds = sample_seed_points(config.region_count, config.width, config.length, config.seed)?;
    let mut partition = VoronoiPartition::with_seeds(config.width, config.length, &seeds)?;

    if config.lloyd_iterations > 0 {
        let options = LloydOptions {
            max_iterations: config.lloyd_iterations,
            convergence_threshold: config.lloyd_convergence,
        };
        lloyd_relaxation_with_options(&mut partition, options)?;
    }

    Ok(partition)
}
