//! End-to-end terrain generation
//!
//! Ties the pipeline together: allocate a grid, scatter seed points,
//! partition, relax, shape each region from randomly placed feature points,
//! then smooth with thermal erosion. Deterministic for a fixed config.

use crate::config::TerrainConfig;
use crate::erosion::ThermalErosion;
use crate::error::{Result, TerrainError};
use crate::generation::generate_partition;
use crate::grid::HeightGrid;
use crate::partition::{GridPoint, VoronoiPartition};
use crate::shaping::FeatureShaper;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A fully generated terrain: partition, feature points, and heights
///
/// # Example
///
/// ```
/// use voronoi_terrain::{TerrainConfigBuilder, VoronoiTerrain};
///
/// let config = TerrainConfigBuilder::new()
///     .seed(42)
///     .dimensions(32, 32).unwrap()
///     .region_count(6).unwrap()
///     .build()
///     .unwrap();
///
/// let terrain = VoronoiTerrain::generate(config).unwrap();
/// assert_eq!(terrain.partition().seed_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct VoronoiTerrain {
    config: TerrainConfig,
    partition: VoronoiPartition,
    shaper: FeatureShaper,
}

impl VoronoiTerrain {
    /// Generate a terrain from configuration
    ///
    /// Pipeline: seed sampling, partition, Lloyd relaxation, per-region
    /// feature shaping, thermal erosion. Feature points are placed on
    /// random member cells after relaxation, and coefficients are drawn
    /// small enough that cumulative shaping stays inside [0, 1].
    pub fn generate(config: TerrainConfig) -> Result<Self> {
        let mut partition = generate_partition(&config)?;

        // Feature placement uses its own stream so seed sampling and
        // shaping stay independently reproducible.
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1));
        let mut shaper = FeatureShaper::new(partition.seed_count());

        for seed in 0..partition.seed_count() {
            let members = partition.members_of_seed(seed)?.to_vec();
            let count = config.feature_points_per_region.min(members.len());
            if count == 0 {
                continue;
            }

            let chosen = pick_distinct(&members, count, &mut rng);
            for &(x, y) in &chosen {
                shaper.add_feature_point(&partition, seed, x, y)?;
            }

            // Directional contributions top out a little above the raw
            // coefficient, so cap the per-point draw well under 1/count.
            let cap = 0.5 / count as f32;
            let mut coefficients: Vec<f32> =
                (0..count).map(|_| rng.gen_range(0.0..cap)).collect();

            // A feature point hugging a jagged boundary can still push a
            // distant cell past 1.0. Shaping is cell-by-cell, so roll the
            // grid back and retry with halved coefficients.
            let snapshot = partition.grid().clone();
            loop {
                match shaper.apply_coefficients(&mut partition, seed, &coefficients) {
                    Ok(()) => break,
                    Err(TerrainError::HeightOutOfBounds(_))
                        if coefficients.iter().any(|&c| c > 1e-4) =>
                    {
                        *partition.grid_mut() = snapshot.clone();
                        for c in &mut coefficients {
                            *c *= 0.5;
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        if config.erosion_iterations > 0 {
            ThermalErosion::new(config.erosion_iterations, config.talus)
                .apply(partition.grid_mut())?;
        }

        Ok(Self {
            config,
            partition,
            shaper,
        })
    }

    /// The configuration this terrain was generated from
    #[inline]
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// The partition, including the height grid
    #[inline]
    pub fn partition(&self) -> &VoronoiPartition {
        &self.partition
    }

    /// Mutable partition access, for further shaping or erosion
    #[inline]
    pub fn partition_mut(&mut self) -> &mut VoronoiPartition {
        &mut self.partition
    }

    /// The feature points placed during generation
    #[inline]
    pub fn shaper(&self) -> &FeatureShaper {
        &self.shaper
    }

    /// Shortcut to the height grid
    #[inline]
    pub fn grid(&self) -> &HeightGrid {
        self.partition.grid()
    }
}

/// Pick `count` distinct cells from a non-empty member list
fn pick_distinct(members: &[GridPoint], count: usize, rng: &mut ChaCha8Rng) -> Vec<GridPoint> {
    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count {
        let candidate = members[rng.gen_range(0..members.len())];
        if !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }
    chosen
}
