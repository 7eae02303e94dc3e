//! Terrain generation configuration and builder
//!
//! Configuration is a plain value: the same configuration always produces
//! the identical terrain, so only the configuration needs to be shared or
//! stored to reproduce a generated world.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Configuration for deterministic terrain generation
///
/// Build with [`TerrainConfigBuilder`], which validates parameters.
///
/// # Example
///
/// ```
/// use voronoi_terrain::TerrainConfigBuilder;
///
/// let config = TerrainConfigBuilder::new()
///     .seed(42)
///     .dimensions(32, 32).unwrap()
///     .region_count(8).unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.width, 32);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainConfig {
    /// Random seed driving both seed-point sampling and feature placement
    ///
    /// The same seed with the same other parameters always produces the
    /// exact same terrain.
    pub seed: u64,

    /// Grid width in cells
    pub width: u32,

    /// Grid length in cells
    pub length: u32,

    /// Number of Voronoi regions (seed points) to scatter
    pub region_count: usize,

    /// Number of Lloyd relaxation iterations
    ///
    /// - 0: raw random regions (irregular sizes)
    /// - 2-3: decent uniformity
    /// - 5+: diminishing returns
    pub lloyd_iterations: usize,

    /// Convergence threshold for Lloyd relaxation, in cell units
    ///
    /// Relaxation stops early once the largest seed displacement of an
    /// iteration falls below this. 0.0 disables early termination.
    pub lloyd_convergence: f32,

    /// Feature points placed per region during generation
    ///
    /// Regions with fewer member cells than this get one point per cell.
    pub feature_points_per_region: usize,

    /// Number of thermal erosion passes after shaping (0 disables erosion)
    pub erosion_iterations: usize,

    /// Talus threshold for erosion: the minimum height difference between
    /// neighbors that triggers a material transfer
    pub talus: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating [`TerrainConfig`] with validation
#[derive(Debug, Clone)]
pub struct TerrainConfigBuilder {
    seed: Option<u64>,
    width: u32,
    length: u32,
    region_count: usize,
    lloyd_iterations: usize,
    lloyd_convergence: f32,
    feature_points_per_region: usize,
    erosion_iterations: usize,
    talus: f32,
}

impl TerrainConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - dimensions: 64x64
    /// - region_count: 16
    /// - lloyd_iterations: 2, convergence 0.25 cells
    /// - feature_points_per_region: 3
    /// - erosion_iterations: 8, talus 0.01
    pub fn new() -> Self {
        Self {
            seed: None,
            width: 64,
            length: 64,
            region_count: 16,
            lloyd_iterations: 2,
            lloyd_convergence: 0.25,
            feature_points_per_region: 3,
            erosion_iterations: 8,
            talus: 0.01,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the grid dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero.
    pub fn dimensions(mut self, width: u32, length: u32) -> Result<Self> {
        if width == 0 || length == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "dimensions must be positive (got {}x{})",
                width, length
            )));
        }
        self.width = width;
        self.length = length;
        Ok(self)
    }

    /// Set the number of Voronoi regions
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if zero.
    pub fn region_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(TerrainError::InvalidConfig(
                "region count must be positive".to_string(),
            ));
        }
        self.region_count = count;
        Ok(self)
    }

    /// Set the number of Lloyd relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 50 (excessive; relaxation
    /// converges far earlier on bounded grids).
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > 50 {
            return Err(TerrainError::InvalidConfig(format!(
                "Lloyd iterations must be <= 50 (got {})",
                iterations
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the Lloyd convergence threshold (cell units)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if negative.
    pub fn lloyd_convergence(mut self, threshold: f32) -> Result<Self> {
        if threshold < 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "Lloyd convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Set the number of feature points placed per region
    pub fn feature_points_per_region(mut self, count: usize) -> Self {
        self.feature_points_per_region = count;
        self
    }

    /// Set the number of thermal erosion passes
    pub fn erosion_iterations(mut self, iterations: usize) -> Self {
        self.erosion_iterations = iterations;
        self
    }

    /// Set the erosion talus threshold
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if outside [0, 1] (heights live in [0, 1],
    /// so a larger talus can never trigger).
    pub fn talus(mut self, talus: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&talus) {
            return Err(TerrainError::InvalidConfig(format!(
                "talus must be within [0, 1] (got {})",
                talus
            )));
        }
        self.talus = talus;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the region count exceeds the cell count
    /// (distinct seed placement would be impossible).
    pub fn build(self) -> Result<TerrainConfig> {
        let cells = self.width as usize * self.length as usize;
        if self.region_count > cells {
            return Err(TerrainError::InvalidConfig(format!(
                "cannot place {} regions on a grid of {} cells",
                self.region_count, cells
            )));
        }

        Ok(TerrainConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            width: self.width,
            length: self.length,
            region_count: self.region_count,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
            feature_points_per_region: self.feature_points_per_region,
            erosion_iterations: self.erosion_iterations,
            talus: self.talus,
        })
    }
}

impl Default for TerrainConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = TerrainConfigBuilder::new().build().unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.length, 64);
        assert_eq!(config.region_count, 16);
        assert_eq!(config.lloyd_iterations, 2);
        assert_eq!(config.feature_points_per_region, 3);
        assert_eq!(config.erosion_iterations, 8);
    }

    #[test]
    fn test_builder_custom() {
        let config = TerrainConfigBuilder::new()
            .seed(42)
            .dimensions(32, 16)
            .unwrap()
            .region_count(5)
            .unwrap()
            .lloyd_iterations(4)
            .unwrap()
            .talus(0.05)
            .unwrap()
            .erosion_iterations(3)
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.width, 32);
        assert_eq!(config.length, 16);
        assert_eq!(config.region_count, 5);
        assert_eq!(config.lloyd_iterations, 4);
        assert_eq!(config.talus, 0.05);
        assert_eq!(config.erosion_iterations, 3);
    }

    #[test]
    fn test_builder_invalid_dimensions() {
        assert!(TerrainConfigBuilder::new().dimensions(0, 8).is_err());
        assert!(TerrainConfigBuilder::new().dimensions(8, 0).is_err());
    }

    #[test]
    fn test_builder_invalid_region_count() {
        assert!(TerrainConfigBuilder::new().region_count(0).is_err());
    }

    #[test]
    fn test_builder_too_many_regions_for_grid() {
        let result = TerrainConfigBuilder::new()
            .dimensions(4, 4)
            .unwrap()
            .region_count(17)
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_invalid_talus() {
        assert!(TerrainConfigBuilder::new().talus(-0.1).is_err());
        assert!(TerrainConfigBuilder::new().talus(1.1).is_err());
    }

    #[test]
    fn test_builder_too_many_lloyd_iterations() {
        assert!(TerrainConfigBuilder::new().lloyd_iterations(51).is_err());
    }

    #[test]
    fn test_builder_negative_convergence() {
        assert!(TerrainConfigBuilder::new().lloyd_convergence(-0.5).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = TerrainConfigBuilder::new()
            .seed(12345)
            .dimensions(24, 24)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: TerrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
