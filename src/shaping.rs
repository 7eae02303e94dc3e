//! Feature-point-driven height shaping
//!
//! Each region may hold an ordered list of interior "feature points". A
//! coefficient pass raises every member cell by contributions derived from
//! its distance to each feature point, normalized against the distance from
//! that feature point to the region boundary along the same direction. The
//! result is a set of directional slopes radiating from the feature points.
//!
//! # Staleness contract
//!
//! A feature point is validated against its region only when it is added.
//! If the partition later changes (a new seed, Lloyd relaxation), existing
//! feature points are NOT re-validated and may no longer lie in the region
//! they were registered for. Callers that relax after shaping should re-add
//! their feature points.

use crate::error::{Result, TerrainError};
use crate::partition::{GridPoint, VoronoiPartition};
use glam::Vec2;

/// Per-region feature points, indexed parallel to the partition's seed list
#[derive(Debug, Clone, Default)]
pub struct FeatureShaper {
    points: Vec<Vec<GridPoint>>,
}

impl FeatureShaper {
    /// Create a shaper for a partition with `seed_count` regions
    pub fn new(seed_count: usize) -> Self {
        Self {
            points: vec![Vec::new(); seed_count],
        }
    }

    /// Number of regions this shaper tracks
    #[inline]
    pub fn region_count(&self) -> usize {
        self.points.len()
    }

    /// Register a feature point inside a region
    ///
    /// # Errors
    ///
    /// Returns `SeedNotFound` for an unknown seed, or `OutOfRegion` if
    /// (x, y) is not currently a member cell of that seed's region.
    pub fn add_feature_point(
        &mut self,
        partition: &VoronoiPartition,
        seed: usize,
        x: i32,
        y: i32,
    ) -> Result<()> {
        let members = partition.members_of_seed(seed)?;
        let wrapped = (
            x.rem_euclid(partition.width() as i32),
            y.rem_euclid(partition.length() as i32),
        );
        if !members.contains(&wrapped) {
            return Err(TerrainError::OutOfRegion { seed, x, y });
        }
        // Shaper may have been created before seeds were appended
        if self.points.len() <= seed {
            self.points.resize(seed + 1, Vec::new());
        }
        self.points[seed].push(wrapped);
        Ok(())
    }

    /// The ordered feature points registered for a region
    ///
    /// # Errors
    ///
    /// Returns `SeedNotFound` if no slot exists for the seed index.
    pub fn feature_points(&self, seed: usize) -> Result<&[GridPoint]> {
        self.points
            .get(seed)
            .map(Vec::as_slice)
            .ok_or(TerrainError::SeedNotFound(seed))
    }

    /// Apply one height coefficient per feature point across a region
    ///
    /// For every member cell, the region's feature points are sorted by
    /// ascending squared distance to the cell and paired with `coefficients`
    /// in order (closest point takes the first coefficient). Each pair adds
    /// `c * sqrt(d / d_edge)` to the cell, where `d` is the cell's distance
    /// from the feature point and `d_edge` is the distance from the feature
    /// point to the region boundary along the ray through the cell. A cell
    /// that coincides with a feature point receives nothing from that pair.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoefficientCount` if the coefficient list length does
    /// not match the region's feature point count, or `HeightOutOfBounds` if
    /// a cumulative contribution pushes any cell outside [0, 1].
    pub fn apply_coefficients(
        &self,
        partition: &mut VoronoiPartition,
        seed: usize,
        coefficients: &[f32],
    ) -> Result<()> {
        let points = self.feature_points(seed)?;
        if coefficients.len() != points.len() {
            return Err(TerrainError::InvalidCoefficientCount {
                expected: points.len(),
                actual: coefficients.len(),
            });
        }

        let members = partition.members_of_seed(seed)?.to_vec();
        for (cx, cy) in members {
            let cell = Vec2::new(cx as f32, cy as f32);

            let mut sorted = points.to_vec();
            sorted.sort_by(|&(ax, ay), &(bx, by)| {
                let da = Vec2::new(ax as f32, ay as f32).distance_squared(cell);
                let db = Vec2::new(bx as f32, by as f32).distance_squared(cell);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });

            for (&(fx, fy), &coefficient) in sorted.iter().zip(coefficients) {
                if (fx, fy) == (cx, cy) {
                    // Distance-zero case is defined as zero contribution
                    continue;
                }
                let feature = Vec2::new(fx as f32, fy as f32);
                let d = feature.distance(cell);
                let direction = (cell - feature) / d;
                let d_edge = distance_to_boundary(partition, seed, feature, direction);

                let current = partition.grid().get(cx, cy);
                partition
                    .grid_mut()
                    .set(cx, cy, current + coefficient * (d / d_edge).sqrt())?;
            }
        }
        Ok(())
    }
}

/// Distance from `origin` to the first unit step along `direction` that
/// leaves the seed's region or the (unwrapped) grid bounds
fn distance_to_boundary(
    partition: &VoronoiPartition,
    seed: usize,
    origin: Vec2,
    direction: Vec2,
) -> f32 {
    let width = partition.width() as i32;
    let length = partition.length() as i32;
    let mut t = 1.0f32;
    loop {
        let pos = origin + direction * t;
        let x = pos.x.round() as i32;
        let y = pos.y.round() as i32;
        if x < 0 || y < 0 || x >= width || y >= length {
            return t;
        }
        if partition.region_index(x, y) != seed {
            return t;
        }
        t += 1.0;
    }
}
