//! Voronoi partition of a height grid
//!
//! A partition is a height grid plus an ordered seed list and the derived
//! region state: for every cell, the index of its nearest seed, and for
//! every seed, the exact inverse membership list.
//!
//! Region membership is recomputed in full whenever the seed list changes.
//! The recompute is a brute-force scan (per cell, minimum squared Euclidean
//! distance over all seeds, earliest index winning ties) rather than a true
//! Voronoi diagram construction. On the small bounded grids this crate
//! targets, the O(cells * seeds) scan is both simpler and fast enough.

use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;
use glam::Vec2;

/// Seed position defining the center of a Voronoi region
///
/// Seeds are inserted at integer cell coordinates but drift to floating
/// point centroids under Lloyd relaxation, so the stored position is a
/// `Vec2`. Seed order is public identity: region indices are positions in
/// the seed list.
pub type SeedPoint = Vec2;

/// Integer cell coordinate on the grid
pub type GridPoint = (i32, i32);

/// A height grid partitioned into nearest-seed regions
///
/// # Example
///
/// ```
/// use voronoi_terrain::VoronoiPartition;
///
/// let mut partition = VoronoiPartition::new(4, 4).unwrap();
/// partition.add_seed(0, 0).unwrap();
/// partition.add_seed(3, 3).unwrap();
///
/// assert_eq!(partition.region_of_cell(1, 1), Some(0));
/// assert_eq!(partition.region_of_cell(3, 3), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct VoronoiPartition {
    grid: HeightGrid,
    seeds: Vec<SeedPoint>,
    region_of: Vec<usize>,
    members_of: Vec<Vec<GridPoint>>,
}

impl VoronoiPartition {
    /// Create a partition over an all-zero grid with no seeds yet
    pub fn new(width: u32, length: u32) -> Result<Self> {
        Ok(Self {
            grid: HeightGrid::new(width, length)?,
            seeds: Vec::new(),
            region_of: Vec::new(),
            members_of: Vec::new(),
        })
    }

    /// Create a partition with an initial seed list
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if two seeds map to the same cell.
    pub fn with_seeds(width: u32, length: u32, seeds: &[GridPoint]) -> Result<Self> {
        let mut partition = Self::new(width, length)?;
        for &(x, y) in seeds {
            partition.insert_seed(x, y)?;
        }
        partition.recompute();
        Ok(partition)
    }

    /// Grid width
    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Grid length
    #[inline]
    pub fn length(&self) -> u32 {
        self.grid.length()
    }

    /// Read-only view of the underlying height grid
    #[inline]
    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    /// Mutable access to the underlying height grid
    ///
    /// Heights are independent of the partition state, so mutating them
    /// never invalidates region membership.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut HeightGrid {
        &mut self.grid
    }

    /// The ordered seed list
    #[inline]
    pub fn seeds(&self) -> &[SeedPoint] {
        &self.seeds
    }

    /// Number of seeds (and regions)
    #[inline]
    pub fn seed_count(&self) -> usize {
        self.seeds.len()
    }

    /// Append a seed at an integer coordinate and recompute the partition
    ///
    /// The coordinate wraps toroidally like any other grid access.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a seed already exists at that position.
    pub fn add_seed(&mut self, x: i32, y: i32) -> Result<()> {
        self.insert_seed(x, y)?;
        self.recompute();
        Ok(())
    }

    fn insert_seed(&mut self, x: i32, y: i32) -> Result<()> {
        let wrapped = Vec2::new(
            x.rem_euclid(self.width() as i32) as f32,
            y.rem_euclid(self.length() as i32) as f32,
        );
        if self.seeds.contains(&wrapped) {
            return Err(TerrainError::InvalidConfig(format!(
                "seed already exists at ({}, {})",
                wrapped.x, wrapped.y
            )));
        }
        self.seeds.push(wrapped);
        Ok(())
    }

    /// Replace the whole seed list (Lloyd relaxation) and recompute
    ///
    /// Callers are responsible for seed uniqueness; a duplicated position
    /// leaves one of the two regions memberless, which the next centroid
    /// computation surfaces as `EmptyRegion`.
    pub(crate) fn replace_seeds(&mut self, seeds: Vec<SeedPoint>) {
        self.seeds = seeds;
        self.recompute();
    }

    /// Total, deterministic recompute of region state from the seed list
    fn recompute(&mut self) {
        let width = self.width() as i32;
        let length = self.length() as i32;
        let mut region_of = Vec::with_capacity((width * length) as usize);
        let mut members_of = vec![Vec::new(); self.seeds.len()];

        if self.seeds.is_empty() {
            self.region_of = region_of;
            self.members_of = members_of;
            return;
        }

        for y in 0..length {
            for x in 0..width {
                let cell = Vec2::new(x as f32, y as f32);
                let mut owner = 0;
                let mut best = f32::INFINITY;
                for (idx, seed) in self.seeds.iter().enumerate() {
                    // Strict < keeps the earliest seed on ties
                    let d = seed.distance_squared(cell);
                    if d < best {
                        best = d;
                        owner = idx;
                    }
                }
                region_of.push(owner);
                members_of[owner].push((x, y));
            }
        }

        self.region_of = region_of;
        self.members_of = members_of;
    }

    /// Region index owning a cell, or `None` while the partition has no seeds
    ///
    /// The coordinate wraps toroidally.
    pub fn region_of_cell(&self, x: i32, y: i32) -> Option<usize> {
        if self.seeds.is_empty() {
            return None;
        }
        Some(self.region_index(x, y))
    }

    /// Unchecked region lookup; valid whenever at least one seed exists
    #[inline]
    pub(crate) fn region_index(&self, x: i32, y: i32) -> usize {
        let xi = x.rem_euclid(self.width() as i32) as usize;
        let yi = y.rem_euclid(self.length() as i32) as usize;
        self.region_of[yi * self.width() as usize + xi]
    }

    /// Member cells of a seed's region, in row-major scan order
    ///
    /// # Errors
    ///
    /// Returns `SeedNotFound` if the seed index is unknown.
    pub fn members_of_seed(&self, seed: usize) -> Result<&[GridPoint]> {
        self.members_of
            .get(seed)
            .map(Vec::as_slice)
            .ok_or(TerrainError::SeedNotFound(seed))
    }

    /// (height, width) of the bounding box around a region's member cells
    ///
    /// # Errors
    ///
    /// Returns `SeedNotFound` for an unknown seed, or `EmptyRegion` if the
    /// region currently has no members.
    pub fn bounding_box_size(&self, seed: usize) -> Result<(u32, u32)> {
        let members = self.members_of_seed(seed)?;
        if members.is_empty() {
            return Err(TerrainError::EmptyRegion(seed));
        }

        let (mut min_x, mut min_y) = members[0];
        let (mut max_x, mut max_y) = members[0];
        for &(x, y) in members {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Ok(((max_y - min_y + 1) as u32, (max_x - min_x + 1) as u32))
    }
}
