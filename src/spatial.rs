//! Spatial indexing for fast nearest-seed lookups
//!
//! This module is only available with the `spatial-index` feature.
//!
//! The index accelerates external position-to-region queries. Partition
//! initialization never uses it: the brute-force scan is what defines the
//! earliest-index tie-break contract, and a KD-tree makes no ordering
//! promise for equidistant seeds.

#[cfg(feature = "spatial-index")]
use glam::Vec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around a KD-tree over seed positions
///
/// Provides O(log n) nearest-seed lookups for callers that probe many
/// positions against a fixed seed layout (picking, unit placement, etc.).
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SeedIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SeedIndex {
    /// Build an index from seed positions
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// use voronoi_terrain::SeedIndex;
    /// use glam::Vec2;
    ///
    /// let seeds = vec![Vec2::new(1.0, 1.0), Vec2::new(8.0, 8.0)];
    /// let index = SeedIndex::new(&seeds);
    /// assert_eq!(index.find_nearest(Vec2::new(2.0, 0.0)), 0);
    /// # }
    /// ```
    pub fn new(seeds: &[Vec2]) -> Self {
        let points: Vec<[f32; 2]> = seeds.iter().map(|s| [s.x, s.y]).collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the seed nearest to a position
    ///
    /// Returns the seed's index in the list the index was built from.
    pub fn find_nearest(&self, position: Vec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_seed_index_basic() {
        let seeds = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
        ];
        let index = SeedIndex::new(&seeds);

        assert_eq!(index.find_nearest(Vec2::new(1.0, 1.0)), 0);
        assert_eq!(index.find_nearest(Vec2::new(9.0, 1.0)), 1);
        assert_eq!(index.find_nearest(Vec2::new(1.0, 9.0)), 2);
        assert_eq!(index.find_nearest(Vec2::new(9.0, 9.0)), 3);
    }

    #[test]
    fn test_seed_index_exact_match() {
        let seeds = vec![Vec2::new(3.0, 4.0), Vec2::new(7.0, 2.0)];
        let index = SeedIndex::new(&seeds);
        assert_eq!(index.find_nearest(seeds[0]), 0);
        assert_eq!(index.find_nearest(seeds[1]), 1);
    }

    #[test]
    fn test_seed_index_agrees_with_partition() {
        use crate::generation::sample_seed_points;
        use crate::partition::VoronoiPartition;

        let seeds = sample_seed_points(9, 20, 20, 42).unwrap();
        let partition = VoronoiPartition::with_seeds(20, 20, &seeds).unwrap();
        let index = SeedIndex::new(partition.seeds());

        // Probe at seed positions, where no tie-break ambiguity exists
        for (idx, seed) in partition.seeds().iter().enumerate() {
            assert_eq!(index.find_nearest(*seed), idx);
        }
    }
}
