//! Region boundary and corner extraction
//!
//! Derived, read-only views over the partition's region map. Nothing here is
//! cached: both queries reflect the partition exactly at call time.

use crate::error::Result;
use crate::partition::{GridPoint, VoronoiPartition};

/// 8-connected Moore neighborhood offsets
const MOORE: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Member cells of a region that border another region
///
/// A member cell is an edge cell iff at least one of its 8 Moore neighbors
/// (wrapped toroidally) belongs to a different seed's region. Results are in
/// row-major scan order.
///
/// # Errors
///
/// Returns `SeedNotFound` if the seed index is unknown.
pub fn edge_cells(partition: &VoronoiPartition, seed: usize) -> Result<Vec<GridPoint>> {
    let members = partition.members_of_seed(seed)?;
    Ok(members
        .iter()
        .copied()
        .filter(|&(x, y)| {
            MOORE
                .iter()
                .any(|&(dx, dy)| partition.region_index(x + dx, y + dy) != seed)
        })
        .collect())
}

/// Edge cells sitting at a junction of three or more regions
///
/// Among the edge cells, a cell is a corner iff the distinct region indices
/// among its 8 Moore neighbors and itself number at least 3.
///
/// # Errors
///
/// Returns `SeedNotFound` if the seed index is unknown.
pub fn corner_cells(partition: &VoronoiPartition, seed: usize) -> Result<Vec<GridPoint>> {
    let edges = edge_cells(partition, seed)?;
    Ok(edges
        .into_iter()
        .filter(|&(x, y)| {
            let mut regions = vec![seed];
            for &(dx, dy) in &MOORE {
                let region = partition.region_index(x + dx, y + dy);
                if !regions.contains(&region) {
                    regions.push(region);
                }
            }
            regions.len() >= 3
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::sample_seed_points;

    #[test]
    fn test_single_region_has_no_edges() {
        // One seed owns everything; every neighbor shares its region
        let partition = VoronoiPartition::with_seeds(5, 5, &[(2, 2)]).unwrap();
        assert!(edge_cells(&partition, 0).unwrap().is_empty());
        assert!(corner_cells(&partition, 0).unwrap().is_empty());
    }

    #[test]
    fn test_edge_cells_touch_other_regions() {
        let partition = VoronoiPartition::with_seeds(8, 8, &[(1, 1), (6, 6)]).unwrap();
        let edges = edge_cells(&partition, 0).unwrap();
        assert!(!edges.is_empty());

        for &(x, y) in &edges {
            assert_eq!(partition.region_of_cell(x, y), Some(0));
            let touches_other = MOORE
                .iter()
                .any(|&(dx, dy)| partition.region_of_cell(x + dx, y + dy) != Some(0));
            assert!(touches_other, "({}, {}) reported as edge but is interior", x, y);
        }

        // Interior cells must not be reported
        let members = partition.members_of_seed(0).unwrap();
        let interior: Vec<_> = members
            .iter()
            .filter(|cell| !edges.contains(cell))
            .collect();
        for &&(x, y) in &interior {
            let all_same = MOORE
                .iter()
                .all(|&(dx, dy)| partition.region_of_cell(x + dx, y + dy) == Some(0));
            assert!(all_same);
        }
    }

    #[test]
    fn test_corners_subset_of_edges() {
        let seeds = sample_seed_points(6, 16, 16, 42).unwrap();
        let partition = VoronoiPartition::with_seeds(16, 16, &seeds).unwrap();

        for seed in 0..partition.seed_count() {
            let edges = edge_cells(&partition, seed).unwrap();
            let corners = corner_cells(&partition, seed).unwrap();
            for corner in &corners {
                assert!(edges.contains(corner), "corner {:?} not an edge cell", corner);
            }
        }
    }

    #[test]
    fn test_corner_requires_three_regions() {
        // Two regions split a stripe: junctions of only two regions never
        // produce corners.
        let partition = VoronoiPartition::with_seeds(8, 4, &[(1, 1), (6, 1)]).unwrap();
        for seed in 0..2 {
            assert!(corner_cells(&partition, seed).unwrap().is_empty());
        }

        // Four quadrants meet near the middle: corners must exist
        let partition =
            VoronoiPartition::with_seeds(8, 8, &[(1, 1), (6, 1), (1, 6), (6, 6)]).unwrap();
        let total_corners: usize = (0..4)
            .map(|s| corner_cells(&partition, s).unwrap().len())
            .sum();
        assert!(total_corners > 0);
    }

    #[test]
    fn test_unknown_seed() {
        let partition = VoronoiPartition::with_seeds(4, 4, &[(0, 0)]).unwrap();
        assert!(edge_cells(&partition, 3).is_err());
        assert!(corner_cells(&partition, 3).is_err());
    }
}
