//! Lloyd's relaxation for uniform region sizing
//!
//! Lloyd's relaxation iteratively replaces every seed with the centroid of
//! its current region and recomputes the partition, converging toward more
//! uniformly sized regions. Centroids are floating point and are not rounded
//! back to grid cells.
//!
//! There is no formal convergence guarantee; the caller controls the
//! iteration budget and an optional displacement threshold stops early.

use crate::error::{Result, TerrainError};
use crate::partition::VoronoiPartition;
use glam::Vec2;

/// Options for Lloyd's relaxation
#[derive(Debug, Clone, Copy)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold in cell units - stop when the largest seed
    /// displacement of an iteration falls below it. 0.0 disables early exit.
    pub convergence_threshold: f32,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            // A quarter cell of movement barely changes membership, so
            // further iterations are mostly wasted work.
            convergence_threshold: 0.25,
        }
    }
}

/// Relax a partition for a fixed number of iterations
///
/// Uses the default convergence threshold; see
/// [`lloyd_relaxation_with_options`] for full control.
///
/// # Errors
///
/// Returns `EmptyRegion` if any region has no member cells when its
/// centroid is computed.
pub fn lloyd_relaxation(partition: &mut VoronoiPartition, iterations: usize) -> Result<()> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(partition, options)
}

/// Relax a partition with custom options
///
/// Each iteration moves every seed to the arithmetic-mean coordinate of its
/// member cells and recomputes the partition in full. The maximum seed
/// displacement is tracked for early exit.
///
/// # Errors
///
/// Returns `EmptyRegion` if any region has no member cells. A region can
/// only empty out when its seed drifts farther from every cell than all
/// other seeds, which a sane iteration budget relative to seed spacing
/// avoids; the check is defensive rather than expected.
pub fn lloyd_relaxation_with_options(
    partition: &mut VoronoiPartition,
    options: LloydOptions,
) -> Result<()> {
    eprintln!(
        "[Lloyd] Starting: {} seeds, max {} iterations, threshold {:.3}",
        partition.seed_count(),
        options.max_iterations,
        options.convergence_threshold
    );

    for iteration in 0..options.max_iterations {
        let mut new_seeds = Vec::with_capacity(partition.seed_count());
        let mut max_displacement: f32 = 0.0;

        for (idx, &seed) in partition.seeds().iter().enumerate() {
            let members = partition.members_of_seed(idx)?;
            if members.is_empty() {
                return Err(TerrainError::EmptyRegion(idx));
            }

            let sum = members
                .iter()
                .fold(Vec2::ZERO, |acc, &(x, y)| acc + Vec2::new(x as f32, y as f32));
            let centroid = sum / members.len() as f32;

            max_displacement = max_displacement.max(centroid.distance(seed));
            new_seeds.push(centroid);
        }

        partition.replace_seeds(new_seeds);

        eprintln!(
            "[Lloyd] Iter {}: max_disp={:.4}",
            iteration + 1,
            max_displacement
        );

        if options.convergence_threshold > 0.0 && max_displacement < options.convergence_threshold {
            eprintln!(
                "[Lloyd] Converged at iteration {} (max_disp {:.4} < threshold {:.4})",
                iteration + 1,
                max_displacement,
                options.convergence_threshold
            );
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::sample_seed_points;

    #[test]
    fn test_one_iteration_moves_seeds_to_centroids() {
        let seeds = sample_seed_points(5, 16, 16, 42).unwrap();
        let mut partition = VoronoiPartition::with_seeds(16, 16, &seeds).unwrap();

        // Expected centroids from the pre-relaxation membership
        let expected: Vec<Vec2> = (0..partition.seed_count())
            .map(|s| {
                let members = partition.members_of_seed(s).unwrap();
                let sum = members
                    .iter()
                    .fold(Vec2::ZERO, |acc, &(x, y)| acc + Vec2::new(x as f32, y as f32));
                sum / members.len() as f32
            })
            .collect();

        let options = LloydOptions {
            max_iterations: 1,
            convergence_threshold: 0.0,
        };
        lloyd_relaxation_with_options(&mut partition, options).unwrap();

        assert_eq!(partition.seeds(), expected.as_slice());
    }

    #[test]
    fn test_relaxation_preserves_partition_cover() {
        let seeds = sample_seed_points(6, 16, 16, 7).unwrap();
        let mut partition = VoronoiPartition::with_seeds(16, 16, &seeds).unwrap();
        lloyd_relaxation(&mut partition, 3).unwrap();

        let total: usize = (0..partition.seed_count())
            .map(|s| partition.members_of_seed(s).unwrap().len())
            .collect::<Vec<_>>()
            .iter()
            .sum();
        assert_eq!(total, 256);
        assert_eq!(partition.seed_count(), 6);
    }

    #[test]
    fn test_relaxation_determinism() {
        let seeds = sample_seed_points(6, 16, 16, 99).unwrap();
        let mut a = VoronoiPartition::with_seeds(16, 16, &seeds).unwrap();
        let mut b = VoronoiPartition::with_seeds(16, 16, &seeds).unwrap();

        lloyd_relaxation(&mut a, 4).unwrap();
        lloyd_relaxation(&mut b, 4).unwrap();

        assert_eq!(a.seeds(), b.seeds());
    }

    #[test]
    fn test_relaxation_centroids_are_floating_point() {
        // Single seed: the centroid of the whole 4x4 grid is (1.5, 1.5)
        let mut partition = VoronoiPartition::with_seeds(4, 4, &[(0, 0)]).unwrap();
        let options = LloydOptions {
            max_iterations: 1,
            convergence_threshold: 0.0,
        };
        lloyd_relaxation_with_options(&mut partition, options).unwrap();

        let seed = partition.seeds()[0];
        assert!((seed.x - 1.5).abs() < 1e-6);
        assert!((seed.y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        let mut partition = VoronoiPartition::with_seeds(8, 8, &[(1, 1), (6, 6)]).unwrap();
        let before = partition.seeds().to_vec();
        lloyd_relaxation(&mut partition, 0).unwrap();
        assert_eq!(partition.seeds(), before.as_slice());
    }
}
