//! Talus-based thermal erosion
//!
//! Repeated diffusion passes move material from a cell to any von-Neumann
//! neighbor sitting more than `talus` below it. The amount moved is
//! proportional to each neighbor's share of the total qualifying drop,
//! scaled by how far the steepest drop exceeds the talus threshold.
//!
//! Passes mutate the grid in place in row-major order: a neighbor processed
//! earlier in the same pass already reflects prior transfers. This ordering
//! dependence is a defined, reproducible property of the algorithm, not an
//! artifact. A parallel or double-buffered variant would be a different
//! algorithm and is intentionally not provided.

use crate::error::Result;
use crate::grid::HeightGrid;

/// 4-connected von-Neumann neighborhood offsets
const VON_NEUMANN: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Configurable thermal erosion pass
///
/// # Example
///
/// ```
/// use voronoi_terrain::{HeightGrid, ThermalErosion};
///
/// let mut grid = HeightGrid::new(5, 5).unwrap();
/// grid.set(2, 2, 1.0).unwrap();
///
/// ThermalErosion::new(1, 0.5).apply(&mut grid).unwrap();
/// assert!(grid.get(2, 2) < 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThermalErosion {
    iterations: usize,
    talus: f32,
}

impl ThermalErosion {
    /// Create an erosion pass
    ///
    /// `talus` is the minimum height difference between neighboring cells
    /// required to trigger a transfer; `iterations` is the number of full
    /// grid passes.
    pub fn new(iterations: usize, talus: f32) -> Self {
        Self { iterations, talus }
    }

    /// Run the configured number of passes over a grid, in place
    ///
    /// Neighbors wrap toroidally. All writes go through the bounds-checked
    /// setter, so parameters that would push a height outside [0, 1] fail
    /// loudly instead of clamping.
    pub fn apply(&self, grid: &mut HeightGrid) -> Result<()> {
        let width = grid.width() as i32;
        let length = grid.length() as i32;

        for _ in 0..self.iterations {
            for y in 0..length {
                for x in 0..width {
                    self.erode_cell(grid, x, y)?;
                }
            }
        }
        Ok(())
    }

    fn erode_cell(&self, grid: &mut HeightGrid, x: i32, y: i32) -> Result<()> {
        let current = grid.get(x, y);

        let mut qualifying: Vec<((i32, i32), f32)> = Vec::with_capacity(4);
        let mut diff_total = 0.0f32;
        let mut diff_max = 0.0f32;
        for &(dx, dy) in &VON_NEUMANN {
            let diff = current - grid.get(x + dx, y + dy);
            if diff > self.talus {
                qualifying.push(((x + dx, y + dy), diff));
                diff_total += diff;
                diff_max = diff_max.max(diff);
            }
        }
        if qualifying.is_empty() {
            return Ok(());
        }

        let movable = diff_max - self.talus;
        let mut remaining = current;
        for ((nx, ny), diff) in qualifying {
            let transfer = movable * diff / diff_total;
            let neighbor = grid.get(nx, ny);
            grid.set(nx, ny, neighbor + transfer)?;
            remaining -= transfer;
        }
        grid.set(x, y, remaining)
    }
}
