//! Bounded toroidal height grid
//!
//! The grid stores one height per cell, always within [0, 1] after rounding
//! to three decimal places at write time. Indexing wraps on both axes, so the
//! grid is topologically a torus: any integer coordinate pair is valid for
//! both reads and writes.

use crate::error::{Result, TerrainError};
use std::fmt;

/// Number of decimal places heights are rounded to at write time
const HEIGHT_PRECISION: f32 = 1000.0;

/// Round a height to the grid's storage precision (3 decimal places)
pub(crate) fn round_height(h: f32) -> f32 {
    (h * HEIGHT_PRECISION).round() / HEIGHT_PRECISION
}

/// A width x length grid of heights in [0, 1] with toroidal addressing
///
/// Created all-zero and never resized. Arithmetic operators return new grids
/// and reject (rather than clamp) any per-cell result outside [0, 1].
///
/// # Example
///
/// ```
/// use voronoi_terrain::HeightGrid;
///
/// let mut grid = HeightGrid::new(4, 4).unwrap();
/// grid.set(1, 2, 0.5).unwrap();
///
/// // Reads wrap toroidally on both axes
/// assert_eq!(grid.get(1, 2), 0.5);
/// assert_eq!(grid.get(5, -2), 0.5);
///
/// // Writes outside [0, 1] fail instead of clamping
/// assert!(grid.set(0, 0, 1.5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    width: u32,
    length: u32,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Create a grid with all heights at zero
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero.
    pub fn new(width: u32, length: u32) -> Result<Self> {
        if width == 0 || length == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "grid dimensions must be positive (got {}x{})",
                width, length
            )));
        }
        Ok(Self {
            width,
            length,
            heights: vec![0.0; width as usize * length as usize],
        })
    }

    /// Grid width (cells along the x axis)
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid length (cells along the y axis)
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Row-major storage index for a toroidally wrapped coordinate
    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        let xi = x.rem_euclid(self.width as i32) as usize;
        let yi = y.rem_euclid(self.length as i32) as usize;
        yi * self.width as usize + xi
    }

    /// Read the height at a coordinate, wrapping out-of-range indices
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.heights[self.index(x, y)]
    }

    /// Write a height at a coordinate, wrapping out-of-range indices
    ///
    /// The value is rounded to three decimal places before the bounds check.
    ///
    /// # Errors
    ///
    /// Returns `HeightOutOfBounds` if the rounded value is outside [0, 1].
    pub fn set(&mut self, x: i32, y: i32, height: f32) -> Result<()> {
        let rounded = round_height(height);
        if !(0.0..=1.0).contains(&rounded) {
            return Err(TerrainError::HeightOutOfBounds(rounded));
        }
        let idx = self.index(x, y);
        self.heights[idx] = rounded;
        Ok(())
    }

    /// Elementwise sum of two grids
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the grids differ in size, or
    /// `HeightOutOfBounds` if any per-cell sum leaves [0, 1].
    pub fn add(&self, other: &HeightGrid) -> Result<HeightGrid> {
        self.check_dimensions(other)?;
        self.zip_map(other, |a, b| a + b)
    }

    /// Elementwise difference of two grids
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the grids differ in size, or
    /// `HeightOutOfBounds` if any per-cell difference leaves [0, 1].
    pub fn subtract(&self, other: &HeightGrid) -> Result<HeightGrid> {
        self.check_dimensions(other)?;
        self.zip_map(other, |a, b| a - b)
    }

    /// Elementwise multiplication by a scalar
    ///
    /// # Errors
    ///
    /// Returns `HeightOutOfBounds` if any scaled value leaves [0, 1].
    pub fn scale(&self, factor: f32) -> Result<HeightGrid> {
        let mut result = HeightGrid::new(self.width, self.length)?;
        for y in 0..self.length as i32 {
            for x in 0..self.width as i32 {
                result.set(x, y, self.get(x, y) * factor)?;
            }
        }
        Ok(result)
    }

    /// Sum of all heights, accumulated in f64 to limit drift
    ///
    /// Useful for conservation checks around erosion passes.
    pub fn total_height(&self) -> f64 {
        self.heights.iter().map(|&h| h as f64).sum()
    }

    fn check_dimensions(&self, other: &HeightGrid) -> Result<()> {
        if self.width != other.width || self.length != other.length {
            return Err(TerrainError::InvalidDimensions(format!(
                "{}x{} vs {}x{}",
                self.width, self.length, other.width, other.length
            )));
        }
        Ok(())
    }

    fn zip_map(&self, other: &HeightGrid, op: impl Fn(f32, f32) -> f32) -> Result<HeightGrid> {
        let mut result = HeightGrid::new(self.width, self.length)?;
        for y in 0..self.length as i32 {
            for x in 0..self.width as i32 {
                result.set(x, y, op(self.get(x, y), other.get(x, y)))?;
            }
        }
        Ok(result)
    }
}

impl fmt::Display for HeightGrid {
    /// Render rows of absolute heights to one decimal place, tab-separated
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.length as i32 {
            let row: Vec<String> = (0..self.width as i32)
                .map(|x| format!("{:.1}", self.get(x, y).abs()))
                .collect();
            writeln!(f, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_zero() {
        let grid = HeightGrid::new(5, 3).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.length(), 3);
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(grid.get(x, y), 0.0);
            }
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(HeightGrid::new(0, 4).is_err());
        assert!(HeightGrid::new(4, 0).is_err());
    }

    #[test]
    fn test_toroidal_wrap_law() {
        let mut grid = HeightGrid::new(4, 3).unwrap();
        grid.set(1, 2, 0.25).unwrap();

        for k in -3..=3i32 {
            for j in -3..=3i32 {
                assert_eq!(grid.get(1 + k * 4, 2 + j * 3), 0.25);
            }
        }
    }

    #[test]
    fn test_toroidal_write() {
        let mut grid = HeightGrid::new(4, 4).unwrap();
        grid.set(-1, -1, 0.5).unwrap();
        assert_eq!(grid.get(3, 3), 0.5);
    }

    #[test]
    fn test_set_rounds_to_three_decimals() {
        let mut grid = HeightGrid::new(2, 2).unwrap();
        grid.set(0, 0, 0.12349).unwrap();
        assert_eq!(grid.get(0, 0), 0.123);

        grid.set(0, 0, 0.9996).unwrap();
        assert_eq!(grid.get(0, 0), 1.0);
    }

    #[test]
    fn test_set_out_of_bounds_fails() {
        let mut grid = HeightGrid::new(2, 2).unwrap();
        assert!(grid.set(0, 0, 1.001).is_err());
        assert!(grid.set(0, 0, -0.001).is_err());
        // A value that rounds back into range is accepted
        assert!(grid.set(0, 0, 1.0004).is_ok());
        assert_eq!(grid.get(0, 0), 1.0);
    }

    #[test]
    fn test_add_and_subtract_inverse() {
        let mut a = HeightGrid::new(3, 3).unwrap();
        let mut b = HeightGrid::new(3, 3).unwrap();
        // Binary-exact values so rounding never interferes
        a.set(0, 0, 0.5).unwrap();
        a.set(1, 1, 0.75).unwrap();
        b.set(0, 0, 0.25).unwrap();
        b.set(2, 2, 0.125).unwrap();

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.get(0, 0), 0.75);
        assert_eq!(sum, b.add(&a).unwrap());

        let restored = a.subtract(&b).unwrap().add(&b).unwrap();
        assert_eq!(restored, a);
    }

    #[test]
    fn test_add_overflow_rejected() {
        let mut a = HeightGrid::new(2, 2).unwrap();
        let mut b = HeightGrid::new(2, 2).unwrap();
        a.set(0, 0, 0.75).unwrap();
        b.set(0, 0, 0.5).unwrap();
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn test_subtract_underflow_rejected() {
        let mut a = HeightGrid::new(2, 2).unwrap();
        let mut b = HeightGrid::new(2, 2).unwrap();
        a.set(0, 0, 0.25).unwrap();
        b.set(0, 0, 0.5).unwrap();
        assert!(a.subtract(&b).is_err());
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let a = HeightGrid::new(2, 2).unwrap();
        let b = HeightGrid::new(3, 2).unwrap();
        assert!(matches!(
            a.add(&b),
            Err(TerrainError::InvalidDimensions(_))
        ));
        assert!(matches!(
            a.subtract(&b),
            Err(TerrainError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_scale() {
        let mut a = HeightGrid::new(2, 2).unwrap();
        a.set(0, 0, 0.5).unwrap();
        a.set(1, 1, 0.25).unwrap();

        let scaled = a.scale(0.5).unwrap();
        assert_eq!(scaled.get(0, 0), 0.25);
        assert_eq!(scaled.get(1, 1), 0.125);

        // Scaling up past 1.0 is an error, not a clamp
        let mut b = HeightGrid::new(2, 2).unwrap();
        b.set(0, 0, 0.6).unwrap();
        assert!(b.scale(2.0).is_err());
    }

    #[test]
    fn test_equality_laws() {
        let mut a = HeightGrid::new(2, 2).unwrap();
        a.set(0, 1, 0.5).unwrap();
        let b = a.clone();

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);

        let different_dims = HeightGrid::new(2, 3).unwrap();
        assert_ne!(a, different_dims);

        let mut different_cell = a.clone();
        different_cell.set(0, 1, 0.25).unwrap();
        assert_ne!(a, different_cell);
    }

    #[test]
    fn test_display_rendering() {
        let mut grid = HeightGrid::new(3, 2).unwrap();
        grid.set(0, 0, 0.5).unwrap();
        grid.set(2, 1, 1.0).unwrap();
        assert_eq!(grid.to_string(), "0.5\t0.0\t0.0\n0.0\t0.0\t1.0\n");
    }

    #[test]
    fn test_total_height() {
        let mut grid = HeightGrid::new(2, 2).unwrap();
        grid.set(0, 0, 0.5).unwrap();
        grid.set(1, 1, 0.25).unwrap();
        assert!((grid.total_height() - 0.75).abs() < 1e-9);
    }
}
