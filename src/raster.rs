//! 2D grayscale raster preview
//!
//! Read-only consumer of the height grid: each cell height maps linearly to
//! a grayscale intensity. Useful for eyeballing generated terrain or writing
//! PNG snapshots with the `image` crate's encoders.

use crate::grid::HeightGrid;
use image::{GrayImage, Luma};

/// Render a grid as a grayscale image, one pixel per cell
///
/// Height 0.0 maps to black, 1.0 to white.
pub fn render_grayscale(grid: &HeightGrid) -> GrayImage {
    GrayImage::from_fn(grid.width(), grid.length(), |x, y| {
        let h = grid.get(x as i32, y as i32);
        Luma([(h * 255.0).round() as u8])
    })
}
