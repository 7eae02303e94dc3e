//! Plain-text persistence for grids and partitions
//!
//! Two whitespace-delimited record formats:
//!
//! - Plain grid: line 1 is `width length`, followed by `length` rows of
//!   `width` heights (row-major, 4 decimal places).
//! - Voronoi: line 1 is `width length num_seeds`, followed by the height
//!   rows as above, followed by one line per seed:
//!   `seed_x seed_y [feat_x feat_y]*`.
//!
//! Loading validates every line and element count against the declared
//! dimensions and fails fast on any mismatch. Heights are written from
//! 3-decimal storage at 4 decimal places, so a save/load round-trip
//! reproduces the grid exactly.

use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;
use crate::partition::VoronoiPartition;
use crate::shaping::FeatureShaper;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Save a grid in the plain text format
pub fn save_grid<P: AsRef<Path>>(grid: &HeightGrid, path: P) -> Result<()> {
    let mut out = format!("{} {}\n", grid.width(), grid.length());
    write_height_rows(&mut out, grid);
    fs::write(path, out)?;
    Ok(())
}

/// Load a grid from the plain text format
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, or `InvalidFileFormat` if the
/// record is inconsistent with its own declared dimensions.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<HeightGrid> {
    let text = fs::read_to_string(path)?;
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err(TerrainError::InvalidFileFormat("empty file".to_string()));
    }

    let header = parse_row::<u32>(lines[0], 2, "header")?;
    let (width, length) = (header[0], header[1]);
    if width == 0 || length == 0 {
        return Err(TerrainError::InvalidFileFormat(format!(
            "declared dimensions must be positive (got {}x{})",
            width, length
        )));
    }
    if lines.len() != 1 + length as usize {
        return Err(TerrainError::InvalidFileFormat(format!(
            "expected {} height rows, found {}",
            length,
            lines.len() - 1
        )));
    }

    let mut grid = HeightGrid::new(width, length)?;
    read_height_rows(&mut grid, &lines[1..])?;
    Ok(grid)
}

/// Save a partition and its feature points in the Voronoi text format
pub fn save_voronoi<P: AsRef<Path>>(
    partition: &VoronoiPartition,
    shaper: &FeatureShaper,
    path: P,
) -> Result<()> {
    let mut out = format!(
        "{} {} {}\n",
        partition.width(),
        partition.length(),
        partition.seed_count()
    );
    write_height_rows(&mut out, partition.grid());

    for (idx, seed) in partition.seeds().iter().enumerate() {
        // f32 Display is the shortest representation that parses back
        // exactly, so relaxed (non-integer) seeds round-trip losslessly.
        let _ = write!(out, "{} {}", seed.x, seed.y);
        if let Ok(points) = shaper.feature_points(idx) {
            for &(fx, fy) in points {
                let _ = write!(out, " {} {}", fx, fy);
            }
        }
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}

/// Load a partition and its feature points from the Voronoi text format
///
/// The partition is reconstructed by recomputing region membership from the
/// loaded seed list; feature points are re-registered against the recomputed
/// regions, so a record whose points do not match its own seeds fails with
/// `OutOfRegion`.
pub fn load_voronoi<P: AsRef<Path>>(path: P) -> Result<(VoronoiPartition, FeatureShaper)> {
    let text = fs::read_to_string(path)?;
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err(TerrainError::InvalidFileFormat("empty file".to_string()));
    }

    let header = parse_row::<u32>(lines[0], 3, "header")?;
    let (width, length, num_seeds) = (header[0], header[1], header[2] as usize);
    if width == 0 || length == 0 {
        return Err(TerrainError::InvalidFileFormat(format!(
            "declared dimensions must be positive (got {}x{})",
            width, length
        )));
    }
    if lines.len() != 1 + length as usize + num_seeds {
        return Err(TerrainError::InvalidFileFormat(format!(
            "expected {} height rows and {} seed lines, found {} lines after header",
            length,
            num_seeds,
            lines.len() - 1
        )));
    }

    let mut partition = VoronoiPartition::new(width, length)?;
    let seed_lines = &lines[1 + length as usize..];

    let mut seeds = Vec::with_capacity(num_seeds);
    let mut feature_lists = Vec::with_capacity(num_seeds);
    for line in seed_lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 || tokens.len() % 2 != 0 {
            return Err(TerrainError::InvalidFileFormat(format!(
                "seed line must hold a seed pair plus whole feature pairs: {:?}",
                line
            )));
        }
        let sx = parse_token::<f32>(tokens[0], "seed coordinate")?;
        let sy = parse_token::<f32>(tokens[1], "seed coordinate")?;
        seeds.push(glam::Vec2::new(sx, sy));

        let mut features = Vec::new();
        for pair in tokens[2..].chunks(2) {
            let fx = parse_token::<i32>(pair[0], "feature coordinate")?;
            let fy = parse_token::<i32>(pair[1], "feature coordinate")?;
            features.push((fx, fy));
        }
        feature_lists.push(features);
    }

    partition.replace_seeds(seeds);
    read_height_rows(partition.grid_mut(), &lines[1..1 + length as usize])?;

    let mut shaper = FeatureShaper::new(partition.seed_count());
    for (idx, features) in feature_lists.into_iter().enumerate() {
        for (fx, fy) in features {
            shaper.add_feature_point(&partition, idx, fx, fy)?;
        }
    }

    Ok((partition, shaper))
}

fn write_height_rows(out: &mut String, grid: &HeightGrid) {
    for y in 0..grid.length() as i32 {
        let row: Vec<String> = (0..grid.width() as i32)
            .map(|x| format!("{:.4}", grid.get(x, y)))
            .collect();
        let _ = writeln!(out, "{}", row.join(" "));
    }
}

fn read_height_rows(grid: &mut HeightGrid, rows: &[&str]) -> Result<()> {
    for (y, row) in rows.iter().enumerate() {
        let heights = parse_row::<f32>(row, grid.width() as usize, "height row")?;
        for (x, &h) in heights.iter().enumerate() {
            grid.set(x as i32, y as i32, h)?;
        }
    }
    Ok(())
}

fn parse_row<T: std::str::FromStr>(line: &str, expected: usize, what: &str) -> Result<Vec<T>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(TerrainError::InvalidFileFormat(format!(
            "{} must hold {} values, found {}",
            what,
            expected,
            tokens.len()
        )));
    }
    tokens
        .into_iter()
        .map(|t| parse_token(t, what))
        .collect()
}

fn parse_token<T: std::str::FromStr>(token: &str, what: &str) -> Result<T> {
    token.parse().map_err(|_| {
        TerrainError::InvalidFileFormat(format!("unparseable {} {:?}", what, token))
    })
}
