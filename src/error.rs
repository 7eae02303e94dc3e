//! Error types for terrain generation and persistence

use std::fmt;
use std::io;

/// Errors that can occur during terrain generation, shaping, or persistence
#[derive(Debug)]
pub enum TerrainError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Elementwise grid operation on grids with different dimensions
    InvalidDimensions(String),
    /// A height write would leave the valid [0, 1] range
    HeightOutOfBounds(f32),
    /// A serialized record is inconsistent with its own declared dimensions
    InvalidFileFormat(String),
    /// Requested seed index does not exist
    SeedNotFound(usize),
    /// A feature point does not belong to the claimed region
    OutOfRegion { seed: usize, x: i32, y: i32 },
    /// Coefficient list length does not match the region's feature points
    InvalidCoefficientCount { expected: usize, actual: usize },
    /// A region has no member cells where at least one is required
    EmptyRegion(usize),
    /// Underlying file I/O failure
    Io(io::Error),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            TerrainError::InvalidDimensions(msg) => write!(f, "invalid dimensions: {}", msg),
            TerrainError::HeightOutOfBounds(h) => {
                write!(f, "height {} is outside the valid range [0, 1]", h)
            }
            TerrainError::InvalidFileFormat(msg) => write!(f, "invalid file format: {}", msg),
            TerrainError::SeedNotFound(seed) => write!(f, "seed not found: {}", seed),
            TerrainError::OutOfRegion { seed, x, y } => {
                write!(f, "point ({}, {}) is not a member of region {}", x, y, seed)
            }
            TerrainError::InvalidCoefficientCount { expected, actual } => {
                write!(f, "expected {} coefficients, got {}", expected, actual)
            }
            TerrainError::EmptyRegion(seed) => write!(f, "region {} has no member cells", seed),
            TerrainError::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TerrainError {
    fn from(err: io::Error) -> Self {
        TerrainError::Io(err)
    }
}

/// Result type alias for terrain operations
pub type Result<T> = std::result::Result<T, TerrainError>;
