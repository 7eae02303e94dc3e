//! Voronoi-based heightmap terrain generation
//!
//! A standalone library for generating 2D heightmaps in [0, 1] by
//! partitioning a toroidal grid into nearest-seed Voronoi regions, shaping
//! each region from interior feature points, and smoothing the result with
//! talus-based thermal erosion.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_terrain::*;
//!
//! // Generate a terrain
//! let config = TerrainConfigBuilder::new()
//!     .seed(42)
//!     .dimensions(32, 32).unwrap()
//!     .region_count(6).unwrap()
//!     .lloyd_iterations(2).unwrap()
//!     .build().unwrap();
//!
//! let terrain = VoronoiTerrain::generate(config).unwrap();
//!
//! // Generate a mesh for rendering
//! let mesh = generate_mesh(terrain.grid(), 8.0);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Design
//!
//! Region membership is a per-cell nearest-seed scan over the fixed grid,
//! not a geometric Voronoi diagram construction; on the small bounded grids
//! this crate targets, the scan is simpler and fast enough. All grid
//! indexing wraps toroidally, and every height write is bounds-checked:
//! operations that would leave [0, 1] fail instead of clamping.
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) nearest-seed lookups using a KD-tree
//! - `serde`: serialization support for configuration

// Modules
pub mod config;
pub mod erosion;
pub mod error;
pub mod generation;
pub mod grid;
pub mod io;
pub mod mesh;
pub mod partition;
pub mod raster;
pub mod shaping;
pub mod terrain;
pub mod topology;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use config::{TerrainConfig, TerrainConfigBuilder};
pub use erosion::ThermalErosion;
pub use error::{Result, TerrainError};
pub use generation::{
    lloyd_relaxation, lloyd_relaxation_with_options, sample_seed_points, LloydOptions,
};
pub use grid::HeightGrid;
pub use io::{load_grid, load_voronoi, save_grid, save_voronoi};
pub use mesh::{generate_mesh, MeshData};
pub use partition::{GridPoint, SeedPoint, VoronoiPartition};
pub use raster::render_grayscale;
pub use shaping::FeatureShaper;
pub use terrain::VoronoiTerrain;
pub use topology::{corner_cells, edge_cells};

#[cfg(feature = "spatial-index")]
pub use spatial::SeedIndex;

// Re-export glam::Vec2 for convenience
pub use glam::Vec2;
