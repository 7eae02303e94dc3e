//! Height-field mesh generation
//!
//! Generates engine-agnostic mesh data from a height grid: one vertex per
//! cell with the height on the Y axis, two triangles per grid quad. A pure,
//! read-only consumer of the grid.

use crate::grid::HeightGrid;
use glam::Vec3;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (x, height * y_scale, y)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals from central-difference height gradients
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Generate a height-field surface mesh from a grid
///
/// `y_scale` stretches heights vertically; grid cells are 1 unit apart on
/// the X/Z plane. Normals use central differences with toroidal reads, so
/// edge vertices get sensible shading too.
pub fn generate_mesh(grid: &HeightGrid, y_scale: f32) -> MeshData {
    let width = grid.width();
    let length = grid.length();
    let mut mesh = MeshData::default();

    for y in 0..length as i32 {
        for x in 0..width as i32 {
            mesh.positions
                .push([x as f32, grid.get(x, y) * y_scale, y as f32]);

            let left = grid.get(x - 1, y);
            let right = grid.get(x + 1, y);
            let down = grid.get(x, y - 1);
            let up = grid.get(x, y + 1);
            let normal = Vec3::new((left - right) * y_scale, 2.0, (down - up) * y_scale)
                .normalize();
            mesh.normals.push([normal.x, normal.y, normal.z]);
        }
    }

    // Two triangles per quad, counter-clockwise when viewed from above
    for y in 0..length - 1 {
        for x in 0..width - 1 {
            let i = y * width + x;
            mesh.indices.push(i);
            mesh.indices.push(i + width);
            mesh.indices.push(i + 1);

            mesh.indices.push(i + 1);
            mesh.indices.push(i + width);
            mesh.indices.push(i + width + 1);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_counts() {
        let grid = HeightGrid::new(4, 3).unwrap();
        let mesh = generate_mesh(&grid, 1.0);

        assert!(!mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 2 * 3 * 2);
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_mesh_heights_scaled() {
        let mut grid = HeightGrid::new(2, 2).unwrap();
        grid.set(1, 1, 0.5).unwrap();

        let mesh = generate_mesh(&grid, 10.0);
        // Row-major: vertex for (1, 1) is the last one
        assert_eq!(mesh.positions[3], [1.0, 5.0, 1.0]);
        assert_eq!(mesh.positions[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_flat_grid_normals_point_up() {
        let grid = HeightGrid::new(3, 3).unwrap();
        let mesh = generate_mesh(&grid, 1.0);
        for normal in &mesh.normals {
            assert_eq!(*normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_mesh_consistency() {
        let mut grid = HeightGrid::new(5, 5).unwrap();
        grid.set(2, 2, 0.8).unwrap();

        let a = generate_mesh(&grid, 1.0);
        let b = generate_mesh(&grid, 1.0);
        assert_eq!(a.vertex_count(), b.vertex_count());
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_indices_in_range() {
        let grid = HeightGrid::new(4, 4).unwrap();
        let mesh = generate_mesh(&grid, 1.0);
        let max = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }
}
