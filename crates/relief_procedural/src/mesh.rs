//! # Mesh Derivation
//!
//! Turns elevation grids into the flat arrays a renderer uploads.
//!
//! ## Coordinate Convention
//!
//! Vertex `(row, col)` of an `n x n` grid sits at
//! `(col, elevation, -n + row + 1)`: +x is right, +y is up, and the grid lies
//! in front of the origin along -z with its last row on `z = 0`.
//!
//! ## Winding
//!
//! Every cell emits the same two triangles, with `p00 = (row, col)` and so on:
//! `p11, p01, p00` then `p11, p00, p10`. Face normals use the first triangle,
//! so a flat grid has normals pointing +y.

use std::time::Instant;

use relief_shared::{Vec2, Vec3};

use crate::control::ControlGrid;
use crate::grid::toroidal_index;
use crate::synthesis::Heightfield;

/// Render-ready mesh for the dense heightfield.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    max_height: f32,
}

impl TerrainMesh {
    /// Derives positions, normals, UVs and indices from a heightfield.
    #[must_use]
    pub fn from_heightfield(field: &Heightfield) -> Self {
        let size = field.size();

        let start = Instant::now();
        let positions = grid_positions(size, field.heights());
        tracing::debug!("Generated vertices in {:?}", start.elapsed());

        let start = Instant::now();
        let indices = grid_indices(size);
        tracing::debug!("Generated indices in {:?}", start.elapsed());

        let start = Instant::now();
        let faces = face_normals(size, &positions);
        tracing::debug!("Generated face normals in {:?}", start.elapsed());

        let start = Instant::now();
        let normals = vertex_normals(size, &faces);
        tracing::debug!("Generated vertex normals in {:?}", start.elapsed());

        let start = Instant::now();
        let uvs = grid_uvs(size);
        tracing::debug!("Generated UVs in {:?}", start.elapsed());

        Self {
            positions,
            normals,
            uvs,
            indices,
            max_height: field.max_height(),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangle indices.
    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Highest elevation in the mesh, for height-based shading.
    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals. Averaged, not renormalized.
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Per-vertex texture coordinates.
    #[must_use]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Triangle list indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as `3 * vertex_count` floats.
    #[must_use]
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as `3 * vertex_count` floats.
    #[must_use]
    pub fn normal_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// UVs as `2 * vertex_count` floats.
    #[must_use]
    pub fn uv_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Position bytes, ready for a vertex buffer.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal bytes, ready for a vertex buffer.
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// UV bytes, ready for a vertex buffer.
    #[must_use]
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Index bytes, ready for an index buffer.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Coarse wireframe of the control grid: positions and indices only.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayMesh {
    size: usize,
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl OverlayMesh {
    /// Derives positions and indices straight from the control elevations.
    #[must_use]
    pub fn from_control_grid(control: &ControlGrid) -> Self {
        let size = control.grid_size();

        let start = Instant::now();
        let positions = grid_positions(size, control.heights());
        tracing::debug!("Generated overlay vertices in {:?}", start.elapsed());

        let start = Instant::now();
        let indices = grid_indices(size);
        tracing::debug!("Generated overlay indices in {:?}", start.elapsed());

        Self {
            size,
            positions,
            indices,
        }
    }

    /// Control points per side.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangle indices.
    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle list indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as `3 * vertex_count` floats.
    #[must_use]
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Position bytes, ready for a vertex buffer.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Index bytes, ready for an index buffer.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

fn grid_positions(size: usize, heights: &[f32]) -> Vec<Vec3> {
    debug_assert_eq!(heights.len(), size * size);
    let far_edge = -(size as f32) + 1.0;

    let mut positions = Vec::with_capacity(size * size);
    for row in 0..size {
        for column in 0..size {
            positions.push(Vec3::new(
                column as f32,
                heights[row * size + column],
                far_edge + row as f32,
            ));
        }
    }
    positions
}

fn grid_indices(size: usize) -> Vec<u32> {
    let cells = size - 1;
    let mut indices = Vec::with_capacity(cells * cells * 6);
    for row in 0..cells {
        for column in 0..cells {
            let p00 = (row * size + column) as u32;
            let p01 = p00 + 1;
            let p10 = p00 + size as u32;
            let p11 = p10 + 1;
            indices.extend_from_slice(&[p11, p01, p00, p11, p00, p10]);
        }
    }
    indices
}

/// One normal per cell, from the cell's first triangle.
fn face_normals(size: usize, positions: &[Vec3]) -> Vec<Vec3> {
    let cells = size - 1;
    let mut normals = Vec::with_capacity(cells * cells);
    for row in 0..cells {
        for column in 0..cells {
            let p00 = positions[row * size + column];
            let p01 = positions[row * size + column + 1];
            let p11 = positions[(row + 1) * size + column + 1];

            let a = p01 - p11;
            let b = p00 - p01;
            normals.push(a.cross(b));
        }
    }
    normals
}

/// Averages the four cells around each vertex, wrapping at the grid edges.
fn vertex_normals(size: usize, faces: &[Vec3]) -> Vec<Vec3> {
    let cells = size - 1;
    let face = |row: isize, column: isize| faces[toroidal_index(row, column, cells, cells)];

    let mut normals = Vec::with_capacity(size * size);
    for row in 0..size as isize {
        for column in 0..size as isize {
            let top_left = face(row - 1, column - 1);
            let top_right = face(row - 1, column);
            let bottom_left = face(row, column - 1);
            let bottom_right = face(row, column);
            normals.push((top_left + top_right + bottom_left + bottom_right) / 4.0);
        }
    }
    normals
}

fn grid_uvs(size: usize) -> Vec<Vec2> {
    let span = (size - 1) as f32;
    let mut uvs = Vec::with_capacity(size * size);
    for row in 0..size {
        for column in 0..size {
            uvs.push(Vec2::new(column as f32 / span, (span - row as f32) / span));
        }
    }
    uvs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_convention() {
        let positions = grid_positions(3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(positions[0], Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(positions[5], Vec3::new(2.0, 5.0, -1.0));
        assert_eq!(positions[8], Vec3::new(2.0, 8.0, 0.0));
    }

    #[test]
    fn test_index_winding() {
        let indices = grid_indices(3);
        assert_eq!(indices.len(), 24);
        // Cell (0, 0): p00=0, p01=1, p10=3, p11=4
        assert_eq!(&indices[..6], &[4, 1, 0, 4, 0, 3]);
        // Cell (1, 1): p00=4, p01=5, p10=7, p11=8
        assert_eq!(&indices[18..], &[8, 5, 4, 8, 4, 7]);
    }

    #[test]
    fn test_flat_face_normal_points_up() {
        let positions = grid_positions(2, &[3.0; 4]);
        let faces = face_normals(2, &positions);
        assert_eq!(faces, vec![Vec3::Y]);
    }

    #[test]
    fn test_sloped_face_normal() {
        // Heights rise along +x by 1 per column: normal tilts toward -x
        let positions = grid_positions(2, &[0.0, 1.0, 0.0, 1.0]);
        let faces = face_normals(2, &positions);
        assert_eq!(faces[0], Vec3::new(-1.0, 1.0, 0.0));
    }

    #[test]
    fn test_vertex_normals_average_without_renormalizing() {
        // Two cells per side; faces differ so wraparound averaging is visible
        let faces = vec![
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];
        let normals = vertex_normals(3, &faces);
        assert_eq!(normals.len(), 9);
        // Every vertex of a 2x2 cell grid sees all four faces once
        for n in &normals {
            assert_eq!(*n, Vec3::new(0.0, 1.0, 0.0));
        }

        let tilted = vec![Vec3::new(1.0, 1.0, 0.0); 4];
        let normals = vertex_normals(3, &tilted);
        assert!((normals[4].length() - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_uvs_span_unit_square() {
        let uvs = grid_uvs(5);
        assert_eq!(uvs[0], Vec2::new(0.0, 1.0));
        assert_eq!(uvs[4], Vec2::new(1.0, 1.0));
        assert_eq!(uvs[20], Vec2::new(0.0, 0.0));
        assert_eq!(uvs[24], Vec2::new(1.0, 0.0));
        assert_eq!(uvs[12], Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_overlay_has_no_shading_attributes() {
        let control = ControlGrid::new(1, 4, vec![1.0; 9]).unwrap();
        let overlay = OverlayMesh::from_control_grid(&control);
        assert_eq!(overlay.vertex_count(), 9);
        assert_eq!(overlay.index_count(), 24);
        assert_eq!(overlay.position_floats().len(), 27);
        assert_eq!(overlay.index_bytes().len(), 24 * 4);
    }
}
