use std::collections::HashMap;

use glam::Vec3;

/// Quantization step used when looking for coincident vertices.
const POSITION_EPSILON: f32 = 1e-4;

/// Edge statistics for an indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshReport {
    /// Edges used by exactly one triangle.
    pub boundary_edges: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edges: usize,
    /// Position groups holding more than one vertex.
    pub duplicate_positions: usize,
}

impl MeshReport {
    /// No non-manifold edges and no coincident-but-distinct vertices.
    pub fn is_clean(&self) -> bool {
        self.non_manifold_edges == 0 && self.duplicate_positions == 0
    }
}

/// Undirected edge key with the smaller index first.
#[inline]
pub(crate) fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Counts how many triangles use each undirected edge.
pub fn edge_counts(triangles: &[[u32; 3]]) -> HashMap<(u32, u32), u32> {
    let mut counts = HashMap::with_capacity(triangles.len() * 3 / 2);
    for &[a, b, c] in triangles {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *counts.entry(edge_key(u, v)).or_insert(0) += 1;
        }
    }
    counts
}

/// Number of position groups with more than one vertex, after snapping
/// positions to a `POSITION_EPSILON` lattice.
pub fn count_duplicate_positions(vertices: &[Vec3]) -> usize {
    let scale = 1.0 / POSITION_EPSILON;
    let mut position_counts: HashMap<(i64, i64, i64), usize> = HashMap::new();
    for v in vertices {
        let key = (
            (v.x * scale).round() as i64,
            (v.y * scale).round() as i64,
            (v.z * scale).round() as i64,
        );
        *position_counts.entry(key).or_insert(0) += 1;
    }
    position_counts.values().filter(|&&count| count > 1).count()
}

/// Checks a floor mesh for the properties outline tracing relies on.
pub fn validate_floor_mesh(vertices: &[Vec3], triangles: &[[u32; 3]]) -> MeshReport {
    let counts = edge_counts(triangles);
    MeshReport {
        boundary_edges: counts.values().filter(|&&c| c == 1).count(),
        non_manifold_edges: counts.values().filter(|&&c| c > 2).count(),
        duplicate_positions: count_duplicate_positions(vertices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave_grid::{generate_grid, Cell, Grid};
    use crate::marching_squares::{build_square_grid, triangulate};

    #[test]
    fn test_single_triangle_is_all_boundary() {
        let verts = [Vec3::ZERO, Vec3::X, Vec3::Z];
        let report = validate_floor_mesh(&verts, &[[0, 1, 2]]);
        assert_eq!(report.boundary_edges, 3);
        assert!(report.is_clean());
    }

    #[test]
    fn test_quad_shares_diagonal() {
        let verts = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 1.0), Vec3::Z];
        let counts = edge_counts(&[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(counts[&(0, 2)], 2);
        let report = validate_floor_mesh(&verts, &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(report.boundary_edges, 4);
    }

    #[test]
    fn test_detects_fan_of_three() {
        let verts = [Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::Y, Vec3::NEG_X];
        let tris = [[0, 1, 2], [0, 1, 3], [0, 1, 4]];
        let report = validate_floor_mesh(&verts, &tris);
        assert_eq!(report.non_manifold_edges, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_detects_duplicate_positions() {
        let verts = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 0.00001)];
        assert_eq!(count_duplicate_positions(&verts), 1);
    }

    #[test]
    fn test_ring_boundary_edge_count() {
        // 16 border edges outside, 12 edges around the inner floor.
        let grid = Grid::walled(5, 5, Cell::Floor).unwrap();
        let tri = triangulate(&build_square_grid(&grid, 1.0).unwrap());
        let report = validate_floor_mesh(&tri.vertices, &tri.triangles);
        assert_eq!(report.boundary_edges, 16 + 12);
        assert!(report.is_clean());
    }

    #[test]
    fn test_generated_caves_are_clean() {
        for seed in 0..8u64 {
            let grid = generate_grid(48, 36, seed, 47, 5).unwrap();
            let tri = triangulate(&build_square_grid(&grid, 1.0).unwrap());
            let report = validate_floor_mesh(&tri.vertices, &tri.triangles);
            assert!(report.is_clean(), "seed {seed}: {report:?}");
        }
    }
}
