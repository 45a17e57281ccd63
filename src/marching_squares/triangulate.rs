//! Marching squares over a [`SquareGrid`]: one case-table lookup per square,
//! fanned into triangles over a shared, deduplicated vertex buffer.

use glam::Vec3;
use tracing::debug;

use super::cases::{case_points, fan_triangles, SOLID_CONFIGURATION};
use super::square_grid::SquareGrid;
use super::types::SquarePoint;
use super::vertex::VertexBuffer;

/// Floor mesh produced by [`triangulate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    /// Per vertex: corner of at least one solid (configuration 15) square.
    pub interior: Vec<bool>,
}

impl Triangulation {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Triangulates every square in x-major order.
///
/// Vertex indices follow first use, so the same grid always yields the same
/// buffers. Solid squares mark their four corners interior.
pub fn triangulate(grid: &SquareGrid) -> Triangulation {
    let mut buffer = VertexBuffer::for_grid(grid);
    let mut triangles = Vec::new();
    let mut solid_corners = Vec::new();
    let mut indices = Vec::with_capacity(6);

    for square in grid.squares() {
        let points = case_points(square.configuration);
        if points.is_empty() {
            continue;
        }

        indices.clear();
        indices.extend(
            points
                .iter()
                .map(|&point| buffer.index_of(grid, square.node(point))),
        );
        triangles.extend(fan_triangles(&indices));

        if square.configuration == SOLID_CONFIGURATION {
            solid_corners.extend(
                SquarePoint::CORNERS
                    .iter()
                    .map(|&corner| buffer.index_of(grid, square.node(corner))),
            );
        }
    }

    let mut interior = vec![false; buffer.len()];
    for index in solid_corners {
        interior[index as usize] = true;
    }

    debug!(
        squares = grid.squares().len(),
        vertices = buffer.len(),
        triangles = triangles.len(),
        interior = interior.iter().filter(|&&i| i).count(),
        "Triangulated square grid"
    );

    Triangulation {
        vertices: buffer.into_vertices(),
        triangles,
        interior,
    }
}
