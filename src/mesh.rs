//! Grid to renderable geometry: square grid, floor triangulation, outlines
//! and walls in one call.

use glam::Vec3;
use tracing::{debug, warn};

use crate::cave_grid::Grid;
use crate::error::CaveResult;
use crate::marching_squares::{
    build_square_grid, check_cell_size, triangulate, validate_floor_mesh,
};
use crate::outline::{is_closed, trace_outlines, Outline};
use crate::wall::{check_wall_height, extrude_walls};

/// Complete output of [`generate_mesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaveMesh {
    pub floor_vertices: Vec<Vec3>,
    pub floor_triangles: Vec<[u32; 3]>,
    pub wall_vertices: Vec<Vec3>,
    pub wall_triangles: Vec<[u32; 3]>,
    /// Floor vertex indices along each boundary.
    pub outlines: Vec<Outline>,
    /// Per floor vertex: enclosed by solid squares.
    pub interior: Vec<bool>,
}

impl CaveMesh {
    pub fn is_empty(&self) -> bool {
        self.floor_triangles.is_empty()
    }

    pub fn closed_outline_count(&self) -> usize {
        self.outlines.iter().filter(|o| is_closed(o)).count()
    }
}

/// Meshes `grid` with squares `cell_size` wide and walls `wall_height` deep.
///
/// Both parameters are checked before any work starts, and nothing is
/// returned until every stage has finished.
pub fn generate_mesh(grid: &Grid, cell_size: f32, wall_height: f32) -> CaveResult<CaveMesh> {
    check_cell_size(cell_size)?;
    check_wall_height(wall_height)?;

    let squares = build_square_grid(grid, cell_size)?;
    let floor = triangulate(&squares);

    if cfg!(debug_assertions) {
        let report = validate_floor_mesh(&floor.vertices, &floor.triangles);
        if report.is_clean() {
            debug!(boundary_edges = report.boundary_edges, "Floor mesh validated");
        } else {
            warn!(
                non_manifold_edges = report.non_manifold_edges,
                duplicate_positions = report.duplicate_positions,
                "Floor mesh failed validation"
            );
        }
    }

    let outlines = trace_outlines(floor.vertex_count(), &floor.triangles, &floor.interior)?;
    let walls = extrude_walls(&floor.vertices, &outlines, wall_height)?;

    debug!(
        width = grid.width(),
        height = grid.height(),
        floor_triangles = floor.triangle_count(),
        outlines = outlines.len(),
        wall_triangles = walls.triangles.len(),
        "Generated cave mesh"
    );

    Ok(CaveMesh {
        floor_vertices: floor.vertices,
        floor_triangles: floor.triangles,
        wall_vertices: walls.vertices,
        wall_triangles: walls.triangles,
        outlines,
        interior: floor.interior,
    })
}
