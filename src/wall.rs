//! Wall extrusion: one downward quad per outline segment.

use glam::Vec3;
use tracing::debug;

use crate::error::{CaveError, CaveResult};
use crate::outline::Outline;

/// Vertical wall geometry. Every segment owns its four vertices; nothing is
/// shared with neighbouring segments or with the floor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl WallMesh {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.triangles.len() / 2
    }

    /// Appends TL, TR, BL, BR and the two triangles (TL, BL, BR), (BR, TR, TL).
    fn add_quad(&mut self, top_left: Vec3, top_right: Vec3, depth: Vec3) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend([top_left, top_right, top_left - depth, top_right - depth]);
        self.triangles
            .extend([[base, base + 2, base + 3], [base + 3, base + 1, base]]);
    }
}

pub(crate) fn check_wall_height(wall_height: f32) -> CaveResult<()> {
    if !wall_height.is_finite() || wall_height < 0.0 {
        return Err(CaveError::invalid_parameter(
            "wall_height",
            format!("must be a finite value >= 0, got {wall_height}"),
        ));
    }
    Ok(())
}

/// Extrudes every outline downward by `wall_height`.
///
/// Outlines must keep the solid on their left seen from +Y (as
/// [`trace_outlines`](crate::outline::trace_outlines) returns them); the
/// resulting faces then point away from the solid.
pub fn extrude_walls(
    vertices: &[Vec3],
    outlines: &[Outline],
    wall_height: f32,
) -> CaveResult<WallMesh> {
    check_wall_height(wall_height)?;

    let position = |index: u32| {
        vertices.get(index as usize).copied().ok_or_else(|| {
            CaveError::inconsistency(format!(
                "outline references vertex {index}, but only {} exist",
                vertices.len()
            ))
        })
    };

    let segments: usize = outlines.iter().map(|o| o.len().saturating_sub(1)).sum();
    let mut mesh = WallMesh {
        vertices: Vec::with_capacity(segments * 4),
        triangles: Vec::with_capacity(segments * 2),
    };
    let depth = Vec3::Y * wall_height;

    for outline in outlines {
        for pair in outline.windows(2) {
            mesh.add_quad(position(pair[0])?, position(pair[1])?, depth);
        }
    }

    debug!(
        outlines = outlines.len(),
        quads = mesh.quad_count(),
        wall_height,
        "Extruded walls"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave_grid::{generate_grid, Grid};
    use crate::marching_squares::{build_square_grid, triangulate};
    use crate::outline::trace_outlines;
    use approx::assert_relative_eq;

    fn quad_normal(mesh: &WallMesh, quad: usize) -> Vec3 {
        let [a, b, c] = mesh.triangles[quad * 2];
        let (a, b, c) = (
            mesh.vertices[a as usize],
            mesh.vertices[b as usize],
            mesh.vertices[c as usize],
        );
        (b - a).cross(c - a)
    }

    #[test]
    fn test_one_quad_per_segment() {
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 1.0)];
        let outlines = vec![vec![0, 1, 2, 0], vec![1, 2]];
        let mesh = extrude_walls(&vertices, &outlines, 2.0).unwrap();
        assert_eq!(mesh.quad_count(), 3 + 1);
        assert_eq!(mesh.vertices.len(), 4 * 4);
        assert_eq!(mesh.triangles.len(), 4 * 2);
    }

    #[test]
    fn test_quad_layout() {
        let vertices = [Vec3::new(1.0, 0.0, 2.0), Vec3::new(3.0, 0.0, 2.0)];
        let mesh = extrude_walls(&vertices, &[vec![0, 1]], 4.0).unwrap();
        assert_eq!(
            mesh.vertices,
            vec![
                Vec3::new(1.0, 0.0, 2.0),
                Vec3::new(3.0, 0.0, 2.0),
                Vec3::new(1.0, -4.0, 2.0),
                Vec3::new(3.0, -4.0, 2.0),
            ]
        );
        assert_eq!(mesh.triangles, vec![[0, 2, 3], [3, 1, 0]]);
    }

    #[test]
    fn test_both_triangles_share_a_normal() {
        let vertices = [Vec3::ZERO, Vec3::new(2.0, 0.0, 1.0)];
        let mesh = extrude_walls(&vertices, &[vec![0, 1]], 3.0).unwrap();
        let n = |[a, b, c]: [u32; 3]| {
            let v = |i: u32| mesh.vertices[i as usize];
            (v(b) - v(a)).cross(v(c) - v(a)).normalize()
        };
        assert!((n(mesh.triangles[0]) - n(mesh.triangles[1])).length() < 1e-6);
    }

    #[test]
    fn test_empty_outlines_give_empty_mesh() {
        let mesh = extrude_walls(&[Vec3::ZERO], &[], 1.0).unwrap();
        assert!(mesh.is_empty());
        let mesh = extrude_walls(&[Vec3::ZERO], &[vec![0]], 1.0).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_zero_height_is_accepted() {
        let vertices = [Vec3::ZERO, Vec3::X];
        let mesh = extrude_walls(&vertices, &[vec![0, 1]], 0.0).unwrap();
        assert_eq!(mesh.vertices[0], mesh.vertices[2]);
    }

    #[test]
    fn test_rejects_bad_height() {
        let vertices = [Vec3::ZERO, Vec3::X];
        for h in [-1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                extrude_walls(&vertices, &[vec![0, 1]], h),
                Err(CaveError::InvalidParameter {
                    name: "wall_height",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_out_of_range_index_is_inconsistent() {
        let vertices = [Vec3::ZERO, Vec3::X];
        assert!(matches!(
            extrude_walls(&vertices, &[vec![0, 5]], 1.0),
            Err(CaveError::InternalInconsistency { .. })
        ));
    }

    #[test]
    fn test_bottoms_sit_exactly_wall_height_below_tops() {
        let grid = generate_grid(30, 24, "walls", 47, 4).unwrap();
        let tri = triangulate(&build_square_grid(&grid, 1.5).unwrap());
        let outlines = trace_outlines(tri.vertex_count(), &tri.triangles, &tri.interior).unwrap();
        let mesh = extrude_walls(&tri.vertices, &outlines, 2.5).unwrap();

        let expected: usize = outlines.iter().map(|o| o.len() - 1).sum();
        assert_eq!(mesh.quad_count(), expected);
        for quad in mesh.vertices.chunks_exact(4) {
            assert_relative_eq!(quad[0].y - quad[2].y, 2.5);
            assert_relative_eq!(quad[1].y - quad[3].y, 2.5);
            assert_eq!(quad[0].x, quad[2].x);
            assert_eq!(quad[1].z, quad[3].z);
        }
    }

    #[test]
    fn test_faces_point_away_from_solid() {
        let grid = Grid::from_ascii(&["######", "#....#", "#.##.#", "#....#", "######"]).unwrap();
        let tri = triangulate(&build_square_grid(&grid, 1.0).unwrap());
        let outlines = trace_outlines(tri.vertex_count(), &tri.triangles, &tri.interior).unwrap();
        let mesh = extrude_walls(&tri.vertices, &outlines, 1.0).unwrap();

        let mut quad = 0;
        for outline in &outlines {
            for pair in outline.windows(2) {
                // The floor triangle owning this edge lies on the solid side.
                let owner = tri
                    .triangles
                    .iter()
                    .find(|t| t.contains(&pair[0]) && t.contains(&pair[1]))
                    .unwrap();
                let third = owner
                    .iter()
                    .copied()
                    .find(|&v| v != pair[0] && v != pair[1])
                    .unwrap();
                let into_solid = tri.vertices[third as usize] - tri.vertices[pair[0] as usize];
                assert!(quad_normal(&mesh, quad).dot(into_solid) < 0.0);
                quad += 1;
            }
        }
        assert_eq!(quad, mesh.quad_count());
    }
}
