use super::types::SquarePoint::{self, *};

/// Point lists for every configuration, wound so each fan triangle faces +Y.
/// Saddles (5 and 10) join the two Wall corners across the square.
pub const CASE_TABLE: [&[SquarePoint]; 16] = [
    /* 0 */ &[],
    /* 1 */ &[CentreLeft, CentreBottom, BottomLeft],
    /* 2 */ &[BottomRight, CentreBottom, CentreRight],
    /* 3 */ &[CentreRight, BottomRight, BottomLeft, CentreLeft],
    /* 4 */ &[TopRight, CentreRight, CentreTop],
    /* 5 */ &[CentreTop, TopRight, CentreRight, CentreBottom, BottomLeft, CentreLeft],
    /* 6 */ &[CentreTop, TopRight, BottomRight, CentreBottom],
    /* 7 */ &[CentreTop, TopRight, BottomRight, BottomLeft, CentreLeft],
    /* 8 */ &[TopLeft, CentreTop, CentreLeft],
    /* 9 */ &[TopLeft, CentreTop, CentreBottom, BottomLeft],
    /* 10 */ &[TopLeft, CentreTop, CentreRight, BottomRight, CentreBottom, CentreLeft],
    /* 11 */ &[TopLeft, CentreTop, CentreRight, BottomRight, BottomLeft],
    /* 12 */ &[TopLeft, TopRight, CentreRight, CentreLeft],
    /* 13 */ &[TopLeft, TopRight, CentreRight, CentreBottom, BottomLeft],
    /* 14 */ &[TopLeft, TopRight, BottomRight, CentreBottom, CentreLeft],
    /* 15 */ &[TopLeft, TopRight, BottomRight, BottomLeft],
];

/// All four corners Wall. Such a square still emits its two triangles, so
/// solid regions keep a top surface, but its corners are marked interior
/// and never start or join an outline.
pub const SOLID_CONFIGURATION: u8 = 15;

/// Ordered points to triangulate for `configuration`.
#[inline]
pub fn case_points(configuration: u8) -> &'static [SquarePoint] {
    CASE_TABLE[usize::from(configuration & 0x0f)]
}

/// Fan triangulation of an ordered point list around `points[0]`.
pub fn fan_triangles<T: Copy>(points: &[T]) -> impl Iterator<Item = [T; 3]> + '_ {
    (1..points.len().saturating_sub(1)).map(move |i| [points[0], points[i], points[i + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Unit square layout in XZ: TL at (0, 1), BR at (1, 0).
    fn unit_position(point: SquarePoint) -> Vec3 {
        match point {
            TopLeft => Vec3::new(0.0, 0.0, 1.0),
            TopRight => Vec3::new(1.0, 0.0, 1.0),
            BottomRight => Vec3::new(1.0, 0.0, 0.0),
            BottomLeft => Vec3::new(0.0, 0.0, 0.0),
            CentreTop => Vec3::new(0.5, 0.0, 1.0),
            CentreRight => Vec3::new(1.0, 0.0, 0.5),
            CentreBottom => Vec3::new(0.5, 0.0, 0.0),
            CentreLeft => Vec3::new(0.0, 0.0, 0.5),
        }
    }

    fn corner_active(configuration: u8, corner: SquarePoint) -> bool {
        let bit = match corner {
            TopLeft => 8,
            TopRight => 4,
            BottomRight => 2,
            BottomLeft => 1,
            _ => unreachable!(),
        };
        configuration & bit != 0
    }

    #[test]
    fn test_point_counts() {
        let expected = [0, 3, 3, 4, 3, 6, 4, 5, 3, 4, 6, 5, 4, 5, 5, 4];
        for (cfg, &count) in expected.iter().enumerate() {
            assert_eq!(case_points(cfg as u8).len(), count, "case {cfg}");
        }
    }

    #[test]
    fn test_corners_match_active_bits() {
        for cfg in 0..16u8 {
            for corner in SquarePoint::CORNERS {
                let listed = case_points(cfg).contains(&corner);
                assert_eq!(
                    listed,
                    corner_active(cfg, corner),
                    "case {cfg}: corner {corner:?}"
                );
            }
        }
    }

    #[test]
    fn test_all_triangles_face_up() {
        for cfg in 0..16u8 {
            for [a, b, c] in fan_triangles(case_points(cfg)) {
                let (a, b, c) = (unit_position(a), unit_position(b), unit_position(c));
                let normal = (b - a).cross(c - a);
                assert!(normal.y > 0.0, "case {cfg}: normal {normal:?}");
                assert!(normal.x.abs() < 1e-6 && normal.z.abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_covered_area_grows_with_corners() {
        // Area covered in a unit square: 1/8 per lone corner, 1/2 per edge pair, ...
        let expected = [
            0.0, 0.125, 0.125, 0.5, 0.125, 0.75, 0.5, 0.875, 0.125, 0.5, 0.75, 0.875, 0.5, 0.875,
            0.875, 1.0,
        ];
        for cfg in 0..16u8 {
            let area: f32 = fan_triangles(case_points(cfg))
                .map(|[a, b, c]| {
                    let (a, b, c) = (unit_position(a), unit_position(b), unit_position(c));
                    (b - a).cross(c - a).length() / 2.0
                })
                .sum();
            assert!(
                (area - expected[cfg as usize]).abs() < 1e-6,
                "case {cfg}: area {area}"
            );
        }
    }

    #[test]
    fn test_fan_triangle_counts() {
        assert_eq!(fan_triangles::<u32>(&[]).count(), 0);
        assert_eq!(fan_triangles(&[0, 1, 2]).collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert_eq!(
            fan_triangles(&[0, 1, 2, 3, 4, 5]).collect::<Vec<_>>(),
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]]
        );
    }
}
