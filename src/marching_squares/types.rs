use glam::Vec3;

// =====================
// ===== Nodes =========
// =====================

/// Which of the three nodes owned by a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Sits on the cell itself and carries its Wall/Floor state.
    Control = 0,
    /// Midpoint toward the cell at `y + 1` (+Z).
    Above = 1,
    /// Midpoint toward the cell at `x + 1` (+X).
    Right = 2,
}

impl NodeKind {
    pub const COUNT: usize = 3;
}

/// Arena address of a node: the owning cell plus which of its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub x: usize,
    pub y: usize,
    pub kind: NodeKind,
}

impl NodeKey {
    #[inline]
    pub const fn new(x: usize, y: usize, kind: NodeKind) -> Self {
        Self { x, y, kind }
    }

    #[inline]
    pub const fn control(x: usize, y: usize) -> Self {
        Self::new(x, y, NodeKind::Control)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Vec3,
    /// Wall state for control nodes; midpoints are never active.
    pub active: bool,
}

impl Node {
    pub fn new(position: Vec3, active: bool) -> Self {
        Self { position, active }
    }
}

// =====================
// ===== Squares =======
// =====================

/// One of the eight points of a square a triangulation case can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquarePoint {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    CentreTop,
    CentreRight,
    CentreBottom,
    CentreLeft,
}

impl SquarePoint {
    pub const CORNERS: [SquarePoint; 4] = [
        SquarePoint::TopLeft,
        SquarePoint::TopRight,
        SquarePoint::BottomRight,
        SquarePoint::BottomLeft,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            SquarePoint::TopLeft
                | SquarePoint::TopRight
                | SquarePoint::BottomRight
                | SquarePoint::BottomLeft
        )
    }
}

/// A 2×2 block of control nodes with its four edge midpoints.
///
/// Holds arena keys rather than nodes, so two squares sharing an edge name
/// the very same midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub top_left: NodeKey,
    pub top_right: NodeKey,
    pub bottom_right: NodeKey,
    pub bottom_left: NodeKey,
    pub centre_top: NodeKey,
    pub centre_right: NodeKey,
    pub centre_bottom: NodeKey,
    pub centre_left: NodeKey,
    /// `8·TL + 4·TR + 2·BR + 1·BL` over the corners' Wall flags.
    pub configuration: u8,
}

impl Square {
    #[inline]
    pub fn node(&self, point: SquarePoint) -> NodeKey {
        match point {
            SquarePoint::TopLeft => self.top_left,
            SquarePoint::TopRight => self.top_right,
            SquarePoint::BottomRight => self.bottom_right,
            SquarePoint::BottomLeft => self.bottom_left,
            SquarePoint::CentreTop => self.centre_top,
            SquarePoint::CentreRight => self.centre_right,
            SquarePoint::CentreBottom => self.centre_bottom,
            SquarePoint::CentreLeft => self.centre_left,
        }
    }
}

/// Marching squares case code from the four corner states.
#[inline]
#[must_use]
pub const fn configuration(top_left: bool, top_right: bool, bottom_right: bool, bottom_left: bool) -> u8 {
    (top_left as u8) << 3 | (top_right as u8) << 2 | (bottom_right as u8) << 1 | bottom_left as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_configuration_extremes() {
        assert_eq!(configuration(false, false, false, false), 0);
        assert_eq!(configuration(true, true, true, true), 15);
        assert_eq!(configuration(true, false, false, false), 8);
        assert_eq!(configuration(false, false, false, true), 1);
    }

    #[test]
    fn test_corner_points() {
        for point in SquarePoint::CORNERS {
            assert!(point.is_corner());
        }
        assert!(!SquarePoint::CentreLeft.is_corner());
    }

    proptest! {
        #[test]
        fn prop_configuration_weights(tl: bool, tr: bool, br: bool, bl: bool) {
            let expected = 8 * tl as u8 + 4 * tr as u8 + 2 * br as u8 + bl as u8;
            prop_assert_eq!(configuration(tl, tr, br, bl), expected);
        }
    }
}
