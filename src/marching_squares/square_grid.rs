//! Lattice of control and midpoint nodes laid over a cave grid.
//!
//! Every cell owns three arena slots (control, above, right). Squares refer
//! to slots by key, so neighbours that share an edge share its midpoint and
//! therefore the vertex index the triangulator memoizes per slot.

use glam::Vec3;

use super::types::{configuration, Node, NodeKey, NodeKind, Square};
use crate::cave_grid::Grid;
use crate::error::{CaveError, CaveResult};

#[derive(Debug, Clone)]
pub struct SquareGrid {
    node_count_x: usize,
    node_count_y: usize,
    cell_size: f32,
    nodes: Vec<Node>,
    /// Column-major: square `(x, y)` at `x * (node_count_y - 1) + y`.
    squares: Vec<Square>,
}

pub(crate) fn check_cell_size(cell_size: f32) -> CaveResult<()> {
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(CaveError::invalid_parameter(
            "cell_size",
            format!("must be a finite value > 0, got {cell_size}"),
        ));
    }
    Ok(())
}

/// Every node slot must be addressable by a `u32` vertex index.
pub(crate) fn check_node_capacity(width: usize, height: usize) -> CaveResult<()> {
    let slots = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(NodeKind::COUNT));
    match slots {
        Some(slots) if u32::try_from(slots).is_ok() => Ok(()),
        _ => Err(CaveError::InvalidDimension { width, height }),
    }
}

/// Lifts `grid` into control nodes centred on the origin of the XZ plane
/// plus one square per 2×2 block of cells.
pub fn build_square_grid(grid: &Grid, cell_size: f32) -> CaveResult<SquareGrid> {
    check_cell_size(cell_size)?;
    check_node_capacity(grid.width(), grid.height())?;

    let node_count_x = grid.width();
    let node_count_y = grid.height();
    let map_width = node_count_x as f32 * cell_size;
    let map_height = node_count_y as f32 * cell_size;
    let half = cell_size / 2.0;

    let mut nodes = Vec::with_capacity(node_count_x * node_count_y * NodeKind::COUNT);
    for y in 0..node_count_y {
        for x in 0..node_count_x {
            let position = Vec3::new(
                -map_width / 2.0 + x as f32 * cell_size + half,
                0.0,
                -map_height / 2.0 + y as f32 * cell_size + half,
            );
            // Order must match NodeKind discriminants.
            nodes.push(Node::new(position, grid.is_wall(x, y)));
            nodes.push(Node::new(position + Vec3::Z * half, false));
            nodes.push(Node::new(position + Vec3::X * half, false));
        }
    }

    let mut squares = Vec::with_capacity((node_count_x - 1) * (node_count_y - 1));
    for x in 0..node_count_x - 1 {
        for y in 0..node_count_y - 1 {
            let top_left = NodeKey::control(x, y + 1);
            let top_right = NodeKey::control(x + 1, y + 1);
            let bottom_right = NodeKey::control(x + 1, y);
            let bottom_left = NodeKey::control(x, y);

            squares.push(Square {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
                centre_top: NodeKey::new(x, y + 1, NodeKind::Right),
                centre_right: NodeKey::new(x + 1, y, NodeKind::Above),
                centre_bottom: NodeKey::new(x, y, NodeKind::Right),
                centre_left: NodeKey::new(x, y, NodeKind::Above),
                configuration: configuration(
                    grid.is_wall(x, y + 1),
                    grid.is_wall(x + 1, y + 1),
                    grid.is_wall(x + 1, y),
                    grid.is_wall(x, y),
                ),
            });
        }
    }

    Ok(SquareGrid {
        node_count_x,
        node_count_y,
        cell_size,
        nodes,
        squares,
    })
}

impl SquareGrid {
    /// Arena position of `key`; stable for the lifetime of the grid.
    #[inline]
    pub fn slot(&self, key: NodeKey) -> usize {
        (key.x + key.y * self.node_count_x) * NodeKind::COUNT + key.kind as usize
    }

    #[inline]
    pub fn node(&self, key: NodeKey) -> &Node {
        &self.nodes[self.slot(key)]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn squares_x(&self) -> usize {
        self.node_count_x - 1
    }

    pub fn squares_y(&self) -> usize {
        self.node_count_y - 1
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn square(&self, x: usize, y: usize) -> &Square {
        &self.squares[x * self.squares_y() + y]
    }

    /// All squares in triangulation order (x-major, y-minor).
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }
}
