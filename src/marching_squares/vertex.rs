use glam::Vec3;

use super::square_grid::SquareGrid;
use super::types::NodeKey;

/// Append-only vertex list with a per-node memo, so a node shared by several
/// squares is emitted once and every square sees the same index.
#[derive(Debug, Clone, Default)]
pub struct VertexBuffer {
    vertices: Vec<Vec3>,
    /// Indexed by arena slot; `None` until the node is first emitted.
    assigned: Vec<Option<u32>>,
}

impl VertexBuffer {
    pub fn for_grid(grid: &SquareGrid) -> Self {
        Self {
            vertices: Vec::new(),
            assigned: vec![None; grid.node_count()],
        }
    }

    /// Index of `key`'s vertex, appending its position on first use.
    pub fn index_of(&mut self, grid: &SquareGrid, key: NodeKey) -> u32 {
        let slot = grid.slot(key);
        if let Some(index) = self.assigned[slot] {
            return index;
        }
        // Never truncates: build_square_grid caps the slot count at u32::MAX.
        let index = self.vertices.len() as u32;
        self.vertices.push(grid.node(key).position);
        self.assigned[slot] = Some(index);
        index
    }

    /// Already-assigned index of `key`, if any square emitted it.
    pub fn get(&self, grid: &SquareGrid, key: NodeKey) -> Option<u32> {
        self.assigned[grid.slot(key)]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<Vec3> {
        self.vertices
    }
}
