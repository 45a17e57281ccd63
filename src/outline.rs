//! Boundary contour extraction over a floor triangle mesh.
//!
//! An edge is on the outline when exactly one triangle uses it. Outlines
//! are walked iteratively from the lowest unvisited vertex, so contour
//! length never touches the call stack.

use tracing::{debug, trace};

use crate::error::{CaveError, CaveResult};

/// Ordered vertex indices along a boundary. Closed loops end with their
/// first index repeated.
pub type Outline = Vec<u32>;

/// Returns true when `outline` ends where it started.
pub fn is_closed(outline: &[u32]) -> bool {
    outline.len() > 2 && outline.first() == outline.last()
}

/// Triangles touching each vertex, built once from a finished triangle list.
#[derive(Debug, Clone)]
pub struct VertexTriangles<'a> {
    triangles: &'a [[u32; 3]],
    /// Triangle indices per vertex, in ascending triangle order.
    incident: Vec<Vec<usize>>,
}

impl<'a> VertexTriangles<'a> {
    pub fn build(vertex_count: usize, triangles: &'a [[u32; 3]]) -> CaveResult<Self> {
        let mut incident = vec![Vec::new(); vertex_count];
        for (t, tri) in triangles.iter().enumerate() {
            for &v in tri {
                let slot = incident.get_mut(v as usize).ok_or_else(|| {
                    CaveError::inconsistency(format!(
                        "triangle {t} references vertex {v}, but only {vertex_count} exist"
                    ))
                })?;
                slot.push(t);
            }
        }
        Ok(Self {
            triangles,
            incident,
        })
    }

    /// Triangles using `vertex`. A vertex no triangle uses has no business
    /// in the buffer, so it is reported as an inconsistency.
    pub fn triangles_of(&self, vertex: u32) -> CaveResult<&[usize]> {
        match self.incident.get(vertex as usize) {
            Some(list) if !list.is_empty() => Ok(list),
            _ => Err(CaveError::inconsistency(format!(
                "vertex {vertex} has no incident triangles"
            ))),
        }
    }

    /// True iff exactly one triangle contains both `a` and `b`.
    pub fn is_outline_edge(&self, a: u32, b: u32) -> CaveResult<bool> {
        let shared = self
            .triangles_of(a)?
            .iter()
            .filter(|&&t| self.triangles[t].contains(&b))
            .count();
        if shared > 2 {
            return Err(CaveError::inconsistency(format!(
                "edge ({a}, {b}) is shared by {shared} triangles"
            )));
        }
        Ok(shared == 1)
    }

    /// First unvisited neighbour of `vertex` across an outline edge.
    ///
    /// Triangles are scanned in index order and their corners in stored
    /// order, so the choice is stable for a given triangle list.
    pub fn next_outline_vertex(&self, vertex: u32, visited: &[bool]) -> CaveResult<Option<u32>> {
        for &t in self.triangles_of(vertex)? {
            for &candidate in &self.triangles[t] {
                if candidate == vertex || visited[candidate as usize] {
                    continue;
                }
                if self.is_outline_edge(vertex, candidate)? {
                    return Ok(Some(candidate));
                }
            }
        }
        Ok(None)
    }

    /// Whether the triangle owning edge `(a, b)` lists `a` immediately
    /// before `b` in its winding.
    fn follows_winding(&self, a: u32, b: u32) -> CaveResult<bool> {
        for &t in self.triangles_of(a)? {
            let tri = &self.triangles[t];
            if let Some(i) = tri.iter().position(|&v| v == a) {
                if tri[(i + 1) % 3] == b {
                    return Ok(true);
                }
                if tri[(i + 2) % 3] == b {
                    return Ok(false);
                }
            }
        }
        Err(CaveError::inconsistency(format!(
            "no triangle owns outline edge ({a}, {b})"
        )))
    }

    /// Walks from `from` until no unvisited outline neighbour remains,
    /// marking and appending every vertex reached.
    fn walk(&self, from: u32, visited: &mut [bool], path: &mut Vec<u32>) -> CaveResult<u32> {
        let mut current = from;
        while let Some(next) = self.next_outline_vertex(current, visited)? {
            visited[next as usize] = true;
            path.push(next);
            current = next;
        }
        Ok(current)
    }
}

/// Traces every outline of a floor mesh.
///
/// `interior` flags vertices enclosed by solid squares; they never start or
/// join an outline. Each returned outline runs with the solid surface on its
/// left when seen from above (+Y).
pub fn trace_outlines(
    vertex_count: usize,
    triangles: &[[u32; 3]],
    interior: &[bool],
) -> CaveResult<Vec<Outline>> {
    let vertex_limit = u32::try_from(vertex_count).map_err(|_| {
        CaveError::inconsistency(format!(
            "{vertex_count} vertices do not fit u32 indices"
        ))
    })?;
    if interior.len() != vertex_count {
        return Err(CaveError::inconsistency(format!(
            "{} interior flags for {vertex_count} vertices",
            interior.len()
        )));
    }

    let adjacency = VertexTriangles::build(vertex_count, triangles)?;
    let mut visited = interior.to_vec();
    let mut outlines = Vec::new();

    for start in 0..vertex_limit {
        if visited[start as usize] {
            continue;
        }
        if adjacency.next_outline_vertex(start, &visited)?.is_none() {
            continue;
        }

        visited[start as usize] = true;
        let mut outline = vec![start];
        let end = adjacency.walk(start, &mut visited, &mut outline)?;

        if outline.len() > 2 && adjacency.is_outline_edge(end, start)? {
            outline.push(start);
        } else {
            // Open chain: pick up whatever lies behind the start as well.
            let mut behind = Vec::new();
            adjacency.walk(start, &mut visited, &mut behind)?;
            if !behind.is_empty() {
                behind.reverse();
                behind.extend_from_slice(&outline);
                outline = behind;
            }
        }

        if !adjacency.follows_winding(outline[0], outline[1])? {
            outline.reverse();
        }

        trace!(
            start,
            len = outline.len(),
            closed = is_closed(&outline),
            "Traced outline"
        );
        outlines.push(outline);
    }

    debug!(
        outlines = outlines.len(),
        closed = outlines.iter().filter(|o| is_closed(o)).count(),
        "Traced floor outlines"
    );
    Ok(outlines)
}
