//! Triangulated surface meshes and their vertex adjacency graph.
//!
//! A [`SurfMesh`] stores the vertex coordinates of a `.SURF` file's `GEOMETRY` section and the
//! triangles of its `TOPOLOGY` section. Coordinates may be `NaN` when the surface generator
//! failed to place a vertex; [`MeshGraph`] provides the one-hop neighborhoods used to repair them.

use super::types::Point;
use std::collections::BTreeSet;

/// Triangle referencing three vertex indices.
pub type Triangle = [usize; 3];

/// Vertex coordinates plus triangle connectivity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfMesh {
    /// Vertex positions in file order; components may be `NaN`.
    pub vertices: Vec<Point>,
    /// Triangles in file order.
    pub triangles: Vec<Triangle>,
}

impl SurfMesh {
    /// Creates a mesh from vertices and triangles.
    ///
    /// Triangle indices are expected to be in range. Readers validate this before construction,
    /// and [`MeshGraph::from_mesh`] ignores triangles that break it.
    pub fn new(vertices: Vec<Point>, triangles: Vec<Triangle>) -> Self {
        debug_assert!(
            triangles.iter().flatten().all(|&i| i < vertices.len()),
            "Triangle index out of bounds"
        );
        Self {
            vertices,
            triangles,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Indices of vertices with at least one `NaN` coordinate.
    pub fn nan_vertices(&self) -> Vec<usize> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.iter().any(|c| c.is_nan()))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Undirected vertex adjacency derived from mesh triangles.
///
/// Every triangle `(a, b, c)` connects all three vertex pairs. Neighbor sets are sorted, so
/// iteration order is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshGraph {
    neighbors: Vec<BTreeSet<usize>>,
}

impl MeshGraph {
    /// Builds the adjacency graph for a mesh.
    ///
    /// # Arguments
    ///
    /// * `mesh` - Mesh whose triangles define the edges.
    ///
    /// # Returns
    ///
    /// A graph with one (possibly empty) neighbor set per vertex. Triangles referencing a
    /// vertex index outside the mesh contribute no edges.
    pub fn from_mesh(mesh: &SurfMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let mut neighbors = vec![BTreeSet::new(); vertex_count];
        let mut skipped = 0usize;

        for &[a, b, c] in &mesh.triangles {
            if a >= vertex_count || b >= vertex_count || c >= vertex_count {
                skipped += 1;
                continue;
            }
            for (u, v) in [(a, b), (a, c), (b, c)] {
                if u == v {
                    continue;
                }
                neighbors[u].insert(v);
                neighbors[v].insert(u);
            }
        }

        if skipped > 0 {
            log::warn!("skipped {skipped} triangles with out-of-range vertex indices");
        }

        Self { neighbors }
    }

    /// One-hop neighbors of `vertex`, empty for isolated or out-of-range vertices.
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.get(vertex).into_iter().flatten().copied()
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbors.get(vertex).map_or(0, BTreeSet::len)
    }

    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn are_adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors.get(u).is_some_and(|n| n.contains(&v))
    }
}
