//! Repair of `NaN` vertex coordinates in surface meshes.
//!
//! Surface generators occasionally emit vertices with undefined coordinates. Each missing value
//! is replaced by the mean of the same coordinate over the vertex's one-hop neighbors, which
//! keeps the patched vertex inside its local patch of surface.

use crate::model::mesh::{MeshGraph, SurfMesh};
use crate::ops::error::Error;

const AXES: [char; 3] = ['x', 'y', 'z'];

/// Decimal places kept for repaired coordinates.
const REPAIR_DECIMALS: i32 = 6;

/// One coordinate replaced by [`repair_nan_vertices`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRepair {
    /// Index of the repaired vertex.
    pub vertex: usize,
    /// Axis index (`0 = x`, `1 = y`, `2 = z`).
    pub axis: usize,
    /// Value written in place of `NaN`.
    pub value: f64,
}

/// Replaces every `NaN` vertex coordinate with the mean of its neighbors' coordinates.
///
/// Neighbors whose value on the same axis is also `NaN` are ignored. All means are computed
/// from the coordinates as they were before any repair, so the result does not depend on
/// vertex order. Repaired values are rounded to six decimals.
///
/// # Arguments
///
/// * `mesh` - Mesh to patch in place.
/// * `graph` - Adjacency built from the same mesh.
///
/// # Returns
///
/// The list of applied repairs in vertex order.
///
/// # Errors
///
/// [`Error::UnrepairableVertex`] when a `NaN` coordinate has no neighbor with a finite value
/// on that axis. The mesh is left unchanged in that case.
pub fn repair_nan_vertices(
    mesh: &mut SurfMesh,
    graph: &MeshGraph,
) -> Result<Vec<VertexRepair>, Error> {
    let mut repairs = Vec::new();

    for vertex in mesh.nan_vertices() {
        for axis in 0..3 {
            if !mesh.vertices[vertex][axis].is_nan() {
                continue;
            }

            let (sum, count) = graph
                .neighbors(vertex)
                .map(|n| mesh.vertices[n][axis])
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

            if count == 0 {
                return Err(Error::UnrepairableVertex {
                    vertex,
                    axis: AXES[axis],
                });
            }

            repairs.push(VertexRepair {
                vertex,
                axis,
                value: round_to(sum / count as f64, REPAIR_DECIMALS),
            });
        }
    }

    for repair in &repairs {
        mesh.vertices[repair.vertex][repair.axis] = repair.value;
    }

    if !repairs.is_empty() {
        log::info!("repaired {} NaN vertex coordinates", repairs.len());
    }

    Ok(repairs)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Point;

    fn fan_mesh() -> SurfMesh {
        SurfMesh::new(
            vec![
                Point::new(f64::NAN, 0.5, f64::NAN),
                Point::new(1.0, 0.0, 2.0),
                Point::new(2.0, 1.0, f64::NAN),
                Point::new(4.0, 1.0, 3.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn repair_uses_mean_of_finite_neighbors() {
        let mut mesh = fan_mesh();
        let graph = MeshGraph::from_mesh(&mesh);

        let repairs = repair_nan_vertices(&mut mesh, &graph).unwrap();

        // Vertex 0 neighbors: 1, 2, 3.
        assert!((mesh.vertices[0].x - 7.0 / 3.0).abs() < 1e-6);
        assert_eq!(mesh.vertices[0].y, 0.5);
        // z ignores vertex 2, which is NaN on that axis.
        assert!((mesh.vertices[0].z - 2.5).abs() < 1e-12);
        // Vertex 2 neighbors: 0 (NaN before repair), 1, 3.
        assert!((mesh.vertices[2].z - 2.5).abs() < 1e-12);

        assert_eq!(repairs.len(), 3);
        assert_eq!((repairs[0].vertex, repairs[0].axis), (0, 0));
        assert_eq!((repairs[2].vertex, repairs[2].axis), (2, 2));
        assert!(mesh.nan_vertices().is_empty());
    }

    #[test]
    fn repaired_values_are_rounded_to_six_decimals() {
        let mut mesh = fan_mesh();
        let graph = MeshGraph::from_mesh(&mesh);

        repair_nan_vertices(&mut mesh, &graph).unwrap();

        assert_eq!(mesh.vertices[0].x, 2.333333);
    }

    #[test]
    fn isolated_nan_vertex_is_unrepairable_and_mesh_is_untouched() {
        let mut mesh = SurfMesh::new(
            vec![
                Point::new(f64::NAN, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, f64::NAN, 0.0),
            ],
            vec![[0, 1, 1]],
        );
        let graph = MeshGraph::from_mesh(&mesh);

        let err = repair_nan_vertices(&mut mesh, &graph).unwrap_err();

        assert!(matches!(err, Error::UnrepairableVertex { vertex: 2, axis: 'y' }));
        assert!(mesh.vertices[0].x.is_nan());
    }

    #[test]
    fn clean_mesh_needs_no_repairs() {
        let mut mesh = SurfMesh::new(vec![Point::origin(), Point::new(1.0, 1.0, 1.0)], vec![]);
        let graph = MeshGraph::from_mesh(&mesh);
        assert!(repair_nan_vertices(&mut mesh, &graph).unwrap().is_empty());
    }
}
