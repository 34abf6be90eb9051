//! Dense pairwise-distance pre-filter over cone apexes.
//!
//! The pruner ignores orientation entirely and keeps every coordinate pair whose separation is
//! within twice the hydrogen-bond cutoff, the same proximity bound used by the intersection
//! engine. It is used as a coarse sanity filter next to the cone test.

use crate::model::types::Point;
use crate::utils::parallel::*;
use nalgebra::DMatrix;

/// Output of [`prune_by_distance`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistancePruning {
    /// First point of every pair within the threshold, in row-major pair order.
    pub pruned1: Vec<Point>,
    /// Second point of every pair, aligned index-for-index with `pruned1`.
    pub pruned2: Vec<Point>,
    /// Full `points1.len() × points2.len()` Euclidean distance matrix.
    pub distances: DMatrix<f64>,
}

impl DistancePruning {
    /// Number of pairs that satisfied the threshold.
    pub fn pair_count(&self) -> usize {
        self.pruned1.len()
    }

    /// Iterates over the retained `(point1, point2)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.pruned1.iter().zip(self.pruned2.iter())
    }
}

/// Computes all pairwise distances and keeps the pairs within `2 × cutoff`.
///
/// Pairs are visited row by row (`i` over `points1`, then `j` over `points2`). A point that is
/// close to several counterparts appears once per pair.
///
/// # Arguments
///
/// * `points1` - Apexes of the first half.
/// * `points2` - Apexes of the second half.
/// * `cutoff` - Hydrogen-bond distance cutoff in ångströms; the threshold is twice this value.
///
/// # Returns
///
/// The pruned point lists and the dense distance matrix. Empty input produces empty lists and
/// a matrix with a zero dimension.
pub fn prune_by_distance(points1: &[Point], points2: &[Point], cutoff: f64) -> DistancePruning {
    let threshold = cutoff * 2.0;
    let rows = points1.len();
    let cols = points2.len();

    let flat: Vec<f64> = points1
        .par_iter()
        .flat_map_iter(|p1| points2.iter().map(move |p2| nalgebra::distance(p1, p2)))
        .collect();
    let distances = DMatrix::from_row_slice(rows, cols, &flat);

    let mut pruned1 = Vec::new();
    let mut pruned2 = Vec::new();
    for i in 0..rows {
        for j in 0..cols {
            if distances[(i, j)] <= threshold {
                pruned1.push(points1[i]);
                pruned2.push(points2[j]);
            }
        }
    }

    log::debug!(
        "distance pruning kept {} of {} pairs (threshold {threshold:.3} Å)",
        pruned1.len(),
        rows * cols
    );

    DistancePruning {
        pruned1,
        pruned2,
        distances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_has_full_shape_and_euclidean_entries() {
        let points1 = [Point::new(0.0, 0.0, 0.0), Point::new(10.0, 0.0, 0.0)];
        let points2 = [
            Point::new(3.0, 4.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(10.0, 0.0, 2.0),
        ];

        let result = prune_by_distance(&points1, &points2, 1.0);

        assert_eq!(result.distances.shape(), (2, 3));
        assert!((result.distances[(0, 0)] - 5.0).abs() < 1e-10);
        assert!((result.distances[(0, 1)] - 1.0).abs() < 1e-10);
        assert!((result.distances[(1, 2)] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn pairs_within_twice_cutoff_are_kept_in_row_major_order() {
        let points1 = [Point::new(0.0, 0.0, 0.0), Point::new(10.0, 0.0, 0.0)];
        let points2 = [
            Point::new(3.0, 4.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(10.0, 0.0, 2.0),
        ];

        let result = prune_by_distance(&points1, &points2, 1.0);

        assert_eq!(result.pair_count(), 2);
        assert_eq!(result.pruned1, vec![points1[0], points1[1]]);
        assert_eq!(result.pruned2, vec![points2[1], points2[2]]);
    }

    #[test]
    fn point_matching_several_partners_is_duplicated() {
        let points1 = [Point::new(0.0, 0.0, 0.0)];
        let points2 = [Point::new(1.0, 0.0, 0.0), Point::new(-1.0, 0.0, 0.0)];

        let result = prune_by_distance(&points1, &points2, 0.5);

        assert_eq!(result.pruned1, vec![points1[0], points1[0]]);
        assert_eq!(result.pruned2, points2.to_vec());
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let points1 = [Point::new(0.0, 0.0, 0.0)];
        let points2 = [Point::new(3.0, 0.0, 0.0), Point::new(3.0 + 1e-9, 0.0, 0.0)];

        let result = prune_by_distance(&points1, &points2, 1.5);

        assert_eq!(result.pruned2, vec![points2[0]]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let points = [Point::new(1.0, 1.0, 1.0)];

        let left_empty = prune_by_distance(&[], &points, 2.0);
        assert!(left_empty.pruned1.is_empty());
        assert!(left_empty.pruned2.is_empty());
        assert!(left_empty.distances.is_empty());

        let right_empty = prune_by_distance(&points, &[], 2.0);
        assert_eq!(right_empty.distances.shape(), (1, 0));
        assert_eq!(right_empty.pair_count(), 0);
    }
}
