//! Directed cone intersection: which half-2 cones each half-1 cone can hydrogen-bond with.
//!
//! Two cones intersect when their orientations are within an angular tolerance of each other
//! (facing test) and their apexes are no further apart than the sum of their notional radii,
//! each equal to the hydrogen-bond cutoff (proximity test). The facing test runs first and
//! short-circuits the pair.

use crate::geometry;
use crate::model::cone::{Cone, ConeKey};
use crate::model::intersection::IntersectionMap;
use crate::model::table::ConeTable;
use crate::ops::error::{Error, check_non_negative};
use crate::utils::parallel::*;
use serde::{Deserialize, Serialize};

/// Thresholds for the facing and proximity tests.
///
/// The same cutoff drives the distance pruner, which uses `2 × hbond_distance_cutoff` as its
/// pair threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntersectConfig {
    /// Maximum angle in degrees between two orientation vectors for the cones to face.
    pub angle_tolerance_degrees: f64,
    /// Per-cone radius in ångströms; apexes may be at most twice this far apart.
    pub hbond_distance_cutoff: f64,
}

impl Default for IntersectConfig {
    fn default() -> Self {
        Self {
            angle_tolerance_degrees: 90.0,
            hbond_distance_cutoff: 1.75,
        }
    }
}

impl IntersectConfig {
    pub fn new(angle_tolerance_degrees: f64, hbond_distance_cutoff: f64) -> Self {
        Self {
            angle_tolerance_degrees,
            hbond_distance_cutoff,
        }
    }

    pub fn angle_tolerance(mut self, degrees: f64) -> Self {
        self.angle_tolerance_degrees = degrees;
        self
    }

    pub fn hbond_cutoff(mut self, angstroms: f64) -> Self {
        self.hbond_distance_cutoff = angstroms;
        self
    }

    /// Maximum apex separation accepted by the proximity test.
    pub fn proximity_threshold(&self) -> f64 {
        self.hbond_distance_cutoff * 2.0
    }

    /// Rejects negative or non-finite thresholds.
    pub fn validate(&self) -> Result<(), Error> {
        check_non_negative("angle tolerance", self.angle_tolerance_degrees)?;
        check_non_negative("hydrogen-bond cutoff", self.hbond_distance_cutoff)
    }

    /// Loads a configuration from a TOML document.
    ///
    /// Missing keys fall back to [`IntersectConfig::default`]; unknown keys are rejected. The
    /// decoded values are validated before being returned.
    ///
    /// ```toml
    /// angle_tolerance_degrees = 45.0
    /// hbond_distance_cutoff = 1.75
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text).map_err(|e| Error::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Returns `true` when the orientations of two cones are within `angle_tolerance_degrees`.
///
/// The test is symmetric in its arguments. A cone with a zero orientation vector has no
/// defined direction and never faces anything.
pub fn facing_test(cone1: &Cone, cone2: &Cone, angle_tolerance_degrees: f64) -> bool {
    geometry::angle_degrees(&cone1.orientation, &cone2.orientation)
        .is_some_and(|angle| angle <= angle_tolerance_degrees)
}

/// Returns `true` when the apexes are at most `2 × hbond_distance_cutoff` apart.
pub fn proximity_test(cone1: &Cone, cone2: &Cone, hbond_distance_cutoff: f64) -> bool {
    cone1.apex_distance(cone2) <= hbond_distance_cutoff + hbond_distance_cutoff
}

/// Matches every half-1 cone against every half-2 cone.
///
/// For each key of `half1` (in table order) the keys of `half2` that pass both tests are
/// collected in `half2` order. The result is keyed by half-1 keys only; the reverse direction
/// is never recorded. Half-1 cones are processed in parallel when the `parallel` feature is
/// enabled and the per-cone results are merged in table order, so the output does not depend
/// on scheduling.
///
/// # Arguments
///
/// * `half1` - Source side of the directed map.
/// * `half2` - Target side.
/// * `config` - Facing and proximity thresholds.
///
/// # Returns
///
/// The directed [`IntersectionMap`]; empty when either table is empty.
pub fn find_intersections(
    half1: &ConeTable,
    half2: &ConeTable,
    config: &IntersectConfig,
) -> IntersectionMap {
    let sources: Vec<(&ConeKey, &Cone)> = half1.iter().collect();
    let targets: Vec<(&ConeKey, &Cone)> = half2.iter().collect();

    let per_source: Vec<(ConeKey, Vec<ConeKey>)> = sources
        .par_iter()
        .map(|&(key1, cone1)| {
            let matches = targets
                .iter()
                .filter(|(_, cone2)| {
                    facing_test(cone1, cone2, config.angle_tolerance_degrees)
                        && proximity_test(cone1, cone2, config.hbond_distance_cutoff)
                })
                .map(|(key2, _)| (*key2).clone())
                .collect();
            (key1.clone(), matches)
        })
        .collect();

    let mut map = IntersectionMap::new();
    for (key1, matches) in per_source {
        map.extend_targets(key1, matches);
    }

    log::debug!(
        "{} of {} half-1 cones intersect ({} edges, {} pairs tested)",
        map.len(),
        half1.len(),
        map.edge_count(),
        half1.len() * half2.len()
    );

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{ConeKind, Orientation, Point};

    fn cone(apex: [f64; 3], orientation: [f64; 3]) -> Cone {
        Cone::new(
            Point::new(apex[0], apex[1], apex[2]),
            Orientation::new(orientation[0], orientation[1], orientation[2]),
        )
    }

    fn single(kind: ConeKind, label: &str, cone: Cone) -> ConeTable {
        vec![(ConeKey::new(kind, label), cone)].into_iter().collect()
    }

    #[test]
    fn default_config_is_valid() {
        let config = IntersectConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.proximity_threshold() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn builder_setters_override_defaults() {
        let config = IntersectConfig::default()
            .angle_tolerance(30.0)
            .hbond_cutoff(2.0);
        assert_eq!(config, IntersectConfig::new(30.0, 2.0));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(IntersectConfig::new(-1.0, 1.0).validate().is_err());
        assert!(IntersectConfig::new(10.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn from_toml_str_fills_missing_keys_with_defaults() {
        let config = IntersectConfig::from_toml_str("angle_tolerance_degrees = 45.0\n").unwrap();
        assert_eq!(config.angle_tolerance_degrees, 45.0);
        assert_eq!(config.hbond_distance_cutoff, 1.75);
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys_and_invalid_values() {
        let err = IntersectConfig::from_toml_str("cutoff = 1.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));

        let err = IntersectConfig::from_toml_str("hbond_distance_cutoff = -2.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn facing_test_is_symmetric() {
        let vectors = [
            [1.0, 0.0, 0.0],
            [0.3, -0.7, 2.0],
            [-1.0, 0.1, 0.0],
            [0.0, 0.0, 0.0],
            [5.0, 5.0, -5.0],
        ];
        for a in vectors {
            for b in vectors {
                for tolerance in [0.0, 15.0, 90.0, 179.0] {
                    let c1 = cone([0.0; 3], a);
                    let c2 = cone([0.0; 3], b);
                    assert_eq!(
                        facing_test(&c1, &c2, tolerance),
                        facing_test(&c2, &c1, tolerance)
                    );
                }
            }
        }
    }

    #[test]
    fn facing_test_fails_for_zero_orientation() {
        let zero = cone([0.0; 3], [0.0, 0.0, 0.0]);
        for v in [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [-2.0, 3.0, 1.0]] {
            assert!(!facing_test(&cone([0.0; 3], v), &zero, 180.0));
        }
    }

    #[test]
    fn facing_test_respects_tolerance_boundary() {
        let x = cone([0.0; 3], [1.0, 0.0, 0.0]);
        let y = cone([0.0; 3], [0.0, 1.0, 0.0]);
        assert!(facing_test(&x, &y, 90.0));
        assert!(!facing_test(&x, &y, 89.9));
        assert!(facing_test(&x, &x, 0.0));
    }

    #[test]
    fn proximity_boundary_is_inclusive() {
        let cutoff = 1.25;
        let origin = cone([0.0; 3], [1.0, 0.0, 0.0]);
        let at_limit = cone([2.0 * cutoff, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let beyond = cone([2.0 * cutoff + 1e-9, 0.0, 0.0], [1.0, 0.0, 0.0]);

        assert!(proximity_test(&origin, &at_limit, cutoff));
        assert!(!proximity_test(&origin, &beyond, cutoff));
    }

    #[test]
    fn anti_parallel_cones_do_not_intersect() {
        let half1 = single(ConeKind::Acceptor, "A1", cone([0.0; 3], [1.0, 0.0, 0.0]));
        let half2 = single(ConeKind::Donor, "B1", cone([1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]));

        let map = find_intersections(&half1, &half2, &IntersectConfig::new(10.0, 1.0));

        assert!(map.is_empty());
    }

    #[test]
    fn parallel_nearby_cones_intersect() {
        let half1 = single(ConeKind::Acceptor, "A1", cone([0.0; 3], [1.0, 0.0, 0.0]));
        let half2 = single(ConeKind::Donor, "B1", cone([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]));

        let map = find_intersections(&half1, &half2, &IntersectConfig::new(10.0, 1.0));

        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"ACCEP A1":["DONOR B1"]}"#);
    }

    #[test]
    fn result_is_directed() {
        let a = cone([0.0; 3], [0.0, 0.0, 1.0]);
        let b = cone([0.5, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let half1 = single(ConeKind::Acceptor, "A", a);
        let half2 = single(ConeKind::Donor, "B", b);

        let map = find_intersections(&half1, &half2, &IntersectConfig::new(10.0, 1.0));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("ACCEP A").unwrap(), &[ConeKey::new(ConeKind::Donor, "B")]);
        assert!(!map.contains_key("DONOR B"));
    }

    #[test]
    fn targets_follow_half2_order_and_sources_follow_half1_order() {
        let up = [0.0, 0.0, 1.0];
        let half1: ConeTable = vec![
            (ConeKey::new(ConeKind::Donor, "S2"), cone([0.0; 3], up)),
            (ConeKey::new(ConeKind::Acceptor, "S1"), cone([0.2, 0.0, 0.0], up)),
            (ConeKey::new(ConeKind::Acceptor, "far"), cone([50.0, 0.0, 0.0], up)),
        ]
        .into_iter()
        .collect();
        let half2: ConeTable = vec![
            (ConeKey::new(ConeKind::Donor, "T3"), cone([0.1, 0.0, 0.0], up)),
            (ConeKey::new(ConeKind::Acceptor, "T1"), cone([0.3, 0.0, 0.0], up)),
            (ConeKey::new(ConeKind::Acceptor, "side"), cone([0.3, 0.0, 0.0], [1.0, 0.0, 0.0])),
        ]
        .into_iter()
        .collect();

        let map = find_intersections(&half1, &half2, &IntersectConfig::new(20.0, 1.0));

        let sources: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(sources, vec!["DONOR S2", "ACCEP S1"]);
        let targets: Vec<&str> = map
            .get("DONOR S2")
            .unwrap()
            .iter()
            .map(ConeKey::as_str)
            .collect();
        assert_eq!(targets, vec!["DONOR T3", "ACCEP T1"]);
        assert_eq!(map.edge_count(), 4);
    }

    #[test]
    fn empty_tables_give_empty_map() {
        let half = single(ConeKind::Acceptor, "A", cone([0.0; 3], [1.0, 0.0, 0.0]));
        let config = IntersectConfig::default();

        assert!(find_intersections(&ConeTable::new(), &half, &config).is_empty());
        assert!(find_intersections(&half, &ConeTable::new(), &config).is_empty());
    }
}
