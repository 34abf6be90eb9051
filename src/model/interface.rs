//! Coordinates of atoms lying on a molecular interface.
//!
//! Membership is exact: a point belongs to the set only if all three coordinates are equal as
//! `f64` values to a stored point. The set is therefore only meaningful when the interface
//! coordinates and the cone apexes are parsed from the same textual source.

use super::types::Point;
use std::collections::HashSet;

/// Hashable bit pattern of a coordinate triple under IEEE equality.
///
/// `-0.0` is folded onto `0.0` so the two compare equal, as they do for `f64`.
type PointBits = [u64; 3];

fn point_bits(point: &Point) -> Option<PointBits> {
    if point.iter().any(|c| c.is_nan()) {
        return None;
    }
    let fold = |c: f64| if c == 0.0 { 0.0_f64.to_bits() } else { c.to_bits() };
    Some([fold(point.x), fold(point.y), fold(point.z)])
}

/// Set of interface atom coordinates with exact-equality lookups.
#[derive(Debug, Clone, Default)]
pub struct InterfaceAtomSet {
    index: HashSet<PointBits>,
    points: Vec<Point>,
}

impl InterfaceAtomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a coordinate to the set.
    ///
    /// Points containing `NaN` are never equal to anything and are ignored.
    ///
    /// # Returns
    ///
    /// `true` when the point was not already present.
    pub fn insert(&mut self, point: Point) -> bool {
        match point_bits(&point) {
            Some(bits) if self.index.insert(bits) => {
                self.points.push(point);
                true
            }
            _ => false,
        }
    }

    /// Exact membership test.
    pub fn contains(&self, point: &Point) -> bool {
        point_bits(point).is_some_and(|bits| self.index.contains(&bits))
    }

    /// Membership test accepting any stored point within `tolerance` ångströms.
    ///
    /// This is an opt-in relaxation for callers whose coordinates went through a different
    /// numeric path; the default interface filter never uses it.
    pub fn contains_within(&self, point: &Point, tolerance: f64) -> bool {
        if self.contains(point) {
            return true;
        }
        self.points
            .iter()
            .any(|p| nalgebra::distance(p, point) <= tolerance)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the stored points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl FromIterator<Point> for InterfaceAtomSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut set = Self::new();
        for point in iter {
            set.insert(point);
        }
        set
    }
}

impl Extend<Point> for InterfaceAtomSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}
