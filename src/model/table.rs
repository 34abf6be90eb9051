//! Insertion-ordered collection of cones keyed by [`ConeKey`].
//!
//! A [`ConeTable`] holds one half of an interface. It is built by the cone reader (possibly
//! from an acceptor file and a donor file merged together), narrowed by the interface filter
//! into a fresh table, and read by the intersection engine. Iteration order is insertion order,
//! which makes the engine's output order deterministic.

use super::cone::{Cone, ConeKey};
use super::types::{ConeKind, Point};
use indexmap::IndexMap;

/// Mapping from cone key to cone, preserving first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConeTable {
    cones: IndexMap<ConeKey, Cone>,
}

impl ConeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` cones.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cones: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a cone, replacing any previous cone stored under the same key.
    ///
    /// A replaced entry keeps its original position in the iteration order while taking the
    /// new cone value, so the last write wins without reordering the table.
    ///
    /// # Arguments
    ///
    /// * `key` - Namespaced cone key.
    /// * `cone` - Cone to store.
    ///
    /// # Returns
    ///
    /// The previous cone for `key`, if one existed.
    pub fn insert(&mut self, key: ConeKey, cone: Cone) -> Option<Cone> {
        self.cones.insert(key, cone)
    }

    /// Looks up a cone by its full key text.
    pub fn get(&self, key: &str) -> Option<&Cone> {
        self.cones.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cones.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }

    /// Iterates over `(key, cone)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ConeKey, &Cone)> {
        self.cones.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &ConeKey> {
        self.cones.keys()
    }

    /// Iterates over cones in insertion order.
    pub fn cones(&self) -> impl ExactSizeIterator<Item = &Cone> {
        self.cones.values()
    }

    /// Number of cones whose key carries the given kind prefix.
    pub fn count_kind(&self, kind: ConeKind) -> usize {
        self.cones.keys().filter(|k| k.kind() == Some(kind)).count()
    }

    /// Apex coordinates of every cone, in table order.
    ///
    /// This is the coordinate list consumed by the pairwise distance pruner.
    pub fn apexes(&self) -> Vec<Point> {
        self.cones().map(|cone| cone.apex).collect()
    }

    /// Moves every entry of `other` into this table.
    ///
    /// Keys already present are overwritten in place; new keys are appended in `other`'s order.
    ///
    /// # Returns
    ///
    /// The number of keys that replaced an existing entry.
    pub fn merge(&mut self, other: ConeTable) -> usize {
        let mut replaced = 0;
        for (key, cone) in other.cones {
            if self.cones.insert(key, cone).is_some() {
                replaced += 1;
            }
        }
        replaced
    }

    /// Returns a new table holding only the entries accepted by `keep`.
    ///
    /// The receiver is left untouched so it stays usable for other stages.
    pub fn filtered<F>(&self, mut keep: F) -> ConeTable
    where
        F: FnMut(&ConeKey, &Cone) -> bool,
    {
        self.cones
            .iter()
            .filter(|&(key, cone)| keep(key, cone))
            .map(|(key, cone)| (key.clone(), *cone))
            .collect()
    }
}

impl FromIterator<(ConeKey, Cone)> for ConeTable {
    fn from_iter<I: IntoIterator<Item = (ConeKey, Cone)>>(iter: I) -> Self {
        Self {
            cones: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ConeTable {
    type Item = (ConeKey, Cone);
    type IntoIter = indexmap::map::IntoIter<ConeKey, Cone>;

    fn into_iter(self) -> Self::IntoIter {
        self.cones.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConeTable {
    type Item = (&'a ConeKey, &'a Cone);
    type IntoIter = indexmap::map::Iter<'a, ConeKey, Cone>;

    fn into_iter(self) -> Self::IntoIter {
        self.cones.iter()
    }
}
