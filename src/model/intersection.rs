//! Directed result of the cone intersection engine.

use super::cone::ConeKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maps each half-1 cone key to the half-2 keys it intersects with.
///
/// The map is directed: a match between `A` (half 1) and `B` (half 2) yields an entry under
/// `A` only. Keys without a match are absent rather than mapped to an empty list. Serializes
/// as a plain JSON object of key to key list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntersectionMap {
    edges: IndexMap<ConeKey, Vec<ConeKey>>,
}

impl IntersectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `target` to the list stored under `source`, creating the list on first use.
    pub fn push(&mut self, source: ConeKey, target: ConeKey) {
        self.edges.entry(source).or_default().push(target);
    }

    /// Appends several targets at once. An empty `targets` list leaves the map unchanged.
    pub fn extend_targets(&mut self, source: ConeKey, targets: Vec<ConeKey>) {
        if targets.is_empty() {
            return;
        }
        self.edges.entry(source).or_default().extend(targets);
    }

    /// Half-2 keys matched by `source`, in half-2 table order.
    pub fn get(&self, source: &str) -> Option<&[ConeKey]> {
        self.edges.get(source).map(Vec::as_slice)
    }

    pub fn contains_key(&self, source: &str) -> bool {
        self.edges.contains_key(source)
    }

    /// Number of half-1 keys with at least one match.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Iterates over `(source, targets)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConeKey, &[ConeKey])> {
        self.edges.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Flattens the map into individual `(source, target)` edges.
    pub fn edges(&self) -> impl Iterator<Item = (&ConeKey, &ConeKey)> {
        self.edges
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |t| (source, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::ConeKind;

    fn accep(label: &str) -> ConeKey {
        ConeKey::new(ConeKind::Acceptor, label)
    }

    fn donor(label: &str) -> ConeKey {
        ConeKey::new(ConeKind::Donor, label)
    }

    #[test]
    fn push_groups_targets_under_source() {
        let mut map = IntersectionMap::new();
        map.push(accep("A1"), donor("B1"));
        map.push(accep("A1"), donor("B2"));
        map.push(accep("A2"), donor("B1"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.edge_count(), 3);
        assert_eq!(map.get("ACCEP A1").unwrap(), &[donor("B1"), donor("B2")]);
        assert!(!map.contains_key("DONOR B1"));
    }

    #[test]
    fn extend_targets_ignores_empty_lists() {
        let mut map = IntersectionMap::new();
        map.extend_targets(accep("A1"), Vec::new());
        assert!(map.is_empty());

        map.extend_targets(accep("A1"), vec![donor("B1")]);
        assert_eq!(map.edge_count(), 1);
    }

    #[test]
    fn edges_flatten_in_order() {
        let mut map = IntersectionMap::new();
        map.push(accep("A1"), donor("B2"));
        map.push(accep("A1"), donor("B1"));

        let flat: Vec<(&str, &str)> = map
            .edges()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![("ACCEP A1", "DONOR B2"), ("ACCEP A1", "DONOR B1")]
        );
    }

    #[test]
    fn serializes_as_json_object() {
        let mut map = IntersectionMap::new();
        map.push(accep("A1"), donor("B1"));

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"ACCEP A1":["DONOR B1"]}"#);

        let empty = serde_json::to_string(&IntersectionMap::new()).unwrap();
        assert_eq!(empty, "{}");
    }
}
