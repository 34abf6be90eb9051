//! Directional hydrogen-bond regions anchored at an atom.
//!
//! A [`Cone`] couples the apex (the donor or acceptor atom position) with the direction the
//! bonding region faces. Cones are produced by the cone-file reader, narrowed by the interface
//! filter, and compared pairwise by the intersection engine. [`ConeKey`] is the namespaced label
//! under which a cone is stored.

use super::types::{ConeKind, Orientation, Point};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;

/// Apex position plus facing direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    /// Anchor atom coordinates in ångströms.
    pub apex: Point,
    /// Vector perpendicular to the cone's defining plane.
    pub orientation: Orientation,
}

impl Cone {
    /// Creates a cone from an apex and an orientation.
    ///
    /// The orientation is stored as given; zero vectors are allowed and simply never pass the
    /// facing test.
    ///
    /// # Arguments
    ///
    /// * `apex` - Anchor atom position.
    /// * `orientation` - Facing direction, any length.
    ///
    /// # Returns
    ///
    /// A new `Cone`.
    pub fn new(apex: Point, orientation: Orientation) -> Self {
        Self { apex, orientation }
    }

    /// Euclidean distance between the apexes of two cones.
    pub fn apex_distance(&self, other: &Cone) -> f64 {
        crate::geometry::distance(&self.apex, &other.apex)
    }

    /// Returns `true` when the orientation has no defined direction.
    pub fn is_degenerate(&self) -> bool {
        crate::geometry::magnitude(&self.orientation) == 0.0
    }
}

impl fmt::Display for Cone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cone {{ apex: [{:.3}, {:.3}, {:.3}], orientation: [{:.3}, {:.3}, {:.3}] }}",
            self.apex.x,
            self.apex.y,
            self.apex.z,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z
        )
    }
}

/// Namespaced cone identifier such as `"ACCEP A ASP 25 OD1"`.
///
/// The prefix is part of the key, so acceptor and donor cones for the same atom label are
/// always distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConeKey(SmolStr);

impl ConeKey {
    /// Builds a key from a cone kind and the atom label extracted from the source line.
    pub fn new(kind: ConeKind, label: &str) -> Self {
        let mut key = String::with_capacity(kind.prefix().len() + label.len());
        key.push_str(kind.prefix());
        key.push_str(label);
        Self(SmolStr::new(key))
    }

    /// Wraps an already prefixed key without validation.
    pub fn from_raw(key: &str) -> Self {
        Self(SmolStr::new(key))
    }

    /// Full key text including the prefix.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Kind encoded in the prefix, if the key carries one.
    pub fn kind(&self) -> Option<ConeKind> {
        ConeKind::from_key(self.as_str())
    }

    /// Atom label without the kind prefix.
    pub fn label(&self) -> &str {
        match self.kind() {
            Some(kind) => &self.as_str()[kind.prefix().len()..],
            None => self.as_str(),
        }
    }
}

impl Borrow<str> for ConeKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ConeKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ConeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for ConeKey {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ConeKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
