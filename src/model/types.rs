//! Shared geometric aliases and the cone kind enumeration.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cartesian position in ångströms.
pub type Point = Point3<f64>;

/// Facing direction of a cone. Not required to be unit length.
pub type Orientation = Vector3<f64>;

/// Which side of a hydrogen bond a cone describes.
///
/// The kind selects the key sub-grammar used when parsing a cone file and the prefix that
/// namespaces the resulting keys, so acceptor and donor cones of the same atom never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConeKind {
    Acceptor,
    Donor,
}

impl ConeKind {
    /// Key prefix, including the trailing separator space.
    pub const fn prefix(self) -> &'static str {
        match self {
            ConeKind::Acceptor => "ACCEP ",
            ConeKind::Donor => "DONOR ",
        }
    }

    /// Resolves the kind from a full key such as `"DONOR A 12 NZ"`.
    pub fn from_key(key: &str) -> Option<Self> {
        if key.starts_with(ConeKind::Acceptor.prefix()) {
            Some(ConeKind::Acceptor)
        } else if key.starts_with(ConeKind::Donor.prefix()) {
            Some(ConeKind::Donor)
        } else {
            None
        }
    }
}

impl fmt::Display for ConeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConeKind::Acceptor => write!(f, "acceptor"),
            ConeKind::Donor => write!(f, "donor"),
        }
    }
}

impl FromStr for ConeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "acceptor" | "accep" => Ok(ConeKind::Acceptor),
            "donor" => Ok(ConeKind::Donor),
            _ => Err(format!("Invalid cone kind: {}", s)),
        }
    }
}
