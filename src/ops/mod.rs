//! Pipeline operations that filter, prune, match, and repair parsed inputs.
//!
//! This module groups the public entry points of the cone pipeline (interface filtering,
//! distance pruning, and directed cone intersection) together with the surface-mesh NaN
//! repair. All operations take their inputs by reference and share a common error type.

mod error;
mod interface;
mod intersect;
mod prune;
mod repair;

pub use interface::{filter_to_interface, filter_to_interface_by};

pub use prune::{DistancePruning, prune_by_distance};

pub use intersect::{IntersectConfig, facing_test, find_intersections, proximity_test};

pub use repair::{VertexRepair, repair_nan_vertices};

pub use error::Error;
