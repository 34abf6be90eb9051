//! # ConeForge
//!
//! **ConeForge** finds candidate hydrogen bonds across a molecular interface by matching
//! directional donor and acceptor "cones" from the two interface halves. Cones are parsed from
//! `.cones` exports, narrowed to the atoms known to sit on the interface, and compared pairwise
//! with an orientation test and a distance test. The result is a directed map from each half-1
//! cone to the half-2 cones it can bond with.
//!
//! ## Features
//!
//! - **Cone parsing** – Separate acceptor and donor key grammars, exact `f64` coordinates, and
//!   whole-file failure on malformed rows so no cone is ever missing its orientation.
//! - **Exact interface filtering** – Apexes are kept only when they match an interface atom
//!   coordinate bit for bit; a predicate-based variant lets callers relax the match.
//! - **Distance pruning** – Dense pairwise distance matrix with the pairs inside twice the
//!   hydrogen-bond cutoff.
//! - **Directed intersection** – Facing and proximity tests over every half-1 × half-2 pair,
//!   parallelized with Rayon behind the `parallel` feature and deterministic in output order.
//! - **Surface utilities** – `.SURF` mesh reading, vertex adjacency, NaN coordinate repair, and
//!   HBondFinder result parsing for the surrounding workflow.

mod model;
mod utils;

pub mod geometry;
pub mod io;
pub mod ops;

pub use model::cone::{Cone, ConeKey};
pub use model::hbond::{EdgeFilter, HBondEdge};
pub use model::interface::InterfaceAtomSet;
pub use model::intersection::IntersectionMap;
pub use model::mesh::{MeshGraph, SurfMesh, Triangle};
pub use model::table::ConeTable;
pub use model::types::{ConeKind, Orientation, Point};
