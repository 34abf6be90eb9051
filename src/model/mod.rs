//! Core data structures of the cone pipeline.
//!
//! Defines cones and their keys, the insertion-ordered cone tables that hold one interface half,
//! interface atom sets, the directed intersection map, surface meshes, and hydrogen-bond edges.
//! These types are produced by the IO readers and consumed by the operations layer.

pub mod cone;
pub mod hbond;
pub mod interface;
pub mod intersection;
pub mod mesh;
pub mod table;
pub mod types;
