//! `.SURF` triangulated surface meshes.

pub mod reader;
pub mod writer;
