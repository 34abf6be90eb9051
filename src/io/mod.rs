//! IO front-end for cone files, interface atom lists, SURF meshes, and HBondFinder tables.
//!
//! Every reader has a stream form taking any `BufRead` and a path form that opens the file and
//! attaches its path to errors. All of them share the [`Error`] type.

mod cones;
mod error;
mod hbondfinder;
mod interface;
mod surf;

pub use cones::reader::{
    read as read_cones, read_into as read_cones_into, read_path as parse_cone_file,
};

pub use interface::reader::{
    read as read_interface_atoms, read_path as read_interface_atoms_path,
};

pub use surf::reader::read as read_surf_mesh;
pub use surf::writer::write_patched as write_patched_surf;

pub use hbondfinder::reader::{
    parse_tokens as parse_hbond_tokens, read as read_hbond_edges,
    read_path as read_hbond_edges_path,
};

pub use error::Error;
