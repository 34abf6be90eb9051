//! Reader for interface atom coordinate lists.
//!
//! The expected input holds one atom per line with the first three whitespace-separated tokens
//! giving `x y z`. Further tokens are ignored, as are blank lines and `#` comments.

use crate::io::error::Error;
use crate::model::interface::InterfaceAtomSet;
use crate::model::types::Point;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const FORMAT: &str = "interface";

/// Parses an interface coordinate stream into an exact-match set.
///
/// Coordinates are parsed with the same `f64` conversion as cone apexes, so values written with
/// identical text compare equal.
pub fn read<R: BufRead>(reader: R) -> Result<InterfaceAtomSet, Error> {
    let mut atoms = InterfaceAtomSet::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        atoms.insert(parse_point(trimmed, line_num)?);
    }

    log::debug!("parsed {} interface atoms", atoms.len());
    Ok(atoms)
}

/// Opens and parses an interface coordinate file.
pub fn read_path(path: &Path) -> Result<InterfaceAtomSet, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read(BufReader::new(file)).map_err(|e| e.with_path(path))
}

fn parse_point(line: &str, line_num: usize) -> Result<Point, Error> {
    let mut coords = [0.0_f64; 3];
    let mut tokens = line.split_whitespace();

    for (axis, coord) in coords.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            Error::parse(FORMAT, None, line_num, "expected three coordinates")
        })?;
        *coord = token.parse::<f64>().map_err(|_| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                format!("invalid coordinate '{token}' on axis {axis}"),
            )
        })?;
    }

    Ok(Point::new(coords[0], coords[1], coords[2]))
}
