//! Writer that reproduces a `.SURF` file with repaired vertex coordinates.
//!
//! Only the `nan` coordinate tokens of the geometry block change; every other byte of the
//! source is copied through.

use super::reader::GEOMETRY_MARKER;
use crate::io::error::Error;
use crate::model::mesh::SurfMesh;
use crate::model::types::Point;
use std::io::{BufRead, Write};

const FORMAT: &str = "SURF";

/// Copies a `.SURF` source to `writer`, substituting repaired vertex coordinates.
///
/// Every line is reproduced verbatim except the coordinate tokens of geometry rows that read
/// `nan` in the source and hold a finite value in `mesh`. Those tokens are replaced in place
/// with the shortest decimal form of the repaired value (`2.5`, `2.333333`, `1e-06`);
/// surrounding whitespace and trailing columns are preserved.
///
/// # Arguments
///
/// * `source` - The original file contents.
/// * `writer` - Destination for the patched copy.
/// * `mesh` - Mesh read from the same source, after repair.
///
/// # Errors
///
/// [`Error::InconsistentData`] when the source geometry block does not match `mesh`, and
/// [`Error::Io`] on read or write failures.
pub fn write_patched<R: BufRead, W: Write>(
    source: R,
    mut writer: W,
    mesh: &SurfMesh,
) -> Result<(), Error> {
    let mut lines = source.lines();
    let mut patched = 0usize;

    while let Some(line) = lines.next() {
        let line = line.map_err(|e| Error::from_io(e, None))?;
        writeln!(writer, "{line}").map_err(|e| Error::from_io(e, None))?;

        if !line.trim().starts_with(GEOMETRY_MARKER) {
            continue;
        }

        let declared = line
            .split_whitespace()
            .nth(1)
            .and_then(|t| t.parse::<usize>().ok());
        if declared != Some(mesh.vertex_count()) {
            return Err(Error::inconsistent_data(
                FORMAT,
                None,
                format!(
                    "source GEOMETRY count {:?} does not match mesh with {} vertices",
                    declared,
                    mesh.vertex_count()
                ),
            ));
        }

        for vertex in &mesh.vertices {
            let row = lines
                .next()
                .ok_or_else(|| Error::inconsistent_data(FORMAT, None, "truncated GEOMETRY block"))?
                .map_err(|e| Error::from_io(e, None))?;
            let (row, changed) = patch_vertex_row(&row, vertex);
            patched += changed;
            writeln!(writer, "{row}").map_err(|e| Error::from_io(e, None))?;
        }
    }

    writer.flush().map_err(|e| Error::from_io(e, None))?;
    log::debug!("patched {patched} coordinate tokens");
    Ok(())
}

/// Rewrites the NaN coordinate tokens of one geometry row.
///
/// # Returns
///
/// The rewritten row and the number of substituted tokens.
fn patch_vertex_row(row: &str, vertex: &Point) -> (String, usize) {
    let mut out = String::with_capacity(row.len() + 16);
    let mut rest = row;
    let mut changed = 0;

    for axis in 0..3 {
        let Some(start) = rest.find(|c: char| !c.is_whitespace()) else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..end];
        let value = vertex[axis];

        if token.parse::<f64>().is_ok_and(f64::is_nan) && value.is_finite() {
            out.push_str(&format_coordinate(value));
            changed += 1;
        } else {
            out.push_str(token);
        }
        rest = &rest[end..];
    }

    out.push_str(rest);
    (out, changed)
}

/// Shortest round-trip text of a coordinate, in the notation of the tool that produces the
/// `.SURF` inputs: integral values keep a `.0`, and magnitudes below `1e-4` or from `1e16` on
/// use an exponent with a sign and at least two digits.
fn format_coordinate(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let text = format!("{value:e}");
        let Some((mantissa, exponent)) = text.split_once('e') else {
            return text;
        };
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
