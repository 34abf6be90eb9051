//! Reader for `.SURF` triangulated surface meshes.
//!
//! Only the `GEOMETRY` and `TOPOLOGY` sections are interpreted; everything else in the file is
//! skipped.

use crate::io::error::Error;
use crate::model::mesh::{SurfMesh, Triangle};
use crate::model::types::Point;
use std::io::BufRead;

const FORMAT: &str = "SURF";

pub(super) const GEOMETRY_MARKER: &str = "GEOMETRY";
const TOPOLOGY_MARKER: &str = "TOPOLOGY";

/// Reads the geometry and topology sections of a `.SURF` mesh.
///
/// Lines before `GEOMETRY: <n>` are ignored. The `n` following lines are vertices whose first
/// three tokens are coordinates (`nan` allowed); remaining tokens are visualization data and
/// are dropped. After the geometry block the reader looks for `TOPOLOGY: <m>` and reads `m`
/// triangles, skipping blank and `#` lines.
///
/// # Errors
///
/// [`Error::Parse`] for malformed counts, coordinates, or indices, and
/// [`Error::InconsistentData`] for missing sections, truncated blocks, and triangle indices
/// outside the vertex range.
pub fn read<R: BufRead>(reader: R) -> Result<SurfMesh, Error> {
    let mut lines = reader.lines().enumerate();
    let mut next_line = move || -> Result<Option<(usize, String)>, Error> {
        match lines.next() {
            Some((idx, line)) => Ok(Some((idx + 1, line.map_err(|e| Error::from_io(e, None))?))),
            None => Ok(None),
        }
    };

    let vertex_count = loop {
        match next_line()? {
            Some((line_num, line)) if line.trim().starts_with(GEOMETRY_MARKER) => {
                break parse_section_count(&line, line_num)?;
            }
            Some(_) => continue,
            None => {
                return Err(Error::inconsistent_data(
                    FORMAT,
                    None,
                    "missing GEOMETRY section",
                ));
            }
        }
    };

    let mut vertices = Vec::with_capacity(vertex_count);
    while vertices.len() < vertex_count {
        let (line_num, line) = next_line()?.ok_or_else(|| {
            Error::inconsistent_data(
                FORMAT,
                None,
                format!(
                    "GEOMETRY declares {vertex_count} vertices but only {} are present",
                    vertices.len()
                ),
            )
        })?;
        vertices.push(parse_vertex(&line, line_num)?);
    }

    let triangle_count = loop {
        match next_line()? {
            Some((line_num, line)) if line.trim().starts_with(TOPOLOGY_MARKER) => {
                break parse_section_count(&line, line_num)?;
            }
            Some(_) => continue,
            None => {
                return Err(Error::inconsistent_data(
                    FORMAT,
                    None,
                    "missing TOPOLOGY section",
                ));
            }
        }
    };

    let mut triangles = Vec::with_capacity(triangle_count);
    while triangles.len() < triangle_count {
        let (line_num, line) = next_line()?.ok_or_else(|| {
            Error::inconsistent_data(
                FORMAT,
                None,
                format!(
                    "TOPOLOGY declares {triangle_count} triangles but only {} are present",
                    triangles.len()
                ),
            )
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        triangles.push(parse_triangle(trimmed, line_num, vertex_count)?);
    }

    log::debug!(
        "parsed SURF mesh with {} vertices and {} triangles",
        vertices.len(),
        triangles.len()
    );
    Ok(SurfMesh::new(vertices, triangles))
}

fn parse_section_count(line: &str, line_num: usize) -> Result<usize, Error> {
    line.split_whitespace()
        .nth(1)
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(|| Error::parse(FORMAT, None, line_num, "invalid section count"))
}

/// Splits a geometry row into its coordinate tokens and parses them.
pub(super) fn parse_vertex(line: &str, line_num: usize) -> Result<Point, Error> {
    let mut coords = [0.0_f64; 3];
    let mut tokens = line.split_whitespace();

    for coord in coords.iter_mut() {
        let token = tokens.next().ok_or_else(|| {
            Error::parse(FORMAT, None, line_num, "vertex row has fewer than 3 coordinates")
        })?;
        *coord = token.parse::<f64>().map_err(|_| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                format!("invalid vertex coordinate '{token}'"),
            )
        })?;
    }

    Ok(Point::new(coords[0], coords[1], coords[2]))
}

fn parse_triangle(line: &str, line_num: usize, vertex_count: usize) -> Result<Triangle, Error> {
    let mut triangle = [0_usize; 3];
    let mut tokens = line.split_whitespace();

    for index in triangle.iter_mut() {
        let token = tokens.next().ok_or_else(|| {
            Error::parse(FORMAT, None, line_num, "triangle row has fewer than 3 indices")
        })?;
        *index = token.parse::<usize>().map_err(|_| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                format!("invalid vertex index '{token}'"),
            )
        })?;
        if *index >= vertex_count {
            return Err(Error::inconsistent_data(
                FORMAT,
                None,
                format!(
                    "triangle on line {line_num} references vertex {index} but only {vertex_count} exist"
                ),
            ));
        }
    }

    Ok(triangle)
}
