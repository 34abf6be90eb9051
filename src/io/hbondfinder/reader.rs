//! Reader for HBondFinder result tables.
//!
//! Each row is whitespace separated. Columns 0 and 1 identify the donor (chain, residue),
//! columns 4 and 5 the acceptor, and column 8 the donor-acceptor distance. Other columns are
//! ignored.

use crate::io::error::Error;
use crate::model::hbond::{EdgeFilter, HBondEdge};
use smol_str::SmolStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const FORMAT: &str = "HBondFinder";

const DONOR_CHAIN: usize = 0;
const DONOR_RESIDUE: usize = 1;
const ACCEPTOR_CHAIN: usize = 4;
const ACCEPTOR_RESIDUE: usize = 5;
const DISTANCE: usize = 8;

/// Converts one tokenized row into an edge.
///
/// # Returns
///
/// `Ok(None)` when the row is rejected by `filter`, otherwise the edge.
///
/// # Errors
///
/// A descriptive message when the row has fewer than nine columns or a non-numeric distance.
pub fn parse_tokens(tokens: &[&str], filter: EdgeFilter) -> Result<Option<HBondEdge>, String> {
    if tokens.len() <= DISTANCE {
        return Err(format!(
            "expected at least {} columns, found {}",
            DISTANCE + 1,
            tokens.len()
        ));
    }

    let distance = tokens[DISTANCE]
        .parse::<f64>()
        .map_err(|_| format!("invalid distance '{}'", tokens[DISTANCE]))?;

    let edge = HBondEdge {
        donor: concat(tokens[DONOR_CHAIN], tokens[DONOR_RESIDUE]),
        acceptor: concat(tokens[ACCEPTOR_CHAIN], tokens[ACCEPTOR_RESIDUE]),
        distance,
        same_chain: tokens[DONOR_CHAIN] == tokens[ACCEPTOR_CHAIN],
    };

    Ok(filter.accepts(&edge).then_some(edge))
}

/// Reads every edge accepted by `filter`, skipping blank lines and `#` comments.
pub fn read<R: BufRead>(reader: R, filter: EdgeFilter) -> Result<Vec<HBondEdge>, Error> {
    let mut edges = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let edge = parse_tokens(&tokens, filter)
            .map_err(|details| Error::parse(FORMAT, None, line_num, details))?;
        edges.extend(edge);
    }

    log::debug!("read {} hydrogen-bond edges ({filter:?})", edges.len());
    Ok(edges)
}

/// Opens and reads an HBondFinder result file.
pub fn read_path(path: &Path, filter: EdgeFilter) -> Result<Vec<HBondEdge>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read(BufReader::new(file), filter).map_err(|e| e.with_path(path))
}

fn concat(chain: &str, residue: &str) -> SmolStr {
    let mut id = String::with_capacity(chain.len() + residue.len());
    id.push_str(chain);
    id.push_str(residue);
    SmolStr::new(id)
}
