//! Hydrogen-bond edges reported by the external HBondFinder program.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Donor-to-acceptor hydrogen bond with its reported length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HBondEdge {
    /// Donor identifier: chain id concatenated with the residue field.
    pub donor: SmolStr,
    /// Acceptor identifier: chain id concatenated with the residue field.
    pub acceptor: SmolStr,
    /// Donor-acceptor distance in ångströms.
    pub distance: f64,
    /// Whether donor and acceptor sit on the same chain.
    pub same_chain: bool,
}

/// Which edges to keep when reading HBondFinder output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeFilter {
    /// Keep intra- and inter-chain edges.
    #[default]
    All,
    /// Keep only edges whose donor and acceptor lie on different chains.
    InterChain,
}

impl EdgeFilter {
    pub fn accepts(self, edge: &HBondEdge) -> bool {
        match self {
            EdgeFilter::All => true,
            EdgeFilter::InterChain => !edge.same_chain,
        }
    }
}

impl fmt::Display for HBondEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({:.2} Å)", self.donor, self.acceptor, self.distance)
    }
}
