//! Restricts cone tables to atoms lying on the molecular interface.
//!
//! The default filter keeps a cone only when its apex is an exact member of the interface atom
//! set. Callers whose coordinates went through a different numeric path can supply their own
//! membership predicate through [`filter_to_interface_by`].

use crate::model::interface::InterfaceAtomSet;
use crate::model::table::ConeTable;
use crate::model::types::Point;

/// Keeps the cones of each half whose apex belongs to that half's interface set.
///
/// # Arguments
///
/// * `half1` - Cones of the first interface half.
/// * `half2` - Cones of the second interface half.
/// * `interface1` - Interface atoms of the first half.
/// * `interface2` - Interface atoms of the second half.
///
/// # Returns
///
/// Two new tables in the original iteration order. The inputs are not modified.
pub fn filter_to_interface(
    half1: &ConeTable,
    half2: &ConeTable,
    interface1: &InterfaceAtomSet,
    interface2: &InterfaceAtomSet,
) -> (ConeTable, ConeTable) {
    filter_to_interface_by(
        half1,
        half2,
        |apex| interface1.contains(apex),
        |apex| interface2.contains(apex),
    )
}

/// Same as [`filter_to_interface`] with caller-provided membership predicates.
pub fn filter_to_interface_by<F1, F2>(
    half1: &ConeTable,
    half2: &ConeTable,
    is_interface1: F1,
    is_interface2: F2,
) -> (ConeTable, ConeTable)
where
    F1: Fn(&Point) -> bool,
    F2: Fn(&Point) -> bool,
{
    let filtered1 = half1.filtered(|_, cone| is_interface1(&cone.apex));
    let filtered2 = half2.filtered(|_, cone| is_interface2(&cone.apex));

    log::debug!(
        "interface filter kept {}/{} half-1 and {}/{} half-2 cones",
        filtered1.len(),
        half1.len(),
        filtered2.len(),
        half2.len()
    );

    (filtered1, filtered2)
}
