//! Cross-warehouse aggregation and thickness ordering.

use crate::spec::{Specification, parse_fields};
use crate::volume::round_volume;
use crate::warehouse::Warehouse;

/// Thickness (third field) of a specification key; `0.0` when the key does
/// not split into three numeric fields.
pub fn thickness_of(key: &str) -> f64 {
    match parse_fields(key) {
        Some([_, _, t]) if t.is_finite() => t,
        _ => 0.0,
    }
}

/// Stable ascending sort of (spec, volume) pairs by parsed thickness.
pub fn sort_by_thickness<K: AsRef<str>>(items: &mut [(K, f64)]) {
    items.sort_by(|(a, _), (b, _)| thickness_of(a.as_ref()).total_cmp(&thickness_of(b.as_ref())));
}

/// Total volume per specification across all warehouses.
///
/// Specifications appear in first-seen order (warehouse order, then entry
/// order); sort the result with [`sort_by_thickness`] for display.
pub fn totals<'a>(warehouses: impl IntoIterator<Item = &'a Warehouse>) -> Vec<(Specification, f64)> {
    let mut out: Vec<(Specification, f64)> = Vec::new();
    for warehouse in warehouses {
        for entry in warehouse.entries() {
            match out.iter_mut().find(|(spec, _)| spec == &entry.specification) {
                Some((_, total)) => *total = round_volume(*total + entry.volume),
                None => out.push((entry.specification.clone(), entry.volume)),
            }
        }
    }
    out
}
