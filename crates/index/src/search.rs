use std::cmp::Ordering;

use crate::{IndexEntry, SortOrder};

/// Binary search for `target` in entries sorted by key in `order`.
///
/// Returns the position of a matching entry. Every step computes
/// `mid = low + (high - low) / 2` over the half-open range `[low, high)` and
/// discards the half that cannot contain `target`. An empty slice returns
/// `None` without comparing anything.
pub fn binary_search<K: Ord>(
    entries: &[IndexEntry<K>],
    target: &K,
    order: SortOrder,
) -> Option<usize> {
    let mut low = 0usize;
    let mut high = entries.len();

    while low < high {
        let mid = low + (high - low) / 2;
        let mut cmp = entries[mid].key.cmp(target);
        if !order.is_ascending() {
            cmp = cmp.reverse();
        }
        match cmp {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    None
}
