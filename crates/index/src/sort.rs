//! Stable top-down merge sort over index entries.

use crate::IndexEntry;

/// Direction of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortOrder::Ascending)
    }

    /// `true` if `left` may be emitted before `right`. Ties favour the left
    /// run, which keeps the sort stable.
    fn takes_left<K: Ord>(self, left: &K, right: &K) -> bool {
        match self {
            SortOrder::Ascending => left <= right,
            SortOrder::Descending => left >= right,
        }
    }
}

impl From<bool> for SortOrder {
    fn from(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// Sorts `entries` by key in `order`.
///
/// Splits at the midpoint (the left half takes the middle element), sorts
/// each half recursively and merges the two runs by repeatedly taking the
/// smaller head (larger when descending). Only keys are compared; entries
/// with equal keys keep their input order. `O(n log n)` comparisons and
/// `O(n)` scratch per merge.
pub fn merge_sort<K: Ord + Clone>(entries: &mut [IndexEntry<K>], order: SortOrder) {
    let len = entries.len();
    if len < 2 {
        return;
    }

    let mid = (len + 1) / 2;
    merge_sort(&mut entries[..mid], order);
    merge_sort(&mut entries[mid..], order);
    merge(entries, mid, order);
}

/// Merges the sorted runs `entries[..mid]` and `entries[mid..]` in place.
fn merge<K: Ord + Clone>(entries: &mut [IndexEntry<K>], mid: usize, order: SortOrder) {
    let left = entries[..mid].to_vec();
    let right = entries[mid..].to_vec();

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if order.takes_left(&left[i].key, &right[j].key) {
            entries[k] = left[i].clone();
            i += 1;
        } else {
            entries[k] = right[j].clone();
            j += 1;
        }
        k += 1;
    }

    // at most one of these has anything left
    for e in left[i..].iter().chain(&right[j..]) {
        entries[k] = e.clone();
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::cmp::Ordering;
    use std::rc::Rc;

    fn entries(keys: &[i32]) -> Vec<IndexEntry<i32>> {
        keys.iter()
            .enumerate()
            .map(|(i, &k)| IndexEntry::new(i as u32 + 1, k))
            .collect()
    }

    fn ids<K>(v: &[IndexEntry<K>]) -> Vec<u32> {
        v.iter().map(|e| e.id).collect()
    }

    #[test]
    fn sorts_ascending_and_descending() {
        let mut v = entries(&[5, 3, 9, 1, 7, 2]);
        merge_sort(&mut v, SortOrder::Ascending);
        assert_eq!(v.iter().map(|e| e.key).collect::<Vec<_>>(), vec![1, 2, 3, 5, 7, 9]);

        merge_sort(&mut v, SortOrder::Descending);
        assert_eq!(v.iter().map(|e| e.key).collect::<Vec<_>>(), vec![9, 7, 5, 3, 2, 1]);
    }

    #[test]
    fn empty_and_single() {
        let mut v: Vec<IndexEntry<i32>> = Vec::new();
        merge_sort(&mut v, SortOrder::Ascending);
        assert!(v.is_empty());

        let mut v = entries(&[42]);
        merge_sort(&mut v, SortOrder::Descending);
        assert_eq!(ids(&v), vec![1]);
    }

    #[test]
    fn stable_on_ties_in_both_directions() {
        // ids 1..=8
        let keys = [2, 1, 2, 1, 3, 2, 1, 3];

        let mut v = entries(&keys);
        merge_sort(&mut v, SortOrder::Ascending);
        assert_eq!(ids(&v), vec![2, 4, 7, 1, 3, 6, 5, 8]);

        let mut v = entries(&keys);
        merge_sort(&mut v, SortOrder::Descending);
        assert_eq!(ids(&v), vec![5, 8, 1, 3, 6, 2, 4, 7]);
    }

    #[test]
    fn output_is_a_sorted_permutation() {
        // deterministic pseudo-random keys with plenty of duplicates
        let mut x: u32 = 0x2545_F491;
        let keys: Vec<i32> = (0..500)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                (x % 50) as i32
            })
            .collect();

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let input = entries(&keys);
            let mut v = input.clone();
            merge_sort(&mut v, order);

            let mut expected = input.clone();
            // std's sort_by is stable too
            expected.sort_by(|a, b| match order {
                SortOrder::Ascending => a.key.cmp(&b.key),
                SortOrder::Descending => b.key.cmp(&a.key),
            });
            assert_eq!(v, expected);
        }
    }

    #[derive(Clone, Debug)]
    struct Counted {
        key: u32,
        calls: Rc<Cell<usize>>,
    }

    impl PartialEq for Counted {
        fn eq(&self, other: &Self) -> bool {
            self.cmp(other) == Ordering::Equal
        }
    }
    impl Eq for Counted {}
    impl PartialOrd for Counted {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Counted {
        fn cmp(&self, other: &Self) -> Ordering {
            self.calls.set(self.calls.get() + 1);
            self.key.cmp(&other.key)
        }
    }

    #[test]
    fn comparisons_are_n_log_n() {
        let calls = Rc::new(Cell::new(0));
        let n = 1024u32;
        let mut v: Vec<IndexEntry<Counted>> = (0..n)
            .map(|i| {
                IndexEntry::new(
                    i + 1,
                    Counted {
                        key: (i * 7919) % n,
                        calls: calls.clone(),
                    },
                )
            })
            .collect();

        merge_sort(&mut v, SortOrder::Ascending);
        // n * log2(n) = 10240
        assert!(calls.get() <= 10 * n as usize, "comparisons: {}", calls.get());
        assert!(v.windows(2).all(|w| w[0].key.key <= w[1].key.key));
    }

    #[test]
    fn order_from_bool() {
        assert_eq!(SortOrder::from(true), SortOrder::Ascending);
        assert_eq!(SortOrder::from(false), SortOrder::Descending);
        assert!(!SortOrder::Descending.is_ascending());
    }
}
