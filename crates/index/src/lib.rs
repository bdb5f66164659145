//! # Index — sorted secondary keys over employee records
//!
//! An index is a vector of `(id, key)` pairs built from the live records of a
//! store, sorted with an explicit, stable merge sort. Exact-match lookups run
//! a classic binary search over the sorted pairs and hand back the id, which
//! the caller resolves to a full record by slot.
//!
//! ```rust
//! use index::{Field, KeyMode, SortOrder, SortedIndex};
//! use record::Employee;
//!
//! let staff = vec![
//!     Employee::new(1, "A", "Zed", "333-33-3333", 10.0, 30),
//!     Employee::new(2, "B", "Amy", "111-11-1111", 20.0, 25),
//! ];
//! let idx = SortedIndex::build(&staff, Field::Ssn, SortOrder::Ascending, KeyMode::Text);
//! assert_eq!(idx.ids().collect::<Vec<_>>(), vec![2, 1]);
//! assert_eq!(idx.find(&Field::Ssn.key(&staff[0], KeyMode::Text)).map(|e| e.id), Some(1));
//! ```

mod field;
mod search;
mod sort;

use record::Employee;

pub use field::{Field, FieldKey, KeyMode, ParseFieldError};
pub use search::binary_search;
pub use sort::{merge_sort, SortOrder};

/// One `(id, key)` pair of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry<K> {
    pub id: u32,
    pub key: K,
}

impl<K> IndexEntry<K> {
    pub fn new(id: u32, key: K) -> Self {
        Self { id, key }
    }
}

/// `(id, key)` pairs for one field, sorted in one direction.
#[derive(Debug, Clone)]
pub struct SortedIndex<K = FieldKey> {
    order: SortOrder,
    entries: Vec<IndexEntry<K>>,
}

impl SortedIndex<FieldKey> {
    /// Extracts `field` from every record and sorts the pairs.
    ///
    /// Tombstoned records are skipped.
    pub fn build<'a, I>(records: I, field: Field, order: SortOrder, mode: KeyMode) -> Self
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        let entries = records
            .into_iter()
            .filter(|e| e.is_live())
            .map(|e| IndexEntry::new(e.id, field.key(e, mode)))
            .collect();
        Self::from_entries(entries, order)
    }
}

impl<K: Ord + Clone> SortedIndex<K> {
    /// Sorts already extracted pairs with [`merge_sort`].
    pub fn from_entries(mut entries: Vec<IndexEntry<K>>, order: SortOrder) -> Self {
        merge_sort(&mut entries, order);
        Self { order, entries }
    }

    /// Exact-match lookup by binary search. With duplicate keys any one of
    /// the matching entries may be returned.
    pub fn find(&self, target: &K) -> Option<&IndexEntry<K>> {
        binary_search(&self.entries, target, self.order).map(|i| &self.entries[i])
    }
}

impl<K> SortedIndex<K> {
    /// Ids in index order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
