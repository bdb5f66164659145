/// Employee database engine tying the slot store to the index layer.
use anyhow::Result;
use index::{Field, FieldKey, IndexEntry, KeyMode, SortOrder, SortedIndex};
use record::Employee;
use std::fmt;
use store::{LiveRecords, RecordStore};
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::input::{InputError, NewEmployee};
use crate::query::{Query, QueryRow};

/// One row of a field index: the resolved record plus the field it was
/// sorted on.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEmployee {
    pub field: Field,
    pub employee: Employee,
}

impl fmt::Display for IndexedEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {} - {}", self.employee.id, self.field.render(&self.employee))
    }
}

/// Result of [`Engine::index_by_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum IndexOutcome {
    /// There are no live records to index.
    Empty,
    Sorted {
        field: Field,
        order: SortOrder,
        rows: Vec<IndexedEmployee>,
    },
}

/// Result of [`Engine::search_by_ssn`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// There are no live records to search.
    Empty,
    NotFound,
    Found(Employee),
}

/// The employee database.
///
/// # Write path
///
/// 1. Validate the input and check the SSN against live records.
/// 2. Take the next id from the store's counter.
/// 3. Append the record to the next slot (id = slot number).
///
/// # Index path
///
/// 1. Scan live records, extracting `(id, key)` pairs for one field.
/// 2. Merge sort the pairs.
/// 3. Either resolve every id back to its record by slot, or binary search
///    the pairs for one key and resolve the hit.
pub struct Engine {
    store: RecordStore,
    key_mode: KeyMode,
}

impl Engine {
    /// Opens the store described by `config`, resuming the id counter from
    /// the records already on disk.
    pub fn open(config: &DbConfig) -> Result<Self> {
        let store = RecordStore::open_with(&config.path, config.store_options())?;
        Ok(Self {
            store,
            key_mode: config.key_mode,
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    /// Reserves the next record id.
    ///
    /// The reserved id must be the next one inserted; the store rejects
    /// records that would leave a gap. Fails once every `u32` id is used.
    pub fn create_record_with_id(&mut self) -> Result<u32> {
        Ok(self.store.next_identifier()?)
    }

    /// Appends a record whose id came from
    /// [`create_record_with_id`](Self::create_record_with_id).
    ///
    /// The SSN is not checked here; see [`add_employee`](Self::add_employee).
    pub fn insert(&mut self, record: &Employee) -> Result<()> {
        self.store.insert(record)?;
        Ok(())
    }

    /// Live records in ascending id order.
    pub fn scan_live(&self) -> Result<LiveRecords> {
        Ok(self.store.scan_live()?)
    }

    /// Tombstones the live record with `id`. Returns `false` if there is none.
    pub fn mark_deleted(&mut self, id: u32) -> Result<bool> {
        Ok(self.store.mark_deleted(id)?)
    }

    /// Returns `true` if a live record already uses `ssn`.
    pub fn ssn_in_use(&self, ssn: &str) -> Result<bool> {
        for e in self.store.scan_live()? {
            if e?.ssn == ssn {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Validates `new`, assigns it the next id and appends it.
    ///
    /// # Errors
    ///
    /// Fails with an [`InputError`] (reachable through
    /// `anyhow::Error::downcast_ref`) if the input is invalid or the SSN is
    /// held by a live record, or with a store error on I/O failure.
    pub fn add_employee(&mut self, new: NewEmployee) -> Result<u32> {
        new.validate()?;
        if self.ssn_in_use(&new.ssn)? {
            return Err(InputError::DuplicateSsn(new.ssn).into());
        }

        let id = self.create_record_with_id()?;
        self.insert(&new.into_record(id))?;
        info!(id, "added employee");
        Ok(id)
    }

    /// All live records, in id order or sorted by value on `order_by`.
    pub fn list_employees(&self, order_by: Option<Field>) -> Result<Vec<Employee>> {
        let mut all = self.scan_live()?.collect::<Result<Vec<_>, _>>()?;
        if let Some(field) = order_by {
            all.sort_by(|a, b| field.compare(a, b));
        }
        Ok(all)
    }

    fn build_index(&self, field: Field, order: SortOrder) -> Result<SortedIndex> {
        let mut entries: Vec<IndexEntry<FieldKey>> = Vec::new();
        for e in self.store.scan_live()? {
            let e = e?;
            entries.push(IndexEntry::new(e.id, field.key(&e, self.key_mode)));
        }
        debug!(field = field.name(), entries = entries.len(), "building index");
        Ok(SortedIndex::from_entries(entries, order))
    }

    /// Sorts live records on `field` and resolves each one by slot.
    pub fn index_by_field(&self, field: Field, order: SortOrder) -> Result<IndexOutcome> {
        let index = self.build_index(field, order)?;
        if index.is_empty() {
            return Ok(IndexOutcome::Empty);
        }

        let rows = index
            .ids()
            .map(|id| -> Result<IndexedEmployee> {
                Ok(IndexedEmployee {
                    field,
                    employee: self.store.read_by_slot(id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(IndexOutcome::Sorted { field, order, rows })
    }

    /// Exact-match lookup of a live record by SSN.
    ///
    /// The SSN index is always built ascending and searched by bisection.
    /// `target` is not validated; a malformed SSN is simply not found.
    pub fn search_by_ssn(&self, target: &str) -> Result<SearchOutcome> {
        let index = self.build_index(Field::Ssn, SortOrder::Ascending)?;
        if index.is_empty() {
            return Ok(SearchOutcome::Empty);
        }

        match index.find(&FieldKey::Text(target.to_string())) {
            Some(hit) => Ok(SearchOutcome::Found(self.store.read_by_slot(hit.id)?)),
            None => {
                debug!(ssn = target, "ssn not found");
                Ok(SearchOutcome::NotFound)
            }
        }
    }

    /// Parses and evaluates a query over live records.
    pub fn run_query(&self, text: &str) -> Result<Vec<QueryRow>> {
        let query: Query = text.parse()?;
        let live = self.scan_live()?.collect::<Result<Vec<_>, _>>()?;
        Ok(query.evaluate(&live))
    }
}
