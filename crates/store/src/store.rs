use record::{Employee, RecordError, RECORD_SIZE};
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::scan::{read_block, LiveRecords, Records};
use crate::StoreError;

/// Tunables for a [`RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// If `true`, every insert and delete is followed by `sync_all`.
    pub sync: bool,
}

/// Handle to one employee slot file.
///
/// The handle owns only the path and the id counter; see the crate docs for
/// the positional invariant it maintains.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    next_id: u64,
    options: StoreOptions,
}

fn slot_offset(id: u32) -> u64 {
    u64::from(id - 1) * RECORD_SIZE as u64
}

impl RecordStore {
    /// Opens the store at `path` with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Opens the store at `path`, creating an empty file if none exists.
    ///
    /// Every slot is scanned (tombstones included) so the id counter resumes
    /// at `max(id) + 1`, or `1` for an empty file. No record bytes are
    /// written; a partial trailing block is left for the next insert to drop.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be created or read, and
    /// [`StoreError::Record`] if a complete slot fails to decode.
    pub fn open_with<P: AsRef<Path>>(path: P, options: StoreOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        OpenOptions::new().create(true).append(true).open(&path)?;

        let mut next_id = 1u64;
        let mut records = Records::open(&path)?;
        for e in records.by_ref() {
            next_id = next_id.max(u64::from(e?.id) + 1);
        }

        info!(path = %path.display(), slots = records.slots_read(), next_id, "opened record store");

        Ok(Self {
            path,
            next_id,
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the id the next call to [`next_identifier`](Self::next_identifier)
    /// will hand out, without consuming it.
    pub fn peek_next_id(&self) -> u64 {
        self.next_id
    }

    /// Hands out the current counter value and advances it.
    ///
    /// The counter only goes back when an insert of the id it just handed out
    /// fails on I/O (see [`insert`](Self::insert)), so no id that reached the
    /// file is handed out twice. Reopening resumes past every id on disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdsExhausted`] once `u32::MAX` has been handed out.
    pub fn next_identifier(&mut self) -> Result<u32, StoreError> {
        let id = u32::try_from(self.next_id).map_err(|_| StoreError::IdsExhausted)?;
        self.next_id += 1;
        Ok(id)
    }

    /// Number of complete slots in the file.
    pub fn slot_count(&self) -> Result<u64, StoreError> {
        let len = std::fs::metadata(&self.path)?.len();
        Ok(len / RECORD_SIZE as u64)
    }

    /// Appends `record` as a new slot.
    ///
    /// The record must be live and its id must be the next free slot number,
    /// which is what [`next_identifier`](Self::next_identifier) returns as long
    /// as every id it hands out is inserted in order. Uniqueness of the SSN is
    /// the caller's concern.
    ///
    /// A partial block at the end of the file (left by an interrupted write)
    /// is truncated away before the append, so the new record lands in its
    /// own slot.
    ///
    /// If the append fails on I/O and `record.id` is the id most recently
    /// handed out, the counter is wound back so the same id is reserved
    /// again.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Tombstoned`] if `record.is_deleted` is set.
    /// - [`StoreError::OutOfOrder`] if `record.id` is not the next slot.
    /// - [`StoreError::Record`] if the record cannot be encoded.
    /// - [`StoreError::Io`] on any I/O failure.
    pub fn insert(&mut self, record: &Employee) -> Result<(), StoreError> {
        if record.is_deleted {
            return Err(StoreError::Tombstoned(record.id));
        }
        let block = record.encode()?;

        match self.append(record.id, &block) {
            Ok(()) => {
                self.next_id = self.next_id.max(u64::from(record.id) + 1);
                debug!(id = record.id, "inserted record");
                Ok(())
            }
            Err(StoreError::Io(e)) => {
                if u64::from(record.id) + 1 == self.next_id {
                    self.next_id = u64::from(record.id);
                    debug!(id = record.id, "insert failed, id released");
                }
                Err(StoreError::Io(e))
            }
            Err(e) => Err(e),
        }
    }

    fn append(&self, id: u32, block: &[u8; RECORD_SIZE]) -> Result<(), StoreError> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let len = file.metadata()?.len();
        let tail = len % RECORD_SIZE as u64;
        let expected = (len - tail) / RECORD_SIZE as u64 + 1;
        if u64::from(id) != expected {
            return Err(StoreError::OutOfOrder { expected, got: id });
        }

        if tail != 0 {
            warn!(path = %self.path.display(), len, tail, "dropping partial trailing block");
            file.set_len(len - tail)?;
        }

        file.write_all(block)?;
        file.flush()?;
        if self.options.sync {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Every slot in file order, tombstones included.
    pub fn scan(&self) -> Result<Records, StoreError> {
        Records::open(&self.path)
    }

    /// Live records in file order, which is ascending id order.
    ///
    /// Each call opens a fresh handle, so the sequence can be restarted by
    /// calling again.
    pub fn scan_live(&self) -> Result<LiveRecords, StoreError> {
        debug!(path = %self.path.display(), "scanning live records");
        Ok(LiveRecords::new(self.scan()?))
    }

    /// Tombstones the first live record with `id`.
    ///
    /// Scans from the start of the file; on a match only that slot's block is
    /// rewritten in place. Returns `Ok(false)` if no live record has `id`.
    pub fn mark_deleted(&self, id: u32) -> Result<bool, StoreError> {
        let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let mut buf = [0u8; RECORD_SIZE];
        let mut offset = 0u64;

        loop {
            let filled = read_block(&mut file, &mut buf)?;
            if filled < RECORD_SIZE {
                break;
            }

            let mut e = Employee::decode(&buf)?;
            if e.id == id && e.is_live() {
                e.is_deleted = true;
                file.seek(SeekFrom::Start(offset))?;
                file.write_all(&e.encode()?)?;
                file.flush()?;
                if self.options.sync {
                    file.sync_all()?;
                }
                info!(id, "tombstoned record");
                return Ok(true);
            }
            offset += RECORD_SIZE as u64;
        }

        debug!(id, "no live record to delete");
        Ok(false)
    }

    /// Reads the record stored in slot `id` by seeking straight to
    /// `(id - 1) * RECORD_SIZE`.
    ///
    /// The slot is returned whether or not it is tombstoned.
    ///
    /// # Errors
    ///
    /// - [`StoreError::SlotOutOfRange`] if `id` is 0 or past the last
    ///   complete slot.
    /// - [`StoreError::SlotMismatch`] if the slot holds a different id, which
    ///   means the positional invariant has been broken externally.
    pub fn read_by_slot(&self, id: u32) -> Result<Employee, StoreError> {
        if id == 0 {
            return Err(StoreError::SlotOutOfRange(id));
        }

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(slot_offset(id)))?;

        let mut buf = [0u8; RECORD_SIZE];
        let filled = read_block(&mut file, &mut buf)?;
        let e = match Employee::decode(&buf[..filled]) {
            Ok(e) => e,
            Err(RecordError::Truncated { .. }) => return Err(StoreError::SlotOutOfRange(id)),
            Err(e) => return Err(e.into()),
        };

        if e.id != id {
            return Err(StoreError::SlotMismatch {
                slot: id,
                found: e.id,
            });
        }
        Ok(e)
    }
}
