//! # Store — append-only employee slot file
//!
//! The store is a flat file of fixed-size [`record::Employee`] blocks written
//! in creation order. There is no header, footer or checksum.
//!
//! ## Positional invariant
//!
//! A record's `id` equals its 1-based slot number:
//!
//! ```text
//! offset(id) = (id - 1) * RECORD_SIZE
//! ```
//!
//! This holds because slots are only ever appended (never removed or
//! reordered), deletion only flips the tombstone byte in place, and ids come
//! from a counter that starts at 1 and never skips. [`RecordStore::insert`]
//! checks the invariant before every append and
//! [`RecordStore::read_by_slot`] verifies it on every positional read.
//!
//! ## File handles
//!
//! No handle is held between calls. Each operation opens the file, does its
//! work and drops the handle on every exit path.

mod scan;
mod store;

use record::RecordError;
use std::io;
use thiserror::Error;

pub use scan::{LiveRecords, Records};
pub use store::{RecordStore, StoreOptions};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("record error: {0}")]
    Record(#[from] RecordError),
    /// Appending this record would put it in a slot other than `id`.
    #[error("record {got} is out of order, the next free slot is {expected}")]
    OutOfOrder { expected: u64, got: u32 },
    #[error("record {0} is already tombstoned")]
    Tombstoned(u32),
    #[error("record ids are exhausted")]
    IdsExhausted,
    #[error("no record in slot {0}")]
    SlotOutOfRange(u32),
    #[error("slot {slot} holds record {found}")]
    SlotMismatch { slot: u32, found: u32 },
}
