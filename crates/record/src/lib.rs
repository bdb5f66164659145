//! # Record — fixed-width employee records
//!
//! Every employee occupies exactly one block of [`RECORD_SIZE`] bytes in the
//! store file. Blocks carry no header, footer or checksum; the Nth block
//! written is slot N forever.
//!
//! ## Block layout
//!
//! ```text
//! ┌────────┬──────────────┬─────────────┬──────────┬────────────┬──────────┬──────────────┐
//! │ id u32 │ first_name   │ last_name   │ ssn      │ salary f32 │ age i32  │ is_deleted u8│
//! │ 4      │ 21 (NUL pad) │ 21 (NUL pad)│ 12 (NUL) │ 4          │ 4        │ 1            │
//! └────────┴──────────────┴─────────────┴──────────┴────────────┴──────────┴──────────────┘
//! ```
//!
//! All integers are little-endian. Text fields hold at most
//! `capacity - 1` bytes and are padded with zeros to their capacity.
//!
//! ## Example
//! ```rust
//! use record::{Employee, RECORD_SIZE};
//!
//! let e = Employee::new(1, "Ada", "Lovelace", "123-45-6789", 5200.0, 36);
//! let block = e.encode().unwrap();
//! assert_eq!(block.len(), RECORD_SIZE);
//! assert_eq!(Employee::decode(&block).unwrap(), e);
//! ```

mod layout;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use thiserror::Error;

pub use layout::{
    AGE_OFFSET, DELETED_OFFSET, FIRST_NAME_CAPACITY, FIRST_NAME_OFFSET, ID_OFFSET,
    LAST_NAME_CAPACITY, LAST_NAME_OFFSET, NAME_MAX_LEN, RECORD_SIZE, SALARY_OFFSET, SSN_CAPACITY,
    SSN_LEN, SSN_OFFSET,
};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The block is shorter than [`RECORD_SIZE`], typically a partially
    /// flushed final write.
    #[error("truncated record: {len} of {} bytes", RECORD_SIZE)]
    Truncated { len: usize },
    #[error("malformed record: {0}")]
    Malformed(&'static str),
    #[error("{field} is {len} bytes, at most {max} fit")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("{0} contains a NUL byte")]
    EmbeddedNul(&'static str),
}

/// One employee as stored in a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// 1-based identifier, equal to the slot the record was appended into.
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    /// `DDD-DD-DDDD`; the codec only enforces the capacity.
    pub ssn: String,
    pub salary: f32,
    pub age: i32,
    /// Tombstone. Once set it is never cleared.
    pub is_deleted: bool,
}

impl Employee {
    /// Builds a live record.
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        ssn: impl Into<String>,
        salary: f32,
        age: i32,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ssn: ssn.into(),
            salary,
            age,
            is_deleted: false,
        }
    }

    /// Returns `true` if the tombstone flag is clear.
    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }

    /// Encodes the record into one fixed-size block.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::FieldTooLong`] or [`RecordError::EmbeddedNul`]
    /// if a text field cannot be represented in its fixed slot.
    pub fn encode(&self) -> Result<[u8; RECORD_SIZE], RecordError> {
        let mut block = [0u8; RECORD_SIZE];
        let mut w = &mut block[..];

        w.write_u32::<LittleEndian>(self.id)?;
        write_text(&mut w, "first_name", &self.first_name, FIRST_NAME_CAPACITY)?;
        write_text(&mut w, "last_name", &self.last_name, LAST_NAME_CAPACITY)?;
        write_text(&mut w, "ssn", &self.ssn, SSN_CAPACITY)?;
        w.write_f32::<LittleEndian>(self.salary)?;
        w.write_i32::<LittleEndian>(self.age)?;
        w.write_u8(u8::from(self.is_deleted))?;
        debug_assert!(w.is_empty());

        Ok(block)
    }

    /// Decodes one record from the front of `block`.
    ///
    /// Bytes past [`RECORD_SIZE`] are ignored.
    ///
    /// # Errors
    ///
    /// - [`RecordError::Truncated`] if `block` is shorter than a slot.
    /// - [`RecordError::Malformed`] if a text field is not UTF-8, has
    ///   non-zero padding, or the tombstone byte is not 0 or 1.
    pub fn decode(block: &[u8]) -> Result<Self, RecordError> {
        if block.len() < RECORD_SIZE {
            return Err(RecordError::Truncated { len: block.len() });
        }
        let mut r = &block[..RECORD_SIZE];

        let id = r.read_u32::<LittleEndian>()?;
        let first_name = read_text(&mut r, FIRST_NAME_CAPACITY)?;
        let last_name = read_text(&mut r, LAST_NAME_CAPACITY)?;
        let ssn = read_text(&mut r, SSN_CAPACITY)?;
        let salary = r.read_f32::<LittleEndian>()?;
        let age = r.read_i32::<LittleEndian>()?;
        let is_deleted = match r.read_u8()? {
            0 => false,
            1 => true,
            _ => return Err(RecordError::Malformed("tombstone byte")),
        };

        Ok(Self {
            id,
            first_name,
            last_name,
            ssn,
            salary,
            age,
            is_deleted,
        })
    }
}

fn write_text<W: Write>(
    w: &mut W,
    field: &'static str,
    value: &str,
    capacity: usize,
) -> Result<(), RecordError> {
    let bytes = value.as_bytes();
    // one byte is always left for the terminator
    if bytes.len() >= capacity {
        return Err(RecordError::FieldTooLong {
            field,
            len: bytes.len(),
            max: capacity - 1,
        });
    }
    if bytes.contains(&0) {
        return Err(RecordError::EmbeddedNul(field));
    }
    w.write_all(bytes)?;
    w.write_all(&vec![0u8; capacity - bytes.len()])?;
    Ok(())
}

fn read_text<R: Read>(r: &mut R, capacity: usize) -> Result<String, RecordError> {
    let mut buf = vec![0u8; capacity];
    r.read_exact(&mut buf)?;

    let end = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or(RecordError::Malformed("unterminated text field"))?;
    if buf[end..].iter().any(|&b| b != 0) {
        return Err(RecordError::Malformed("non-zero text padding"));
    }
    buf.truncate(end);

    String::from_utf8(buf).map_err(|_| RecordError::Malformed("text field is not utf-8"))
}
