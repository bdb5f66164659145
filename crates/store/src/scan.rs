use record::{Employee, RecordError, RECORD_SIZE};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::warn;

use crate::StoreError;

/// Reads up to one block into `buf`, returning how many bytes were filled.
///
/// Less than `RECORD_SIZE` means end of file was reached mid-block.
pub(crate) fn read_block<R: Read>(r: &mut R, buf: &mut [u8; RECORD_SIZE]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < RECORD_SIZE {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Iterator over every slot in file order, tombstones included.
///
/// A trailing partial block ends the iteration without an error. Any other
/// decode failure is yielded once and then the iterator is exhausted.
pub struct Records {
    rdr: BufReader<File>,
    buf: [u8; RECORD_SIZE],
    slot: u64,
    done: bool,
}

impl Records {
    pub(crate) fn open(path: &Path) -> Result<Self, StoreError> {
        let f = File::open(path)?;
        Ok(Self {
            rdr: BufReader::new(f),
            buf: [0u8; RECORD_SIZE],
            slot: 0,
            done: false,
        })
    }

    /// Number of complete slots read so far.
    pub fn slots_read(&self) -> u64 {
        self.slot
    }
}

impl Iterator for Records {
    type Item = Result<Employee, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let filled = match read_block(&mut self.rdr, &mut self.buf) {
            Ok(0) => {
                self.done = true;
                return None;
            }
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        };

        match Employee::decode(&self.buf[..filled]) {
            Ok(e) => {
                self.slot += 1;
                Some(Ok(e))
            }
            Err(RecordError::Truncated { len }) => {
                warn!(slot = self.slot + 1, len, "ignoring truncated trailing record");
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Iterator over live (non-tombstoned) records in ascending id order.
pub struct LiveRecords {
    inner: Records,
}

impl LiveRecords {
    pub(crate) fn new(inner: Records) -> Self {
        Self { inner }
    }
}

impl Iterator for LiveRecords {
    type Item = Result<Employee, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(e) if e.is_deleted => continue,
                other => return Some(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_block_reports_partial_fill() {
        let data = vec![1u8; RECORD_SIZE + 5];
        let mut cur = Cursor::new(data);
        let mut buf = [0u8; RECORD_SIZE];

        assert_eq!(read_block(&mut cur, &mut buf).unwrap(), RECORD_SIZE);
        assert_eq!(read_block(&mut cur, &mut buf).unwrap(), 5);
        assert_eq!(read_block(&mut cur, &mut buf).unwrap(), 0);
    }
}
