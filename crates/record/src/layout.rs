//! Slot layout constants.
//!
//! ```text
//! [id: u32][first_name: 21][last_name: 21][ssn: 12][salary: f32][age: i32][is_deleted: u8]
//! ```

/// Longest first or last name, in bytes.
pub const NAME_MAX_LEN: usize = 20;

/// Length of an SSN in `DDD-DD-DDDD` form.
pub const SSN_LEN: usize = 11;

pub const FIRST_NAME_CAPACITY: usize = NAME_MAX_LEN + 1;
pub const LAST_NAME_CAPACITY: usize = NAME_MAX_LEN + 1;
pub const SSN_CAPACITY: usize = SSN_LEN + 1;

pub const ID_OFFSET: usize = 0;
pub const FIRST_NAME_OFFSET: usize = ID_OFFSET + 4;
pub const LAST_NAME_OFFSET: usize = FIRST_NAME_OFFSET + FIRST_NAME_CAPACITY;
pub const SSN_OFFSET: usize = LAST_NAME_OFFSET + LAST_NAME_CAPACITY;
pub const SALARY_OFFSET: usize = SSN_OFFSET + SSN_CAPACITY;
pub const AGE_OFFSET: usize = SALARY_OFFSET + 4;
pub const DELETED_OFFSET: usize = AGE_OFFSET + 4;

/// Size of one slot in bytes (67).
pub const RECORD_SIZE: usize = DELETED_OFFSET + 1;
