//! Validation of user-supplied employee data.
//!
//! The store itself only enforces field capacities; the SSN pattern, name
//! lengths and SSN uniqueness among live records are checked here before a
//! record is built.

use record::{Employee, NAME_MAX_LEN, SSN_LEN};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid SSN {0:?}, expected DDD-DD-DDDD")]
    InvalidSsn(String),
    #[error("{field} is {len} characters, at most {} allowed", NAME_MAX_LEN)]
    NameTooLong { field: &'static str, len: usize },
    #[error("SSN {0} already exists in database")]
    DuplicateSsn(String),
    #[error("invalid {field} {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Returns `true` if `ssn` matches `DDD-DD-DDDD`.
pub fn is_valid_ssn(ssn: &str) -> bool {
    let b = ssn.as_bytes();
    b.len() == SSN_LEN
        && b.iter().enumerate().all(|(i, &c)| match i {
            3 | 6 => c == b'-',
            _ => c.is_ascii_digit(),
        })
}

pub fn validate_ssn(ssn: &str) -> Result<(), InputError> {
    if is_valid_ssn(ssn) {
        Ok(())
    } else {
        Err(InputError::InvalidSsn(ssn.to_string()))
    }
}

pub fn validate_name(field: &'static str, name: &str) -> Result<(), InputError> {
    let len = name.chars().count();
    if len > NAME_MAX_LEN || name.len() > NAME_MAX_LEN {
        return Err(InputError::NameTooLong { field, len });
    }
    Ok(())
}

pub fn parse_salary(value: &str) -> Result<f32, InputError> {
    value
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidNumber {
            field: "salary",
            value: value.to_string(),
        })
}

pub fn parse_age(value: &str) -> Result<i32, InputError> {
    value
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidNumber {
            field: "age",
            value: value.to_string(),
        })
}

/// An employee as entered, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,
    pub salary: f32,
    pub age: i32,
}

impl NewEmployee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        ssn: impl Into<String>,
        salary: f32,
        age: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ssn: ssn.into(),
            salary,
            age,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        validate_name("first name", &self.first_name)?;
        validate_name("last name", &self.last_name)?;
        validate_ssn(&self.ssn)
    }

    /// Builds the live record that will occupy slot `id`.
    pub fn into_record(self, id: u32) -> Employee {
        Employee::new(
            id,
            self.first_name,
            self.last_name,
            self.ssn,
            self.salary,
            self.age,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssn_pattern() {
        assert!(is_valid_ssn("123-45-6789"));
        assert!(is_valid_ssn("000-00-0000"));

        for bad in [
            "",
            "123456789",
            "123-45-678",
            "123-45-67890",
            "12-345-6789",
            "abc-de-fghi",
            "123 45 6789",
            "１23-45-6789",
        ] {
            assert!(!is_valid_ssn(bad), "{bad:?} should be rejected");
        }
        assert_eq!(
            validate_ssn("12-34"),
            Err(InputError::InvalidSsn("12-34".into()))
        );
    }

    #[test]
    fn name_length() {
        assert!(validate_name("first name", &"a".repeat(20)).is_ok());
        assert!(validate_name("first name", "").is_ok());
        assert_eq!(
            validate_name("last name", &"a".repeat(21)),
            Err(InputError::NameTooLong {
                field: "last name",
                len: 21
            })
        );
        // 10 chars but 20 bytes still fits, 11 two-byte chars does not
        assert!(validate_name("first name", &"é".repeat(10)).is_ok());
        assert!(validate_name("first name", &"é".repeat(11)).is_err());
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_salary(" 5200.5 ").unwrap(), 5200.5);
        assert_eq!(parse_age("41").unwrap(), 41);
        assert!(matches!(
            parse_age("forty"),
            Err(InputError::InvalidNumber { field: "age", .. })
        ));
        assert!(parse_salary("").is_err());
    }

    #[test]
    fn new_employee_to_record() {
        let n = NewEmployee::new("Ada", "Lovelace", "123-45-6789", 10.0, 36);
        assert!(n.validate().is_ok());
        let e = n.into_record(5);
        assert_eq!(e.id, 5);
        assert!(e.is_live());
        assert_eq!(e.ssn, "123-45-6789");
    }
}
