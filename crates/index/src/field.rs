use record::Employee;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Attribute that drives sorting and indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Salary,
    Age,
    LastName,
    Ssn,
}

/// How numeric fields are turned into keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Numbers compare as their decimal text (`"100.000000" < "9.000000"`).
    #[default]
    Text,
    /// Numbers compare by value.
    Numeric,
}

/// Comparison key produced from one record.
///
/// Keys from a single [`Field`] and [`KeyMode`] are always the same variant.
#[derive(Debug, Clone)]
pub enum FieldKey {
    Text(String),
    Number(f64),
}

impl Ord for FieldKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // byte-wise, the same as strcmp on the stored text
            (FieldKey::Text(a), FieldKey::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            (FieldKey::Number(a), FieldKey::Number(b)) => a.total_cmp(b),
            (FieldKey::Number(_), FieldKey::Text(_)) => Ordering::Less,
            (FieldKey::Text(_), FieldKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for FieldKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldKey {}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field {0:?}, expected 1-4 or salary, age, lastName, ssn")]
pub struct ParseFieldError(pub String);

impl Field {
    pub const ALL: [Field; 4] = [Field::Salary, Field::Age, Field::LastName, Field::Ssn];

    /// Menu selector, 1 through 4.
    pub fn selector(self) -> u8 {
        match self {
            Field::Salary => 1,
            Field::Age => 2,
            Field::LastName => 3,
            Field::Ssn => 4,
        }
    }

    /// Column name as used in queries.
    pub fn name(self) -> &'static str {
        match self {
            Field::Salary => "salary",
            Field::Age => "age",
            Field::LastName => "lastName",
            Field::Ssn => "ssn",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Salary => "Salary",
            Field::Age => "Age",
            Field::LastName => "Last Name",
            Field::Ssn => "SSN",
        }
    }

    /// Extracts this field's comparison key from `e`.
    ///
    /// In [`KeyMode::Text`] salary is rendered with six fractional digits and
    /// age as a plain integer, and the resulting strings are compared.
    pub fn key(self, e: &Employee, mode: KeyMode) -> FieldKey {
        match (self, mode) {
            (Field::Salary, KeyMode::Text) => FieldKey::Text(format!("{:.6}", e.salary)),
            (Field::Salary, KeyMode::Numeric) => FieldKey::Number(f64::from(e.salary)),
            (Field::Age, KeyMode::Text) => FieldKey::Text(e.age.to_string()),
            (Field::Age, KeyMode::Numeric) => FieldKey::Number(f64::from(e.age)),
            (Field::LastName, _) => FieldKey::Text(e.last_name.clone()),
            (Field::Ssn, _) => FieldKey::Text(e.ssn.clone()),
        }
    }

    /// Compares two records on this field by value.
    pub fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        self.key(a, KeyMode::Numeric).cmp(&self.key(b, KeyMode::Numeric))
    }

    /// `"Age: 30"`, `"Salary: $5200"` and so on.
    pub fn render(self, e: &Employee) -> String {
        match self {
            Field::Salary => format!("{}: ${}", self.label(), e.salary),
            Field::Age => format!("{}: {}", self.label(), e.age),
            Field::LastName => format!("{}: {}", self.label(), e.last_name),
            Field::Ssn => format!("{}: {}", self.label(), e.ssn),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Field {
    type Error = ParseFieldError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        Field::ALL
            .into_iter()
            .find(|f| f.selector() == selector)
            .ok_or_else(|| ParseFieldError(selector.to_string()))
    }
}

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Field::try_from(n);
        }
        Field::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp() -> Employee {
        Employee::new(4, "Ada", "Lovelace", "123-45-6789", 5200.5, 36)
    }

    #[test]
    fn text_keys() {
        let e = emp();
        assert_eq!(
            Field::Salary.key(&e, KeyMode::Text),
            FieldKey::Text("5200.500000".into())
        );
        assert_eq!(Field::Age.key(&e, KeyMode::Text), FieldKey::Text("36".into()));
        assert_eq!(
            Field::LastName.key(&e, KeyMode::Text),
            FieldKey::Text("Lovelace".into())
        );
        assert_eq!(
            Field::Ssn.key(&e, KeyMode::Numeric),
            FieldKey::Text("123-45-6789".into())
        );
    }

    #[test]
    fn text_mode_orders_numbers_as_text() {
        let mut a = emp();
        let mut b = emp();
        a.age = 9;
        b.age = 10;
        assert!(Field::Age.key(&a, KeyMode::Text) > Field::Age.key(&b, KeyMode::Text));
        assert!(Field::Age.key(&a, KeyMode::Numeric) < Field::Age.key(&b, KeyMode::Numeric));
        assert_eq!(Field::Age.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn text_compares_bytewise() {
        // uppercase sorts before lowercase
        assert!(FieldKey::Text("Zed".into()) < FieldKey::Text("adams".into()));
    }

    #[test]
    fn render_fields() {
        let e = emp();
        assert_eq!(Field::Salary.render(&e), "Salary: $5200.5");
        assert_eq!(Field::Age.render(&e), "Age: 36");
        assert_eq!(Field::LastName.render(&e), "Last Name: Lovelace");
        assert_eq!(Field::Ssn.render(&e), "SSN: 123-45-6789");
    }

    #[test]
    fn parse_selectors_and_names() {
        assert_eq!("1".parse::<Field>().unwrap(), Field::Salary);
        assert_eq!(" 4 ".parse::<Field>().unwrap(), Field::Ssn);
        assert_eq!("lastname".parse::<Field>().unwrap(), Field::LastName);
        assert_eq!("AGE".parse::<Field>().unwrap(), Field::Age);
        assert_eq!(Field::try_from(3).unwrap(), Field::LastName);

        assert!("5".parse::<Field>().is_err());
        assert_eq!(
            "firstName".parse::<Field>().unwrap_err(),
            ParseFieldError("firstName".into())
        );
    }
}
