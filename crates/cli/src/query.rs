//! Ad-hoc queries over live records.
//!
//! ```text
//! SELECT <* | column> [FROM] <table> [WHERE <column> = <value>]
//! ```
//!
//! Columns are `firstName`, `lastName`, `ssn`, `salary` and `age`.
//! Keywords are case-insensitive, column names are not. String values may be
//! wrapped in single quotes. `salary` and `age` conditions compare by value.
//! Evaluation is a linear filter over the records it is given; there is only
//! one table, so its name is not checked.

use record::Employee;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid query format: {0}")]
    Syntax(&'static str),
    #[error("unknown column {0:?}")]
    UnknownColumn(String),
    #[error("invalid {column} value {value:?}")]
    InvalidValue { column: Column, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FirstName,
    LastName,
    Ssn,
    Salary,
    Age,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::FirstName => "firstName",
            Column::LastName => "lastName",
            Column::Ssn => "ssn",
            Column::Salary => "salary",
            Column::Age => "age",
        }
    }

    /// Salary uses the same shortest round-trip form as [`Card`](crate::render::Card).
    fn value_of(self, e: &Employee) -> String {
        match self {
            Column::FirstName => e.first_name.clone(),
            Column::LastName => e.last_name.clone(),
            Column::Ssn => e.ssn.clone(),
            Column::Salary => e.salary.to_string(),
            Column::Age => e.age.to_string(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => Ok(Column::FirstName),
            "lastName" => Ok(Column::LastName),
            "ssn" => Ok(Column::Ssn),
            "salary" => Ok(Column::Salary),
            "age" => Ok(Column::Age),
            _ => Err(QueryError::UnknownColumn(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    All,
    Column(Column),
}

/// `WHERE` clause with its value already parsed for the column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Text(Column, String),
    Salary(f32),
    Age(i32),
}

impl Condition {
    fn parse(column: Column, raw: &str) -> Result<Self, QueryError> {
        let invalid = || QueryError::InvalidValue {
            column,
            value: raw.to_string(),
        };
        match column {
            Column::Salary => raw.parse().map(Condition::Salary).map_err(|_| invalid()),
            Column::Age => raw.parse().map(Condition::Age).map_err(|_| invalid()),
            _ => Ok(Condition::Text(column, raw.to_string())),
        }
    }

    pub fn matches(&self, e: &Employee) -> bool {
        match self {
            Condition::Text(column, value) => column.value_of(e) == *value,
            Condition::Salary(v) => e.salary == *v,
            Condition::Age(v) => e.age == *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub selection: Selection,
    pub condition: Option<Condition>,
}

/// One result of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRow {
    Record(Employee),
    Value(String),
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(s)
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < 3 || !tokens[0].eq_ignore_ascii_case("SELECT") {
            return Err(QueryError::Syntax("expected SELECT <fields> <table>"));
        }

        let selection = match tokens[1] {
            "*" => Selection::All,
            name => Selection::Column(name.parse()?),
        };

        let mut rest = &tokens[2..];
        if rest[0].eq_ignore_ascii_case("FROM") {
            rest = &rest[1..];
        }
        let Some((_table, rest)) = rest.split_first() else {
            return Err(QueryError::Syntax("missing table name"));
        };

        let condition = match rest {
            [] => None,
            [kw, column, "=", value @ ..] if kw.eq_ignore_ascii_case("WHERE") && !value.is_empty() => {
                let column: Column = column.parse()?;
                let joined = value.join(" ");
                Some(Condition::parse(column, strip_quotes(&joined))?)
            }
            _ => return Err(QueryError::Syntax("expected WHERE <column> = <value>")),
        };

        Ok(Query {
            selection,
            condition,
        })
    }
}

impl Query {
    pub fn matches(&self, e: &Employee) -> bool {
        self.condition.as_ref().map_or(true, |c| c.matches(e))
    }

    pub fn project(&self, e: &Employee) -> QueryRow {
        match self.selection {
            Selection::All => QueryRow::Record(e.clone()),
            Selection::Column(c) => QueryRow::Value(c.value_of(e)),
        }
    }

    /// Filters and projects `records` in order.
    pub fn evaluate<'a, I>(&self, records: I) -> Vec<QueryRow>
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        records
            .into_iter()
            .filter(|e| self.matches(e))
            .map(|e| self.project(e))
            .collect()
    }
}
