//! Text rendering for records shown at the terminal.

use record::Employee;
use std::fmt;

/// Separator printed after each full record.
pub const RULE: &str = "------------------------";

/// Multi-line view of one employee.
///
/// Salary is printed in the shortest form that reads back to the same `f32`
/// (`1234567.5`), not rounded to six significant digits (`1.23457e+06`).
pub struct Card<'a>(pub &'a Employee);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.0;
        writeln!(f, "ID: {}", e.id)?;
        writeln!(f, "Name: {} {}", e.first_name, e.last_name)?;
        writeln!(f, "SSN: {}", e.ssn)?;
        writeln!(f, "Salary: ${}", e.salary)?;
        write!(f, "Age: {}", e.age)
    }
}
