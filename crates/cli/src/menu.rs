//! Line-oriented interactive menu over an [`Engine`].

use anyhow::Result;
use index::{Field, SortOrder};
use std::io::{BufRead, Write};
use tracing::error;

use crate::engine::{Engine, IndexOutcome, SearchOutcome};
use crate::input::{self, NewEmployee};
use crate::query::QueryRow;
use crate::render::{Card, RULE};

const MENU: &str = "\nEmployee Database System\n\
1. Add Employee\n\
2. Display Employees\n\
3. Delete Employee\n\
4. Index Records\n\
5. Search by SSN\n\
6. Run Query\n\
7. Exit\n";

/// Whether the session continues after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive session reading commands from `input` and writing to `out`.
///
/// End of input is treated like choosing Exit.
pub struct Menu<'a, R, W> {
    engine: &'a mut Engine,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(engine: &'a mut Engine, input: R, out: W) -> Self {
        Self { engine, input, out }
    }

    /// Runs until Exit or end of input.
    ///
    /// Failures of a single command are printed and the loop continues; only
    /// errors writing to `out` or reading `input` end the session.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.add(),
                "2" => self.display(),
                "3" => self.delete(),
                "4" => self.index(),
                "5" => self.search(),
                "6" => self.query(),
                "7" => Ok(Flow::Exit),
                _ => {
                    writeln!(self.out, "Invalid choice!")?;
                    Ok(Flow::Continue)
                }
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) => {
                    error!(error = %e, "command failed");
                    writeln!(self.out, "Error: {e}")?;
                }
            }
        }
    }

    /// Prints `msg` and reads one line without its terminator.
    fn prompt(&mut self, msg: &str) -> Result<Option<String>> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-prompts until `parse` accepts the line. `None` at end of input.
    fn prompt_until<T, E: std::fmt::Display>(
        &mut self,
        msg: &str,
        mut parse: impl FnMut(&mut Self, &str) -> Result<std::result::Result<T, E>>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(msg)? else {
                return Ok(None);
            };
            match parse(self, &line)? {
                Ok(v) => return Ok(Some(v)),
                Err(e) => writeln!(self.out, "{e}. Please try again.")?,
            }
        }
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(first_name) = self.prompt_until("Enter First Name (max 20 chars): ", |_, s| {
            Ok(input::validate_name("first name", s).map(|_| s.to_string()))
        })?
        else {
            return Ok(Flow::Exit);
        };
        let Some(last_name) = self.prompt_until("Enter Last Name (max 20 chars): ", |_, s| {
            Ok(input::validate_name("last name", s).map(|_| s.to_string()))
        })?
        else {
            return Ok(Flow::Exit);
        };
        let Some(ssn) = self.prompt_until("Enter SSN (format XXX-XX-XXXX): ", |menu, s| {
            if let Err(e) = input::validate_ssn(s) {
                return Ok(Err(e));
            }
            if menu.engine.ssn_in_use(s)? {
                return Ok(Err(input::InputError::DuplicateSsn(s.to_string())));
            }
            Ok(Ok(s.to_string()))
        })?
        else {
            return Ok(Flow::Exit);
        };
        let Some(salary) =
            self.prompt_until("Enter Salary: ", |_, s| Ok(input::parse_salary(s)))?
        else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.prompt_until("Enter Age: ", |_, s| Ok(input::parse_age(s)))? else {
            return Ok(Flow::Exit);
        };

        let id = self
            .engine
            .add_employee(NewEmployee::new(first_name, last_name, ssn, salary, age))?;
        writeln!(self.out, "Employee added successfully. ID: {id}")?;
        Ok(Flow::Continue)
    }

    fn display(&mut self) -> Result<Flow> {
        let all = self.engine.list_employees(None)?;
        if all.is_empty() {
            writeln!(self.out, "No employees to display.")?;
        }
        for e in &all {
            writeln!(self.out, "{}\n{RULE}", Card(e))?;
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_until("Enter Employee ID to delete: ", |_, s| {
            Ok(s.trim().parse::<u32>())
        })?
        else {
            return Ok(Flow::Exit);
        };

        if self.engine.mark_deleted(id)? {
            writeln!(self.out, "Employee deleted successfully.")?;
        } else {
            writeln!(self.out, "Employee not found or already deleted.")?;
        }
        Ok(Flow::Continue)
    }

    fn index(&mut self) -> Result<Flow> {
        let Some(field) = self.prompt_until(
            "Field to index (1=Salary, 2=Age, 3=LastName, 4=SSN): ",
            |_, s| Ok(s.parse::<Field>()),
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(order) = self.prompt_until(
            "Sort order (0=Descending, 1=Ascending): ",
            |_, s| {
                Ok(match s.trim() {
                    "1" => Ok(SortOrder::Ascending),
                    "0" => Ok(SortOrder::Descending),
                    other => Err(format!("invalid sort order {other:?}")),
                })
            },
        )?
        else {
            return Ok(Flow::Exit);
        };

        match self.engine.index_by_field(field, order)? {
            IndexOutcome::Empty => writeln!(self.out, "No employees to index.")?,
            IndexOutcome::Sorted { field, order, rows } => {
                let dir = if order.is_ascending() {
                    "ascending"
                } else {
                    "descending"
                };
                writeln!(self.out, "Employees indexed by {field} ({dir}):")?;
                for row in rows {
                    writeln!(self.out, "{row}")?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(ssn) = self.prompt("Enter SSN to search (XXX-XX-XXXX): ")? else {
            return Ok(Flow::Exit);
        };

        match self.engine.search_by_ssn(&ssn)? {
            SearchOutcome::Empty => writeln!(self.out, "No employees to search.")?,
            SearchOutcome::NotFound => writeln!(self.out, "Employee with SSN {ssn} not found.")?,
            SearchOutcome::Found(e) => writeln!(self.out, "Employee found:\n{}", Card(&e))?,
        }
        Ok(Flow::Continue)
    }

    fn query(&mut self) -> Result<Flow> {
        let Some(text) = self.prompt("Enter query: ")? else {
            return Ok(Flow::Exit);
        };

        let rows = self.engine.run_query(&text)?;
        if rows.is_empty() {
            writeln!(self.out, "No matching records found.")?;
        }
        for row in rows {
            match row {
                QueryRow::Record(e) => writeln!(self.out, "{}\n{RULE}", Card(&e))?,
                QueryRow::Value(v) => writeln!(self.out, "{v}")?,
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn session(engine: &mut Engine, script: &str) -> String {
        let mut out = Vec::new();
        Menu::new(engine, Cursor::new(script.as_bytes()), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn engine(dir: &std::path::Path) -> Engine {
        Engine::open(&DbConfig::new(dir.join("employees.dat"))).unwrap()
    }

    #[test]
    fn add_display_and_exit() {
        let dir = tempdir().unwrap();
        let mut db = engine(dir.path());

        let out = session(
            &mut db,
            "1\nAda\nLovelace\nbad-ssn\n123-45-6789\nlots\n5200.5\n36\n2\n7\n",
        );
        assert!(out.contains("Please try again."));
        assert!(out.contains("Employee added successfully. ID: 1"));
        assert!(out.contains("Name: Ada Lovelace"));
        assert!(out.contains(RULE));
    }

    #[test]
    fn duplicate_ssn_is_reprompted() {
        let dir = tempdir().unwrap();
        let mut db = engine(dir.path());
        db.add_employee(NewEmployee::new("A", "B", "111-11-1111", 1.0, 1))
            .unwrap();

        let out = session(
            &mut db,
            "1\nC\nD\n111-11-1111\n222-22-2222\n2\n3\n7\n",
        );
        assert!(out.contains("already exists"));
        assert!(out.contains("Employee added successfully. ID: 2"));
    }

    #[test]
    fn delete_index_search_and_query() {
        let dir = tempdir().unwrap();
        let mut db = engine(dir.path());
        db.add_employee(NewEmployee::new("A", "Smith", "111-11-1111", 1.0, 30))
            .unwrap();
        db.add_employee(NewEmployee::new("B", "Jones", "222-22-2222", 2.0, 25))
            .unwrap();

        let out = session(
            &mut db,
            "4\n2\n1\n5\n222-22-2222\n5\n999-99-9999\n3\n1\n3\n1\n6\nSELECT lastName FROM employees\n8\n7\n",
        );
        assert!(out.contains("Employees indexed by Age (ascending):\nID: 2 - Age: 25\nID: 1 - Age: 30\n"));
        assert!(out.contains("Employee found:\nID: 2"));
        assert!(out.contains("Employee with SSN 999-99-9999 not found."));
        assert!(out.contains("Employee deleted successfully."));
        assert!(out.contains("Employee not found or already deleted."));
        assert!(out.contains("Jones\n"));
        assert!(!out.contains("Smith\n"));
        assert!(out.contains("Invalid choice!"));
    }

    #[test]
    fn empty_store_messages() {
        let dir = tempdir().unwrap();
        let mut db = engine(dir.path());

        let out = session(&mut db, "2\n4\n4\n1\n5\n111-11-1111\n6\nSELECT * FROM employees\n");
        assert!(out.contains("No employees to display."));
        assert!(out.contains("No employees to index."));
        assert!(out.contains("No employees to search."));
        assert!(out.contains("No matching records found."));
    }

    #[test]
    fn bad_query_reports_error_and_continues() {
        let dir = tempdir().unwrap();
        let mut db = engine(dir.path());

        let out = session(&mut db, "6\nUPDATE x\n7\n");
        assert!(out.contains("Error: invalid query format"));
    }
}
