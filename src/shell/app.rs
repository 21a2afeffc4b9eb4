use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::db::{StoreError, StudentStore};
use crate::models::Student;

use super::helpers::{surface_error, StatusKind};
use super::input::Tokens;
use super::menu::{MenuChoice, SearchChoice, MAIN_MENU, SEARCH_MENU};

/// Where the menu loop currently is. `Exited` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    MenuDisplayed,
    AwaitingChoice,
    Dispatching(MenuChoice),
    Exited,
}

/// Outcome of prompting for one field.
enum Field<T> {
    Value(T),
    Invalid(String),
    EndOfInput,
}

/// Unwrap a [`Field`] inside a handler, turning the other outcomes into the
/// next state.
macro_rules! field {
    ($self:ident, $read:expr) => {
        match $read {
            Field::Value(value) => value,
            Field::Invalid(token) => return $self.reject_number(&token),
            Field::EndOfInput => return $self.exit(),
        }
    };
}

/// Line-oriented menu over a [`StudentStore`]. Input and output are generic so
/// the same loop drives stdin/stdout and in-memory buffers.
pub struct Shell<'a, R, W> {
    store: &'a StudentStore,
    tokens: Tokens<R>,
    out: W,
    colored: bool,
    state: State,
    last_listing: Vec<Student>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a StudentStore, input: R, out: W) -> Self {
        Self {
            store,
            tokens: Tokens::new(input),
            out,
            colored: false,
            state: State::MenuDisplayed,
            last_listing: Vec::new(),
        }
    }

    /// Colour success lines green and failures red.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Rows returned by the most recent "print all students" action.
    pub fn last_listing(&self) -> &[Student] {
        &self.last_listing
    }

    /// Hand back the output sink, e.g. to inspect a buffered session.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the banner and run the menu until the user picks Exit or input
    /// runs dry. Storage failures are reported and the loop carries on; only
    /// I/O errors on the terminal itself end the session early.
    pub fn run(&mut self) -> Result<()> {
        self.line("Welcome to Student Management System")?;
        self.line("Press the option number to perform the action")?;

        loop {
            self.state = match self.state {
                State::MenuDisplayed => {
                    self.lines(MAIN_MENU)?;
                    State::AwaitingChoice
                }
                State::AwaitingChoice => self.await_choice()?,
                State::Dispatching(choice) => {
                    debug!(?choice, "dispatching menu choice");
                    self.dispatch(choice)?
                }
                State::Exited => break,
            };
        }

        self.out.flush().context("failed to flush output")
    }

    fn await_choice(&mut self) -> Result<State> {
        let Some(token) = self.prompt_token("Enter your choice: ")? else {
            return self.exit();
        };

        match MenuChoice::from_token(&token) {
            Some(choice) => Ok(State::Dispatching(choice)),
            None => {
                debug!(%token, "rejected menu choice");
                self.status("Invalid choice. Please try again.", StatusKind::Error)?;
                Ok(State::AwaitingChoice)
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<State> {
        match choice {
            MenuChoice::Add => self.add_student(),
            MenuChoice::Delete => self.delete_student(),
            MenuChoice::Update => self.update_student(),
            MenuChoice::Search => self.search_student(),
            MenuChoice::List => self.print_students(),
            MenuChoice::Exit => self.exit(),
        }
    }

    fn add_student(&mut self) -> Result<State> {
        let name = field!(self, self.read_text("Enter student name: ")?);
        let age = field!(self, self.read_int("Enter student age: ")?);
        let id = field!(self, self.read_int("Enter student id: ")?);

        match self.store.add(&Student::new(name, age, id)) {
            Ok(()) => self.status("Student added successfully.", StatusKind::Info)?,
            Err(err) => self.storage_error("adding student", &err)?,
        }
        Ok(State::MenuDisplayed)
    }

    fn delete_student(&mut self) -> Result<State> {
        let name = field!(self, self.read_text("Enter student name to delete: ")?);

        match self.store.delete(&name) {
            Ok(0) => self.not_found()?,
            Ok(_) => self.status("Student deleted successfully.", StatusKind::Info)?,
            Err(err) => self.storage_error("deleting student", &err)?,
        }
        Ok(State::MenuDisplayed)
    }

    fn update_student(&mut self) -> Result<State> {
        let old_name = field!(self, self.read_text("Enter student name to update: ")?);
        let new_name = field!(self, self.read_text("Enter new name: ")?);
        let new_age = field!(self, self.read_int("Enter new age: ")?);
        let new_id = field!(self, self.read_int("Enter new id: ")?);

        let replacement = Student::new(new_name, new_age, new_id);
        match self.store.update(&old_name, &replacement) {
            Ok(0) => self.not_found()?,
            Ok(_) => self.status("Student updated successfully.", StatusKind::Info)?,
            Err(err) => self.storage_error("updating student", &err)?,
        }
        Ok(State::MenuDisplayed)
    }

    fn search_student(&mut self) -> Result<State> {
        self.lines(SEARCH_MENU)?;
        let Some(token) = self.prompt_token("Enter search option: ")? else {
            return self.exit();
        };

        let found = match SearchChoice::from_token(&token) {
            Some(SearchChoice::ByName) => {
                let name = field!(self, self.read_text("Enter student name to search: ")?);
                self.store
                    .find_by_name(&name)
                    .map_err(|err| ("searching student by name", err))
            }
            Some(SearchChoice::ById) => {
                let id = field!(self, self.read_int("Enter student ID to search: ")?);
                self.store
                    .find_by_id(id)
                    .map_err(|err| ("searching student by ID", err))
            }
            None => {
                debug!(%token, "rejected search option");
                self.status("Invalid search option. Please try again.", StatusKind::Error)?;
                return Ok(State::MenuDisplayed);
            }
        };

        match found {
            Ok(Some(student)) => {
                let message = format!("Student found: {}", student.summary());
                self.status(&message, StatusKind::Info)?;
            }
            Ok(None) => self.not_found()?,
            Err((action, err)) => self.storage_error(action, &err)?,
        }
        Ok(State::MenuDisplayed)
    }

    fn print_students(&mut self) -> Result<State> {
        match self.store.list_all() {
            Ok(students) => {
                self.last_listing = students;
                if self.last_listing.is_empty() {
                    self.line("No students found.")?;
                }
                for student in &self.last_listing {
                    writeln!(self.out, "{student}").context("failed to write listing")?;
                }
            }
            Err(err) => self.storage_error("fetching students", &err)?,
        }
        Ok(State::MenuDisplayed)
    }

    fn exit(&mut self) -> Result<State> {
        self.line("Exiting...")?;
        Ok(State::Exited)
    }

    fn reject_number(&mut self, token: &str) -> Result<State> {
        let message = format!("Invalid number: {token}");
        self.status(&message, StatusKind::Error)?;
        Ok(State::MenuDisplayed)
    }

    fn not_found(&mut self) -> Result<()> {
        self.status("Student not found.", StatusKind::Info)
    }

    fn storage_error(&mut self, action: &str, err: &StoreError) -> Result<()> {
        let message = format!("Error {action}: {}", surface_error(err));
        self.status(&message, StatusKind::Error)
    }

    fn read_text(&mut self, prompt: &str) -> Result<Field<String>> {
        Ok(match self.prompt_token(prompt)? {
            Some(token) => Field::Value(token),
            None => Field::EndOfInput,
        })
    }

    fn read_int(&mut self, prompt: &str) -> Result<Field<i64>> {
        Ok(match self.prompt_token(prompt)? {
            Some(token) => match token.parse() {
                Ok(value) => Field::Value(value),
                Err(_) => Field::Invalid(token),
            },
            None => Field::EndOfInput,
        })
    }

    fn prompt_token(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}").context("failed to write prompt")?;
        self.out.flush().context("failed to flush prompt")?;
        self.tokens.next_token().context("failed to read input")
    }

    fn status(&mut self, text: &str, kind: StatusKind) -> Result<()> {
        let painted = kind.paint(text, self.colored);
        self.line(&painted)
    }

    fn lines(&mut self, lines: &[&str]) -> Result<()> {
        for line in lines {
            self.line(line)?;
        }
        Ok(())
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}").context("failed to write output")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(store: &StudentStore, input: &str) -> String {
        let mut shell = Shell::new(store, Cursor::new(input.to_owned()), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn invalid_choice_reprompts_without_redrawing_menu() {
        let store = StudentStore::in_memory().unwrap();
        let output = session(&store, "9\n6\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches("1. Add student").count(), 1);
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let store = StudentStore::in_memory().unwrap();
        let output = session(&store, "1 Alice\n");

        assert!(output.contains("Enter student age: "));
        assert!(output.ends_with("Exiting...\n"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn non_numeric_age_returns_to_menu() {
        let store = StudentStore::in_memory().unwrap();
        let output = session(&store, "1 Alice twenty\n5\n6\n");

        assert!(output.contains("Invalid number: twenty"));
        assert!(output.contains("No students found."));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn invalid_search_option_is_rejected() {
        let store = StudentStore::in_memory().unwrap();
        let output = session(&store, "4\n3\n6\n");

        assert!(output.contains("Search by:"));
        assert!(output.contains("Invalid search option. Please try again."));
    }

    #[test]
    fn listing_is_retained() {
        let store = StudentStore::in_memory().unwrap();
        store.add(&Student::new("Alice", 20, 1)).unwrap();

        let mut shell = Shell::new(&store, Cursor::new("5\n6\n"), Vec::new());
        shell.run().unwrap();
        assert_eq!(shell.last_listing(), [Student::new("Alice", 20, 1)]);
    }
}
