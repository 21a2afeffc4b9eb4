use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::connection::{open_database, open_in_memory};
use super::error::StoreError;
use crate::models::Student;

/// Owns the one live connection to the student database. Every method runs a
/// single parameterized statement; nothing is cached between calls. Failures
/// are returned to the caller, which decides how to report them, so they are
/// only traced at `debug`.
///
/// The connection is released when the store is dropped, so early returns and
/// panics cannot leak it. [`StudentStore::close`] exists for the normal exit
/// path where a failed close should still be reported.
#[derive(Debug)]
pub struct StudentStore {
    conn: Connection,
}

impl StudentStore {
    /// Open (or create) the on-disk database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = open_database(path)?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database, mostly useful in tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = open_in_memory()?;
        Ok(Self { conn })
    }

    /// Insert a new row. No duplicate check happens here; whether a repeated
    /// name or id is accepted is up to the schema.
    pub fn add(&self, student: &Student) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO students (name, age, id) VALUES (?1, ?2, ?3)",
                params![student.name, student.age, student.id],
            )
            .map_err(StoreError::query("insert student"))
            .inspect_err(|err| debug!(error = %err, name = %student.name, "insert failed"))?;

        debug!(name = %student.name, id = student.id, "student inserted");
        Ok(())
    }

    /// Overwrite name, age and id on every row whose name equals `old_name`.
    /// Returns the number of rows touched; zero means nobody matched.
    pub fn update(&self, old_name: &str, student: &Student) -> Result<usize, StoreError> {
        let updated = self
            .conn
            .execute(
                "UPDATE students SET name = ?1, age = ?2, id = ?3 WHERE name = ?4",
                params![student.name, student.age, student.id, old_name],
            )
            .map_err(StoreError::query("update student"))
            .inspect_err(|err| debug!(error = %err, old_name, "update failed"))?;

        debug!(old_name, new_name = %student.name, updated, "student update executed");
        Ok(updated)
    }

    /// Remove every row named `name`, returning how many went away.
    pub fn delete(&self, name: &str) -> Result<usize, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM students WHERE name = ?1", params![name])
            .map_err(StoreError::query("delete student"))
            .inspect_err(|err| debug!(error = %err, name, "delete failed"))?;

        debug!(name, deleted, "student delete executed");
        Ok(deleted)
    }

    /// First row whose name matches. Later matches are ignored.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Student>, StoreError> {
        self.conn
            .query_row(
                "SELECT name, age, id FROM students WHERE name = ?1",
                params![name],
                student_from_row,
            )
            .optional()
            .map_err(StoreError::query("search student by name"))
            .inspect_err(|err| debug!(error = %err, name, "search by name failed"))
    }

    /// First row whose id matches. Later matches are ignored.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Student>, StoreError> {
        self.conn
            .query_row(
                "SELECT name, age, id FROM students WHERE id = ?1",
                params![id],
                student_from_row,
            )
            .optional()
            .map_err(StoreError::query("search student by ID"))
            .inspect_err(|err| debug!(error = %err, id, "search by id failed"))
    }

    /// Every row in whatever order SQLite hands them back. Callers must not
    /// rely on a stable ordering.
    pub fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, age, id FROM students")
            .map_err(StoreError::query("prepare student listing"))?;

        let students = stmt
            .query_map([], student_from_row)
            .map_err(StoreError::query("fetch students"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::query("collect students"))
            .inspect_err(|err| debug!(error = %err, "listing failed"))?;

        debug!(count = students.len(), "students listed");
        Ok(students)
    }

    /// Release the connection, reporting any error SQLite raises while
    /// finalizing it.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn
            .close()
            .map_err(|(_, err)| StoreError::Close(err))?;
        debug!("student database closed");
        Ok(())
    }
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        name: row.get(0)?,
        age: row.get(1)?,
        id: row.get(2)?,
    })
}
