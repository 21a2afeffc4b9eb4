use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;
use tracing::debug;

use super::error::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-records";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "students.sqlite";
/// Path value that selects a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Open (or create) the database at `path` and make sure the `students` table
/// exists. Parent directories are created on demand so a fresh install works
/// without any manual setup.
pub fn open_database(path: &Path) -> Result<Connection, StoreError> {
    if path == Path::new(IN_MEMORY) {
        return open_in_memory();
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "opened student database");

    ensure_schema(&conn)?;
    Ok(conn)
}

/// Open a private in-memory database with the schema applied.
pub fn open_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
        path: PathBuf::from(IN_MEMORY),
        source,
    })?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the single `students` table. Neither `name` nor `id` carries a
/// uniqueness constraint: duplicate rows are accepted and update/delete act on
/// every row that shares the name.
pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS students (
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            id INTEGER NOT NULL
        )",
        [],
    )
    .map_err(StoreError::Schema)?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::NoHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
