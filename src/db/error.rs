use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the persistence layer. Startup variants (`NoHomeDir`,
/// `CreateDir`, `Open`, `Schema`) are fatal to the binary; `Query` is reported
/// and the menu keeps running.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not locate home directory")]
    NoHomeDir,

    #[error("failed to create data directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open SQLite database {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create students table")]
    Schema(#[source] rusqlite::Error),

    #[error("failed to {action}")]
    Query {
        action: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to close database connection")]
    Close(#[source] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn query(action: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StoreError::Query { action, source }
    }
}
