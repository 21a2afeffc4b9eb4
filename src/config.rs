//! Runtime configuration. Values come from command-line flags, falling back to
//! environment variables (optionally loaded from a `.env` file) and finally to
//! built-in defaults. No connection detail is compiled into the binary.

use std::path::PathBuf;

use clap::Parser;
use dotenvy::dotenv;

use crate::db::{default_db_path, StoreError};

#[derive(Debug, Clone, Parser)]
#[command(name = "student-records")]
#[command(about = "Menu-driven manager for a table of student records")]
pub struct Config {
    /// SQLite database file, or `:memory:` for a throwaway session. Defaults to
    /// `~/.student-records/students.sqlite`.
    #[arg(long, env = "STUDENT_DB", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "STUDENT_LOG", default_value = "warn", value_name = "FILTER")]
    pub log_level: String,

    /// Disable coloured status lines.
    #[arg(long)]
    pub plain: bool,
}

impl Config {
    /// Load `.env` if present, then parse the process arguments.
    pub fn load() -> Self {
        let _ = dotenv();
        Self::parse()
    }

    /// Database location after applying the home-directory default.
    pub fn database_path(&self) -> Result<PathBuf, StoreError> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => default_db_path(),
        }
    }
}
