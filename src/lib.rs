//! Core library surface for the student records manager.
//!
//! The persistence layer returns plain values and errors; the shell decides how
//! to present them. The `bin` target wires configuration, logging, the store
//! and the shell together.
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod shell;

pub use config::Config;

/// Persistence entry points used by `main.rs` and the tests.
pub use db::{StoreError, StudentStore};

/// The single domain type.
pub use models::Student;

/// The interactive menu loop.
pub use shell::Shell;
