//! Persistence module split across logical submodules.

mod connection;
mod error;
mod students;

pub use connection::default_db_path;
pub use error::StoreError;
pub use students::StudentStore;
