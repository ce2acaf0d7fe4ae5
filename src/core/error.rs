use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntakeError {
    /// True for the "no such record" outcome, as opposed to the storage
    /// failure class (`Sqlite`/`Io`/`Storage`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, IntakeError::NotFound(_))
    }
}
