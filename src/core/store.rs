//! Store handle for the intake response database.
//!
//! A `Store` is an explicitly owned handle to one data directory. It is
//! passed by reference to whichever component needs it; there is no
//! process-global instance. Connections are opened fresh per operation and
//! close on drop, so acquisition is scoped and release is guaranteed.

use crate::core::db;
use crate::core::error::IntakeError;
use crate::core::schemas;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Handle to an intake data directory.
///
/// - Writes are serialized through a per-store mutex with a fresh connection.
/// - Reads create fresh connections without the mutex (WAL concurrent reads).
/// - Both paths use a busy timeout for cross-process contention.
pub struct Store {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl Store {
    /// Open a store rooted at `root`, creating the directory and the
    /// responses table if they do not exist yet. Idempotent.
    pub fn open(root: &Path) -> Result<Self, IntakeError> {
        fs::create_dir_all(root)?;
        let store = Self {
            root: root.to_path_buf(),
            write_lock: Mutex::new(()),
        };
        store.with_write(|conn| {
            conn.execute(schemas::RESPONSES_DB_SCHEMA, [])?;
            Ok(())
        })?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_path(&self) -> PathBuf {
        db::responses_db_path(&self.root)
    }

    /// Execute a closure with a write connection. Write access is
    /// serialized per store.
    pub fn with_write<F, R>(&self, f: F) -> Result<R, IntakeError>
    where
        F: FnOnce(&Connection) -> Result<R, IntakeError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| IntakeError::Storage("store write lock poisoned".to_string()))?;
        let conn = db::db_connect(&self.db_path().to_string_lossy())?;
        f(&conn)
    }

    /// Execute a closure with a read connection (no mutex serialization).
    pub fn with_read<F, R>(&self, f: F) -> Result<R, IntakeError>
    where
        F: FnOnce(&Connection) -> Result<R, IntakeError>,
    {
        let conn = db::db_connect(&self.db_path().to_string_lossy())?;
        f(&conn)
    }
}
