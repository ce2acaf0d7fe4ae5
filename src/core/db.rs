use crate::core::error::IntakeError;
use crate::core::schemas;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &str) -> Result<Connection, IntakeError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
    conn.execute("PRAGMA foreign_keys=ON;", [])?;
    Ok(conn)
}

pub fn responses_db_path(root: &Path) -> PathBuf {
    root.join(schemas::RESPONSES_DB_NAME)
}
