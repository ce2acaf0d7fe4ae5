//! Response store: append-only persistence for fixed-schema survey
//! submissions, plus the read-only query surface over it.
//!
//! A submission is created exactly once. Nothing in this module (or the
//! crate) updates or deletes a stored row.

use crate::core::error::IntakeError;
use crate::core::schemas::ANSWER_COUNT;
use crate::core::store::Store;
use rusqlite::{OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};

/// One stored survey submission. `id` and `created_at` are assigned by the
/// store at insert time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: i64,
    pub created_at: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Answers to questions 1 through 16, positionally. The order is
    /// significant and identical across storage, JSON, and CSV.
    pub answers: [Option<String>; ANSWER_COUNT],
}

/// A submission as the caller hands it over, before the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub answers: [Option<String>; ANSWER_COUNT],
}

/// Canonical absent-value handling: an empty submitted field is stored as
/// NULL, never as an empty string.
pub fn canonical_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

const SELECT_COLUMNS: &str =
    "id, created_at, name, email, q1, q2, q3, q4, q5, q6, q7, q8, q9, q10, q11, q12, q13, q14, q15, q16";

fn row_to_response(row: &Row) -> rusqlite::Result<Response> {
    let mut answers: [Option<String>; ANSWER_COUNT] = Default::default();
    for (i, slot) in answers.iter_mut().enumerate() {
        *slot = row.get(4 + i)?;
    }
    Ok(Response {
        id: row.get(0)?,
        created_at: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        answers,
    })
}

/// Insert a new response and return its store-assigned id.
///
/// Each of the 16 answers lands in its own column; the row commits fully or
/// not at all (single-statement insert).
pub fn insert(store: &Store, draft: &ResponseDraft) -> Result<i64, IntakeError> {
    store.with_write(|conn| {
        conn.execute(
            "INSERT INTO responses (
                name, email,
                q1, q2, q3, q4, q5, q6, q7, q8,
                q9, q10, q11, q12, q13, q14, q15, q16
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                draft.name,
                draft.email,
                draft.answers[0],
                draft.answers[1],
                draft.answers[2],
                draft.answers[3],
                draft.answers[4],
                draft.answers[5],
                draft.answers[6],
                draft.answers[7],
                draft.answers[8],
                draft.answers[9],
                draft.answers[10],
                draft.answers[11],
                draft.answers[12],
                draft.answers[13],
                draft.answers[14],
                draft.answers[15],
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// All responses, most recent first. Same-second inserts fall back to id
/// order so the listing stays stable.
pub fn list_all(store: &Store) -> Result<Vec<Response>, IntakeError> {
    store.with_read(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM responses ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], row_to_response)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

/// Look up one response by id. A missing id is `NotFound`, distinguishable
/// from a storage failure.
pub fn get_by_id(store: &Store, id: i64) -> Result<Response, IntakeError> {
    let found = store.with_read(|conn| {
        let row = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM responses WHERE id = ?1"),
                params![id],
                row_to_response,
            )
            .optional()?;
        Ok(row)
    })?;
    found.ok_or_else(|| IntakeError::NotFound(format!("Response '{}' not found", id)))
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "responses",
        "version": "0.1.0",
        "description": "Append-only survey response ledger",
        "commands": [
            { "name": "submit", "parameters": ["name", "email", "q1..q16"] },
            { "name": "list" },
            { "name": "show", "parameters": ["id"] }
        ],
        "storage": ["intake.db"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_field_empty_becomes_none() {
        assert_eq!(canonical_field(Some(String::new())), None);
        assert_eq!(canonical_field(None), None);
    }

    #[test]
    fn test_canonical_field_keeps_content() {
        assert_eq!(
            canonical_field(Some("  spaced  ".to_string())),
            Some("  spaced  ".to_string())
        );
        assert_eq!(canonical_field(Some("a".to_string())), Some("a".to_string()));
    }
}
