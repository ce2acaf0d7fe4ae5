//! CSV export of stored responses.
//!
//! The column order is fixed and identical between the header row and every
//! data row, for bulk and single-record export alike. Output is plain CSV:
//! rows joined by a single newline, no trailing newline.

use crate::core::error::IntakeError;
use crate::core::schemas::ANSWER_COUNT;
use crate::core::store::Store;
use crate::plugins::responses::{self, Response};

/// Column labels, in emission order.
const CSV_HEADER: [&str; 4 + ANSWER_COUNT] = [
    "id", "created_at", "name", "email", "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9",
    "q10", "q11", "q12", "q13", "q14", "q15", "q16",
];

/// Escape one field: if it contains a double quote, comma, or newline, wrap
/// it in double quotes and double every internal quote. Anything else
/// passes through untouched.
fn escape_csv(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// NULL serializes to the empty string, not the word "null".
fn optional_field(value: Option<&str>) -> String {
    match value {
        Some(v) => escape_csv(v),
        None => String::new(),
    }
}

fn header_row() -> String {
    CSV_HEADER
        .iter()
        .map(|label| escape_csv(label))
        .collect::<Vec<_>>()
        .join(",")
}

fn data_row(r: &Response) -> String {
    let mut cells = Vec::with_capacity(CSV_HEADER.len());
    cells.push(escape_csv(&r.id.to_string()));
    cells.push(escape_csv(&r.created_at));
    cells.push(optional_field(r.name.as_deref()));
    cells.push(optional_field(r.email.as_deref()));
    for answer in &r.answers {
        cells.push(optional_field(answer.as_deref()));
    }
    cells.join(",")
}

/// Serialize many responses: one header row plus one row per record, in the
/// order given.
pub fn to_csv(rows: &[Response]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header_row());
    for r in rows {
        lines.push(data_row(r));
    }
    lines.join("\n")
}

/// Serialize exactly one response: header row plus one data row.
pub fn to_csv_single(row: &Response) -> String {
    format!("{}\n{}", header_row(), data_row(row))
}

/// Bulk export straight off the store, most recent first.
pub fn export_all(store: &Store) -> Result<String, IntakeError> {
    let rows = responses::list_all(store)?;
    Ok(to_csv(&rows))
}

/// Export a single stored response by id, or `NotFound`.
pub fn export_one(store: &Store, id: i64) -> Result<String, IntakeError> {
    let row = responses::get_by_id(store, id)?;
    Ok(to_csv_single(&row))
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "export",
        "version": "0.1.0",
        "description": "Deterministic CSV serialization of stored responses",
        "commands": [
            { "name": "export", "parameters": ["id (optional)"] }
        ],
        "storage": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_value_untouched() {
        assert_eq!(escape_csv("Alice"), "Alice");
    }

    #[test]
    fn test_escape_quote_comma_newline() {
        assert_eq!(
            escape_csv("He said \"hi\", and left\na note"),
            "\"He said \"\"hi\"\", and left\na note\""
        );
    }

    #[test]
    fn test_escape_single_reserved_characters() {
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(escape_csv("say \"so\""), "\"say \"\"so\"\"\"");
    }

    #[test]
    fn test_optional_field_null_is_empty() {
        assert_eq!(optional_field(None), "");
    }

    #[test]
    fn test_header_matches_column_order() {
        assert_eq!(
            header_row(),
            "id,created_at,name,email,q1,q2,q3,q4,q5,q6,q7,q8,q9,q10,q11,q12,q13,q14,q15,q16"
        );
    }

    #[test]
    fn test_to_csv_empty_store_is_header_only() {
        let out = to_csv(&[]);
        assert_eq!(out, header_row());
        assert!(!out.ends_with('\n'));
    }
}
