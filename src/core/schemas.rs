//! Database schema definition for the response store.
//!
//! One denormalized table, one row per submission, one column per answer.
//! The question count is fixed at design time, so flattening the answers
//! into columns avoids join complexity for a write-once, read-mostly
//! workload.

/// Number of survey questions. One answer column per question; every
/// surface (storage, JSON, CSV) carries exactly this many answer slots.
pub const ANSWER_COUNT: usize = 16;

pub const RESPONSES_DB_NAME: &str = "intake.db";

/// `id` and `created_at` are store-assigned: the autoincrement key and the
/// default timestamp are the only fields the caller never supplies.
pub const RESPONSES_DB_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS responses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP,
        name TEXT,
        email TEXT,
        q1 TEXT,
        q2 TEXT,
        q3 TEXT,
        q4 TEXT,
        q5 TEXT,
        q6 TEXT,
        q7 TEXT,
        q8 TEXT,
        q9 TEXT,
        q10 TEXT,
        q11 TEXT,
        q12 TEXT,
        q13 TEXT,
        q14 TEXT,
        q15 TEXT,
        q16 TEXT
    )
";
