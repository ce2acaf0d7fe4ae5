//! Subsystems over the core store: response persistence and CSV export.

pub mod export;
pub mod responses;
