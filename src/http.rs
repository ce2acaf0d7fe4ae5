//! HTTP transport over the response store.
//!
//! Thin composition layer: handlers wire the store, query surface, and CSV
//! codec to routes. Status-code mapping lives here and nowhere else — the
//! core never depends on HTTP semantics.

use crate::core::error::IntakeError;
use crate::core::store::Store;
use crate::plugins::export;
use crate::plugins::responses::{self, ResponseDraft, canonical_field};
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

/// Field names match the survey form inputs one-to-one.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    name: Option<String>,
    email: Option<String>,
    q1: Option<String>,
    q2: Option<String>,
    q3: Option<String>,
    q4: Option<String>,
    q5: Option<String>,
    q6: Option<String>,
    q7: Option<String>,
    q8: Option<String>,
    q9: Option<String>,
    q10: Option<String>,
    q11: Option<String>,
    q12: Option<String>,
    q13: Option<String>,
    q14: Option<String>,
    q15: Option<String>,
    q16: Option<String>,
}

impl SubmitForm {
    /// Canonicalize at the boundary: empty fields become NULL before the
    /// draft reaches the store.
    fn into_draft(self) -> ResponseDraft {
        ResponseDraft {
            name: canonical_field(self.name),
            email: canonical_field(self.email),
            answers: [
                canonical_field(self.q1),
                canonical_field(self.q2),
                canonical_field(self.q3),
                canonical_field(self.q4),
                canonical_field(self.q5),
                canonical_field(self.q6),
                canonical_field(self.q7),
                canonical_field(self.q8),
                canonical_field(self.q9),
                canonical_field(self.q10),
                canonical_field(self.q11),
                canonical_field(self.q12),
                canonical_field(self.q13),
                canonical_field(self.q14),
                canonical_field(self.q15),
                canonical_field(self.q16),
            ],
        }
    }
}

pub fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/submit", post(submit))
        .route("/api/responses", get(list_responses))
        .route("/api/responses/:id", get(get_response))
        .route("/export/csv", get(export_csv))
        .route("/export/csv/:id", get(export_csv_one))
        .with_state(store)
}

/// Bind and serve until the process is terminated.
pub async fn serve(store: Arc<Store>, bind: &str) -> Result<(), IntakeError> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|_| IntakeError::Config(format!("invalid bind address '{}'", bind)))?;
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("intake listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn submit(State(store): State<Arc<Store>>, Form(form): Form<SubmitForm>) -> Response {
    match responses::insert(&store, &form.into_draft()) {
        // Redirect with the new id so the client can link its own record.
        Ok(id) => Redirect::to(&format!("/thanks.html?id={id}")).into_response(),
        Err(err) => {
            eprintln!("Error inserting response: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again.",
            )
                .into_response()
        }
    }
}

async fn list_responses(State(store): State<Arc<Store>>) -> Response {
    match responses::list_all(&store) {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => {
            eprintln!("Error fetching responses: {err}");
            error_json(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch responses")
        }
    }
}

async fn get_response(State(store): State<Arc<Store>>, Path(id): Path<i64>) -> Response {
    match responses::get_by_id(&store, id) {
        Ok(row) => Json(row).into_response(),
        Err(err) if err.is_not_found() => error_json(StatusCode::NOT_FOUND, "Response not found"),
        Err(err) => {
            eprintln!("Error fetching response: {err}");
            error_json(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch response")
        }
    }
}

async fn export_csv(State(store): State<Arc<Store>>) -> Response {
    match export::export_all(&store) {
        Ok(csv) => csv_attachment("intake_responses.csv", csv),
        Err(err) => {
            eprintln!("Error exporting CSV: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export CSV").into_response()
        }
    }
}

async fn export_csv_one(State(store): State<Arc<Store>>, Path(id): Path<i64>) -> Response {
    match export::export_one(&store, id) {
        Ok(csv) => csv_attachment(&format!("intake_response_{id}.csv"), csv),
        Err(err) if err.is_not_found() => {
            (StatusCode::NOT_FOUND, "Response not found").into_response()
        }
        Err(err) => {
            eprintln!("Error exporting single CSV: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export CSV").into_response()
        }
    }
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn csv_attachment(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
