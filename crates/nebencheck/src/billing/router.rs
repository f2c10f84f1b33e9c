//! HTTP surface for statement intake, lookup, recheck, and objections.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::billing::domain::{BillId, BillSubmission};
use crate::billing::repository::{BillRepository, RepositoryError};
use crate::billing::service::{BillCheckService, BillServiceError, ObjectionRequest};

/// Objection payload at the HTTP boundary. A missing letter date means
/// "today".
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ObjectionBody {
    pub(crate) tenant_name: String,
    #[serde(default)]
    pub(crate) tenant_address: Option<String>,
    pub(crate) reasons: Vec<String>,
    #[serde(default)]
    pub(crate) letter_date: Option<NaiveDate>,
}

/// Router builder exposing HTTP endpoints for statement checks and letters.
pub fn billing_router<R>(service: Arc<BillCheckService<R>>) -> Router
where
    R: BillRepository + 'static,
{
    Router::new()
        .route("/api/v1/bills", post(submit_handler::<R>))
        .route("/api/v1/bills/:bill_id", get(detail_handler::<R>))
        .route("/api/v1/bills/:bill_id/recheck", post(recheck_handler::<R>))
        .route(
            "/api/v1/bills/:bill_id/objection",
            post(objection_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<BillCheckService<R>>>,
    Json(submission): Json<BillSubmission>,
) -> Response
where
    R: BillRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record.detail_view())).into_response(),
        Err(error @ BillServiceError::PeriodInverted { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(BillServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "bill already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<BillCheckService<R>>>,
    Path(bill_id): Path<String>,
) -> Response
where
    R: BillRepository + 'static,
{
    match service.get(&BillId(bill_id)) {
        Ok(record) => (StatusCode::OK, Json(record.detail_view())).into_response(),
        Err(BillServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "bill not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn recheck_handler<R>(
    State(service): State<Arc<BillCheckService<R>>>,
    Path(bill_id): Path<String>,
) -> Response
where
    R: BillRepository + 'static,
{
    match service.recheck(&BillId(bill_id)) {
        Ok(record) => (StatusCode::OK, Json(record.detail_view())).into_response(),
        Err(BillServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "bill not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn objection_handler<R>(
    State(service): State<Arc<BillCheckService<R>>>,
    Path(bill_id): Path<String>,
    Json(body): Json<ObjectionBody>,
) -> Response
where
    R: BillRepository + 'static,
{
    let id = BillId(bill_id);
    let letter_date = body
        .letter_date
        .unwrap_or_else(|| Local::now().date_naive());

    let request = ObjectionRequest {
        tenant_name: body.tenant_name,
        tenant_address: body.tenant_address,
        reasons: body.reasons,
        letter_date,
    };

    match service.objection(&id, request) {
        Ok(letter) => {
            let payload = json!({
                "bill_id": id.0,
                "content": letter.content,
                "reasons": letter.reasons,
                "created_on": letter.created_on,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(BillServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "bill not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
