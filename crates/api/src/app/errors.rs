use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use homeshare_core::DomainError;
use homeshare_infra::{ServiceError, StoreError};

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::InvalidExpense(e) => json_error(StatusCode::BAD_REQUEST, "invalid_expense", e.to_string()),
        // The client falls back to listing raw expenses when it sees this code.
        ServiceError::Balance(e) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "balance_unavailable", e.to_string())
        }
        ServiceError::HouseholdNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "household not found")
        }
        ServiceError::ChoreNotFound => json_error(StatusCode::NOT_FOUND, "not_found", "chore not found"),
        ServiceError::InvalidInviteCode => {
            json_error(StatusCode::BAD_REQUEST, "invalid_invite_code", "Invalid invite code")
        }
        ServiceError::Store(e) => store_error_to_response(e),
    }
}

fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Unauthorized => json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "not a member of this household",
        ),
    }
}

fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Storage(msg) => {
            tracing::error!(error = %msg, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
