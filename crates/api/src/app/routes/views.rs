//! Read-only aggregate views: calendar and dashboard.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::MemberContext;

pub async fn calendar(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.calendar.days(household_id, member.member_id()).await {
        Ok(days) => (StatusCode::OK, Json(serde_json::json!({ "days": days }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.dashboard.load(household_id, member.member_id()).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
