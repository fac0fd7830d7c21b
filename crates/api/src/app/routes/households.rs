use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::MemberContext;

pub async fn create_household(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Json(body): Json<dto::CreateHouseholdRequest>,
) -> axum::response::Response {
    match services.households.create(&body.name, member.member_id().clone()).await {
        Ok(household) => (StatusCode::CREATED, Json(household)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn join_household(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Json(body): Json<dto::JoinHouseholdRequest>,
) -> axum::response::Response {
    match services.households.join(&body.invite_code, member.member_id().clone()).await {
        Ok(household) => (StatusCode::OK, Json(household)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_household(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.households.get(household_id, member.member_id()).await {
        Ok(household) => (StatusCode::OK, Json(household)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
