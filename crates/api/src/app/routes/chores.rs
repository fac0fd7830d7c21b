use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use homeshare_chores::{ChoreUpdate, NewChore};

use crate::app::{dto, errors, services::AppServices};
use crate::context::MemberContext;

pub async fn list_chores(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.chores.list(household_id, member.member_id()).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_chore(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
    Json(body): Json<NewChore>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.chores.create(household_id, member.member_id(), body).await {
        Ok(chore) => (StatusCode::CREATED, Json(chore)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_chore(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path((id, chore_id)): Path<(String, String)>,
    Json(body): Json<ChoreUpdate>,
) -> axum::response::Response {
    let (household_id, chore_id) = match (dto::parse_household_id(&id), dto::parse_chore_id(&chore_id)) {
        (Ok(h), Ok(c)) => (h, c),
        (Err(resp), _) | (_, Err(resp)) => return resp,
    };

    match services
        .chores
        .update(household_id, chore_id, member.member_id(), body)
        .await
    {
        Ok(chore) => (StatusCode::OK, Json(chore)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn complete_chore(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path((id, chore_id)): Path<(String, String)>,
) -> axum::response::Response {
    let (household_id, chore_id) = match (dto::parse_household_id(&id), dto::parse_chore_id(&chore_id)) {
        (Ok(h), Ok(c)) => (h, c),
        (Err(resp), _) | (_, Err(resp)) => return resp,
    };

    match services.chores.complete(household_id, chore_id, member.member_id()).await {
        Ok(done) => (StatusCode::OK, Json(done)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
