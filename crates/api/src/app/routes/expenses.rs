use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use homeshare_expenses::{summary::household_total, NewExpense};

use crate::app::{dto, errors, services::AppServices};
use crate::context::MemberContext;

pub async fn list_expenses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.expenses.list(household_id, member.member_id()).await {
        Ok(items) => {
            let total = household_total(&items);
            (
                StatusCode::OK,
                Json(serde_json::json!({ "items": items, "total": total })),
            )
                .into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn record_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
    Json(body): Json<NewExpense>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.expenses.record(household_id, member.member_id(), body).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_balances(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.expenses.balances(household_id, member.member_id()).await {
        Ok(sheet) => (StatusCode::OK, Json(serde_json::json!({ "balances": sheet }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_my_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(member): Extension<MemberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let household_id = match dto::parse_household_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.expenses.summary_for(household_id, member.member_id()).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
