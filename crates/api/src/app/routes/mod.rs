use axum::{
    routing::{get, patch, post},
    Router,
};

pub mod chores;
pub mod expenses;
pub mod households;
pub mod system;
pub mod views;

/// Router for all member-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/households", post(households::create_household))
        .route("/households/join", post(households::join_household))
        .route("/households/:id", get(households::get_household))
        .route(
            "/households/:id/expenses",
            get(expenses::list_expenses).post(expenses::record_expense),
        )
        .route("/households/:id/balances", get(expenses::get_balances))
        .route("/households/:id/balances/me", get(expenses::get_my_balance))
        .route(
            "/households/:id/chores",
            get(chores::list_chores).post(chores::create_chore),
        )
        .route("/households/:id/chores/:chore_id", patch(chores::update_chore))
        .route(
            "/households/:id/chores/:chore_id/complete",
            post(chores::complete_chore),
        )
        .route("/households/:id/calendar", get(views::calendar))
        .route("/households/:id/dashboard", get(views::dashboard))
}
