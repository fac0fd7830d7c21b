use std::str::FromStr;

use axum::http::StatusCode;
use serde::Deserialize;

use homeshare_core::{ChoreId, HouseholdId};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateHouseholdRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinHouseholdRequest {
    pub invite_code: String,
}

// Expense and chore bodies deserialize straight into the domain's `NewExpense`,
// `NewChore` and `ChoreUpdate`.

// -------------------------
// Path parsing
// -------------------------

pub fn parse_household_id(raw: &str) -> Result<HouseholdId, axum::response::Response> {
    HouseholdId::from_str(raw)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}

pub fn parse_chore_id(raw: &str) -> Result<ChoreId, axum::response::Response> {
    ChoreId::from_str(raw)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}
