//! FILENAME: app/server/src/routes/filters.rs

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use query_engine::{Query, QueryResult};

use super::run_query;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/filters/valeurs", get(filter_values))
}

/// `GET /filters/valeurs`: distinct dimension values and the date range.
pub async fn filter_values(State(state): State<AppState>) -> Result<Json<QueryResult>, AppError> {
    run_query(&state, Query::FilterOptions)
}
