//! FILENAME: app/server/src/routes/mod.rs
//! HTTP route groups. Handlers translate parameters into a `Query` and hand
//! it to the engine; they hold no logic of their own.

pub mod data;
pub mod filters;
pub mod info;
pub mod kpi;

use axum::Json;
use query_engine::{Query, QueryResult};

use crate::error::AppError;
use crate::logging::log_debug;
use crate::state::AppState;

/// Runs one query against the shared dataset.
pub(crate) fn run_query(state: &AppState, query: Query) -> Result<Json<QueryResult>, AppError> {
    log_debug!("QUERY", "{} {:?}", query.name(), query);
    let result = query_engine::execute(&state.dataset, &query)?;
    Ok(Json(result))
}
