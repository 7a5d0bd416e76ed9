//! FILENAME: app/server/src/routes/data.rs

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use query_engine::{Query, QueryResult, ORDER_PAGE_LIMIT};

use super::run_query;
use crate::error::AppError;
use crate::params::QueryParams;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/data/commandes", get(orders))
}

/// `GET /data/commandes?offset=&limite=`: raw rows in load order.
pub async fn orders(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<QueryResult>, AppError> {
    let query = Query::Orders {
        offset: params.usize_or("offset", 0)?,
        limit: params.limit(ORDER_PAGE_LIMIT)?,
    };
    run_query(&state, query)
}
