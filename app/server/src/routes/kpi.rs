//! FILENAME: app/server/src/routes/kpi.rs
//! KPI endpoints: global totals and the grouped views.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use query_engine::{
    Granularity, Query, QueryResult, SortKey, TOP_CUSTOMERS_LIMIT, TOP_PRODUCTS_LIMIT,
};

use super::run_query;
use crate::error::AppError;
use crate::params::QueryParams;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/kpi/globaux", get(global_kpis))
        .route("/kpi/produits/top", get(top_products))
        .route("/kpi/categories", get(categories))
        .route("/kpi/temporel", get(time_series))
        .route("/kpi/geographique", get(geographic))
        .route("/kpi/clients", get(customers))
}

/// `GET /kpi/globaux`
pub async fn global_kpis(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<QueryResult>, AppError> {
    let query = Query::GlobalKpis {
        filter: params.filter()?,
    };
    run_query(&state, query)
}

/// `GET /kpi/produits/top?limite=&tri_par=`
pub async fn top_products(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<QueryResult>, AppError> {
    let query = Query::TopProducts {
        filter: params.filter()?,
        sort_key: params.token_or("tri_par", SortKey::default())?,
        limit: params.limit(TOP_PRODUCTS_LIMIT)?,
    };
    run_query(&state, query)
}

/// `GET /kpi/categories`
pub async fn categories(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<QueryResult>, AppError> {
    let query = Query::CategoryPerformance {
        filter: params.filter()?,
    };
    run_query(&state, query)
}

/// `GET /kpi/temporel?periode=`
pub async fn time_series(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<QueryResult>, AppError> {
    let query = Query::TimeSeries {
        filter: params.filter()?,
        granularity: params.token_or("periode", Granularity::default())?,
    };
    run_query(&state, query)
}

/// `GET /kpi/geographique`
pub async fn geographic(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<QueryResult>, AppError> {
    let query = Query::Geographic {
        filter: params.filter()?,
    };
    run_query(&state, query)
}

/// `GET /kpi/clients?limite=`. Filter parameters are not accepted here:
/// the analysis always covers the whole dataset.
pub async fn customers(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<QueryResult>, AppError> {
    let query = Query::CustomerAnalysis {
        limit: params.limit(TOP_CUSTOMERS_LIMIT)?,
    };
    run_query(&state, query)
}
