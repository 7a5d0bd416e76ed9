//! FILENAME: app/server/src/router.rs
//! Router assembly: route groups, request logging, CORS and the optional
//! request timeout.

use std::time::{Duration, Instant};

use axum::error_handling::HandleErrorLayer;
use axum::extract::{OriginalUri, Request};
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::error::AppError;
use crate::logging::{log_enter_info, log_exit_info};
use crate::routes;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the service router over a loaded dataset.
pub fn sales_router(state: AppState, request_timeout: Option<Duration>) -> Router {
    let router = Router::new()
        .merge(routes::info::routes())
        .merge(routes::kpi::routes())
        .merge(routes::filters::routes())
        .merge(routes::data::routes())
        .fallback(not_found)
        .layer(middleware::from_fn(request_log))
        .layer(CorsLayer::permissive());

    let router = match request_timeout {
        Some(timeout) => router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(timeout)),
        ),
        None => router,
    };

    router.with_state(state)
}

/// Logs an ENTER/EXIT pair per request and tags the response with its id.
async fn request_log(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    log_enter_info!("HTTP", "request", "id={} {} {}", request_id, method, uri);

    let mut response = next.run(request).await;

    log_exit_info!(
        "HTTP",
        "request",
        "id={} status={} elapsed_ms={}",
        request_id,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn not_found(uri: OriginalUri) -> AppError {
    AppError::NotFound(uri.0.path().to_string())
}

async fn handle_timeout_error(_err: tower::BoxError) -> AppError {
    AppError::Timeout
}
