//! FILENAME: app/server/src/error.rs
//! Service error type and its JSON error payload.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dataset::DataLoadError;
use query_engine::QueryError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Stable error code.
    pub code: String,
    pub message: String,
    /// Offending parameter, for parameter errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to load dataset: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed query string: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request timed out")]
    Timeout,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Query(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DataLoad(_) | AppError::Config(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Query(_) => "INVALID_PARAMETER",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Timeout => "SERVICE_UNAVAILABLE",
            AppError::DataLoad(_) => "DATA_LOAD",
            AppError::Config(_) | AppError::Io(_) => "INTERNAL",
        }
    }

    pub fn to_payload(&self) -> ErrorResponse {
        let (parameter, value) = match self {
            AppError::Query(QueryError::InvalidParameter { name, value, .. }) => {
                (Some(name.clone()), Some(value.clone()))
            }
            _ => (None, None),
        };

        ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                parameter,
                value,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_payload())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_maps_to_422() {
        let err = AppError::from(QueryError::invalid("limite", 0, "must be between 1 and 50"));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let payload = err.to_payload();
        assert_eq!(payload.error.code, "INVALID_PARAMETER");
        assert_eq!(payload.error.parameter.as_deref(), Some("limite"));
        assert_eq!(payload.error.value.as_deref(), Some("0"));
        assert!(payload.error.message.contains("limite=0"));
    }

    #[test]
    fn test_other_errors_omit_parameter() {
        let payload = AppError::NotFound("/nope".to_string()).to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json["error"].get("parameter").is_none());
    }
}
