//! FILENAME: core/query-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A caller-supplied parameter is outside its recognized set or range.
    /// Raised before any row is read.
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },
}

impl QueryError {
    pub fn invalid(name: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        QueryError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
