//! FILENAME: core/dataset/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data source unreachable: {0}")]
    Unreachable(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Dataset is empty after cleaning ({rows_read} rows read, none valid)")]
    Empty { rows_read: usize },
}
