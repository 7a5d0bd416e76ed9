//! FILENAME: app/server/src/state.rs

use std::sync::Arc;

use dataset::Dataset;

/// Shared request state: the immutable dataset, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        AppState {
            dataset: Arc::new(dataset),
        }
    }
}
