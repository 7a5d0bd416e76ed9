//! FILENAME: core/dataset/src/lib.rs
//! Sales dataset for the analytics service.
//!
//! Holds the order fact table in memory. The table is loaded once from CSV,
//! cleaned, and then shared read-only by every query.
//!
//! Layers:
//! - `record`: the typed Order Record and its string dimensions
//! - `loader`: CSV parsing, header normalization, row validation
//! - `store`: the immutable Dataset and its lookups

mod error;
mod loader;
pub mod record;
pub mod store;

pub use error::DataLoadError;
pub use loader::{load_bytes, load_csv, load_path};
pub use record::{Dimension, OrderRecord};
pub use store::{Dataset, LoadReport};
