//! FILENAME: core/query-engine/src/lib.rs
//! Filter-and-aggregate query engine for the sales dataset.
//!
//! This crate computes the fixed report views over a shared, immutable
//! `dataset::Dataset`. Every query is a pure function of (dataset, filter,
//! view parameters); nothing is cached between calls.
//!
//! Layers:
//! - `definition`: Filter Specification, view parameters, the `Query` request
//! - `filter`: the row predicate
//! - `numeric`: output rounding and the zero-safe ratio rule
//! - `view`: output records with their wire names
//! - `engine`: the aggregation pipelines

pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod numeric;
pub mod view;

pub use definition::*;
pub use engine::{execute, QueryEngine};
pub use error::QueryError;
pub use filter::apply_filter;
pub use view::*;
