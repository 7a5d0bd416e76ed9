//! FILENAME: core/dataset/src/store.rs
//! Dataset Store - the cleaned, immutable table held for the process lifetime.
//!
//! The store is built once (by the loader or directly from records in tests)
//! and then shared read-only. It answers three questions:
//! - all rows, in load order
//! - the inclusive `order_date` range
//! - the sorted distinct values of a string dimension

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{Dimension, OrderRecord};

// ============================================================================
// LOAD REPORT
// ============================================================================

/// Counters collected while cleaning the raw input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows read from the source (header excluded).
    pub rows_read: usize,
    /// Rows kept in the dataset.
    pub rows_kept: usize,
    /// Rows dropped for a missing order id, customer id or sales amount.
    pub missing_required: usize,
    /// Rows dropped because a date did not parse.
    pub invalid_date: usize,
    /// Rows dropped because a numeric cell did not parse.
    pub invalid_number: usize,
}

impl LoadReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

// ============================================================================
// DATASET
// ============================================================================

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<OrderRecord>,
    date_range: Option<(NaiveDate, NaiveDate)>,
    report: LoadReport,
}

impl Dataset {
    /// Builds a dataset from already-validated records.
    pub fn new(records: Vec<OrderRecord>) -> Self {
        let report = LoadReport {
            rows_read: records.len(),
            rows_kept: records.len(),
            ..LoadReport::default()
        };
        Self::with_report(records, report)
    }

    pub(crate) fn with_report(records: Vec<OrderRecord>, report: LoadReport) -> Self {
        let date_range = records.iter().fold(None, |range, record| {
            let date = record.order_date;
            match range {
                None => Some((date, date)),
                Some((min, max)) => Some((min.min(date), max.max(date))),
            }
        });

        Dataset {
            records,
            date_range,
            report,
        }
    }

    /// All rows in load order.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Inclusive bounds of `order_date`. `None` only for an empty dataset,
    /// which the loader never produces.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_range
    }

    /// Sorted unique values of a string dimension.
    pub fn distinct_values(&self, dimension: Dimension) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .records
            .iter()
            .map(|record| record.dimension(dimension))
            .collect();

        unique.into_iter().map(str::to_string).collect()
    }

    /// A window of rows in load order. An offset past the end yields an
    /// empty slice.
    pub fn slice(&self, offset: usize, limit: usize) -> &[OrderRecord] {
        let start = offset.min(self.records.len());
        let end = start.saturating_add(limit).min(self.records.len());
        &self.records[start..end]
    }
}
