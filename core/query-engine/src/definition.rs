//! FILENAME: core/query-engine/src/definition.rs
//! Query Definition - the per-request description of what to compute.
//!
//! This module contains the types needed to DESCRIBE a query:
//! - the Filter Specification shared by the filtered views
//! - the view parameters (sort key, granularity, limits)
//! - the `Query` request itself, one variant per operation
//!
//! Parameter tokens match the wire names of the HTTP API ("ca", "mois", ...).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

// ============================================================================
// FILTER SPECIFICATION
// ============================================================================

/// Optional per-dimension restrictions. `None` means "no restriction".
///
/// There is no "all" sentinel here: the transport maps "Toutes"/"Tous" to
/// `None` before building the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive lower bound on `order_date`.
    pub date_start: Option<NaiveDate>,
    /// Inclusive upper bound on `order_date`.
    pub date_end: Option<NaiveDate>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub segment: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_start(mut self, date: NaiveDate) -> Self {
        self.date_start = Some(date);
        self
    }

    pub fn with_date_end(mut self, date: NaiveDate) -> Self {
        self.date_end = Some(date);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// True when no field restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.date_start.is_none()
            && self.date_end.is_none()
            && self.category.is_none()
            && self.region.is_none()
            && self.segment.is_none()
    }
}

// ============================================================================
// SORT KEY
// ============================================================================

/// Ranking measure for the Top Products view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "ca")]
    Sales,
    #[serde(rename = "profit")]
    Profit,
    #[serde(rename = "quantite")]
    Quantity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Sales => "ca",
            SortKey::Profit => "profit",
            SortKey::Quantity => "quantite",
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ca" => Ok(SortKey::Sales),
            "profit" => Ok(SortKey::Profit),
            "quantite" => Ok(SortKey::Quantity),
            other => Err(QueryError::invalid(
                "tri_par",
                other,
                "expected one of ca, profit, quantite",
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GRANULARITY
// ============================================================================

/// Date bucket size for the Time Series view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "jour")]
    Day,
    #[default]
    #[serde(rename = "mois")]
    Month,
    #[serde(rename = "annee")]
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "jour",
            Granularity::Month => "mois",
            Granularity::Year => "annee",
        }
    }

    /// Bucket label for a date. Labels sort lexicographically in
    /// chronological order.
    pub fn label(&self, date: NaiveDate) -> String {
        let format = match self {
            Granularity::Day => "%Y-%m-%d",
            Granularity::Month => "%Y-%m",
            Granularity::Year => "%Y",
        };
        date.format(format).to_string()
    }
}

impl FromStr for Granularity {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jour" => Ok(Granularity::Day),
            "mois" => Ok(Granularity::Month),
            "annee" => Ok(Granularity::Year),
            other => Err(QueryError::invalid(
                "periode",
                other,
                "expected one of jour, mois, annee",
            )),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LIMITS
// ============================================================================

/// Inclusive bounds and default for a `limit`-style parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitBounds {
    pub name: &'static str,
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl LimitBounds {
    /// Out-of-range values are rejected, never clamped.
    pub fn check(&self, value: usize) -> Result<usize, QueryError> {
        if value < self.min || value > self.max {
            return Err(QueryError::invalid(
                self.name,
                value,
                format!("must be between {} and {}", self.min, self.max),
            ));
        }
        Ok(value)
    }
}

pub const TOP_PRODUCTS_LIMIT: LimitBounds = LimitBounds {
    name: "limite",
    min: 1,
    max: 50,
    default: 10,
};

pub const TOP_CUSTOMERS_LIMIT: LimitBounds = LimitBounds {
    name: "limite",
    min: 1,
    max: 100,
    default: 10,
};

pub const ORDER_PAGE_LIMIT: LimitBounds = LimitBounds {
    name: "limite",
    min: 1,
    max: 1000,
    default: 100,
};

// ============================================================================
// QUERY
// ============================================================================

/// One request against the dataset: an operation plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    GlobalKpis {
        filter: FilterSpec,
    },
    TopProducts {
        filter: FilterSpec,
        sort_key: SortKey,
        limit: usize,
    },
    CategoryPerformance {
        filter: FilterSpec,
    },
    TimeSeries {
        filter: FilterSpec,
        granularity: Granularity,
    },
    Geographic {
        filter: FilterSpec,
    },
    /// Always computed over the whole dataset.
    CustomerAnalysis {
        limit: usize,
    },
    FilterOptions,
    Orders {
        offset: usize,
        limit: usize,
    },
}

impl Query {
    /// Operation name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Query::GlobalKpis { .. } => "global_kpis",
            Query::TopProducts { .. } => "top_products",
            Query::CategoryPerformance { .. } => "category_performance",
            Query::TimeSeries { .. } => "time_series",
            Query::Geographic { .. } => "geographic",
            Query::CustomerAnalysis { .. } => "customer_analysis",
            Query::FilterOptions => "filter_options",
            Query::Orders { .. } => "orders",
        }
    }

    /// Checks every bounded parameter. Sort keys and granularities are
    /// already validated by their `FromStr`.
    pub fn validate(&self) -> Result<(), QueryError> {
        match self {
            Query::TopProducts { limit, .. } => TOP_PRODUCTS_LIMIT.check(*limit).map(|_| ()),
            Query::CustomerAnalysis { limit } => TOP_CUSTOMERS_LIMIT.check(*limit).map(|_| ()),
            Query::Orders { limit, .. } => ORDER_PAGE_LIMIT.check(*limit).map(|_| ()),
            _ => Ok(()),
        }
    }
}
