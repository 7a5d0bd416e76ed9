//! FILENAME: core/query-engine/src/view.rs
//! View records - the JSON-shaped outputs of each aggregation pipeline.
//!
//! Field names are the language-neutral names used in code; serialized names
//! are the wire names of the HTTP API. Monetary fields are already rounded to
//! 2 decimals when a record is built.

use chrono::NaiveDate;
use dataset::OrderRecord;
use serde::{Deserialize, Serialize};

// ============================================================================
// GLOBAL KPIS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalKpis {
    #[serde(rename = "ca_total")]
    pub total_sales: f64,
    /// Distinct order ids.
    #[serde(rename = "nb_commandes")]
    pub order_count: usize,
    /// Distinct customer ids.
    #[serde(rename = "nb_clients")]
    pub customer_count: usize,
    #[serde(rename = "panier_moyen")]
    pub avg_order_value: f64,
    #[serde(rename = "quantite_vendue")]
    pub total_quantity: i64,
    #[serde(rename = "profit_total")]
    pub total_profit: f64,
    #[serde(rename = "marge_moyenne")]
    pub avg_margin_pct: f64,
}

// ============================================================================
// GROUPED VIEWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    #[serde(rename = "produit")]
    pub product_name: String,
    #[serde(rename = "categorie")]
    pub category: String,
    #[serde(rename = "ca")]
    pub sales_sum: f64,
    #[serde(rename = "quantite")]
    pub quantity_sum: i64,
    #[serde(rename = "profit")]
    pub profit_sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    #[serde(rename = "categorie")]
    pub category: String,
    #[serde(rename = "ca")]
    pub sales_sum: f64,
    #[serde(rename = "profit")]
    pub profit_sum: f64,
    #[serde(rename = "nb_commandes")]
    pub order_count: usize,
    #[serde(rename = "marge_pct")]
    pub margin_pct: f64,
}

/// One bucket of the time series. Empty buckets are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPerformance {
    #[serde(rename = "periode")]
    pub period_label: String,
    #[serde(rename = "ca")]
    pub sales_sum: f64,
    #[serde(rename = "profit")]
    pub profit_sum: f64,
    #[serde(rename = "nb_commandes")]
    pub order_count: usize,
    #[serde(rename = "quantite")]
    pub quantity_sum: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPerformance {
    pub region: String,
    #[serde(rename = "ca")]
    pub sales_sum: f64,
    #[serde(rename = "profit")]
    pub profit_sum: f64,
    #[serde(rename = "nb_clients")]
    pub customer_count: usize,
    #[serde(rename = "nb_commandes")]
    pub order_count: usize,
}

// ============================================================================
// CUSTOMER ANALYSIS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: String,
    #[serde(rename = "ca_total")]
    pub total_sales: f64,
    #[serde(rename = "profit_total")]
    pub total_profit: f64,
    #[serde(rename = "nb_commandes")]
    pub order_count: usize,
    /// First name seen for this id.
    #[serde(rename = "nom")]
    pub display_name: String,
    #[serde(rename = "valeur_commande_moy")]
    pub avg_order_value: f64,
}

/// Repeat-purchase counters over every customer, not only the top slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    #[serde(rename = "clients_1_achat")]
    pub one_order_customers: usize,
    #[serde(rename = "clients_recurrents")]
    pub repeat_customers: usize,
    #[serde(rename = "nb_commandes_moyen")]
    pub mean_orders_per_customer: f64,
    #[serde(rename = "total_clients")]
    pub total_customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPerformance {
    pub segment: String,
    #[serde(rename = "ca")]
    pub sales_sum: f64,
    #[serde(rename = "profit")]
    pub profit_sum: f64,
    #[serde(rename = "nb_clients")]
    pub customer_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAnalysis {
    #[serde(rename = "top_clients")]
    pub top_customers: Vec<CustomerSummary>,
    pub recurrence: Recurrence,
    #[serde(rename = "segments")]
    pub segment_breakdown: Vec<SegmentPerformance>,
}

// ============================================================================
// FILTER OPTIONS AND RAW ROWS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// Values used to populate the dashboard's filter controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    pub segments: Vec<String>,
    #[serde(rename = "etats")]
    pub states: Vec<String>,
    #[serde(rename = "plage_dates")]
    pub date_range: Option<DateRange>,
}

/// A page of raw rows. `total` is the full dataset size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    pub total: usize,
    #[serde(rename = "limite")]
    pub limit: usize,
    pub offset: usize,
    #[serde(rename = "data")]
    pub rows: Vec<OrderRecord>,
}

// ============================================================================
// QUERY RESULT
// ============================================================================

/// Output of [`crate::execute`]: one variant per query operation.
/// Serializes as the bare view payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    GlobalKpis(GlobalKpis),
    TopProducts(Vec<TopProduct>),
    CategoryPerformance(Vec<CategoryPerformance>),
    TimeSeries(Vec<PeriodPerformance>),
    Geographic(Vec<RegionPerformance>),
    CustomerAnalysis(CustomerAnalysis),
    FilterOptions(FilterOptions),
    Orders(OrderPage),
}
