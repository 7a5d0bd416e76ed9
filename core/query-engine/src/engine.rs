//! FILENAME: core/query-engine/src/engine.rs
//! Query Engine - the calculation core that turns the dataset into views.
//!
//! Every view follows the same steps:
//! 1. Validate parameters (before any row is read)
//! 2. Apply the Filter Specification to get a borrowed row view
//! 3. Group rows into per-key totals (one linear pass)
//! 4. Order groups ascending by key, then stable-sort by the view's measure
//! 5. Round monetary fields and ratios while building the output records
//!
//! The engine holds only a shared reference to the dataset and no other
//! state, so any number of queries can run concurrently.

use std::hash::Hash;

use dataset::{Dataset, Dimension, OrderRecord};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::definition::{
    FilterSpec, Granularity, Query, SortKey, ORDER_PAGE_LIMIT, TOP_CUSTOMERS_LIMIT,
    TOP_PRODUCTS_LIMIT,
};
use crate::error::QueryError;
use crate::filter::apply_filter;
use crate::numeric::{percent_ratio, ratio, round2};
use crate::view::{
    CategoryPerformance, CustomerAnalysis, CustomerSummary, DateRange, FilterOptions,
    GlobalKpis, OrderPage, PeriodPerformance, QueryResult, Recurrence, RegionPerformance,
    SegmentPerformance, TopProduct,
};

// ============================================================================
// GROUP ACCUMULATOR
// ============================================================================

/// Running totals for one group of rows. Sums stay unrounded.
#[derive(Debug, Clone, Default)]
struct GroupTotals<'a> {
    sales: f64,
    profit: f64,
    quantity: i64,
    orders: FxHashSet<&'a str>,
    customers: FxHashSet<&'a str>,
    /// First row of the group, in load order, with a non-empty customer name.
    first_named: Option<&'a OrderRecord>,
}

impl<'a> GroupTotals<'a> {
    fn add(&mut self, record: &'a OrderRecord) {
        self.sales += record.sales;
        self.profit += record.profit;
        self.quantity += record.quantity;
        self.orders.insert(record.order_id.as_str());
        self.customers.insert(record.customer_id.as_str());
        if self.first_named.is_none() && !record.customer_name.is_empty() {
            self.first_named = Some(record);
        }
    }

    fn order_count(&self) -> usize {
        self.orders.len()
    }

    fn customer_count(&self) -> usize {
        self.customers.len()
    }
}

/// Groups rows by `key_of`. The result is ordered ascending by key, which is
/// the base order that later stable sorts keep for ties.
fn group_rows<'a, K, I, F>(rows: I, key_of: F) -> Vec<(K, GroupTotals<'a>)>
where
    K: Eq + Hash + Ord,
    I: IntoIterator<Item = &'a OrderRecord>,
    F: Fn(&'a OrderRecord) -> K,
{
    let mut groups: FxHashMap<K, GroupTotals<'a>> = FxHashMap::default();
    for record in rows {
        groups.entry(key_of(record)).or_default().add(record);
    }

    let mut groups: Vec<(K, GroupTotals<'a>)> = groups.into_iter().collect();
    groups.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    groups
}

/// Stable descending sort on a float measure.
fn sort_descending<T>(items: &mut [T], measure: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| measure(b).total_cmp(&measure(a)));
}

// ============================================================================
// QUERY ENGINE
// ============================================================================

/// Read-only query interface over one dataset snapshot.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    dataset: &'a Dataset,
}

impl<'a> QueryEngine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        QueryEngine { dataset }
    }

    /// Runs any query. Parameters are validated before the dataset is read.
    pub fn execute(&self, query: &Query) -> Result<QueryResult, QueryError> {
        query.validate()?;

        let result = match query {
            Query::GlobalKpis { filter } => QueryResult::GlobalKpis(self.global_kpis(filter)),
            Query::TopProducts {
                filter,
                sort_key,
                limit,
            } => QueryResult::TopProducts(self.top_products(filter, *sort_key, *limit)?),
            Query::CategoryPerformance { filter } => {
                QueryResult::CategoryPerformance(self.category_performance(filter))
            }
            Query::TimeSeries {
                filter,
                granularity,
            } => QueryResult::TimeSeries(self.time_series(filter, *granularity)),
            Query::Geographic { filter } => QueryResult::Geographic(self.geographic(filter)),
            Query::CustomerAnalysis { limit } => {
                QueryResult::CustomerAnalysis(self.customer_analysis(*limit)?)
            }
            Query::FilterOptions => QueryResult::FilterOptions(self.filter_options()),
            Query::Orders { offset, limit } => QueryResult::Orders(self.orders(*offset, *limit)?),
        };

        Ok(result)
    }

    // ------------------------------------------------------------------------
    // Global KPIs
    // ------------------------------------------------------------------------

    pub fn global_kpis(&self, filter: &FilterSpec) -> GlobalKpis {
        let mut totals = GroupTotals::default();
        for record in apply_filter(self.dataset, filter) {
            totals.add(record);
        }

        let order_count = totals.order_count();
        GlobalKpis {
            total_sales: round2(totals.sales),
            order_count,
            customer_count: totals.customer_count(),
            avg_order_value: ratio(totals.sales, order_count as f64),
            total_quantity: totals.quantity,
            total_profit: round2(totals.profit),
            avg_margin_pct: percent_ratio(totals.profit, totals.sales),
        }
    }

    // ------------------------------------------------------------------------
    // Top products
    // ------------------------------------------------------------------------

    /// Products keyed by (name, category), ranked by `sort_key`, descending.
    pub fn top_products(
        &self,
        filter: &FilterSpec,
        sort_key: SortKey,
        limit: usize,
    ) -> Result<Vec<TopProduct>, QueryError> {
        let limit = TOP_PRODUCTS_LIMIT.check(limit)?;

        let rows = apply_filter(self.dataset, filter);
        let mut groups = group_rows(rows, |r| (r.product_name.as_str(), r.category.as_str()));

        match sort_key {
            SortKey::Sales => sort_descending(&mut groups, |(_, t)| t.sales),
            SortKey::Profit => sort_descending(&mut groups, |(_, t)| t.profit),
            SortKey::Quantity => groups.sort_by(|a, b| b.1.quantity.cmp(&a.1.quantity)),
        }

        Ok(groups
            .into_iter()
            .take(limit)
            .map(|((product_name, category), totals)| TopProduct {
                product_name: product_name.to_string(),
                category: category.to_string(),
                sales_sum: round2(totals.sales),
                quantity_sum: totals.quantity,
                profit_sum: round2(totals.profit),
            })
            .collect())
    }

    // ------------------------------------------------------------------------
    // Category performance
    // ------------------------------------------------------------------------

    pub fn category_performance(&self, filter: &FilterSpec) -> Vec<CategoryPerformance> {
        let rows = apply_filter(self.dataset, filter);
        let mut groups = group_rows(rows, |r| r.category.as_str());
        sort_descending(&mut groups, |(_, t)| t.sales);

        groups
            .into_iter()
            .map(|(category, totals)| CategoryPerformance {
                category: category.to_string(),
                sales_sum: round2(totals.sales),
                profit_sum: round2(totals.profit),
                order_count: totals.order_count(),
                margin_pct: percent_ratio(totals.profit, totals.sales),
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Time series
    // ------------------------------------------------------------------------

    /// Buckets by `order_date`, ascending by label. No gap filling.
    pub fn time_series(
        &self,
        filter: &FilterSpec,
        granularity: Granularity,
    ) -> Vec<PeriodPerformance> {
        let rows = apply_filter(self.dataset, filter);
        let groups = group_rows(rows, |r| granularity.label(r.order_date));

        groups
            .into_iter()
            .map(|(period_label, totals)| PeriodPerformance {
                period_label,
                sales_sum: round2(totals.sales),
                profit_sum: round2(totals.profit),
                order_count: totals.order_count(),
                quantity_sum: totals.quantity,
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Geographic
    // ------------------------------------------------------------------------

    pub fn geographic(&self, filter: &FilterSpec) -> Vec<RegionPerformance> {
        let rows = apply_filter(self.dataset, filter);
        let mut groups = group_rows(rows, |r| r.region.as_str());
        sort_descending(&mut groups, |(_, t)| t.sales);

        groups
            .into_iter()
            .map(|(region, totals)| RegionPerformance {
                region: region.to_string(),
                sales_sum: round2(totals.sales),
                profit_sum: round2(totals.profit),
                customer_count: totals.customer_count(),
                order_count: totals.order_count(),
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Customer analysis
    // ------------------------------------------------------------------------

    /// Top customers, repeat-purchase counters and segment breakdown.
    /// Always computed over the whole dataset; only `limit` applies.
    pub fn customer_analysis(&self, limit: usize) -> Result<CustomerAnalysis, QueryError> {
        let limit = TOP_CUSTOMERS_LIMIT.check(limit)?;
        let records = self.dataset.records();

        let mut customers = group_rows(records, |r| r.customer_id.as_str());

        let total_customers = customers.len();
        let one_order_customers = customers
            .iter()
            .filter(|(_, t)| t.order_count() == 1)
            .count();
        let repeat_customers = customers
            .iter()
            .filter(|(_, t)| t.order_count() > 1)
            .count();
        let orders_sum: usize = customers.iter().map(|(_, t)| t.order_count()).sum();

        let recurrence = Recurrence {
            one_order_customers,
            repeat_customers,
            mean_orders_per_customer: ratio(orders_sum as f64, total_customers as f64),
            total_customers,
        };

        sort_descending(&mut customers, |(_, t)| t.sales);
        let top_customers = customers
            .into_iter()
            .take(limit)
            .map(|(customer_id, totals)| {
                let order_count = totals.order_count();
                CustomerSummary {
                    customer_id: customer_id.to_string(),
                    total_sales: round2(totals.sales),
                    total_profit: round2(totals.profit),
                    order_count,
                    display_name: totals
                        .first_named
                        .map(|r| r.customer_name.clone())
                        .unwrap_or_default(),
                    avg_order_value: ratio(totals.sales, order_count as f64),
                }
            })
            .collect();

        let segment_breakdown = group_rows(records, |r| r.segment.as_str())
            .into_iter()
            .map(|(segment, totals)| SegmentPerformance {
                segment: segment.to_string(),
                sales_sum: round2(totals.sales),
                profit_sum: round2(totals.profit),
                customer_count: totals.customer_count(),
            })
            .collect();

        Ok(CustomerAnalysis {
            top_customers,
            recurrence,
            segment_breakdown,
        })
    }

    // ------------------------------------------------------------------------
    // Filter options and raw rows
    // ------------------------------------------------------------------------

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            categories: self.dataset.distinct_values(Dimension::Category),
            regions: self.dataset.distinct_values(Dimension::Region),
            segments: self.dataset.distinct_values(Dimension::Segment),
            states: self.dataset.distinct_values(Dimension::State),
            date_range: self
                .dataset
                .date_range()
                .map(|(min, max)| DateRange { min, max }),
        }
    }

    /// A page of raw rows in load order.
    pub fn orders(&self, offset: usize, limit: usize) -> Result<OrderPage, QueryError> {
        let limit = ORDER_PAGE_LIMIT.check(limit)?;

        Ok(OrderPage {
            total: self.dataset.len(),
            limit,
            offset,
            rows: self.dataset.slice(offset, limit).to_vec(),
        })
    }
}

/// Runs one query against a dataset snapshot.
pub fn execute(dataset: &Dataset, query: &Query) -> Result<QueryResult, QueryError> {
    QueryEngine::new(dataset).execute(query)
}
