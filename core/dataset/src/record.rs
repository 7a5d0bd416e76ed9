//! FILENAME: core/dataset/src/record.rs
//! Order Record - one line item of the sales fact table.
//!
//! Records are validated once by the loader. Downstream code reads the typed
//! fields directly and never re-checks them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ORDER RECORD
// ============================================================================

/// A single order line. Serialized field names are the source CSV headers so
/// the raw row listing mirrors the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Source row number, when the file carries one.
    #[serde(rename = "Row ID", default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<i64>,

    /// Order identifier. Not unique per row: one order spans many lines.
    #[serde(rename = "Order ID")]
    pub order_id: String,

    #[serde(rename = "Order Date")]
    pub order_date: NaiveDate,

    /// Expected to be on or after `order_date`, not enforced.
    #[serde(rename = "Ship Date")]
    pub ship_date: NaiveDate,

    #[serde(rename = "Ship Mode", default, skip_serializing_if = "Option::is_none")]
    pub ship_mode: Option<String>,

    #[serde(rename = "Customer ID")]
    pub customer_id: String,

    #[serde(rename = "Customer Name")]
    pub customer_name: String,

    #[serde(rename = "Segment")]
    pub segment: String,

    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(rename = "City", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "State")]
    pub state: String,

    #[serde(rename = "Postal Code", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(rename = "Region")]
    pub region: String,

    #[serde(rename = "Product ID", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Sub-Category", default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    #[serde(rename = "Product Name")]
    pub product_name: String,

    #[serde(rename = "Sales")]
    pub sales: f64,

    #[serde(rename = "Quantity")]
    pub quantity: i64,

    #[serde(rename = "Discount", default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,

    /// May be negative. Loss-making lines are kept as-is.
    #[serde(rename = "Profit")]
    pub profit: f64,
}

impl OrderRecord {
    /// Returns the value of a string dimension for this record.
    pub fn dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Region => &self.region,
            Dimension::Segment => &self.segment,
            Dimension::State => &self.state,
        }
    }
}

// ============================================================================
// DIMENSIONS
// ============================================================================

/// The enumerated string columns exposed as filter options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Category,
    Region,
    Segment,
    State,
}
