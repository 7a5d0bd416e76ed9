//! FILENAME: tests/common/mod.rs
//! Fixtures for query engine integration tests.

use chrono::NaiveDate;
use dataset::{Dataset, OrderRecord};

/// A dozen order lines across three categories, four regions and three
/// segments, with repeat customers, a loss-making line and a product name
/// shared by two categories.
pub struct SalesFixture;

impl SalesFixture {
    /// (order, customer id, customer name, date, segment, region, state,
    ///  category, product, sales, quantity, profit)
    #[allow(clippy::type_complexity)]
    #[rustfmt::skip]
    pub fn data() -> Vec<(
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        f64,
        i64,
        f64,
    )> {
        vec![
            ("O-1", "C-1", "Ada", "2023-01-15", "Consumer", "West", "California", "Furniture", "Oak Desk", 420.50, 1, 63.10),
            ("O-1", "C-1", "Ada", "2023-01-15", "Consumer", "West", "California", "Office Supplies", "Stapler", 12.99, 3, 4.20),
            ("O-2", "C-2", "Bruno", "2023-02-03", "Corporate", "East", "New York", "Technology", "Phone", 699.00, 2, 120.00),
            ("O-3", "C-1", "Ada B.", "2023-02-28", "Consumer", "West", "Oregon", "Furniture", "Chair", 150.00, 4, -30.00),
            ("O-4", "C-3", "Chloe", "2023-03-01", "Home Office", "South", "Texas", "Office Supplies", "Paper", 25.00, 10, 11.25),
            ("O-5", "C-4", "Dmitri", "2023-03-17", "Corporate", "Central", "Illinois", "Technology", "Monitor", 310.40, 2, 45.60),
            ("O-5", "C-4", "Dmitri", "2023-03-17", "Corporate", "Central", "Illinois", "Office Supplies", "Stapler", 12.99, 1, 1.40),
            ("O-6", "C-2", "Bruno", "2024-01-02", "Corporate", "East", "New York", "Furniture", "Chair", 150.00, 2, 22.50),
            ("O-7", "C-5", "Elif", "2024-01-20", "Consumer", "South", "Florida", "Technology", "Phone", 699.00, 1, -70.00),
            ("O-8", "C-3", "Chloe", "2024-06-30", "Home Office", "South", "Texas", "Furniture", "Lamp", 89.90, 3, 17.98),
            ("O-9", "C-6", "Farid", "2024-07-04", "Consumer", "East", "Maine", "Office Supplies", "Lamp", 45.00, 2, 9.00),
            ("O-9", "C-6", "Farid", "2024-07-04", "Consumer", "East", "Maine", "Office Supplies", "Paper", 25.00, 5, 5.00),
        ]
    }

    pub fn records() -> Vec<OrderRecord> {
        Self::data()
            .into_iter()
            .map(
                |(
                    order,
                    cid,
                    name,
                    date,
                    segment,
                    region,
                    state,
                    category,
                    product,
                    sales,
                    quantity,
                    profit,
                )| {
                    let order_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
                    OrderRecord {
                        row_id: None,
                        order_id: order.to_string(),
                        order_date,
                        ship_date: order_date + chrono::Duration::days(3),
                        ship_mode: None,
                        customer_id: cid.to_string(),
                        customer_name: name.to_string(),
                        segment: segment.to_string(),
                        country: None,
                        city: None,
                        state: state.to_string(),
                        postal_code: None,
                        region: region.to_string(),
                        product_id: None,
                        category: category.to_string(),
                        sub_category: None,
                        product_name: product.to_string(),
                        sales,
                        quantity,
                        discount: None,
                        profit,
                    }
                },
            )
            .collect()
    }

    pub fn dataset() -> Dataset {
        Dataset::new(Self::records())
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }
}

/// Absolute tolerance for comparing sums of independently rounded values.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
