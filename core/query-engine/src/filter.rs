//! FILENAME: core/query-engine/src/filter.rs
//! Filter Predicate - reduces the dataset to the rows a FilterSpec admits.

use dataset::{Dataset, OrderRecord};

use crate::definition::FilterSpec;

impl FilterSpec {
    /// A row passes only if it satisfies every restriction that is set.
    /// Date bounds are inclusive and apply to `order_date` only; string
    /// dimensions are exact, case-sensitive matches.
    pub fn matches(&self, record: &OrderRecord) -> bool {
        if let Some(start) = self.date_start {
            if record.order_date < start {
                return false;
            }
        }
        if let Some(end) = self.date_end {
            if record.order_date > end {
                return false;
            }
        }

        let dimension_ok = |wanted: &Option<String>, actual: &str| {
            wanted.as_deref().map_or(true, |w| w == actual)
        };

        dimension_ok(&self.category, &record.category)
            && dimension_ok(&self.region, &record.region)
            && dimension_ok(&self.segment, &record.segment)
    }
}

/// Borrowed view of the rows passing `filter`, in load order. The dataset is
/// never modified.
pub fn apply_filter<'a>(dataset: &'a Dataset, filter: &FilterSpec) -> Vec<&'a OrderRecord> {
    if filter.is_unrestricted() {
        return dataset.records().iter().collect();
    }
    dataset
        .records()
        .iter()
        .filter(|record| filter.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(
        order_date: NaiveDate,
        ship_date: NaiveDate,
        category: &str,
        region: &str,
        segment: &str,
    ) -> OrderRecord {
        OrderRecord {
            row_id: None,
            order_id: "O-1".to_string(),
            order_date,
            ship_date,
            ship_mode: None,
            customer_id: "C-1".to_string(),
            customer_name: "Client".to_string(),
            segment: segment.to_string(),
            country: None,
            city: None,
            state: "Ohio".to_string(),
            postal_code: None,
            region: region.to_string(),
            product_id: None,
            category: category.to_string(),
            sub_category: None,
            product_name: "Widget".to_string(),
            sales: 1.0,
            quantity: 1,
            discount: None,
            profit: 0.0,
        }
    }

    fn create_test_dataset() -> Dataset {
        Dataset::new(vec![
            record(date(2024, 1, 1), date(2024, 1, 3), "Furniture", "East", "Consumer"),
            record(date(2024, 1, 31), date(2024, 2, 2), "Office", "West", "Corporate"),
            record(date(2024, 2, 15), date(2024, 2, 20), "Office", "East", "Consumer"),
            record(date(2024, 3, 10), date(2024, 3, 12), "Technology", "West", "Home Office"),
        ])
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let dataset = create_test_dataset();
        assert_eq!(apply_filter(&dataset, &FilterSpec::new()).len(), 4);
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let dataset = create_test_dataset();
        let filter = FilterSpec::new()
            .with_date_start(date(2024, 1, 31))
            .with_date_end(date(2024, 2, 15));
        let rows = apply_filter(&dataset, &filter);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_date, date(2024, 1, 31));
        assert_eq!(rows[1].order_date, date(2024, 2, 15));
    }

    #[test]
    fn test_date_bounds_ignore_ship_date() {
        let dataset = create_test_dataset();
        // Row 2 ships in February but was ordered in January.
        let filter = FilterSpec::new().with_date_start(date(2024, 2, 1));
        let rows = apply_filter(&dataset, &filter);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.order_date >= date(2024, 2, 1)));
    }

    #[test]
    fn test_dimensions_are_anded() {
        let dataset = create_test_dataset();
        let filter = FilterSpec::new().with_category("Office").with_region("East");
        let rows = apply_filter(&dataset, &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_date, date(2024, 2, 15));
    }

    #[test]
    fn test_dimension_match_is_case_sensitive() {
        let dataset = create_test_dataset();
        let filter = FilterSpec::new().with_category("office");
        assert!(apply_filter(&dataset, &filter).is_empty());
    }

    #[test]
    fn test_sentinel_is_a_literal_in_the_core() {
        let dataset = create_test_dataset();
        let filter = FilterSpec::new().with_segment("Tous");
        assert!(apply_filter(&dataset, &filter).is_empty());
    }

    #[test]
    fn test_inverted_date_range_is_empty_not_error() {
        let dataset = create_test_dataset();
        let filter = FilterSpec::new()
            .with_date_start(date(2024, 3, 1))
            .with_date_end(date(2024, 1, 1));
        assert!(apply_filter(&dataset, &filter).is_empty());
    }

    #[test]
    fn test_narrower_filter_never_grows() {
        let dataset = create_test_dataset();
        let broad = FilterSpec::new().with_region("West");
        let narrow = broad.clone().with_segment("Corporate");
        let broad_count = apply_filter(&dataset, &broad).len();
        let narrow_count = apply_filter(&dataset, &narrow).len();
        assert!(broad_count <= dataset.len());
        assert!(narrow_count <= broad_count);
    }
}
