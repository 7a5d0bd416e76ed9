//! FILENAME: tests/test_load.rs
//! Integration tests for loading a Superstore-shaped CSV file.

mod common;

use chrono::NaiveDate;
use common::SuperstoreFixture;
use dataset::{load_path, DataLoadError, Dimension};

#[test]
fn test_load_full_layout_from_file() {
    let file = SuperstoreFixture::temp_file();
    let dataset = load_path(file.path()).unwrap();

    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.load_report().rows_dropped(), 0);

    let first = &dataset.records()[0];
    assert_eq!(first.row_id, Some(1));
    assert_eq!(first.order_id, "CA-2016-152156");
    assert_eq!(first.order_date, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());
    assert_eq!(first.ship_date, NaiveDate::from_ymd_opt(2016, 11, 11).unwrap());
    assert_eq!(first.ship_mode.as_deref(), Some("Second Class"));
    assert_eq!(first.postal_code.as_deref(), Some("42420"));
    assert_eq!(first.sub_category.as_deref(), Some("Bookcases"));
    assert_eq!(first.discount, Some(0.0));
}

#[test]
fn test_quoted_product_name_kept_whole() {
    let file = SuperstoreFixture::temp_file();
    let dataset = load_path(file.path()).unwrap();

    assert_eq!(
        dataset.records()[1].product_name,
        "Hon Deluxe Fabric Upholstered Stacking Chairs, Rounded Back"
    );
}

#[test]
fn test_filter_options_from_file() {
    let file = SuperstoreFixture::temp_file();
    let dataset = load_path(file.path()).unwrap();

    assert_eq!(
        dataset.distinct_values(Dimension::Category),
        vec!["Furniture", "Office Supplies", "Technology"]
    );
    assert_eq!(dataset.distinct_values(Dimension::Region), vec!["South", "West"]);
    assert_eq!(dataset.distinct_values(Dimension::Segment), vec!["Consumer", "Corporate"]);
    assert_eq!(
        dataset.distinct_values(Dimension::State),
        vec!["California", "Florida", "Kentucky"]
    );

    let (min, max) = dataset.date_range().unwrap();
    assert_eq!(min, NaiveDate::from_ymd_opt(2014, 6, 9).unwrap());
    assert_eq!(max, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());
}

#[test]
fn test_raw_rows_serialize_with_source_headers() {
    let file = SuperstoreFixture::temp_file();
    let dataset = load_path(file.path()).unwrap();

    let json = serde_json::to_value(&dataset.records()[3]).unwrap();
    assert_eq!(json["Order ID"], "US-2015-108966");
    assert_eq!(json["Order Date"], "2015-10-11");
    assert_eq!(json["Ship Date"], "2015-10-18");
    assert_eq!(json["Profit"], -383.031);
    assert_eq!(json["Quantity"], 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_path(&dir.path().join("absent.csv"));
    assert!(matches!(result, Err(DataLoadError::Io(_))));
}
