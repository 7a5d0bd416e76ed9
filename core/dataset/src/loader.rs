// FILENAME: core/dataset/src/loader.rs

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::record::OrderRecord;
use crate::store::{Dataset, LoadReport};
use crate::DataLoadError;

/// A date layout accepted for `Order Date` / `Ship Date`. chrono's `%Y`
/// takes a year of any width, so each layout also pins where the year sits
/// and how many digits it has.
struct DateLayout {
    format: &'static str,
    separator: char,
    year_field: usize,
    year_digits: usize,
}

impl DateLayout {
    fn year_matches(&self, value: &str) -> bool {
        let fields: Vec<&str> = value.split(self.separator).collect();
        fields.len() == 3
            && fields[self.year_field].len() == self.year_digits
            && fields[self.year_field].bytes().all(|b| b.is_ascii_digit())
    }
}

/// Month-first, as in the public Superstore export.
const DATE_LAYOUTS: &[DateLayout] = &[
    DateLayout { format: "%Y-%m-%d", separator: '-', year_field: 0, year_digits: 4 },
    DateLayout { format: "%m/%d/%Y", separator: '/', year_field: 2, year_digits: 4 },
    DateLayout { format: "%m/%d/%y", separator: '/', year_field: 2, year_digits: 2 },
    DateLayout { format: "%m-%d-%Y", separator: '-', year_field: 2, year_digits: 4 },
];

// ============================================================================
// COLUMN MAP
// ============================================================================

/// Positions of the known columns in the header row.
struct ColumnMap {
    order_id: usize,
    order_date: usize,
    ship_date: usize,
    customer_id: usize,
    customer_name: usize,
    segment: usize,
    state: usize,
    region: usize,
    category: usize,
    product_name: usize,
    sales: usize,
    quantity: usize,
    profit: usize,
    row_id: Option<usize>,
    ship_mode: Option<usize>,
    country: Option<usize>,
    city: Option<usize>,
    postal_code: Option<usize>,
    product_id: Option<usize>,
    sub_category: Option<usize>,
    discount: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataLoadError> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |name: &str| names.iter().position(|h| *h == name);
        let require =
            |name: &str| find(name).ok_or_else(|| DataLoadError::MissingColumn(name.to_string()));

        Ok(ColumnMap {
            order_id: require("Order ID")?,
            order_date: require("Order Date")?,
            ship_date: require("Ship Date")?,
            customer_id: require("Customer ID")?,
            customer_name: require("Customer Name")?,
            segment: require("Segment")?,
            state: require("State")?,
            region: require("Region")?,
            category: require("Category")?,
            product_name: require("Product Name")?,
            sales: require("Sales")?,
            quantity: require("Quantity")?,
            profit: require("Profit")?,
            row_id: find("Row ID"),
            ship_mode: find("Ship Mode"),
            country: find("Country"),
            city: find("City"),
            postal_code: find("Postal Code"),
            product_id: find("Product ID"),
            sub_category: find("Sub-Category"),
            discount: find("Discount"),
        })
    }
}

// ============================================================================
// ROW PARSING
// ============================================================================

enum RowRejection {
    MissingRequired,
    InvalidDate,
    InvalidNumber,
}

fn cell(row: &csv::StringRecord, index: usize) -> Option<&str> {
    row.get(index).map(str::trim).filter(|s| !s.is_empty())
}

fn optional_text(row: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index.and_then(|i| cell(row, i)).map(str::to_string)
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_LAYOUTS
        .iter()
        .filter(|layout| layout.year_matches(value))
        .find_map(|layout| NaiveDate::parse_from_str(value, layout.format).ok())
}

fn parse_amount(value: Option<&str>) -> Result<Option<f64>, RowRejection> {
    match value {
        None => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or(RowRejection::InvalidNumber),
    }
}

/// Quantities written as "3" or "3.0" are accepted; "2.5" is not.
fn parse_quantity(value: Option<&str>) -> Result<i64, RowRejection> {
    let Some(s) = value else {
        return Ok(0);
    };
    if let Ok(n) = s.parse::<i64>() {
        return Ok(n);
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 => Ok(n as i64),
        _ => Err(RowRejection::InvalidNumber),
    }
}

fn parse_row(row: &csv::StringRecord, cols: &ColumnMap) -> Result<OrderRecord, RowRejection> {
    let order_id = cell(row, cols.order_id).ok_or(RowRejection::MissingRequired)?;
    let customer_id = cell(row, cols.customer_id).ok_or(RowRejection::MissingRequired)?;
    let sales = parse_amount(cell(row, cols.sales))?.ok_or(RowRejection::MissingRequired)?;

    let order_date = cell(row, cols.order_date)
        .and_then(parse_date)
        .ok_or(RowRejection::InvalidDate)?;
    let ship_date = cell(row, cols.ship_date)
        .and_then(parse_date)
        .ok_or(RowRejection::InvalidDate)?;

    let quantity = parse_quantity(cell(row, cols.quantity))?;
    let profit = parse_amount(cell(row, cols.profit))?.unwrap_or(0.0);
    let discount = match cols.discount {
        Some(i) => parse_amount(cell(row, i))?,
        None => None,
    };
    let row_id = match cols.row_id.and_then(|i| cell(row, i)) {
        Some(s) => Some(s.parse::<i64>().map_err(|_| RowRejection::InvalidNumber)?),
        None => None,
    };

    let text = |index: usize| cell(row, index).unwrap_or_default().to_string();

    Ok(OrderRecord {
        row_id,
        order_id: order_id.to_string(),
        order_date,
        ship_date,
        ship_mode: optional_text(row, cols.ship_mode),
        customer_id: customer_id.to_string(),
        customer_name: text(cols.customer_name),
        segment: text(cols.segment),
        country: optional_text(row, cols.country),
        city: optional_text(row, cols.city),
        state: text(cols.state),
        postal_code: optional_text(row, cols.postal_code),
        region: text(cols.region),
        product_id: optional_text(row, cols.product_id),
        category: text(cols.category),
        sub_category: optional_text(row, cols.sub_category),
        product_name: text(cols.product_name),
        sales,
        quantity,
        discount,
        profit,
    })
}

// ============================================================================
// PUBLIC LOADERS
// ============================================================================

/// Loads and cleans a CSV dataset from any reader.
///
/// Header names are trimmed before lookup. Rows without an order id, customer
/// id or sales amount, or with an unparsable date or number, are dropped and
/// counted in the [`LoadReport`]. Malformed CSV is fatal.
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset, DataLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let cols = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result?;
        report.rows_read += 1;

        match parse_row(&row, &cols) {
            Ok(record) => records.push(record),
            Err(RowRejection::MissingRequired) => report.missing_required += 1,
            Err(RowRejection::InvalidDate) => report.invalid_date += 1,
            Err(RowRejection::InvalidNumber) => report.invalid_number += 1,
        }
    }

    if records.is_empty() {
        return Err(DataLoadError::Empty {
            rows_read: report.rows_read,
        });
    }

    report.rows_kept = records.len();
    Ok(Dataset::with_report(records, report))
}

/// Loads raw source bytes. UTF-8 is tried first; anything else is read as
/// Latin-1, which is how the public Superstore export is encoded.
pub fn load_bytes(bytes: &[u8]) -> Result<Dataset, DataLoadError> {
    let text = decode_text(bytes);
    load_csv(text.as_bytes())
}

pub fn load_path(path: &Path) -> Result<Dataset, DataLoadError> {
    let bytes = std::fs::read(path)?;
    load_bytes(&bytes)
}

fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}
