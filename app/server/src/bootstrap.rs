//! FILENAME: app/server/src/bootstrap.rs
//! One-time dataset load. The listener is only bound once this has succeeded.

use dataset::{DataLoadError, Dataset};

use crate::config::DataSource;
use crate::logging::{log_enter_info, log_exit_info, log_warn};

/// Reads the raw CSV bytes from a URL or a local file.
pub async fn fetch_source(source: &DataSource) -> Result<Vec<u8>, DataLoadError> {
    match source {
        DataSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| DataLoadError::Unreachable(format!("{}: {}", url, e)))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| DataLoadError::Unreachable(format!("{}: {}", url, e)))?;
            Ok(bytes.to_vec())
        }
        DataSource::Path(path) => Ok(tokio::fs::read(path).await?),
    }
}

/// Fetches, decodes and cleans the source into the shared dataset.
pub async fn load_dataset(source: &DataSource) -> Result<Dataset, DataLoadError> {
    log_enter_info!("DATA", "load_dataset", "source={}", source);

    let bytes = fetch_source(source).await?;
    let dataset = dataset::load_bytes(&bytes)?;

    let report = dataset.load_report();
    if report.rows_dropped() > 0 {
        log_warn!(
            "DATA",
            "dropped {} of {} rows (missing required: {}, bad date: {}, bad number: {})",
            report.rows_dropped(),
            report.rows_read,
            report.missing_required,
            report.invalid_date,
            report.invalid_number
        );
    }

    match dataset.date_range() {
        Some((first, last)) => log_exit_info!(
            "DATA",
            "load_dataset",
            "rows={} period={}..{}",
            dataset.len(),
            first,
            last
        ),
        None => log_exit_info!("DATA", "load_dataset", "rows={}", dataset.len()),
    }

    Ok(dataset)
}
