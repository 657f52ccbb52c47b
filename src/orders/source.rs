//! Orders feed download and parsing

use crate::error::{OrdersError, Result};
use crate::orders::OrderRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Column headers the orders table must carry
///
/// Extra columns are ignored; missing ones make the whole run fail before
/// any order is submitted.
pub const EXPECTED_COLUMNS: [&str; 5] = ["Order number", "Head", "Body", "Legs", "Address"];

/// Parse an orders CSV file into validated records, preserving file order
pub fn read_orders_file(path: &Path) -> Result<Vec<OrderRecord>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| OrdersError::Malformed(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| OrdersError::Malformed(e.to_string()))?
        .clone();
    for column in EXPECTED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(OrdersError::MissingColumn(column.to_string()).into());
        }
    }

    let mut orders = Vec::new();
    for row in reader.deserialize() {
        let record: OrderRecord = row.map_err(|e| OrdersError::Malformed(e.to_string()))?;
        record.validate()?;
        orders.push(record);
    }

    debug!("Parsed {} orders from {}", orders.len(), path.display());
    Ok(orders)
}

/// Orders feed: downloads a fresh CSV and parses it
pub struct OrdersSource {
    csv_url: String,
    local_path: PathBuf,
}

impl OrdersSource {
    /// Create a source for a feed URL and its local download path
    pub fn new<S: Into<String>, P: Into<PathBuf>>(csv_url: S, local_path: P) -> Self {
        Self {
            csv_url: csv_url.into(),
            local_path: local_path.into(),
        }
    }

    /// Download the feed, overwriting any previous local copy
    #[instrument(skip(self))]
    pub async fn download(&self) -> Result<()> {
        info!("Downloading orders feed: {}", self.csv_url);

        let response = reqwest::get(&self.csv_url)
            .await
            .map_err(|e| OrdersError::DownloadFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| OrdersError::DownloadFailed(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| OrdersError::DownloadFailed(e.to_string()))?;

        tokio::fs::write(&self.local_path, &body).await?;

        info!(
            "Orders feed saved to {} ({} bytes)",
            self.local_path.display(),
            body.len()
        );
        Ok(())
    }

    /// Parse the local copy of the feed
    pub fn read(&self) -> Result<Vec<OrderRecord>> {
        read_orders_file(&self.local_path)
    }

    /// Download a fresh copy and parse it
    pub async fn fetch(&self) -> Result<Vec<OrderRecord>> {
        self.download().await?;
        self.read()
    }
}
